use serde_json::json;

use crate::cli::OutputFormat;
use crate::commands::CommandOutput;
use crate::error::CliError;

pub fn render(output: &CommandOutput, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => render_json(output, pretty),
        OutputFormat::Table => render_table(output),
    }
}

fn render_json(output: &CommandOutput, pretty: bool) -> Result<(), CliError> {
    let value = match output {
        CommandOutput::Chart { timeframe, data } => json!({
            "timeframe": timeframe,
            "chart": data,
        }),
        CommandOutput::Summary(rows) => json!({ "summary": rows }),
    };

    let payload = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{payload}");

    Ok(())
}

fn render_table(output: &CommandOutput) -> Result<(), CliError> {
    match output {
        CommandOutput::Chart { timeframe, data } => {
            println!("timeframe: {}", timeframe.as_str());
            if data.is_no_data() {
                println!("no data");
                return Ok(());
            }

            for series in data.series() {
                println!("{}:", series.name);
                if series.points.is_empty() {
                    println!("  (no points)");
                    continue;
                }
                for point in &series.points {
                    match point.value {
                        Some(value) => println!("  {:<16} {:+.2}%", point.label, value),
                        None => println!("  {:<16} -", point.label),
                    }
                }
            }
        }
        CommandOutput::Summary(rows) => {
            println!(
                "{:<10} {:>10} {:>10} {:>10} {:>9} {:>10} {:>10}",
                "symbol", "start", "end", "change", "pct", "high", "low"
            );
            for row in rows {
                match &row.metrics {
                    Some(m) => println!(
                        "{:<10} {:>10.2} {:>10.2} {:>10.2} {:>8.2}% {:>10.2} {:>10.2}",
                        row.symbol.as_str(),
                        m.start_price,
                        m.end_price,
                        m.change,
                        m.percent_change,
                        m.high,
                        m.low
                    ),
                    None => println!("{:<10} no data", row.symbol.as_str()),
                }
            }
        }
    }

    Ok(())
}
