use pricelens_core::{chart_series, StockDataClient};

use crate::cli::WindowArgs;
use crate::error::CliError;

use super::{parse_window, CommandOutput};

pub async fn run(args: &WindowArgs, client: &StockDataClient) -> Result<CommandOutput, CliError> {
    let request = parse_window(args)?;
    let bundle = client.fetch(&request).await?;

    let data = chart_series(&bundle, request.tickers(), request.timeframe());
    Ok(CommandOutput::Chart {
        timeframe: request.timeframe(),
        data,
    })
}
