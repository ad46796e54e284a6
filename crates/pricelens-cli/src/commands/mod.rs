mod chart;
mod summary;

use std::str::FromStr;
use std::sync::Arc;

use pricelens_core::{
    DateRange, FetchRequest, NoSession, ReqwestHttpClient, SessionProvider, StaticSession,
    StockDataClient, Symbol, Timeframe, UtcDateTime,
};

use crate::cli::{Cli, Command, WindowArgs};
use crate::error::CliError;

/// Result of a command, ready for the output layer.
pub enum CommandOutput {
    Chart {
        timeframe: Timeframe,
        data: pricelens_core::ChartData,
    },
    Summary(Vec<pricelens_core::SummaryRow>),
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    let client = build_client(cli);

    match &cli.command {
        Command::Chart(args) => chart::run(args, &client).await,
        Command::Summary(args) => summary::run(args, &client).await,
    }
}

fn build_client(cli: &Cli) -> StockDataClient {
    let session: Arc<dyn SessionProvider> = match &cli.token {
        Some(token) => Arc::new(StaticSession::new(token.clone())),
        None => Arc::new(NoSession),
    };

    StockDataClient::new(Arc::new(ReqwestHttpClient::new()), session, &cli.base_url)
        .with_timeout_ms(cli.timeout_ms)
}

/// Translate raw window arguments into a validated fetch request.
pub fn parse_window(args: &WindowArgs) -> Result<FetchRequest, CliError> {
    let tickers = args
        .tickers
        .iter()
        .map(|raw| Symbol::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let timeframe = Timeframe::from_str(&args.timeframe)?;

    let custom_range = match (timeframe, &args.start, &args.end) {
        (Timeframe::Custom, Some(start), Some(end)) => Some(DateRange::new(
            UtcDateTime::parse(start)?,
            UtcDateTime::parse(end)?,
        )?),
        (Timeframe::Custom, _, _) => {
            return Err(CliError::Command(String::from(
                "--timeframe custom requires both --start and --end",
            )))
        }
        _ => None,
    };

    FetchRequest::new(tickers, timeframe, custom_range).map_err(CliError::from)
}
