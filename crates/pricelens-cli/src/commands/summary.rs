use pricelens_core::{summarize, StockDataClient};

use crate::cli::WindowArgs;
use crate::error::CliError;

use super::{parse_window, CommandOutput};

pub async fn run(args: &WindowArgs, client: &StockDataClient) -> Result<CommandOutput, CliError> {
    let request = parse_window(args)?;
    let bundle = client.fetch(&request).await?;

    Ok(CommandOutput::Summary(summarize(
        &bundle,
        request.tickers(),
    )))
}
