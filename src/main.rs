use clap::Parser;

use storefront::cli::{execute_command, load_settings, Cli};
use storefront::logger::init_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(&cli)?;
    init_logger(settings.logger.clone().into_logger_config()?)?;

    execute_command(&cli, settings).await
}
