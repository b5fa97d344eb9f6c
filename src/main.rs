use clap::Parser;
use legislatie_proxy::config::settings::Settings;
use legislatie_proxy::server::server;
use legislatie_proxy::utils::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();
    init_logging(settings.log_level(), settings.log_format);
    server::start(&settings).await
}
