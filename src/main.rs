use magicbot::bot::{run_dispatcher, BotConfig};
use tokio_util::sync::CancellationToken;

#[tokio::main]
pub async fn main() {
    dotenv::dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting MagicBot...");

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    let bot = teloxide::Bot::from_env();

    log::info!("MagicBot started successfully!");

    if let Err(err) = run_dispatcher(bot, config, CancellationToken::new()).await {
        log::error!("MagicBot stopped with an error: {err}");
        std::process::exit(1);
    }
}
