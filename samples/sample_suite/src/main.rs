mod config;
mod scenarios;

use env_logger::Env;

use config::load_secrets;

#[tokio::main]
async fn main() -> bingads_bulk_client::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = load_secrets()?;
    let manager = config.bulk_service_manager();

    scenarios::download_keywords::run(&manager, &config).await?;
    scenarios::pause_ads::run(&manager, &config).await?;

    Ok(())
}
