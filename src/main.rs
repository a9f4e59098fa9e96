use homework_status_bot::{
    build_poller,
    config::{check_tokens, Config},
    error::Error,
    shutdown::install_shutdown_handler,
    utils::{logging::init_logging, time},
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_logging(&config.log_file, config.log_format)?;

    if !check_tokens(&config.credentials) {
        let missing = config.credentials.missing().join(", ");
        tracing::error!(critical = true, missing = %missing, "Required environment variables are not set");
        return Err(Error::MissingCredentials(missing).into());
    }

    let from_date = time::unix_now();
    info!(
        "Watching homework updates since {}",
        time::from_unix(from_date)
            .map(time::to_rfc3339)
            .unwrap_or_else(|| from_date.to_string())
    );

    let shutdown = install_shutdown_handler()?;
    let mut poller = build_poller(&config, from_date)?;
    poller.run(shutdown).await;

    info!("Homework status bot stopped");
    Ok(())
}
