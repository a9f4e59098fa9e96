use crate::config::LogFormat;
use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "homework_status_bot=debug,info";

/// Installs the global subscriber: stdout in the requested format plus a plain
/// log file that is truncated on every start.
pub fn init_logging(log_file: &Path, format: LogFormat) -> Result<()> {
    let file = File::create(log_file)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (text_layer, json_layer) = match format {
        LogFormat::Text => (Some(fmt::layer().with_writer(std::io::stdout)), None),
        LogFormat::Json => (None, Some(fmt::layer().json().with_writer(std::io::stdout))),
    };

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Logging already initialized: {}", e)))
}
