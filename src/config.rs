use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_PRACTICUM_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;
pub const DEFAULT_LOG_FILE: &str = "homework.log";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl Credentials {
    /// Names of the environment variables whose values are empty.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("PRACTICUM_TOKEN", &self.practicum_token),
            ("TELEGRAM_TOKEN", &self.telegram_token),
            ("TELEGRAM_CHAT_ID", &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// True only when all three credentials are non-empty.
pub fn check_tokens(credentials: &Credentials) -> bool {
    credentials.missing().is_empty()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub practicum_endpoint: Url,
    pub telegram_api_url: Url,
    pub retry_period: Duration,
    pub http_timeout: Option<Duration>,
    pub log_file: PathBuf,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials {
            practicum_token: lookup("PRACTICUM_TOKEN").unwrap_or_default(),
            telegram_token: lookup("TELEGRAM_TOKEN").unwrap_or_default(),
            telegram_chat_id: lookup("TELEGRAM_CHAT_ID").unwrap_or_default(),
        };

        let retry_secs: u64 =
            get_parse_or(&lookup, "RETRY_PERIOD_SECS", DEFAULT_RETRY_PERIOD_SECS)?;
        if retry_secs == 0 {
            return Err(Error::Config(
                "RETRY_PERIOD_SECS must be greater than zero".to_string(),
            ));
        }

        let http_timeout = match non_empty(&lookup, "HTTP_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(parse_value("HTTP_TIMEOUT_SECS", &raw)?)),
            None => None,
        };

        let log_format = match non_empty(&lookup, "LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(Error::Config(format!(
                    "Invalid value for LOG_FORMAT: {}",
                    other
                )))
            }
        };

        Ok(Self {
            credentials,
            practicum_endpoint: get_url_or(
                &lookup,
                "PRACTICUM_ENDPOINT",
                DEFAULT_PRACTICUM_ENDPOINT,
            )?,
            telegram_api_url: get_url_or(&lookup, "TELEGRAM_API_URL", DEFAULT_TELEGRAM_API_URL)?,
            retry_period: Duration::from_secs(retry_secs),
            http_timeout,
            log_file: non_empty(&lookup, "LOG_FILE")
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
                .into(),
            log_format,
        })
    }
}

fn non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|value| !value.trim().is_empty())
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn get_parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup, name) {
        Some(raw) => parse_value(name, &raw),
        None => Ok(default),
    }
}

fn get_url_or<F>(lookup: &F, name: &str, default: &str) -> Result<Url>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = non_empty(lookup, name).unwrap_or_else(|| default.to_string());
    parse_value(name, &raw)
}
