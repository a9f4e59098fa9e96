pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod shutdown;
pub mod utils;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    poller_service::PollerService, practicum_service::PracticumService,
    status_service::StatusService, telegram_service::TelegramService,
};
use reqwest::Client;
use std::sync::Arc;

pub fn build_http_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.http_timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Wires the real Practicum and Telegram services into a poller.
pub fn build_poller(config: &Config, from_date: i64) -> Result<PollerService> {
    let http_client = build_http_client(config)?;
    let credentials = &config.credentials;

    let practicum = PracticumService::new(
        http_client.clone(),
        config.practicum_endpoint.clone(),
        credentials.practicum_token.clone(),
    );
    let telegram = TelegramService::new(
        http_client,
        config.telegram_api_url.clone(),
        credentials.telegram_token.clone(),
        credentials.telegram_chat_id.clone(),
    );

    Ok(PollerService::new(
        Arc::new(practicum),
        Arc::new(telegram),
        StatusService::default(),
        config.retry_period,
        from_date,
    ))
}
