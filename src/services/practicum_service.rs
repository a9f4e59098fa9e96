use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::Value as JsonValue;
use url::Url;

/// Source of raw homework status responses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    async fn get_api_answer(&self, from_date: i64) -> Result<JsonValue>;
}

#[derive(Clone)]
pub struct PracticumService {
    client: Client,
    endpoint: Url,
    token: String,
}

impl PracticumService {
    pub fn new(client: Client, endpoint: Url, token: String) -> Self {
        Self {
            client,
            endpoint,
            token,
        }
    }
}

#[async_trait]
impl HomeworkApi for PracticumService {
    async fn get_api_answer(&self, from_date: i64) -> Result<JsonValue> {
        tracing::debug!(from_date, "Requesting homework statuses from {}", self.endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .header(header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Could not reach the homework service");
                Error::Request(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!(status = status.as_u16(), "Homework service returned an error status");
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read homework service response");
            Error::Request(e)
        })?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "Homework service response is not valid JSON");
            Error::Json(e)
        })
    }
}
