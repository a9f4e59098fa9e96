use crate::error::{Error, Result};
use crate::models::homework::{HomeworkRecord, HomeworkStatus};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

pub const NO_NEW_HOMEWORK: &str = "Нет новых домашних работ.";

/// Validates Practicum responses and turns the latest homework into a
/// notification text.
#[derive(Debug, Clone)]
pub struct StatusService {
    verdicts: HashMap<HomeworkStatus, String>,
}

impl Default for StatusService {
    fn default() -> Self {
        Self::new(
            HomeworkStatus::ALL
                .into_iter()
                .map(|status| (status, status.verdict().to_string()))
                .collect(),
        )
    }
}

impl StatusService {
    pub fn new(verdicts: HashMap<HomeworkStatus, String>) -> Self {
        Self { verdicts }
    }

    pub fn check_response(&self, response: &JsonValue) -> Result<String> {
        let body = response.as_object().ok_or_else(|| {
            Error::ResponseType("API response is not a JSON object".to_string())
        })?;

        if !body.contains_key("homeworks") || !body.contains_key("current_date") {
            tracing::error!("API response lacks 'homeworks' or 'current_date'");
            return Err(Error::ResponseValue(
                "API response lacks 'homeworks' or 'current_date'".to_string(),
            ));
        }

        let homeworks = body["homeworks"].as_array().ok_or_else(|| {
            Error::ResponseType("'homeworks' is not a list".to_string())
        })?;

        match homeworks.first() {
            None => {
                tracing::debug!("{}", NO_NEW_HOMEWORK);
                Ok(NO_NEW_HOMEWORK.to_string())
            }
            Some(homework) => self.parse_status(homework),
        }
    }

    pub fn parse_status(&self, homework: &JsonValue) -> Result<String> {
        let fields = homework.as_object().ok_or_else(|| {
            Error::ResponseType("homework record is not a JSON object".to_string())
        })?;

        let Some(name) = fields.get("homework_name") else {
            tracing::error!("Homework record has no name");
            return Err(Error::MissingKey("homework_name"));
        };
        let homework_name = match name {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        };

        let raw_status = fields
            .get("status")
            .and_then(JsonValue::as_str)
            .unwrap_or_default();
        let status = match raw_status.parse::<HomeworkStatus>() {
            Ok(status) if self.verdicts.contains_key(&status) => status,
            _ => {
                tracing::error!(status = %raw_status, "Unknown homework status");
                return Err(Error::UnknownStatus(raw_status.to_string()));
            }
        };

        self.format(&HomeworkRecord {
            homework_name,
            status,
        })
    }

    pub fn format(&self, record: &HomeworkRecord) -> Result<String> {
        let verdict = self
            .verdicts
            .get(&record.status)
            .ok_or_else(|| Error::UnknownStatus(record.status.to_string()))?;
        tracing::debug!(homework = %record.homework_name, "Extracted verdict: {}", verdict);
        Ok(format!(
            "Изменился статус проверки работы \"{}\". {}",
            record.homework_name, verdict
        ))
    }
}
