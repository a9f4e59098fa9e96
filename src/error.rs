pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variables: {0}")]
    MissingCredentials(String),

    #[error("Failed to reach the homework service: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Homework service responded with status code {status}")]
    UnexpectedStatus { status: u16 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response type: {0}")]
    ResponseType(String),

    #[error("Malformed response: {0}")]
    ResponseValue(String),

    #[error("Missing key '{0}' in homework record")]
    MissingKey(&'static str),

    #[error("Undocumented homework status '{0}'")]
    UnknownStatus(String),

    #[error("Failed to send Telegram message: {0}")]
    Notification(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable label for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::MissingCredentials(_) => "missing_credentials",
            Error::Request(_) => "request",
            Error::UnexpectedStatus { .. } => "unexpected_status",
            Error::Json(_) => "json",
            Error::ResponseType(_) => "response_type",
            Error::ResponseValue(_) => "response_value",
            Error::MissingKey(_) => "missing_key",
            Error::UnknownStatus(_) => "unknown_status",
            Error::Notification(_) => "notification",
            Error::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_code() {
        let err = Error::UnexpectedStatus { status: 503 };
        assert_eq!(err.kind(), "unexpected_status");
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn unknown_status_names_offending_value() {
        let err = Error::UnknownStatus("unknown_code".to_string());
        assert_eq!(
            err.to_string(),
            "Undocumented homework status 'unknown_code'"
        );
    }
}
