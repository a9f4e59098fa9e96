//! Poll-check-notify loop.
//!
//! Every cycle fetches homework statuses, turns the newest one into a message
//! and forwards it to Telegram only when it differs from the last message that
//! was delivered. Failures inside a cycle are reported to the chat once per
//! distinct error text and never stop the loop.

use crate::error::{Error, Result};
use crate::services::practicum_service::HomeworkApi;
use crate::services::status_service::StatusService;
use crate::services::telegram_service::Notifier;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A new status message was delivered.
    Notified,
    /// Same message as last time; nothing sent.
    Unchanged,
    /// The cycle failed and the error was delivered to the chat.
    ErrorReported,
    /// The cycle failed; the error was either already reported or could not be sent.
    ErrorSuppressed,
}

pub fn error_message(error: &Error) -> String {
    format!("Что-то пошло не так. Ошибка: {}", error)
}

pub struct PollerService {
    api: Arc<dyn HomeworkApi>,
    notifier: Arc<dyn Notifier>,
    status: StatusService,
    retry_period: Duration,
    from_date: i64,
    last_message: Option<String>,
}

impl PollerService {
    pub fn new(
        api: Arc<dyn HomeworkApi>,
        notifier: Arc<dyn Notifier>,
        status: StatusService,
        retry_period: Duration,
        from_date: i64,
    ) -> Self {
        Self {
            api,
            notifier,
            status,
            retry_period,
            from_date,
            last_message: None,
        }
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Runs cycles until `shutdown` is cancelled. The first cycle starts immediately.
    pub async fn run(&mut self, shutdown: CancellationToken) {
        tracing::info!(
            from_date = self.from_date,
            "Starting homework status poller (interval: {:?})",
            self.retry_period
        );

        loop {
            let outcome = self.run_once().await;
            tracing::debug!(?outcome, "Poll cycle finished");

            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Shutdown requested, stopping poller");
                    break;
                }
                _ = tokio::time::sleep(self.retry_period) => {}
            }
        }
    }

    pub async fn run_once(&mut self) -> PollOutcome {
        tracing::info!("Checking homework status");

        match self.check_and_notify().await {
            Ok(outcome) => outcome,
            Err(error) => self.report_error(error).await,
        }
    }

    async fn check_and_notify(&mut self) -> Result<PollOutcome> {
        let response = self.api.get_api_answer(self.from_date).await?;
        let message = self.status.check_response(&response)?;

        if self.last_message.as_deref() == Some(message.as_str()) {
            tracing::debug!("Homework status unchanged");
            return Ok(PollOutcome::Unchanged);
        }

        tracing::info!("Homework status changed, notifying");
        self.notifier.send_message(&message).await?;
        self.last_message = Some(message);
        Ok(PollOutcome::Notified)
    }

    async fn report_error(&mut self, error: Error) -> PollOutcome {
        let message = error_message(&error);
        tracing::error!(kind = error.kind(), "{}", message);

        if self.last_message.as_deref() == Some(message.as_str()) {
            return PollOutcome::ErrorSuppressed;
        }

        // A failure here is only logged; the next cycle tries again.
        match self.notifier.send_message(&message).await {
            Ok(()) => {
                self.last_message = Some(message);
                PollOutcome::ErrorReported
            }
            Err(send_error) => {
                tracing::error!(
                    kind = send_error.kind(),
                    "Could not deliver error report: {}",
                    send_error
                );
                PollOutcome::ErrorSuppressed
            }
        }
    }
}
