//! Feedback forwarding to an e-mail delivery API
//!
//! Delivery is best effort: a missing API key or an upstream rejection is
//! logged and the submitter still sees success.

use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::FeedbackConfig;
use crate::errors::{AppError, AppResult};
use crate::utils::HttpClientFactory;

const FEEDBACK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct EmailPayload<'a> {
    from: &'a str,
    to: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    text: String,
}

/// What happened to a feedback submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackDelivery {
    Sent,
    /// No API key configured; the feedback was only logged
    Skipped,
    /// The e-mail API rejected or never answered the request
    Failed { reason: String },
}

pub struct FeedbackService {
    config: FeedbackConfig,
    client: Client,
}

impl FeedbackService {
    pub fn new(config: FeedbackConfig) -> AppResult<Self> {
        let client = HttpClientFactory::new(FEEDBACK_TIMEOUT).build("feedback")?;
        Ok(Self { config, client })
    }

    /// Validate and forward one piece of feedback
    pub async fn submit(&self, feedback: &str) -> AppResult<FeedbackDelivery> {
        let feedback = feedback.trim();
        if feedback.is_empty() {
            return Err(AppError::validation("Feedback is required"));
        }

        let Some(api_key) = self.config.resolved_api_key() else {
            error!("Feedback API key is not configured; feedback only logged");
            info!("Feedback received: {}", feedback);
            return Ok(FeedbackDelivery::Skipped);
        };

        if self.config.recipients.is_empty() {
            warn!("No feedback recipients configured; feedback only logged");
            info!("Feedback received: {}", feedback);
            return Ok(FeedbackDelivery::Skipped);
        }

        let payload = EmailPayload {
            from: &self.config.sender,
            to: &self.config.recipients,
            reply_to: self.config.recipients.first().map(String::as_str),
            subject: &self.config.subject,
            text: format!(
                "New feedback received at {}\n\n{}",
                chrono::Utc::now().to_rfc3339(),
                feedback
            ),
        };

        let sent = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await;

        match sent {
            Ok(response) if response.status().is_success() => {
                info!("Feedback e-mail sent ({})", response.status());
                Ok(FeedbackDelivery::Sent)
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                error!("Feedback e-mail rejected with {}: {}", status, body);
                Ok(FeedbackDelivery::Failed {
                    reason: format!("e-mail API answered {status}"),
                })
            }
            Err(e) => {
                error!("Feedback e-mail request failed: {}", e);
                Ok(FeedbackDelivery::Failed {
                    reason: e.to_string(),
                })
            }
        }
    }
}
