//! HTTP client factory
//!
//! Each outbound concern (discovery, scraping, image probing, feedback) gets
//! its own `reqwest::Client` with the user agent and timeout it needs.

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::debug;

use crate::errors::{AppError, AppResult};

const MAX_REDIRECTS: usize = 10;

/// Builder for outbound HTTP clients
#[derive(Debug, Clone)]
pub struct HttpClientFactory {
    user_agent: String,
    timeout: Duration,
    accept: Option<String>,
}

impl HttpClientFactory {
    pub fn new(timeout: Duration) -> Self {
        Self {
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            timeout,
            accept: None,
        }
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Default `Accept` header sent with every request
    pub fn with_accept<S: Into<String>>(mut self, accept: S) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Build a client for the named service
    pub fn build(&self, service_name: &str) -> AppResult<Client> {
        let mut headers = HeaderMap::new();
        if let Some(accept) = &self.accept {
            let value = HeaderValue::from_str(accept).map_err(|e| {
                AppError::configuration(format!("invalid Accept header for {service_name}: {e}"))
            })?;
            headers.insert(ACCEPT, value);
        }

        debug!(
            "Creating HTTP client for service: {} (timeout {:?})",
            service_name, self.timeout
        );

        Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                AppError::configuration(format!(
                    "failed to build HTTP client for {service_name}: {e}"
                ))
            })
    }
}
