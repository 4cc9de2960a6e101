//! Fault-tolerant HTTP client shared by every registry adapter
//!
//! Transient failures (connection errors, timeouts, 5xx and 429 responses) are
//! retried with exponential backoff up to a bounded number of attempts. Any
//! other response, including 404, is returned to the caller on the first try.

use std::time::Duration;

use reqwest::{Method, Response, StatusCode};
use tokio::time::sleep;
use tracing::debug;

use crate::config::HttpConfig;

/// Upper bound on a server-requested `Retry-After` delay
const MAX_RETRY_AFTER: Duration = Duration::from_secs(30);

/// Retrying wrapper around [`reqwest::Client`]; cheap to clone
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    max_attempts: u32,
    initial_backoff: Duration,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            max_attempts: config.max_attempts.max(1),
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
        })
    }

    pub async fn get(&self, url: &str) -> Result<Response, reqwest::Error> {
        self.send(Method::GET, url).await
    }

    pub async fn head(&self, url: &str) -> Result<Response, reqwest::Error> {
        self.send(Method::HEAD, url).await
    }

    async fn send(&self, method: Method, url: &str) -> Result<Response, reqwest::Error> {
        let mut attempt = 1;
        let mut backoff = self.initial_backoff;

        loop {
            let result = self.client.request(method.clone(), url).send().await;

            let delay = match &result {
                Ok(response) if is_retryable_status(response.status()) => {
                    Some(retry_after(response).map_or(backoff, |d| d.max(backoff)))
                }
                Err(e) if is_transient(e) => Some(backoff),
                _ => None,
            };

            let Some(delay) = delay else {
                return result;
            };
            if attempt >= self.max_attempts {
                return result;
            }

            debug!(
                "{} {} failed (attempt {}/{}), retrying in {:?}",
                method, url, attempt, self.max_attempts, delay
            );
            sleep(delay).await;
            attempt += 1;
            backoff = backoff.saturating_mul(2);
        }
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

fn is_transient(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect() || error.is_request()
}

fn retry_after(response: &Response) -> Option<Duration> {
    let value = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?;
    parse_retry_after(value)
}

/// Delay-seconds form only, capped at [`MAX_RETRY_AFTER`]
fn parse_retry_after(value: &str) -> Option<Duration> {
    let seconds = value.trim().parse::<u64>().ok()?;
    Some(Duration::from_secs(seconds).min(MAX_RETRY_AFTER))
}
