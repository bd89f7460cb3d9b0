use crate::config::FetcherConfig;
use crate::error::{Result, RetrievalError};
use async_trait::async_trait;
use rand::Rng;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client as HttpClient, StatusCode};
use std::time::Duration;
use tokio::time::sleep;

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:130.0) Gecko/20100101 Firefox/130.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/128.0 Safari/537.36",
];

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE_TR: &str = "tr-TR,tr;q=0.9,en-US;q=0.8,en;q=0.7";

/// Pause before retrying a rate-limited (429) request.
const RATE_LIMIT_BACKOFF: Duration = Duration::from_millis(200);

/// Source of invoice page bodies.
///
/// The batch runner only depends on this seam, so tests can drive it with a
/// scripted source instead of a live HTTP server.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, RetrievalError>;
}

/// HTTP fetcher with bounded retries and rotating identity headers.
pub struct Client {
    http_client: HttpClient,
    config: FetcherConfig,
}

impl Client {
    pub fn new(config: FetcherConfig) -> Self {
        // one persistent client; connection reuse across page fetches
        let http_client = HttpClient::new();
        Self {
            http_client,
            config,
        }
    }
}

fn random_user_agent() -> &'static str {
    let i = rand::rng().random_range(0..USER_AGENTS.len());
    USER_AGENTS[i]
}

#[async_trait]
impl PageSource for Client {
    /// Fetches one page, retrying up to `max_retries` attempts.
    ///
    /// 429 responses sleep briefly before the next attempt; 5xx responses
    /// retry immediately. Every failed attempt records the error so the last
    /// one observed is surfaced when attempts run out.
    async fn fetch(&self, url: &str) -> Result<String, RetrievalError> {
        let mut last_err: Option<RetrievalError> = None;

        for _ in 0..self.config.max_retries {
            let user_agent = random_user_agent();
            let response = self
                .http_client
                .get(url)
                .header(USER_AGENT, user_agent)
                .header(ACCEPT, ACCEPT_HTML)
                .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_TR)
                .timeout(Duration::from_millis(self.config.timeout_ms))
                .send()
                .await;

            let response = match response {
                Ok(response) => response,
                Err(err) => {
                    last_err = Some(RetrievalError::Http(err));
                    continue;
                }
            };

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                last_err = Some(RetrievalError::status(status));
                sleep(RATE_LIMIT_BACKOFF).await;
                continue;
            }
            if status.is_server_error() {
                last_err = Some(RetrievalError::status(status));
                continue;
            }
            if !status.is_success() {
                last_err = Some(RetrievalError::status(status));
                continue;
            }

            match response.text().await {
                Ok(body) => return Ok(body),
                Err(err) => last_err = Some(RetrievalError::Http(err)),
            }
        }

        Err(last_err.unwrap_or(RetrievalError::NoAttempt))
    }
}
