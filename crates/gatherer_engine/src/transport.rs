use std::time::Duration;

use engine_logging::engine_trace;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, CONTENT_TYPE, RETRY_AFTER};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::{ListsPage, PageRequest, PeoplePage, Reply, RetrievalError};

pub const DEFAULT_BASE_URL: &str = "https://api.apollo.io/api/v1";

const API_KEY_HEADER: &str = "x-api-key";
const DETAIL_PREVIEW_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Raw access to the provider. Implementations report throttling as
/// [`Reply::Throttled`] and never retry on their own.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn search_people(
        &self,
        request: &PageRequest<'_>,
    ) -> Result<Reply<PeoplePage>, RetrievalError>;

    async fn saved_lists(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Reply<ListsPage>, RetrievalError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(api_key: &str, settings: ProviderSettings) -> Result<Self, RetrievalError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key).map_err(|_| {
            RetrievalError::Transport("api key contains invalid header characters".into())
        })?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(|err| RetrievalError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn search_people(
        &self,
        request: &PageRequest<'_>,
    ) -> Result<Reply<PeoplePage>, RetrievalError> {
        let body = serde_json::to_vec(&request.body())
            .map_err(|err| RetrievalError::MalformedResponse(err.to_string()))?;
        engine_trace!("POST people/search page={}", request.page);
        let response = self
            .client
            .post(self.url("people/search"))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_reply(response).await
    }

    async fn saved_lists(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Reply<ListsPage>, RetrievalError> {
        let url = format!("{}?page={page}&per_page={per_page}", self.url("lists"));
        engine_trace!("GET lists page={}", page);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_reply(response).await
    }
}

async fn read_reply<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Reply<T>, RetrievalError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_retry_after);
        return Ok(Reply::Throttled { retry_after });
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(RetrievalError::Authorization {
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let text = response.text().await.map_err(map_reqwest_error)?;

    if !status.is_success() {
        return Err(RetrievalError::HttpStatus {
            status: status.as_u16(),
            detail: preview(&text),
        });
    }

    serde_json::from_str(&text).map(Reply::Ready).map_err(|err| {
        RetrievalError::MalformedResponse(format!(
            "{err} (status {}, content-type {content_type}, body: {})",
            status.as_u16(),
            preview(&text)
        ))
    })
}

/// Seconds form only; HTTP-date values are ignored.
fn parse_retry_after(value: &str) -> Option<Duration> {
    let secs: f64 = value.trim().parse().ok()?;
    if secs.is_finite() && secs >= 0.0 {
        Some(Duration::from_secs_f64(secs))
    } else {
        None
    }
}

fn preview(text: &str) -> String {
    if text.is_empty() {
        return "(empty response)".to_string();
    }
    text.chars().take(DETAIL_PREVIEW_CHARS).collect()
}

fn map_reqwest_error(err: reqwest::Error) -> RetrievalError {
    if err.is_timeout() {
        return RetrievalError::Transport(format!("timeout: {err}"));
    }
    if err.is_decode() {
        return RetrievalError::MalformedResponse(err.to_string());
    }
    RetrievalError::Transport(err.to_string())
}
