use std::io::BufReader;
use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::error::{AppError, Context};

use super::{EventStream, FetchResult};

/// The HTTP collaborator the client talks through.
///
/// Implementations own retries, pooling and TLS; callers only see JSON bodies or event streams.
pub trait Transport {
    fn get_json(&self, url: &str, params: &[(String, String)]) -> FetchResult<Value>;

    fn open_stream(&self, url: &str) -> FetchResult<EventStream>;
}

/// Blocking `reqwest` transport reused across calls.
pub struct HttpTransport {
    client: Client,
    stream_client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to construct HTTP client")?;
        // Event streams stay open indefinitely, so they get a client without a read timeout.
        let stream_client = Client::builder()
            .timeout(None)
            .build()
            .context("Failed to construct streaming HTTP client")?;

        Ok(Self {
            client,
            stream_client,
        })
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str, params: &[(String, String)]) -> FetchResult<Value> {
        let response = self
            .client
            .get(url)
            .query(params)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(reqwest::Error::without_url)?;
        let response = ensure_success(response)?;
        debug!("{} answered {}", redacted_url(&response), response.status());

        let body = response
            .text()
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to read response body from {}", strip_query(url)))?;
        let value: Value = serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse JSON response from {}", strip_query(url)))?;

        Ok(value)
    }

    fn open_stream(&self, url: &str) -> FetchResult<EventStream> {
        let response = self
            .stream_client
            .get(url)
            .header(ACCEPT, "text/event-stream")
            .send()
            .map_err(reqwest::Error::without_url)?;
        let response = ensure_success(response)?;
        info!("opened event stream {}", redacted_url(&response));

        Ok(EventStream::new(BufReader::new(response)))
    }
}

fn ensure_success(response: Response) -> FetchResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(AppError::Status {
            status: status.as_u16(),
            url: redacted_url(&response),
        })
    }
}

fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

/// The request URL without its query string, which carries the token.
fn redacted_url(response: &Response) -> String {
    let mut url = response.url().clone();
    url.set_query(None);
    url.to_string()
}
