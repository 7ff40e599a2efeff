//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! Each request is sent once; the whole body is read before returning.

use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Client, Method};
use restcheck_application::ports::{HttpClient, HttpClientError};
use restcheck_domain::{
    request::{Headers, HttpMethod, RequestBody, RequestSpec},
    response::ResponseSpec,
    settings::HttpSettings,
};
use tracing::debug;

const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    timeout_ms: u64,
}

impl ReqwestHttpClient {
    /// Creates a client from the `http` settings section.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(settings: &HttpSettings) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(&settings.user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self {
            client,
            timeout_ms: settings.timeout_ms,
        })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Attaches the body, rejecting JSON bodies that do not parse.
    ///
    /// The body's content type is sent unless `headers` already names one.
    fn build_body(
        builder: reqwest::RequestBuilder,
        body: &RequestBody,
        headers: &Headers,
    ) -> Result<reqwest::RequestBuilder, HttpClientError> {
        let Some(content_type) = body.content_type() else {
            return Ok(builder);
        };
        if content_type.contains("application/json") && !body.content.is_empty() {
            let _: serde_json::Value = serde_json::from_str(&body.content)
                .map_err(|e| HttpClientError::InvalidBody(format!("Invalid JSON: {e}")))?;
        }

        let builder = if headers.get(CONTENT_TYPE.as_str()).is_some() {
            builder
        } else {
            builder.header(CONTENT_TYPE, content_type)
        };
        Ok(builder.body(body.content.clone()))
    }

    /// Maps reqwest errors to domain `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error.to_string();
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(error.to_string())
    }

    /// Flattens response headers, joining repeated values with `, `.
    fn collect_headers(map: &HeaderMap) -> HashMap<String, String> {
        let mut headers: HashMap<String, String> = HashMap::new();
        for (name, value) in map {
            let value = value.to_str().unwrap_or("<binary>");
            headers
                .entry(name.to_string())
                .and_modify(|joined| {
                    joined.push_str(", ");
                    joined.push_str(value);
                })
                .or_insert_with(|| value.to_string());
        }
        headers
    }

    /// Prepares the reqwest request for `request`.
    fn prepare(
        &self,
        request: &RequestSpec,
    ) -> Result<(reqwest::RequestBuilder, u64), HttpClientError> {
        let url = request.full_url()?;
        let timeout_ms = request.timeout_ms.unwrap_or(self.timeout_ms);

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .timeout(Duration::from_millis(timeout_ms));

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        builder = Self::build_body(builder, &request.body, &request.headers)?;

        for header in request.headers.iter() {
            builder = builder.header(&header.name, &header.value);
        }

        Ok((builder, timeout_ms))
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send {
        let prepared = self.prepare(request);
        let method = request.method;
        let url = request.url.clone();

        async move {
            let (builder, timeout_ms) = prepared?;
            debug!(%method, %url, "HTTP request");

            let start = Instant::now();
            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let status = response.status().as_u16();
            let headers = Self::collect_headers(response.headers());

            let body = response
                .bytes()
                .await
                .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?
                .to_vec();
            let duration = start.elapsed();

            debug!(
                %method,
                %url,
                status,
                elapsed_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                size = body.len(),
                "HTTP response"
            );

            Ok(ResponseSpec::new(status, headers, body, duration))
        }
    }
}
