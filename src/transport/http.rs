//! Wire-level request and response values and the [`HttpClient`] seam.

use std::future::Future;
use std::sync::Arc;

use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use serde_json::Value;
use url::Url;

use super::HttpError;

/// A request as handed to an [`HttpClient`].
///
/// The executor clones it once per attempt, so every retry sends the same
/// method, headers and bytes.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// Serialized JSON for write operations, `None` for status checks.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Starts a request with no headers and no body.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Shorthand for a bodiless `GET`.
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets `name`, replacing any value already present.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// A fully buffered gateway reply.
///
/// Any status is a valid `HttpResponse`; deciding what a 4xx or 5xx means
/// is left to the executor.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Builds a reply carrying `body` as `application/json`.
    #[must_use]
    pub fn json(status: StatusCode, body: &Value) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self::new(status, headers, body.to_string().into_bytes())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body as UTF-8, or `None` if it is not valid UTF-8.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Whether `Content-Type` names `application/json`, in any case and
    /// with or without parameters.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.to_ascii_lowercase().contains("application/json"))
    }

    /// # Errors
    ///
    /// Fails when the body is empty or not valid JSON.
    pub fn json_body(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Sends one request and buffers the reply.
///
/// The gateway client only ever talks to the network through this trait,
/// which is how tests script gateway behavior without sockets.
///
/// ```ignore
/// use flexpay::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};
///
/// struct Offline;
///
/// impl HttpClient for Offline {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Err(HttpError::Timeout)
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Performs `req`.
    ///
    /// Every status code, error statuses included, comes back as `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] only when no reply was received: the
    /// connection failed ([`HttpError::Connection`]), the deadline passed
    /// ([`HttpError::Timeout`]) or the request could not be built
    /// ([`HttpError::InvalidUrl`]).
    fn request(&self, req: HttpRequest)
    -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}

impl<T: HttpClient> HttpClient for Arc<T> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        T::request(self, req).await
    }
}
