//! Request execution with retries and failure classification.

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use serde_json::{Map, Value};
use url::Url;

use crate::time::{Sleeper, TokioSleeper};

use super::{ApiError, ApiErrorKind, HttpClient, HttpError, HttpRequest, HttpResponse, RetryPolicy};

/// Builds a gateway request with the fixed JSON headers.
///
/// `body` is serialized for write operations; read operations pass `None`
/// and are sent without a body.
#[must_use]
pub fn build_request(
    method: Method,
    url: Url,
    authorization: &HeaderValue,
    body: Option<&Value>,
) -> HttpRequest {
    let request = HttpRequest::new(method, url)
        .with_header(ACCEPT, HeaderValue::from_static("application/json"))
        .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .with_header(AUTHORIZATION, authorization.clone());

    match body {
        Some(body) => request.with_body(body.to_string().into_bytes()),
        None => request,
    }
}

/// Sends gateway requests, retrying transient failures.
///
/// Each call to [`RequestExecutor::execute`] owns its retry loop and
/// backoff timer; the executor itself holds no mutable state and can be
/// shared between concurrent calls.
///
/// # Retry rules
///
/// - 2xx: the JSON body is returned (an empty object if it is not JSON).
/// - Account, client, and 4xx network failures: returned immediately.
/// - Server failures, other network failures and transport errors:
///   retried per [`RetryPolicy`]; the last error is returned once
///   attempts are exhausted.
///
/// # Type Parameters
///
/// `H` performs the calls; `S` waits between them and is a [`TokioSleeper`]
/// unless a test swaps it.
#[derive(Debug, Clone)]
pub struct RequestExecutor<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
    retry_policy: RetryPolicy,
}

impl<H> RequestExecutor<H, TokioSleeper> {
    /// Creates an executor with the default retry policy and [`TokioSleeper`].
    #[must_use]
    pub fn new(client: H) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl<H, S> RequestExecutor<H, S> {
    /// Swaps the backoff timer, keeping client and policy.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> RequestExecutor<H, S2> {
        RequestExecutor {
            client: self.client,
            sleeper,
            retry_policy: self.retry_policy,
        }
    }

    /// Replaces the HTTP client, keeping the sleeper and retry policy.
    #[must_use]
    pub fn with_http_client<H2>(self, client: H2) -> RequestExecutor<H2, S> {
        RequestExecutor {
            client,
            sleeper: self.sleeper,
            retry_policy: self.retry_policy,
        }
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Schedule applied by [`RequestExecutor::execute`].
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }
}

impl<H: HttpClient, S: Sleeper> RequestExecutor<H, S> {
    /// Executes `request`, retrying transient failures.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] of the last attempt.
    pub async fn execute(&self, request: &HttpRequest) -> Result<Value, ApiError> {
        let mut attempt = 1;

        loop {
            tracing::debug!(
                method = %request.method,
                url = %request.url,
                attempt,
                "Sending gateway request"
            );

            let error = match self.attempt(request).await {
                Ok(payload) => return Ok(payload),
                Err(error) => error,
            };

            if !error.is_retryable() {
                tracing::debug!(kind = %error.kind(), "Gateway request failed: {error}");
                return Err(error);
            }

            if !self.retry_policy.should_retry(attempt) {
                tracing::warn!(attempts = attempt, "Gateway request failed, giving up: {error}");
                return Err(error);
            }

            let delay = self.retry_policy.delay_for_retry(attempt - 1);
            tracing::warn!(
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Gateway request failed, retrying: {error}"
            );
            self.sleeper.sleep(delay).await;
            attempt += 1;
        }
    }

    /// Executes a single attempt.
    async fn attempt(&self, request: &HttpRequest) -> Result<Value, ApiError> {
        let response = self.client.request(request.clone()).await?;

        if response.is_success() {
            return Ok(success_payload(&response));
        }

        Err(error_from_response(&response))
    }
}

/// Decodes a 2xx body, falling back to an empty object.
fn success_payload(response: &HttpResponse) -> Value {
    if !response.is_json() {
        tracing::debug!(status = %response.status, "Response is not JSON, using empty payload");
        return empty_object();
    }

    response.json_body().unwrap_or_else(|e| {
        tracing::warn!(
            status = %response.status,
            "Malformed JSON response, using empty payload: {e}"
        );
        empty_object()
    })
}

/// Classifies a non-2xx response using its `message` and `error` fields.
fn error_from_response(response: &HttpResponse) -> ApiError {
    let payload = if response.is_json() {
        response.json_body().unwrap_or_else(|_| empty_object())
    } else {
        empty_object()
    };

    let message = payload
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let error_type = payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or(ApiError::UNKNOWN_TYPE);

    ApiError::from_response(message, error_type, response.status.as_u16())
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Separates transient failures from ones another attempt cannot fix.
///
/// [`RequestExecutor`] stops at the first error for which this is false.
pub trait IsRetryable {
    /// True when the same request might succeed if sent again.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for HttpError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout => true,
            // A malformed URL stays malformed.
            Self::InvalidUrl(_) => false,
        }
    }
}

impl IsRetryable for ApiError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            ApiErrorKind::Account | ApiErrorKind::Client => false,
            ApiErrorKind::Server => true,
            ApiErrorKind::Network => {
                if let Some(source) = self.transport_error() {
                    return source.is_retryable();
                }
                !self.status().is_some_and(|s| (400..500).contains(&s))
            }
        }
    }
}
