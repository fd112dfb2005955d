//! Transport layer for talking to the gateway over HTTP.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`], [`build_request`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Classifying gateway failures ([`ApiError`], [`ApiErrorKind`])
//! - Executing requests with retries ([`RequestExecutor`], [`IsRetryable`])
//! - Retry policy configuration ([`RetryPolicy`])

mod client;
mod error;
mod executor;
mod http;
mod retry;


pub use client::ReqwestClient;
pub use error::{ApiError, ApiErrorKind, HttpError};
pub use executor::{IsRetryable, RequestExecutor, build_request};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use retry::RetryPolicy;
