//! `FlexPay`: async client for the `FlexPay` payment gateway
//!
//! A library for collecting mobile money and card payments, sending
//! payouts, and checking transaction status. Requests are validated
//! before any network call, transient failures are retried with
//! exponential backoff, and loosely typed gateway payloads are
//! normalized into stable response types.

pub mod config;
pub mod environment;
pub mod error;
pub mod gateway;
pub mod schema;
pub mod time;
pub mod transport;

#[cfg(test)]
mod test_fixtures;

pub use config::{ClientConfig, ConfigError};
pub use environment::{Endpoints, Environment};
pub use error::{Error, Result};
pub use gateway::{Client, PayResponse};
pub use schema::{
    CardRequest, CardResponse, CheckResponse, Credential, Currency, MobileRequest, MobileResponse,
    Outcome, PayoutRequest, PayoutResponse, Status, Transaction, TransactionType,
    ValidationError,
};
pub use transport::{ApiError, ApiErrorKind, RetryPolicy};
