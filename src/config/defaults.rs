//! Values used when neither the environment nor the config file sets an option.
//!
//! Retry values mirror [`RetryPolicy::new`](crate::RetryPolicy::new) so a
//! client built from an empty config behaves like [`Client::new`](crate::Client::new).

use std::time::Duration;

use crate::environment::Environment;

/// The sandbox, so a missing setting never moves real money.
pub const ENVIRONMENT: Environment = Environment::Development;

pub const TIMEOUT_SECS: u64 = 30;

pub const RETRY_MAX_ATTEMPTS: u32 = 4;
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
pub const RETRY_MAX_DELAY_MS: u64 = 30_000;
pub const RETRY_MULTIPLIER: f64 = 2.0;

/// [`TIMEOUT_SECS`] as a [`Duration`].
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
