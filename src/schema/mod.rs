//! Validation layer for gateway requests and responses.
//!
//! This module provides:
//! - Scalar domain types ([`Status`], [`Currency`], [`TransactionType`], [`Credential`])
//! - Request types checked before any network call ([`MobileRequest`], [`CardRequest`],
//!   [`PayoutRequest`])
//! - Normalized response types ([`MobileResponse`], [`CardResponse`], [`PayoutResponse`],
//!   [`CheckResponse`])
//! - Field accessors that coerce loosely typed JSON ([`Fields`])
//!
//! # Design
//!
//! Parsing is expressed as plain functions returning `Result<_, ValidationError>`.
//! The first failing field aborts decoding and is named in the error.

mod error;
mod fields;
mod request;
mod response;
mod types;


use serde_json::Value;

pub use error::ValidationError;
pub use fields::{Fields, coerce_number, coerce_status};
pub use request::{
    CARD_REFERENCE_MAX_LENGTH, CardRequest, MobileRequest, PHONE_LENGTH, PayoutRequest,
    RequestShape,
};
pub use response::{CardResponse, CheckResponse, MobileResponse, PayoutResponse, Transaction};
pub use types::{Credential, Currency, Status, TransactionType};

/// Checks a typed value against its constraints.
pub trait Validate {
    /// Returns the first violated constraint, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the offending field.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Builds a typed value from an untyped JSON document.
pub trait Decode: Sized {
    /// Decodes and normalizes `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the first field that is missing,
    /// mistyped, or out of range.
    fn decode(value: &Value) -> Result<Self, ValidationError>;
}

/// A gateway result carrying a [`Status`] code.
pub trait Outcome {
    /// Returns the normalized status code.
    fn code(&self) -> Status;

    /// Returns true if the gateway reported success.
    fn is_successful(&self) -> bool {
        self.code().is_success()
    }
}
