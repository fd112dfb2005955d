//! Operation facade over the transport and schema layers.
//!
//! [`Client`] exposes one async method per gateway operation:
//! - [`Client::mobile`], [`Client::card`] and [`Client::payout`] start payments
//! - [`Client::check`] reads a transaction's status
//! - [`Client::pay`] routes an untyped payload by its shape
//! - [`Client::handle_callback`] decodes webhook data without a network call

mod client;

#[cfg(test)]
mod client_tests;

pub use client::{Client, PayResponse};
