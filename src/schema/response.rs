//! Normalized response types decoded from gateway payloads.
//!
//! Decoding is tolerant about representation (numeric strings, absent vs.
//! `null`, legacy snake-case names) but strict about meaning: a status
//! other than `0`/`1` or a missing `code` is a [`ValidationError`].

use serde::Serialize;
use serde_json::Value;

use super::{Currency, Decode, Fields, Outcome, Status, ValidationError};

/// Result of a mobile payment request, also used for webhook callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileResponse {
    pub code: Status,
    pub message: String,
    pub order_number: Option<String>,
    /// Reference assigned by the mobile money operator.
    pub provider_reference: Option<String>,
    pub reference: Option<String>,
    pub url: Option<String>,
}

impl Decode for MobileResponse {
    fn decode(value: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(value)?;

        // Callbacks still use the legacy snake-case name.
        let provider_reference = match fields.optional_string("providerReference")? {
            Some(reference) => Some(reference),
            None => fields.optional_string("provider_reference")?,
        };

        Ok(Self {
            code: fields.status("code")?,
            message: fields.string_or_empty("message")?,
            order_number: fields.optional_owned("orderNumber")?,
            provider_reference: provider_reference.map(ToString::to_string),
            reference: fields.optional_owned("reference")?,
            url: fields.optional_owned("url")?,
        })
    }
}

/// Result of a card payment request.
///
/// On success `url` points at the hosted checkout page the customer must visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    pub code: Status,
    pub message: String,
    pub order_number: Option<String>,
    pub url: Option<String>,
}

impl Decode for CardResponse {
    fn decode(value: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(value)?;
        Ok(Self {
            code: fields.status("code")?,
            message: fields.string_or_empty("message")?,
            order_number: fields.optional_owned("orderNumber")?,
            url: fields.optional_owned("url")?,
        })
    }
}

/// Result of a payout request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutResponse {
    pub code: Status,
    pub message: String,
    pub order_number: Option<String>,
}

impl Decode for PayoutResponse {
    fn decode(value: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(value)?;
        Ok(Self {
            code: fields.status("code")?,
            message: fields.string_or_empty("message")?,
            order_number: fields.optional_owned("orderNumber")?,
        })
    }
}

/// Transaction details returned by a status check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub amount: f64,
    /// Amount charged to the customer, fees included.
    pub amount_customer: f64,
    pub channel: Option<String>,
    /// Creation timestamp as formatted by the gateway.
    pub created_at: String,
    pub currency: Currency,
    pub order_number: Option<String>,
    pub reference: String,
    pub status: Status,
}

impl Decode for Transaction {
    fn decode(value: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(value)?;
        Ok(Self {
            amount: fields.lenient_number("amount")?,
            amount_customer: fields.lenient_number("amountCustomer")?,
            channel: fields.optional_owned("channel")?,
            created_at: fields.string("createdAt")?.to_string(),
            currency: fields.currency("currency")?,
            order_number: fields.optional_owned("orderNumber")?,
            reference: fields.string("reference")?.to_string(),
            status: fields.status("status")?,
        })
    }
}

/// Result of a status check.
///
/// `code` reports whether the lookup itself succeeded; the payment outcome
/// is in `transaction.status`. Unknown order numbers yield a failure code
/// and no transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub code: Status,
    pub message: String,
    pub transaction: Option<Transaction>,
}

impl Decode for CheckResponse {
    fn decode(value: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(value)?;
        let code = fields.status("code")?;
        let message = fields.string_or_empty("message")?;
        let transaction = fields
            .get("transaction")
            .map(|v| Transaction::decode(v).map_err(|e| e.nested_in("transaction")))
            .transpose()?;

        Ok(Self {
            code,
            message,
            transaction,
        })
    }
}

impl Outcome for MobileResponse {
    fn code(&self) -> Status {
        self.code
    }
}

impl Outcome for CardResponse {
    fn code(&self) -> Status {
        self.code
    }
}

impl Outcome for PayoutResponse {
    fn code(&self) -> Status {
        self.code
    }
}

impl Outcome for CheckResponse {
    fn code(&self) -> Status {
        self.code
    }
}
