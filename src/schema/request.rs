//! Outbound request types and their validation rules.

use serde::Serialize;
use serde_json::Value;

use super::{Currency, Decode, Fields, TransactionType, Validate, ValidationError};

const AMOUNT_MESSAGE: &str = "The transaction amount should be greater than 0";
const REFERENCE_MESSAGE: &str = "The transaction reference is mandatory";
const CARD_REFERENCE_MESSAGE: &str = "The reference must be between 1 and 25 characters";
const PHONE_MESSAGE: &str = "The phone number should be 12 characters long, eg: 243123456789";
const DESCRIPTION_MESSAGE: &str = "The description must be provided";

/// Required length of a phone number (country code included).
pub const PHONE_LENGTH: usize = 12;

/// Maximum length of a card payment reference.
pub const CARD_REFERENCE_MAX_LENGTH: usize = 25;

/// Mobile money collection request.
///
/// The redirect URLs and description are accepted for parity with card
/// requests but are optional here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileRequest {
    pub amount: f64,
    pub currency: Currency,
    pub reference: String,
    pub callback_url: String,
    /// Payer phone number, e.g. `243123456789`.
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approve_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl MobileRequest {
    /// Creates a request with the mandatory fields set.
    #[must_use]
    pub fn new(
        amount: f64,
        currency: Currency,
        reference: impl Into<String>,
        callback_url: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            currency,
            reference: reference.into(),
            callback_url: callback_url.into(),
            phone: phone.into(),
            approve_url: None,
            cancel_url: None,
            decline_url: None,
            description: None,
            kind: TransactionType::default(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the transaction category.
    #[must_use]
    pub const fn with_kind(mut self, kind: TransactionType) -> Self {
        self.kind = kind;
        self
    }
}

impl Validate for MobileRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_amount(self.amount)?;
        validate_reference(&self.reference)?;
        validate_url("callbackUrl", &self.callback_url)?;
        validate_phone(&self.phone)?;
        validate_optional_url("approveUrl", self.approve_url.as_deref())?;
        validate_optional_url("cancelUrl", self.cancel_url.as_deref())?;
        validate_optional_url("declineUrl", self.decline_url.as_deref())
    }
}

impl Decode for MobileRequest {
    fn decode(value: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(value)?;
        let request = Self {
            amount: fields.number("amount")?,
            currency: fields.currency("currency")?,
            reference: fields.string("reference")?.to_string(),
            callback_url: fields.string("callbackUrl")?.to_string(),
            phone: fields.string("phone")?.to_string(),
            approve_url: fields.optional_owned("approveUrl")?,
            cancel_url: fields.optional_owned("cancelUrl")?,
            decline_url: fields.optional_owned("declineUrl")?,
            description: fields.optional_owned("description")?,
            kind: decode_kind(&fields)?,
        };
        request.validate()?;
        Ok(request)
    }
}

/// Card payment request. Every redirect URL and the description are required.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    pub amount: f64,
    pub currency: Currency,
    /// Merchant reference, 1 to 25 characters.
    pub reference: String,
    pub callback_url: String,
    pub approve_url: String,
    pub cancel_url: String,
    pub decline_url: String,
    pub home_url: String,
    pub description: String,
}

impl Validate for CardRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_amount(self.amount)?;

        let length = self.reference.chars().count();
        if length == 0 || length > CARD_REFERENCE_MAX_LENGTH {
            return Err(ValidationError::constraint("reference", CARD_REFERENCE_MESSAGE));
        }

        validate_url("callbackUrl", &self.callback_url)?;
        validate_url("approveUrl", &self.approve_url)?;
        validate_url("cancelUrl", &self.cancel_url)?;
        validate_url("declineUrl", &self.decline_url)?;
        validate_url("homeUrl", &self.home_url)?;

        if self.description.is_empty() {
            return Err(ValidationError::constraint("description", DESCRIPTION_MESSAGE));
        }
        Ok(())
    }
}

impl Decode for CardRequest {
    fn decode(value: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(value)?;
        let request = Self {
            amount: fields.number("amount")?,
            currency: fields.currency("currency")?,
            reference: fields.string("reference")?.to_string(),
            callback_url: fields.string("callbackUrl")?.to_string(),
            approve_url: fields.string("approveUrl")?.to_string(),
            cancel_url: fields.string("cancelUrl")?.to_string(),
            decline_url: fields.string("declineUrl")?.to_string(),
            home_url: fields.string("homeUrl")?.to_string(),
            description: fields.string("description")?.to_string(),
        };
        request.validate()?;
        Ok(request)
    }
}

/// Payout request: sends money from the merchant to a mobile wallet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRequest {
    pub amount: f64,
    pub currency: Currency,
    pub reference: String,
    pub callback_url: String,
    /// Beneficiary phone number, e.g. `243123456789`.
    pub phone: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl PayoutRequest {
    /// Creates a payout request with the default transaction category.
    #[must_use]
    pub fn new(
        amount: f64,
        currency: Currency,
        reference: impl Into<String>,
        callback_url: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            currency,
            reference: reference.into(),
            callback_url: callback_url.into(),
            phone: phone.into(),
            kind: TransactionType::default(),
        }
    }
}

impl Validate for PayoutRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_amount(self.amount)?;
        validate_reference(&self.reference)?;
        validate_url("callbackUrl", &self.callback_url)?;
        validate_phone(&self.phone)
    }
}

impl Decode for PayoutRequest {
    fn decode(value: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(value)?;
        let request = Self {
            amount: fields.number("amount")?,
            currency: fields.currency("currency")?,
            reference: fields.string("reference")?.to_string(),
            callback_url: fields.string("callbackUrl")?.to_string(),
            phone: fields.string("phone")?.to_string(),
            kind: decode_kind(&fields)?,
        };
        request.validate()?;
        Ok(request)
    }
}

fn validate_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::constraint("amount", AMOUNT_MESSAGE))
    }
}

fn validate_reference(reference: &str) -> Result<(), ValidationError> {
    if reference.is_empty() {
        return Err(ValidationError::constraint("reference", REFERENCE_MESSAGE));
    }
    Ok(())
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.chars().count() != PHONE_LENGTH {
        return Err(ValidationError::constraint("phone", PHONE_MESSAGE));
    }
    Ok(())
}

fn validate_url(field: &str, url: &str) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::constraint(field, "must not be empty"));
    }
    Ok(())
}

fn validate_optional_url(field: &str, url: Option<&str>) -> Result<(), ValidationError> {
    url.map_or(Ok(()), |url| validate_url(field, url))
}

fn decode_kind(fields: &Fields<'_>) -> Result<TransactionType, ValidationError> {
    let Some(value) = fields.get("type") else {
        return Ok(TransactionType::default());
    };
    value
        .as_u64()
        .and_then(TransactionType::from_code)
        .ok_or_else(|| ValidationError::constraint("type", "expected 1 (mobile) or 2 (card)"))
}

/// Request kind inferred from the fields of an untyped payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestShape {
    /// Has a `phone` string: mobile money collection.
    Mobile,
    /// Has a `homeUrl` string: card payment.
    Card,
}

impl RequestShape {
    /// Detects the request kind. `phone` wins when both markers are present.
    #[must_use]
    pub fn detect(value: &Value) -> Option<Self> {
        let is_string = |name: &str| value.get(name).is_some_and(Value::is_string);

        if is_string("phone") {
            Some(Self::Mobile)
        } else if is_string("homeUrl") {
            Some(Self::Card)
        } else {
            None
        }
    }
}
