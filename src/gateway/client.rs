//! Gateway client: one method per payment operation.

use http::Method;
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::config::ClientConfig;
use crate::environment::{Endpoints, Environment};
use crate::error::{Error, Result};
use crate::schema::{
    CardRequest, CardResponse, CheckResponse, Credential, Decode, MobileRequest, MobileResponse,
    Outcome, PayoutRequest, PayoutResponse, RequestShape, Status, Validate,
};
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{
    ApiError, HttpClient, ReqwestClient, RequestExecutor, RetryPolicy, build_request,
};

/// Response of [`Client::pay`], tagged by the path the request took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PayResponse {
    /// The payload was routed to [`Client::mobile`].
    Mobile(MobileResponse),
    /// The payload was routed to [`Client::card`].
    Card(CardResponse),
}

impl Outcome for PayResponse {
    fn code(&self) -> Status {
        match self {
            Self::Mobile(response) => response.code,
            Self::Card(response) => response.code,
        }
    }
}

/// Client for the payment gateway.
///
/// Every operation validates its input before touching the network,
/// sends the request through a [`RequestExecutor`] (which retries
/// transient failures), and normalizes the response.
///
/// The client holds no mutable state: concurrent calls on a shared
/// reference each own their retry loop.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation (defaults to [`ReqwestClient`])
/// - `S`: The sleeper used for retry delays (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use flexpay::{Client, Currency, Environment, MobileRequest};
///
/// # async fn example() -> Result<(), flexpay::Error> {
/// let client = Client::new("ZANDO", "token")?.with_environment(Environment::Production);
///
/// let request = MobileRequest::new(
///     10.0,
///     Currency::Usd,
///     "ORDER-42",
///     "https://shop.example/callback",
///     "243123456789",
/// );
/// let response = client.mobile(&request).await?;
/// if client.is_successful(&response) {
///     println!("order {:?}", response.order_number);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client<H = ReqwestClient, S = TokioSleeper> {
    credential: Credential,
    endpoints: Endpoints,
    executor: RequestExecutor<H, S>,
}

impl Client {
    /// Creates a client for the development environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `merchant` or `token` is empty.
    pub fn new(merchant: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let credential = Credential::new(merchant, token)?;
        Ok(Self::with_credential(credential, ReqwestClient::new()))
    }

    /// Creates a client from loaded configuration.
    ///
    /// The configured timeout bounds every request made by the underlying
    /// [`ReqwestClient`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let http = ReqwestClient::with_timeout(config.timeout).map_err(ApiError::from)?;

        Ok(Self::with_credential(config.credential.clone(), http)
            .with_endpoints(config.endpoints.clone())
            .with_retry_policy(config.retry_policy.clone()))
    }
}

impl<H> Client<H, TokioSleeper> {
    /// Creates a development client over a custom HTTP client.
    #[must_use]
    pub fn with_credential(credential: Credential, http: H) -> Self {
        Self {
            credential,
            endpoints: Endpoints::for_environment(Environment::default()),
            executor: RequestExecutor::new(http),
        }
    }
}

impl<H, S> Client<H, S> {
    /// Switches to the fixed endpoints of `environment`.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.endpoints = Endpoints::for_environment(environment);
        self
    }

    /// Uses custom endpoints.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.executor = self.executor.with_retry_policy(policy);
        self
    }

    /// Sets the sleeper used between retries.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Client<H, S2> {
        Client {
            credential: self.credential,
            endpoints: self.endpoints,
            executor: self.executor.with_sleeper(sleeper),
        }
    }

    /// Replaces the HTTP client.
    #[must_use]
    pub fn with_http_client<H2>(self, http: H2) -> Client<H2, S> {
        Client {
            credential: self.credential,
            endpoints: self.endpoints,
            executor: self.executor.with_http_client(http),
        }
    }

    /// Returns the credential.
    #[must_use]
    pub const fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Returns the endpoints requests are sent to.
    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        self.executor.retry_policy()
    }

    /// Decodes a webhook callback payload.
    ///
    /// Applies the same normalization as [`Client::mobile`]; no request
    /// is sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the payload lacks a valid `code`.
    #[allow(clippy::unused_self)]
    pub fn handle_callback(&self, data: &Value) -> Result<MobileResponse> {
        Ok(MobileResponse::decode(data)?)
    }

    /// Returns true if `response` reports success.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn is_successful(&self, response: &impl Outcome) -> bool {
        response.is_successful()
    }
}

impl<H: HttpClient, S: Sleeper> Client<H, S> {
    /// Starts a mobile money collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an invalid request (nothing is
    /// sent) or an unexpected response, and [`Error::Api`] when the
    /// gateway call fails.
    pub async fn mobile(&self, request: &MobileRequest) -> Result<MobileResponse> {
        request.validate()?;
        let body = self.body(request, false)?;
        let url = resolve(self.endpoints.api_base(), self.endpoints.mobile_payment_url())?;

        let payload = self.send(Method::POST, url, Some(&body)).await?;
        Ok(MobileResponse::decode(&payload)?)
    }

    /// Starts a card payment.
    ///
    /// The response carries the checkout `url` the customer is sent to.
    ///
    /// # Errors
    ///
    /// See [`Client::mobile`].
    pub async fn card(&self, request: &CardRequest) -> Result<CardResponse> {
        request.validate()?;
        let body = self.body(request, true)?;
        let url = resolve(self.endpoints.card_payment(), self.endpoints.card_payment_url())?;

        let payload = self.send(Method::POST, url, Some(&body)).await?;
        Ok(CardResponse::decode(&payload)?)
    }

    /// Sends money from the merchant account to a phone number.
    ///
    /// # Errors
    ///
    /// See [`Client::mobile`].
    pub async fn payout(&self, request: &PayoutRequest) -> Result<PayoutResponse> {
        request.validate()?;
        let body = self.body(request, false)?;
        let url = resolve(self.endpoints.api_base(), self.endpoints.payout_url())?;

        let payload = self.send(Method::POST, url, Some(&body)).await?;
        Ok(PayoutResponse::decode(&payload)?)
    }

    /// Looks up a transaction by the order number the gateway assigned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the gateway call fails and
    /// [`Error::Validation`] for an unexpected response.
    pub async fn check(&self, order_number: &str) -> Result<CheckResponse> {
        let url = resolve(
            self.endpoints.api_base(),
            self.endpoints.check_status_url(order_number),
        )?;

        let payload = self.send(Method::GET, url, None).await?;
        Ok(CheckResponse::decode(&payload)?)
    }

    /// Routes an untyped payment payload by its shape.
    ///
    /// A string `phone` field selects [`Client::mobile`]; otherwise a
    /// string `homeUrl` field selects [`Client::card`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedRequestShape`] if neither field is
    /// present, plus the errors of the selected operation.
    pub async fn pay(&self, request: &Value) -> Result<PayResponse> {
        match RequestShape::detect(request) {
            Some(RequestShape::Mobile) => {
                let request = MobileRequest::decode(request)?;
                self.mobile(&request).await.map(PayResponse::Mobile)
            }
            Some(RequestShape::Card) => {
                let request = CardRequest::decode(request)?;
                self.card(&request).await.map(PayResponse::Card)
            }
            None => Err(Error::UnsupportedRequestShape),
        }
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Value> {
        let request = build_request(method, url, self.credential.authorization(), body);
        Ok(self.executor.execute(&request).await?)
    }

    /// Serializes a validated request and attaches the merchant code.
    ///
    /// Card payments also carry the bearer token in the body.
    fn body(&self, request: &impl Serialize, with_authorization: bool) -> Result<Value> {
        let mut body = match serde_json::to_value(request)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        body.insert(
            "merchant".to_string(),
            Value::String(self.credential.merchant().to_string()),
        );
        if with_authorization {
            body.insert(
                "authorization".to_string(),
                Value::String(self.credential.bearer()),
            );
        }

        Ok(Value::Object(body))
    }
}

fn resolve(base: &str, url: std::result::Result<Url, url::ParseError>) -> Result<Url> {
    url.map_err(|source| Error::InvalidEndpoint {
        url: base.to_string(),
        source,
    })
}
