//! Gateway payloads and test doubles shared by unit tests.
//!
//! Payloads were captured from the beta environment, identifiers kept as
//! returned.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Value, json};

use crate::time::Sleeper;
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Mock HTTP client that plays back a scripted sequence of responses.
///
/// Once the script runs out, every further call fails with a timeout.
#[derive(Debug, Default)]
pub struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            ..Self::default()
        }
    }

    /// A client answering every call with the same JSON body and status.
    pub fn always(status: u16, body: &Value, times: usize) -> Self {
        let status = http::StatusCode::from_u16(status).unwrap();
        Self::new((0..times).map(|_| Ok(HttpResponse::json(status, body))).collect())
    }

    pub fn ok(body: &Value) -> Self {
        Self::always(200, body, 1)
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.captured_requests().pop().unwrap()
    }

    /// The JSON body of the last request sent.
    pub fn last_body(&self) -> Value {
        serde_json::from_slice(self.last_request().body.as_deref().unwrap()).unwrap()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(HttpError::Timeout)
        } else {
            responses.remove(0)
        }
    }
}

/// A sleeper that records requested durations without waiting.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    durations: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn durations(&self) -> Vec<Duration> {
        self.durations.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.durations.lock().unwrap().push(duration);
    }
}

/// An HTTP response with the given status and JSON body.
pub fn json_response(status: u16, body: &Value) -> HttpResponse {
    HttpResponse::json(http::StatusCode::from_u16(status).unwrap(), body)
}

pub fn mobile_success() -> Value {
    json!({
        "code": "0",
        "message": "Transaction envoyée avec succès",
        "orderNumber": "DtX9SmCYojWW243123456789"
    })
}

pub fn mobile_error() -> Value {
    json!({
        "code": "1",
        "message": "Le numéro de téléphone est invalide",
        "orderNumber": null
    })
}

pub fn card_success() -> Value {
    json!({
        "code": "0",
        "message": "Redirection en cours",
        "orderNumber": "O42iABI27568020268434827",
        "url": "https://gwvisa.flexpay.cd/checkout/bbba6b699af8a70e9cfa010d6d12dba5_670d206b7defb"
    })
}

pub fn card_error() -> Value {
    json!({
        "code": "1",
        "message": "Erreur lors de la création de la transaction",
        "orderNumber": null,
        "url": null
    })
}

pub fn payout_success() -> Value {
    json!({
        "code": "0",
        "message": "Transaction envoyée avec succès.",
        "orderNumber": "SQeCGunXEGnr243815877848"
    })
}

pub fn check_success() -> Value {
    json!({
        "code": "0",
        "message": "Transaction trouvée",
        "transaction": {
            "reference": "test",
            "orderNumber": "UBGC8s9L3VBm243815877848",
            "status": "1",
            "amount": "10.00",
            "amountCustomer": "10.30",
            "currency": "USD",
            "createdAt": "2024-10-14T16:47:23.000000Z",
            "channel": "mpesa"
        }
    })
}

pub fn check_error() -> Value {
    json!({
        "code": "1",
        "message": "Transaction non trouvée",
        "transaction": null
    })
}

pub fn callback_success() -> Value {
    json!({
        "code": "0",
        "reference": "ZDN000003",
        "provider_reference": "MP241014.1647.A12345",
        "orderNumber": "UBGC8s9L3VBm243815877848",
        "createdAt": "14-10-2024 16:47:23"
    })
}
