//! Tests for the gateway `Client`.

use super::{Client, PayResponse};
use crate::environment::{Endpoints, Environment};
use crate::error::Error;
use crate::schema::{
    CardRequest, Credential, Currency, MobileRequest, PayoutRequest, Status, TransactionType,
};
use crate::test_fixtures::{self, MockClient};
use crate::time::InstantSleeper;
use crate::transport::{ApiErrorKind, HttpResponse, RetryPolicy};
use serde_json::{Value, json};
use std::sync::Arc;

fn client(mock: &Arc<MockClient>) -> Client<Arc<MockClient>, InstantSleeper> {
    let credential = Credential::new("ZANDO", "test-token").unwrap();
    Client::with_credential(credential, Arc::clone(mock)).with_sleeper(InstantSleeper)
}

fn mobile_request() -> MobileRequest {
    MobileRequest::new(
        10.0,
        Currency::Usd,
        "ORDER-42",
        "https://shop.example/callback",
        "243123456789",
    )
}

fn card_request() -> CardRequest {
    CardRequest {
        amount: 25.5,
        currency: Currency::Cdf,
        reference: "CARD-42".to_string(),
        callback_url: "https://shop.example/callback".to_string(),
        approve_url: "https://shop.example/approve".to_string(),
        cancel_url: "https://shop.example/cancel".to_string(),
        decline_url: "https://shop.example/decline".to_string(),
        home_url: "https://shop.example".to_string(),
        description: "Order 42".to_string(),
    }
}

fn card_payload() -> Value {
    json!({
        "amount": 25.5,
        "currency": "CDF",
        "reference": "CARD-42",
        "callbackUrl": "https://shop.example/callback",
        "approveUrl": "https://shop.example/approve",
        "cancelUrl": "https://shop.example/cancel",
        "declineUrl": "https://shop.example/decline",
        "homeUrl": "https://shop.example",
        "description": "Order 42"
    })
}

mod construction {
    use super::*;

    #[test]
    fn new_defaults_to_development() {
        let client = Client::new("ZANDO", "test-token").unwrap();

        assert_eq!(client.endpoints(), &Endpoints::for_environment(Environment::Development));
        assert_eq!(client.credential().merchant(), "ZANDO");
        assert_eq!(client.retry_policy(), &RetryPolicy::default());
    }

    #[test]
    fn empty_credentials_are_rejected() {
        assert!(matches!(Client::new("", "token"), Err(Error::Validation(_))));
        assert!(matches!(Client::new("ZANDO", ""), Err(Error::Validation(_))));
    }

    #[test]
    fn debug_output_hides_token() {
        let client = Client::new("ZANDO", "super-secret").unwrap();

        assert!(!format!("{client:?}").contains("super-secret"));
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Client>();
    }
}

mod mobile {
    use super::*;

    #[tokio::test]
    async fn posts_validated_request_with_merchant() {
        let mock = Arc::new(MockClient::ok(&test_fixtures::mobile_success()));

        let response = client(&mock).mobile(&mobile_request()).await.unwrap();

        assert_eq!(response.code, Status::Success);
        assert_eq!(response.order_number.as_deref(), Some("DtX9SmCYojWW243123456789"));

        let request = mock.last_request();
        assert_eq!(request.method, http::Method::POST);
        assert_eq!(
            request.url.as_str(),
            "https://beta-backend.flexpay.cd/api/rest/v1/paymentService"
        );
        assert_eq!(request.headers[http::header::AUTHORIZATION], "Bearer test-token");
        assert_eq!(
            mock.last_body(),
            json!({
                "amount": 10.0,
                "currency": "USD",
                "reference": "ORDER-42",
                "callbackUrl": "https://shop.example/callback",
                "phone": "243123456789",
                "type": 1,
                "merchant": "ZANDO"
            })
        );
    }

    #[tokio::test]
    async fn optional_fields_are_sent_when_set() {
        let mock = Arc::new(MockClient::ok(&test_fixtures::mobile_success()));
        let request = mobile_request()
            .with_description("Two shirts")
            .with_kind(TransactionType::Card);

        client(&mock).mobile(&request).await.unwrap();

        let body = mock.last_body();
        assert_eq!(body["description"], "Two shirts");
        assert_eq!(body["type"], 2);
        assert!(body.get("approveUrl").is_none());
        assert!(body.get("authorization").is_none());
    }

    #[tokio::test]
    async fn invalid_amount_never_reaches_network() {
        let mock = Arc::new(MockClient::ok(&test_fixtures::mobile_success()));
        let mut request = mobile_request();
        request.amount = 0.0;

        let err = client(&mock).mobile(&request).await.unwrap_err();

        assert!(matches!(err, Error::Validation(ref e) if e.field() == "amount"));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn short_phone_never_reaches_network() {
        let mock = Arc::new(MockClient::ok(&test_fixtures::mobile_success()));
        let mut request = mobile_request();
        request.phone = "24312345678".to_string();

        let err = client(&mock).mobile(&request).await.unwrap_err();

        assert!(matches!(err, Error::Validation(ref e) if e.field() == "phone"));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn gateway_failure_code_is_not_an_error() {
        let mock = Arc::new(MockClient::ok(&test_fixtures::mobile_error()));
        let client = client(&mock);

        let response = client.mobile(&mobile_request()).await.unwrap();

        assert_eq!(response.code, Status::Failure);
        assert!(!client.is_successful(&response));
    }
}

mod card {
    use super::*;

    #[tokio::test]
    async fn posts_to_card_endpoint_with_token_in_body() {
        let mock = Arc::new(MockClient::ok(&test_fixtures::card_success()));

        let response = client(&mock).card(&card_request()).await.unwrap();

        assert_eq!(response.code, Status::Success);
        assert!(response.url.as_deref().unwrap().starts_with("https://gwvisa.flexpay.cd/"));

        let request = mock.last_request();
        assert_eq!(request.url.as_str(), "https://beta-cardpayment.flexpay.cd/v1.1/pay");
        let body = mock.last_body();
        assert_eq!(body["authorization"], "Bearer test-token");
        assert_eq!(body["merchant"], "ZANDO");
        assert_eq!(body["homeUrl"], "https://shop.example");
        assert!(body.get("type").is_none());
    }

    #[tokio::test]
    async fn long_reference_never_reaches_network() {
        let mock = Arc::new(MockClient::ok(&test_fixtures::card_success()));
        let mut request = card_request();
        request.reference = "R".repeat(26);

        let err = client(&mock).card(&request).await.unwrap_err();

        assert!(matches!(err, Error::Validation(ref e) if e.field() == "reference"));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn missing_description_never_reaches_network() {
        let mock = Arc::new(MockClient::ok(&test_fixtures::card_success()));
        let mut request = card_request();
        request.description = String::new();

        let err = client(&mock).card(&request).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(mock.calls(), 0);
    }
}

mod payout {
    use super::*;

    #[tokio::test]
    async fn posts_to_payout_endpoint() {
        let mock = Arc::new(MockClient::ok(&test_fixtures::payout_success()));
        let request = PayoutRequest::new(
            5.0,
            Currency::Cdf,
            "PAYOUT-1",
            "https://shop.example/callback",
            "243815877848",
        );

        let response = client(&mock)
            .with_environment(Environment::Production)
            .payout(&request)
            .await
            .unwrap();

        assert_eq!(
            response.order_number.as_deref(),
            Some("SQeCGunXEGnr243815877848")
        );
        assert_eq!(
            mock.last_request().url.as_str(),
            "https://backend.flexpay.cd/api/rest/v1/merchantPayOutService"
        );
        let body = mock.last_body();
        assert_eq!(body["merchant"], "ZANDO");
        assert_eq!(body["type"], 1);
        assert_eq!(body["phone"], "243815877848");
    }

    #[tokio::test]
    async fn invalid_payout_never_reaches_network() {
        let mock = Arc::new(MockClient::ok(&test_fixtures::payout_success()));
        let request = PayoutRequest::new(-1.0, Currency::Usd, "P", "https://cb", "243815877848");

        let err = client(&mock).payout(&request).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(mock.calls(), 0);
    }
}

mod check {
    use super::*;

    #[tokio::test]
    async fn gets_status_without_body() {
        let mock = Arc::new(MockClient::ok(&test_fixtures::check_success()));

        let response = client(&mock).check("UBGC8s9L3VBm243815877848").await.unwrap();

        let transaction = response.transaction.unwrap();
        assert_eq!(transaction.status, Status::Failure);
        assert!((transaction.amount - 10.0).abs() < f64::EPSILON);
        assert_eq!(transaction.channel.as_deref(), Some("mpesa"));

        let request = mock.last_request();
        assert_eq!(request.method, http::Method::GET);
        assert!(request.body.is_none());
        assert_eq!(
            request.url.as_str(),
            "https://beta-backend.flexpay.cd/api/rest/v1/check/UBGC8s9L3VBm243815877848"
        );
    }

    #[tokio::test]
    async fn order_number_is_percent_encoded() {
        let mock = Arc::new(MockClient::ok(&test_fixtures::check_error()));

        client(&mock).check("A/B 1").await.unwrap();

        assert_eq!(
            mock.last_request().url.path(),
            "/api/rest/v1/check/A%2FB%201"
        );
    }

    #[tokio::test]
    async fn unknown_order_decodes_without_transaction() {
        let mock = Arc::new(MockClient::ok(&test_fixtures::check_error()));

        let response = client(&mock).check("not_found").await.unwrap();

        assert_eq!(response.code, Status::Failure);
        assert!(response.transaction.is_none());
    }

    #[tokio::test]
    async fn invalid_endpoint_is_reported_without_network() {
        let mock = Arc::new(MockClient::ok(&test_fixtures::check_error()));
        let client = client(&mock).with_endpoints(Endpoints::custom("not a url", "also not"));

        let err = client.check("ORDER").await.unwrap_err();

        assert!(matches!(err, Error::InvalidEndpoint { ref url, .. } if url == "not a url"));
        assert_eq!(mock.calls(), 0);
    }
}

mod pay {
    use super::*;

    #[tokio::test]
    async fn phone_routes_to_mobile() {
        let mock = Arc::new(MockClient::ok(&test_fixtures::mobile_success()));
        let payload = json!({
            "amount": 10,
            "currency": "USD",
            "reference": "ORDER-42",
            "callbackUrl": "https://shop.example/callback",
            "phone": "243123456789"
        });

        let response = client(&mock).pay(&payload).await.unwrap();

        assert!(matches!(response, PayResponse::Mobile(_)));
        assert!(mock.last_request().url.path().ends_with("/paymentService"));
    }

    #[tokio::test]
    async fn home_url_routes_to_card() {
        let mock = Arc::new(MockClient::ok(&test_fixtures::card_success()));
        let client = client(&mock);

        let response = client.pay(&card_payload()).await.unwrap();

        assert!(matches!(response, PayResponse::Card(_)));
        assert!(client.is_successful(&response));
        assert_eq!(mock.last_request().url.host_str(), Some("beta-cardpayment.flexpay.cd"));
    }

    #[tokio::test]
    async fn unknown_shape_is_rejected_without_network() {
        let mock = Arc::new(MockClient::ok(&test_fixtures::mobile_success()));

        let err = client(&mock)
            .pay(&json!({"amount": 10, "currency": "USD"}))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnsupportedRequestShape));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn routed_payload_is_still_validated() {
        let mock = Arc::new(MockClient::ok(&test_fixtures::mobile_success()));
        let payload = json!({
            "amount": 0,
            "currency": "USD",
            "reference": "ORDER-42",
            "callbackUrl": "https://shop.example/callback",
            "phone": "243123456789"
        });

        let err = client(&mock).pay(&payload).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(mock.calls(), 0);
    }
}

mod callback {
    use super::*;

    #[test]
    fn decodes_without_network() {
        let mock = Arc::new(MockClient::new(vec![]));

        let response = client(&mock)
            .handle_callback(&test_fixtures::callback_success())
            .unwrap();

        assert_eq!(response.code, Status::Success);
        assert_eq!(response.reference.as_deref(), Some("ZDN000003"));
        assert_eq!(
            response.provider_reference.as_deref(),
            Some("MP241014.1647.A12345")
        );
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn matches_networked_mobile_normalization() {
        let data = test_fixtures::callback_success();
        let mock = Arc::new(MockClient::ok(&data));
        let client = client(&mock);

        let from_network = client.mobile(&mobile_request()).await.unwrap();
        let from_callback = client.handle_callback(&data).unwrap();

        assert_eq!(from_network, from_callback);
    }

    #[test]
    fn invalid_status_is_a_validation_error() {
        let mock = Arc::new(MockClient::new(vec![]));

        let err = client(&mock).handle_callback(&json!({"code": 2})).unwrap_err();

        assert!(matches!(err, Error::Validation(ref e) if e.field() == "code"));
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn unauthorized_is_account_error_after_one_attempt() {
        let body = json!({"message": "Unauthorized access", "error": "unauthorized"});
        let mock = Arc::new(MockClient::always(401, &body, 10));

        let err = client(&mock).mobile(&mobile_request()).await.unwrap_err();

        assert_eq!(err.api_kind(), Some(ApiErrorKind::Account));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn persistent_server_error_is_retried_then_returned() {
        let body = json!({"message": "Internal server error", "error": "server"});
        let mock = Arc::new(MockClient::always(500, &body, 10));

        let err = client(&mock).check("ORDER").await.unwrap_err();

        assert_eq!(mock.calls(), 4);
        match err {
            Error::Api(error) => {
                assert_eq!(error.kind(), ApiErrorKind::Server);
                assert_eq!(error.message(), "Internal server error");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn retry_policy_is_applied() {
        let mock = Arc::new(MockClient::always(503, &json!({}), 10));
        let client = client(&mock).with_retry_policy(RetryPolicy::no_retry());

        let err = client.check("ORDER").await.unwrap_err();

        assert_eq!(err.api_kind(), Some(ApiErrorKind::Server));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn empty_success_body_fails_response_validation() {
        let response = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), vec![]);
        let mock = Arc::new(MockClient::new(vec![Ok(response)]));

        let err = client(&mock).mobile(&mobile_request()).await.unwrap_err();

        assert!(matches!(err, Error::Validation(ref e) if e.field() == "code"));
        assert_eq!(mock.calls(), 1);
    }
}

mod concurrency {
    use super::*;

    #[tokio::test]
    async fn concurrent_calls_share_one_client() {
        let mock = Arc::new(MockClient::always(200, &test_fixtures::mobile_success(), 2));
        let client = client(&mock);

        let (first, second) = tokio::join!(client.check("A"), client.check("B"));

        assert!(first.is_ok());
        assert!(second.is_ok());
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn http_client_can_be_swapped() {
        let first = Arc::new(MockClient::new(vec![]));
        let second = Arc::new(MockClient::ok(&test_fixtures::payout_success()));
        let client = client(&first).with_http_client(Arc::clone(&second));

        client.check("ORDER").await.unwrap();

        assert_eq!(first.calls(), 0);
        assert_eq!(second.calls(), 1);
    }
}
