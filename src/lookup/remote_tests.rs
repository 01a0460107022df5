//! Tests for `HttpLookup`.

use std::sync::Arc;

use url::Url;

use super::{AddressLookup, FetchError, HttpLookup, PublicAddress};
use crate::transport::HttpError;
use crate::transport::mock::ScriptedClient;

const PRIMARY: &str = "https://api.ipify.org/";
const BACKUP: &str = "https://ifconfig.me/ip";

fn endpoints() -> Vec<Url> {
    vec![Url::parse(PRIMARY).unwrap(), Url::parse(BACKUP).unwrap()]
}

fn addr(s: &str) -> PublicAddress {
    s.parse().unwrap()
}

mod success {
    use super::*;

    #[tokio::test]
    async fn plain_text_body_is_trimmed() {
        let client = ScriptedClient::new().respond_text(PRIMARY, "203.0.113.7\n");
        let lookup = HttpLookup::new(client, endpoints());

        assert_eq!(lookup.lookup().await.unwrap(), addr("203.0.113.7"));
    }

    #[tokio::test]
    async fn json_body_with_ip_key() {
        let client = ScriptedClient::new().respond_text(PRIMARY, r#"{"ip":"2001:db8::42"}"#);
        let lookup = HttpLookup::new(client, endpoints());

        assert_eq!(lookup.lookup().await.unwrap(), addr("2001:db8::42"));
    }

    #[tokio::test]
    async fn json_body_with_origin_key() {
        let client =
            ScriptedClient::new().respond_text(PRIMARY, r#"{ "origin": "198.51.100.3" }"#);
        let lookup = HttpLookup::new(client, endpoints());

        assert_eq!(lookup.lookup().await.unwrap(), addr("198.51.100.3"));
    }

    #[tokio::test]
    async fn first_success_skips_backup() {
        let client = Arc::new(ScriptedClient::new().respond_text(PRIMARY, "203.0.113.7"));
        let lookup = HttpLookup::new(client.clone(), endpoints());

        lookup.lookup().await.unwrap();

        assert_eq!(client.calls_to(PRIMARY), 1);
        assert_eq!(client.calls_to(BACKUP), 0);
    }
}

mod failover {
    use super::*;

    #[tokio::test]
    async fn falls_back_on_transport_error() {
        let client = Arc::new(
            ScriptedClient::new()
                .respond(PRIMARY, Err(HttpError::Timeout))
                .respond_text(BACKUP, "198.51.100.9"),
        );
        let lookup = HttpLookup::new(client.clone(), endpoints());

        assert_eq!(lookup.lookup().await.unwrap(), addr("198.51.100.9"));
        assert_eq!(client.calls_to(BACKUP), 1);
    }

    #[tokio::test]
    async fn falls_back_on_server_error() {
        let client = ScriptedClient::new()
            .respond_status(PRIMARY, http::StatusCode::SERVICE_UNAVAILABLE)
            .respond_text(BACKUP, "198.51.100.9");
        let lookup = HttpLookup::new(client, endpoints());

        assert_eq!(lookup.lookup().await.unwrap(), addr("198.51.100.9"));
    }

    #[tokio::test]
    async fn falls_back_on_garbage_body() {
        let client = ScriptedClient::new()
            .respond_text(PRIMARY, "<html>blocked</html>")
            .respond_text(BACKUP, "198.51.100.9");
        let lookup = HttpLookup::new(client, endpoints());

        assert_eq!(lookup.lookup().await.unwrap(), addr("198.51.100.9"));
    }
}

mod failure {
    use super::*;

    #[tokio::test]
    async fn all_endpoints_failing_is_exhausted() {
        let client = ScriptedClient::new()
            .respond(PRIMARY, Err(HttpError::Timeout))
            .respond_status(BACKUP, http::StatusCode::TOO_MANY_REQUESTS);
        let lookup = HttpLookup::new(client, endpoints());

        match lookup.lookup().await {
            Err(FetchError::Exhausted { attempts, last }) => {
                assert_eq!(attempts, 2);
                assert!(matches!(
                    *last,
                    FetchError::Status {
                        status: http::StatusCode::TOO_MANY_REQUESTS,
                        ..
                    }
                ));
            }
            other => panic!("Expected Exhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_body_is_invalid() {
        let client = ScriptedClient::new().respond_text(PRIMARY, "");
        let lookup = HttpLookup::new(client, vec![Url::parse(PRIMARY).unwrap()]);

        let err = lookup.lookup().await.unwrap_err();
        let FetchError::Exhausted { last, .. } = err else {
            panic!("Expected Exhausted, got {err:?}");
        };
        assert!(matches!(*last, FetchError::InvalidBody { .. }));
    }

    #[tokio::test]
    async fn invalid_body_preview_is_truncated() {
        let long_body = "x".repeat(500);
        let client = ScriptedClient::new().respond_text(PRIMARY, &long_body);
        let lookup = HttpLookup::new(client, vec![Url::parse(PRIMARY).unwrap()]);

        let FetchError::Exhausted { last, .. } = lookup.lookup().await.unwrap_err() else {
            panic!("Expected Exhausted");
        };
        let FetchError::InvalidBody { body, .. } = *last else {
            panic!("Expected InvalidBody");
        };
        assert_eq!(body.len(), 64);
    }

    #[tokio::test]
    async fn no_endpoints_is_an_error() {
        let lookup = HttpLookup::new(ScriptedClient::new(), vec![]);

        assert!(matches!(
            lookup.lookup().await,
            Err(FetchError::NoEndpoints)
        ));
    }

    #[test]
    fn exhausted_error_mentions_last_failure() {
        let err = FetchError::Exhausted {
            attempts: 2,
            last: Box::new(FetchError::Status {
                endpoint: Url::parse(BACKUP).unwrap(),
                status: http::StatusCode::BAD_GATEWAY,
            }),
        };

        let message = err.to_string();
        assert!(message.contains("All 2 lookup endpoint(s) failed"));
        assert!(message.contains("502"));
    }
}
