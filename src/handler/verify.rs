//! Verification endpoint module
//!
//! `POST /verify` evaluates the demo validity rule over two request fields.
//! The rule is a stand-in: a submission is "valid" when both fields are
//! non-empty, and validity only selects a fixed download link.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response};
use serde::{Deserialize, Serialize};

use crate::http;
use crate::logger;

/// Download link returned for a valid submission
const DOWNLOAD_URL: &str = "/sample.pdf";

/// Fields accepted by the verification endpoint, all optional
#[derive(Debug, Default, Deserialize)]
pub struct VerifyRequest {
    serial_number: Option<String>,
    national_id: Option<String>,
}

/// Verification result returned to the client
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct VerifyResponse {
    valid: bool,
    download_url: String,
}

/// Handle `POST /verify`
pub async fn handle_verify(req: Request<hyper::body::Incoming>) -> Response<Full<Bytes>> {
    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_warning(&format!("Failed to read verification body: {e}"));
            Bytes::new()
        }
    };

    let result = evaluate(&parse_request(&body));

    match serde_json::to_string(&result) {
        Ok(json) => http::build_json_response(json),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize verification result: {e}"));
            http::build_empty_response(500)
        }
    }
}

/// Parse the request body, degrading any failure to the empty request
///
/// Malformed JSON, a non-object document, and wrongly-typed fields all
/// count as "nothing submitted" rather than an error.
fn parse_request(body: &[u8]) -> VerifyRequest {
    serde_json::from_slice(body).unwrap_or_default()
}

/// The demo rule: a submission is valid iff both fields are non-empty
fn evaluate(request: &VerifyRequest) -> VerifyResponse {
    let valid =
        is_present(request.serial_number.as_deref()) && is_present(request.national_id.as_deref());

    VerifyResponse {
        valid,
        download_url: if valid {
            DOWNLOAD_URL.to_string()
        } else {
            String::new()
        },
    }
}

fn is_present(field: Option<&str>) -> bool {
    field.is_some_and(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate_body(body: &[u8]) -> VerifyResponse {
        evaluate(&parse_request(body))
    }

    #[test]
    fn test_both_fields_present() {
        let result = evaluate_body(br#"{"serial_number":"SN-1","national_id":"1234567890"}"#);
        assert_eq!(
            result,
            VerifyResponse {
                valid: true,
                download_url: DOWNLOAD_URL.to_string()
            }
        );
    }

    #[test]
    fn test_missing_field() {
        let result = evaluate_body(br#"{"serial_number":"SN-1"}"#);
        assert!(!result.valid);
        assert!(result.download_url.is_empty());
    }

    #[test]
    fn test_empty_field() {
        let result = evaluate_body(br#"{"serial_number":"SN-1","national_id":""}"#);
        assert!(!result.valid);
        assert!(result.download_url.is_empty());
    }

    #[test]
    fn test_null_field() {
        let result = evaluate_body(br#"{"serial_number":null,"national_id":"1234567890"}"#);
        assert!(!result.valid);
    }

    #[test]
    fn test_malformed_body() {
        assert!(!evaluate_body(b"not-json").valid);
        assert!(!evaluate_body(b"").valid);
        assert!(!evaluate_body(b"[1,2,3]").valid);
    }

    #[test]
    fn test_wrongly_typed_field() {
        // A non-string field fails lenient parsing and counts as absent
        let result = evaluate_body(br#"{"serial_number":42,"national_id":"1234567890"}"#);
        assert!(!result.valid);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let result =
            evaluate_body(br#"{"serial_number":"SN-1","national_id":"9","extra":true}"#);
        assert!(result.valid);
    }

    #[test]
    fn test_response_wire_shape() {
        let valid = serde_json::to_string(&evaluate_body(
            br#"{"serial_number":"SN-1","national_id":"1234567890"}"#,
        ))
        .expect("serialization should succeed");
        assert_eq!(valid, r#"{"valid":true,"download_url":"/sample.pdf"}"#);

        let invalid = serde_json::to_string(&evaluate_body(b"{}"))
            .expect("serialization should succeed");
        assert_eq!(invalid, r#"{"valid":false,"download_url":""}"#);
    }
}
