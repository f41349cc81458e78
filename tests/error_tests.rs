//! Error handling module tests

use crofai_adapter::utils::error::*;

#[test]
fn test_error_types() {
    let cases = vec![
        (AdapterError::Validation("x".to_string()), "invalid_request_error"),
        (AdapterError::StreamChunk("x".to_string()), "stream_error"),
        (AdapterError::ExternalApi("x".to_string()), "api_error"),
        (AdapterError::Timeout, "timeout_error"),
        (AdapterError::Internal("x".to_string()), "internal_error"),
        (AdapterError::Config(anyhow::anyhow!("x")), "internal_error"),
    ];

    for (error, expected) in cases {
        assert_eq!(error.error_type(), expected);
    }
}

#[test]
fn test_error_display() {
    assert_eq!(
        AdapterError::StreamChunk("eof".to_string()).to_string(),
        "Malformed stream chunk: eof"
    );
    assert_eq!(AdapterError::Timeout.to_string(), "Request timeout");
}

#[test]
fn test_serde_error_conversion() {
    let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
    let err: AdapterError = parse.unwrap_err().into();
    assert!(matches!(err, AdapterError::Serialization(_)));
    assert!(!err.is_client_error());
}

#[test]
fn test_error_response_shape() {
    let response = AdapterError::ExternalApi("502 - bad gateway".to_string()).to_error_response("crofai");
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["provider"], "crofai");
    assert_eq!(value["error"]["type"], "api_error");
    assert_eq!(value["error"]["message"], "External API error: 502 - bad gateway");
    assert!(value["error"]["param"].is_null());
}

#[test]
fn test_validation_context() {
    let result: Result<u32, std::num::ParseIntError> = "abc".parse::<u32>();
    match result.validation_context("Invalid n") {
        Err(AdapterError::Validation(msg)) => assert!(msg.starts_with("Invalid n: ")),
        other => panic!("Expected validation error, got {:?}", other),
    }
}
