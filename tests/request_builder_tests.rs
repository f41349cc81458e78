//! Request builder tests against the CrofAI parameter table

use crofai_adapter::canonical::{ChatCompletionParams, Message};
use crofai_adapter::providers::crofai::{CHAT_COMPLETE_PARAMS, DEFAULT_MODEL};
use crofai_adapter::{build_request_body, AdapterError, ParameterSpec, ParameterTable};
use serde_json::{json, Value};

fn params_from(value: Value) -> ChatCompletionParams {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_developer_role_becomes_system() {
    let params = params_from(json!({
        "model": "deepseek-r1-0528",
        "messages": [
            {"role": "developer", "content": "Answer tersely."},
            {"role": "user", "content": "Hello"},
            {"role": "assistant", "content": "Hi", "name": "bot"},
            {"role": "developer", "content": [{"type": "text", "text": "again"}]}
        ]
    }));

    let body = build_request_body(&CHAT_COMPLETE_PARAMS, &params).unwrap();

    assert_eq!(
        body["messages"],
        json!([
            {"role": "system", "content": "Answer tersely."},
            {"role": "user", "content": "Hello"},
            {"role": "assistant", "content": "Hi", "name": "bot"},
            {"role": "system", "content": [{"type": "text", "text": "again"}]}
        ])
    );
}

#[test]
fn test_message_without_content_forwarded_as_is() {
    let messages = json!([
        {"role": "user", "content": "What is the weather?"},
        {"role": "assistant", "tool_calls": [{"id": "call_1", "type": "function", "function": {"name": "weather", "arguments": "{}"}}]},
        {"role": "tool", "tool_call_id": "call_1", "content": "sunny"}
    ]);
    let params = params_from(json!({"model": "deepseek-r1-0528", "messages": messages}));

    let body = build_request_body(&CHAT_COMPLETE_PARAMS, &params).unwrap();

    assert_eq!(body["messages"], messages);
    assert!(body["messages"][1].get("content").is_none());
}

#[test]
fn test_n_clamped_to_one() {
    for n in [0u32, 1, 2, 10] {
        let params = ChatCompletionParams {
            n: Some(n),
            ..Default::default()
        };
        let body = build_request_body(&CHAT_COMPLETE_PARAMS, &params).unwrap();
        assert_eq!(body["n"], json!(1), "n = {}", n);
    }
}

#[test]
fn test_numeric_bounds() {
    let params = ChatCompletionParams {
        temperature: Some(3.5),
        top_p: Some(-0.5),
        frequency_penalty: Some(-4.0),
        presence_penalty: Some(1.5),
        max_tokens: Some(0),
        ..Default::default()
    };

    let body = build_request_body(&CHAT_COMPLETE_PARAMS, &params).unwrap();

    assert_eq!(body["temperature"].as_f64(), Some(2.0));
    assert_eq!(body["top_p"].as_f64(), Some(0.0));
    assert_eq!(body["frequency_penalty"].as_f64(), Some(-2.0));
    assert_eq!(body["presence_penalty"].as_f64(), Some(1.5));
    assert_eq!(body["max_tokens"], json!(1));
}

#[test]
fn test_max_completion_tokens_aliases_max_tokens() {
    let params = ChatCompletionParams {
        max_completion_tokens: Some(256),
        ..Default::default()
    };
    let body = build_request_body(&CHAT_COMPLETE_PARAMS, &params).unwrap();
    assert_eq!(body["max_tokens"], json!(256));
    assert!(!body.contains_key("max_completion_tokens"));

    let both = ChatCompletionParams {
        max_tokens: Some(64),
        max_completion_tokens: Some(512),
        ..Default::default()
    };
    let body = build_request_body(&CHAT_COMPLETE_PARAMS, &both).unwrap();
    assert_eq!(body["max_tokens"], json!(512));
}

#[test]
fn test_required_defaults_filled() {
    let body = build_request_body(&CHAT_COMPLETE_PARAMS, &ChatCompletionParams::default()).unwrap();

    assert_eq!(body["model"], DEFAULT_MODEL);
    assert_eq!(body["messages"], json!([]));
    // optional defaults are left to the provider
    assert!(!body.contains_key("temperature"));
    assert!(!body.contains_key("stop"));
}

#[test]
fn test_unknown_params_dropped() {
    let params = params_from(json!({
        "model": "m",
        "messages": [{"role": "user", "content": "hi"}],
        "logit_bias": {"1": 2},
        "stop": ["\n"],
        "stream": true
    }));

    let body = build_request_body(&CHAT_COMPLETE_PARAMS, &params).unwrap();

    assert!(!body.contains_key("logit_bias"));
    assert_eq!(body["stop"], json!(["\n"]));
    assert_eq!(body["stream"], json!(true));
}

#[test]
fn test_custom_table_missing_required() {
    let table = ParameterTable::new(vec![(
        "messages",
        ParameterSpec::new("messages").required(),
    )]);

    let err = build_request_body(&table, &ChatCompletionParams::default()).unwrap_err();
    assert!(matches!(err, AdapterError::Validation(msg) if msg.contains("messages")));

    let params = ChatCompletionParams {
        messages: Some(vec![Message::text("user", "hi")]),
        ..Default::default()
    };
    assert!(build_request_body(&table, &params).is_ok());
}
