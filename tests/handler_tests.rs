//! Integration tests for tool calls through the registry.
//!
//! Tests run every tool against a recording backend double and check both
//! the rendered tool result and the backend calls it produced.

mod common;

use std::time::Duration;

use common::{registry, Call, RecordingBackend, DEFAULT_CACHE};
use mcp_cache_server::backend::{BackendError, BackendReply};
use mcp_cache_server::config::CacheMode;
use mcp_cache_server::handlers;
use mcp_cache_server::protocol::{JsonRpcRequest, McpErrorCode, McpErrorResponse, RpcId};
use serde_json::json;

fn rejection_code(text: &str) -> McpErrorCode {
    let parsed: McpErrorResponse = serde_json::from_str(text).unwrap();
    parsed.error.code
}

// ---------------------------------------------------------------------------
// validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_required_fields_never_reach_backend() {
    let backend = RecordingBackend::replying(Ok(BackendReply::Success));
    let registry = registry(backend.clone(), CacheMode::Multi);

    let calls = [
        ("get", json!({})),
        ("set", json!({ "key": "k" })),
        ("set", json!({ "value": "v" })),
        ("create-cache", json!({})),
        ("delete-cache", json!({})),
    ];

    for (tool, args) in calls {
        let result = registry.call(tool, Some(args.clone())).await;
        assert!(result.is_error, "{tool} {args} should be rejected");
        assert_eq!(rejection_code(result.text_content()), McpErrorCode::InvalidArguments);
    }

    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn wrong_types_and_bad_ttl_never_reach_backend() {
    let backend = RecordingBackend::replying(Ok(BackendReply::Success));
    let registry = registry(backend.clone(), CacheMode::Multi);

    let calls = [
        ("get", json!({ "key": 7 })),
        ("set", json!({ "key": "k", "value": 1 })),
        ("set", json!({ "key": "k", "value": "v", "ttl": -5 })),
        ("set", json!({ "key": "k", "value": "v", "ttl": 0 })),
        ("set", json!({ "key": "k", "value": "v", "ttl": 1e-12 })),
        ("set", json!({ "key": "k", "value": "v", "ttl": "60" })),
        ("get", json!({ "key": "k", "cacheName": "" })),
        ("create-cache", json!({ "name": "" })),
        ("list-caches", json!({ "verbose": true })),
    ];

    for (tool, args) in calls {
        let result = registry.call(tool, Some(args.clone())).await;
        assert!(result.is_error, "{tool} {args} should be rejected");
        let text = result.text_content();
        assert!(text.contains(&format!("Invalid arguments for {tool}")), "got {text}");
    }

    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn missing_arguments_object_counts_as_empty() {
    let backend = RecordingBackend::replying(Ok(BackendReply::CacheList(vec![])));
    let registry = registry(backend.clone(), CacheMode::Multi);

    let result = registry.call("list-caches", None).await;
    assert!(!result.is_error);

    let result = registry.call("get", None).await;
    assert_eq!(rejection_code(result.text_content()), McpErrorCode::InvalidArguments);
    assert_eq!(backend.calls(), vec![Call::ListCaches]);
}

// ---------------------------------------------------------------------------
// get / set
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_hit_renders_value() {
    let backend = RecordingBackend::replying(Ok(BackendReply::Hit("hello world".into())));
    let registry = registry(backend, CacheMode::Single);

    let result = registry.call("get", Some(json!({ "key": "greeting" }))).await;
    assert!(!result.is_error);
    assert_eq!(result.content.len(), 1);
    assert_eq!(result.text_content(), "Status: HIT\nValue: hello world");
}

#[tokio::test]
async fn get_miss_renders_status_only() {
    let backend = RecordingBackend::replying(Ok(BackendReply::Miss));
    let registry = registry(backend, CacheMode::Single);

    let result = registry.call("get", Some(json!({ "key": "absent" }))).await;
    assert_eq!(result.text_content(), "Status: MISS");
}

#[tokio::test]
async fn set_without_ttl_leaves_ttl_to_backend() {
    let backend = RecordingBackend::replying(Ok(BackendReply::Success));
    let registry = registry(backend.clone(), CacheMode::Single);

    let result = registry
        .call("set", Some(json!({ "key": "k", "value": "v" })))
        .await;
    assert_eq!(result.text_content(), "Status: SUCCESS");
    assert_eq!(
        backend.calls(),
        vec![Call::Store {
            cache: DEFAULT_CACHE.into(),
            key: "k".into(),
            value: "v".into(),
            ttl: None,
        }]
    );
}

#[tokio::test]
async fn set_with_ttl_passes_it_through() {
    let backend = RecordingBackend::replying(Ok(BackendReply::Success));
    let registry = registry(backend.clone(), CacheMode::Single);

    registry
        .call("set", Some(json!({ "key": "k", "value": "v", "ttl": 120 })))
        .await;
    assert_eq!(
        backend.calls(),
        vec![Call::Store {
            cache: DEFAULT_CACHE.into(),
            key: "k".into(),
            value: "v".into(),
            ttl: Some(Duration::from_secs(120)),
        }]
    );
}

#[tokio::test]
async fn cache_name_defaults_and_overrides_in_multi_mode() {
    let backend = RecordingBackend::replying(Ok(BackendReply::Miss));
    let registry = registry(backend.clone(), CacheMode::Multi);

    registry.call("get", Some(json!({ "key": "k" }))).await;
    registry
        .call("get", Some(json!({ "key": "k", "cacheName": "other" })))
        .await;

    assert_eq!(
        backend.calls(),
        vec![
            Call::Fetch {
                cache: DEFAULT_CACHE.into(),
                key: "k".into()
            },
            Call::Fetch {
                cache: "other".into(),
                key: "k".into()
            },
        ]
    );
}

// ---------------------------------------------------------------------------
// cache administration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_caches_preserves_backend_order() {
    let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let backend = RecordingBackend::replying(Ok(BackendReply::CacheList(names)));
    let registry = registry(backend, CacheMode::Multi);

    let result = registry.call("list-caches", Some(json!({}))).await;
    assert_eq!(result.text_content(), "Status: SUCCESS\nCaches: a\nb\nc");
}

#[tokio::test]
async fn create_cache_twice_reports_success_both_times() {
    let backend = RecordingBackend::replying(Ok(BackendReply::Success));
    let registry = registry(backend.clone(), CacheMode::Multi);

    for _ in 0..2 {
        let result = registry.call("create-cache", Some(json!({ "name": "c" }))).await;
        assert_eq!(result.text_content(), "Status: SUCCESS");
    }
    assert_eq!(
        backend.calls(),
        vec![Call::CreateCache("c".into()), Call::CreateCache("c".into())]
    );
}

#[tokio::test]
async fn delete_cache_calls_backend_once() {
    let backend = RecordingBackend::replying(Ok(BackendReply::Success));
    let registry = registry(backend.clone(), CacheMode::Multi);

    let result = registry.call("delete-cache", Some(json!({ "name": "old" }))).await;
    assert_eq!(result.text_content(), "Status: SUCCESS");
    assert_eq!(backend.calls(), vec![Call::DeleteCache("old".into())]);
}

// ---------------------------------------------------------------------------
// backend failures and unknown replies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn backend_error_is_rendered_and_next_call_still_works() {
    let backend =
        RecordingBackend::replying(Err(BackendError::LimitExceeded("quota exceeded".into())));
    let registry = registry(backend.clone(), CacheMode::Multi);

    let calls = [
        ("get", json!({ "key": "k" })),
        ("set", json!({ "key": "k", "value": "v" })),
        ("list-caches", json!({})),
        ("create-cache", json!({ "name": "c" })),
        ("delete-cache", json!({ "name": "c" })),
    ];
    for (tool, args) in calls {
        let result = registry.call(tool, Some(args)).await;
        assert!(result.is_error);
        assert_eq!(result.text_content(), "Status: ERROR:\nDetails: quota exceeded", "{tool}");
    }

    backend.set_reply(Ok(BackendReply::Hit("back".into())));
    let result = registry.call("get", Some(json!({ "key": "k" }))).await;
    assert_eq!(result.text_content(), "Status: HIT\nValue: back");
}

#[tokio::test]
async fn unmodeled_reply_is_reported_not_thrown() {
    let backend = RecordingBackend::replying(Ok(BackendReply::Other {
        kind: "Throttled".into(),
        detail: "slow down".into(),
    }));
    let registry = registry(backend, CacheMode::Multi);

    let result = registry.call("get", Some(json!({ "key": "k" }))).await;
    assert!(!result.is_error);
    assert!(
        result.text_content().starts_with("Status: UNKNOWN RESPONSE:\nDetails: "),
        "got {}",
        result.text_content()
    );
    assert!(result.text_content().contains("Throttled"));
}

// ---------------------------------------------------------------------------
// dispatch integration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dispatch_tools_list_advertises_registry() {
    let backend = RecordingBackend::replying(Ok(BackendReply::Success));
    let registry = registry(backend, CacheMode::Multi);

    let req = JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: Some(RpcId::Number(1)),
        method: "tools/list".into(),
        params: None,
    };

    let response = handlers::dispatch(&req, &registry).await.unwrap();
    let result = response.result.unwrap();
    let tools = result["tools"].as_array().unwrap();

    let tool_names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        tool_names,
        ["get", "set", "list-caches", "create-cache", "delete-cache"]
    );

    let set = &tools[1];
    assert_eq!(set["inputSchema"]["required"], json!(["key", "value"]));
    assert!(set["inputSchema"]["properties"]["cacheName"].is_object());
    assert!(set["description"].as_str().unwrap().contains("cache"));
}

#[tokio::test]
async fn dispatch_get_via_tools_call() {
    let backend = RecordingBackend::replying(Ok(BackendReply::Hit("v".into())));
    let registry = registry(backend, CacheMode::Single);

    let req = JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: Some(RpcId::Number(2)),
        method: "tools/call".into(),
        params: Some(json!({
            "name": "get",
            "arguments": { "key": "k" }
        })),
    };

    let response = handlers::dispatch(&req, &registry).await.unwrap();
    let result = response.result.unwrap();

    assert_eq!(result["content"][0]["type"], "text");
    assert_eq!(result["content"][0]["text"], "Status: HIT\nValue: v");
    assert!(result.get("isError").is_none());
}

#[tokio::test]
async fn dispatch_tools_call_without_params_is_invalid_params() {
    let backend = RecordingBackend::replying(Ok(BackendReply::Success));
    let registry = registry(backend, CacheMode::Single);

    let req = JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: Some(RpcId::Str("x".into())),
        method: "tools/call".into(),
        params: None,
    };

    let response = handlers::dispatch(&req, &registry).await.unwrap();
    assert_eq!(response.error.unwrap().code, -32602);
}
