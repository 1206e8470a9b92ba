//! Integration tests for the edgecall invocation client.

use edgecall::prelude::*;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Deterministic transport stub: returns a canned outcome and records every
/// request it was asked to send.
struct StubTransport {
    outcome: Result<FunctionResponse, TransportError>,
    seen: Mutex<Vec<FunctionRequest>>,
}

impl StubTransport {
    fn responding(response: FunctionResponse) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(response),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(TransportError::new(message)),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<FunctionRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn send(&self, request: FunctionRequest) -> Result<FunctionResponse, TransportError> {
        self.seen.lock().unwrap().push(request);
        self.outcome.clone()
    }
}

fn client_with(transport: Arc<StubTransport>) -> FunctionsClient {
    FunctionsClient::with_transport(
        "https://functions.example.com",
        HashMap::new(),
        transport,
    )
}

#[tokio::test]
async fn test_client_info_header_not_overridable() {
    let mut initial = HashMap::new();
    initial.insert("x-client-info".to_string(), "impostor/9.9".to_string());
    initial.insert("X-Custom".to_string(), "kept".to_string());

    let client = FunctionsClient::new("https://functions.example.com", initial);

    assert_eq!(
        client.headers().get("x-client-info"),
        Some(&format!("edgecall/{}", env!("CARGO_PKG_VERSION")))
    );
    // Other initial headers survive, lowercased.
    assert_eq!(client.headers().get("x-custom"), Some(&"kept".to_string()));
}

#[tokio::test]
async fn test_set_auth_attaches_bearer_token() {
    let transport = StubTransport::responding(FunctionResponse::new(200));
    let mut client = client_with(transport.clone());
    client.set_auth("abc");

    client.invoke("hello", InvokeOptions::new()).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].get_header("Authorization"),
        Some(&"Bearer abc".to_string())
    );
}

#[tokio::test]
async fn test_invoke_json_decodes_success_body() {
    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct Payload {
        x: i64,
    }

    let transport =
        StubTransport::responding(FunctionResponse::new(200).body(r#"{"x":1}"#));
    let client = client_with(transport);

    let decoded: Payload = client
        .invoke_json("numbers", InvokeOptions::new())
        .await
        .unwrap();

    assert_eq!(decoded, Payload { x: 1 });
}

#[tokio::test]
async fn test_invoke_json_parse_failure_is_decode_error() {
    let transport =
        StubTransport::responding(FunctionResponse::new(200).body("not json"));
    let client = client_with(transport);

    let result: Result<serde_json::Value, _> =
        client.invoke_json("numbers", InvokeOptions::new()).await;

    assert!(matches!(result, Err(InvokeError::Decode(_))));
}

#[tokio::test]
async fn test_non_success_status_is_http_error_with_raw_body() {
    let transport =
        StubTransport::responding(FunctionResponse::new(500).body("boom"));
    let client = client_with(transport);

    let err = client
        .invoke("exploder", InvokeOptions::new())
        .await
        .unwrap_err();

    match err {
        InvokeError::Http { status, body } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, Bytes::from_static(b"boom"));
        }
        other => panic!("expected http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_relay_header_fails_despite_success_status() {
    let transport = StubTransport::responding(
        FunctionResponse::new(200)
            .header("x-relay-error", "true")
            .body("looks fine"),
    );
    let client = client_with(transport);

    let err = client
        .invoke("relayed", InvokeOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, InvokeError::Relay));
}

#[tokio::test]
async fn test_relay_header_value_match_is_exact() {
    // Anything other than the literal "true" is not a relay error.
    for value in ["TRUE", "True", "1", "false", ""] {
        let transport = StubTransport::responding(
            FunctionResponse::new(200).header("x-relay-error", value),
        );
        let client = client_with(transport);

        let result = client.invoke("relayed", InvokeOptions::new()).await;
        assert!(result.is_ok(), "value {:?} misclassified as relay", value);
    }
}

#[tokio::test]
async fn test_relay_header_name_is_case_insensitive() {
    let transport = StubTransport::responding(
        FunctionResponse::new(200).header("X-Relay-Error", "true"),
    );
    let client = client_with(transport);

    let err = client
        .invoke("relayed", InvokeOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, InvokeError::Relay));
}

#[tokio::test]
async fn test_per_call_headers_win_over_stored_headers() {
    let transport = StubTransport::responding(FunctionResponse::new(200));
    let mut client = client_with(transport.clone());
    client.set_auth("stored");

    let options = InvokeOptions::new().header("Authorization", "Bearer override");
    client.invoke("secured", options).await.unwrap();

    let requests = transport.requests();
    assert_eq!(
        requests[0].get_header("authorization"),
        Some(&"Bearer override".to_string())
    );
}

#[tokio::test]
async fn test_transport_failure_is_transport_error() {
    let transport = StubTransport::failing("connection refused");
    let client = client_with(transport);

    let err = client
        .invoke("unreachable", InvokeOptions::new())
        .await
        .unwrap_err();

    match err {
        InvokeError::Transport(e) => assert_eq!(e.message, "connection refused"),
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_uninterpretable_status_is_bad_server_response() {
    let transport = StubTransport::responding(FunctionResponse::new(0));
    let client = client_with(transport);

    let err = client
        .invoke("weird", InvokeOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, InvokeError::BadServerResponse(StatusCode(0))));
}

#[tokio::test]
async fn test_invoke_is_idempotent_against_deterministic_stub() {
    let transport = StubTransport::responding(
        FunctionResponse::new(200).header("x-relay-error", "true"),
    );
    let client = client_with(transport.clone());

    let options = InvokeOptions::text("same payload");
    let first = client.invoke("relayed", options.clone()).await;
    let second = client.invoke("relayed", options).await;

    assert!(matches!(first, Err(InvokeError::Relay)));
    assert!(matches!(second, Err(InvokeError::Relay)));

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], requests[1]);
}

#[tokio::test]
async fn test_url_composition_appends_function_name() {
    let transport = StubTransport::responding(FunctionResponse::new(200));
    // Trailing slash on the base URL does not double up.
    let client = FunctionsClient::with_transport(
        "https://functions.example.com/",
        HashMap::new(),
        transport.clone(),
    );

    client.invoke("hello", InvokeOptions::new()).await.unwrap();

    assert_eq!(
        transport.requests()[0].url,
        "https://functions.example.com/hello"
    );
}

#[tokio::test]
async fn test_json_options_default_content_type() {
    let transport = StubTransport::responding(FunctionResponse::new(200));
    let client = client_with(transport.clone());

    let options = InvokeOptions::json(&serde_json::json!({"name": "Ada"})).unwrap();
    client.invoke("hello", options).await.unwrap();

    let request = &transport.requests()[0];
    assert_eq!(
        request.get_header("content-type"),
        Some(&"application/json".to_string())
    );
    assert_eq!(request.body, Bytes::from_static(br#"{"name":"Ada"}"#));
}

#[tokio::test]
async fn test_explicit_content_type_overrides_default() {
    let transport = StubTransport::responding(FunctionResponse::new(200));
    let client = client_with(transport.clone());

    let options = InvokeOptions::text("a,b,c").header("Content-Type", "text/csv");
    client.invoke("ingest", options).await.unwrap();

    assert_eq!(
        transport.requests()[0].get_header("content-type"),
        Some(&"text/csv".to_string())
    );
}

#[tokio::test]
async fn test_invoke_with_closure_error_propagates_unchanged() {
    let transport =
        StubTransport::responding(FunctionResponse::new(200).body("raw bytes"));
    let client = client_with(transport);

    let err = client
        .invoke_with("raw", InvokeOptions::new(), |_body, _context| {
            Err::<(), _>(InvokeError::Decode("nope".to_string()))
        })
        .await
        .unwrap_err();

    match err {
        InvokeError::Decode(msg) => assert_eq!(msg, "nope"),
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invoke_with_receives_body_and_metadata() {
    let transport = StubTransport::responding(
        FunctionResponse::new(201)
            .header("x-request-id", "req-7")
            .body("payload"),
    );
    let client = client_with(transport);

    let (len, status, request_id) = client
        .invoke_with("raw", InvokeOptions::new(), |body, context| {
            let request_id = context.headers.get("x-request-id").cloned();
            Ok((body.len(), context.status, request_id))
        })
        .await
        .unwrap();

    assert_eq!(len, 7);
    assert_eq!(status, StatusCode(201));
    assert_eq!(request_id, Some("req-7".to_string()));
}

#[tokio::test]
async fn test_classification_order_status_beats_relay_header() {
    // A non-2xx response with a relay header is an HTTP error; the relay
    // check only runs after the status check passes.
    let transport = StubTransport::responding(
        FunctionResponse::new(502)
            .header("x-relay-error", "true")
            .body("bad gateway"),
    );
    let client = client_with(transport);

    let err = client
        .invoke("relayed", InvokeOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    assert_eq!(err.body_text(), Some("bad gateway".to_string()));
}
