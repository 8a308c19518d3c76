//! Integration tests for the Universign client and its XML-RPC transport.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;
use universign::{
    BasicAuthConfig, Client, ClientConfig, TransactionDocument, TransactionDocumentOptions,
    TransactionRequest, TransactionRequestOptions, TransactionSigner, TransactionSignerOptions,
    Transport, UniversignError, Value,
};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RPC_PATH: &str = "/sign/rpc/";

fn client_for(mock_server: &MockServer) -> Client {
    Client::with_config(ClientConfig {
        url: Some(format!("{}{}", mock_server.uri(), RPC_PATH)),
        https: Some(false),
        basic_auth: Some(BasicAuthConfig::with_credentials("foo", "bar").unwrap()),
        ..Default::default()
    })
    .unwrap()
}

fn response(value_xml: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(format!(
        "<?xml version=\"1.0\"?><methodResponse><params><param>{value_xml}</param></params></methodResponse>"
    ))
}

fn transaction_request() -> TransactionRequest {
    TransactionRequest::new(TransactionRequestOptions {
        signers: Some(vec![
            TransactionSigner::new(TransactionSignerOptions {
                email_address: Some("john@doe.com".to_string()),
                firstname: Some("john".to_string()),
                ..Default::default()
            })
            .unwrap(),
        ]),
        documents: Some(vec![
            TransactionDocument::new(TransactionDocumentOptions {
                content: Some(b"%PDF".to_vec()),
                file_name: Some("contract.pdf".to_string()),
                ..Default::default()
            })
            .unwrap(),
        ]),
        must_contact_first_signer: Some(true),
        ..Default::default()
    })
    .unwrap()
}

struct EchoTransport;

#[async_trait]
impl Transport for EchoTransport {
    async fn call(&self, method: &str, params: Vec<Value>) -> universign::Result<Value> {
        let mut echo = BTreeMap::new();
        echo.insert("method".to_string(), Value::from(method));
        echo.insert("params".to_string(), Value::Array(params));
        Ok(Value::Array(vec![Value::Struct(echo)]))
    }
}

#[tokio::test]
async fn test_echo_transport_pass_through() {
    let client = Client::with_transport(EchoTransport);

    let mut foo = BTreeMap::new();
    foo.insert("foo".to_string(), Value::from("bar"));
    let params = vec![Value::Struct(foo)];

    let result = client.call("test", params.clone()).await.unwrap();

    let mut expected = BTreeMap::new();
    expected.insert("method".to_string(), Value::from("test"));
    expected.insert("params".to_string(), Value::Array(params));
    assert_eq!(result, Value::Array(vec![Value::Struct(expected)]));
}

#[tokio::test]
async fn test_client_with_custom_config() {
    let client = Client::with_config(ClientConfig {
        url: Some("https://sign.test.universign.eu/sign/rpc/".to_string()),
        timeout: Some(Duration::from_secs(60)),
        user_agent: Some("test-agent/1.0".to_string()),
        ..Default::default()
    });
    assert!(client.is_ok());
}

#[tokio::test]
async fn test_call_with_basic_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(header("Authorization", "Basic Zm9vOmJhcg=="))
        .and(header("Content-Type", "text/xml"))
        .and(body_string_contains(
            "<methodName>requester.getTransactionInfo</methodName>",
        ))
        .and(body_string_contains("<string>tx-1</string>"))
        .respond_with(response(
            "<value><struct><member><name>status</name><value><string>ready</string></value></member></struct></value>",
        ))
        .mount(&mock_server)
        .await;

    let info = client_for(&mock_server)
        .requester()
        .get_transaction_info("tx-1")
        .await
        .unwrap();

    assert_eq!(info.get("status").and_then(Value::as_str), Some("ready"));
}

#[tokio::test]
async fn test_request_transaction() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(body_string_contains(
            "<methodName>requester.requestTransaction</methodName>",
        ))
        .and(body_string_contains(
            "<member><name>emailAddress</name><value><string>john@doe.com</string></value></member>",
        ))
        .and(body_string_contains(
            "<member><name>content</name><value><base64>JVBERg==</base64></value></member>",
        ))
        .and(body_string_contains(
            "<member><name>mustContactFirstSigner</name><value><boolean>1</boolean></value></member>",
        ))
        .respond_with(response(
            "<value><struct>\
             <member><name>id</name><value><string>38c5be21</string></value></member>\
             <member><name>url</name><value><string>https://sign.example/38c5be21</string></value></member>\
             </struct></value>",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client_for(&mock_server)
        .requester()
        .request_transaction(&transaction_request())
        .await
        .unwrap();

    assert_eq!(response.id, "38c5be21");
    assert_eq!(response.url, "https://sign.example/38c5be21");
}

#[tokio::test]
async fn test_get_documents() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(body_string_contains("<methodName>requester.getDocuments</methodName>"))
        .respond_with(response(
            "<value><array><data><value><struct>\
             <member><name>id</name><value><string>doc-1</string></value></member>\
             <member><name>fileName</name><value><string>contract.pdf</string></value></member>\
             <member><name>content</name><value><base64>JVBERg==</base64></value></member>\
             </struct></value></data></array></value>",
        ))
        .mount(&mock_server)
        .await;

    let documents = client_for(&mock_server)
        .requester()
        .get_documents("tx-1")
        .await
        .unwrap();

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].id.as_deref(), Some("doc-1"));
    assert_eq!(documents[0].file_name.as_deref(), Some("contract.pdf"));
    assert_eq!(documents[0].content, b"%PDF");
}

#[tokio::test]
async fn test_fault_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<methodResponse><fault><value><struct>\
             <member><name>faultCode</name><value><int>73010</int></value></member>\
             <member><name>faultString</name><value><string>Unknown transaction</string></value></member>\
             </struct></value></fault></methodResponse>",
        ))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .requester()
        .get_transaction_info("unknown")
        .await;

    match result {
        Err(UniversignError::Fault { code, message }) => {
            assert_eq!(code, 73010);
            assert_eq!(message, "Unknown transaction");
        }
        other => panic!("Expected fault, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).call("requester.getTransactionInfo", vec![]).await;
    let err = result.unwrap_err();
    assert!(matches!(err, UniversignError::Unauthorized));
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn test_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .call("requester.getTransactionInfo", vec![])
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(503));
    assert!(err.is_retryable());
    assert!(err.to_string().contains("maintenance"));
}

#[tokio::test]
async fn test_https_only_rejects_plain_http() {
    let mock_server = MockServer::start().await;

    let client = Client::with_config(ClientConfig {
        url: Some(format!("{}{}", mock_server.uri(), RPC_PATH)),
        ..Default::default()
    })
    .unwrap();

    let err = client.call("requester.getTransactionInfo", vec![]).await.unwrap_err();
    assert!(matches!(err, UniversignError::Http(_)));
}

#[tokio::test]
async fn test_server_error_without_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .call("requester.getTransactionInfo", vec![])
        .await
        .unwrap_err();

    match err {
        UniversignError::Status { status_code, body } => {
            assert_eq!(status_code, 500);
            assert!(body.is_empty());
        }
        other => panic!("Expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unencodable_params_are_not_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .call("requester.getTransactionInfo", vec![Value::Double(f64::NAN)])
        .await
        .unwrap_err();
    assert!(matches!(err, UniversignError::Encode(_)));
}
