//! End-to-end tests of the reqwest transport against a local mock server.

use std::sync::Arc;
use std::time::Duration;

use hoverdns_api::{
    Action, ActionBatch, ApiRequest, Client, ClientConfig, Credential, HoverError,
    HoverTransport, ReqwestTransport, TransportError,
};
use serde_json::json;
use wiremock::matchers::{body_string, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::default().with_base_url(server.uri())
}

fn credential() -> Credential {
    Credential::new("scott", "tiger").expect("valid credential")
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_string("username=scott&password=tiger"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "hoverauth=tok123; Path=/; HttpOnly")
                .set_body_json(json!({ "succeeded": true })),
        )
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_domains(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/domains"))
        .and(header("cookie", "hoverauth=tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "succeeded": true,
            "domains": [
                { "id": "dom1", "domain_name": "example.com", "status": "active" },
                { "id": "dom2", "domain_name": "example.org", "status": "active" }
            ]
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_cookie_is_captured() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let transport = ReqwestTransport::new(&config(&server)).expect("transport");
    let response = transport
        .send(
            ApiRequest::post("/login")
                .field("username", "scott")
                .field("password", "tiger"),
        )
        .await
        .expect("login response");

    assert_eq!(response.status, 200);
    assert_eq!(response.cookie("hoverauth"), Some("tok123"));
}

#[tokio::test]
async fn add_action_posts_txt_form() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_domains(&server).await;
    Mock::given(method("POST"))
        .and(path("/domains/dom1/dns"))
        .and(header("cookie", "hoverauth=tok123"))
        .and(body_string("name=test.example.com&type=TXT&content=ABCDE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "succeeded": true })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = Client::new(credential(), &config(&server)).expect("client");
    let batch: ActionBatch = Action::add("test.example.com", "example.com", "ABCDE", 300).into();
    let report = client.execute(&batch).await.expect("execute");

    assert_eq!(report.success_count, 1);
    assert!(report.is_clean());
}

#[tokio::test]
async fn unknown_domain_sends_no_mutation() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_domains(&server).await;
    Mock::given(method("POST"))
        .and(path("/domains/dom1/dns"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut client = Client::new(credential(), &config(&server)).expect("client");
    let err = client
        .delete("test.unknown.com", "unknown.com")
        .await
        .expect_err("unknown domain");

    assert!(matches!(err.root(), HoverError::DomainNotFound { name } if name == "unknown.com"));
}

#[tokio::test]
async fn upsert_updates_existing_record() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_domains(&server).await;
    Mock::given(method("GET"))
        .and(path("/domains/dom1/dns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "succeeded": true,
            "domains": [{
                "domain_name": "example.com",
                "id": "dom1",
                "entries": [
                    { "id": "dns42", "name": "_acme-challenge", "type": "TXT",
                      "content": "old", "ttl": 300, "is_default": false, "can_revoke": true },
                    { "id": "dns43", "name": "www", "type": "A",
                      "content": "1.2.3.4", "ttl": 300, "is_default": false, "can_revoke": true }
                ]
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/dns/dns42"))
        .and(body_string_contains("content=fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "succeeded": true })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = Client::new(credential(), &config(&server)).expect("client");
    let report = client
        .upsert("_acme-challenge.example.com", "example.com", "fresh", 300)
        .await
        .expect("upsert");

    assert!(report.is_clean());
}

#[tokio::test]
async fn server_error_is_soft_failure() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_domains(&server).await;
    Mock::given(method("POST"))
        .and(path("/domains/dom2/dns"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(2)
        .mount(&server)
        .await;

    let mut client = Client::new(credential(), &config(&server)).expect("client");
    let batch: ActionBatch = vec![
        Action::add("a.example.org", "example.org", "1", 300),
        Action::add("b.example.org", "example.org", "2", 300),
    ]
    .into();
    let report = client.execute(&batch).await.expect("batch completes");

    assert_eq!(report.failed_count, 2);
    assert!(matches!(
        &report.failures[0].error,
        HoverError::MutationFailed { cause, .. } if cause.starts_with("HTTP 500")
    ));
}

#[tokio::test]
async fn rejected_login_fails_domain_listing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let mut client = Client::new(credential(), &config(&server)).expect("client");
    let err = client.refresh_domains().await.expect_err("login rejected");

    assert!(
        matches!(&err, HoverError::DirectoryFetchFailed { status: None, detail }
            if detail.starts_with("authentication failed") && detail.contains("401")),
        "unexpected error: {err:?}"
    );
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domains"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(
        &config(&server).with_timeout(Duration::from_millis(200)),
    )
    .expect("transport");
    let transport: Arc<dyn HoverTransport> = Arc::new(transport);

    let err = transport
        .send(ApiRequest::get("/domains"))
        .await
        .expect_err("timeout");
    assert!(matches!(err, TransportError::Timeout { .. }), "got {err:?}");
}
