//! Test helpers
//!
//! Scripted transport plus factories for common API payloads.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;

use crate::error::TransportError;
use crate::transport::{ApiMethod, ApiRequest, ApiResponse, HoverTransport, SESSION_COOKIE};
use crate::types::{Credential, DnsEntry};

type Script = Result<ApiResponse, TransportError>;

// ===== MockTransport =====

/// Answers each (method, path) with a scripted response and records every request.
///
/// Unscripted routes answer HTTP 404.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(ApiMethod, String), Script>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the answer for a route.
    pub async fn respond(&self, method: ApiMethod, path: &str, response: ApiResponse) {
        self.routes
            .lock()
            .await
            .insert((method, path.to_string()), Ok(response));
    }

    /// Make a route fail below the HTTP layer.
    pub async fn fail(&self, method: ApiMethod, path: &str) {
        self.routes.lock().await.insert(
            (method, path.to_string()),
            Err(TransportError::Network {
                detail: "connection reset by peer".to_string(),
            }),
        );
    }

    pub async fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn count(&self, method: ApiMethod, path: &str) -> usize {
        self.requests
            .lock()
            .await
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Number of requests with the given method, any path.
    pub async fn count_method(&self, method: ApiMethod) -> usize {
        self.requests
            .lock()
            .await
            .iter()
            .filter(|r| r.method == method)
            .count()
    }
}

#[async_trait]
impl HoverTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let key = (request.method, request.path.clone());
        self.requests.lock().await.push(request);
        self.routes
            .lock()
            .await
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Ok(ApiResponse::new(404, "not scripted")))
    }
}

// ===== Factories =====

pub fn test_credential() -> Credential {
    Credential::new("scott", "tiger").expect("static test credential is valid")
}

pub fn login_ok(token: &str) -> ApiResponse {
    ApiResponse::new(200, r#"{"succeeded":true}"#).with_cookie(SESSION_COOKIE, token)
}

/// `GET /domains` body for `(id, domain_name)` pairs.
pub fn domains_ok(domains: &[(&str, &str)]) -> ApiResponse {
    let items: Vec<_> = domains
        .iter()
        .map(|(id, name)| json!({ "id": id, "domain_name": name }))
        .collect();
    ApiResponse::new(
        200,
        json!({ "succeeded": true, "domains": items }).to_string(),
    )
}

/// `GET /domains/{id}/dns` body.
pub fn dns_ok(domain_name: &str, entries: &[DnsEntry]) -> ApiResponse {
    ApiResponse::new(
        200,
        json!({
            "succeeded": true,
            "domains": [{ "domain_name": domain_name, "entries": entries }]
        })
        .to_string(),
    )
}

pub fn txt_entry(id: &str, name: &str, content: &str) -> DnsEntry {
    DnsEntry {
        id: id.to_string(),
        name: name.to_string(),
        record_type: "TXT".to_string(),
        content: content.to_string(),
        ttl: 300,
        ..DnsEntry::default()
    }
}
