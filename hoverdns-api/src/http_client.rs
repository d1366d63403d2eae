//! reqwest-backed [`HoverTransport`].
//!
//! Sends one request per call (no retry), forwards the session token as a
//! cookie and collects the cookies the server sets.

use async_trait::async_trait;
use reqwest::header::{COOKIE, HeaderMap, SET_COOKIE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{HoverError, Result, TransportError};
use crate::transport::{ApiMethod, ApiRequest, ApiResponse, HoverTransport, SESSION_COOKIE};
use crate::utils::log_sanitizer::truncate_for_log;

/// Production transport.
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    log_bodies: bool,
}

impl ReqwestTransport {
    /// Build an HTTP client with the configured timeouts.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                HoverError::Transport(TransportError::Network {
                    detail: format!("failed to create HTTP client: {e}"),
                })
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            log_bodies: config.log_bodies,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn reqwest_method(method: ApiMethod) -> Method {
    match method {
        ApiMethod::Get => Method::GET,
        ApiMethod::Post => Method::POST,
        ApiMethod::Put => Method::PUT,
        ApiMethod::Delete => Method::DELETE,
    }
}

fn map_send_error(e: &reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout {
            detail: e.to_string(),
        }
    } else {
        TransportError::Network {
            detail: e.to_string(),
        }
    }
}

/// Extract `(name, value)` from every `Set-Cookie` header, dropping attributes.
fn parse_set_cookies(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|raw| {
            let pair = raw.split(';').next()?;
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().trim_matches('"').to_string()))
        })
        .collect()
}

/// Parse a JSON response body, logging the raw text on failure.
///
/// The error is a plain description; callers wrap it in the variant that
/// fits the call.
pub(crate) fn parse_json<T>(response_text: &str) -> std::result::Result<T, String>
where
    T: DeserializeOwned,
{
    serde_json::from_str(response_text).map_err(|e| {
        log::error!("[hover] JSON parse failed: {e}");
        log::error!("[hover] Raw response: {}", truncate_for_log(response_text));
        format!("malformed response: {e}")
    })
}

#[async_trait]
impl HoverTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> std::result::Result<ApiResponse, TransportError> {
        let url = self.url(&request.path);
        log::debug!("[hover] {} {url}", request.method);

        let mut builder = self.client.request(reqwest_method(request.method), &url);
        if let Some(token) = &request.session {
            builder = builder.header(COOKIE, format!("{SESSION_COOKIE}={token}"));
        }
        if !request.form.is_empty() {
            builder = builder.form(&request.form);
        }

        let response = builder.send().await.map_err(|e| map_send_error(&e))?;

        let status = response.status().as_u16();
        log::debug!("[hover] Response Status: {status}");

        let cookies = parse_set_cookies(response.headers());

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                map_send_error(&e)
            } else {
                TransportError::Network {
                    detail: format!("failed to read response body: {e}"),
                }
            }
        })?;

        if self.log_bodies {
            log::debug!("[hover] Response Body: {}", truncate_for_log(&body));
        }

        Ok(ApiResponse {
            status,
            body,
            cookies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn set_cookie_pairs_without_attributes() {
        let mut headers = HeaderMap::new();
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("hoverauth=abc123; Path=/; HttpOnly; Secure"),
        );
        headers.append(SET_COOKIE, HeaderValue::from_static("hover_session=\"q=1\""));
        headers.append(SET_COOKIE, HeaderValue::from_static("garbage"));

        let cookies = parse_set_cookies(&headers);
        assert_eq!(
            cookies,
            vec![
                ("hoverauth".to_string(), "abc123".to_string()),
                ("hover_session".to_string(), "q=1".to_string()),
            ]
        );
    }

    #[test]
    fn parse_json_valid() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Foo {
            x: i32,
        }
        let result: std::result::Result<Foo, String> = parse_json(r#"{"x":42}"#);
        assert_eq!(result, Ok(Foo { x: 42 }));
    }

    #[test]
    fn parse_json_invalid() {
        let result: std::result::Result<Vec<u8>, String> = parse_json("not json");
        assert!(
            matches!(&result, Err(msg) if msg.starts_with("malformed response")),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn url_joins_base_and_path() {
        let transport =
            ReqwestTransport::new(&ClientConfig::default().with_base_url("http://localhost/api/"))
                .expect("client builds");
        assert_eq!(transport.url("/domains"), "http://localhost/api/domains");
    }
}
