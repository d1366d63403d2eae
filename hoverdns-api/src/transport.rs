//! Network seam between the client core and the Hover HTTP API.
//!
//! Every remote call the core makes goes through [`HoverTransport::send`], so
//! tests can substitute a scripted transport and count calls.

use std::fmt;

use async_trait::async_trait;

use crate::error::TransportError;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "hoverauth";

/// HTTP method of an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        })
    }
}

/// One request against the API, relative to the transport's base URL.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: ApiMethod,
    /// Path below the base URL, starting with `/`.
    pub path: String,
    /// Session token sent as the [`SESSION_COOKIE`] cookie.
    pub session: Option<String>,
    /// Form-encoded body fields, in order.
    pub form: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(ApiMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(ApiMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(ApiMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(ApiMethod::Delete, path)
    }

    fn new(method: ApiMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            session: None,
            form: Vec::new(),
        }
    }

    /// Attach the session token.
    #[must_use]
    pub fn with_session(mut self, token: impl Into<String>) -> Self {
        self.session = Some(token.into());
        self
    }

    /// Append one form field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((name.into(), value.into()));
        self
    }

    /// Value of the first form field called `name`.
    pub fn form_value(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

// Form values may hold the account password and the session token is a
// bearer credential, so neither is printed.
impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.form.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("session", &self.session.as_ref().map(|_| "<redacted>"))
            .field("form_fields", &fields)
            .finish()
    }
}

/// HTTP answer to an [`ApiRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
    /// Cookies set by the response, as `(name, value)` pairs.
    pub cookies: Vec<(String, String)>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            cookies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push((name.into(), value.into()));
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the server rejected the session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, 401 | 403)
    }

    /// Value of the cookie called `name`, ignoring empty values.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(k, v)| k == name && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }
}

/// Sends API requests.
///
/// Implementations must not retry: every `send` is exactly one remote call.
#[async_trait]
pub trait HoverTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
