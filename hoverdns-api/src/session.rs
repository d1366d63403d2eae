//! Session token lifecycle.
//!
//! The token is minted lazily by the first caller that needs it and then
//! reused without any client-side validity check. A rejected token is only
//! discovered by a failed authenticated call; recovering from it means
//! [`SessionStore::invalidate`] followed by another [`SessionStore::token`].

use std::sync::Arc;

use crate::error::{HoverError, Result};
use crate::transport::{ApiRequest, HoverTransport, SESSION_COOKIE};
use crate::types::{Credential, Session};
use crate::utils::log_sanitizer::truncate_for_log;

/// Owns the credential and the cached session.
pub struct SessionStore {
    credential: Credential,
    session: Option<Session>,
    transport: Arc<dyn HoverTransport>,
}

impl SessionStore {
    pub fn new(credential: Credential, transport: Arc<dyn HoverTransport>) -> Self {
        Self {
            credential,
            session: None,
            transport,
        }
    }

    /// Current token, logging in first if none is cached.
    ///
    /// A cached token is returned as-is. On failure the store is left
    /// exactly as it was, so the next call attempts a fresh login.
    pub async fn token(&mut self) -> Result<String> {
        if let Some(session) = &self.session {
            return Ok(session.token.clone());
        }

        let session = self.login().await?;
        let token = session.token.clone();
        self.session = Some(session);
        Ok(token)
    }

    async fn login(&self) -> Result<Session> {
        log::info!("[hover] logging in as {}", self.credential.identity());

        let request = ApiRequest::post("/login")
            .field("username", self.credential.identity())
            .field("password", self.credential.secret());

        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("[hover] login request failed: {e}");
            HoverError::AuthenticationFailed {
                detail: e.to_string(),
            }
        })?;

        match response.cookie(SESSION_COOKIE) {
            Some(token) => {
                log::debug!("[hover] login succeeded (HTTP {})", response.status);
                Ok(Session::new(token))
            }
            None => {
                log::warn!(
                    "[hover] login returned HTTP {} without a {SESSION_COOKIE} cookie",
                    response.status
                );
                Err(HoverError::AuthenticationFailed {
                    detail: format!(
                        "HTTP {}: {}",
                        response.status,
                        truncate_for_log(&response.body)
                    ),
                })
            }
        }
    }

    /// Drop the cached session so the next [`token`](Self::token) logs in again.
    pub fn invalidate(&mut self) {
        if self.session.take().is_some() {
            log::debug!("[hover] session invalidated");
        }
    }

    /// Seed a token obtained elsewhere.
    pub fn restore(&mut self, token: impl Into<String>) {
        self.session = Some(Session::new(token));
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}
