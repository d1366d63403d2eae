//! Lazily populated cache of the domains owned by the account.

use std::sync::Arc;

use crate::error::{HoverError, Result};
use crate::http_client::parse_json;
use crate::session::SessionStore;
use crate::transport::{ApiRequest, HoverTransport};
use crate::types::{Domain, DomainListing};
use crate::utils::log_sanitizer::truncate_for_log;

/// Domain directory.
///
/// `None` means "never fetched", which is distinct from an account that owns
/// no domains: the latter is fetched once and then stays empty.
pub struct DomainDirectory {
    domains: Option<Vec<Domain>>,
    transport: Arc<dyn HoverTransport>,
}

impl DomainDirectory {
    pub fn new(transport: Arc<dyn HoverTransport>) -> Self {
        Self {
            domains: None,
            transport,
        }
    }

    /// Fetch the domain list, replacing the cache only on full success.
    ///
    /// Every failure, including the login needed first, is reported as
    /// [`HoverError::DirectoryFetchFailed`].
    pub async fn refresh(&mut self, session: &mut SessionStore) -> Result<()> {
        let token = session.token().await.map_err(|e| {
            log::error!("[hover] cannot list domains without a session: {e}");
            HoverError::DirectoryFetchFailed {
                status: None,
                detail: e.to_string(),
            }
        })?;

        let response = self
            .transport
            .send(ApiRequest::get("/domains").with_session(token))
            .await
            .map_err(|e| {
                log::error!("[hover] domain listing request failed: {e}");
                HoverError::DirectoryFetchFailed {
                    status: None,
                    detail: e.to_string(),
                }
            })?;

        if !response.is_success() {
            if response.is_unauthorized() {
                session.invalidate();
            }
            log::error!("[hover] domain listing returned HTTP {}", response.status);
            return Err(HoverError::DirectoryFetchFailed {
                status: Some(response.status),
                detail: truncate_for_log(&response.body),
            });
        }

        let listing: DomainListing =
            parse_json(&response.body).map_err(|detail| HoverError::DirectoryFetchFailed {
                status: Some(response.status),
                detail,
            })?;

        let Some(domains) = listing.into_domains() else {
            return Err(HoverError::DirectoryFetchFailed {
                status: Some(response.status),
                detail: format!(
                    "listing not successful: {}",
                    truncate_for_log(&response.body)
                ),
            });
        };

        log::info!("[hover] fetched {} domain(s)", domains.len());
        self.domains = Some(domains);
        Ok(())
    }

    /// Find `name`, fetching the directory first if it was never populated.
    ///
    /// Never refreshes a populated cache; call [`refresh`](Self::refresh) to
    /// see domains added since.
    pub async fn resolve(
        &mut self,
        name: &str,
        session: &mut SessionStore,
    ) -> Result<Option<&Domain>> {
        if !self.is_populated() {
            self.refresh(session).await?;
        }
        Ok(self.lookup(name))
    }

    /// Exact, case-sensitive match against the cached snapshot.
    pub fn lookup(&self, name: &str) -> Option<&Domain> {
        self.domains()
            .iter()
            .find(|domain| domain.domain_name == name)
    }

    /// Replace the cache with a known snapshot.
    pub fn seed(&mut self, domains: Vec<Domain>) {
        self.domains = Some(domains);
    }

    /// Forget the snapshot; the next [`resolve`](Self::resolve) refetches.
    pub fn invalidate(&mut self) {
        self.domains = None;
    }

    pub fn is_populated(&self) -> bool {
        self.domains.is_some()
    }

    pub fn domains(&self) -> &[Domain] {
        self.domains.as_deref().unwrap_or_default()
    }
}
