//! High-level façade over the session, directory and executor.

use std::sync::Arc;

use crate::action::{Action, ActionBatch, ActionKind, ExecutionReport};
use crate::config::ClientConfig;
use crate::directory::DomainDirectory;
use crate::error::{HoverError, Result};
use crate::executor::Executor;
use crate::http_client::ReqwestTransport;
use crate::records::find_txt_entries;
use crate::session::SessionStore;
use crate::transport::HoverTransport;
use crate::types::{Credential, DnsEntry, Domain};

/// Hover API client.
///
/// Owns the session token and the domain cache exclusively. Construct one per
/// process and pass it to whatever needs it; nothing is shared between
/// instances.
pub struct Client {
    session: SessionStore,
    directory: DomainDirectory,
    executor: Executor,
    transport: Arc<dyn HoverTransport>,
}

impl Client {
    /// Client talking to the real API through reqwest.
    ///
    /// No network call is made until the first operation needs one.
    pub fn new(credential: Credential, config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(credential, Arc::new(transport)))
    }

    /// Client over an arbitrary transport.
    pub fn with_transport(credential: Credential, transport: Arc<dyn HoverTransport>) -> Self {
        Self {
            session: SessionStore::new(credential, Arc::clone(&transport)),
            directory: DomainDirectory::new(Arc::clone(&transport)),
            executor: Executor::new(Arc::clone(&transport)),
            transport,
        }
    }

    /// Create `fqdn` as a TXT record, or update it if one already exists.
    pub async fn upsert(
        &mut self,
        fqdn: &str,
        domain: &str,
        value: &str,
        ttl: u32,
    ) -> Result<ExecutionReport> {
        let kind = self
            .existing_kind(fqdn, domain)
            .await
            .map_err(|e| e.for_domain(domain))?;
        let action = Action::new(kind, fqdn, domain, value, ttl);
        self.run(action.into(), domain).await
    }

    /// Delete every TXT record named `fqdn`.
    pub async fn delete(&mut self, fqdn: &str, domain: &str) -> Result<ExecutionReport> {
        self.run(Action::delete(fqdn, domain).into(), domain).await
    }

    /// Execute a prepared batch in order.
    pub async fn execute(&mut self, batch: &ActionBatch) -> Result<ExecutionReport> {
        self.executor
            .execute(batch, &mut self.directory, &mut self.session)
            .await
    }

    async fn run(&mut self, batch: ActionBatch, domain: &str) -> Result<ExecutionReport> {
        self.execute(&batch)
            .await
            .map_err(|e| e.for_domain(domain))
    }

    /// `Update` when a same-named TXT record exists, `Add` otherwise.
    ///
    /// Only a failed record listing falls back to `Add`. Login, directory and
    /// unknown-domain errors are returned as is, so nothing runs twice.
    async fn existing_kind(&mut self, fqdn: &str, domain: &str) -> Result<ActionKind> {
        match self.existing_txt_records(fqdn, domain).await {
            Ok(entries) if !entries.is_empty() => {
                log::debug!(
                    "[hover] {fqdn} has {} TXT record(s), updating",
                    entries.len()
                );
                Ok(ActionKind::Update)
            }
            Ok(_) => Ok(ActionKind::Add),
            Err(e @ HoverError::RecordLookupFailed { .. }) => {
                log::warn!("[hover] could not list records for {fqdn}, adding instead: {e}");
                Ok(ActionKind::Add)
            }
            Err(e) => Err(e),
        }
    }

    /// TXT records named `fqdn` that currently exist in `domain`.
    pub async fn existing_txt_records(
        &mut self,
        fqdn: &str,
        domain: &str,
    ) -> Result<Vec<DnsEntry>> {
        let Some(domain_id) = self
            .directory
            .resolve(domain, &mut self.session)
            .await?
            .map(|d| d.id.clone())
        else {
            return Err(HoverError::DomainNotFound {
                name: domain.to_string(),
            });
        };

        find_txt_entries(
            self.transport.as_ref(),
            &mut self.session,
            &domain_id,
            domain,
            fqdn,
        )
        .await
    }

    /// Look a domain up, fetching the directory on first use.
    pub async fn domain(&mut self, name: &str) -> Result<Option<&Domain>> {
        self.directory.resolve(name, &mut self.session).await
    }

    /// Refetch the domain list.
    pub async fn refresh_domains(&mut self) -> Result<()> {
        self.directory.refresh(&mut self.session).await
    }

    /// Force the next call to log in again.
    pub fn invalidate_session(&mut self) {
        self.session.invalidate();
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn directory(&self) -> &DomainDirectory {
        &self.directory
    }
}
