//! Ordered execution of action batches.
//!
//! # Failure policy
//! - A domain missing from the directory aborts the batch immediately.
//!   Actions already applied are not rolled back.
//! - A failed mutation (transport error, non-2xx, missing record to update)
//!   is logged and recorded in the [`ExecutionReport`]; the batch continues.
//!
//! The asymmetry is intentional and callers depend on it.

use std::sync::Arc;

use crate::action::{Action, ActionBatch, ActionKind, ExecutionReport};
use crate::directory::DomainDirectory;
use crate::error::{HoverError, Result};
use crate::records::{TXT, check_mutation, dns_path, entry_path, find_txt_entries};
use crate::session::SessionStore;
use crate::transport::{ApiRequest, HoverTransport};
use crate::types::DnsEntry;

/// Applies actions one at a time, in submission order.
pub struct Executor {
    transport: Arc<dyn HoverTransport>,
}

impl Executor {
    pub fn new(transport: Arc<dyn HoverTransport>) -> Self {
        Self { transport }
    }

    /// Run `batch` against the directory snapshot.
    ///
    /// The directory is fetched once up front if it was never populated, so
    /// every action observes the same snapshot. Only a failed fetch or an
    /// unknown domain is returned as an error.
    pub async fn execute(
        &self,
        batch: &ActionBatch,
        directory: &mut DomainDirectory,
        session: &mut SessionStore,
    ) -> Result<ExecutionReport> {
        if !directory.is_populated() {
            directory.refresh(session).await?;
        }

        let mut report = ExecutionReport::default();

        for (index, action) in batch.iter().enumerate() {
            let Some(domain_id) = directory.lookup(action.domain()).map(|d| d.id.clone()) else {
                log::error!("[hover] domain {} not found", action.domain());
                return Err(HoverError::DomainNotFound {
                    name: action.domain().to_string(),
                });
            };

            match self.apply(action, &domain_id, session).await {
                Ok(()) => {
                    log::info!("[hover] Action Stack ({index:02}): [{action}]");
                    report.record_success();
                }
                Err(e) => {
                    log::warn!("[hover] Action Stack ({index:02}): [{action}] failed: {e}");
                    report.record_failure(index, action, e);
                }
            }
        }

        Ok(report)
    }

    async fn apply(
        &self,
        action: &Action,
        domain_id: &str,
        session: &mut SessionStore,
    ) -> Result<()> {
        match action.kind() {
            ActionKind::Add => self.add(action, domain_id, session).await,
            ActionKind::Update => self.update(action, domain_id, session).await,
            ActionKind::Delete => self.delete(action, domain_id, session).await,
        }
    }

    async fn add(
        &self,
        action: &Action,
        domain_id: &str,
        session: &mut SessionStore,
    ) -> Result<()> {
        let token = session_token(action, session).await?;
        let request = ApiRequest::post(dns_path(domain_id))
            .with_session(token)
            .field("name", action.fqdn())
            .field("type", TXT)
            .field("content", action.value());

        let result = self.transport.send(request).await;
        check_mutation(action.fqdn(), session, result)
    }

    async fn update(
        &self,
        action: &Action,
        domain_id: &str,
        session: &mut SessionStore,
    ) -> Result<()> {
        let entries = self.existing(action, domain_id, session).await?;
        if entries.is_empty() {
            return Err(HoverError::MutationFailed {
                name: action.fqdn().to_string(),
                cause: "no existing TXT record to update".to_string(),
            });
        }

        for entry in &entries {
            let token = session_token(action, session).await?;
            let request = ApiRequest::put(entry_path(&entry.id))
                .with_session(token)
                .field("content", action.value());

            let result = self.transport.send(request).await;
            check_mutation(action.fqdn(), session, result)?;
        }
        Ok(())
    }

    async fn delete(
        &self,
        action: &Action,
        domain_id: &str,
        session: &mut SessionStore,
    ) -> Result<()> {
        let entries = self.existing(action, domain_id, session).await?;
        if entries.is_empty() {
            log::info!("[hover] no TXT record named {} to delete", action.fqdn());
            return Ok(());
        }

        for entry in &entries {
            let token = session_token(action, session).await?;
            let request = ApiRequest::delete(entry_path(&entry.id)).with_session(token);

            let result = self.transport.send(request).await;
            check_mutation(action.fqdn(), session, result)?;
        }
        Ok(())
    }

    async fn existing(
        &self,
        action: &Action,
        domain_id: &str,
        session: &mut SessionStore,
    ) -> Result<Vec<DnsEntry>> {
        find_txt_entries(
            self.transport.as_ref(),
            session,
            domain_id,
            action.domain(),
            action.fqdn(),
        )
        .await
        .map_err(|e| as_mutation_failure(action, e))
    }
}

async fn session_token(action: &Action, session: &mut SessionStore) -> Result<String> {
    session
        .token()
        .await
        .map_err(|e| as_mutation_failure(action, e))
}

fn as_mutation_failure(action: &Action, error: HoverError) -> HoverError {
    match error {
        e @ HoverError::MutationFailed { .. } => e,
        other => HoverError::MutationFailed {
            name: action.fqdn().to_string(),
            cause: other.to_string(),
        },
    }
}
