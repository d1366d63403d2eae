//! # hoverdns-api
//!
//! Client for the unofficial [Hover](https://www.hover.com/) registrar API,
//! built for DNS-01 style TXT record automation.
//!
//! Hover has no API keys: the client logs in with the account username and
//! password, keeps the `hoverauth` session cookie, and reuses it for every
//! later call until the server rejects it.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hoverdns_api::{Client, ClientConfig, Credential, relative_to_full_name};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credential = Credential::from_passfile("/etc/hover/passfile.json")?;
//!     let mut client = Client::new(credential, &ClientConfig::default())?;
//!
//!     let fqdn = relative_to_full_name("_acme-challenge", "example.com");
//!     let report = client.upsert(&fqdn, "example.com", "token-value", 300).await?;
//!     for failure in &report.failures {
//!         eprintln!("action {} failed: {}", failure.index, failure.error);
//!     }
//!
//!     client.delete(&fqdn, "example.com").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Batches
//!
//! ```rust,no_run
//! # use hoverdns_api::*;
//! # async fn example(client: &mut Client) -> Result<()> {
//! let batch: ActionBatch = vec![
//!     Action::add("a.example.com", "example.com", "one", 300),
//!     Action::delete("b.example.com", "example.com"),
//! ]
//! .into();
//! let report = client.execute(&batch).await?;
//! assert_eq!(report.success_count + report.failed_count, batch.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Batch execution distinguishes two failure classes:
//!
//! - [`HoverError::DomainNotFound`] and [`HoverError::DirectoryFetchFailed`]
//!   abort the batch and are returned as `Err`. A login that fails while the
//!   domain list is fetched is reported as `DirectoryFetchFailed`.
//! - [`HoverError::MutationFailed`] is logged, recorded in the
//!   [`ExecutionReport`] and the batch moves on.
//!
//! Nothing is retried automatically.

mod action;
mod client;
mod config;
mod directory;
mod error;
mod executor;
mod http_client;
mod records;
mod session;
mod transport;
mod types;
mod utils;

#[cfg(test)]
mod test_utils;

pub use action::{Action, ActionBatch, ActionFailure, ActionKind, ExecutionReport};
pub use client::Client;
pub use config::{ClientConfig, HOVER_API_BASE};
pub use directory::DomainDirectory;
pub use error::{HoverError, Result, TransportError};
pub use executor::Executor;
pub use http_client::ReqwestTransport;
pub use records::TXT;
pub use session::SessionStore;
pub use transport::{ApiMethod, ApiRequest, ApiResponse, HoverTransport, SESSION_COOKIE};
pub use types::{
    Address, BillingInfo, ContactBlock, Credential, DnsEntry, Domain, HoverUser, Session,
};

// Re-export utils
pub use utils::names::{full_name_to_relative, normalize_domain_name, relative_to_full_name};
