//! Unified error type definition

use thiserror::Error;

/// Failure below the API layer: the request never produced an HTTP answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection refused, DNS failure, reset, unreadable body, etc.
    #[error("network error: {detail}")]
    Network {
        /// Error details.
        detail: String,
    },

    /// The per-call timeout elapsed.
    #[error("request timed out: {detail}")]
    Timeout {
        /// Error details.
        detail: String,
    },
}

/// Error type for every Hover client operation.
///
/// Only [`DomainNotFound`](Self::DomainNotFound) and
/// [`DirectoryFetchFailed`](Self::DirectoryFetchFailed) are ever returned from
/// batch execution. [`MutationFailed`](Self::MutationFailed) is reported
/// through the execution report and the log, never as a hard error.
#[derive(Error, Debug, Clone)]
pub enum HoverError {
    /// Login did not yield a session cookie.
    ///
    /// `detail` carries the (truncated) response body or the transport
    /// failure. It never contains the secret.
    #[error("authentication failed: {detail}")]
    AuthenticationFailed {
        /// Diagnostic detail.
        detail: String,
    },

    /// The domain listing call failed.
    ///
    /// `status` is `None` when no HTTP answer was received at all.
    #[error("{}", directory_fetch_message(*status, detail))]
    DirectoryFetchFailed {
        /// HTTP status code, if a response arrived.
        status: Option<u16>,
        /// Diagnostic detail.
        detail: String,
    },

    /// The target domain is absent from the cached directory.
    #[error("domain {name} not found in domains")]
    DomainNotFound {
        /// Domain name that was looked up.
        name: String,
    },

    /// A single add/update/delete call failed.
    #[error("mutation of {name} failed: {cause}")]
    MutationFailed {
        /// FQDN of the record being mutated.
        name: String,
        /// What went wrong.
        cause: String,
    },

    /// Listing the existing DNS entries of a domain failed.
    #[error("record lookup for {name} failed: {detail}")]
    RecordLookupFailed {
        /// FQDN being looked up.
        name: String,
        /// Diagnostic detail.
        detail: String,
    },

    /// The credential is unusable (empty fields, unreadable passfile).
    #[error("invalid credential: {detail}")]
    InvalidCredential {
        /// Diagnostic detail.
        detail: String,
    },

    /// The HTTP client could not be built.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Context wrapper naming the domain a façade call acted upon.
    #[error("domain {domain}: {source}")]
    Domain {
        /// Domain being acted upon.
        domain: String,
        /// Underlying error.
        #[source]
        source: Box<HoverError>,
    },
}

fn directory_fetch_message(status: Option<u16>, detail: &str) -> String {
    match status {
        Some(code) => format!("domain listing failed (HTTP {code}): {detail}"),
        None => format!("domain listing failed: {detail}"),
    }
}

impl HoverError {
    /// Wrap `self` with the domain a façade operation was acting upon.
    #[must_use]
    pub fn for_domain(self, domain: impl Into<String>) -> Self {
        Self::Domain {
            domain: domain.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error, skipping [`Domain`](Self::Domain) context wrappers.
    pub fn root(&self) -> &Self {
        match self {
            Self::Domain { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether this is expected behavior (user input, missing resource),
    /// used for log levels.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Please update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::AuthenticationFailed { .. }
            | Self::DomainNotFound { .. }
            | Self::InvalidCredential { .. } => true,
            Self::Domain { source, .. } => source.is_expected(),
            _ => false,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, HoverError>;
