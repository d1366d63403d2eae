use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HoverError, Result};

// ============ Credential ============

/// Account identity and secret used for the login exchange.
///
/// Immutable once constructed. The `Debug` output redacts the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    identity: String,
    secret: String,
}

/// On-disk passfile format: `{"username": "...", "plaintextpassword": "..."}`.
#[derive(Debug, Deserialize)]
struct Passfile {
    username: String,
    plaintextpassword: String,
}

impl Credential {
    /// Build a credential, rejecting empty fields.
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        let identity = identity.into();
        let secret = secret.into();
        if identity.trim().is_empty() {
            return Err(HoverError::InvalidCredential {
                detail: "username is empty".to_string(),
            });
        }
        if secret.is_empty() {
            return Err(HoverError::InvalidCredential {
                detail: "password is empty".to_string(),
            });
        }
        Ok(Self { identity, secret })
    }

    /// Load a credential from a JSON passfile.
    pub fn from_passfile(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| HoverError::InvalidCredential {
            detail: format!("cannot read passfile {}: {e}", path.display()),
        })?;
        let parsed: Passfile =
            serde_json::from_str(&raw).map_err(|e| HoverError::InvalidCredential {
                // serde_json errors report position only, never the input text
                detail: format!("malformed passfile {}: {e}", path.display()),
            })?;
        Self::new(parsed.username, parsed.plaintextpassword)
    }

    /// Account identity (username).
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("identity", &self.identity)
            .field("secret", &"<redacted>")
            .finish()
    }
}

// ============ Session ============

/// A live session token obtained from a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Value of the session cookie.
    pub token: String,
    /// When the token was obtained.
    pub acquired_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            acquired_at: Utc::now(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("acquired_at", &self.acquired_at)
            .finish()
    }
}

// ============ Domain ============

/// Postal contact used for the admin, billing, tech and owner roles.
///
/// Hover squeezes US and Canadian addresses into the same US-style layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    /// Usually `"active"`.
    pub status: String,
    #[serde(rename = "org_name")]
    pub organization_name: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    pub address1: String,
    pub address2: String,
    pub address3: String,
    pub city: String,
    /// US state or Canadian province.
    pub state: String,
    /// `10001` or `V0H1X0` style.
    pub zip: String,
    /// Two-letter country code.
    pub country: String,
    /// E.164 with a `.` after the country code, e.g. `+1.8667316556`.
    pub phone: String,
    #[serde(rename = "fax")]
    pub facsimile: String,
    pub email: String,
}

impl Address {
    /// Hover's own support contact, as it appears on domains whose contacts
    /// were never changed from the registrar default.
    pub fn hover_support() -> Self {
        Self {
            status: "active".to_string(),
            organization_name: "Hover, a service of Tucows.com Co".to_string(),
            first_name: "Support".to_string(),
            last_name: "Contact".to_string(),
            address1: "96 Mowat Ave.".to_string(),
            city: "Toronto".to_string(),
            state: "ON".to_string(),
            zip: "M6K 3M1".to_string(),
            country: "CA".to_string(),
            phone: "+1.8667316556".to_string(),
            email: "help@hover.com".to_string(),
            ..Self::default()
        }
    }
}

/// The four contact roles attached to a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactBlock {
    pub admin: Address,
    pub billing: Address,
    pub tech: Address,
    pub owner: Address,
}

/// Snapshot of one domain owned by the account, as returned by the listing call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Domain {
    /// Opaque registrar identifier, e.g. `dom8675309`.
    pub id: String,
    /// The domain itself, e.g. `example.com`.
    pub domain_name: String,
    pub num_emails: u32,
    /// First day without service after the paid period.
    pub renewal_date: String,
    pub display_date: String,
    pub registered_date: String,
    pub renewable: bool,
    pub auto_renew: bool,
    pub contacts: ContactBlock,
    pub nameservers: Vec<String>,
    pub status: String,
    pub locked: bool,
    pub whois_privacy: bool,
    pub hover_user: HoverUser,
    pub glue: serde_json::Value,
    /// DNS entries, present only when the listing embeds them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<DnsEntry>>,
}

/// Account holder attached to a domain: payment method and contact emails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverUser {
    pub billing: BillingInfo,
    pub email: String,
    pub email_secondary: String,
}

/// Payment method on file, e.g. `Visa ending 1234`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingInfo {
    pub description: String,
    pub pay_mode: String,
}

impl Domain {
    /// Minimal record with only the identifier and name set.
    pub fn new(id: impl Into<String>, domain_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            domain_name: domain_name.into(),
            ..Self::default()
        }
    }
}

/// Body of `GET /domains`.
///
/// Hover wraps the list in `{"succeeded": true, "domains": [...]}`; a bare
/// array is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum DomainListing {
    // Tried first: an empty array would otherwise match `Wrapped` with every
    // field defaulted.
    Bare(Vec<Domain>),
    Wrapped {
        #[serde(default = "default_succeeded")]
        succeeded: bool,
        /// Absent when Hover answers with an error object.
        #[serde(default)]
        domains: Option<Vec<Domain>>,
    },
}

fn default_succeeded() -> bool {
    true
}

impl DomainListing {
    /// `None` when the API reported `succeeded: false` or sent no list.
    pub(crate) fn into_domains(self) -> Option<Vec<Domain>> {
        match self {
            Self::Wrapped {
                succeeded: false, ..
            } => None,
            Self::Wrapped { domains, .. } => domains,
            Self::Bare(domains) => Some(domains),
        }
    }
}

// ============ DNS Entries ============

/// One DNS record inside a domain, as returned by `GET /domains/{id}/dns`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsEntry {
    /// Opaque record identifier, e.g. `dns1234567`.
    pub id: String,
    /// Label relative to the domain; `@` for the apex.
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
    pub ttl: u32,
    pub is_default: bool,
    pub can_revoke: bool,
}

/// Body of `GET /domains/{id}/dns`.
#[derive(Debug, Deserialize)]
pub(crate) struct DnsListing {
    #[serde(default = "default_succeeded")]
    pub succeeded: bool,
    #[serde(default)]
    pub domains: Vec<DnsZone>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DnsZone {
    #[serde(default)]
    pub domain_name: String,
    #[serde(default)]
    pub entries: Vec<DnsEntry>,
}
