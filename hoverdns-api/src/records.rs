//! DNS entry lookup and the single-record mutation calls.

use serde::Deserialize;

use crate::error::{HoverError, TransportError};
use crate::http_client::parse_json;
use crate::session::SessionStore;
use crate::transport::{ApiRequest, ApiResponse, HoverTransport};
use crate::types::{DnsEntry, DnsListing};
use crate::utils::log_sanitizer::truncate_for_log;
use crate::utils::names::{full_name_to_relative, normalize_domain_name};

/// Record type managed by this client.
pub const TXT: &str = "TXT";

pub(crate) fn dns_path(domain_id: &str) -> String {
    format!("/domains/{}/dns", urlencoding::encode(domain_id))
}

pub(crate) fn entry_path(entry_id: &str) -> String {
    format!("/dns/{}", urlencoding::encode(entry_id))
}

/// Whether `entry` is a TXT record named `fqdn` inside `domain_name`.
///
/// Hover stores labels relative to the domain, but absolute names are
/// accepted as well.
pub(crate) fn is_txt_named(entry: &DnsEntry, fqdn: &str, domain_name: &str) -> bool {
    if !entry.record_type.eq_ignore_ascii_case(TXT) {
        return false;
    }
    let name = normalize_domain_name(&entry.name);
    name == normalize_domain_name(fqdn) || name == full_name_to_relative(fqdn, domain_name)
}

/// List the TXT entries of `domain_id` named `fqdn`.
pub(crate) async fn find_txt_entries(
    transport: &dyn HoverTransport,
    session: &mut SessionStore,
    domain_id: &str,
    domain_name: &str,
    fqdn: &str,
) -> Result<Vec<DnsEntry>, HoverError> {
    let lookup_failed = |detail: String| HoverError::RecordLookupFailed {
        name: fqdn.to_string(),
        detail,
    };

    let token = session.token().await?;
    let response = transport
        .send(ApiRequest::get(dns_path(domain_id)).with_session(token))
        .await
        .map_err(|e| lookup_failed(e.to_string()))?;

    if !response.is_success() {
        if response.is_unauthorized() {
            session.invalidate();
        }
        return Err(lookup_failed(format!(
            "HTTP {}: {}",
            response.status,
            truncate_for_log(&response.body)
        )));
    }

    let listing: DnsListing = parse_json(&response.body).map_err(lookup_failed)?;
    if !listing.succeeded {
        return Err(lookup_failed(format!(
            "listing not successful: {}",
            truncate_for_log(&response.body)
        )));
    }

    let entries: Vec<DnsEntry> = listing
        .domains
        .into_iter()
        .filter(|zone| zone.domain_name.is_empty() || zone.domain_name == domain_name)
        .flat_map(|zone| zone.entries)
        .filter(|entry| is_txt_named(entry, fqdn, domain_name))
        .collect();

    log::debug!(
        "[hover] {} existing TXT record(s) for {fqdn}",
        entries.len()
    );
    Ok(entries)
}

/// Status envelope Hover wraps around mutation answers.
#[derive(Debug, Deserialize)]
struct MutationStatus {
    #[serde(default = "default_true")]
    succeeded: bool,
    #[serde(default)]
    error: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Turn the answer to a mutation call into `MutationFailed` unless it succeeded.
///
/// A 401/403 drops the cached session so the next call logs in again.
pub(crate) fn check_mutation(
    name: &str,
    session: &mut SessionStore,
    result: Result<ApiResponse, TransportError>,
) -> Result<(), HoverError> {
    let failed = |cause: String| HoverError::MutationFailed {
        name: name.to_string(),
        cause,
    };

    let response = result.map_err(|e| failed(e.to_string()))?;

    if !response.is_success() {
        if response.is_unauthorized() {
            session.invalidate();
        }
        return Err(failed(format!(
            "HTTP {}: {}",
            response.status,
            truncate_for_log(&response.body)
        )));
    }

    // Non-JSON 2xx bodies count as success.
    if let Ok(status) = serde_json::from_str::<MutationStatus>(&response.body)
        && !status.succeeded
    {
        return Err(failed(
            status
                .error
                .unwrap_or_else(|| "request not successful".to_string()),
        ));
    }

    Ok(())
}
