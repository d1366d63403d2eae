//! Record name helpers

/// Strip the trailing dot of an absolute name.
pub fn normalize_domain_name(name: &str) -> &str {
    name.trim_end_matches('.')
}

/// Convert a fully-qualified name into a label relative to `zone_name`.
///
/// - `"www.example.com"` + `"example.com"` -> `"www"`
/// - `"example.com"` + `"example.com"` -> `"@"`
/// - names outside the zone are returned unchanged
pub fn full_name_to_relative(full_name: &str, zone_name: &str) -> String {
    let full = normalize_domain_name(full_name);
    let zone = normalize_domain_name(zone_name);

    if full == zone {
        "@".to_string()
    } else if let Some(subdomain) = full
        .strip_suffix(zone)
        .and_then(|rest| rest.strip_suffix('.'))
    {
        subdomain.to_string()
    } else {
        full.to_string()
    }
}

/// Convert a relative label into a fully-qualified name.
///
/// - `"www"` + `"example.com"` -> `"www.example.com"`
/// - `"@"` or `""` + `"example.com"` -> `"example.com"`
pub fn relative_to_full_name(relative_name: &str, zone_name: &str) -> String {
    let zone = normalize_domain_name(zone_name);

    if relative_name == "@" || relative_name.is_empty() {
        zone.to_string()
    } else {
        format!("{relative_name}.{zone}")
    }
}
