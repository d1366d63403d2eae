//! Response-body shortening for logs and error details.
//!
//! Hover answers failed logins and expired sessions with full HTML pages,
//! and TXT contents can carry validation tokens. Neither belongs in a log
//! line verbatim.

/// Maximum number of bytes of a body kept in log output.
const TRUNCATE_LIMIT: usize = 200;

/// Largest char boundary not after `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

/// Collapse runs of whitespace (including newlines) into single spaces.
fn squash_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Single-line, length-bounded rendering of `s` for logging.
pub fn truncate_for_log(s: &str) -> String {
    let flat = squash_whitespace(s);
    if flat.len() <= TRUNCATE_LIMIT {
        flat
    } else {
        format!(
            "{}... ({} bytes)",
            &flat[..floor_char_boundary(&flat, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}
