//! Utility modules.

/// Shortening of response bodies before they reach a log line.
pub mod log_sanitizer;

/// Conversions between fully-qualified and domain-relative record names.
pub mod names;
