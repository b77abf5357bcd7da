//! Save-name resolution for downloaded books.
//!
//! Prefers the server's `Content-Disposition` filename; otherwise synthesizes
//! `books_<ids>_<timestamp>.<ext>` from the selection and content type.

mod content_disposition;
mod extension;
mod sanitize;

pub use content_disposition::parse_content_disposition_filename;
pub use extension::{extension_for_content_type, DEFAULT_EXTENSION};
pub use sanitize::{sanitize_filename, NAME_MAX};

use chrono::{DateTime, Utc};

/// Compact UTC timestamp used in synthesized names, e.g. `20241019T181142`.
pub fn compact_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%S").to_string()
}

/// Name built from the selection when the server supplies none.
pub fn synthesize_filename(
    selected_ids: &[String],
    content_type: Option<&str>,
    at: DateTime<Utc>,
) -> String {
    let ext = extension_for_content_type(content_type);
    let raw = format!("books_{}_{}.{}", selected_ids.join("_"), compact_timestamp(at), ext);
    sanitize_filename(&raw)
}

/// Resolves the save name for a binary download response.
///
/// A usable `Content-Disposition` filename is taken as-is (after
/// sanitizing); a missing header or one without a usable filename falls back
/// to [`synthesize_filename`].
pub fn resolve_download_filename(
    content_disposition: Option<&str>,
    content_type: Option<&str>,
    selected_ids: &[String],
    at: DateTime<Utc>,
) -> String {
    content_disposition
        .and_then(parse_content_disposition_filename)
        .map(|name| sanitize_filename(&name))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| synthesize_filename(selected_ids, content_type, at))
}
