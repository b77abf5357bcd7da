//! File extension inferred from a download's declared content type.

/// Used when the content type names none of the known archive/book types.
pub const DEFAULT_EXTENSION: &str = "pdf";

/// Maps the declared content type to a file extension.
///
/// `application/zip` → `zip`, `application/pdf` → `pdf`, `application/epub`
/// (including `application/epub+zip`) → `epub`; anything else → `pdf`.
pub fn extension_for_content_type(content_type: Option<&str>) -> &'static str {
    let ct = match content_type {
        Some(ct) => ct.to_ascii_lowercase(),
        None => return DEFAULT_EXTENSION,
    };
    if ct.contains("application/zip") {
        "zip"
    } else if ct.contains("application/pdf") {
        "pdf"
    } else if ct.contains("application/epub") {
        "epub"
    } else {
        DEFAULT_EXTENSION
    }
}
