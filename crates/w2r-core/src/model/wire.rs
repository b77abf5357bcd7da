//! Request and response bodies exchanged with the backend.

use serde::{Deserialize, Serialize};

use super::{BookCandidate, BookFormat};

/// Body of `POST /process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub url: String,
    pub format: BookFormat,
}

/// Body of `POST /download`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadSelection {
    #[serde(rename = "selectedBooks")]
    pub selected_book_ids: Vec<String>,
    pub format: BookFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Loose view of a JSON response: either field may be present.
///
/// `/process` and `/get_books` answer with `books`; any endpoint may answer with `error`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendReply {
    #[serde(default)]
    pub books: Option<Vec<BookCandidate>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl BackendReply {
    /// The server-supplied error string, ignoring empty values.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn selection_uses_backend_field_names() {
        let sel = DownloadSelection {
            selected_book_ids: vec!["1".into(), "3".into()],
            format: BookFormat::Epub,
            url: Some("https://example.com/novel".into()),
        };
        let v = serde_json::to_value(&sel).unwrap();
        assert_eq!(
            v,
            json!({"selectedBooks": ["1", "3"], "format": "EPUB", "url": "https://example.com/novel"})
        );
    }

    #[test]
    fn selection_omits_missing_url() {
        let sel = DownloadSelection {
            selected_book_ids: vec!["a".into()],
            format: BookFormat::Pdf,
            url: None,
        };
        let v = serde_json::to_value(&sel).unwrap();
        assert!(v.get("url").is_none());
    }

    #[test]
    fn reply_with_books_or_error() {
        let ok: BackendReply =
            serde_json::from_str(r#"{"books": [{"id": 1, "title": "A"}]}"#).unwrap();
        assert_eq!(ok.books.as_ref().map(Vec::len), Some(1));
        assert!(ok.error_message().is_none());

        let err: BackendReply = serde_json::from_str(r#"{"error": "scrape failed"}"#).unwrap();
        assert!(err.books.is_none());
        assert_eq!(err.error_message(), Some("scrape failed"));

        let empty: BackendReply = serde_json::from_str(r#"{"error": ""}"#).unwrap();
        assert!(empty.error_message().is_none());
    }
}
