//! Book candidates returned by the conversion service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Candidate identifier. The backend sends either a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookId::Number(n) => write!(f, "{n}"),
            BookId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for BookId {
    fn from(n: i64) -> Self {
        BookId::Number(n.into())
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        BookId::Text(s.to_string())
    }
}

/// One convertible unit (chapter, volume, ...) offered for a source URL.
///
/// `id` and `title` are optional on decode: entries missing them are still
/// listed, labelled by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCandidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BookId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl BookCandidate {
    pub fn new(id: impl Into<BookId>, title: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: Some(title.into()),
            author: None,
        }
    }

    /// Display label: the title, or `Book <n>` (1-based) when the title is missing or blank.
    pub fn label(&self, index: usize) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => format!("Book {}", index + 1),
        }
    }

    /// Value sent in a download selection: the id, or the 0-based position when the id is missing.
    pub fn selection_value(&self, index: usize) -> String {
        match &self.id {
            Some(BookId::Text(s)) if s.is_empty() => index.to_string(),
            Some(id) => id.to_string(),
            None => index.to_string(),
        }
    }
}
