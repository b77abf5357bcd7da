//! Output format requested from the conversion service.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// E-book format the backend should produce. Sent on the wire as `"PDF"` / `"EPUB"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookFormat {
    Pdf,
    Epub,
}

impl BookFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            BookFormat::Pdf => "PDF",
            BookFormat::Epub => "EPUB",
        }
    }
}

impl fmt::Display for BookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a format name is neither PDF nor EPUB.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format {0:?} (expected PDF or EPUB)")]
pub struct UnknownFormat(pub String);

impl FromStr for BookFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("pdf") {
            Ok(BookFormat::Pdf)
        } else if s.eq_ignore_ascii_case("epub") {
            Ok(BookFormat::Epub)
        } else {
            Err(UnknownFormat(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_uppercase() {
        assert_eq!(serde_json::to_string(&BookFormat::Pdf).unwrap(), "\"PDF\"");
        assert_eq!(serde_json::to_string(&BookFormat::Epub).unwrap(), "\"EPUB\"");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("pdf".parse::<BookFormat>(), Ok(BookFormat::Pdf));
        assert_eq!(" EPUB ".parse::<BookFormat>(), Ok(BookFormat::Epub));
        assert_eq!("Epub".parse::<BookFormat>(), Ok(BookFormat::Epub));
    }

    #[test]
    fn parse_rejects_other_formats() {
        let err = "mobi".parse::<BookFormat>().unwrap_err();
        assert_eq!(err, UnknownFormat("mobi".to_string()));
    }
}
