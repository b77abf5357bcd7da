//! Parse raw response header lines (as delivered by libcurl) into status and headers.

/// Status line and headers of the final response.
#[derive(Debug, Clone, Default)]
pub(crate) struct ResponseHead {
    pub status: Option<u32>,
    pub reason: String,
    pub headers: Vec<(String, String)>,
}

/// Parse collected header lines.
///
/// libcurl reports every header block it sees (interim `100 Continue`,
/// redirects); each new status line starts over so only the final block is kept.
pub(crate) fn parse_head(lines: &[String]) -> ResponseHead {
    let mut head = ResponseHead::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            head = ResponseHead::default();
            let mut parts = line.splitn(3, ' ');
            let _version = parts.next();
            head.status = parts.next().and_then(|c| c.trim().parse::<u32>().ok());
            head.reason = parts.next().unwrap_or("").trim().to_string();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            head.headers
                .push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    head
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_status_and_headers() {
        let h = parse_head(&lines(&[
            "HTTP/1.1 200 OK",
            "Content-Type: application/pdf",
            "Content-Disposition: attachment; filename=\"Volume_1.pdf\"",
            "",
        ]));
        assert_eq!(h.status, Some(200));
        assert_eq!(h.reason, "OK");
        assert_eq!(h.headers.len(), 2);
        assert_eq!(h.headers[0], ("Content-Type".into(), "application/pdf".into()));
    }

    #[test]
    fn keeps_only_final_block() {
        let h = parse_head(&lines(&[
            "HTTP/1.1 100 Continue",
            "",
            "HTTP/1.1 500 Internal Server Error",
            "Content-Type: application/json",
        ]));
        assert_eq!(h.status, Some(500));
        assert_eq!(h.reason, "Internal Server Error");
        assert_eq!(h.headers.len(), 1);
    }

    #[test]
    fn http2_status_line_without_reason() {
        let h = parse_head(&lines(&["HTTP/2 404", "content-type: text/html"]));
        assert_eq!(h.status, Some(404));
        assert_eq!(h.reason, "");
    }
}
