//! Terminal rendering of the candidate list.

use w2r_core::flow::SelectionEntry;

/// One line per entry (`#`, id, label, author), or a note when the list is empty.
pub fn entry_lines(entries: &[SelectionEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["No books available.".to_string()];
    }
    let id_width = entries
        .iter()
        .map(|e| e.value.chars().count())
        .max()
        .unwrap_or(0)
        .max(2);
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(format!("{:<4} {:<id_width$} {}", "#", "ID", "TITLE"));
    for (i, e) in entries.iter().enumerate() {
        let mut line = format!("{:<4} {:<id_width$} {}", i + 1, e.value, e.label);
        if let Some(author) = e.author.as_deref().filter(|a| !a.is_empty()) {
            line.push_str(&format!(" ({author})"));
        }
        lines.push(line);
    }
    lines
}
