//! Filename sanitization for names chosen by the server.

/// Linux NAME_MAX, in bytes.
pub const NAME_MAX: usize = 255;

/// Makes a server-supplied filename safe to create inside the download directory.
///
/// - Path separators, NUL, control characters and `<>:"|?*` become `_`
/// - Leading/trailing whitespace and dots are trimmed (no hidden files, no `..`)
/// - Names longer than 255 bytes are shortened, keeping the extension
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' | '<' | '>' | ':' | '"' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = replaced.trim_matches(|c: char| c.is_whitespace() || c == '.');
    truncate_keeping_extension(trimmed, NAME_MAX)
}

fn truncate_keeping_extension(name: &str, max: usize) -> String {
    if name.len() <= max {
        return name.to_string();
    }
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && ext.len() < 16 => (stem, Some(ext)),
        _ => (name, None),
    };
    let budget = match ext {
        Some(ext) => max - ext.len() - 1,
        None => max,
    };
    let mut take = budget.min(stem.len());
    while take > 0 && !stem.is_char_boundary(take) {
        take -= 1;
    }
    match ext {
        Some(ext) => format!("{}.{}", &stem[..take], ext),
        None => stem[..take].to_string(),
    }
}
