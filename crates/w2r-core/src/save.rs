//! Saving downloaded books to disk.
//!
//! Bytes are written to a temp file inside the target directory and then
//! persisted under the resolved name, so a failed save never leaves a partial
//! file behind and the temp handle is always released.

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::filename::NAME_MAX;

/// Upper bound on `name (n).ext` candidates tried before giving up.
const MAX_NUMBERED: usize = 1000;

/// A completed save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub path: PathBuf,
    /// Final file name; differs from the requested one when a numbered variant was chosen.
    pub filename: String,
    pub bytes: u64,
}

/// Destination for downloaded payloads.
pub trait FileSink: Send + Sync {
    fn save(&self, filename: &str, data: &[u8]) -> Result<SavedFile>;
}

/// Saves into a directory. Existing files are kept unless `overwrite` is set;
/// a clash picks `name (1).ext`, `name (2).ext`, ...
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    overwrite: bool,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overwrite: false,
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSink for DirectorySink {
    fn save(&self, filename: &str, data: &[u8]) -> Result<SavedFile> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create download dir {}", self.dir.display()))?;

        let mut tmp = tempfile::Builder::new()
            .prefix(".w2r-")
            .suffix(".part")
            .tempfile_in(&self.dir)
            .with_context(|| format!("create temp file in {}", self.dir.display()))?;
        tmp.write_all(data).context("write downloaded data")?;
        tmp.as_file().sync_all().context("sync downloaded data")?;

        if self.overwrite {
            let path = self.dir.join(filename);
            tmp.persist(&path)
                .map_err(|e| e.error)
                .with_context(|| format!("save {}", path.display()))?;
            return Ok(saved(path, filename, data));
        }

        for n in 0..MAX_NUMBERED {
            let name = numbered_name(filename, n);
            let path = self.dir.join(&name);
            match tmp.persist_noclobber(&path) {
                Ok(_) => return Ok(saved(path, &name, data)),
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => tmp = e.file,
                Err(e) => {
                    return Err(e.error).with_context(|| format!("save {}", path.display()));
                }
            }
        }
        anyhow::bail!(
            "no free file name for {} in {}",
            filename,
            self.dir.display()
        )
    }
}

fn saved(path: PathBuf, filename: &str, data: &[u8]) -> SavedFile {
    SavedFile {
        path,
        filename: filename.to_string(),
        bytes: data.len() as u64,
    }
}

/// `name.ext` for n = 0, `name (n).ext` otherwise. The stem is shortened so
/// the result stays within `NAME_MAX` bytes.
fn numbered_name(filename: &str, n: usize) -> String {
    if n == 0 {
        return filename.to_string();
    }
    let (stem, ext) = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (filename, None),
    };
    let suffix = format!(" ({n})");
    let ext_len = ext.map_or(0, |e| e.len() + 1);
    let mut take = stem.len().min(NAME_MAX.saturating_sub(suffix.len() + ext_len));
    while take > 0 && !stem.is_char_boundary(take) {
        take -= 1;
    }
    let stem = &stem[..take];
    match ext {
        Some(ext) => format!("{stem}{suffix}.{ext}"),
        None => format!("{stem}{suffix}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leftover_temp_files(dir: &Path) -> usize {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
            .count()
    }

    #[test]
    fn numbered_names() {
        assert_eq!(numbered_name("Volume_1.pdf", 0), "Volume_1.pdf");
        assert_eq!(numbered_name("Volume_1.pdf", 2), "Volume_1 (2).pdf");
        assert_eq!(numbered_name("README", 1), "README (1)");
        assert_eq!(numbered_name(".hidden", 1), ".hidden (1)");
    }

    #[test]
    fn numbered_names_stay_within_name_max() {
        let long = format!("{}.pdf", "v".repeat(250));
        let numbered = numbered_name(&long, 1);
        assert!(numbered.len() <= NAME_MAX);
        assert!(numbered.ends_with("v (1).pdf"));

        let wide = format!("{}.epub", "é".repeat(125));
        let numbered = numbered_name(&wide, 12);
        assert!(numbered.len() <= NAME_MAX);
        assert!(numbered.ends_with(" (12).epub"));
    }

    #[test]
    fn near_limit_name_saved_twice() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());
        let name = format!("{}.pdf", "v".repeat(250));
        let first = sink.save(&name, b"one").unwrap();
        let second = sink.save(&name, b"two").unwrap();
        assert_eq!(first.filename, name);
        assert_ne!(first.path, second.path);
        assert!(second.filename.len() <= NAME_MAX);
        assert!(second.filename.ends_with(" (1).pdf"));
        assert_eq!(std::fs::read(&second.path).unwrap(), b"two");
        assert_eq!(leftover_temp_files(dir.path()), 0);
    }

    #[test]
    fn saves_under_requested_name() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());
        let saved = sink.save("Volume_1.pdf", b"%PDF-1.7").unwrap();
        assert_eq!(saved.filename, "Volume_1.pdf");
        assert_eq!(saved.bytes, 8);
        assert_eq!(std::fs::read(&saved.path).unwrap(), b"%PDF-1.7");
        assert_eq!(leftover_temp_files(dir.path()), 0);
    }

    #[test]
    fn clash_picks_numbered_name() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());
        let first = sink.save("book.epub", b"one").unwrap();
        let second = sink.save("book.epub", b"two").unwrap();
        assert_eq!(first.filename, "book.epub");
        assert_eq!(second.filename, "book (1).epub");
        assert_eq!(std::fs::read(&first.path).unwrap(), b"one");
        assert_eq!(std::fs::read(&second.path).unwrap(), b"two");
        assert_eq!(leftover_temp_files(dir.path()), 0);
    }

    #[test]
    fn overwrite_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path()).with_overwrite(true);
        sink.save("book.zip", b"old").unwrap();
        let saved = sink.save("book.zip", b"new").unwrap();
        assert_eq!(saved.filename, "book.zip");
        assert_eq!(std::fs::read(&saved.path).unwrap(), b"new");
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("books").join("2024");
        let sink = DirectorySink::new(&nested);
        let saved = sink.save("a.pdf", b"x").unwrap();
        assert!(saved.path.starts_with(&nested));
    }
}
