//! Append-only link log
//!
//! One headerless CSV row (`id,target`) per record. Rows are only ever
//! appended; startup replays the whole file into memory.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::{debug, info};

use super::LinkRecord;
use crate::errors::{LinkvaultError, Result};

pub struct LinkLog {
    path: PathBuf,
}

impl LinkLog {
    /// Open the log at `path`, replaying every record.
    ///
    /// A missing file is created empty so later appends have a target.
    /// Any row that cannot be decoded aborts with `CorruptState`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<(Self, HashMap<String, String>)> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).map_err(|e| {
                    LinkvaultError::file_operation(format!(
                        "Failed to create data directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
            File::create(&path).map_err(|e| {
                LinkvaultError::file_operation(format!(
                    "Failed to create link log {}: {}",
                    path.display(),
                    e
                ))
            })?;
            info!("Created empty link log: {}", path.display());
            return Ok((Self { path }, HashMap::new()));
        }

        let links = Self::read_all(&path)?;
        info!("Loaded {} links from {}", links.len(), path.display());
        Ok((Self { path }, links))
    }

    fn read_all(path: &Path) -> Result<HashMap<String, String>> {
        let file = File::open(path).map_err(|e| {
            LinkvaultError::file_operation(format!(
                "Failed to open link log {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_reader(BufReader::new(file));

        let mut links = HashMap::new();
        for (idx, row) in reader.deserialize::<LinkRecord>().enumerate() {
            let record = row.map_err(|e| {
                LinkvaultError::corrupt_state(format!(
                    "Link log {} row {}: {}",
                    path.display(),
                    idx + 1,
                    e
                ))
            })?;

            if record.id.is_empty() {
                return Err(LinkvaultError::corrupt_state(format!(
                    "Link log {} row {}: empty id",
                    path.display(),
                    idx + 1
                )));
            }

            if links.insert(record.id.clone(), record.target).is_some() {
                debug!("Duplicate id in link log, keeping later row: {}", record.id);
            }
        }

        Ok(links)
    }

    /// Durably append one record. Prior content is never rewritten.
    pub fn append(&self, record: &LinkRecord) -> Result<()> {
        let mut row = WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        row.serialize(record)
            .map_err(|e| LinkvaultError::persistence(format!("Failed to encode record: {}", e)))?;
        let bytes = row
            .into_inner()
            .map_err(|e| LinkvaultError::persistence(format!("Failed to encode record: {}", e)))?;

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                LinkvaultError::persistence(format!(
                    "Failed to open link log {}: {}",
                    self.path.display(),
                    e
                ))
            })?;

        // Single write so a record is never interleaved with another
        file.write_all(&bytes)
            .and_then(|_| file.sync_data())
            .map_err(|e| {
                LinkvaultError::persistence(format!(
                    "Failed to append to link log {}: {}",
                    self.path.display(),
                    e
                ))
            })?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("links.csv");

        let (log, links) = LinkLog::open(&path).unwrap();
        assert!(links.is_empty());
        assert!(log.path().exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_append_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("links.csv");

        let (log, _) = LinkLog::open(&path).unwrap();
        log.append(&LinkRecord::new("0", "https://example.com"))
            .unwrap();
        log.append(&LinkRecord::new("q", "https://example.com/a,b?x=\"y\""))
            .unwrap();

        let (_, links) = LinkLog::open(&path).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links["0"], "https://example.com");
        assert_eq!(links["q"], "https://example.com/a,b?x=\"y\"");
    }

    #[test]
    fn test_append_does_not_rewrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("links.csv");

        let (log, _) = LinkLog::open(&path).unwrap();
        log.append(&LinkRecord::new("a", "https://a.example"))
            .unwrap();
        let before = fs::read_to_string(&path).unwrap();
        log.append(&LinkRecord::new("b", "https://b.example"))
            .unwrap();
        let after = fs::read_to_string(&path).unwrap();

        assert!(after.starts_with(&before));
        assert_eq!(after.lines().count(), 2);
    }

    #[test]
    fn test_reads_unquoted_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("links.csv");
        fs::write(&path, "abc,https://example.com\ncustom,https://example.org\n").unwrap();

        let (_, links) = LinkLog::open(&path).unwrap();
        assert_eq!(links["abc"], "https://example.com");
        assert_eq!(links["custom"], "https://example.org");
    }

    #[test]
    fn test_duplicate_rows_last_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("links.csv");
        fs::write(&path, "x,https://old.example\nx,https://new.example\n").unwrap();

        let (_, links) = LinkLog::open(&path).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links["x"], "https://new.example");
    }

    #[test]
    fn test_corrupt_row_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("links.csv");
        fs::write(&path, "ok,https://example.com\nbroken-row-with-one-field\n").unwrap();

        let err = LinkLog::open(&path).err().unwrap();
        assert!(matches!(err, LinkvaultError::CorruptState(_)));
    }

    #[test]
    fn test_empty_id_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("links.csv");
        fs::write(&path, ",https://example.com\n").unwrap();

        let err = LinkLog::open(&path).err().unwrap();
        assert!(matches!(err, LinkvaultError::CorruptState(_)));
    }

    #[test]
    fn test_append_to_removed_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("links.csv");

        let (log, _) = LinkLog::open(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let err = log
            .append(&LinkRecord::new("a", "https://a.example"))
            .unwrap_err();
        assert!(matches!(err, LinkvaultError::Persistence(_)));
    }
}
