//! Allocator counter file
//!
//! Holds a single decimal integer: the next value the allocator will hand
//! out. Every save replaces the file atomically (temp file, fsync, rename).

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::{LinkvaultError, Result};

pub struct CounterFile {
    path: PathBuf,
}

impl CounterFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the stored value. A missing file means nothing was ever
    /// allocated and yields `0`.
    pub fn load(&self) -> Result<u64> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No counter file at {}, starting from 0", self.path.display());
                return Ok(0);
            }
            Err(e) => {
                return Err(LinkvaultError::file_operation(format!(
                    "Failed to read counter file {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        content.trim().parse::<u64>().map_err(|e| {
            LinkvaultError::corrupt_state(format!(
                "Counter file {} does not hold a counter ({:?}): {}",
                self.path.display(),
                content.trim(),
                e
            ))
        })
    }

    /// Replace the stored value.
    pub fn save(&self, value: u64) -> Result<()> {
        self.write_atomic(value).map_err(|e| {
            LinkvaultError::persistence(format!(
                "Failed to save counter to {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn write_atomic(&self, value: u64) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("tmp");

        let mut file = File::create(&temp_path)?;
        writeln!(file, "{}", value)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &self.path)
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
    fn test_missing_file_is_zero() {
        let dir = TempDir::new().unwrap();
        let counter = CounterFile::new(dir.path().join("counter"));
        assert_eq!(counter.load().unwrap(), 0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let counter = CounterFile::new(dir.path().join("counter"));

        counter.save(42).unwrap();
        assert_eq!(counter.load().unwrap(), 42);
        counter.save(u64::MAX).unwrap();
        assert_eq!(counter.load().unwrap(), u64::MAX);

        assert_eq!(
            fs::read_to_string(counter.path()).unwrap(),
            format!("{}\n", u64::MAX)
        );
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let counter = CounterFile::new(dir.path().join("counter"));
        counter.save(7).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("counter")]);
    }

    #[test]
    fn test_stale_temp_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let counter = CounterFile::new(dir.path().join("counter"));
        counter.save(5).unwrap();
        // A crash between create and rename leaves only the temp file behind
        fs::write(dir.path().join("counter.tmp"), "99").unwrap();

        assert_eq!(counter.load().unwrap(), 5);
        counter.save(6).unwrap();
        assert_eq!(counter.load().unwrap(), 6);
    }

    #[test]
    fn test_corrupt_counter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("counter");
        fs::write(&path, "not-a-number").unwrap();

        let err = CounterFile::new(&path).load().unwrap_err();
        assert!(matches!(err, LinkvaultError::CorruptState(_)));
    }

    #[test]
    fn test_negative_counter_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("counter");
        fs::write(&path, "-1\n").unwrap();

        let err = CounterFile::new(&path).load().unwrap_err();
        assert!(matches!(err, LinkvaultError::CorruptState(_)));
    }
}
