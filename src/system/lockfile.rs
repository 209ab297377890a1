//! PID lockfile guarding a data directory
//!
//! Only one process may append to a link log at a time. The lock is a file
//! holding the owner's PID; a stale file whose process is gone is taken over.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use tracing::{error, info, warn};

use crate::errors::{LinkvaultError, Result};

/// Held lock. The file is removed on drop.
#[derive(Debug)]
pub struct Lockfile {
    path: PathBuf,
}

impl Lockfile {
    pub fn acquire<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if path.exists() {
            match fs::read_to_string(&path)
                .ok()
                .and_then(|s| s.trim().parse::<u32>().ok())
            {
                Some(old_pid) if is_running(old_pid) => {
                    error!(
                        "Data directory is in use by PID {} (lockfile {})",
                        old_pid,
                        path.display()
                    );
                    return Err(LinkvaultError::file_operation(format!(
                        "Data directory is locked by running process {}",
                        old_pid
                    )));
                }
                Some(old_pid) => {
                    info!("Removing stale lockfile left by PID {}", old_pid);
                }
                None => {
                    warn!("Lockfile {} is unreadable, replacing it", path.display());
                }
            }
            let _ = fs::remove_file(&path);
        }

        let pid = process::id();
        fs::write(&path, pid.to_string()).map_err(|e| {
            LinkvaultError::file_operation(format!(
                "Failed to write lockfile {}: {}",
                path.display(),
                e
            ))
        })?;
        info!("Lockfile {} held by PID {}", path.display(), pid);

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Lockfile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            error!("Failed to remove lockfile {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(unix)]
fn is_running(pid: u32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal;
    use nix::unistd::Pid;

    // Our own PID counts as stale: a container restart reuses PID 1
    if pid == process::id() {
        return false;
    }
    // EPERM: the process exists but belongs to someone else
    matches!(
        signal::kill(Pid::from_raw(pid as i32), None),
        Ok(()) | Err(Errno::EPERM)
    )
}

#[cfg(not(unix))]
fn is_running(pid: u32) -> bool {
    // No portable liveness probe; trust the file unless it is ours
    pid != process::id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_acquire_and_release() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("linkvault.pid");

        let lock = Lockfile::acquire(&path).unwrap();
        assert_eq!(
            fs::read_to_string(lock.path()).unwrap(),
            process::id().to_string()
        );
        drop(lock);
        assert!(!path.exists());
    }

    #[test]
    fn test_garbage_lockfile_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("linkvault.pid");
        fs::write(&path, "garbage").unwrap();

        let _lock = Lockfile::acquire(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), process::id().to_string());
    }

    #[cfg(unix)]
    #[test]
    fn test_live_owner_blocks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("linkvault.pid");
        // PID 1 always exists on unix
        fs::write(&path, "1").unwrap();

        if process::id() != 1 {
            let err = Lockfile::acquire(&path).unwrap_err();
            assert!(matches!(err, LinkvaultError::FileOperation(_)));
        }
    }
}
