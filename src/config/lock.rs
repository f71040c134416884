//! config::lock
//!
//! Inter-process lock guarding the configuration file.
//!
//! Every read-modify-write of `atr.yaml` happens while holding an exclusive
//! OS-level lock on a sibling `atr.yaml.lock` file. Acquisition polls until a
//! timeout so that a stuck process produces an error rather than a hang.
//!
//! # Example
//!
//! ```ignore
//! use atrclient::config::{ConfigLock, DEFAULT_LOCK_TIMEOUT};
//!
//! let lock = ConfigLock::acquire(&lock_path, DEFAULT_LOCK_TIMEOUT)?;
//! // ... read and write the configuration ...
//! // lock released on drop
//! ```

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use fs2::FileExt;

use super::ConfigError;

/// Default timeout for lock acquisition (10 seconds).
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(10);

/// Polling interval when waiting for lock (50ms).
const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// An exclusive lock on the configuration file.
///
/// The lock is released when this guard is dropped.
#[derive(Debug)]
pub struct ConfigLock {
    path: PathBuf,
    file: Option<File>,
}

impl ConfigLock {
    /// Acquire the lock at `path`, blocking up to `timeout`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::LockTimeout`] if another process holds the lock past
    ///   the timeout
    /// - [`ConfigError::Lock`] on I/O failure
    pub fn acquire(path: &Path, timeout: Duration) -> Result<Self, ConfigError> {
        let deadline = Instant::now() + timeout;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    ConfigError::Lock(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
        }

        loop {
            if let Some(lock) = Self::try_acquire(path)? {
                tracing::debug!(path = %path.display(), "acquired config lock");
                return Ok(lock);
            }
            if Instant::now() >= deadline {
                return Err(ConfigError::LockTimeout(path.to_path_buf()));
            }
            thread::sleep(LOCK_POLL_INTERVAL);
        }
    }

    /// Try to acquire the lock without blocking.
    ///
    /// Returns `Ok(None)` if another holder has it.
    pub fn try_acquire(path: &Path) -> Result<Option<Self>, ConfigError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| ConfigError::Lock(format!("cannot open {}: {}", path.display(), e)))?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self {
                path: path.to_path_buf(),
                file: Some(file),
            })),
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => Ok(None),
            Err(e) => Err(ConfigError::Lock(format!("lock failed: {}", e))),
        }
    }

    /// Path of the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ConfigLock {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = file.unlock();
        }
    }
}
