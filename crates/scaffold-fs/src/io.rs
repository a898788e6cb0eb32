//! Atomic I/O operations with file locking

use backoff::ExponentialBackoff;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Error, NormalizedPath, Result};

/// Tuning for lock acquisition and durability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobustnessConfig {
    /// How long to keep retrying a held lock before giving up.
    pub lock_timeout: Duration,
    /// Flush file contents to disk before the rename.
    pub enable_fsync: bool,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(5),
            enable_fsync: true,
        }
    }
}

/// Sidecar lock file for `path`: `dir/.name.lock`.
fn lock_path(native: &Path) -> PathBuf {
    let name = native
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    native.with_file_name(format!(".{name}.lock"))
}

/// An advisory lock on a file, held until dropped.
///
/// Reads and the final write of a read-merge-write cycle go through the
/// guard so no other scaffold process can interleave. The sidecar file
/// stays in place after release so every process locks the same inode.
#[derive(Debug)]
pub struct LockedFile {
    path: NormalizedPath,
    lock: File,
    config: RobustnessConfig,
}

impl LockedFile {
    /// Acquire the lock, retrying with exponential backoff for up to
    /// `config.lock_timeout`.
    pub fn acquire(path: &NormalizedPath, config: RobustnessConfig) -> Result<Self> {
        let native = path.to_native();
        if let Some(parent) = native.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let lock_path = lock_path(&native);
        let lock = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| Error::io(&lock_path, e))?;

        let policy = ExponentialBackoff {
            initial_interval: Duration::from_millis(10),
            max_interval: Duration::from_millis(250),
            max_elapsed_time: Some(config.lock_timeout),
            ..ExponentialBackoff::default()
        };
        backoff::retry(policy, || {
            lock.try_lock_exclusive().map_err(|e| {
                tracing::debug!(path = %path, error = %e, "lock busy, retrying");
                backoff::Error::transient(e)
            })
        })
        .map_err(|_| Error::LockFailed {
            path: native.clone(),
            timeout: config.lock_timeout,
        })?;

        Ok(Self {
            path: path.clone(),
            lock,
            config,
        })
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Current contents, `None` when the file does not exist yet.
    pub fn read_text(&self) -> Result<Option<String>> {
        let native = self.path.to_native();
        match fs::read_to_string(&native) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(&native, e)),
        }
    }

    /// Replace the file's contents atomically.
    pub fn write(&self, content: &[u8]) -> Result<()> {
        replace_atomic(&self.path.to_native(), content, self.config.enable_fsync)
    }
}

impl Drop for LockedFile {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.lock);
    }
}

/// Write-to-temp-then-rename in the target's directory.
fn replace_atomic(native: &Path, content: &[u8], fsync: bool) -> Result<()> {
    let temp_name = format!(
        ".{}.{}.tmp",
        native
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native.with_file_name(&temp_name);

    let result = (|| {
        let mut temp_file = File::create(&temp_path).map_err(|e| Error::io(&temp_path, e))?;
        temp_file
            .write_all(content)
            .map_err(|e| Error::io(&temp_path, e))?;
        if fsync {
            temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;
        }
        fs::rename(&temp_path, native).map_err(|e| Error::io(native, e))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers never see a partial file.
pub fn write_atomic(path: &NormalizedPath, content: &[u8], config: RobustnessConfig) -> Result<()> {
    LockedFile::acquire(path, config)?.write(content)
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}
