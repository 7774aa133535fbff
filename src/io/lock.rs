use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Advisory file lock serializing writes to the eisen directory.
///
/// The store assumes a single writer; the lock makes that hold when two
/// invocations race on the same directory (last-write-wins otherwise).
pub struct StoreLock {
    _file: File,
    path: PathBuf,
}

/// Error type for lock operations
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not create lock file at {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not lock {path}: another eisen process may be writing")]
    Timeout { path: PathBuf },
}

impl StoreLock {
    /// Acquire an exclusive lock on the store directory, waiting up to
    /// `timeout` for a concurrent holder to release it.
    pub fn acquire(dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let path = dir.join(".lock");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| LockError::Create {
                path: path.clone(),
                source: e,
            })?;

        let start = Instant::now();
        while try_lock(&file).is_err() {
            if start.elapsed() >= timeout {
                return Err(LockError::Timeout { path });
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        Ok(StoreLock { _file: file, path })
    }

    /// Acquire with the default 2 second timeout
    pub fn acquire_default(dir: &Path) -> Result<Self, LockError> {
        Self::acquire(dir, Duration::from_secs(2))
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        // flock releases with the fd; the file itself is just tidy-up
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(unix)]
fn try_lock(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    if unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) } == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_lock(_file: &File) -> Result<(), std::io::Error> {
    // No advisory locking on non-Unix platforms
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn acquire_release_reacquire() {
        let tmp = TempDir::new().unwrap();
        let lock = StoreLock::acquire_default(tmp.path());
        assert!(lock.is_ok());
        drop(lock);
        assert!(StoreLock::acquire_default(tmp.path()).is_ok());
    }

    #[test]
    fn contention_times_out() {
        let tmp = TempDir::new().unwrap();
        let _held = StoreLock::acquire_default(tmp.path()).unwrap();
        let second = StoreLock::acquire(tmp.path(), Duration::from_millis(50));
        assert!(second.is_err());
    }
}
