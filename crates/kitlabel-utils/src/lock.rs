//! Advisory lock over the cart state directory
//!
//! A CLI invocation that mutates the persisted cart does a read-modify-write
//! cycle. Two concurrent invocations would otherwise both read the same
//! snapshot and the last writer would silently drop the other's change.
//! The lock is advisory and coordinates kitlabel processes only.

use camino::Utf8Path;
use fd_lock::RwLock;
use std::fs::{self, OpenOptions};

use crate::error::PersistenceError;

/// Lock file name inside the state directory
pub const LOCK_FILE_NAME: &str = "cart.lock";

/// Run `f` while holding an exclusive lock on `<state_dir>/cart.lock`.
///
/// Fails immediately with [`PersistenceError::Locked`] if another process
/// holds the lock.
pub fn with_state_lock<T, E>(
    state_dir: &Utf8Path,
    f: impl FnOnce() -> Result<T, E>,
) -> Result<T, E>
where
    E: From<PersistenceError>,
{
    let lock_path = state_dir.join(LOCK_FILE_NAME);

    fs::create_dir_all(state_dir).map_err(|e| PersistenceError::Write {
        path: state_dir.to_string(),
        reason: e.to_string(),
    })?;

    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .map_err(|e| PersistenceError::Write {
            path: lock_path.to_string(),
            reason: e.to_string(),
        })?;

    let mut lock = RwLock::new(file);
    let _guard = lock.try_write().map_err(|_| PersistenceError::Locked {
        path: lock_path.to_string(),
    })?;

    tracing::debug!(path = %lock_path, "Acquired cart state lock");
    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_lock_runs_closure_and_creates_lock_file() {
        let dir = TempDir::new().unwrap();
        let state = Utf8PathBuf::from_path_buf(dir.path().join("state")).unwrap();

        let value: Result<u32, PersistenceError> = with_state_lock(&state, || Ok(42));

        assert_eq!(value.unwrap(), 42);
        assert!(state.join(LOCK_FILE_NAME).exists());
    }

    #[test]
    fn test_lock_is_released_after_closure() {
        let dir = TempDir::new().unwrap();
        let state = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        let first: Result<(), PersistenceError> = with_state_lock(&state, || Ok(()));
        let second: Result<(), PersistenceError> = with_state_lock(&state, || Ok(()));

        assert!(first.is_ok());
        assert!(second.is_ok());
    }
}
