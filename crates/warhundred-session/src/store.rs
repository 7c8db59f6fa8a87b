//! Credential storage: where the bearer token lives between requests.
//!
//! The client persists exactly one value, the token returned by
//! `POST /login`, under the fixed key [`TOKEN_KEY`]. Storage failures are
//! logged and swallowed: there is nothing the player could do about a
//! read-only disk, and the worst case is having to log in again.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use warhundred_protocol::{Codec, JsonCodec};

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "jwt_token";

/// Persists the bearer token.
///
/// Methods are synchronous and infallible on purpose: the logout protocol
/// relies on `clear()` having taken effect by the time it returns.
pub trait CredentialStore: Send + Sync + 'static {
    /// Returns the stored token, if any.
    fn get(&self) -> Option<String>;

    /// Stores `token`, overwriting any previous value.
    fn set(&self, token: &str);

    /// Removes the token. Clearing an empty store is a no-op.
    fn clear(&self);
}

// ---------------------------------------------------------------------------
// MemoryCredentialStore
// ---------------------------------------------------------------------------

/// Keeps the token in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`, e.g. restored from elsewhere.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<String> {
        // A poisoned lock only means another thread panicked mid-write of
        // an `Option<String>`; the value itself is still coherent.
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: &str) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    fn clear(&self) {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

// ---------------------------------------------------------------------------
// FileCredentialStore
// ---------------------------------------------------------------------------

/// On-disk layout: `{"jwt_token": "..."}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredCredentials {
    #[serde(rename = "jwt_token", default)]
    token: Option<String>,
}

/// Keeps the token in a small JSON file so it survives restarts.
///
/// A missing or unreadable file reads as "no token".
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
    codec: JsonCodec,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            codec: JsonCodec,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<file>.tmp` in the same directory, so the rename stays on one
    /// filesystem.
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<String> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "credential file unreadable");
                return None;
            }
        };
        match self.codec.decode::<StoredCredentials>(&bytes) {
            Ok(stored) => stored.token,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "credential file corrupt, ignoring");
                None
            }
        }
    }

    fn set(&self, token: &str) {
        let stored = StoredCredentials {
            token: Some(token.to_string()),
        };
        let bytes = match self.codec.encode(&stored) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode credentials");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "cannot create credential directory");
                return;
            }
        }
        // Write beside the target and rename over it, so a crash mid-write
        // never leaves a truncated file behind.
        let staging = self.staging_path();
        let written = std::fs::write(&staging, bytes)
            .and_then(|()| std::fs::rename(&staging, &self.path));
        if let Err(e) = written {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist token");
            let _ = std::fs::remove_file(&staging);
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove token");
            }
        }
    }
}
