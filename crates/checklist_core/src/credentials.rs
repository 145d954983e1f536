//! Where the serialized [`TokenRecord`](crate::session::TokenRecord) lives
//! between runs. Stores hold raw text; validity is the guard's call.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("credential file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("credential store lock poisoned")]
    Poisoned,
}

pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, CredentialStoreError>;
    fn save(&self, record: &str) -> Result<(), CredentialStoreError>;
    fn clear(&self) -> Result<(), CredentialStoreError>;
}

/// Single JSON file, readable by the owner only on Unix.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> CredentialStoreError {
        CredentialStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.io_error(err)),
        }
    }

    fn save(&self, record: &str) -> Result<(), CredentialStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        fs::write(&self.path, record).map_err(|err| self.io_error(err))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(|err| self.io_error(err))?;
        }

        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    record: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Mutex::new(Some(record.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialStoreError> {
        let guard = self
            .record
            .lock()
            .map_err(|_| CredentialStoreError::Poisoned)?;
        Ok(guard.clone())
    }

    fn save(&self, record: &str) -> Result<(), CredentialStoreError> {
        let mut guard = self
            .record
            .lock()
            .map_err(|_| CredentialStoreError::Poisoned)?;
        *guard = Some(record.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        let mut guard = self
            .record
            .lock()
            .map_err(|_| CredentialStoreError::Poisoned)?;
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/credentials_tests.rs"]
mod tests;
