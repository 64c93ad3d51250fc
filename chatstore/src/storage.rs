use std::{
    collections::HashMap,
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use crate::StorageError;

/// Key holding the serialized room mapping
pub const ROOMS_KEY: &str = "rooms";
/// Key holding the last used display name
pub const USERNAME_KEY: &str = "username";
/// Key holding the theme preference
pub const THEME_KEY: &str = "theme";

/// String key-value storage with local storage semantics.
/// Reads of a missing key return `None`, writes replace the whole value.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Stores each key as a file inside a data directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens the storage at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        Ok(FileStorage { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp_path = self.dir.join(format!(".{key}.tmp"));

        // write aside and rename, readers only ever see a complete value
        fs::write(&tmp_path, value)
            .and_then(|_| fs::rename(&tmp_path, &path))
            .map_err(|source| StorageError::Write {
                key: key.to_string(),
                source,
            })
    }
}

/// In-process storage, nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());

        Ok(())
    }
}

/// Storage that serves seeded values but rejects every write
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ReadOnlyStorage {
    items: MemoryStorage,
}

#[cfg(test)]
impl ReadOnlyStorage {
    pub(crate) fn with_item(key: &str, value: &str) -> Self {
        let mut items = MemoryStorage::new();
        items.items.insert(key.to_string(), value.to_string());

        ReadOnlyStorage { items }
    }
}

#[cfg(test)]
impl Storage for ReadOnlyStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.items.get_item(key)
    }

    fn set_item(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write {
            key: key.to_string(),
            source: io::Error::new(ErrorKind::PermissionDenied, "storage is read-only"),
        })
    }
}
