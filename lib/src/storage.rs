//! Key-value storages backing the [`Cache`](crate::cache::Cache)

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::sync::RwLock;

use crate::Error;

/// A persistent, string based, key-value store
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Reads the value stored under `key`, `None` when missing.
    async fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), Error>;

    /// Removes the value stored under `key`, doing nothing when missing.
    async fn remove(&self, key: &str) -> Result<(), Error>;
}

#[async_trait::async_trait]
impl<S: Storage + ?Sized> Storage for std::sync::Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.as_ref().get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), Error> {
        self.as_ref().set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        self.as_ref().remove(key).await
    }
}

/// Storage living in memory, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), Error> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

/// Storage keeping one file per key in a directory
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Creates the storage, the directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File of a key: ascii alphanumerics, `-` and `.` are kept, any other byte is written as
    /// `_` followed by its hex value, so distinct keys never share a file.
    fn path(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            match byte {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'.' => name.push(char::from(byte)),
                _ => {
                    name.push('_');
                    name.push_str(&hex::encode([byte]));
                }
            }
        }
        self.root.join(format!("{name}.json"))
    }
}

#[async_trait::async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        match tokio::fs::read_to_string(self.path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), Error> {
        tokio::fs::create_dir_all(&self.root).await?;
        let target = self.path(key);
        let tmp = target.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &target).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        match tokio::fs::remove_file(self.path(key)).await {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}
