//! Time based cache on top of a [`Storage`]
//!
//! Every key holds a single [`CacheRecord`], serialized as
//! `{"payload": ..., "timestamp": <epoch millis>}`. A record is fresh while it is younger than
//! the requested time-to-live. Stale records are kept around and served when refreshing fails.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::storage::Storage;
use crate::Error;

/// Time-to-live used by all the built-in consumers
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

fn now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CacheRecord<T> {
    pub payload: T,
    /// Time of the fetch, in milliseconds since epoch
    pub timestamp: i64,
}

impl<T> CacheRecord<T> {
    /// Age of the record at `now`, zero for records from the future
    pub fn age(&self, now: i64) -> Duration {
        Duration::from_millis(now.saturating_sub(self.timestamp).max(0) as u64)
    }

    pub fn is_fresh(&self, now: i64, ttl: Duration) -> bool {
        self.age(now) < ttl
    }
}

#[derive(Debug)]
pub struct Cache<S> {
    storage: S,
    max_staleness: Option<Duration>,
}

impl<S: Storage> Cache<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            max_staleness: None,
        }
    }

    /// Records older than `value` are no longer served as a fallback.
    pub fn set_max_staleness(&mut self, value: Duration) {
        self.max_staleness = Some(value);
    }

    pub fn with_max_staleness(mut self, value: Duration) -> Self {
        self.set_max_staleness(value);
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the record stored under `key`, whatever its age.
    ///
    /// Missing, unreadable and corrupted records are all reported as `None`.
    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<CacheRecord<T>> {
        let raw = match self.storage.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!("unable to read cache {key:?}: {err}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!("ignoring corrupted cache {key:?}: {err}");
                None
            }
        }
    }

    /// Reads the payload stored under `key` when younger than `ttl`.
    pub async fn read_if_fresh<T: DeserializeOwned>(&self, key: &str, ttl: Duration) -> Option<T> {
        self.read::<T>(key)
            .await
            .filter(|record| record.is_fresh(now(), ttl))
            .map(|record| record.payload)
    }

    /// Stores `payload` under `key`, stamped with the current time.
    pub async fn write<T: Serialize + Sync>(&self, key: &str, payload: &T) -> Result<(), Error> {
        let value = serde_json::to_string(&CacheRecord {
            payload,
            timestamp: now(),
        })?;
        self.storage.set(key, value).await
    }

    fn fallback<T: Default>(&self, key: &str, record: Option<CacheRecord<T>>) -> T {
        match record {
            Some(record) => match self.max_staleness {
                Some(max) if record.age(now()) > max => {
                    tracing::warn!("cache {key:?} is too old to be used as fallback");
                    T::default()
                }
                _ => {
                    tracing::debug!("serving stale cache {key:?}");
                    record.payload
                }
            },
            None => T::default(),
        }
    }

    /// Returns the fresh payload stored under `key` or refreshes it with `fetcher`.
    ///
    /// When `fetcher` fails, the stored payload is returned whatever its age (bounded by the
    /// max staleness when configured), and `T::default()` when nothing is stored.
    pub async fn get<T, F, Fut, E>(&self, key: &str, ttl: Duration, fetcher: F) -> T
    where
        T: Serialize + DeserializeOwned + Default + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        if let Some(payload) = self.read_if_fresh(key, ttl).await {
            tracing::debug!("cache hit for {key:?}");
            return payload;
        }
        tracing::debug!("cache miss for {key:?}");
        match fetcher().await {
            Ok(payload) => {
                if let Err(err) = self.write(key, &payload).await {
                    tracing::warn!("unable to write cache {key:?}: {err}");
                }
                payload
            }
            Err(err) => {
                tracing::warn!("unable to refresh cache {key:?}: {err}");
                let record = self.read(key).await;
                self.fallback(key, record)
            }
        }
    }
}
