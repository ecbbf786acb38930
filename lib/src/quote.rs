//! Inspirational quotes published as pictures in a remote folder

use std::time::Duration;

use chrono::NaiveDate;
use rand::Rng;

use crate::cache::{Cache, DEFAULT_TTL};
use crate::storage::Storage;
use crate::walker::is_image;
use crate::{Client, Error};

/// Storage key of the quote pictures
pub const CACHE_KEY: &str = "github-quote-images";
/// Storage key of the quote of the day
pub const QUOTE_KEY: &str = "quote-of-the-day";
/// Storage key of the day the quote was picked
pub const QUOTE_DATE_KEY: &str = "quote-date";
/// Remote folder holding the quote pictures
pub const DEFAULT_FOLDER: &str = "src/assets/Quotations";

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PhotoQuote {
    pub src: String,
    pub alt: String,
}

impl PhotoQuote {
    /// Quote displayed when no picture is available
    pub fn placeholder() -> Self {
        Self {
            src: "/placeholder.svg".into(),
            alt: "No quote available".into(),
        }
    }
}

pub struct Quotes<S> {
    client: Client,
    cache: Cache<S>,
    cache_key: String,
    folder: String,
    ttl: Duration,
}

impl<S: Storage> Quotes<S> {
    pub fn new(client: Client, cache: Cache<S>) -> Self {
        Self {
            client,
            cache,
            cache_key: CACHE_KEY.to_string(),
            folder: DEFAULT_FOLDER.to_string(),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    /// Storage key of the cached payload, distinct consumers must use distinct keys
    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = key.into();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    async fn fetch(&self) -> Result<Vec<String>, Error> {
        let entries = self.client.list_contents(&self.folder).await?;
        Ok(entries
            .into_iter()
            .filter_map(|entry| entry.as_file().cloned())
            .filter(|file| is_image(&file.name))
            .filter_map(|file| file.download_url)
            .collect())
    }

    /// Download urls of all the quote pictures
    pub async fn images(&self) -> Vec<String> {
        self.cache.get(&self.cache_key, self.ttl, || self.fetch()).await
    }

    async fn stored_value(&self, key: &str) -> Option<String> {
        match self.cache.storage().get(key).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("unable to read {key:?}: {err}");
                None
            }
        }
    }

    async fn stored_quote(&self, today: NaiveDate) -> Option<PhotoQuote> {
        let date = self.stored_value(QUOTE_DATE_KEY).await?;
        if date != today.to_string() {
            return None;
        }
        let raw = self.stored_value(QUOTE_KEY).await?;
        match serde_json::from_str(&raw) {
            Ok(quote) => Some(quote),
            Err(err) => {
                tracing::warn!("ignoring corrupted quote of the day: {err}");
                None
            }
        }
    }

    async fn store_quote(&self, quote: &PhotoQuote, today: NaiveDate) -> Result<(), Error> {
        let storage = self.cache.storage();
        storage.set(QUOTE_KEY, serde_json::to_string(quote)?).await?;
        storage.set(QUOTE_DATE_KEY, today.to_string()).await
    }

    /// Picks a new random quote and keeps it as the quote of `today`.
    pub async fn random_quote(&self, today: NaiveDate) -> PhotoQuote {
        let images = self.images().await;
        if images.is_empty() {
            return PhotoQuote::placeholder();
        }
        let index = rand::thread_rng().gen_range(0..images.len());
        let quote = PhotoQuote {
            src: images[index].clone(),
            alt: format!("Inspirational quote {}", index + 1),
        };
        if let Err(err) = self.store_quote(&quote, today).await {
            tracing::warn!("unable to store quote of the day: {err}");
        }
        quote
    }

    /// The quote picked for `today`, picking one when none was picked yet.
    pub async fn quote_of_the_day(&self, today: NaiveDate) -> PhotoQuote {
        if let Some(quote) = self.stored_quote(today).await {
            return quote;
        }
        self.random_quote(today).await
    }
}
