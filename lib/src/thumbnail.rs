//! Movie posters stored in a single remote folder

use std::time::Duration;

use crate::cache::{Cache, DEFAULT_TTL};
use crate::storage::Storage;
use crate::walker::{is_image, ImageMap};
use crate::{Client, Error};

/// Storage key of the thumbnails
pub const CACHE_KEY: &str = "github-movie-thumbnails";
/// Remote folder holding the thumbnails
pub const DEFAULT_FOLDER: &str = "src/assets/thumbnails";
/// Poster displayed when no thumbnail matches
pub const PLACEHOLDER: &str = "https://via.placeholder.com/300x450/1a1a1a/ffffff?text=Movie+Poster";

/// Extracts the file name of a thumbnail path or url
///
/// ```
/// use gallery::thumbnail::extract_filename;
///
/// assert_eq!(extract_filename("/assets/thumbnails/Dr_dolittle_two_ver2.jpg"), "Dr_dolittle_two_ver2.jpg");
/// assert_eq!(extract_filename("poster.png"), "poster.png");
/// ```
pub fn extract_filename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub struct Thumbnails<S> {
    client: Client,
    cache: Cache<S>,
    cache_key: String,
    folder: String,
    ttl: Duration,
}

impl<S: Storage> Thumbnails<S> {
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

    async fn fetch(&self) -> Result<ImageMap, Error> {
        let entries = self.client.list_contents(&self.folder).await?;
        Ok(entries
            .into_iter()
            .filter_map(|entry| entry.as_file().cloned())
            .filter(|file| is_image(&file.name))
            .filter_map(|file| file.download_url.map(|url| (file.name, url)))
            .collect())
    }

    /// All the thumbnails, indexed by file name
    pub async fn all(&self) -> ImageMap {
        self.cache.get(&self.cache_key, self.ttl, || self.fetch()).await
    }

    /// Url of the thumbnail with the given file name, or the [`PLACEHOLDER`]
    pub async fn url(&self, filename: &str) -> String {
        self.all()
            .await
            .remove(filename)
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }
}
