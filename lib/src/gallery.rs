//! Photo gallery backed by a remote directory tree

use std::time::Duration;

use rand::seq::SliceRandom;

use crate::cache::{Cache, DEFAULT_TTL};
use crate::storage::Storage;
use crate::tree::{FolderNode, FolderOption, ROOT_VALUE};
use crate::walker::{ImageMap, Walker, DEFAULT_MAX_CONCURRENCY, IMAGE_EXTENSIONS};
use crate::Client;

/// Storage key of the gallery images
pub const CACHE_KEY: &str = "github-gallery-images";
/// Remote folder holding the gallery
pub const DEFAULT_FOLDER: &str = "src/assets/Gallery";

/// A picture of the gallery, ready to be displayed
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct Photo {
    pub id: String,
    pub src: String,
    pub alt: String,
    /// Name of the folder directly containing the picture, `Root` at the top level
    pub folder: String,
    pub folder_path: String,
    /// Name of the top level folder, `General` at the top level
    pub category: String,
}

fn strip_image_extension(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if IMAGE_EXTENSIONS.iter().any(|i| ext.eq_ignore_ascii_case(i)) => stem,
        _ => filename,
    }
}

impl Photo {
    fn new(index: usize, path: &str, src: &str) -> Self {
        let (folder_path, filename) = path.rsplit_once('/').unwrap_or(("", path));
        let folder = folder_path.rsplit('/').next().filter(|v| !v.is_empty());
        let category = folder_path.split('/').next().filter(|v| !v.is_empty());
        Self {
            id: format!("photo-{index}-{filename}"),
            src: src.to_string(),
            alt: strip_image_extension(filename).replace(['-', '_'], " "),
            folder: folder.unwrap_or("Root").to_string(),
            folder_path: folder_path.to_string(),
            category: category.unwrap_or("General").to_string(),
        }
    }
}

/// Whether the image path belongs to the folder selected with `filter`
pub fn matches_filter(path: &str, filter: &str) -> bool {
    if filter.is_empty() || filter == ROOT_VALUE {
        return true;
    }
    path.strip_prefix(filter)
        .map(|rest| rest.starts_with('/'))
        .unwrap_or(false)
}

/// Builds the photos of the folder selected with `filter`, `all` selecting everything.
pub fn photos(images: &ImageMap, filter: &str) -> Vec<Photo> {
    images
        .iter()
        .filter(|(path, _)| matches_filter(path, filter))
        .enumerate()
        .map(|(index, (path, src))| Photo::new(index, path, src))
        .collect()
}

/// Shuffles the items in place, for a random display order
pub fn shuffle<T>(items: &mut [T]) {
    items.shuffle(&mut rand::thread_rng());
}

pub struct Gallery<S> {
    client: Client,
    cache: Cache<S>,
    cache_key: String,
    folder: String,
    ttl: Duration,
    max_concurrency: usize,
}

impl<S: Storage> Gallery<S> {
    pub fn new(client: Client, cache: Cache<S>) -> Self {
        Self {
            client,
            cache,
            cache_key: CACHE_KEY.to_string(),
            folder: DEFAULT_FOLDER.to_string(),
            ttl: DEFAULT_TTL,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
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

    pub fn with_max_concurrency(mut self, value: usize) -> Self {
        self.max_concurrency = value;
        self
    }

    pub fn cache(&self) -> &Cache<S> {
        &self.cache
    }

    /// All the images of the gallery, served from the cache when fresh
    pub async fn images(&self) -> ImageMap {
        let walker =
            Walker::new(&self.client, self.folder.as_str()).with_max_concurrency(self.max_concurrency);
        self.cache
            .get(&self.cache_key, self.ttl, || walker.try_walk(&self.folder))
            .await
    }

    pub async fn folders(&self) -> FolderNode {
        FolderNode::build(self.images().await.keys())
    }

    pub async fn folder_options(&self) -> Vec<FolderOption> {
        self.folders().await.flatten()
    }

    pub async fn photos(&self, filter: &str) -> Vec<Photo> {
        photos(&self.images().await, filter)
    }
}
