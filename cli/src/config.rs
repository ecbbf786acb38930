use gallery::builder::ClientBuilder;
use gallery::cache::Cache;
use gallery::storage::FileStorage;
use gallery::{Client, Credentials};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    base_url: Option<String>,
    /// Repository in the `owner/name` form
    repository: Option<String>,
    reference: Option<String>,
    token: Option<String>,
    /// Request timeout, in seconds
    timeout: Option<u64>,
    cache_dir: Option<PathBuf>,
    /// Oldest cached payload served when the API is unreachable, in seconds
    max_staleness: Option<u64>,
}

impl Config {
    pub(crate) fn from_path(path: &Path) -> anyhow::Result<Self> {
        let reader = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads the config file when provided, or the default one when it exists
    pub(crate) fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::from_path(path);
        }
        match default_path() {
            Some(path) if path.exists() => {
                tracing::debug!("loading config from {path:?}");
                Self::from_path(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    fn client(&self) -> anyhow::Result<Client> {
        let mut builder = ClientBuilder::from_env();
        if let Some(ref base_url) = self.base_url {
            builder.set_base_url(base_url.clone());
        }
        if let Some(ref repository) = self.repository {
            builder.set_repository_path(repository)?;
        }
        if let Some(ref reference) = self.reference {
            builder.set_reference(reference.clone());
        }
        if let Some(ref token) = self.token {
            builder.set_credentials(Credentials::token(token.clone()));
        }
        if let Some(timeout) = self.timeout.map(Duration::from_secs) {
            builder.set_timeout(timeout);
        }
        Ok(builder.build()?)
    }

    pub(crate) fn build(self, cache_dir: Option<PathBuf>) -> anyhow::Result<Context> {
        let client = self.client()?;
        let cache_dir = cache_dir
            .or(self.cache_dir)
            .or_else(|| dirs::cache_dir().map(|dir| dir.join("gallery")))
            .ok_or_else(|| anyhow::anyhow!("unable to find a cache directory"))?;
        Ok(Context {
            client,
            storage: Arc::new(FileStorage::new(cache_dir)),
            max_staleness: self.max_staleness.map(Duration::from_secs),
        })
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gallery").join("config.json"))
}

pub(crate) struct Context {
    pub(crate) client: Client,
    storage: Arc<FileStorage>,
    max_staleness: Option<Duration>,
}

impl Context {
    pub(crate) fn cache(&self) -> Cache<Arc<FileStorage>> {
        let cache = Cache::new(self.storage.clone());
        match self.max_staleness {
            Some(value) => cache.with_max_staleness(value),
            None => cache,
        }
    }

    pub(crate) fn cache_dir(&self) -> &Path {
        self.storage.root()
    }
}
