//! Client for image galleries published through a repository contents API.
//!
//! The crate walks remote directory trees, caches what it finds in a
//! pluggable key-value [`storage::Storage`], and turns the cached paths into
//! folder trees ready to be displayed.

use std::borrow::Cow;

pub mod account;
pub mod builder;
pub mod cache;
pub mod contents;
pub mod credentials;
pub mod entry;
pub mod error;
pub mod gallery;
pub mod quote;
mod request;
pub mod storage;
pub mod thumbnail;
pub mod tree;
pub mod walker;

pub use credentials::Credentials;
pub use error::Error;
pub use reqwest;

/// Base url of the public GitHub API
pub const GITHUB_API: &str = "https://api.github.com";

/// The default user agent for the http client
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client for the repository contents API
///
/// ```
/// use gallery::builder::ClientBuilder;
///
/// let _client = ClientBuilder::default()
///    .with_repository("octocat", "hello-world")
///    .build()
///    .expect("unable to build client");
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    base_url: Cow<'static, str>,
    owner: String,
    repository: String,
    reference: Option<String>,
    credentials: Credentials,
    inner: reqwest::Client,
}

impl Client {
    /// The owner of the repository the client reads from
    pub fn owner(&self) -> &str {
        self.owner.as_str()
    }

    /// The name of the repository the client reads from
    pub fn repository(&self) -> &str {
        self.repository.as_str()
    }

    /// The branch, tag or commit the contents are read at, if any
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}
