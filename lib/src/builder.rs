use std::borrow::Cow;
use std::time::Duration;

/// Errors that may occur during client configuration and building.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when no repository was configured.
    #[error("no repository provided")]
    MissingRepository,
    /// Returned when the repository is not in the `owner/name` form.
    #[error("invalid repository {0:?}, expected owner/name")]
    InvalidRepository(String),
    /// Returned when the underlying HTTP client could not be built.
    #[error("unable to build reqwest client")]
    Reqwest(#[from] reqwest::Error),
}

/// Builder for constructing a [`Client`](crate::Client) with custom configuration.
///
/// This allows specifying the API base URL, the repository, the credentials and optionally
/// customizing the inner `reqwest::ClientBuilder`.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Cow<'static, str>,
    client_builder: Option<reqwest::ClientBuilder>,
    credentials: crate::Credentials,
    repository: Option<(String, String)>,
    reference: Option<String>,
    timeout: Option<Duration>,
}

impl Default for ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings:
    ///
    /// - Base URL is set to the public GitHub API.
    /// - No credentials, repository, reference nor timeout are set.
    /// - No custom `reqwest::ClientBuilder` is used.
    fn default() -> Self {
        Self {
            base_url: Cow::Borrowed(crate::GITHUB_API),
            client_builder: None,
            credentials: crate::Credentials::Anonymous,
            repository: None,
            reference: None,
            timeout: None,
        }
    }
}

fn parse_repository(value: &str) -> Option<(String, String)> {
    let (owner, name) = value.trim().split_once('/')?;
    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return None;
    }
    Some((owner.to_string(), name.to_string()))
}

fn timeout_from_env() -> Option<Duration> {
    let value = std::env::var("GALLERY_TIMEOUT").ok()?;
    match value.parse::<u64>() {
        Ok(millis) => Some(Duration::from_millis(millis)),
        Err(err) => {
            tracing::warn!("ignoring invalid GALLERY_TIMEOUT {value:?}: {err}");
            None
        }
    }
}

fn repository_from_var(value: Option<String>) -> Option<(String, String)> {
    let value = value?;
    let repository = parse_repository(&value);
    if repository.is_none() {
        tracing::warn!("ignoring invalid GALLERY_REPOSITORY {value:?}, expected owner/name");
    }
    repository
}

impl ClientBuilder {
    /// Creates a builder pre-configured using environment variables.
    ///
    /// - Uses `GALLERY_BASE_URL` for the endpoint, falling back to the public GitHub API.
    /// - Uses `GALLERY_REPOSITORY` (`owner/name`) and `GALLERY_REF` for the contents location.
    /// - Uses `GALLERY_TOKEN` for credentials.
    /// - Uses `GALLERY_TIMEOUT`, in milliseconds, for the request timeout.
    pub fn from_env() -> Self {
        let base_url = std::env::var("GALLERY_BASE_URL")
            .ok()
            .map(Cow::Owned)
            .unwrap_or(Cow::Borrowed(crate::GITHUB_API));
        let repository = repository_from_var(std::env::var("GALLERY_REPOSITORY").ok());

        Self {
            base_url,
            client_builder: None,
            credentials: crate::Credentials::from_env().unwrap_or(crate::Credentials::Anonymous),
            repository,
            reference: std::env::var("GALLERY_REF").ok(),
            timeout: timeout_from_env(),
        }
    }
}

impl ClientBuilder {
    /// Sets a custom base URL.
    pub fn set_base_url(&mut self, base_url: impl Into<Cow<'static, str>>) {
        self.base_url = base_url.into();
    }

    /// Sets a custom base URL and returns the modified builder.
    pub fn with_base_url(mut self, base_url: impl Into<Cow<'static, str>>) -> Self {
        self.set_base_url(base_url);
        self
    }

    /// Sets the repository to read the contents from.
    pub fn set_repository(&mut self, owner: impl Into<String>, name: impl Into<String>) {
        self.repository = Some((owner.into(), name.into()));
    }

    /// Sets the repository and returns the modified builder.
    pub fn with_repository(mut self, owner: impl Into<String>, name: impl Into<String>) -> Self {
        self.set_repository(owner, name);
        self
    }

    /// Sets the repository from its `owner/name` form.
    pub fn set_repository_path(&mut self, value: &str) -> Result<(), Error> {
        self.repository =
            Some(parse_repository(value).ok_or_else(|| Error::InvalidRepository(value.into()))?);
        Ok(())
    }

    /// Sets the branch, tag or commit to read the contents at.
    pub fn set_reference(&mut self, reference: impl Into<String>) {
        self.reference = Some(reference.into());
    }

    /// Sets the reference and returns the modified builder.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.set_reference(reference);
        self
    }

    /// Sets a custom `reqwest::ClientBuilder`.
    pub fn set_client_builder(&mut self, client_builder: reqwest::ClientBuilder) {
        self.client_builder = Some(client_builder);
    }

    /// Sets a custom `reqwest::ClientBuilder` and returns the modified builder.
    pub fn with_client_builder(mut self, client_builder: reqwest::ClientBuilder) -> Self {
        self.set_client_builder(client_builder);
        self
    }

    /// Sets the credentials for API authentication.
    pub fn set_credentials(&mut self, credentials: crate::Credentials) {
        self.credentials = credentials;
    }

    /// Sets the credentials and returns the modified builder.
    pub fn with_credentials(mut self, credentials: crate::Credentials) -> Self {
        self.set_credentials(credentials);
        self
    }

    /// Sets the timeout applied to every request.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    /// Sets the timeout and returns the modified builder.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.set_timeout(timeout);
        self
    }

    /// Builds the [`Client`](crate::Client) with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRepository`] if no repository was set.
    /// Returns [`Error::Reqwest`] if the HTTP client could not be built.
    pub fn build(self) -> Result<crate::Client, Error> {
        let (owner, repository) = self.repository.ok_or(Error::MissingRepository)?;
        let builder = self
            .client_builder
            .unwrap_or_default()
            .user_agent(crate::USER_AGENT);
        let builder = match self.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        Ok(crate::Client {
            base_url: self.base_url,
            owner,
            repository,
            reference: self.reference,
            credentials: self.credentials,
            inner: builder.build()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{repository_from_var, ClientBuilder, Error};

    #[test]
    fn should_fail_without_repository() {
        let err = ClientBuilder::default().build().unwrap_err();
        assert!(matches!(err, Error::MissingRepository));
    }

    #[test]
    fn should_parse_repository_path() {
        let mut builder = ClientBuilder::default();
        builder.set_repository_path("school/portal").unwrap();
        let client = builder.with_reference("main").build().unwrap();
        assert_eq!(client.owner(), "school");
        assert_eq!(client.repository(), "portal");
        assert_eq!(client.reference(), Some("main"));
    }

    #[test]
    fn should_ignore_invalid_repository_variable() {
        crate::tests::init();
        assert_eq!(repository_from_var(None), None);
        assert_eq!(repository_from_var(Some("portal".into())), None);
        assert_eq!(
            repository_from_var(Some(" school/portal ".into())),
            Some(("school".to_string(), "portal".to_string()))
        );
    }

    #[test]
    fn should_reject_invalid_repository_path() {
        let mut builder = ClientBuilder::default();
        for value in ["portal", "/portal", "school/", "a/b/c"] {
            let err = builder.set_repository_path(value).unwrap_err();
            assert!(matches!(err, Error::InvalidRepository(_)), "{value}");
        }
    }
}
