//! The credentials sent to the contents API.

/// The different kind of credentials used for authentication
#[derive(Clone, Debug, Default)]
pub enum Credentials {
    /// Unauthenticated requests, subject to the lowest rate limits
    #[default]
    Anonymous,
    /// A personal or installation token, sent as a bearer token
    Token { token: String },
}

impl Credentials {
    /// Creates a credential based on the environment variables
    ///
    /// When `GALLERY_TOKEN` is set, a `Some(Credentials::Token)` will be created, otherwise `None` is returned.
    ///
    /// ```rust
    /// use gallery::credentials::Credentials;
    ///
    /// match Credentials::from_env() {
    ///     Some(Credentials::Token { .. }) => println!("uses a token"),
    ///     _ => eprintln!("no credentials provided"),
    /// }
    /// ```
    pub fn from_env() -> Option<Self> {
        std::env::var("GALLERY_TOKEN")
            .ok()
            .filter(|value| !value.is_empty())
            .map(|token| Self::Token { token })
    }

    pub fn token<S: Into<String>>(token: S) -> Self {
        Self::Token {
            token: token.into(),
        }
    }

    pub(crate) fn apply(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Anonymous => req,
            Self::Token { token } => req.bearer_auth(token),
        }
    }
}
