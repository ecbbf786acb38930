//! The errors returned by the client and the cache

/// All the possible errors returned by the client, the storages and the API
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Server side error, returning the http status and the message
    #[error("protocol error status {0}: {1}")]
    Protocol(u16, String),
    /// Unable to reach the server or read its response
    #[error("network error")]
    Reqwest(#[from] reqwest::Error),
    /// Unable to read the response due to its format
    #[error("unexpected response format")]
    ResponseFormat,
    /// Unable to parse or serialize a JSON document
    #[error("unable to handle json")]
    SerdeJson(#[from] serde_json::Error),
    /// Unable to read or write a stored value
    #[error("storage error")]
    Io(#[from] std::io::Error),
    /// The provided name cannot be used to build an email address
    #[error("invalid name provided")]
    InvalidName,
}

impl Error {
    /// Whether the server answered that the path does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Protocol(404, _))
    }
}
