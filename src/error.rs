#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    RemoteRequest(#[from] RemoteRequestError),

    #[error("JSON decoding error: {0}")]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    EnvVar(#[from] EnvVarError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    // one failed fetch handed to every caller that waited on it
    #[error(transparent)]
    Shared(std::sync::Arc<Error>),
}

impl Error {
    pub fn root(&self) -> &Error {
        match self {
            Error::Shared(inner) => inner.root(),
            other => other,
        }
    }

    pub fn remote_status(&self) -> Option<reqwest::StatusCode> {
        match self.root() {
            Error::RemoteRequest(e) => Some(e.status()),
            _ => None,
        }
    }
}

impl From<std::sync::Arc<Error>> for Error {
    fn from(shared: std::sync::Arc<Error>) -> Self {
        std::sync::Arc::try_unwrap(shared).unwrap_or_else(Error::Shared)
    }
}

#[derive(thiserror::Error, Debug)]
#[error("HTTP error! status: {status} ({url})")]
pub struct RemoteRequestError {
    url: String,
    status: reqwest::StatusCode,
}

impl RemoteRequestError {
    pub fn new(url: &str, status: reqwest::StatusCode) -> Self {
        Self {
            url: url.into(),
            status,
        }
    }

    pub fn status(&self) -> reqwest::StatusCode {
        self.status
    }
}

#[derive(thiserror::Error, Debug)]
#[error("{source} ({cache_key})")]
pub struct DecodeError {
    cache_key: String,
    #[source]
    source: serde_json::Error,
}

impl DecodeError {
    pub fn new(cache_key: &str, source: serde_json::Error) -> Self {
        Self {
            cache_key: cache_key.into(),
            source,
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("{source} ({var})")]
pub struct EnvVarError {
    var: String,
    #[source]
    source: std::env::VarError,
}

impl EnvVarError {
    pub fn new(var: &str, source: std::env::VarError) -> Self {
        Self {
            var: var.into(),
            source,
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("invalid value {value:?} for {var}: {reason}")]
pub struct ConfigError {
    var: String,
    value: String,
    reason: String,
}

impl ConfigError {
    pub fn new(var: &str, value: &str, reason: impl ToString) -> Self {
        Self {
            var: var.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
