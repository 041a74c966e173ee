use http::StatusCode;
use std::{error::Error as StdError, fmt};
use thiserror::Error;
use url::Url;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    InvalidInput,
    Transport,
    Api,
    EmptyResult,
    Decode,
    InvalidConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Other,
}

#[derive(Debug, Clone)]
pub struct HttpError {
    pub status: StatusCode,
    /// Sanitized URL: no query/fragment/userinfo.
    pub url: Box<Url>,
    /// Structured message supplied by the server, when present.
    pub message: Option<Box<str>>,
}

/// All errors returned by the client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Empty or whitespace-only email; rejected locally, never retried.
    #[error("invalid input: {message}")]
    InvalidInput { message: Box<str> },

    /// Network/protocol failure reaching the capture service.
    #[error("transport error during POST {path}: {source}")]
    Transport {
        path: Box<str>,
        kind: TransportErrorKind,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// Non-2xx response from the capture service.
    #[error("{0}")]
    Api(HttpError),

    /// Well-formed 2xx response carrying none of the result variants.
    #[error("lookup returned no usable result")]
    EmptyResult,

    /// 2xx response whose body could not be decoded.
    #[error("decode error (HTTP {status}) during POST {path}: {source}")]
    Decode {
        status: StatusCode,
        path: Box<str>,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfig {
        message: Box<str>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Api(_) => ErrorKind::Api,
            Self::EmptyResult => ErrorKind::EmptyResult,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(e) => Some(e.status),
            Self::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the retry loop may swallow this failure and try again.
    ///
    /// Everything that happens on the wire is retryable; only local rejects
    /// (`InvalidInput`, `InvalidConfig`) are terminal.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Api(_) | Self::EmptyResult | Self::Decode { .. }
        )
    }

    /// Human-readable failure detail surfaced in `DisplayState::NotFound`.
    ///
    /// Prefers the structured server message, then the transport's own error
    /// text, then the error's own rendering.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Api(e) => match e.message.as_deref() {
                Some(message) => message.to_owned(),
                None => e.to_string(),
            },
            Self::Transport { source, .. } => source.to_string(),
            Self::EmptyResult | Self::Decode { .. } | Self::InvalidInput { .. } => self.to_string(),
            Self::InvalidConfig { .. } => "an unknown error occurred".to_owned(),
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} (POST {})", self.status, self.url.path())?;
        if let Some(message) = self.message.as_deref() {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: StatusCode, message: Option<&str>) -> Error {
        Error::Api(HttpError {
            status,
            url: Box::new(Url::parse("https://svc.example.com/capture").unwrap()),
            message: message.map(|m| m.to_owned().into_boxed_str()),
        })
    }

    #[test]
    fn retryable_split_matches_taxonomy() {
        assert!(api_error(StatusCode::SERVICE_UNAVAILABLE, None).is_retryable());
        assert!(Error::EmptyResult.is_retryable());
        assert!(
            !Error::InvalidInput {
                message: "email is required".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn detail_prefers_server_message() {
        let err = api_error(StatusCode::INTERNAL_SERVER_ERROR, Some("500: rate limited"));
        assert_eq!(err.detail(), "500: rate limited");

        let err = api_error(StatusCode::SERVICE_UNAVAILABLE, None);
        assert_eq!(err.detail(), "HTTP 503 Service Unavailable (POST /capture)");
    }
}
