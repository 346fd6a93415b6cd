use thiserror::Error;

/// Errors raised by the Askbot client before or during a question search.
#[derive(Debug, Error)]
pub enum AskbotError {
    /// A filter value was rejected before any request was sent.
    #[error("invalid value {value:?} for {field}")]
    InvalidArgument { field: &'static str, value: String },

    #[error("no endpoint configured; pass --endpoint or set `endpoint` under [askbot] in the config file")]
    MissingEndpoint,

    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    /// The page request could not complete or returned a non-success status.
    #[error("request for page {page} failed: {message}")]
    Network { page: u32, message: String },

    /// The page body was not the expected `{ questions, pages }` object.
    #[error("malformed response for page {page}: {message}")]
    MalformedResponse { page: u32, message: String },
}

impl AskbotError {
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        AskbotError::InvalidArgument {
            field,
            value: value.into(),
        }
    }

    #[cfg(test)]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AskbotError::InvalidArgument { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AskbotError>;
