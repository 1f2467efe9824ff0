use serde::{Deserialize, Serialize};
use std::{error::Error, fmt::Display};

pub type ClientResult<T> = Result<T, ClientError>;

/// Error of the typed api calls. Carries a readable message: the api's own error summary
/// for failure statuses, otherwise the underlying transport or parsing error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClientError(String);

impl ClientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(self) -> String {
        self.0
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        Self(value.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(value: serde_json::Error) -> Self {
        Self(value.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(value: url::ParseError) -> Self {
        Self(value.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for ClientError {
    fn from(value: serde_urlencoded::ser::Error) -> Self {
        Self(value.to_string())
    }
}
