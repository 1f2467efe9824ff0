pub mod article;
pub mod comment;
pub mod newtypes;

use serde::{Deserialize, Serialize};

/// One page of results as returned by the list endpoints.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    /// Zero based page index
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub empty: bool,
}

/// Error body which the api returns together with a 4xx status.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResult {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub field_errors: Vec<FieldError>,
    #[serde(default)]
    pub global_errors: Vec<GlobalError>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct GlobalError {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl ErrorResult {
    /// Single line summary for logging, including any field errors.
    pub fn summary(&self) -> String {
        let fields: Vec<String> = self
            .field_errors
            .iter()
            .map(|f| match &f.message {
                Some(m) => format!("{}: {m}", f.field),
                None => f.field.clone(),
            })
            .collect();
        if fields.is_empty() {
            format!("{} {}", self.code, self.message)
        } else {
            format!("{} {} ({})", self.code, self.message, fields.join(", "))
        }
    }
}
