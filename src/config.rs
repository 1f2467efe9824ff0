use config::{Config, ConfigError};
use doku::Document;
use serde::Deserialize;
use smart_default::SmartDefault;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Document, SmartDefault)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct BoardConfig {
    /// How to reach the board api
    pub api: BoardConfigApi,
    pub board: BoardConfigPages,
}

impl BoardConfig {
    /// Reads the given toml file if it exists, then applies overrides from environment
    /// variables like `BOARD__API__BASE_URL`.
    pub fn read(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("BOARD").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Document, SmartDefault)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct BoardConfigApi {
    /// Scheme, host and port of the api server. Request paths are appended to this.
    #[default("http://localhost:8080")]
    #[doku(example = "http://localhost:8080")]
    pub base_url: String,
    /// Access token which is sent as `Authorization: Bearer` header
    #[default(None)]
    #[doku(example = "eyJhbGciOiJIUzI1NiJ9...")]
    pub access_token: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Document, SmartDefault)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct BoardConfigPages {
    /// Path of the board page, used as redirect target after an action
    #[default("/board")]
    #[doku(example = "/board")]
    pub path: String,
}
