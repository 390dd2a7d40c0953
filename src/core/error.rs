use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Getting unknown property: {type_name}::{name}")]
    UndefinedAttribute { type_name: String, name: String },

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RecordError {
    pub fn undefined(type_name: &str, name: &str) -> Self {
        Self::UndefinedAttribute {
            type_name: type_name.to_string(),
            name: name.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecordError>;

impl From<serde_json::Error> for RecordError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
