use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of an attribute.
///
/// `Mixed` is the placeholder used when no finer type information exists,
/// either because the attribute was discovered from a plain member or
/// because it was registered at run time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    #[default]
    Mixed,
    Identifier,
    String,
    Integer,
    Float,
    Boolean,
    Array,
    Document,
    Other(String),
}

impl TypeTag {
    /// Maps an annotation type token (`string`, `int`, `\MongoId`, ...) to a tag.
    pub fn parse(token: &str) -> Self {
        let trimmed = token.trim().trim_start_matches('\\');
        match trimmed.to_ascii_lowercase().as_str() {
            "mixed" => Self::Mixed,
            "id" | "identifier" | "objectid" | "mongoid" => Self::Identifier,
            "string" | "str" | "text" => Self::String,
            "int" | "integer" => Self::Integer,
            "float" | "double" => Self::Float,
            "bool" | "boolean" => Self::Boolean,
            "array" => Self::Array,
            "object" | "document" => Self::Document,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Self::Mixed)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mixed => write!(f, "mixed"),
            Self::Identifier => write!(f, "identifier"),
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Boolean => write!(f, "boolean"),
            Self::Array => write!(f, "array"),
            Self::Document => write!(f, "document"),
            Self::Other(name) => write!(f, "{}", name),
        }
    }
}
