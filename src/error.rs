use std::{fmt, io};

use regex::Error as RegexError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum GlossError {
    #[error("File System error: {0}")]
    Io(String),
    #[error("Item Not Found: {0}")]
    NotFound(String),
    #[error("Search pattern for term '{term}' failed to compile: {message}")]
    Pattern { term: String, message: String },
    #[error("You do not have permission to access this resource")]
    PermissionDenied,
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl GlossError {
    /// Pattern failures are per-definition soft warnings: the offending term is
    /// skipped for the current pass and everything else still applies.
    pub fn is_soft(&self) -> bool {
        matches!(self, GlossError::Pattern { .. })
    }
}

impl From<toml::de::Error> for GlossError {
    fn from(src: toml::de::Error) -> GlossError {
        GlossError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<toml::ser::Error> for GlossError {
    fn from(src: toml::ser::Error) -> GlossError {
        GlossError::Serialization(format!("Toml serialization error: {src}"))
    }
}

impl From<serde_yaml::Error> for GlossError {
    fn from(src: serde_yaml::Error) -> GlossError {
        GlossError::Serialization(format!("Yaml deserialization error: {src}"))
    }
}

impl From<RegexError> for GlossError {
    fn from(x: RegexError) -> Self {
        GlossError::Serialization(format!("Regex parse failed: {x}"))
    }
}

impl From<io::Error> for GlossError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => GlossError::NotFound(format!("{x}")),
            io::ErrorKind::PermissionDenied => GlossError::PermissionDenied,
            _ => GlossError::Io(format!("IOError: {}", x.kind())),
        }
    }
}

impl From<fmt::Error> for GlossError {
    fn from(x: fmt::Error) -> Self {
        GlossError::Io(format!("{x}"))
    }
}
