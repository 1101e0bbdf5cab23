//! Crate-level error types.

use std::fmt;

/// Errors produced by the molscene crate.
#[derive(Debug)]
pub enum EngineError {
    /// The structure parser collaborator rejected the input; nothing was
    /// registered.
    Parse(String),
    /// Remove-by-name named a structure that is not loaded.
    UnknownStructure(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "structure parse error: {msg}"),
            Self::UnknownStructure(name) => {
                write!(f, "unknown structure: '{name}'")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
