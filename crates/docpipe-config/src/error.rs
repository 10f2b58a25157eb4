//! Error types for configuration binding.

use thiserror::Error;

/// Errors that can occur while building a source or binding it to a target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The source is neither a structured record nor a string-keyed mapping.
    #[error("Config source must be a record or a mapping, got {found}")]
    InvalidSource {
        /// Description of what was found instead
        found: String,
    },

    /// Source text could not be parsed.
    #[error("Failed to parse {format} config: {message}")]
    Parse {
        /// Source format ("json" or "yaml")
        format: &'static str,
        /// Parser message
        message: String,
    },

    /// A value could not be stored in the target option.
    #[error("Invalid value for option '{option}': {message}")]
    InvalidValue {
        /// Option being set
        option: String,
        /// Why the value was rejected
        message: String,
    },

    /// The target has no option with this name.
    #[error("Unknown option '{option}' on {target}")]
    UnknownOption {
        /// Option being set
        option: String,
        /// Type name of the target
        target: String,
    },
}

impl ConfigError {
    /// Create an "invalid source" error.
    pub fn invalid_source(found: impl Into<String>) -> Self {
        Self::InvalidSource {
            found: found.into(),
        }
    }

    /// Create an "invalid value" error.
    pub fn invalid_value(option: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            option: option.into(),
            message: message.into(),
        }
    }

    /// Create an "unknown option" error.
    pub fn unknown_option(option: impl Into<String>, target: impl Into<String>) -> Self {
        Self::UnknownOption {
            option: option.into(),
            target: target.into(),
        }
    }
}
