//! Typed errors for the configuration core.
//!
//! Response events carry plain `String` errors across the shell boundary; the
//! update handlers wrap them in [`Error`] before they reach the user.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::types::{FormField, UploadTarget};

/// Why a single field failed validation.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
pub enum ValidationError {
    #[error("is required")]
    Required,
    #[error("must not contain \"{0}\"")]
    ForbiddenPattern(String),
    #[error("must be at least {0}")]
    BelowMinimum(f64),
    #[error("must be at most {0}")]
    AboveMaximum(f64),
    #[error("must be a number")]
    NotANumber,
}

/// Settings with a safe operating ceiling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UnsafeSetting {
    CoreVoltage,
    Frequency,
}

impl fmt::Display for UnsafeSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoreVoltage => f.write_str("Core voltage"),
            Self::Frequency => f.write_str("Frequency"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Cannot change the {0} upload while it is not idle")]
    NotIdle(UploadTarget),
    #[error("No {0} file selected")]
    NoFileSelected(UploadTarget),
    #[error("An upload in progress cannot be reset")]
    InProgress,
}

#[derive(Debug, Error)]
pub enum Error {
    /// Blocks saving; never sent to the device.
    #[error("{field} {source}")]
    Validation {
        field: FormField,
        source: ValidationError,
    },

    #[error("{action} failed: {message}")]
    Network { action: String, message: String },

    /// Non-fatal; saving continues after the operator confirms.
    #[error("{setting} {value} exceeds the safe ceiling of {ceiling}")]
    ConstraintViolation {
        setting: UnsafeSetting,
        value: f64,
        ceiling: u32,
    },

    #[error("No device settings loaded")]
    NotLoaded,

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl Error {
    pub fn network(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            action: action.into(),
            message: message.into(),
        }
    }
}
