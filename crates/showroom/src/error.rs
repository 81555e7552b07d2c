#![forbid(unsafe_code)]

//! Showroom error model and recovery mapping.
//!
//! # Design Principles
//!
//! 1. **Navigation never errs**: out-of-range indices and empty collections
//!    are no-ops reported through `bool` returns, not errors.
//! 2. **Domain-specific errors**: form submission and configuration loading
//!    each have their own typed error; this enum only unifies them.
//! 3. **Recovery over failure**: every variant maps to a [`RecoveryAction`]
//!    the embedding layer uses to keep the page usable.

use std::fmt;

use showroom_runtime::config::ConfigError;
use showroom_runtime::form::{SubmitError, ValidationError};

/// Top-level error type for Showroom embedders.
#[derive(Debug)]
pub enum Error {
    /// A form submission was refused.
    Submit(SubmitError),
    /// Configuration could not be loaded or failed validation.
    Config(ConfigError),
}

/// Standard result type for Showroom APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// What the embedding layer should do when an error occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Keep the form in EDITING and highlight the failing fields.
    KeepEditing,
    /// A submission is in flight; wait for it to complete.
    Wait,
    /// Ignore the configuration source and run with defaults.
    UseDefaults,
}

impl Error {
    /// Determine the recovery action for this error.
    pub fn recovery(&self) -> RecoveryAction {
        match self {
            Self::Submit(SubmitError::Validation(_)) => RecoveryAction::KeepEditing,
            Self::Submit(SubmitError::AlreadySubmitting) => RecoveryAction::Wait,
            Self::Config(_) => RecoveryAction::UseDefaults,
        }
    }

    /// Error type label for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Submit(_) => "submit",
            Self::Config(_) => "config",
        }
    }

    /// Required fields that failed validation, if that is what this is.
    pub fn missing_fields(&self) -> &[String] {
        match self {
            Self::Submit(SubmitError::Validation(e)) => &e.missing,
            _ => &[],
        }
    }
}

// ── Display ─────────────────────────────────────────────────────────────

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submit(e) => write!(f, "submit error: {e}"),
            Self::Config(e) => write!(f, "config error: {e}"),
        }
    }
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeepEditing => f.write_str("keep editing"),
            Self::Wait => f.write_str("wait"),
            Self::UseDefaults => f.write_str("use defaults"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Submit(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ── Conversions ─────────────────────────────────────────────────────────

impl From<SubmitError> for Error {
    fn from(err: SubmitError) -> Self {
        Self::Submit(err)
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::Submit(SubmitError::Validation(err))
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn validation_keeps_editing() {
        let err: Error = ValidationError {
            missing: vec!["phone".into()],
        }
        .into();
        assert_eq!(err.recovery(), RecoveryAction::KeepEditing);
        assert_eq!(err.missing_fields(), ["phone".to_string()]);
        assert_eq!(err.error_type(), "submit");
        assert!(err.source().is_some());
    }

    #[test]
    fn double_submit_waits() {
        let err = Error::from(SubmitError::AlreadySubmitting);
        assert_eq!(err.recovery(), RecoveryAction::Wait);
        assert!(err.missing_fields().is_empty());
    }

    #[test]
    fn config_falls_back_to_defaults() {
        let err = Error::from(ConfigError::Validation(vec!["x".into()]));
        assert_eq!(err.recovery(), RecoveryAction::UseDefaults);
        assert_eq!(err.to_string(), "config error: validation errors: x");
    }

    #[test]
    fn recovery_display() {
        assert_eq!(RecoveryAction::KeepEditing.to_string(), "keep editing");
    }
}
