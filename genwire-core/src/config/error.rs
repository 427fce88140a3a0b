//! Config loading errors

use std::fmt;
use thiserror::Error;

/// Result type for config loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Why a config file could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config '{path}'{}: {message}", location(.line, .column))]
    ParseError {
        path: String,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    #[error(transparent)]
    ValidationError(#[from] ValidationError),

    #[error("environment variable '{var}' is not set")]
    EnvVarNotFound { var: String },
}

fn location(line: &Option<usize>, column: &Option<usize>) -> String {
    match (*line, *column) {
        (Some(line), Some(column)) => format!(" ({line}:{column})"),
        (Some(line), None) => format!(" (line {line})"),
        _ => String::new(),
    }
}

/// A config value that parsed but is not acceptable
#[derive(Debug, Error)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `schemas[1].name`
    pub field_path: String,
    pub kind: ValidationErrorKind,
    /// Hint for fixing the config
    pub context: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field_path, self.kind)?;
        if let Some(ctx) = &self.context {
            write!(f, " ({ctx})")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ValidationErrorKind {
    #[error("missing")]
    RequiredFieldMissing,

    #[error("expected {expected}, got {actual}")]
    InvalidValue { expected: String, actual: String },

    #[error("{message}")]
    InvalidFormat { message: String },

    #[error("'{value}' is already used")]
    DuplicateValue { value: String },

    #[error("unsupported version {actual} (expected {expected})")]
    InvalidVersion { expected: String, actual: String },
}

impl ValidationError {
    pub fn new(field_path: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field_path: field_path.into(),
            kind,
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn required(field_path: impl Into<String>) -> Self {
        Self::new(field_path, ValidationErrorKind::RequiredFieldMissing)
    }

    pub fn invalid_value(
        field_path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        let kind = ValidationErrorKind::InvalidValue {
            expected: expected.into(),
            actual: actual.into(),
        };
        Self::new(field_path, kind)
    }

    pub fn invalid_format(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(field_path, ValidationErrorKind::InvalidFormat { message })
    }
}
