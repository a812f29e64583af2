/// Core error types for Kinegram.
use std::path::PathBuf;

/// A specialized Result type for Kinegram operations.
pub type KinegramResult<T> = Result<T, KinegramError>;

/// Top-level error type encompassing all Kinegram subsystems.
///
/// Every variant is raised synchronously while a scene is being constructed,
/// before anything is handed to a renderer.
#[derive(Debug, thiserror::Error)]
pub enum KinegramError {
    /// Malformed style or numeric parameters.
    #[error("validation error: {field}: {message}")]
    Validation { field: String, message: String },

    /// An animation or placement references an element that is not in the layout tree.
    #[error("reference error: unknown element '{target}' ({context})")]
    Reference { target: String, context: String },

    /// Conflicting layout directives.
    #[error("layout error: {0}")]
    Layout(String),

    /// Animation windows that collide on the same element.
    #[error("timing error: {0}")]
    Timing(String),

    #[error("config error: {message} ({path:?})")]
    Config { message: String, path: PathBuf },

    #[error("unknown scene: {0}")]
    UnknownScene(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl KinegramError {
    /// Create a validation error for a named parameter.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        KinegramError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a reference error for a missing target.
    pub fn reference(target: impl Into<String>, context: impl Into<String>) -> Self {
        KinegramError::Reference {
            target: target.into(),
            context: context.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        KinegramError::Config {
            message: message.into(),
            path: path.into(),
        }
    }
}

/// Reject non-finite or negative values.
pub fn ensure_non_negative(field: &str, value: f64) -> KinegramResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(KinegramError::validation(
            field,
            format!("must be a finite non-negative number, got {}", value),
        ));
    }
    Ok(value)
}

/// Reject non-finite or non-positive values.
pub fn ensure_positive(field: &str, value: f64) -> KinegramResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(KinegramError::validation(
            field,
            format!("must be a finite positive number, got {}", value),
        ));
    }
    Ok(value)
}

/// Reject opacities outside [0, 1].
pub fn ensure_unit(field: &str, value: f64) -> KinegramResult<f64> {
    if !(0.0..=1.0).contains(&value) {
        return Err(KinegramError::validation(
            field,
            format!("must be within [0, 1], got {}", value),
        ));
    }
    Ok(value)
}
