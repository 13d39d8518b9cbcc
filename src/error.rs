//! Error types for animator construction and configuration loading

use thiserror::Error;

/// Errors raised while creating an animator
///
/// Both surface variants are construction-time and final for that instance:
/// callers are expected to log them and carry on without the effect.
#[derive(Error, Debug)]
pub enum CanvasError {
    /// No element with the requested id exists in the document
    #[error("canvas element with id \"{0}\" not found")]
    SurfaceNotFound(String),

    /// The element exists but cannot produce a 2D drawing context
    #[error("could not get a 2D drawing context from \"{0}\"")]
    NoDrawingContext(String),

    /// The scene configuration was rejected
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors that can occur while loading or validating presets
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// A field holds a value the scenes cannot work with
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: String, reason: String },

    /// No preset with this name exists
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_surface() {
        let err = CanvasError::SurfaceNotFound("hero".to_string());
        assert_eq!(err.to_string(), "canvas element with id \"hero\" not found");

        let err = CanvasError::NoDrawingContext("hero".to_string());
        assert!(err.to_string().contains("2D drawing context"));
    }

    #[test]
    fn config_errors_pass_through() {
        let err: CanvasError = ConfigError::invalid("damping", "must be in (0, 1]").into();
        assert_eq!(
            err.to_string(),
            "invalid value for `damping`: must be in (0, 1]"
        );
    }
}
