//! Error types for the mathml-extract library.

use thiserror::Error;

/// Result type alias for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Hard failures: the pipeline could not run at all.
///
/// Per-span problems never surface here; they are collected as
/// [`SpanError`]s on the assembly instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while building the pipeline configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(String),

    #[error("Math backend not available in this build: {0}")]
    BackendUnavailable(String),

    #[error("Sentinel must not be empty")]
    EmptySentinel,
}

/// Errors raised by a math renderer for one expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Renderer rejected expression: {0}")]
    Backend(String),

    #[error("Renderer panicked: {0}")]
    Panicked(String),
}

/// Why a single math span could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanError {
    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("No math root produced")]
    NoMathRoot,

    #[error("Malformed math markup: {0}")]
    MalformedMarkup(String),

    #[error("Normalizer panicked: {0}")]
    Panicked(String),
}

impl SpanError {
    /// True when the renderer succeeded but its output held no usable `<math>` root.
    pub fn is_extraction(&self) -> bool {
        matches!(self, SpanError::NoMathRoot | SpanError::MalformedMarkup(_))
    }
}
