use thiserror::Error;

/// Failures surfaced by the theme pipeline.
///
/// Color parsing and cache staleness are not errors; they show up as empty
/// ramps and `None` reads respectively.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Theme endpoint returned HTTP {status}")]
    Http { status: u16 },

    #[error("Timed out after {0:?} waiting for the theme endpoint")]
    Timeout(std::time::Duration),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ThemeError>;
