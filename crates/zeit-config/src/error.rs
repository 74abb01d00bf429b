//! Configuration error types.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A config file could not be parsed as TOML.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
