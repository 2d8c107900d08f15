//! Error types for dbutil.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for dbutil.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Failed to load configuration file {path}: {reason}")]
    ConfigLoad { path: String, reason: String },

    #[error("Vault URL must include a scheme (e.g. https://vault.example.com): {0}")]
    InvalidVaultUrl(String),

    // Vault errors
    #[error("Vault authentication failed: {0}")]
    VaultAuth(String),

    #[error("Vault secret lookup failed: {0}")]
    VaultSecret(String),

    // Request errors
    #[error("Either a SQL statement or --script must be specified")]
    MissingSqlInput,

    #[error("Invalid procedure name: {0}. Only alphanumeric characters, underscores, and dots (for schema.procedure) are allowed")]
    InvalidProcedureName(String),

    #[error("Invalid parameter format. Expected '{expected}', got: {actual}")]
    InvalidParameter { expected: String, actual: String },

    #[error("Unknown parameter type: {0}")]
    UnknownParameterType(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // YAML errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] oracle::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
