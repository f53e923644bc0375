//! Error types for plugin registration.

use thiserror::Error;

/// Errors that can occur while validating or registering a plugin.
///
/// Lifecycle hooks never return errors: missing inputs at hook time are
/// logged and skipped so the host pipeline keeps running.
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Plugin api mismatch: expected {expected}, actual {actual}")]
    ApiMismatch { expected: String, actual: String },
    #[error("Plugin conflict: {0}")]
    Conflict(String),
}
