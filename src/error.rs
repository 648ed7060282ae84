use thiserror::Error;

/// Faults in the model itself, never in the checked document.
///
/// `Clone` so one failed initialization can be handed to every caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("no schema named '{name}'")]
    NotFound { name: String },

    #[error("invalid pattern /{pattern}/ at [{site}]: {reason}")]
    InvalidPattern {
        site: String,
        pattern: String,
        reason: String,
    },

    #[error("reference to undefined schema '{target}' at [{site}]")]
    UnresolvedReference { site: String, target: String },

    #[error("cannot load model from {origin}: {reason}")]
    Load { origin: String, reason: String },
}
