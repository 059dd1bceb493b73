//! Error types for the automaton core.
//!
//! Every fallible operation returns [`EngineError`]. None of these are fatal to
//! the core itself; the caller decides whether to retry or reseed.

use crate::automaton::dispatch::RequestId;

/// Errors reported by the transition engine and its dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The supplied generation does not cover its extents exactly once.
    #[error("generation invariant violated: {reason}")]
    InvariantViolation {
        /// What was wrong with the generation.
        reason: String,
    },

    /// Survival band is empty.
    #[error("invalid rules: lower ({lower}) must not exceed upper ({upper})")]
    InvalidRules {
        /// Lower survival threshold.
        lower: u8,
        /// Upper survival threshold and exact birth count.
        upper: u8,
    },

    /// One of the extents is zero.
    #[error("invalid extents {x}x{y}x{z}: every axis must be at least 1")]
    InvalidExtents {
        /// X extent.
        x: u16,
        /// Y extent.
        y: u16,
        /// Z extent.
        z: u16,
    },

    /// The worker panicked or the step failed while computing a transition.
    #[error("computation fault in request {request_id}: {reason}")]
    ComputationFault {
        /// Request whose computation failed.
        request_id: RequestId,
        /// Panic payload or step error message.
        reason: String,
    },

    /// The worker pool could not be started.
    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),

    /// The result channel has no senders left.
    #[error("result channel disconnected")]
    Disconnected,
}

impl EngineError {
    /// Request id carried by a delivered failure.
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            EngineError::ComputationFault { request_id, .. } => Some(*request_id),
            _ => None,
        }
    }

    pub(crate) fn invariant(reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an unusable simulation.
    #[error("invalid configuration: {source}")]
    Invalid {
        /// The rejected setting.
        #[from]
        source: EngineError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}
