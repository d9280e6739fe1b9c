//! Error types for the replicator
//!
//! Every failure is local and deterministic, nothing here is retried:
//! - Configuration mistakes (missing factory, replaced extension names)
//! - Name collisions between rows of one request
//! - Operations on rows that belong to someone else
//! - Errors of the underlying form tree

use crate::registry::Binding;
use dynform_tree::TreeError;

/// Main replicator error type
#[derive(Debug, thiserror::Error)]
pub enum ReplicatorError {
    /// No row factory was configured
    #[error("replicator requires a row factory, none was given")]
    InvalidFactory,

    /// The name was already issued by this replicator in this request
    #[error("row with name '{name}' was already created by replicator '{replicator}'")]
    DuplicateName {
        /// Replicator path
        replicator: String,
        /// Requested row name
        name: String,
    },

    /// The node is not a direct child of this replicator
    #[error("given component '{row}' is not a row of replicator '{replicator}'")]
    NotOwned {
        /// Replicator path
        replicator: String,
        /// Offending node
        row: String,
    },

    /// The extension method name was retired by a later registration
    #[error("extension method '{0}' was replaced by a later registration")]
    ExtensionReplaced(String),

    /// The extension method name was never registered
    #[error("extension method '{0}' is not registered")]
    UnknownExtension(String),

    /// The extension method name is bound to a different behaviour
    #[error("extension method '{method}' is bound to {found}, not {expected}")]
    BindingMismatch {
        /// Requested method
        method: String,
        /// Behaviour the caller asked for
        expected: Binding,
        /// Behaviour registered under the name
        found: Binding,
    },

    /// The node is not a replicator
    #[error("'{0}' is not a replicator")]
    NotAReplicator(String),

    /// No replicator encloses the node
    #[error("'{0}' is not inside a replicator")]
    NoEnclosingReplicator(String),

    /// Form tree failure
    #[error(transparent)]
    Tree(TreeError),
}

impl ReplicatorError {
    /// Check if the error stems from replicator configuration
    #[inline]
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFactory
                | Self::ExtensionReplaced(_)
                | Self::UnknownExtension(_)
                | Self::BindingMismatch { .. }
        )
    }
}

impl From<TreeError> for ReplicatorError {
    /// Hooks and click handlers report through the tree as boxed errors;
    /// a boxed `ReplicatorError` comes back out unchanged.
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::Hook { node, source } => match source.downcast::<ReplicatorError>() {
                Ok(inner) => *inner,
                Err(source) => Self::Tree(TreeError::Hook { node, source }),
            },
            other => Self::Tree(other),
        }
    }
}
