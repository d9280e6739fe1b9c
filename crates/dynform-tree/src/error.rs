//! Error types for the form tree

use crate::group::GroupId;
use crate::node::NodeId;
use crate::path::PathError;

/// Error raised by an extension hook or a click handler
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Form tree errors
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Id does not point at a live node
    #[error("node {0} does not exist")]
    NodeNotFound(NodeId),

    /// A live sibling already uses the name
    #[error("component with name '{name}' already exists in '{parent}'")]
    DuplicateName {
        /// Parent container
        parent: String,
        /// Requested name
        name: String,
    },

    /// Name cannot be used as a path segment
    #[error("invalid component name: {0}")]
    InvalidName(#[from] PathError),

    /// Operation needs a container
    #[error("'{0}' is not a container")]
    NotAContainer(String),

    /// Operation needs a control
    #[error("'{0}' is not a control")]
    NotAControl(String),

    /// Operation needs a submit control
    #[error("'{0}' is not a submit control")]
    NotASubmit(String),

    /// The form root cannot be detached
    #[error("the form root cannot be removed")]
    RootRemoval,

    /// Node carries no extension hook
    #[error("'{0}' is not an extension container")]
    NotAnExtension(String),

    /// Hook is already lent out further up the call stack
    #[error("extension of '{0}' is already in use")]
    ExtensionBusy(String),

    /// Hook has another concrete type
    #[error("extension of '{node}' is not a {expected}")]
    ExtensionType {
        /// Extension node
        node: String,
        /// Requested type
        expected: &'static str,
    },

    /// Group was deleted or never existed
    #[error("{0} does not exist")]
    GroupNotFound(GroupId),

    /// Extension hook or click handler failed
    #[error("handler of '{node}' failed: {source}")]
    Hook {
        /// Node whose handler failed
        node: String,
        /// Underlying error
        #[source]
        source: HookError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_name_display() {
        let err = TreeError::DuplicateName {
            parent: "phones".to_string(),
            name: "0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "component with name '0' already exists in 'phones'"
        );
    }

    #[test]
    fn hook_error_keeps_source() {
        let err = TreeError::Hook {
            node: "phones".to_string(),
            source: "boom".into(),
        };
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "boom");
    }
}
