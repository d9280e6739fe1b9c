//! dynform Tree
//!
//! Arena-backed form model the replication controller runs against.
//!
//! # Core Concepts
//!
//! - [`Form`]: One request's tree of containers and controls
//! - [`NodeId`]: Stable handle of a node within its form
//! - [`Payload`]: Submitted data as a nested, ordered mapping
//! - [`FieldPath`]: Name chain from the root to a node
//! - [`GroupSet`]: Form-wide control groups
//! - [`NodeExtension`]: Hook for containers with their own behaviour
//!
//! # Example
//!
//! ```rust
//! use dynform_tree::{Form, Payload};
//!
//! let mut form = Form::new("contact").with_http_data(Payload::empty());
//! let address = form.add_container(form.root(), "address")?;
//! let street = form.add_input(address, "street")?;
//!
//! assert_eq!(form.path_of(street)?.to_string(), "address-street");
//! assert!(form.is_submitted());
//! # Ok::<(), dynform_tree::TreeError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod form;
mod group;
mod node;
mod path;
mod payload;

// Re-exports
pub use error::{HookError, TreeError};
pub use form::{Form, SuccessHandler, DEFAULT_CONTAINER_CLASS};
pub use group::{Group, GroupId, GroupSet};
pub use node::{ClickHandler, Control, ControlKind, ExtensionSlot, Node, NodeExtension, NodeId, NodeKind};
pub use path::{validate_segment, FieldPath, PathError, NAME_SEPARATOR};
pub use payload::Payload;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::any::Any;

    #[derive(Debug, Default)]
    struct Counter {
        attached: usize,
    }

    impl NodeExtension for Counter {
        fn on_attach(&mut self, form: &mut Form, node: NodeId) -> Result<(), HookError> {
            self.attached += 1;
            form.add_input(node, "inside")?;
            Ok(())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn attach_runs_once() {
        let mut form = Form::new("f");
        let id = form.add_extension(form.root(), "ext", Counter::default()).unwrap();
        assert!(form.is_extension::<Counter>(id));

        form.attach(id).unwrap();
        form.attach(id).unwrap();

        assert_eq!(form.extension::<Counter>(id).unwrap().attached, 1);
        assert!(form.child(id, "inside").unwrap().is_some());
    }

    #[test]
    fn extension_is_busy_while_lent() {
        let mut form = Form::new("f");
        let id = form.add_extension(form.root(), "ext", Counter::default()).unwrap();

        let nested = form
            .with_extension::<Counter, _, _>(id, |_counter, form| {
                assert!(form.is_extension::<Counter>(id));
                assert!(form.extension::<Counter>(id).is_none());
                form.with_extension::<Counter, _, _>(id, |_, _| ())
            })
            .unwrap();

        assert!(matches!(nested, Err(TreeError::ExtensionBusy(_))));
        assert!(form.extension::<Counter>(id).is_some());
    }

    #[test]
    fn extension_type_mismatch() {
        #[derive(Debug)]
        struct Other;

        impl NodeExtension for Other {
            fn on_attach(&mut self, _form: &mut Form, _node: NodeId) -> Result<(), HookError> {
                Err("never attached".into())
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }

        let mut form = Form::new("f");
        let id = form.add_extension(form.root(), "other", Other).unwrap();
        let result = form.with_extension::<Counter, _, _>(id, |_, _| ());
        assert!(matches!(result, Err(TreeError::ExtensionType { .. })));

        let attach = form.attach(id);
        assert!(matches!(attach, Err(TreeError::Hook { .. })));
    }

    #[test]
    fn closest_ancestor_finds_extension() {
        let mut form = Form::new("f");
        let ext = form.add_extension(form.root(), "ext", Counter::default()).unwrap();
        let row = form.add_container(ext, "0").unwrap();
        let button = form.add_submit(row, "remove").unwrap();

        let found = form
            .closest_ancestor(button, Node::is_extension_of::<Counter>)
            .unwrap();
        assert_eq!(found, Some(ext));
    }

    #[test]
    fn extension_children_skip_its_group() {
        let mut form = Form::new("f");
        let group = form.add_group("g");
        let ext = form.add_extension(form.root(), "ext", Counter::default()).unwrap();
        form.set_current_group(ext, Some(group)).unwrap();

        let add = form.add_submit(ext, "add").unwrap();
        let row = form.add_container(ext, "0").unwrap();
        form.set_current_group(row, Some(group)).unwrap();
        let field = form.add_input(row, "x").unwrap();

        assert_eq!(form.controls_of(group).unwrap(), vec![field]);
        assert!(!form.controls_of(group).unwrap().contains(&add));
    }
}
