//! dynform Replicator
//!
//! Repeated form sections ("rows") that grow and shrink with the request.
//!
//! # Core Concepts
//!
//! - [`ReplicatorNode`]: Controller state living in the form tree
//! - [`Replicator`]: Handle used to create, remove and inspect rows
//! - [`ReplicatorConfig`]: Default row count, top-up and row class
//! - [`add_remove_on_click`] / [`add_create_on_click`]: Button bindings
//! - [`ExtensionRegistry`]: Named installation of the factory shortcut and
//!   button bindings
//!
//! On attachment a replicator rebuilds the rows present in the submitted
//! payload, or creates `default_count` rows when the form is shown for the
//! first time.
//!
//! # Example
//!
//! ```rust
//! use dynform_replicator::{Replicator, ReplicatorConfig, ReplicatorError, ReplicatorNode};
//! use dynform_tree::{Form, NodeId};
//!
//! fn phone(form: &mut Form, row: NodeId) -> Result<(), ReplicatorError> {
//!     form.add_input(row, "number")?;
//!     Ok(())
//! }
//!
//! let mut form = Form::new("contact");
//! let root = form.root();
//! let config = ReplicatorConfig::new().with_default_count(2);
//! let phones = Replicator::add(&mut form, root, "phones", ReplicatorNode::new(phone, config))?;
//!
//! assert_eq!(phones.containers(&form, false)?.len(), 2);
//! # Ok::<(), ReplicatorError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod actions;
mod config;
mod error;
mod fill;
mod naming;
mod registry;
mod removal;
mod replicator;

// Re-exports
pub use actions::{add_create_on_click, add_remove_on_click, row_callback, RowCallback};
pub use config::ReplicatorConfig;
pub use error::ReplicatorError;
pub use fill::count_filled;
pub use naming::next_row_name;
pub use registry::{
    add_create_on_click_via, add_dynamic, add_remove_on_click_via, register, registry, Binding, ExtensionNames,
    ExtensionRegistry,
};
pub use replicator::{Replicator, ReplicatorBuilder, ReplicatorNode, RowFactory};

/// Commonly used items
pub mod prelude {
    pub use crate::{
        add_create_on_click, add_remove_on_click, Replicator, ReplicatorConfig, ReplicatorError, ReplicatorNode,
    };
    pub use dynform_tree::{Form, NodeId, Payload};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
