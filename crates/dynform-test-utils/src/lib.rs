//! Testing utilities for dynform workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use dynform_replicator::{add_remove_on_click, Replicator, ReplicatorConfig, ReplicatorError, ReplicatorNode};
use dynform_tree::{Form, NodeId, Payload};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install a test-writer subscriber honouring `RUST_LOG`
///
/// Set `DYNFORM_LOG_FORMAT=json` for JSON lines.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let json = std::env::var("DYNFORM_LOG_FORMAT").is_ok_and(|format| format == "json");
        let builder = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_test_writer();
        let _ = if json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
    });
}

/// Payload from a JSON literal
pub fn payload(value: serde_json::Value) -> Payload {
    serde_json::from_value(value).unwrap()
}

/// Unsubmitted form
pub fn fresh_form() -> Form {
    init_tracing();
    Form::new("contact")
}

/// Submitted form carrying `value`
pub fn submitted_form(value: serde_json::Value) -> Form {
    init_tracing();
    Form::new("contact").with_http_data(payload(value))
}

/// Row with a `number` input
pub fn phone_row(form: &mut Form, row: NodeId) -> Result<(), ReplicatorError> {
    form.add_input(row, "number")?;
    Ok(())
}

/// Row with `number`, `note` and a bound `remove` button
pub fn removable_phone_row(form: &mut Form, row: NodeId) -> Result<(), ReplicatorError> {
    form.add_input(row, "number")?;
    form.add_input(row, "note")?;
    let remove = form.add_submit(row, "remove")?;
    add_remove_on_click(form, remove, None)
}

/// Attach a `phones` replicator of [`removable_phone_row`] rows to the root
pub fn phones(form: &mut Form, config: ReplicatorConfig) -> Replicator {
    let root = form.root();
    Replicator::add(form, root, "phones", ReplicatorNode::new(removable_phone_row, config)).unwrap()
}

/// Names of the direct rows, in tree order
pub fn row_names(form: &Form, replicator: Replicator) -> Vec<String> {
    replicator
        .containers(form, false)
        .unwrap()
        .into_iter()
        .map(|row| form.name(row).unwrap().to_string())
        .collect()
}

/// Direct row by name
pub fn row(form: &Form, replicator: Replicator, name: &str) -> NodeId {
    form.child(replicator.id(), name)
        .unwrap()
        .unwrap_or_else(|| panic!("row '{name}' missing"))
}

/// Control inside a row by name
pub fn control(form: &Form, row: NodeId, name: &str) -> NodeId {
    form.child(row, name)
        .unwrap()
        .unwrap_or_else(|| panic!("control '{name}' missing"))
}
