//! Submit-button bindings that grow and shrink a replicator
//!
//! Both bindings are structural clicks: they drop the form's success
//! handlers for the request, so a click on "add" or "remove" never counts
//! as a data submission.

use crate::error::ReplicatorError;
use crate::replicator::Replicator;
use dynform_tree::{ClickHandler, Form, HookError, NodeId};
use std::rc::Rc;

/// Called with the replicator and the row being removed or just created
pub type RowCallback = Rc<dyn Fn(&mut Form, Replicator, NodeId) -> Result<(), ReplicatorError>>;

/// Wrap a closure as a [`RowCallback`]
pub fn row_callback<F>(f: F) -> RowCallback
where
    F: Fn(&mut Form, Replicator, NodeId) -> Result<(), ReplicatorError> + 'static,
{
    Rc::new(f)
}

fn click_handler<F>(f: F) -> ClickHandler
where
    F: Fn(&mut Form, NodeId) -> Result<(), ReplicatorError> + 'static,
{
    Rc::new(move |form: &mut Form, button: NodeId| -> Result<(), HookError> { Ok(f(form, button)?) })
}

/// Make `button` remove the row it sits in
///
/// The button skips validation. On click, success handlers are cleared,
/// `callback` sees the row, then the row is removed without group cleanup.
///
/// # Errors
/// `NotASubmit` when `button` is not a submit control.
pub fn add_remove_on_click(
    form: &mut Form,
    button: NodeId,
    callback: Option<RowCallback>,
) -> Result<(), ReplicatorError> {
    form.set_validation_scope(button, Vec::new())?;
    let handler = click_handler(move |form, button| {
        let replicator = Replicator::lookup(form, button)?;
        let row = replicator.row_of(form, button)?;
        form.clear_success_handlers();

        if let Some(callback) = &callback {
            callback(form, replicator, row)?;
        }
        replicator.remove(form, row, false)
    });
    form.add_click_handler(button, handler)?;
    Ok(())
}

/// Make `button` append a row to the enclosing replicator
///
/// A row is only created when `allow_empty` is set or every existing row
/// has been filled in; `callback` then sees the new row. Success handlers
/// are cleared either way.
///
/// # Errors
/// `NotASubmit` when `button` is not a submit control.
pub fn add_create_on_click(
    form: &mut Form,
    button: NodeId,
    allow_empty: bool,
    callback: Option<RowCallback>,
) -> Result<(), ReplicatorError> {
    let handler = click_handler(move |form, button| {
        let replicator = Replicator::lookup(form, button)?;
        if allow_empty || replicator.is_all_filled(form, &[])? {
            let row = replicator.create_one(form, None)?;
            if let Some(callback) = &callback {
                callback(form, replicator, row)?;
            }
        } else {
            tracing::debug!(replicator = %form.describe(replicator.id()), "rows not filled, nothing created");
        }
        form.clear_success_handlers();
        Ok(())
    });
    form.add_click_handler(button, handler)?;
    Ok(())
}
