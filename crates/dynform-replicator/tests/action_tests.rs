use dynform_replicator::{
    add_create_on_click, add_remove_on_click, row_callback, Replicator, ReplicatorConfig, ReplicatorError, ReplicatorNode,
};
use dynform_test_utils::{control, fresh_form, phones, row, row_names, submitted_form};
use dynform_tree::{Form, NodeId};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn with_add_button(form: &mut Form, replicator: Replicator, allow_empty: bool) -> NodeId {
    let add = form.add_submit(replicator.id(), "add").unwrap();
    add_create_on_click(form, add, allow_empty, None).unwrap();
    add
}

fn count_successes(form: &mut Form) -> Rc<Cell<usize>> {
    let successes = Rc::new(Cell::new(0));
    let counter = Rc::clone(&successes);
    form.on_success(move |_form| counter.set(counter.get() + 1));
    successes
}

#[test]
fn test_fill_count_over_submitted_rows() {
    let mut form = submitted_form(json!({
        "phones": {
            "0": { "number": "a", "note": "" },
            "1": { "number": "", "note": "" },
            "2": { "number": "b" }
        }
    }));
    let replicator = phones(&mut form, ReplicatorConfig::new());
    assert_eq!(replicator.count_filled_without(&mut form, &[], &[]).unwrap(), 2);
    assert_eq!(replicator.count_filled_without(&mut form, &["2"], &[]).unwrap(), 1);
    assert_eq!(replicator.count_filled_without(&mut form, &[], &["number"]).unwrap(), 0);
}

#[test]
fn test_all_filled_ignores_buttons() {
    let mut form = submitted_form(json!({
        "phones": {
            "0": { "number": "1", "note": "", "remove": "" },
            "1": { "number": "", "note": "x" },
            "add": "Add"
        }
    }));
    let replicator = phones(&mut form, ReplicatorConfig::new());
    with_add_button(&mut form, replicator, false);
    assert!(replicator.is_all_filled(&mut form, &[]).unwrap());
    assert!(!replicator.is_all_filled(&mut form, &["note"]).unwrap());
}

#[test]
fn test_stray_leaf_does_not_count_as_filled_row() {
    let mut form = submitted_form(json!({
        "phones": { "0": { "number": "" }, "stray": "x" }
    }));
    let replicator = phones(&mut form, ReplicatorConfig::new());
    assert_eq!(row_names(&form, replicator), vec!["0"]);
    assert_eq!(replicator.count_filled_without(&mut form, &[], &[]).unwrap(), 0);
    assert!(!replicator.is_all_filled(&mut form, &[]).unwrap());
}

#[test]
fn test_all_filled_is_vacuous_without_rows() {
    let mut form = submitted_form(json!({ "phones": {} }));
    let replicator = phones(&mut form, ReplicatorConfig::new());
    assert!(replicator.is_all_filled(&mut form, &[]).unwrap());
}

#[test]
fn test_create_click_appends_row_when_all_filled() {
    let mut form = submitted_form(json!({
        "phones": { "0": { "number": "1" }, "add": "Add" }
    }));
    let replicator = phones(&mut form, ReplicatorConfig::new());
    let add = with_add_button(&mut form, replicator, false);
    let successes = count_successes(&mut form);

    assert_eq!(form.fire_events().unwrap(), Some(add));
    assert_eq!(row_names(&form, replicator), vec!["0", "1"]);
    assert_eq!(successes.get(), 0);
    assert_eq!(form.children(replicator.id()).unwrap().last(), Some(&add));
}

#[test]
fn test_create_click_refuses_with_empty_row() {
    let mut form = submitted_form(json!({
        "phones": { "0": { "number": "" }, "add": "Add" }
    }));
    let replicator = phones(&mut form, ReplicatorConfig::new());
    with_add_button(&mut form, replicator, false);
    let successes = count_successes(&mut form);

    form.fire_events().unwrap();
    assert_eq!(row_names(&form, replicator), vec!["0"]);
    assert_eq!(successes.get(), 0);
}

#[test]
fn test_create_click_callback_sees_new_row() {
    let mut form = submitted_form(json!({
        "phones": { "0": { "number": "" }, "add": "Add" }
    }));
    let replicator = phones(&mut form, ReplicatorConfig::new());
    let add = form.add_submit(replicator.id(), "add").unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let callback = row_callback(move |form, replicator, row| {
        log.borrow_mut().push((replicator.id(), form.name(row)?.to_string()));
        Ok(())
    });
    add_create_on_click(&mut form, add, true, Some(callback)).unwrap();

    form.fire_events().unwrap();
    assert_eq!(*seen.borrow(), vec![(replicator.id(), "1".to_string())]);
}

#[test]
fn test_remove_click_drops_row_and_success() {
    let mut form = submitted_form(json!({
        "phones": {
            "0": { "number": "1" },
            "1": { "number": "2", "remove": "Remove" },
            "2": { "number": "3" }
        }
    }));
    let replicator = phones(&mut form, ReplicatorConfig::new());
    let successes = count_successes(&mut form);
    let remove = control(&form, row(&form, replicator, "1"), "remove");

    assert_eq!(form.fire_events().unwrap(), Some(remove));
    assert_eq!(row_names(&form, replicator), vec!["0", "2"]);
    assert_eq!(successes.get(), 0);
    assert!(replicator.is_submitted_by(&mut form).unwrap());
}

#[test]
fn test_remove_click_callback_runs_before_removal() {
    let mut form = submitted_form(json!({
        "phones": { "0": { "number": "1", "wrap": { "drop": "Drop" } } }
    }));
    let root = form.root();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);

    let factory = move |form: &mut Form, row: NodeId| -> Result<(), ReplicatorError> {
        form.add_input(row, "number")?;
        let wrap = form.add_container(row, "wrap")?;
        let discard = form.add_submit(wrap, "drop")?;
        let log = Rc::clone(&log);
        let callback = row_callback(move |form, _replicator, row| {
            log.borrow_mut().push((form.name(row)?.to_string(), form.contains(row)));
            Ok(())
        });
        add_remove_on_click(form, discard, Some(callback))
    };
    let replicator = Replicator::add(
        &mut form,
        root,
        "phones",
        ReplicatorNode::new(factory, ReplicatorConfig::new()),
    )
    .unwrap();

    form.fire_events().unwrap();
    assert_eq!(*seen.borrow(), vec![("0".to_string(), true)]);
    assert!(row_names(&form, replicator).is_empty());
}

#[test]
fn test_remove_button_outside_replicator_fails() {
    let mut form = submitted_form(json!({ "stray": "Go" }));
    let stray = form.add_submit(form.root(), "stray").unwrap();
    add_remove_on_click(&mut form, stray, None).unwrap();

    let err = ReplicatorError::from(form.fire_events().unwrap_err());
    assert!(matches!(err, ReplicatorError::NoEnclosingReplicator(_)));
}

#[test]
fn test_unsubmitted_form_fires_nothing() {
    let mut form = fresh_form();
    let replicator = phones(&mut form, ReplicatorConfig::new().with_default_count(1));
    with_add_button(&mut form, replicator, true);
    let successes = count_successes(&mut form);

    assert_eq!(form.fire_events().unwrap(), None);
    assert_eq!(row_names(&form, replicator), vec!["0"]);
    assert_eq!(successes.get(), 0);
}
