use dynform_replicator::{Replicator, ReplicatorConfig, ReplicatorError, ReplicatorNode};
use dynform_test_utils::{control, fresh_form, phone_row, phones, row, row_names, submitted_form};
use dynform_tree::{Form, GroupId};
use pretty_assertions::assert_eq;
use serde_json::json;

fn grouped(form: &mut Form, rows: usize) -> (Replicator, GroupId) {
    let group = form.add_group("Phones");
    let root = form.root();
    form.set_current_group(root, Some(group)).unwrap();
    let replicator = phones(form, ReplicatorConfig::new().with_default_count(rows));
    (replicator, group)
}

fn phones_elsewhere(form: &mut Form) -> Replicator {
    let holder = form.add_container(form.root(), "holder").unwrap();
    Replicator::add(
        form,
        holder,
        "phones",
        ReplicatorNode::new(phone_row, ReplicatorConfig::new().with_default_count(1)),
    )
    .unwrap()
}

#[test]
fn test_remove_rejects_foreign_rows() {
    let mut form = fresh_form();
    let replicator = phones(&mut form, ReplicatorConfig::new().with_default_count(1));
    let other = phones_elsewhere(&mut form);
    let foreign = row(&form, other, "0");

    let err = replicator.remove(&mut form, foreign, false).unwrap_err();
    assert!(matches!(err, ReplicatorError::NotOwned { .. }));
    assert_eq!(row_names(&form, other), vec!["0"]);
}

#[test]
fn test_remove_detaches_row_controls_from_groups() {
    let mut form = fresh_form();
    let (replicator, group) = grouped(&mut form, 2);
    assert_eq!(form.controls_of(group).unwrap().len(), 6);

    let first = row(&form, replicator, "0");
    let number = control(&form, first, "number");
    replicator.remove(&mut form, first, false).unwrap();

    let remaining = form.controls_of(group).unwrap();
    assert_eq!(remaining.len(), 3);
    assert!(!remaining.contains(&number));
    assert_eq!(row_names(&form, replicator), vec!["1"]);
}

#[test]
fn test_group_survives_while_referenced() {
    let mut form = fresh_form();
    let (replicator, group) = grouped(&mut form, 2);

    let first = row(&form, replicator, "0");
    replicator.remove(&mut form, first, true).unwrap();
    assert!(form.group(group).is_some());

    let second = row(&form, replicator, "1");
    replicator.remove(&mut form, second, true).unwrap();
    assert!(form.group(group).is_none());
}

#[test]
fn test_replicator_buttons_do_not_keep_group_alive() {
    let mut form = fresh_form();
    let (replicator, group) = grouped(&mut form, 1);
    let add = form.add_submit(replicator.id(), "add").unwrap();
    assert!(!form.controls_of(group).unwrap().contains(&add));

    let only = row(&form, replicator, "0");
    replicator.remove(&mut form, only, true).unwrap();
    assert!(form.group(group).is_none());
    assert!(form.contains(add));
}

#[test]
fn test_group_referenced_by_unrelated_container_survives() {
    let mut form = fresh_form();
    let (replicator, group) = grouped(&mut form, 1);
    let sidebar = form.add_container(form.root(), "sidebar").unwrap();
    form.set_current_group(sidebar, Some(group)).unwrap();

    let only = row(&form, replicator, "0");
    replicator.remove(&mut form, only, true).unwrap();

    let kept = form.group(group).unwrap();
    assert!(kept.is_empty());
}

#[test]
fn test_untouched_groups_are_kept() {
    let mut form = fresh_form();
    let (replicator, _group) = grouped(&mut form, 1);
    let empty = form.add_group("Unrelated");

    let only = row(&form, replicator, "0");
    replicator.remove(&mut form, only, true).unwrap();
    assert!(form.group(empty).is_some());
}

#[test]
fn test_submission_origin_sticks_after_removal() {
    let mut form = submitted_form(json!({
        "phones": {
            "0": { "number": "1", "remove": "Remove" },
            "1": { "number": "2" }
        }
    }));
    let replicator = phones(&mut form, ReplicatorConfig::new());
    assert!(replicator.is_submitted_by(&mut form).unwrap());

    let first = row(&form, replicator, "0");
    replicator.remove(&mut form, first, false).unwrap();
    assert!(replicator.is_submitted_by(&mut form).unwrap());
}

#[test]
fn test_removal_records_origin_without_prior_check() {
    let mut form = submitted_form(json!({
        "phones": { "0": { "number": "1", "remove": "Remove" } }
    }));
    let replicator = phones(&mut form, ReplicatorConfig::new());

    let first = row(&form, replicator, "0");
    replicator.remove(&mut form, first, false).unwrap();
    assert!(replicator.is_submitted_by(&mut form).unwrap());
}

#[test]
fn test_negative_submission_check_is_not_cached() {
    let mut form = submitted_form(json!({ "phones": { "add": "Add" } }));
    let replicator = phones(&mut form, ReplicatorConfig::new());
    assert!(!replicator.is_submitted_by(&mut form).unwrap());

    form.add_submit(replicator.id(), "add").unwrap();
    assert!(replicator.is_submitted_by(&mut form).unwrap());
}

#[test]
fn test_unsubmitted_form_has_no_origin() {
    let mut form = fresh_form();
    let replicator = phones(&mut form, ReplicatorConfig::new().with_default_count(2));
    assert_eq!(replicator.buttons(&form, true).unwrap().len(), 2);
    assert!(replicator.buttons(&form, false).unwrap().is_empty());
    assert!(!replicator.is_submitted_by(&mut form).unwrap());
}
