use dynform_replicator::{
    add_create_on_click_via, add_dynamic, add_remove_on_click_via, register, registry, ExtensionNames,
    ReplicatorConfig, ReplicatorError, ReplicatorNode,
};
use dynform_test_utils::{fresh_form, phone_row, row_names};

// Single test: the registry is process-wide and this binary owns it.
#[test]
fn test_process_wide_registration() {
    let mut form = fresh_form();
    let root = form.root();
    let node = |count| ReplicatorNode::new(phone_row, ReplicatorConfig::new().with_default_count(count));

    let err = add_dynamic("addDynamic", &mut form, root, "early", node(1)).unwrap_err();
    assert!(matches!(err, ReplicatorError::UnknownExtension(_)));

    assert!(register(&ExtensionNames::default()).is_empty());
    let phones = add_dynamic("addDynamic", &mut form, root, "phones", node(2)).unwrap();
    assert_eq!(row_names(&form, phones), vec!["0", "1"]);

    let add = form.add_submit(phones.id(), "add").unwrap();
    add_create_on_click_via("addCreateOnClick", &mut form, add, false, None).unwrap();

    let renamed = ExtensionNames::new()
        .with_dynamic("addReplicator")
        .with_remove_on_click("addRemover");
    let mut retired = register(&renamed);
    retired.sort();
    assert_eq!(retired, vec!["addDynamic".to_string(), "addRemoveOnClick".to_string()]);

    let err = add_dynamic("addDynamic", &mut form, root, "late", node(0)).unwrap_err();
    assert!(matches!(err, ReplicatorError::ExtensionReplaced(ref name) if name == "addDynamic"));
    assert!(err.is_configuration_error());
    assert!(form.child(root, "late").unwrap().is_none());

    let remove = form.add_submit(root, "remove").unwrap();
    let err = add_remove_on_click_via("addRemoveOnClick", &mut form, remove, None).unwrap_err();
    assert!(matches!(err, ReplicatorError::ExtensionReplaced(_)));
    add_remove_on_click_via("addRemover", &mut form, remove, None).unwrap();

    let err = add_remove_on_click_via("addReplicator", &mut form, remove, None).unwrap_err();
    assert!(matches!(err, ReplicatorError::BindingMismatch { .. }));

    let snapshot = registry();
    assert_eq!(snapshot.names(), vec!["addCreateOnClick", "addRemover", "addReplicator"]);
    assert!(snapshot.is_retired("addDynamic"));
}
