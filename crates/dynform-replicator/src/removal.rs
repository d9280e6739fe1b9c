//! Row removal and group cleanup

use crate::error::ReplicatorError;
use crate::replicator::ReplicatorNode;
use dynform_tree::{Form, Group, GroupId, Node, NodeId, TreeError};
use std::collections::HashSet;

impl ReplicatorNode {
    pub(crate) fn remove(
        &mut self,
        form: &mut Form,
        node: NodeId,
        row: NodeId,
        clean_up_groups: bool,
    ) -> Result<(), ReplicatorError> {
        if form.parent(row)? != Some(node) {
            return Err(ReplicatorError::NotOwned {
                replicator: form.describe(node),
                row: form.describe(row),
            });
        }

        // the button that asked for the removal usually lives in the row
        for button in form.buttons(row, true)? {
            if form.is_submitted_by(button)? {
                self.submitted_by = true;
                break;
            }
        }

        let components = form.descendants(row)?;
        let row_label = form.describe(row);
        form.remove(row)?;

        let affected = detach_from_groups(form, &components)?;
        tracing::info!(
            replicator = %form.describe(node),
            row = %row_label,
            groups = affected.len(),
            "removed row"
        );

        if clean_up_groups && !affected.is_empty() {
            delete_unclaimed_groups(form, affected);
        }
        Ok(())
    }
}

/// Take the given controls out of every group, returning the groups touched
fn detach_from_groups(form: &mut Form, components: &[NodeId]) -> Result<Vec<GroupId>, TreeError> {
    let mut affected = Vec::new();
    for group in form.group_ids() {
        for &control in components {
            if form.detach_control(group, control)? && !affected.contains(&group) {
                affected.push(group);
            }
        }
    }
    Ok(affected)
}

/// Delete affected groups that are empty and no live row inserts into
fn delete_unclaimed_groups(form: &mut Form, mut affected: Vec<GroupId>) {
    let claimed: HashSet<GroupId> = form
        .live_containers()
        .into_iter()
        .filter_map(|id| form.get(id))
        .filter(|node| !node.is_extension())
        .filter_map(Node::current_group)
        .collect();
    affected.retain(|group| !claimed.contains(group));

    for group in affected {
        if form.group(group).is_some_and(Group::is_empty) && form.remove_group(group) {
            tracing::debug!(%group, "deleted empty group");
        }
    }
}
