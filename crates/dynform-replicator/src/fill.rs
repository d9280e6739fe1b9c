//! Counting rows the user actually filled in

use crate::error::ReplicatorError;
use crate::replicator::ReplicatorNode;
use dynform_tree::{Form, NodeId, Payload};
use std::collections::HashSet;

/// Count rows of `slice` that hold at least one non-empty value
///
/// Only nested entries are rows; top-level leaves such as button values are
/// never counted. Top-level keys in `exclude` are skipped entirely; keys in
/// `exclude_sub` are ignored inside every row, at any depth.
#[must_use]
pub fn count_filled(slice: &Payload, exclude: &[&str], exclude_sub: &[&str]) -> usize {
    let exclude: HashSet<&str> = exclude.iter().copied().collect();
    let exclude_sub: HashSet<&str> = exclude_sub.iter().copied().collect();

    let Some(entries) = slice.as_nested() else {
        return 0;
    };
    entries
        .iter()
        .filter(|(key, row)| !row.is_leaf() && !exclude.contains(key.as_str()))
        .filter(|(_, row)| row.without_keys_deep(&exclude_sub).is_filled())
        .count()
}

impl ReplicatorNode {
    pub(crate) fn count_filled_without(
        &self,
        form: &Form,
        node: NodeId,
        exclude: &[&str],
        exclude_sub: &[&str],
    ) -> Result<usize, ReplicatorError> {
        Ok(count_filled(self.http_data(form, node)?, exclude, exclude_sub))
    }

    /// Every row filled, ignoring buttons inside rows and the replicator's
    /// own controls
    pub(crate) fn is_all_filled(&self, form: &Form, node: NodeId, except: &[&str]) -> Result<bool, ReplicatorError> {
        let own_controls: Vec<&str> = form
            .controls(node, false)?
            .into_iter()
            .map(|id| form.name(id))
            .collect::<Result<_, _>>()?;

        let rows = form.containers(node, false)?;
        let mut ignored: Vec<&str> = except.to_vec();
        for &row in &rows {
            for button in form.buttons(row, true)? {
                let name = form.name(button)?;
                if !ignored.contains(&name) {
                    ignored.push(name);
                }
            }
        }

        let filled = self.count_filled_without(form, node, &own_controls, &ignored)?;
        tracing::trace!(replicator = %form.describe(node), filled, rows = rows.len(), "fill check");
        Ok(filled == rows.len())
    }
}
