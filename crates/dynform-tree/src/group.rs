//! Control groups
//!
//! Groups are a form-wide grouping of controls (typically rendered as
//! fieldsets). They are independent of the container hierarchy: a control
//! belongs to zero or more groups, and containers only point at a group as
//! the place where newly added controls land.

use crate::node::NodeId;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a group within one form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(usize);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

/// Named set of controls
#[derive(Debug, Clone, Default)]
pub struct Group {
    label: String,
    controls: IndexSet<NodeId>,
}

impl Group {
    /// Group label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Controls in insertion order
    #[inline]
    pub fn controls(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.controls.iter().copied()
    }

    /// Check membership
    #[inline]
    #[must_use]
    pub fn contains(&self, control: NodeId) -> bool {
        self.controls.contains(&control)
    }

    /// Number of member controls
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Check if the group has no controls
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

/// All groups of a form, in creation order
#[derive(Debug, Clone, Default)]
pub struct GroupSet {
    groups: IndexMap<GroupId, Group>,
    next_id: usize,
}

impl GroupSet {
    /// Create an empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new group and return its id
    pub fn add(&mut self, label: impl Into<String>) -> GroupId {
        let id = GroupId(self.next_id);
        self.next_id += 1;
        self.groups.insert(
            id,
            Group {
                label: label.into(),
                controls: IndexSet::new(),
            },
        );
        id
    }

    /// Look up a group
    #[inline]
    #[must_use]
    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    /// Check whether the group is still part of the form
    #[inline]
    #[must_use]
    pub fn contains(&self, id: GroupId) -> bool {
        self.groups.contains_key(&id)
    }

    /// Ids of all groups
    #[must_use]
    pub fn ids(&self) -> Vec<GroupId> {
        self.groups.keys().copied().collect()
    }

    /// Add a control to a group; returns `false` if the group is unknown
    pub fn attach(&mut self, id: GroupId, control: NodeId) -> bool {
        match self.groups.get_mut(&id) {
            Some(group) => {
                group.controls.insert(control);
                true
            }
            None => false,
        }
    }

    /// Remove a control from a group; returns whether it was a member
    pub fn detach(&mut self, id: GroupId, control: NodeId) -> bool {
        self.groups
            .get_mut(&id)
            .is_some_and(|group| group.controls.shift_remove(&control))
    }

    /// Delete a group from the form
    pub fn remove(&mut self, id: GroupId) -> Option<Group> {
        self.groups.shift_remove(&id)
    }

    /// Number of groups
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
