//! The form arena
//!
//! [`Form`] owns every node of one form for the duration of a single
//! request: structure, control values, groups, the submitted payload and
//! the success handlers.

use crate::error::TreeError;
use crate::group::{Group, GroupId, GroupSet};
use crate::node::{ClickHandler, Control, ControlKind, ExtensionSlot, Node, NodeExtension, NodeId, NodeKind};
use crate::path::{validate_segment, FieldPath};
use crate::payload::Payload;
use std::any::{type_name, TypeId};
use std::fmt;

/// Class given to containers created without an explicit one
pub const DEFAULT_CONTAINER_CLASS: &str = "container";

/// Callback run after a successful submission
pub type SuccessHandler = Box<dyn FnMut(&Form)>;

const ROOT: NodeId = NodeId::from_index(0);

/// Tree of containers and controls for one request
pub struct Form {
    nodes: Vec<Option<Node>>,
    groups: GroupSet,
    http_data: Option<Payload>,
    on_success: Vec<SuccessHandler>,
}

impl Form {
    /// Create an unsubmitted form
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let root = Node {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            current_group: None,
            kind: NodeKind::Container {
                class: "form".to_string(),
            },
        };
        Self {
            nodes: vec![Some(root)],
            groups: GroupSet::new(),
            http_data: None,
            on_success: Vec::new(),
        }
    }

    /// Mark the form as submitted with the given payload
    #[must_use]
    pub fn with_http_data(mut self, payload: Payload) -> Self {
        self.http_data = Some(payload);
        self
    }

    /// Form name
    #[inline]
    #[must_use]
    pub fn form_name(&self) -> &str {
        self.nodes[ROOT.index()].as_ref().map_or("", |root| root.name.as_str())
    }

    /// The root container
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Whether this request carries submitted data
    #[inline]
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.http_data.is_some()
    }

    /// Full submitted payload
    #[inline]
    #[must_use]
    pub fn http_data(&self) -> Option<&Payload> {
        self.http_data.as_ref()
    }

    /// Submitted payload below `path`
    #[must_use]
    pub fn http_data_at(&self, path: &FieldPath) -> Option<&Payload> {
        self.http_data.as_ref()?.get_path(path)
    }

    /// Number of live nodes, root included
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// A form always has its root
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Live node by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    /// Check whether the id points at a live node
    #[inline]
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Live node by id
    ///
    /// # Errors
    /// [`TreeError::NodeNotFound`] for removed or foreign ids.
    #[inline]
    pub fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.get(id).ok_or(TreeError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.nodes
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(TreeError::NodeNotFound(id))
    }

    /// Node name
    ///
    /// # Errors
    /// [`TreeError::NodeNotFound`] for dead ids.
    pub fn name(&self, id: NodeId) -> Result<&str, TreeError> {
        self.node(id).map(Node::name)
    }

    /// Parent of a node
    ///
    /// # Errors
    /// [`TreeError::NodeNotFound`] for dead ids.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        self.node(id).map(Node::parent)
    }

    /// Direct children in order
    ///
    /// # Errors
    /// [`TreeError::NodeNotFound`] for dead ids.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId], TreeError> {
        self.node(id).map(Node::children)
    }

    /// Direct child by name
    ///
    /// # Errors
    /// [`TreeError::NodeNotFound`] for dead ids.
    pub fn child(&self, parent: NodeId, name: &str) -> Result<Option<NodeId>, TreeError> {
        Ok(self
            .children(parent)?
            .iter()
            .copied()
            .find(|&id| self.get(id).is_some_and(|node| node.name == name)))
    }

    /// Names from the root (exclusive) down to `id`
    ///
    /// # Errors
    /// [`TreeError::NodeNotFound`] for dead ids.
    pub fn path_of(&self, id: NodeId) -> Result<FieldPath, TreeError> {
        let mut segments = Vec::new();
        let mut current = self.node(id)?;
        while let Some(parent) = current.parent {
            segments.push(current.name.clone());
            current = self.node(parent)?;
        }
        segments.reverse();
        Ok(FieldPath::new(segments))
    }

    /// Human-readable label for error messages
    #[must_use]
    pub fn describe(&self, id: NodeId) -> String {
        if id == ROOT {
            return self.form_name().to_string();
        }
        match self.path_of(id) {
            Ok(path) => path.to_string(),
            Err(_) => id.to_string(),
        }
    }

    /// All nodes below `id` in pre-order
    ///
    /// # Errors
    /// [`TreeError::NodeNotFound`] for dead ids.
    pub fn descendants(&self, id: NodeId) -> Result<Vec<NodeId>, TreeError> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(id)?.children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(node) = self.get(next) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        Ok(out)
    }

    /// Children (or all descendants) matching a predicate
    ///
    /// # Errors
    /// [`TreeError::NodeNotFound`] for dead ids.
    pub fn components<P>(&self, id: NodeId, recursive: bool, predicate: P) -> Result<Vec<NodeId>, TreeError>
    where
        P: Fn(&Node) -> bool,
    {
        let candidates = if recursive {
            self.descendants(id)?
        } else {
            self.children(id)?.to_vec()
        };
        Ok(candidates
            .into_iter()
            .filter(|&c| self.get(c).is_some_and(&predicate))
            .collect())
    }

    /// Plain and extension containers below `id`
    ///
    /// # Errors
    /// [`TreeError::NodeNotFound`] for dead ids.
    pub fn containers(&self, id: NodeId, recursive: bool) -> Result<Vec<NodeId>, TreeError> {
        self.components(id, recursive, Node::is_container)
    }

    /// Controls of any kind below `id`
    ///
    /// # Errors
    /// [`TreeError::NodeNotFound`] for dead ids.
    pub fn controls(&self, id: NodeId, recursive: bool) -> Result<Vec<NodeId>, TreeError> {
        self.components(id, recursive, |node| node.as_control().is_some())
    }

    /// Submit controls below `id`
    ///
    /// # Errors
    /// [`TreeError::NodeNotFound`] for dead ids.
    pub fn buttons(&self, id: NodeId, recursive: bool) -> Result<Vec<NodeId>, TreeError> {
        self.components(id, recursive, Node::is_submit)
    }

    /// First direct child that is a control
    ///
    /// # Errors
    /// [`TreeError::NodeNotFound`] for dead ids.
    pub fn first_control_child(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        Ok(self.controls(id, false)?.first().copied())
    }

    /// Every live container in the form except the root
    #[must_use]
    pub fn live_containers(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let node = node.as_ref()?;
                (index != ROOT.index() && node.is_container()).then(|| NodeId::from_index(index))
            })
            .collect()
    }

    /// Nearest ancestor (excluding `id`) matching a predicate
    ///
    /// # Errors
    /// [`TreeError::NodeNotFound`] for dead ids.
    pub fn closest_ancestor<P>(&self, id: NodeId, predicate: P) -> Result<Option<NodeId>, TreeError>
    where
        P: Fn(&Node) -> bool,
    {
        let mut current = self.node(id)?.parent;
        while let Some(candidate) = current {
            let node = self.node(candidate)?;
            if predicate(node) {
                return Ok(Some(candidate));
            }
            current = node.parent;
        }
        Ok(None)
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    fn insert(
        &mut self,
        parent: NodeId,
        name: &str,
        kind: NodeKind,
        before: Option<NodeId>,
    ) -> Result<NodeId, TreeError> {
        validate_segment(name)?;
        let parent_node = self.node(parent)?;
        if !parent_node.is_container() {
            return Err(TreeError::NotAContainer(self.describe(parent)));
        }
        if self.child(parent, name)?.is_some() {
            return Err(TreeError::DuplicateName {
                parent: self.describe(parent),
                name: name.to_string(),
            });
        }
        // Controls placed directly on an extension container stay out of its group.
        let group = parent_node.current_group.filter(|_| !parent_node.is_extension());
        let is_control = matches!(kind, NodeKind::Control(_));

        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Some(Node {
            name: name.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            current_group: None,
            kind,
        }));

        let siblings = &mut self.node_mut(parent)?.children;
        match before.and_then(|b| siblings.iter().position(|&c| c == b)) {
            Some(position) => siblings.insert(position, id),
            None => siblings.push(id),
        }

        if is_control {
            if let Some(group) = group {
                self.groups.attach(group, id);
            }
        }
        Ok(id)
    }

    /// Add a plain container
    ///
    /// # Errors
    /// Fails for invalid or duplicate names and non-container parents.
    pub fn add_container(&mut self, parent: NodeId, name: &str) -> Result<NodeId, TreeError> {
        self.add_container_before(parent, name, DEFAULT_CONTAINER_CLASS, None)
    }

    /// Add a container of the given class, placed before `before` when that
    /// is a child of `parent`
    ///
    /// # Errors
    /// Fails for invalid or duplicate names and non-container parents.
    pub fn add_container_before(
        &mut self,
        parent: NodeId,
        name: &str,
        class: &str,
        before: Option<NodeId>,
    ) -> Result<NodeId, TreeError> {
        let kind = NodeKind::Container {
            class: class.to_string(),
        };
        self.insert(parent, name, kind, before)
    }

    /// Add a value input; picks up its submitted value if there is one
    ///
    /// # Errors
    /// Fails for invalid or duplicate names and non-container parents.
    pub fn add_input(&mut self, parent: NodeId, name: &str) -> Result<NodeId, TreeError> {
        let id = self.insert(parent, name, NodeKind::Control(Control::new(ControlKind::Input)), None)?;
        let submitted = self
            .http_data_at(&self.path_of(id)?)
            .and_then(Payload::as_leaf)
            .map(str::to_string);
        if let Some(value) = submitted {
            self.set_value(id, value)?;
        }
        Ok(id)
    }

    /// Add a submit button
    ///
    /// # Errors
    /// Fails for invalid or duplicate names and non-container parents.
    pub fn add_submit(&mut self, parent: NodeId, name: &str) -> Result<NodeId, TreeError> {
        self.insert(parent, name, NodeKind::Control(Control::new(ControlKind::Submit)), None)
    }

    /// Insert an extension container; call [`Form::attach`] to run its hook
    ///
    /// # Errors
    /// Fails for invalid or duplicate names and non-container parents.
    pub fn add_extension<E: NodeExtension>(
        &mut self,
        parent: NodeId,
        name: &str,
        extension: E,
    ) -> Result<NodeId, TreeError> {
        let slot = ExtensionSlot {
            hook: Some(Box::new(extension)),
            type_id: TypeId::of::<E>(),
            type_name: type_name::<E>(),
            attached: false,
        };
        self.insert(parent, name, NodeKind::Extension(slot), None)
    }

    /// Run the extension's attach hook; later calls are no-ops
    ///
    /// # Errors
    /// [`TreeError::Hook`] wraps whatever the hook returned.
    pub fn attach(&mut self, id: NodeId) -> Result<(), TreeError> {
        let describe = self.describe(id);
        match &mut self.node_mut(id)?.kind {
            NodeKind::Extension(slot) if slot.attached => return Ok(()),
            NodeKind::Extension(slot) => slot.attached = true,
            _ => return Err(TreeError::NotAnExtension(describe)),
        }

        tracing::debug!(node = %describe, "attaching extension");
        let mut hook = self.take_hook(id)?;
        let result = hook.on_attach(self, id);
        self.restore_hook(id, hook);
        result.map_err(|source| TreeError::Hook {
            node: describe,
            source,
        })
    }

    /// Detach a node and its whole subtree
    ///
    /// Group membership is left untouched.
    ///
    /// # Errors
    /// [`TreeError::RootRemoval`] for the root, `NodeNotFound` for dead ids.
    pub fn remove(&mut self, id: NodeId) -> Result<(), TreeError> {
        if id == ROOT {
            return Err(TreeError::RootRemoval);
        }
        let subtree = self.descendants(id)?;
        if let Some(parent) = self.node(id)?.parent {
            self.node_mut(parent)?.children.retain(|&c| c != id);
        }
        tracing::debug!(node = %self.describe(id), removed = subtree.len() + 1, "detaching subtree");
        for dead in subtree.into_iter().chain(std::iter::once(id)) {
            self.nodes[dead.index()] = None;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Extensions
    // ------------------------------------------------------------------

    fn take_hook(&mut self, id: NodeId) -> Result<Box<dyn NodeExtension>, TreeError> {
        let describe = self.describe(id);
        match &mut self.node_mut(id)?.kind {
            NodeKind::Extension(slot) => slot.hook.take().ok_or(TreeError::ExtensionBusy(describe)),
            _ => Err(TreeError::NotAnExtension(describe)),
        }
    }

    fn restore_hook(&mut self, id: NodeId, hook: Box<dyn NodeExtension>) {
        if let Some(Node {
            kind: NodeKind::Extension(slot),
            ..
        }) = self.nodes.get_mut(id.index()).and_then(Option::as_mut)
        {
            slot.hook = Some(hook);
        }
    }

    /// Lend the extension of `id` out together with the form
    ///
    /// # Errors
    /// `NotAnExtension`, `ExtensionBusy` when already lent out, or
    /// `ExtensionType` when the hook is not an `E`.
    pub fn with_extension<E, R, F>(&mut self, id: NodeId, f: F) -> Result<R, TreeError>
    where
        E: NodeExtension,
        F: FnOnce(&mut E, &mut Form) -> R,
    {
        let mut hook = self.take_hook(id)?;
        let result = match hook.as_any_mut().downcast_mut::<E>() {
            Some(extension) => Ok(f(extension, self)),
            None => Err(TreeError::ExtensionType {
                node: self.describe(id),
                expected: type_name::<E>(),
            }),
        };
        self.restore_hook(id, hook);
        result
    }

    /// Borrow the extension of `id`, unless it is lent out
    #[must_use]
    pub fn extension<E: NodeExtension>(&self, id: NodeId) -> Option<&E> {
        match &self.get(id)?.kind {
            NodeKind::Extension(slot) => slot.hook.as_ref()?.as_any().downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Whether `id` is an extension container of type `E`
    #[must_use]
    pub fn is_extension<E: NodeExtension>(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_extension_of::<E>)
    }

    // ------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------

    fn control_mut(&mut self, id: NodeId) -> Result<&mut Control, TreeError> {
        let describe = self.describe(id);
        match &mut self.node_mut(id)?.kind {
            NodeKind::Control(control) => Ok(control),
            _ => Err(TreeError::NotAControl(describe)),
        }
    }

    fn submit_mut(&mut self, id: NodeId) -> Result<&mut Control, TreeError> {
        let describe = self.describe(id);
        let control = self.control_mut(id)?;
        if control.is_submit() {
            Ok(control)
        } else {
            Err(TreeError::NotASubmit(describe))
        }
    }

    /// Current value of a control
    ///
    /// # Errors
    /// `NotAControl` for containers.
    pub fn value(&self, id: NodeId) -> Result<&str, TreeError> {
        self.node(id)?
            .as_control()
            .map(Control::value)
            .ok_or_else(|| TreeError::NotAControl(self.describe(id)))
    }

    /// Overwrite the value of a control
    ///
    /// # Errors
    /// `NotAControl` for containers.
    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> Result<(), TreeError> {
        self.control_mut(id)?.value = value.into();
        Ok(())
    }

    /// Write a nested payload into the controls below `container`
    ///
    /// Unknown names and shape mismatches are skipped; buttons keep their value.
    ///
    /// # Errors
    /// `NodeNotFound` for a dead container.
    pub fn set_values(&mut self, container: NodeId, values: &Payload) -> Result<(), TreeError> {
        let Some(entries) = values.as_nested() else {
            return Ok(());
        };
        for (name, value) in entries {
            let Some(child) = self.child(container, name)? else {
                continue;
            };
            let (is_container, is_input) = {
                let node = self.node(child)?;
                (node.is_container(), node.as_control().is_some() && !node.is_submit())
            };
            match value {
                Payload::Nested(_) if is_container => self.set_values(child, value)?,
                Payload::Leaf(leaf) if is_input => self.set_value(child, leaf.clone())?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Current values below `container`, buttons excluded
    ///
    /// # Errors
    /// `NodeNotFound` for a dead container.
    pub fn values(&self, container: NodeId) -> Result<Payload, TreeError> {
        let mut entries = Vec::new();
        for &child in self.children(container)? {
            let node = self.node(child)?;
            if node.is_container() {
                entries.push((node.name.clone(), self.values(child)?));
            } else if let Some(control) = node.as_control().filter(|c| !c.is_submit()) {
                entries.push((node.name.clone(), Payload::leaf(control.value())));
            }
        }
        Ok(entries.into_iter().collect())
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Whether this submit control triggered the request
    ///
    /// Only submit controls can be the origin; other controls answer `false`.
    ///
    /// # Errors
    /// `NotAControl` for containers.
    pub fn is_submitted_by(&self, control: NodeId) -> Result<bool, TreeError> {
        let node = self.node(control)?;
        if node.as_control().is_none() {
            return Err(TreeError::NotAControl(self.describe(control)));
        }
        if !node.is_submit() || !self.is_submitted() {
            return Ok(false);
        }
        Ok(self.http_data_at(&self.path_of(control)?).is_some())
    }

    /// Submit control that triggered the request
    #[must_use]
    pub fn submitter(&self) -> Option<NodeId> {
        self.buttons(ROOT, true)
            .ok()?
            .into_iter()
            .find(|&button| self.is_submitted_by(button).unwrap_or(false))
    }

    /// Register a click handler on a submit control
    ///
    /// # Errors
    /// `NotASubmit` for other nodes.
    pub fn add_click_handler(&mut self, button: NodeId, handler: ClickHandler) -> Result<(), TreeError> {
        self.submit_mut(button)?.on_click.push(handler);
        Ok(())
    }

    /// Restrict validation triggered by this button to the given paths
    ///
    /// # Errors
    /// `NotASubmit` for other nodes.
    pub fn set_validation_scope(&mut self, button: NodeId, scope: Vec<FieldPath>) -> Result<(), TreeError> {
        self.submit_mut(button)?.validation_scope = Some(scope);
        Ok(())
    }

    /// Register a handler for successful submissions
    pub fn on_success(&mut self, handler: impl FnMut(&Form) + 'static) {
        self.on_success.push(Box::new(handler));
    }

    /// Drop every success handler for this request
    pub fn clear_success_handlers(&mut self) {
        self.on_success.clear();
    }

    /// Number of pending success handlers
    #[inline]
    #[must_use]
    pub fn success_handler_count(&self) -> usize {
        self.on_success.len()
    }

    /// Dispatch the request: click handlers of the submitter, then any
    /// success handlers still registered
    ///
    /// Returns the submitter, if any.
    ///
    /// # Errors
    /// [`TreeError::Hook`] when a click handler fails; success handlers are
    /// skipped in that case.
    pub fn fire_events(&mut self) -> Result<Option<NodeId>, TreeError> {
        if !self.is_submitted() {
            return Ok(None);
        }

        let submitter = self.submitter();
        if let Some(button) = submitter {
            let describe = self.describe(button);
            let handlers: Vec<ClickHandler> = self
                .node(button)?
                .as_control()
                .map(|control| control.on_click.clone())
                .unwrap_or_default();
            tracing::debug!(button = %describe, handlers = handlers.len(), "firing click handlers");
            for handler in handlers {
                handler(self, button).map_err(|source| TreeError::Hook {
                    node: describe.clone(),
                    source,
                })?;
            }
        }

        let mut handlers = std::mem::take(&mut self.on_success);
        for handler in &mut handlers {
            handler(&*self);
        }
        handlers.append(&mut self.on_success);
        self.on_success = handlers;

        Ok(submitter)
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    /// Create a group
    pub fn add_group(&mut self, label: impl Into<String>) -> GroupId {
        self.groups.add(label)
    }

    /// Look up a group
    #[inline]
    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id)
    }

    /// All groups of the form
    #[inline]
    #[must_use]
    pub fn groups(&self) -> &GroupSet {
        &self.groups
    }

    /// Ids of every group
    #[must_use]
    pub fn group_ids(&self) -> Vec<GroupId> {
        self.groups.ids()
    }

    /// Member controls of a group
    ///
    /// # Errors
    /// `GroupNotFound` for deleted groups.
    pub fn controls_of(&self, group: GroupId) -> Result<Vec<NodeId>, TreeError> {
        self.groups
            .get(group)
            .map(|g| g.controls().collect())
            .ok_or(TreeError::GroupNotFound(group))
    }

    /// Put a control into a group
    ///
    /// # Errors
    /// `GroupNotFound` for deleted groups, `NotAControl` for containers.
    pub fn add_to_group(&mut self, group: GroupId, control: NodeId) -> Result<(), TreeError> {
        if self.node(control)?.as_control().is_none() {
            return Err(TreeError::NotAControl(self.describe(control)));
        }
        if self.groups.attach(group, control) {
            Ok(())
        } else {
            Err(TreeError::GroupNotFound(group))
        }
    }

    /// Take a control out of a group; returns whether it was a member
    ///
    /// Works for ids of already removed nodes.
    ///
    /// # Errors
    /// `GroupNotFound` for deleted groups.
    pub fn detach_control(&mut self, group: GroupId, control: NodeId) -> Result<bool, TreeError> {
        if !self.groups.contains(group) {
            return Err(TreeError::GroupNotFound(group));
        }
        Ok(self.groups.detach(group, control))
    }

    /// Delete a group; returns whether it existed
    pub fn remove_group(&mut self, group: GroupId) -> bool {
        self.groups.remove(group).is_some()
    }

    /// Group that controls added to `container` join
    ///
    /// # Errors
    /// `NodeNotFound` for dead ids.
    pub fn current_group(&self, container: NodeId) -> Result<Option<GroupId>, TreeError> {
        self.node(container).map(Node::current_group)
    }

    /// Point `container` at a group (or at none)
    ///
    /// # Errors
    /// `NotAContainer` for controls, `GroupNotFound` for deleted groups.
    pub fn set_current_group(&mut self, container: NodeId, group: Option<GroupId>) -> Result<(), TreeError> {
        if !self.node(container)?.is_container() {
            return Err(TreeError::NotAContainer(self.describe(container)));
        }
        if let Some(group) = group.filter(|&g| !self.groups.contains(g)) {
            return Err(TreeError::GroupNotFound(group));
        }
        self.node_mut(container)?.current_group = group;
        Ok(())
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("name", &self.form_name())
            .field("nodes", &self.len())
            .field("groups", &self.groups.len())
            .field("submitted", &self.is_submitted())
            .field("on_success", &self.on_success.len())
            .finish()
    }
}
