//! The replication controller
//!
//! [`ReplicatorNode`] is the state living inside the form tree: factory,
//! configuration, names issued during this request, the sticky submission
//! flag and the memoized payload slice. [`Replicator`] is the copyable
//! handle callers use to drive it.

use crate::config::ReplicatorConfig;
use crate::error::ReplicatorError;
use crate::naming::next_row_name;
use dynform_tree::{Form, HookError, Node, NodeExtension, NodeId, Payload};
use indexmap::IndexSet;
use once_cell::unsync::OnceCell;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Populates a freshly created row
pub type RowFactory = Rc<dyn Fn(&mut Form, NodeId) -> Result<(), ReplicatorError>>;

/// Replicator state stored in its tree node
pub struct ReplicatorNode {
    pub(crate) factory: RowFactory,
    pub(crate) config: ReplicatorConfig,
    pub(crate) created: IndexSet<String>,
    pub(crate) submitted_by: bool,
    pub(crate) http_data: OnceCell<Payload>,
}

impl ReplicatorNode {
    /// Create a replicator with a factory and configuration
    #[must_use]
    pub fn new<F>(factory: F, config: ReplicatorConfig) -> Self
    where
        F: Fn(&mut Form, NodeId) -> Result<(), ReplicatorError> + 'static,
    {
        Self::with_factory(Rc::new(factory), config)
    }

    fn with_factory(factory: RowFactory, config: ReplicatorConfig) -> Self {
        Self {
            factory,
            config,
            created: IndexSet::new(),
            submitted_by: false,
            http_data: OnceCell::new(),
        }
    }

    /// Start a builder
    #[inline]
    #[must_use]
    pub fn builder() -> ReplicatorBuilder {
        ReplicatorBuilder::default()
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ReplicatorConfig {
        &self.config
    }

    /// Names issued during this request, removed rows included
    pub fn created_names(&self) -> impl Iterator<Item = &str> {
        self.created.iter().map(String::as_str)
    }

    /// Submitted data below this replicator, computed once
    pub(crate) fn http_data(&self, form: &Form, node: NodeId) -> Result<&Payload, ReplicatorError> {
        self.http_data.get_or_try_init(|| {
            let path = form.path_of(node)?;
            Ok(form.http_data_at(&path).cloned().unwrap_or_else(Payload::empty))
        })
    }

    /// Bring the row set in line with the request
    ///
    /// Submitted forms get back every row present in the payload; otherwise
    /// `default_count` rows named `0..n` are created. Never removes rows and
    /// never re-issues a name already created in this request.
    pub(crate) fn reconcile(&mut self, form: &mut Form, node: NodeId) -> Result<(), ReplicatorError> {
        if form.is_submitted() {
            let names: Vec<String> = self
                .http_data(form, node)?
                .nested_keys()
                .into_iter()
                .map(str::to_string)
                .collect();
            tracing::debug!(
                replicator = %form.describe(node),
                submitted_rows = names.len(),
                "rebuilding rows from submitted data"
            );
            for name in names {
                if self.is_missing(form, node, &name)? {
                    self.create_one(form, node, Some(&name))?;
                }
            }

            if self.config.force_default {
                while form.containers(node, false)?.len() < self.config.default_count {
                    self.create_one(form, node, None)?;
                }
            }
        } else {
            tracing::debug!(
                replicator = %form.describe(node),
                default_count = self.config.default_count,
                "creating default rows"
            );
            for index in 0..self.config.default_count {
                let name = index.to_string();
                if self.is_missing(form, node, &name)? {
                    self.create_one(form, node, Some(&name))?;
                }
            }
        }
        Ok(())
    }

    fn is_missing(&self, form: &Form, node: NodeId, name: &str) -> Result<bool, ReplicatorError> {
        Ok(form.child(node, name)?.is_none() && !self.created.contains(name))
    }

    /// Pick the name of the next row
    ///
    /// Automatic names also skip past every name issued earlier in the
    /// request, including rows removed since.
    ///
    /// # Errors
    /// [`ReplicatorError::DuplicateName`] when a requested name was already issued.
    pub(crate) fn allocate(&self, form: &Form, node: NodeId, requested: Option<&str>) -> Result<String, ReplicatorError> {
        let name = match requested {
            Some(name) => name.to_string(),
            None => {
                let rows = form.containers(node, false)?;
                let live = rows.into_iter().filter_map(|row| form.name(row).ok());
                next_row_name(live.chain(self.created.iter().map(String::as_str)))
            }
        };

        if self.created.contains(&name) {
            return Err(ReplicatorError::DuplicateName {
                replicator: form.describe(node),
                name,
            });
        }
        Ok(name)
    }

    pub(crate) fn create_one(
        &mut self,
        form: &mut Form,
        node: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, ReplicatorError> {
        let name = self.allocate(form, node, name)?;
        let before = form.first_control_child(node)?;
        let row = form.add_container_before(node, &name, &self.config.container_class, before)?;

        let group = form.current_group(node)?.filter(|&g| form.group(g).is_some());
        form.set_current_group(row, group)?;

        self.created.insert(name.clone());
        tracing::debug!(replicator = %form.describe(node), row = %name, "created row");

        let factory = Rc::clone(&self.factory);
        factory(form, row)?;
        Ok(row)
    }

    /// Whether the request was submitted from inside this replicator
    ///
    /// A positive answer sticks for the rest of the request.
    pub(crate) fn is_submitted_by(&mut self, form: &Form, node: NodeId) -> Result<bool, ReplicatorError> {
        if self.submitted_by {
            return Ok(true);
        }

        for button in form.buttons(node, true)? {
            if form.is_submitted_by(button)? {
                tracing::debug!(replicator = %form.describe(node), button = %form.describe(button), "submission origin found");
                self.submitted_by = true;
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub(crate) fn set_values(&mut self, form: &mut Form, node: NodeId, values: &Payload) -> Result<(), ReplicatorError> {
        if !form.is_submitted() {
            let names: Vec<String> = values.nested_keys().into_iter().map(str::to_string).collect();
            for name in names {
                if form.child(node, &name)?.is_none() {
                    self.create_one(form, node, Some(&name))?;
                }
            }
        }
        form.set_values(node, values)?;
        Ok(())
    }
}

impl NodeExtension for ReplicatorNode {
    fn on_attach(&mut self, form: &mut Form, node: NodeId) -> Result<(), HookError> {
        self.reconcile(form, node)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl fmt::Debug for ReplicatorNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplicatorNode")
            .field("config", &self.config)
            .field("created", &self.created)
            .field("submitted_by", &self.submitted_by)
            .field("http_data", &self.http_data.get())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ReplicatorNode`]
#[derive(Default)]
pub struct ReplicatorBuilder {
    factory: Option<RowFactory>,
    config: ReplicatorConfig,
}

impl ReplicatorBuilder {
    /// With row factory
    #[must_use]
    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&mut Form, NodeId) -> Result<(), ReplicatorError> + 'static,
    {
        self.factory = Some(Rc::new(factory));
        self
    }

    /// With full configuration
    #[inline]
    #[must_use]
    pub fn config(mut self, config: ReplicatorConfig) -> Self {
        self.config = config;
        self
    }

    /// With default row count
    #[inline]
    #[must_use]
    pub fn default_count(mut self, count: usize) -> Self {
        self.config.default_count = count;
        self
    }

    /// With forced top-up on submission
    #[inline]
    #[must_use]
    pub fn force_default(mut self, force: bool) -> Self {
        self.config.force_default = force;
        self
    }

    /// Finish the replicator
    ///
    /// # Errors
    /// [`ReplicatorError::InvalidFactory`] when no factory was given.
    pub fn build(self) -> Result<ReplicatorNode, ReplicatorError> {
        let factory = self.factory.ok_or(ReplicatorError::InvalidFactory)?;
        Ok(ReplicatorNode::with_factory(factory, self.config))
    }
}

impl fmt::Debug for ReplicatorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplicatorBuilder")
            .field("factory", &self.factory.is_some())
            .field("config", &self.config)
            .finish()
    }
}

/// Handle of a replicator attached to a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Replicator(NodeId);

impl Replicator {
    /// Insert a replicator under `parent` and attach it
    ///
    /// The replicator inherits the parent's current group, then reconciles
    /// its rows against the request.
    ///
    /// # Errors
    /// Tree errors for bad names, and whatever reconciliation raises.
    pub fn add(form: &mut Form, parent: NodeId, name: &str, replicator: ReplicatorNode) -> Result<Self, ReplicatorError> {
        let id = form.add_extension(parent, name, replicator)?;
        let group = form.current_group(parent)?.filter(|&g| form.group(g).is_some());
        form.set_current_group(id, group)?;
        form.attach(id)?;
        Ok(Self(id))
    }

    /// Handle for an existing replicator node
    ///
    /// # Errors
    /// [`ReplicatorError::NotAReplicator`] for other nodes.
    pub fn from_node(form: &Form, id: NodeId) -> Result<Self, ReplicatorError> {
        if form.is_extension::<ReplicatorNode>(id) {
            Ok(Self(id))
        } else {
            Err(ReplicatorError::NotAReplicator(form.describe(id)))
        }
    }

    /// Nearest replicator enclosing `node`
    ///
    /// # Errors
    /// [`ReplicatorError::NoEnclosingReplicator`] when there is none.
    pub fn lookup(form: &Form, node: NodeId) -> Result<Self, ReplicatorError> {
        form.closest_ancestor(node, Node::is_extension_of::<ReplicatorNode>)?
            .map(Self)
            .ok_or_else(|| ReplicatorError::NoEnclosingReplicator(form.describe(node)))
    }

    /// Tree node of this replicator
    #[inline]
    #[must_use]
    pub fn id(self) -> NodeId {
        self.0
    }

    fn with_state<R, F>(self, form: &mut Form, f: F) -> Result<R, ReplicatorError>
    where
        F: FnOnce(&mut ReplicatorNode, &mut Form) -> Result<R, ReplicatorError>,
    {
        form.with_extension::<ReplicatorNode, _, _>(self.0, f)?
    }

    fn state(self, form: &Form) -> Result<&ReplicatorNode, ReplicatorError> {
        form.extension::<ReplicatorNode>(self.0)
            .ok_or_else(|| ReplicatorError::NotAReplicator(form.describe(self.0)))
    }

    /// Configuration
    ///
    /// # Errors
    /// Fails if the node is gone or its state is lent out.
    pub fn config(self, form: &Form) -> Result<ReplicatorConfig, ReplicatorError> {
        self.state(form).map(|state| state.config.clone())
    }

    /// Names issued during this request
    ///
    /// # Errors
    /// Fails if the node is gone or its state is lent out.
    pub fn created_names(self, form: &Form) -> Result<Vec<String>, ReplicatorError> {
        self.state(form)
            .map(|state| state.created_names().map(str::to_string).collect())
    }

    /// Replace the row factory for rows created from now on
    ///
    /// # Errors
    /// Fails if the node is not a live replicator.
    pub fn set_factory<F>(self, form: &mut Form, factory: F) -> Result<(), ReplicatorError>
    where
        F: Fn(&mut Form, NodeId) -> Result<(), ReplicatorError> + 'static,
    {
        let factory: RowFactory = Rc::new(factory);
        self.with_state(form, |state, _| {
            state.factory = factory;
            Ok(())
        })
    }

    /// Submitted data below this replicator
    ///
    /// # Errors
    /// Fails if the node is not a live replicator.
    pub fn http_data(self, form: &mut Form) -> Result<Payload, ReplicatorError> {
        let id = self.0;
        self.with_state(form, |state, form| state.http_data(form, id).cloned())
    }

    /// Re-run reconciliation, as a second attachment would
    ///
    /// # Errors
    /// Propagates row creation errors.
    pub fn reconcile(self, form: &mut Form) -> Result<(), ReplicatorError> {
        let id = self.0;
        self.with_state(form, |state, form| state.reconcile(form, id))
    }

    /// Create a row, named by the caller or allocated
    ///
    /// # Errors
    /// [`ReplicatorError::DuplicateName`] if the name was already issued in
    /// this request; `TreeError::DuplicateName` if a live child uses it.
    pub fn create_one(self, form: &mut Form, name: Option<&str>) -> Result<NodeId, ReplicatorError> {
        let id = self.0;
        self.with_state(form, |state, form| state.create_one(form, id, name))
    }

    /// Add a row of the configured class without running the factory
    ///
    /// # Errors
    /// Tree errors for bad or taken names.
    pub fn add_container(self, form: &mut Form, name: &str) -> Result<NodeId, ReplicatorError> {
        let class = self.config(form)?.container_class;
        Ok(form.add_container_before(self.0, name, &class, None)?)
    }

    /// Rows of this replicator
    ///
    /// # Errors
    /// Fails if the node is gone.
    pub fn containers(self, form: &Form, recursive: bool) -> Result<Vec<NodeId>, ReplicatorError> {
        Ok(form.containers(self.0, recursive)?)
    }

    /// Submit controls inside this replicator
    ///
    /// # Errors
    /// Fails if the node is gone.
    pub fn buttons(self, form: &Form, recursive: bool) -> Result<Vec<NodeId>, ReplicatorError> {
        Ok(form.buttons(self.0, recursive)?)
    }

    /// Whether the request was submitted from inside this replicator
    ///
    /// # Errors
    /// Fails if the node is not a live replicator.
    pub fn is_submitted_by(self, form: &mut Form) -> Result<bool, ReplicatorError> {
        let id = self.0;
        self.with_state(form, |state, form| state.is_submitted_by(form, id))
    }

    /// Remove a row, optionally deleting groups it leaves empty
    ///
    /// # Errors
    /// [`ReplicatorError::NotOwned`] if `row` is not a child of this replicator.
    pub fn remove(self, form: &mut Form, row: NodeId, clean_up_groups: bool) -> Result<(), ReplicatorError> {
        let id = self.0;
        self.with_state(form, |state, form| state.remove(form, id, row, clean_up_groups))
    }

    /// Count submitted rows with at least one filled value
    ///
    /// # Errors
    /// Fails if the node is not a live replicator.
    pub fn count_filled_without(
        self,
        form: &mut Form,
        exclude: &[&str],
        exclude_sub: &[&str],
    ) -> Result<usize, ReplicatorError> {
        let id = self.0;
        self.with_state(form, |state, form| state.count_filled_without(form, id, exclude, exclude_sub))
    }

    /// Whether every existing row was submitted with some value
    ///
    /// # Errors
    /// Fails if the node is not a live replicator.
    pub fn is_all_filled(self, form: &mut Form, except: &[&str]) -> Result<bool, ReplicatorError> {
        let id = self.0;
        self.with_state(form, |state, form| state.is_all_filled(form, id, except))
    }

    /// Write values, creating missing rows first on unsubmitted forms
    ///
    /// # Errors
    /// Propagates row creation errors.
    pub fn set_values(self, form: &mut Form, values: &Payload) -> Result<(), ReplicatorError> {
        let id = self.0;
        self.with_state(form, |state, form| state.set_values(form, id, values))
    }

    /// The direct child of this replicator that contains `node`
    ///
    /// # Errors
    /// [`ReplicatorError::NotOwned`] when `node` is not inside one of its rows.
    pub fn row_of(self, form: &Form, node: NodeId) -> Result<NodeId, ReplicatorError> {
        let mut current = node;
        while let Some(parent) = form.parent(current)? {
            if parent == self.0 {
                if form.node(current)?.is_container() {
                    return Ok(current);
                }
                break;
            }
            current = parent;
        }
        Err(ReplicatorError::NotOwned {
            replicator: form.describe(self.0),
            row: form.describe(node),
        })
    }
}
