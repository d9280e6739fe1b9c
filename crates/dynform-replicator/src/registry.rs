//! Named extension bindings
//!
//! Maps caller-chosen method names to the three replicator behaviours:
//! the factory shortcut and the two button bindings. Re-registering a
//! behaviour under a new name retires the old one, and calls through a
//! retired name fail with [`ReplicatorError::ExtensionReplaced`] instead of
//! silently doing nothing.
//!
//! A process-wide registry is available through [`register`] and the free
//! dispatch functions; [`ExtensionRegistry`] values can also be kept locally.

use crate::actions::{add_create_on_click, add_remove_on_click, RowCallback};
use crate::error::ReplicatorError;
use crate::replicator::{Replicator, ReplicatorNode};
use dynform_tree::{Form, NodeId};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Behaviour reachable through an extension method name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    /// Add a replicator to a container
    Dynamic,
    /// Turn a submit button into a row remover
    RemoveOnClick,
    /// Turn a submit button into a row creator
    CreateOnClick,
}

impl Binding {
    /// Every binding, in registration order
    pub const ALL: [Binding; 3] = [Binding::Dynamic, Binding::RemoveOnClick, Binding::CreateOnClick];
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dynamic => "dynamic",
            Self::RemoveOnClick => "remove-on-click",
            Self::CreateOnClick => "create-on-click",
        };
        f.write_str(name)
    }
}

/// Method names to install the bindings under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionNames {
    /// Factory shortcut, `addDynamic` by default
    pub dynamic: String,
    /// Remove binding, `addRemoveOnClick` by default
    pub remove_on_click: String,
    /// Create binding, `addCreateOnClick` by default
    pub create_on_click: String,
}

impl ExtensionNames {
    /// Default names
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With factory shortcut name
    #[must_use]
    pub fn with_dynamic(mut self, name: impl Into<String>) -> Self {
        self.dynamic = name.into();
        self
    }

    /// With remove binding name
    #[must_use]
    pub fn with_remove_on_click(mut self, name: impl Into<String>) -> Self {
        self.remove_on_click = name.into();
        self
    }

    /// With create binding name
    #[must_use]
    pub fn with_create_on_click(mut self, name: impl Into<String>) -> Self {
        self.create_on_click = name.into();
        self
    }

    /// Name configured for a binding
    #[must_use]
    pub fn get(&self, binding: Binding) -> &str {
        match binding {
            Binding::Dynamic => &self.dynamic,
            Binding::RemoveOnClick => &self.remove_on_click,
            Binding::CreateOnClick => &self.create_on_click,
        }
    }
}

impl Default for ExtensionNames {
    fn default() -> Self {
        Self {
            dynamic: "addDynamic".to_string(),
            remove_on_click: "addRemoveOnClick".to_string(),
            create_on_click: "addCreateOnClick".to_string(),
        }
    }
}

/// Registry of installed extension method names
#[derive(Debug, Default, Clone)]
pub struct ExtensionRegistry {
    active: HashMap<String, Binding>,
    retired: HashSet<String>,
}

impl ExtensionRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create registry with the default names installed
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(&ExtensionNames::default());
        registry
    }

    /// Install the bindings under `names`
    ///
    /// Returns the names retired by this call: every name a binding was
    /// previously installed under that it no longer is.
    pub fn register(&mut self, names: &ExtensionNames) -> Vec<String> {
        let mut retired = Vec::new();
        for binding in Binding::ALL {
            let name = names.get(binding);
            let previous: Vec<String> = self
                .active
                .iter()
                .filter(|(old, bound)| **bound == binding && old.as_str() != name)
                .map(|(old, _)| old.clone())
                .collect();

            for old in previous {
                self.active.remove(&old);
                tracing::warn!(method = %old, replaced_by = %name, %binding, "extension method retired");
                self.retired.insert(old.clone());
                retired.push(old);
            }

            self.retired.remove(name);
            self.active.insert(name.to_string(), binding);
        }
        retired
    }

    /// Check `method` is installed for `expected`
    ///
    /// # Errors
    /// `ExtensionReplaced` for retired names, `UnknownExtension` for names
    /// never installed, `BindingMismatch` for names bound to something else.
    pub fn resolve(&self, method: &str, expected: Binding) -> Result<(), ReplicatorError> {
        match self.active.get(method) {
            Some(&found) if found == expected => Ok(()),
            Some(&found) => Err(ReplicatorError::BindingMismatch {
                method: method.to_string(),
                expected,
                found,
            }),
            None if self.retired.contains(method) => Err(ReplicatorError::ExtensionReplaced(method.to_string())),
            None => Err(ReplicatorError::UnknownExtension(method.to_string())),
        }
    }

    /// Check if a method name is installed
    #[inline]
    #[must_use]
    pub fn contains(&self, method: &str) -> bool {
        self.active.contains_key(method)
    }

    /// Check if a method name was retired
    #[inline]
    #[must_use]
    pub fn is_retired(&self, method: &str) -> bool {
        self.retired.contains(method)
    }

    /// Installed method names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.active.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of installed method names
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Check if nothing is installed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Add a replicator under `parent` through `method`
    ///
    /// # Errors
    /// Name resolution errors, then whatever [`Replicator::add`] returns.
    pub fn add_dynamic(
        &self,
        method: &str,
        form: &mut Form,
        parent: NodeId,
        name: &str,
        replicator: ReplicatorNode,
    ) -> Result<Replicator, ReplicatorError> {
        self.resolve(method, Binding::Dynamic)?;
        Replicator::add(form, parent, name, replicator)
    }

    /// Bind a remove action to `button` through `method`
    ///
    /// # Errors
    /// Name resolution errors, then `NotASubmit` for non-buttons.
    pub fn add_remove_on_click(
        &self,
        method: &str,
        form: &mut Form,
        button: NodeId,
        callback: Option<RowCallback>,
    ) -> Result<(), ReplicatorError> {
        self.resolve(method, Binding::RemoveOnClick)?;
        add_remove_on_click(form, button, callback)
    }

    /// Bind a create action to `button` through `method`
    ///
    /// # Errors
    /// Name resolution errors, then `NotASubmit` for non-buttons.
    pub fn add_create_on_click(
        &self,
        method: &str,
        form: &mut Form,
        button: NodeId,
        allow_empty: bool,
        callback: Option<RowCallback>,
    ) -> Result<(), ReplicatorError> {
        self.resolve(method, Binding::CreateOnClick)?;
        add_create_on_click(form, button, allow_empty, callback)
    }
}

static REGISTRY: Lazy<RwLock<ExtensionRegistry>> = Lazy::new(|| RwLock::new(ExtensionRegistry::new()));

/// Install the bindings process-wide; returns the retired names
pub fn register(names: &ExtensionNames) -> Vec<String> {
    REGISTRY.write().register(names)
}

/// Snapshot of the process-wide registry
#[must_use]
pub fn registry() -> ExtensionRegistry {
    REGISTRY.read().clone()
}

fn resolve_global(method: &str, expected: Binding) -> Result<(), ReplicatorError> {
    REGISTRY.read().resolve(method, expected)
}

/// Add a replicator through a process-wide method name
///
/// # Errors
/// See [`ExtensionRegistry::add_dynamic`].
pub fn add_dynamic(
    method: &str,
    form: &mut Form,
    parent: NodeId,
    name: &str,
    replicator: ReplicatorNode,
) -> Result<Replicator, ReplicatorError> {
    resolve_global(method, Binding::Dynamic)?;
    Replicator::add(form, parent, name, replicator)
}

/// Bind a remove action through a process-wide method name
///
/// # Errors
/// See [`ExtensionRegistry::add_remove_on_click`].
pub fn add_remove_on_click_via(
    method: &str,
    form: &mut Form,
    button: NodeId,
    callback: Option<RowCallback>,
) -> Result<(), ReplicatorError> {
    resolve_global(method, Binding::RemoveOnClick)?;
    add_remove_on_click(form, button, callback)
}

/// Bind a create action through a process-wide method name
///
/// # Errors
/// See [`ExtensionRegistry::add_create_on_click`].
pub fn add_create_on_click_via(
    method: &str,
    form: &mut Form,
    button: NodeId,
    allow_empty: bool,
    callback: Option<RowCallback>,
) -> Result<(), ReplicatorError> {
    resolve_global(method, Binding::CreateOnClick)?;
    add_create_on_click(form, button, allow_empty, callback)
}
