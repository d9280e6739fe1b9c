//! Tree nodes
//!
//! Every element of a form (containers, input fields, submit buttons and
//! extension containers such as replicators) is a [`Node`] stored in the
//! form's arena and addressed by [`NodeId`].

use crate::error::HookError;
use crate::form::Form;
use crate::group::GroupId;
use crate::path::FieldPath;
use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;

/// Arena index of a node
///
/// Ids are never reused within a form, so a stale id can only ever
/// point at nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Build an id from a raw index
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Raw arena index
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handler run when a submit control triggered the request
pub type ClickHandler = Rc<dyn Fn(&mut Form, NodeId) -> Result<(), HookError>>;

/// Behaviour plugged into an extension container
///
/// The tree calls [`NodeExtension::on_attach`] once, after the node has
/// been inserted and the caller asked for it to be attached.
pub trait NodeExtension: Any {
    /// Node became part of a live form
    ///
    /// # Errors
    /// Any error is surfaced from [`Form::attach`] as
    /// [`TreeError::Hook`](crate::TreeError::Hook).
    fn on_attach(&mut self, form: &mut Form, node: NodeId) -> Result<(), HookError>;

    /// Upcast for downcasting to the concrete type
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete type
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Kind of a form control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Text-like value input
    Input,
    /// Button able to submit the form
    Submit,
}

/// Leaf element of a form
#[derive(Clone)]
pub struct Control {
    pub(crate) kind: ControlKind,
    pub(crate) value: String,
    pub(crate) on_click: Vec<ClickHandler>,
    pub(crate) validation_scope: Option<Vec<FieldPath>>,
}

impl Control {
    pub(crate) fn new(kind: ControlKind) -> Self {
        Self {
            kind,
            value: String::new(),
            on_click: Vec::new(),
            validation_scope: None,
        }
    }

    /// Control kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    /// Current value
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Check if this control can submit the form
    #[inline]
    #[must_use]
    pub fn is_submit(&self) -> bool {
        self.kind == ControlKind::Submit
    }

    /// Number of registered click handlers
    #[inline]
    #[must_use]
    pub fn click_handler_count(&self) -> usize {
        self.on_click.len()
    }

    /// Paths validated when this button submits; `None` validates everything
    #[inline]
    #[must_use]
    pub fn validation_scope(&self) -> Option<&[FieldPath]> {
        self.validation_scope.as_deref()
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("kind", &self.kind)
            .field("value", &self.value)
            .field("on_click", &self.on_click.len())
            .field("validation_scope", &self.validation_scope)
            .finish()
    }
}

/// Hook slot of an extension container
pub struct ExtensionSlot {
    /// `None` while the hook is lent out
    pub(crate) hook: Option<Box<dyn NodeExtension>>,
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) attached: bool,
}

/// What a node is
pub enum NodeKind {
    /// Plain container holding other nodes
    Container {
        /// Container class label
        class: String,
    },
    /// Leaf control
    Control(Control),
    /// Container driven by a [`NodeExtension`]
    Extension(ExtensionSlot),
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container { class } => f.debug_struct("Container").field("class", class).finish(),
            Self::Control(control) => f.debug_tuple("Control").field(control).finish(),
            Self::Extension(slot) => f
                .debug_struct("Extension")
                .field("type", &slot.type_name)
                .field("lent", &slot.hook.is_none())
                .field("attached", &slot.attached)
                .finish(),
        }
    }
}

/// Element of the form arena
#[derive(Debug)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) current_group: Option<GroupId>,
    pub(crate) kind: NodeKind,
}

impl Node {
    /// Name unique among siblings
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent node (`None` for the form root)
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Group newly added controls join
    #[inline]
    #[must_use]
    pub fn current_group(&self) -> Option<GroupId> {
        self.current_group
    }

    /// Node kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Plain and extension containers
    #[inline]
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container { .. } | NodeKind::Extension(_))
    }

    /// Check for an extension container
    #[inline]
    #[must_use]
    pub fn is_extension(&self) -> bool {
        matches!(self.kind, NodeKind::Extension(_))
    }

    /// Check for an extension container whose hook is an `E`
    #[inline]
    #[must_use]
    pub fn is_extension_of<E: NodeExtension>(&self) -> bool {
        matches!(&self.kind, NodeKind::Extension(slot) if slot.type_id == TypeId::of::<E>())
    }

    /// Control data, if this node is a control
    #[inline]
    #[must_use]
    pub fn as_control(&self) -> Option<&Control> {
        match &self.kind {
            NodeKind::Control(control) => Some(control),
            _ => None,
        }
    }

    /// Check for a submit-capable control
    #[inline]
    #[must_use]
    pub fn is_submit(&self) -> bool {
        self.as_control().is_some_and(Control::is_submit)
    }

    /// Container class, for plain containers
    #[inline]
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Container { class } => Some(class),
            _ => None,
        }
    }
}
