//! Node and element types for the document tree.

use std::collections::HashMap;

use slotmap::new_key_type;

new_key_type! {
    /// A unique identifier for a node in the document arena.
    ///
    /// `NodeId`s are stable handles that remain valid as the tree changes.
    /// They become invalid when the node is removed from the document.
    pub struct NodeId;
}

/// A single option of a select element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// The submission value.
    pub value: String,
    /// The user-visible label.
    pub label: String,
    /// Whether the option is disabled.
    pub disabled: bool,
}

impl SelectOption {
    /// Create an enabled option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Mark the option disabled using builder pattern.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// State specific to a select element.
#[derive(Debug, Clone, Default)]
pub struct SelectState {
    /// Options in document order.
    pub(crate) options: Vec<SelectOption>,
    /// Currently selected option index, if any option exists.
    pub(crate) selected: Option<usize>,
}

impl SelectState {
    /// Create select state with the first option selected (native default).
    pub(crate) fn new(options: Vec<SelectOption>) -> Self {
        let selected = if options.is_empty() { None } else { Some(0) };
        Self { options, selected }
    }
}

/// The element kind of a node.
#[derive(Debug, Clone)]
pub enum ElementKind {
    /// A generic container element (div, span, body, ...).
    Container {
        /// The tag name, kept for debugging and queries.
        tag: String,
    },
    /// A form element grouping controls.
    Form,
    /// A single-line text input.
    TextInput,
    /// A multi-line text area.
    TextArea,
    /// A native dropdown control.
    Select(SelectState),
}

impl ElementKind {
    /// Whether this element is a text-like styling reference candidate.
    pub fn is_text_reference(&self) -> bool {
        matches!(self, Self::TextInput | Self::TextArea)
    }

    /// Whether this element is a select.
    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select(_))
    }
}

/// A node in the document tree.
///
/// Nodes are owned by the [`Document`](crate::Document) arena and addressed
/// by [`NodeId`]. Fields are crate-private; the document exposes accessors.
#[derive(Debug)]
pub struct Node {
    pub(crate) kind: ElementKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Text content, used by spans and menu rows.
    pub(crate) text: String,
    /// Visual visibility; hidden nodes stay in the tree and in forms.
    pub(crate) visible: bool,
    /// Whether the node can receive document focus.
    pub(crate) focusable: bool,
    /// Data flags (the dataset equivalent), e.g. the processed marker.
    pub(crate) flags: HashMap<String, String>,
    /// Custom style variables set on this node, inherited by descendants.
    pub(crate) variables: HashMap<String, String>,
    /// Layout metric: rendered width in pixels (0.0 when never laid out).
    pub(crate) offset_width: f64,
    /// Layout metric: vertical document offset, used for scroll-into-view.
    pub(crate) offset_top: f64,
}

impl Node {
    pub(crate) fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            text: String::new(),
            visible: true,
            focusable: false,
            flags: HashMap::new(),
            variables: HashMap::new(),
            offset_width: 0.0,
            offset_top: 0.0,
        }
    }

    /// The element kind of this node.
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }
}
