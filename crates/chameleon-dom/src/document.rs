//! The headless document: an arena-backed element tree with style,
//! focus, scroll, event, and mutation-journal state.
//!
//! The document is owned by the host (application or test harness). The
//! enhancement layer reads and writes it through the narrow operations
//! here; nothing in this crate assumes a live rendering environment.

use slotmap::{SecondaryMap, SlotMap};
use tracing::{debug, trace};

use crate::error::{DomError, DomResult};
use crate::event::{Event, EventKind, ListenerId, Listeners};
use crate::node::{ElementKind, Node, NodeId, SelectOption, SelectState};
use crate::style::{ComputedStyle, StyleRecord};

/// A headless document tree.
#[derive(Debug)]
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    styles: SecondaryMap<NodeId, StyleRecord>,
    root: NodeId,
    focused: Option<NodeId>,
    scroll: (f64, f64),
    /// Page-level `::placeholder` style applied to text-like inputs that
    /// have no node-specific pseudo record (the stylesheet equivalent).
    default_placeholder: Option<ComputedStyle>,
    listeners: Listeners,
    /// Journal of subtree roots inserted since the last drain.
    inserted: Vec<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document with an empty body root.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(ElementKind::Container {
            tag: "body".to_string(),
        }));
        Self {
            nodes,
            styles: SecondaryMap::new(),
            root,
            focused: None,
            scroll: (0.0, 0.0),
            default_placeholder: None,
            listeners: Listeners::default(),
            inserted: Vec::new(),
        }
    }

    /// The root node of the document.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the node id refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    // =========================================================================
    // Node Creation
    // =========================================================================

    /// Create a detached node of the given kind.
    pub fn create(&mut self, kind: ElementKind) -> NodeId {
        self.nodes.insert(Node::new(kind))
    }

    /// Create a detached container element with the given tag.
    pub fn create_container(&mut self, tag: impl Into<String>) -> NodeId {
        self.create(ElementKind::Container { tag: tag.into() })
    }

    /// Create a detached form element.
    pub fn create_form(&mut self) -> NodeId {
        self.create(ElementKind::Form)
    }

    /// Create a detached text input.
    pub fn create_text_input(&mut self) -> NodeId {
        self.create(ElementKind::TextInput)
    }

    /// Create a detached text area.
    pub fn create_text_area(&mut self) -> NodeId {
        self.create(ElementKind::TextArea)
    }

    /// Create a detached select with the native default selection
    /// (the first option, when any exists).
    pub fn create_select(&mut self, options: Vec<SelectOption>) -> NodeId {
        self.create(ElementKind::Select(SelectState::new(options)))
    }

    // =========================================================================
    // Tree Operations
    // =========================================================================

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.nodes.get(id).ok_or(DomError::InvalidNodeId)
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.nodes.get_mut(id).ok_or(DomError::InvalidNodeId)
    }

    /// The element kind of a node.
    pub fn kind(&self, id: NodeId) -> DomResult<&ElementKind> {
        Ok(&self.node(id)?.kind)
    }

    /// The parent of a node, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// The children of a node in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Ancestors of a node, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent) = current {
            chain.push(parent);
            current = self.parent(parent);
        }
        chain
    }

    fn check_insertion(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if child == self.root {
            return Err(DomError::RootImmutable);
        }
        if parent == child || self.ancestors(parent).contains(&child) {
            return Err(DomError::CircularInsertion);
        }
        Ok(())
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes.get(id).and_then(|node| node.parent) {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|&child| child != id);
            }
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = None;
        }
    }

    /// Append a node as the last child of `parent`.
    ///
    /// A node that is already attached elsewhere is moved. The insertion
    /// is recorded in the mutation journal.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.node(parent)?;
        self.node(child)?;
        self.check_insertion(parent, child)?;
        self.detach(child);
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        self.journal_insert(child);
        Ok(())
    }

    /// Insert a node immediately before `reference` under the same parent.
    pub fn insert_before(&mut self, new: NodeId, reference: NodeId) -> DomResult<()> {
        self.node(new)?;
        let parent = self.node(reference)?.parent.ok_or(DomError::NodeDetached)?;
        self.check_insertion(parent, new)?;
        self.detach(new);
        let position = self.nodes[parent]
            .children
            .iter()
            .position(|&child| child == reference)
            .ok_or(DomError::NodeDetached)?;
        self.nodes[parent].children.insert(position, new);
        self.nodes[new].parent = Some(parent);
        self.journal_insert(new);
        Ok(())
    }

    /// Remove a node and its entire subtree from the document.
    ///
    /// Listeners registered on removed nodes are dropped; focus is cleared
    /// silently if it was inside the removed subtree.
    pub fn remove(&mut self, id: NodeId) -> DomResult<()> {
        self.node(id)?;
        if id == self.root {
            return Err(DomError::RootImmutable);
        }
        let subtree = self.subtree(id);
        self.detach(id);
        if let Some(focused) = self.focused
            && subtree.contains(&focused)
        {
            self.focused = None;
        }
        self.listeners.remove_for_nodes(&subtree);
        for node in &subtree {
            self.styles.remove(*node);
            self.nodes.remove(*node);
        }
        trace!(removed = subtree.len(), "removed subtree");
        Ok(())
    }

    /// The node and all its descendants in pre-order.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            order.push(current);
            for &child in self.nodes[current].children.iter().rev() {
                stack.push(child);
            }
        }
        order
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The nearest form containing the node (the node itself included).
    pub fn closest_form(&self, id: NodeId) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if matches!(self.nodes.get(node)?.kind, ElementKind::Form) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// All select elements in the subtree, in document order.
    pub fn selects_in(&self, root: NodeId) -> Vec<NodeId> {
        self.subtree(root)
            .into_iter()
            .filter(|&node| {
                self.nodes
                    .get(node)
                    .is_some_and(|n| n.kind.is_select())
            })
            .collect()
    }

    /// The first text-like input or textarea in the subtree, if any.
    pub fn first_text_reference_in(&self, root: NodeId) -> Option<NodeId> {
        self.subtree(root).into_iter().find(|&node| {
            self.nodes
                .get(node)
                .is_some_and(|n| n.kind.is_text_reference())
        })
    }

    // =========================================================================
    // Select Access
    // =========================================================================

    fn select(&self, id: NodeId) -> DomResult<&SelectState> {
        match &self.node(id)?.kind {
            ElementKind::Select(state) => Ok(state),
            _ => Err(DomError::NotASelect),
        }
    }

    fn select_mut(&mut self, id: NodeId) -> DomResult<&mut SelectState> {
        match &mut self.node_mut(id)?.kind {
            ElementKind::Select(state) => Ok(state),
            _ => Err(DomError::NotASelect),
        }
    }

    /// The options of a select in document order.
    pub fn options(&self, id: NodeId) -> DomResult<&[SelectOption]> {
        Ok(&self.select(id)?.options)
    }

    /// The selected option index of a select.
    pub fn selected_index(&self, id: NodeId) -> DomResult<Option<usize>> {
        Ok(self.select(id)?.selected)
    }

    /// The currently selected option, if any.
    pub fn selected_option(&self, id: NodeId) -> DomResult<Option<&SelectOption>> {
        let state = self.select(id)?;
        Ok(state.selected.and_then(|index| state.options.get(index)))
    }

    /// The select's effective submission value (empty when nothing is
    /// selected).
    pub fn select_value(&self, id: NodeId) -> DomResult<String> {
        Ok(self
            .selected_option(id)?
            .map(|option| option.value.clone())
            .unwrap_or_default())
    }

    /// Set the selected index of a select. Does not dispatch events;
    /// change notification is the caller's responsibility, matching the
    /// native control's programmatic assignment semantics.
    pub fn set_selected_index(&mut self, id: NodeId, index: Option<usize>) -> DomResult<()> {
        let state = self.select_mut(id)?;
        if let Some(index) = index
            && index >= state.options.len()
        {
            return Err(DomError::IndexOutOfBounds {
                index,
                len: state.options.len(),
            });
        }
        state.selected = index;
        Ok(())
    }

    // =========================================================================
    // Node Attributes
    // =========================================================================

    /// Text content of a node.
    pub fn text(&self, id: NodeId) -> DomResult<&str> {
        Ok(&self.node(id)?.text)
    }

    /// Set the text content of a node.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> DomResult<()> {
        self.node_mut(id)?.text = text.into();
        Ok(())
    }

    /// Whether the node is visually visible. Hidden nodes stay in the
    /// tree and keep participating in form submission.
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.nodes.get(id).map(|node| node.visible).unwrap_or(false)
    }

    /// Set visual visibility.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> DomResult<()> {
        self.node_mut(id)?.visible = visible;
        Ok(())
    }

    /// Whether the node can receive focus. Form controls are natively
    /// focusable; containers only when explicitly flagged.
    pub fn is_focusable(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|node| {
            node.focusable
                || matches!(
                    node.kind,
                    ElementKind::TextInput | ElementKind::TextArea | ElementKind::Select(_)
                )
        })
    }

    /// Mark a node explicitly focusable (the tabindex equivalent).
    pub fn set_focusable(&mut self, id: NodeId, focusable: bool) -> DomResult<()> {
        self.node_mut(id)?.focusable = focusable;
        Ok(())
    }

    /// Set a data flag on a node.
    pub fn set_flag(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> DomResult<()> {
        self.node_mut(id)?.flags.insert(name.into(), value.into());
        Ok(())
    }

    /// Whether a data flag is present on a node.
    pub fn has_flag(&self, id: NodeId, name: &str) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|node| node.flags.contains_key(name))
    }

    /// Remove a data flag from a node.
    pub fn clear_flag(&mut self, id: NodeId, name: &str) -> DomResult<()> {
        self.node_mut(id)?.flags.remove(name);
        Ok(())
    }

    /// Rendered width in pixels (0.0 when never laid out).
    pub fn offset_width(&self, id: NodeId) -> f64 {
        self.nodes.get(id).map(|node| node.offset_width).unwrap_or(0.0)
    }

    /// Seed the rendered width metric (host/layout responsibility).
    pub fn set_offset_width(&mut self, id: NodeId, width: f64) -> DomResult<()> {
        self.node_mut(id)?.offset_width = width;
        Ok(())
    }

    /// Seed the vertical document offset used for scroll-into-view.
    pub fn set_offset_top(&mut self, id: NodeId, top: f64) -> DomResult<()> {
        self.node_mut(id)?.offset_top = top;
        Ok(())
    }

    // =========================================================================
    // Style Variables
    // =========================================================================

    fn variable_key(name: &str) -> &str {
        name.strip_prefix("--").unwrap_or(name)
    }

    /// Set a custom style variable on a node. A leading `--` is accepted
    /// and stripped.
    pub fn set_variable(
        &mut self,
        id: NodeId,
        name: impl AsRef<str>,
        value: impl Into<String>,
    ) -> DomResult<()> {
        let key = Self::variable_key(name.as_ref()).to_string();
        self.node_mut(id)?.variables.insert(key, value.into());
        Ok(())
    }

    /// Get a variable set directly on the node.
    pub fn variable(&self, id: NodeId, name: &str) -> Option<&str> {
        let key = Self::variable_key(name);
        self.nodes
            .get(id)?
            .variables
            .get(key)
            .map(String::as_str)
    }

    /// Resolve a variable on the node or the nearest ancestor that sets
    /// it — the declarative inheritance the synthesizer relies on.
    pub fn resolve_variable(&self, id: NodeId, name: &str) -> Option<&str> {
        if let Some(value) = self.variable(id, name) {
            return Some(value);
        }
        self.ancestors(id)
            .into_iter()
            .find_map(|ancestor| self.variable(ancestor, name))
    }

    // =========================================================================
    // Computed Styles
    // =========================================================================

    /// Seed the normal-state computed style of a node.
    pub fn set_computed_style(&mut self, id: NodeId, style: ComputedStyle) -> DomResult<()> {
        self.node(id)?;
        self.styles.entry(id).ok_or(DomError::InvalidNodeId)?.or_default().base = style;
        Ok(())
    }

    /// Seed a sparse `:focus` overlay for a node.
    pub fn set_focus_style(&mut self, id: NodeId, style: ComputedStyle) -> DomResult<()> {
        self.node(id)?;
        self.styles.entry(id).ok_or(DomError::InvalidNodeId)?.or_default().focus = Some(style);
        Ok(())
    }

    /// Seed a sparse `::placeholder` pseudo style for a text-like input.
    pub fn set_placeholder_style(&mut self, id: NodeId, style: ComputedStyle) -> DomResult<()> {
        self.node(id)?;
        self.styles.entry(id).ok_or(DomError::InvalidNodeId)?.or_default().placeholder = Some(style);
        Ok(())
    }

    /// Set the page-level `::placeholder` style applied to text-like
    /// inputs without a node-specific record.
    pub fn set_default_placeholder_style(&mut self, style: Option<ComputedStyle>) {
        self.default_placeholder = style;
    }

    /// The computed style of a node as a style query would report it:
    /// the base record with the `:focus` overlay merged in while the
    /// node holds document focus.
    pub fn computed_style(&self, id: NodeId) -> DomResult<ComputedStyle> {
        self.node(id)?;
        let record = self.styles.get(id);
        let mut style = record
            .map(|r| r.base.clone())
            .unwrap_or_default();
        if self.focused == Some(id)
            && let Some(focus) = record.and_then(|r| r.focus.as_ref())
        {
            style.merge_from(focus);
        }
        Ok(style)
    }

    /// The `::placeholder` pseudo style of a text-like input, if one
    /// resolves (node-specific, then page default).
    pub fn placeholder_style(&self, id: NodeId) -> DomResult<Option<ComputedStyle>> {
        let node = self.node(id)?;
        if let Some(style) = self.styles.get(id).and_then(|r| r.placeholder.as_ref()) {
            return Ok(Some(style.clone()));
        }
        if node.kind.is_text_reference() {
            return Ok(self.default_placeholder.clone());
        }
        Ok(None)
    }

    // =========================================================================
    // Focus & Scroll
    // =========================================================================

    /// The node currently holding document focus.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Focus a node, dispatching focus-out/focus-in events.
    ///
    /// Unless `prevent_scroll` is set, the viewport scrolls the node into
    /// view (to its document offset). Returns `false` without side
    /// effects when the node is not focusable.
    pub fn focus(&mut self, id: NodeId, prevent_scroll: bool) -> DomResult<bool> {
        self.node(id)?;
        if !self.is_focusable(id) {
            return Ok(false);
        }
        if self.focused == Some(id) {
            return Ok(true);
        }
        if let Some(old) = self.focused.take() {
            self.dispatch(EventKind::FocusOut, old);
        }
        self.focused = Some(id);
        if !prevent_scroll {
            self.scroll = (0.0, self.nodes[id].offset_top);
        }
        self.dispatch(EventKind::FocusIn, id);
        Ok(true)
    }

    /// Remove focus from a node if it currently holds it.
    pub fn blur(&mut self, id: NodeId) -> DomResult<()> {
        self.node(id)?;
        if self.focused == Some(id) {
            self.focused = None;
            self.dispatch(EventKind::FocusOut, id);
        }
        Ok(())
    }

    /// Current viewport scroll position.
    pub fn scroll_position(&self) -> (f64, f64) {
        self.scroll
    }

    /// Set the viewport scroll position.
    pub fn set_scroll_position(&mut self, x: f64, y: f64) {
        self.scroll = (x, y);
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Register an event listener on a node.
    pub fn add_event_listener(
        &mut self,
        id: NodeId,
        kind: EventKind,
        callback: impl FnMut(&Event) + Send + 'static,
    ) -> DomResult<ListenerId> {
        self.node(id)?;
        Ok(self.listeners.add(id, kind, callback))
    }

    /// Remove a previously registered listener.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Dispatch a bubbling change event on a control, exactly as the
    /// native control would after user interaction.
    pub fn dispatch_change(&mut self, id: NodeId) -> DomResult<()> {
        self.node(id)?;
        self.dispatch(EventKind::Change, id);
        Ok(())
    }

    fn dispatch(&mut self, kind: EventKind, target: NodeId) {
        let mut path = vec![target];
        if kind.bubbles() {
            path.extend(self.ancestors(target));
        }
        let value = match kind {
            EventKind::Change => self.select_value(target).unwrap_or_default(),
            _ => String::new(),
        };
        let slots = self.listeners.collect(&path, kind);
        debug!(?kind, listeners = slots.len(), "dispatching event");
        let event = Event {
            kind,
            target,
            value,
        };
        for slot in slots {
            (&mut *slot.lock())(&event);
        }
    }

    // =========================================================================
    // Mutation Journal
    // =========================================================================

    fn journal_insert(&mut self, id: NodeId) {
        trace!(?id, "journal: subtree inserted");
        self.inserted.push(id);
    }

    /// Drain the journal of subtree roots inserted since the last drain.
    ///
    /// The observation layer polls this to satisfy its at-least-once
    /// contract; duplicates and already-processed nodes are harmless.
    pub fn take_inserted(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.inserted)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::style::properties;

    fn doc_with_form() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let form = doc.create_form();
        let input = doc.create_text_input();
        let select = doc.create_select(vec![
            SelectOption::new("a", "Apple"),
            SelectOption::new("b", "Banana"),
        ]);
        doc.append_child(doc.root(), form).unwrap();
        doc.append_child(form, input).unwrap();
        doc.append_child(form, select).unwrap();
        (doc, form, input, select)
    }

    #[test]
    fn insert_before_preserves_order() {
        let (mut doc, form, _input, select) = doc_with_form();
        let wrapper = doc.create_container("div");
        doc.insert_before(wrapper, select).unwrap();
        let children = doc.children(form);
        let wrapper_pos = children.iter().position(|&c| c == wrapper).unwrap();
        let select_pos = children.iter().position(|&c| c == select).unwrap();
        assert_eq!(wrapper_pos + 1, select_pos);
    }

    #[test]
    fn circular_insertion_rejected() {
        let mut doc = Document::new();
        let outer = doc.create_container("div");
        let inner = doc.create_container("div");
        doc.append_child(doc.root(), outer).unwrap();
        doc.append_child(outer, inner).unwrap();
        assert_eq!(
            doc.append_child(inner, outer),
            Err(DomError::CircularInsertion)
        );
        assert_eq!(doc.append_child(outer, outer), Err(DomError::CircularInsertion));
    }

    #[test]
    fn remove_drops_subtree_and_listeners() {
        let (mut doc, form, input, select) = doc_with_form();
        doc.add_event_listener(select, EventKind::Change, |_| {}).unwrap();
        doc.remove(form).unwrap();
        assert!(!doc.contains(form));
        assert!(!doc.contains(input));
        assert!(!doc.contains(select));
        assert_eq!(doc.dispatch_change(select), Err(DomError::InvalidNodeId));
    }

    #[test]
    fn closest_form_walks_ancestors() {
        let (doc, form, _input, select) = doc_with_form();
        assert_eq!(doc.closest_form(select), Some(form));
        assert_eq!(doc.closest_form(doc.root()), None);
    }

    #[test]
    fn selects_in_finds_nested_selects() {
        let (mut doc, _form, _input, select) = doc_with_form();
        let wrapper = doc.create_container("div");
        let nested = doc.create_select(vec![SelectOption::new("x", "X")]);
        doc.append_child(wrapper, nested).unwrap();
        doc.append_child(doc.root(), wrapper).unwrap();
        let selects = doc.selects_in(doc.root());
        assert_eq!(selects, vec![select, nested]);
    }

    #[test]
    fn selected_index_bounds_checked() {
        let (mut doc, _form, _input, select) = doc_with_form();
        assert_eq!(doc.selected_index(select).unwrap(), Some(0));
        doc.set_selected_index(select, Some(1)).unwrap();
        assert_eq!(doc.select_value(select).unwrap(), "b");
        assert_eq!(
            doc.set_selected_index(select, Some(2)),
            Err(DomError::IndexOutOfBounds { index: 2, len: 2 })
        );
    }

    #[test]
    fn change_event_bubbles_to_ancestors() {
        let (mut doc, form, _input, select) = doc_with_form();
        let hits = Arc::new(AtomicUsize::new(0));
        let on_select = Arc::clone(&hits);
        doc.add_event_listener(select, EventKind::Change, move |event| {
            assert_eq!(event.value, "a");
            on_select.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        let on_form = Arc::clone(&hits);
        doc.add_event_listener(form, EventKind::Change, move |_| {
            on_form.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        doc.dispatch_change(select).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn focus_scrolls_unless_prevented() {
        let (mut doc, _form, input, _select) = doc_with_form();
        doc.set_offset_top(input, 480.0).unwrap();
        doc.set_scroll_position(0.0, 120.0);
        doc.focus(input, true).unwrap();
        assert_eq!(doc.scroll_position(), (0.0, 120.0));
        doc.blur(input).unwrap();
        doc.focus(input, false).unwrap();
        assert_eq!(doc.scroll_position(), (0.0, 480.0));
    }

    #[test]
    fn focus_overlay_visible_only_while_focused() {
        let (mut doc, _form, input, _select) = doc_with_form();
        doc.set_computed_style(
            input,
            ComputedStyle::new().with(properties::BORDER_COLOR, "rgb(200, 200, 200)"),
        )
        .unwrap();
        doc.set_focus_style(
            input,
            ComputedStyle::new().with(properties::BORDER_COLOR, "rgb(0, 120, 255)"),
        )
        .unwrap();

        let normal = doc.computed_style(input).unwrap();
        assert_eq!(normal.get(properties::BORDER_COLOR), "rgb(200, 200, 200)");

        doc.focus(input, true).unwrap();
        let focused = doc.computed_style(input).unwrap();
        assert_eq!(focused.get(properties::BORDER_COLOR), "rgb(0, 120, 255)");

        doc.blur(input).unwrap();
        let after = doc.computed_style(input).unwrap();
        assert_eq!(after.get(properties::BORDER_COLOR), "rgb(200, 200, 200)");
    }

    #[test]
    fn variables_inherit_from_ancestors() {
        let mut doc = Document::new();
        let container = doc.create_container("div");
        let row = doc.create_container("div");
        doc.append_child(doc.root(), container).unwrap();
        doc.append_child(container, row).unwrap();
        doc.set_variable(container, "--chameleon-color", "rgb(1, 2, 3)")
            .unwrap();
        assert_eq!(doc.variable(row, "chameleon-color"), None);
        assert_eq!(
            doc.resolve_variable(row, "--chameleon-color"),
            Some("rgb(1, 2, 3)")
        );
    }

    #[test]
    fn text_area_is_a_reference_candidate() {
        let mut doc = Document::new();
        let area = doc.create_text_area();
        doc.append_child(doc.root(), area).unwrap();
        assert_eq!(doc.first_text_reference_in(doc.root()), Some(area));
    }

    #[test]
    fn removed_listener_stops_firing() {
        let (mut doc, _form, _input, select) = doc_with_form();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let id = doc
            .add_event_listener(select, EventKind::Change, move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        doc.dispatch_change(select).unwrap();
        assert!(doc.remove_event_listener(id));
        doc.dispatch_change(select).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn journal_records_inserted_roots() {
        let (mut doc, _form, _input, _select) = doc_with_form();
        doc.take_inserted();
        let wrapper = doc.create_container("div");
        let nested = doc.create_select(vec![SelectOption::new("x", "X")]);
        doc.append_child(wrapper, nested).unwrap();
        doc.append_child(doc.root(), wrapper).unwrap();
        let inserted = doc.take_inserted();
        assert_eq!(inserted, vec![nested, wrapper]);
        assert!(doc.take_inserted().is_empty());
    }
}
