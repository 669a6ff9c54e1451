//! The synthesized dropdown widget.
//!
//! A [`MimicDropdown`] is the replacement structure shown in place of a
//! native select: a focusable container holding a trigger (current
//! selection text plus an arrow glyph) and a hidden menu with one row per
//! option. The widget owns menu state and selection commits; global
//! concerns such as menu mutual exclusion live in the registry.

use chameleon_dom::{Document, NodeId};
use chameleon_style::{StyleSnapshot, variables};
use tracing::trace;

use crate::error::Result;
use crate::keyboard::{Key, KeyPressEvent};

/// Flag set on the menu row of the currently selected option.
pub const SELECTED_ROW_FLAG: &str = "chameleon-selected";

/// Flag set on the container while the widget shows its focus styling.
pub const FOCUSED_FLAG: &str = "chameleon-focused";

/// Glyph shown in the trigger's arrow slot.
const ARROW_GLYPH: &str = "\u{25BE}";

/// The parts of a widget a pointer event can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    /// The outer focusable container.
    Container,
    /// The trigger, its text span, or its arrow glyph.
    Trigger,
    /// The menu surface itself (not a row).
    Menu,
    /// A menu row, by option index.
    Row(usize),
}

/// A synthesized dropdown mirroring one native select.
#[derive(Debug)]
pub struct MimicDropdown {
    select: NodeId,
    container: NodeId,
    trigger: NodeId,
    text_span: NodeId,
    arrow: NodeId,
    menu: NodeId,
    rows: Vec<NodeId>,
    open: bool,
    focused: bool,
    snapshot: StyleSnapshot,
}

impl MimicDropdown {
    /// Build the widget structure for `select`, insert it immediately
    /// before the select, and hide the select visually.
    ///
    /// The select stays in the tree so it keeps participating in form
    /// submission. The snapshot is projected onto the container as style
    /// variables once; after this only the current-color variable is
    /// rewritten, on selection commits.
    pub fn synthesize(
        doc: &mut Document,
        select: NodeId,
        snapshot: StyleSnapshot,
    ) -> Result<Self> {
        let container = doc.create_container("div");
        doc.set_focusable(container, true)?;

        let trigger = doc.create_container("div");
        let text_span = doc.create_container("span");
        let arrow = doc.create_container("span");
        doc.set_text(arrow, ARROW_GLYPH)?;
        doc.append_child(container, trigger)?;
        doc.append_child(trigger, text_span)?;
        doc.append_child(trigger, arrow)?;

        let menu = doc.create_container("ul");
        doc.set_visible(menu, false)?;
        doc.append_child(container, menu)?;

        let options = doc.options(select)?.to_vec();
        let mut rows = Vec::with_capacity(options.len());
        for option in &options {
            let row = doc.create_container("li");
            doc.set_text(row, option.label.clone())?;
            doc.append_child(menu, row)?;
            rows.push(row);
        }

        snapshot.apply_to(doc, container, doc.offset_width(select))?;

        let mut widget = Self {
            select,
            container,
            trigger,
            text_span,
            arrow,
            menu,
            rows,
            open: false,
            focused: false,
            snapshot,
        };
        widget.refresh_selection(doc)?;

        doc.insert_before(container, select)?;
        doc.set_visible(select, false)?;
        trace!(?select, ?container, "synthesized dropdown widget");
        Ok(widget)
    }

    /// The native select this widget fronts.
    pub fn select(&self) -> NodeId {
        self.select
    }

    /// The outer focusable container.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// The menu node.
    pub fn menu(&self) -> NodeId {
        self.menu
    }

    /// The node showing the current selection's label.
    pub fn text_span(&self) -> NodeId {
        self.text_span
    }

    /// Menu row nodes in option order.
    pub fn rows(&self) -> &[NodeId] {
        &self.rows
    }

    /// Every node belonging to this widget, with the part it maps to.
    /// Used by the registry to route pointer events.
    pub fn parts(&self) -> Vec<(NodeId, Part)> {
        let mut parts = vec![
            (self.container, Part::Container),
            (self.trigger, Part::Trigger),
            (self.text_span, Part::Trigger),
            (self.arrow, Part::Trigger),
            (self.menu, Part::Menu),
        ];
        for (index, &row) in self.rows.iter().enumerate() {
            parts.push((row, Part::Row(index)));
        }
        parts
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the widget currently shows its focus styling.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Open the menu. Also enters the focused visual state.
    ///
    /// Does not enforce the one-open-menu rule; the registry closes
    /// other widgets before calling this.
    pub fn open(&mut self, doc: &mut Document) -> Result<()> {
        if !self.open {
            doc.set_visible(self.menu, true)?;
            self.open = true;
        }
        self.set_focused(doc, true)?;
        Ok(())
    }

    /// Close the menu. Focus styling is managed separately.
    pub fn close(&mut self, doc: &mut Document) -> Result<()> {
        if self.open {
            doc.set_visible(self.menu, false)?;
            self.open = false;
        }
        Ok(())
    }

    /// Enter or leave the focused visual state.
    pub fn set_focused(&mut self, doc: &mut Document, focused: bool) -> Result<()> {
        if self.focused != focused {
            if focused {
                doc.set_flag(self.container, FOCUSED_FLAG, "")?;
            } else {
                doc.clear_flag(self.container, FOCUSED_FLAG)?;
            }
            self.focused = focused;
        }
        Ok(())
    }

    /// Commit a selection: update the select's index, the trigger text,
    /// the current-color variable and the row marks, then dispatch
    /// exactly one bubbling change notification on the select.
    pub fn commit(&mut self, doc: &mut Document, index: usize) -> Result<()> {
        doc.set_selected_index(self.select, Some(index))?;
        self.refresh_selection(doc)?;
        doc.dispatch_change(self.select)?;
        Ok(())
    }

    /// Sync trigger text, current color and row marks to the select's
    /// current selection, without dispatching anything.
    fn refresh_selection(&mut self, doc: &mut Document) -> Result<()> {
        let selected = doc.selected_index(self.select)?;
        let (label, placeholder) = match doc.selected_option(self.select)? {
            Some(option) => (option.label.clone(), option.value.is_empty() || option.disabled),
            None => (String::new(), true),
        };
        doc.set_text(self.text_span, label)?;

        let color = if placeholder {
            self.snapshot.placeholder_color.to_css()
        } else {
            self.snapshot.color.clone()
        };
        doc.set_variable(self.container, variables::CURRENT_COLOR, color)?;

        for (index, &row) in self.rows.iter().enumerate() {
            if Some(index) == selected {
                doc.set_flag(row, SELECTED_ROW_FLAG, "")?;
            } else {
                doc.clear_flag(row, SELECTED_ROW_FLAG)?;
            }
        }
        Ok(())
    }

    /// Move the selection by `delta` option slots, clamped to the option
    /// range. A move that lands on the current index is a no-op and
    /// dispatches nothing.
    fn step(&mut self, doc: &mut Document, delta: isize) -> Result<()> {
        let count = doc.options(self.select)?.len();
        if count == 0 {
            return Ok(());
        }
        let current = doc.selected_index(self.select)?;
        let target = match current {
            Some(index) => index
                .saturating_add_signed(delta)
                .min(count - 1),
            // Nothing selected yet: either arrow lands on the first option.
            None => 0,
        };
        if Some(target) != current {
            self.commit(doc, target)?;
        }
        Ok(())
    }

    /// Handle a key press on the container.
    ///
    /// Enter and Space toggle the menu. The arrows move the selection
    /// (clamped at the ends) and open the menu when it is closed. Escape
    /// closes the menu without touching the selection. Every handled key
    /// is accepted so the host's default action is suppressed; unknown
    /// keys are left untouched.
    ///
    /// Returns `true` when handling the key opened the menu, so the
    /// caller can enforce the one-open-menu rule.
    pub fn handle_key(&mut self, doc: &mut Document, event: &mut KeyPressEvent) -> Result<bool> {
        let was_open = self.open;
        match event.key {
            Key::Enter | Key::Space => {
                if self.open {
                    self.close(doc)?;
                } else {
                    self.open(doc)?;
                }
                event.accept();
            }
            Key::ArrowDown => {
                if !self.open {
                    self.open(doc)?;
                }
                self.step(doc, 1)?;
                event.accept();
            }
            Key::ArrowUp => {
                if !self.open {
                    self.open(doc)?;
                }
                self.step(doc, -1)?;
                event.accept();
            }
            Key::Escape => {
                self.close(doc)?;
                event.accept();
            }
            Key::Unknown => {}
        }
        Ok(!was_open && self.open)
    }
}

#[cfg(test)]
mod tests {
    use chameleon_dom::{Document, SelectOption};
    use chameleon_style::Color;

    use super::*;

    fn snapshot() -> StyleSnapshot {
        StyleSnapshot {
            font_family: "sans-serif".into(),
            background: "rgb(255, 255, 255)".into(),
            border: "1px solid rgb(204, 204, 204)".into(),
            border_radius: "4px".into(),
            padding: "8px".into(),
            font_size: "14px".into(),
            height: "36px".into(),
            line_height: "20px".into(),
            color: "rgb(51, 51, 51)".into(),
            menu_background: "rgb(255, 255, 255)".into(),
            focus_outline: "rgb(0, 120, 255) solid 2px".into(),
            focus_outline_offset: "1px".into(),
            focus_shadow: "none".into(),
            focus_border_color: "rgb(0, 120, 255)".into(),
            placeholder_color: Color::from_rgb8(51, 51, 51).with_alpha(0.45),
        }
    }

    fn fruit_select(doc: &mut Document) -> NodeId {
        let select = doc.create_select(vec![
            SelectOption::new("", "Choose\u{2026}").disabled(),
            SelectOption::new("a", "Apple"),
            SelectOption::new("b", "Banana"),
        ]);
        doc.append_child(doc.root(), select).unwrap();
        select
    }

    #[test]
    fn synthesize_builds_structure_before_select() {
        let mut doc = Document::new();
        let select = fruit_select(&mut doc);
        let widget = MimicDropdown::synthesize(&mut doc, select, snapshot()).unwrap();

        let siblings = doc.children(doc.root());
        let container_pos = siblings.iter().position(|&n| n == widget.container());
        let select_pos = siblings.iter().position(|&n| n == select);
        assert!(container_pos.unwrap() < select_pos.unwrap());

        assert!(!doc.is_visible(select));
        assert!(!doc.is_visible(widget.menu()));
        assert_eq!(widget.rows().len(), 3);
        assert_eq!(doc.text(widget.text_span()).unwrap(), "Choose\u{2026}");
    }

    #[test]
    fn placeholder_selection_uses_placeholder_color() {
        let mut doc = Document::new();
        let select = fruit_select(&mut doc);
        let mut widget = MimicDropdown::synthesize(&mut doc, select, snapshot()).unwrap();

        assert_eq!(
            doc.variable(widget.container(), variables::CURRENT_COLOR),
            Some("rgba(51, 51, 51, 0.45)")
        );

        widget.commit(&mut doc, 2).unwrap();
        assert_eq!(
            doc.variable(widget.container(), variables::CURRENT_COLOR),
            Some("rgb(51, 51, 51)")
        );
        assert_eq!(doc.text(widget.text_span()).unwrap(), "Banana");
        assert_eq!(doc.select_value(select).unwrap(), "b");
    }

    #[test]
    fn commit_dispatches_exactly_one_change() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use chameleon_dom::EventKind;

        let mut doc = Document::new();
        let select = fruit_select(&mut doc);
        let changes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&changes);
        doc.add_event_listener(select, EventKind::Change, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        let mut widget = MimicDropdown::synthesize(&mut doc, select, snapshot()).unwrap();
        widget.commit(&mut doc, 1).unwrap();
        assert_eq!(changes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arrows_clamp_at_both_ends() {
        let mut doc = Document::new();
        let select = fruit_select(&mut doc);
        let mut widget = MimicDropdown::synthesize(&mut doc, select, snapshot()).unwrap();

        let mut up = KeyPressEvent::new(Key::ArrowUp);
        widget.handle_key(&mut doc, &mut up).unwrap();
        assert_eq!(doc.selected_index(select).unwrap(), Some(0));
        assert!(up.is_accepted());

        for _ in 0..5 {
            let mut down = KeyPressEvent::new(Key::ArrowDown);
            widget.handle_key(&mut doc, &mut down).unwrap();
        }
        assert_eq!(doc.selected_index(select).unwrap(), Some(2));
    }

    #[test]
    fn arrow_while_closed_opens_menu() {
        let mut doc = Document::new();
        let select = fruit_select(&mut doc);
        let mut widget = MimicDropdown::synthesize(&mut doc, select, snapshot()).unwrap();

        let mut down = KeyPressEvent::new(Key::ArrowDown);
        let opened = widget.handle_key(&mut doc, &mut down).unwrap();
        assert!(opened);
        assert!(widget.is_open());
        assert!(doc.is_visible(widget.menu()));
    }

    #[test]
    fn enter_toggles_and_escape_preserves_selection() {
        let mut doc = Document::new();
        let select = fruit_select(&mut doc);
        let mut widget = MimicDropdown::synthesize(&mut doc, select, snapshot()).unwrap();
        widget.commit(&mut doc, 1).unwrap();

        let mut enter = KeyPressEvent::new(Key::Enter);
        widget.handle_key(&mut doc, &mut enter).unwrap();
        assert!(widget.is_open());

        let mut escape = KeyPressEvent::new(Key::Escape);
        widget.handle_key(&mut doc, &mut escape).unwrap();
        assert!(!widget.is_open());
        assert!(escape.is_accepted());
        assert_eq!(doc.selected_index(select).unwrap(), Some(1));
    }

    #[test]
    fn unknown_keys_pass_through() {
        let mut doc = Document::new();
        let select = fruit_select(&mut doc);
        let mut widget = MimicDropdown::synthesize(&mut doc, select, snapshot()).unwrap();

        let mut event = KeyPressEvent::new(Key::Unknown);
        widget.handle_key(&mut doc, &mut event).unwrap();
        assert!(!event.is_accepted());
        assert!(!widget.is_open());
    }

    #[test]
    fn zero_option_select_still_synthesizes() {
        let mut doc = Document::new();
        let select = doc.create_select(vec![]);
        doc.append_child(doc.root(), select).unwrap();
        let mut widget = MimicDropdown::synthesize(&mut doc, select, snapshot()).unwrap();

        assert!(widget.rows().is_empty());
        assert_eq!(doc.text(widget.text_span()).unwrap(), "");
        let mut down = KeyPressEvent::new(Key::ArrowDown);
        widget.handle_key(&mut doc, &mut down).unwrap();
        assert_eq!(doc.selected_index(select).unwrap(), None);
    }

    #[test]
    fn selected_row_mark_moves() {
        let mut doc = Document::new();
        let select = fruit_select(&mut doc);
        let mut widget = MimicDropdown::synthesize(&mut doc, select, snapshot()).unwrap();
        assert!(doc.has_flag(widget.rows()[0], SELECTED_ROW_FLAG));

        widget.commit(&mut doc, 2).unwrap();
        assert!(!doc.has_flag(widget.rows()[0], SELECTED_ROW_FLAG));
        assert!(doc.has_flag(widget.rows()[2], SELECTED_ROW_FLAG));
    }
}
