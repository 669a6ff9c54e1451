//! Page-wide widget registry.
//!
//! The one-open-menu rule is global, so it cannot live inside any single
//! widget. The registry owns every synthesized widget, routes pointer
//! and keyboard input to the right one, and closes everything else
//! whenever one opens or an outside click lands.

use std::collections::HashMap;

use chameleon_dom::{Document, NodeId};
use slotmap::{SlotMap, new_key_type};
use tracing::trace;

use crate::error::Result;
use crate::keyboard::KeyPressEvent;
use crate::widget::{MimicDropdown, Part};

new_key_type! {
    /// Stable handle to a registered widget.
    pub struct WidgetId;
}

/// Registry of every active widget on the page.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    widgets: SlotMap<WidgetId, MimicDropdown>,
    // Maps each widget-owned node to its widget and part, for routing
    // pointer events without walking widget structures.
    parts: HashMap<NodeId, (WidgetId, Part)>,
}

impl WidgetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a widget and index its nodes for routing.
    pub fn register(&mut self, widget: MimicDropdown) -> WidgetId {
        let parts = widget.parts();
        let id = self.widgets.insert(widget);
        for (node, part) in parts {
            self.parts.insert(node, (id, part));
        }
        trace!(?id, "registered widget");
        id
    }

    /// Number of registered widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether no widgets are registered.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Borrow a widget.
    pub fn get(&self, id: WidgetId) -> Option<&MimicDropdown> {
        self.widgets.get(id)
    }

    /// Borrow a widget mutably.
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut MimicDropdown> {
        self.widgets.get_mut(id)
    }

    /// The widget whose container currently holds document focus.
    pub fn focused_widget(&self, doc: &Document) -> Option<WidgetId> {
        let focused = doc.focused()?;
        self.widget_at(doc, focused).map(|(id, _)| id)
    }

    /// Resolve a node to the widget and part it belongs to, walking up
    /// through ancestors so clicks on nested nodes route correctly.
    pub fn widget_at(&self, doc: &Document, node: NodeId) -> Option<(WidgetId, Part)> {
        if let Some(&hit) = self.parts.get(&node) {
            return Some(hit);
        }
        for ancestor in doc.ancestors(node) {
            if let Some(&hit) = self.parts.get(&ancestor) {
                return Some(hit);
            }
        }
        None
    }

    /// Open one widget's menu, closing every other open menu first so at
    /// most one menu is open page-wide.
    pub fn open(&mut self, doc: &mut Document, id: WidgetId) -> Result<()> {
        self.close_all_except(doc, Some(id))?;
        if let Some(widget) = self.widgets.get_mut(id) {
            widget.open(doc)?;
        }
        Ok(())
    }

    /// Close every menu except `keep` (or every menu when `keep` is
    /// `None`), clearing focus styling on the closed widgets.
    pub fn close_all_except(&mut self, doc: &mut Document, keep: Option<WidgetId>) -> Result<()> {
        for (id, widget) in self.widgets.iter_mut() {
            if Some(id) == keep {
                continue;
            }
            widget.close(doc)?;
            widget.set_focused(doc, false)?;
        }
        Ok(())
    }

    /// Route a document-level click.
    ///
    /// A click on a widget's trigger or container toggles that widget's
    /// menu. A click on a menu row commits that option and closes the
    /// menu. A click anywhere else closes all menus and clears all focus
    /// styling.
    pub fn handle_click(&mut self, doc: &mut Document, target: NodeId) -> Result<()> {
        let Some((id, part)) = self.widget_at(doc, target) else {
            trace!("outside click, closing all menus");
            self.close_all_except(doc, None)?;
            return Ok(());
        };
        match part {
            Part::Container | Part::Trigger => {
                let open = self
                    .widgets
                    .get(id)
                    .is_some_and(|widget| widget.is_open());
                if open {
                    if let Some(widget) = self.widgets.get_mut(id) {
                        widget.close(doc)?;
                    }
                } else {
                    self.open(doc, id)?;
                }
            }
            Part::Row(index) => {
                if let Some(widget) = self.widgets.get_mut(id) {
                    widget.commit(doc, index)?;
                    widget.close(doc)?;
                }
            }
            // Clicks on menu padding neither select nor dismiss.
            Part::Menu => {}
        }
        Ok(())
    }

    /// Route a key press to the widget whose container holds focus.
    ///
    /// When handling opens a menu, other menus are closed to keep the
    /// one-open-menu rule.
    pub fn handle_key(&mut self, doc: &mut Document, event: &mut KeyPressEvent) -> Result<()> {
        let Some(id) = self.focused_widget(doc) else {
            return Ok(());
        };
        let opened = match self.widgets.get_mut(id) {
            Some(widget) => widget.handle_key(doc, event)?,
            None => false,
        };
        if opened {
            self.close_all_except(doc, Some(id))?;
        }
        Ok(())
    }

    /// A widget container gained focus (tab or programmatic): enter the
    /// focused visual state without opening the menu.
    pub fn handle_focus_in(&mut self, doc: &mut Document, node: NodeId) -> Result<()> {
        if let Some((id, _)) = self.widget_at(doc, node)
            && let Some(widget) = self.widgets.get_mut(id)
        {
            widget.set_focused(doc, true)?;
        }
        Ok(())
    }

    /// A widget container lost focus: close its menu and clear focus
    /// styling.
    pub fn handle_focus_out(&mut self, doc: &mut Document, node: NodeId) -> Result<()> {
        if let Some((id, _)) = self.widget_at(doc, node)
            && let Some(widget) = self.widgets.get_mut(id)
        {
            widget.close(doc)?;
            widget.set_focused(doc, false)?;
        }
        Ok(())
    }

    /// Drop widgets whose native select left the document, removing
    /// their synthesized nodes and routing entries.
    pub fn prune_detached(&mut self, doc: &mut Document) -> Result<()> {
        let dead: Vec<WidgetId> = self
            .widgets
            .iter()
            .filter(|(_, widget)| !doc.contains(widget.select()))
            .map(|(id, _)| id)
            .collect();
        for id in dead {
            if let Some(widget) = self.widgets.remove(id) {
                self.parts.retain(|_, &mut (owner, _)| owner != id);
                if doc.contains(widget.container()) {
                    doc.remove(widget.container())?;
                }
                trace!(?id, "pruned widget for detached select");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chameleon_dom::SelectOption;
    use chameleon_style::{Color, StyleSnapshot};

    use super::*;
    use crate::keyboard::Key;
    use crate::widget::FOCUSED_FLAG;

    fn snapshot() -> StyleSnapshot {
        StyleSnapshot {
            font_family: "sans-serif".into(),
            background: "rgb(255, 255, 255)".into(),
            border: "1px solid rgb(204, 204, 204)".into(),
            border_radius: "0px".into(),
            padding: "4px".into(),
            font_size: "14px".into(),
            height: "32px".into(),
            line_height: "18px".into(),
            color: "rgb(0, 0, 0)".into(),
            menu_background: "rgb(255, 255, 255)".into(),
            focus_outline: "none".into(),
            focus_outline_offset: "0px".into(),
            focus_shadow: "none".into(),
            focus_border_color: "rgb(0, 0, 0)".into(),
            placeholder_color: Color::from_rgb8(0, 0, 0).with_alpha(0.45),
        }
    }

    fn widget_pair(doc: &mut Document) -> (WidgetRegistry, WidgetId, WidgetId) {
        let mut registry = WidgetRegistry::new();
        let mut ids = Vec::new();
        for _ in 0..2 {
            let select = doc.create_select(vec![
                SelectOption::new("a", "Apple"),
                SelectOption::new("b", "Banana"),
            ]);
            doc.append_child(doc.root(), select).unwrap();
            let widget = MimicDropdown::synthesize(doc, select, snapshot()).unwrap();
            ids.push(registry.register(widget));
        }
        (registry, ids[0], ids[1])
    }

    #[test]
    fn at_most_one_menu_open() {
        let mut doc = Document::new();
        let (mut registry, a, b) = widget_pair(&mut doc);

        registry.open(&mut doc, a).unwrap();
        assert!(registry.get(a).unwrap().is_open());

        registry.open(&mut doc, b).unwrap();
        assert!(!registry.get(a).unwrap().is_open());
        assert!(registry.get(b).unwrap().is_open());
    }

    #[test]
    fn outside_click_closes_everything() {
        let mut doc = Document::new();
        let (mut registry, a, _) = widget_pair(&mut doc);
        let bystander = doc.create_container("div");
        doc.append_child(doc.root(), bystander).unwrap();

        registry.open(&mut doc, a).unwrap();
        let container = registry.get(a).unwrap().container();
        assert!(doc.has_flag(container, FOCUSED_FLAG));

        registry.handle_click(&mut doc, bystander).unwrap();
        assert!(!registry.get(a).unwrap().is_open());
        assert!(!registry.get(a).unwrap().is_focused());
        assert!(!doc.has_flag(container, FOCUSED_FLAG));
    }

    #[test]
    fn trigger_click_toggles() {
        let mut doc = Document::new();
        let (mut registry, a, _) = widget_pair(&mut doc);
        let trigger_child = registry.get(a).unwrap().text_span();

        registry.handle_click(&mut doc, trigger_child).unwrap();
        assert!(registry.get(a).unwrap().is_open());
        registry.handle_click(&mut doc, trigger_child).unwrap();
        assert!(!registry.get(a).unwrap().is_open());
    }

    #[test]
    fn row_click_commits_and_closes() {
        let mut doc = Document::new();
        let (mut registry, a, _) = widget_pair(&mut doc);
        registry.open(&mut doc, a).unwrap();

        let row = registry.get(a).unwrap().rows()[1];
        registry.handle_click(&mut doc, row).unwrap();

        let widget = registry.get(a).unwrap();
        assert!(!widget.is_open());
        assert_eq!(doc.selected_index(widget.select()).unwrap(), Some(1));
    }

    #[test]
    fn keys_route_to_focused_widget() {
        let mut doc = Document::new();
        let (mut registry, a, b) = widget_pair(&mut doc);
        registry.open(&mut doc, b).unwrap();

        let container = registry.get(a).unwrap().container();
        doc.focus(container, false).unwrap();

        let mut enter = KeyPressEvent::new(Key::Enter);
        registry.handle_key(&mut doc, &mut enter).unwrap();

        // Opening A via keyboard closed B.
        assert!(registry.get(a).unwrap().is_open());
        assert!(!registry.get(b).unwrap().is_open());
    }

    #[test]
    fn focus_in_styles_without_opening() {
        let mut doc = Document::new();
        let (mut registry, a, _) = widget_pair(&mut doc);
        let container = registry.get(a).unwrap().container();

        registry.handle_focus_in(&mut doc, container).unwrap();
        assert!(registry.get(a).unwrap().is_focused());
        assert!(!registry.get(a).unwrap().is_open());

        registry.handle_focus_out(&mut doc, container).unwrap();
        assert!(!registry.get(a).unwrap().is_focused());
    }

    #[test]
    fn prune_removes_widgets_for_detached_selects() {
        let mut doc = Document::new();
        let (mut registry, a, _) = widget_pair(&mut doc);
        let select = registry.get(a).unwrap().select();
        let container = registry.get(a).unwrap().container();

        doc.remove(select).unwrap();
        registry.prune_detached(&mut doc).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.get(a).is_none());
        assert!(!doc.contains(container));
    }
}
