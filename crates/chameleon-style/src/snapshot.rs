//! Style snapshots and the widget styling surface.

use chameleon_dom::{Document, DomResult, NodeId};

use crate::color::Color;

/// Names of the custom style variables projected onto a widget container.
///
/// Descendant nodes of the container resolve these declaratively through
/// variable inheritance, so per-element inline duplication is never
/// needed.
pub mod variables {
    /// Widget width.
    pub const WIDTH: &str = "--chameleon-width";
    /// Font family, from the reference control.
    pub const FONT_FAMILY: &str = "--chameleon-font-family";
    /// Trigger background.
    pub const BACKGROUND: &str = "--chameleon-background";
    /// Trigger border shorthand.
    pub const BORDER: &str = "--chameleon-border";
    /// Corner radius.
    pub const BORDER_RADIUS: &str = "--chameleon-border-radius";
    /// Inner padding.
    pub const PADDING: &str = "--chameleon-padding";
    /// Font size.
    pub const FONT_SIZE: &str = "--chameleon-font-size";
    /// Trigger height.
    pub const HEIGHT: &str = "--chameleon-height";
    /// Line height.
    pub const LINE_HEIGHT: &str = "--chameleon-line-height";
    /// Normal text color.
    pub const COLOR: &str = "--chameleon-color";
    /// Menu row text color.
    pub const ITEM_COLOR: &str = "--chameleon-item-color";
    /// Menu background (opaque fallback when the sampled background is
    /// fully transparent).
    pub const MENU_BACKGROUND: &str = "--chameleon-menu-background";
    /// Focus-state outline shorthand.
    pub const FOCUS_OUTLINE: &str = "--chameleon-focus-outline";
    /// Focus-state outline offset.
    pub const FOCUS_OUTLINE_OFFSET: &str = "--chameleon-focus-outline-offset";
    /// Focus-state box shadow.
    pub const FOCUS_SHADOW: &str = "--chameleon-focus-shadow";
    /// Focus-state border color.
    pub const FOCUS_BORDER_COLOR: &str = "--chameleon-focus-border-color";
    /// Derived placeholder text color.
    pub const PLACEHOLDER_COLOR: &str = "--chameleon-placeholder-color";
    /// The trigger's current text color: the placeholder color while the
    /// selection is empty or disabled, the normal color otherwise. The
    /// only variable rewritten after synthesis.
    pub const CURRENT_COLOR: &str = "--chameleon-current-color";
}

/// Width used when the source control was never laid out.
pub const FALLBACK_WIDTH_PX: f64 = 200.0;

/// An immutable set of style values sampled from a reference control.
///
/// Captured once per transform, before the widget is shown; never
/// re-sampled afterwards. Values are kept as the formatted strings the
/// style query reported, except the derived placeholder color which is
/// the product of channel math.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSnapshot {
    /// Font family stack.
    pub font_family: String,
    /// Background color.
    pub background: String,
    /// Border shorthand.
    pub border: String,
    /// Border radius.
    pub border_radius: String,
    /// Padding shorthand.
    pub padding: String,
    /// Font size.
    pub font_size: String,
    /// Height.
    pub height: String,
    /// Line height.
    pub line_height: String,
    /// Normal text color.
    pub color: String,
    /// Menu background: the sampled background, or an opaque fallback
    /// when it is fully transparent.
    pub menu_background: String,
    /// Outline sampled while the reference was focused.
    pub focus_outline: String,
    /// Outline offset sampled while the reference was focused.
    pub focus_outline_offset: String,
    /// Box shadow sampled while the reference was focused.
    pub focus_shadow: String,
    /// Border color sampled while the reference was focused.
    pub focus_border_color: String,
    /// Placeholder color: the probed `::placeholder` color, or a
    /// 45%-alpha tint of the normal text color.
    pub placeholder_color: Color,
}

impl StyleSnapshot {
    /// Project the snapshot onto a container node as style variables.
    ///
    /// `width_px` is the source control's rendered width; zero (never
    /// laid out) falls back to [`FALLBACK_WIDTH_PX`]. Called once at
    /// synthesis time; only [`variables::CURRENT_COLOR`] is ever
    /// rewritten afterwards, by the widget on selection changes.
    pub fn apply_to(&self, doc: &mut Document, container: NodeId, width_px: f64) -> DomResult<()> {
        let width = if width_px > 0.0 {
            width_px
        } else {
            FALLBACK_WIDTH_PX
        };
        let pairs = [
            (variables::WIDTH, format!("{width}px")),
            (variables::FONT_FAMILY, self.font_family.clone()),
            (variables::BACKGROUND, self.background.clone()),
            (variables::BORDER, self.border.clone()),
            (variables::BORDER_RADIUS, self.border_radius.clone()),
            (variables::PADDING, self.padding.clone()),
            (variables::FONT_SIZE, self.font_size.clone()),
            (variables::HEIGHT, self.height.clone()),
            (variables::LINE_HEIGHT, self.line_height.clone()),
            (variables::COLOR, self.color.clone()),
            (variables::ITEM_COLOR, self.color.clone()),
            (variables::MENU_BACKGROUND, self.menu_background.clone()),
            (variables::FOCUS_OUTLINE, self.focus_outline.clone()),
            (
                variables::FOCUS_OUTLINE_OFFSET,
                self.focus_outline_offset.clone(),
            ),
            (variables::FOCUS_SHADOW, self.focus_shadow.clone()),
            (
                variables::FOCUS_BORDER_COLOR,
                self.focus_border_color.clone(),
            ),
            (
                variables::PLACEHOLDER_COLOR,
                self.placeholder_color.to_css(),
            ),
        ];
        for (name, value) in pairs {
            doc.set_variable(container, name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chameleon_dom::Document;

    use super::*;

    fn snapshot() -> StyleSnapshot {
        StyleSnapshot {
            font_family: "Inter, sans-serif".into(),
            background: "rgb(255, 255, 255)".into(),
            border: "1px solid rgb(204, 204, 204)".into(),
            border_radius: "4px".into(),
            padding: "8px 12px".into(),
            font_size: "14px".into(),
            height: "36px".into(),
            line_height: "20px".into(),
            color: "rgb(51, 51, 51)".into(),
            menu_background: "rgb(255, 255, 255)".into(),
            focus_outline: "rgb(0, 120, 255) solid 2px".into(),
            focus_outline_offset: "1px".into(),
            focus_shadow: "rgba(0, 120, 255, 0.25) 0px 0px 0px 3px".into(),
            focus_border_color: "rgb(0, 120, 255)".into(),
            placeholder_color: Color::from_rgb8(51, 51, 51).with_alpha(0.45),
        }
    }

    #[test]
    fn apply_projects_all_variables() {
        let mut doc = Document::new();
        let container = doc.create_container("div");
        let row = doc.create_container("div");
        doc.append_child(doc.root(), container).unwrap();
        doc.append_child(container, row).unwrap();

        snapshot().apply_to(&mut doc, container, 320.0).unwrap();

        assert_eq!(doc.variable(container, variables::WIDTH), Some("320px"));
        assert_eq!(
            doc.resolve_variable(row, variables::BORDER),
            Some("1px solid rgb(204, 204, 204)")
        );
        assert_eq!(
            doc.resolve_variable(row, variables::PLACEHOLDER_COLOR),
            Some("rgba(51, 51, 51, 0.45)")
        );
    }

    #[test]
    fn zero_width_falls_back() {
        let mut doc = Document::new();
        let container = doc.create_container("div");
        doc.append_child(doc.root(), container).unwrap();
        snapshot().apply_to(&mut doc, container, 0.0).unwrap();
        assert_eq!(doc.variable(container, variables::WIDTH), Some("200px"));
    }
}
