//! The style provider capability and the computed-style sampler.

use chameleon_dom::{Document, NodeId, properties};
use tracing::debug;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::snapshot::StyleSnapshot;

/// Alpha applied to the normal text color when no distinct placeholder
/// color can be resolved.
pub const PLACEHOLDER_FALLBACK_ALPHA: f32 = 0.45;

/// Capability for producing a style snapshot from a reference element.
///
/// The widget synthesizer depends only on this trait, so it can be
/// exercised against a fixed fake without seeding computed styles.
pub trait StyleProvider {
    /// Produce a snapshot of the reference element's styling.
    fn sample(&mut self, doc: &mut Document, reference: NodeId) -> Result<StyleSnapshot>;
}

/// The real provider: samples the document's computed styles.
///
/// Focus-state properties are sampled by transiently focusing the
/// reference element without scrolling, reading its computed style, then
/// blurring it and restoring the previously focused node and scroll
/// position. Known limitation, preserved deliberately: any focus or blur
/// listener the host attached to the reference (input masking,
/// validation-on-blur) fires during sampling.
#[derive(Debug, Clone, Default)]
pub struct ComputedStyleProvider;

impl ComputedStyleProvider {
    /// Create a new provider.
    pub fn new() -> Self {
        Self
    }

    /// Sample the focus-state properties of the reference.
    fn sample_focus_state(&self, doc: &mut Document, reference: NodeId) -> Result<FocusSample> {
        let prior_focus = doc.focused();
        let prior_scroll = doc.scroll_position();

        debug!(?reference, "sampling focus-state styles; reference focus listeners may fire");
        let style = if doc.focus(reference, true)? {
            let focused = doc.computed_style(reference)?;
            doc.blur(reference)?;
            focused
        } else {
            // Not focusable (e.g. the reference fallback chain bottomed
            // out on a non-interactive node): the normal state stands in.
            doc.computed_style(reference)?
        };

        if let Some(previous) = prior_focus
            && doc.contains(previous)
        {
            doc.focus(previous, true)?;
        }
        doc.set_scroll_position(prior_scroll.0, prior_scroll.1);

        Ok(FocusSample {
            outline: style.get(properties::OUTLINE).to_string(),
            outline_offset: style.get(properties::OUTLINE_OFFSET).to_string(),
            shadow: style.get(properties::BOX_SHADOW).to_string(),
            border_color: style.get(properties::BORDER_COLOR).to_string(),
        })
    }

    /// Derive a placeholder-like color from a throwaway hidden input.
    ///
    /// The probe is appended, inspected, and removed; it must not leak
    /// even when inspection fails. Falls back to a 45%-alpha tint of the
    /// normal text color when no distinct placeholder color resolves.
    fn derive_placeholder_color(&self, doc: &mut Document, text_color: Color) -> Result<Color> {
        let probe = doc.create_text_input();
        doc.set_visible(probe, false)?;
        doc.append_child(doc.root(), probe)?;
        let pseudo = doc.placeholder_style(probe);
        doc.remove(probe)?;

        let fallback = text_color.with_alpha(PLACEHOLDER_FALLBACK_ALPHA);
        let Some(pseudo) = pseudo? else {
            return Ok(fallback);
        };
        if !pseudo.is_set(properties::COLOR) {
            return Ok(fallback);
        }
        match Color::parse(pseudo.get(properties::COLOR)) {
            Ok(color) if !color.approx_eq(text_color) => Ok(color),
            _ => Ok(fallback),
        }
    }
}

struct FocusSample {
    outline: String,
    outline_offset: String,
    shadow: String,
    border_color: String,
}

impl StyleProvider for ComputedStyleProvider {
    fn sample(&mut self, doc: &mut Document, reference: NodeId) -> Result<StyleSnapshot> {
        if !doc.contains(reference) {
            return Err(Error::Dom(chameleon_dom::DomError::InvalidNodeId));
        }

        let normal = doc.computed_style(reference)?;
        let color_value = normal.get(properties::COLOR).to_string();
        let text_color =
            Color::parse(&color_value).map_err(|_| Error::invalid_color(&color_value))?;

        let focus = self.sample_focus_state(doc, reference)?;
        let placeholder_color = self.derive_placeholder_color(doc, text_color)?;

        let background = normal.get(properties::BACKGROUND_COLOR).to_string();
        let menu_background = match Color::parse(&background) {
            Ok(color) if color.a == 0.0 => "rgb(255, 255, 255)".to_string(),
            _ => background.clone(),
        };

        Ok(StyleSnapshot {
            font_family: normal.get(properties::FONT_FAMILY).to_string(),
            background,
            border: normal.get(properties::BORDER).to_string(),
            border_radius: normal.get(properties::BORDER_RADIUS).to_string(),
            padding: normal.get(properties::PADDING).to_string(),
            font_size: normal.get(properties::FONT_SIZE).to_string(),
            height: normal.get(properties::HEIGHT).to_string(),
            line_height: normal.get(properties::LINE_HEIGHT).to_string(),
            color: color_value,
            menu_background,
            focus_outline: focus.outline,
            focus_outline_offset: focus.outline_offset,
            focus_shadow: focus.shadow,
            focus_border_color: focus.border_color,
            placeholder_color,
        })
    }
}
