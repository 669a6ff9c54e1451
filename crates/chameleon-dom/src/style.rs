//! Computed style records sampled from nodes.
//!
//! A [`ComputedStyle`] is a mapping of CSS property name to the formatted
//! string value a style query would report. Records are sparse: reading a
//! property that was never set yields the browser-like default from
//! [`default_value`]. Pseudo-state records (`:focus`, `::placeholder`) are
//! sparse overlays merged on top of the base record at query time.

use std::collections::HashMap;

/// Property names used by the style sampler.
pub mod properties {
    /// Text color.
    pub const COLOR: &str = "color";
    /// Background color.
    pub const BACKGROUND_COLOR: &str = "background-color";
    /// Border shorthand.
    pub const BORDER: &str = "border";
    /// Border color.
    pub const BORDER_COLOR: &str = "border-color";
    /// Border radius shorthand.
    pub const BORDER_RADIUS: &str = "border-radius";
    /// Padding shorthand.
    pub const PADDING: &str = "padding";
    /// Font family stack.
    pub const FONT_FAMILY: &str = "font-family";
    /// Font size.
    pub const FONT_SIZE: &str = "font-size";
    /// Explicit height.
    pub const HEIGHT: &str = "height";
    /// Line height.
    pub const LINE_HEIGHT: &str = "line-height";
    /// Outline shorthand.
    pub const OUTLINE: &str = "outline";
    /// Outline offset.
    pub const OUTLINE_OFFSET: &str = "outline-offset";
    /// Box shadow.
    pub const BOX_SHADOW: &str = "box-shadow";
}

/// Default values reported for properties that were never set,
/// matching the strings a browser style query would format.
const DEFAULTS: &[(&str, &str)] = &[
    (properties::COLOR, "rgb(0, 0, 0)"),
    (properties::BACKGROUND_COLOR, "rgba(0, 0, 0, 0)"),
    (properties::BORDER, "0px none rgb(0, 0, 0)"),
    (properties::BORDER_COLOR, "rgb(0, 0, 0)"),
    (properties::BORDER_RADIUS, "0px"),
    (properties::PADDING, "0px"),
    (properties::FONT_FAMILY, "sans-serif"),
    (properties::FONT_SIZE, "16px"),
    (properties::HEIGHT, "auto"),
    (properties::LINE_HEIGHT, "normal"),
    (properties::OUTLINE, "rgb(0, 0, 0) none 0px"),
    (properties::OUTLINE_OFFSET, "0px"),
    (properties::BOX_SHADOW, "none"),
];

/// Get the default string value for a property, or `""` for unknown ones.
pub fn default_value(property: &str) -> &'static str {
    DEFAULTS
        .iter()
        .find(|(name, _)| *name == property)
        .map(|(_, value)| *value)
        .unwrap_or("")
}

/// A sparse computed style record.
#[derive(Debug, Clone, Default)]
pub struct ComputedStyle {
    values: HashMap<String, String>,
}

impl ComputedStyle {
    /// Create an empty record; every property reads as its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property value.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.values.insert(property.into(), value.into());
    }

    /// Set a property value using builder pattern.
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Get a property value, falling back to the browser-like default.
    pub fn get(&self, property: &str) -> &str {
        self.values
            .get(property)
            .map(String::as_str)
            .unwrap_or_else(|| default_value(property))
    }

    /// Whether the property was explicitly set on this record.
    pub fn is_set(&self, property: &str) -> bool {
        self.values.contains_key(property)
    }

    /// Merge another record's explicit values over this one.
    pub fn merge_from(&mut self, overlay: &ComputedStyle) {
        for (property, value) in &overlay.values {
            self.values.insert(property.clone(), value.clone());
        }
    }
}

/// Per-node style storage: base record plus pseudo-state overlays.
#[derive(Debug, Clone, Default)]
pub(crate) struct StyleRecord {
    /// The normal-state computed style.
    pub(crate) base: ComputedStyle,
    /// Sparse overlay applied while the node is focused.
    pub(crate) focus: Option<ComputedStyle>,
    /// Sparse `::placeholder` pseudo style for text-like inputs.
    pub(crate) placeholder: Option<ComputedStyle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_property_reads_default() {
        let style = ComputedStyle::new();
        assert_eq!(style.get(properties::COLOR), "rgb(0, 0, 0)");
        assert_eq!(style.get(properties::BACKGROUND_COLOR), "rgba(0, 0, 0, 0)");
        assert_eq!(style.get("clip-path"), "");
    }

    #[test]
    fn set_overrides_default() {
        let style = ComputedStyle::new().with(properties::COLOR, "rgb(51, 51, 51)");
        assert_eq!(style.get(properties::COLOR), "rgb(51, 51, 51)");
        assert!(style.is_set(properties::COLOR));
        assert!(!style.is_set(properties::BORDER));
    }

    #[test]
    fn merge_copies_only_explicit_values() {
        let mut base = ComputedStyle::new()
            .with(properties::COLOR, "rgb(10, 10, 10)")
            .with(properties::BORDER, "1px solid rgb(200, 200, 200)");
        let overlay = ComputedStyle::new().with(properties::COLOR, "rgb(0, 120, 255)");
        base.merge_from(&overlay);
        assert_eq!(base.get(properties::COLOR), "rgb(0, 120, 255)");
        assert_eq!(base.get(properties::BORDER), "1px solid rgb(200, 200, 200)");
    }
}
