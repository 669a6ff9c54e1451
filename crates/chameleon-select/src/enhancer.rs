//! Document scanning and the idempotent transform.
//!
//! The enhancer finds native selects, both those present at install time
//! and those inserted later, and passes each one to the transform
//! exactly once. The transform marks the select first, samples a
//! reference control, synthesizes the widget, and registers it.

use chameleon_dom::{Document, NodeId};
use chameleon_style::StyleProvider;
use tracing::{debug, warn};

use crate::error::Result;
use crate::registry::{WidgetId, WidgetRegistry};
use crate::widget::MimicDropdown;

/// Flag set on a select once it has been transformed. Set before any
/// other work so re-entrant scans never double-transform; never cleared.
pub const PROCESSED_FLAG: &str = "chameleon-loaded";

/// Scans a document for selects and enhances each exactly once.
#[derive(Debug)]
pub struct Enhancer<P> {
    provider: P,
    registry: WidgetRegistry,
}

impl<P: StyleProvider> Enhancer<P> {
    /// Create an enhancer with the given style provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            registry: WidgetRegistry::new(),
        }
    }

    /// The widget registry, for routing input events.
    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// The widget registry, mutably.
    pub fn registry_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.registry
    }

    /// Enhance every select currently in the document.
    pub fn install(&mut self, doc: &mut Document) -> Result<usize> {
        let selects = doc.selects_in(doc.root());
        let mut enhanced = 0;
        for select in selects {
            if self.transform(doc, select)?.is_some() {
                enhanced += 1;
            }
        }
        // Install consumes the journal so later insertions start clean.
        doc.take_inserted();
        debug!(enhanced, "installed enhancer");
        Ok(enhanced)
    }

    /// Drain the document's insertion journal and enhance any selects in
    /// the newly inserted subtrees. Safe to call at any cadence; already
    /// processed or since-removed entries are skipped.
    pub fn process_pending(&mut self, doc: &mut Document) -> Result<usize> {
        let inserted = doc.take_inserted();
        let mut enhanced = 0;
        for root in inserted {
            if !doc.contains(root) {
                continue;
            }
            for select in doc.selects_in(root) {
                if self.transform(doc, select)?.is_some() {
                    enhanced += 1;
                }
            }
        }
        self.registry.prune_detached(doc)?;
        Ok(enhanced)
    }

    /// Transform one select into a widget, or return `None` if it is not
    /// a select or was already processed.
    ///
    /// Never skipped for want of a form: a select with no enclosing form
    /// or reference input falls back to sampling its own computed style.
    pub fn transform(&mut self, doc: &mut Document, select: NodeId) -> Result<Option<WidgetId>> {
        if !doc.contains(select) || doc.options(select).is_err() {
            return Ok(None);
        }
        if doc.has_flag(select, PROCESSED_FLAG) {
            return Ok(None);
        }
        doc.set_flag(select, PROCESSED_FLAG, "")?;

        let reference = self.resolve_reference(doc, select);
        if reference == select {
            warn!(?select, "no text reference found, sampling the select itself");
        }
        let snapshot = self.provider.sample(doc, reference)?;
        let widget = MimicDropdown::synthesize(doc, select, snapshot)?;
        Ok(Some(self.registry.register(widget)))
    }

    /// Pick the style reference for a select: the first text-like input
    /// in its form, then anywhere in the document, then the select
    /// itself.
    fn resolve_reference(&self, doc: &Document, select: NodeId) -> NodeId {
        doc.closest_form(select)
            .and_then(|form| doc.first_text_reference_in(form))
            .or_else(|| doc.first_text_reference_in(doc.root()))
            .unwrap_or(select)
    }
}
