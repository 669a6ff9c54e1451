//! Progressive enhancement of native select controls.
//!
//! Each native select in a document is replaced, visually only, by a
//! synthesized dropdown widget styled to mimic a nearby text input. The
//! select stays in the tree, keeps its form submission semantics, and
//! keeps firing change notifications to host listeners exactly as it
//! would natively.
//!
//! # Example
//!
//! ```
//! use chameleon_dom::{Document, SelectOption};
//! use chameleon_select::Enhancer;
//! use chameleon_style::ComputedStyleProvider;
//!
//! let mut doc = Document::new();
//! let form = doc.create_form();
//! let input = doc.create_text_input();
//! let select = doc.create_select(vec![
//!     SelectOption::new("a", "Apple"),
//!     SelectOption::new("b", "Banana"),
//! ]);
//! doc.append_child(doc.root(), form)?;
//! doc.append_child(form, input)?;
//! doc.append_child(form, select)?;
//!
//! let mut enhancer = Enhancer::new(ComputedStyleProvider::new());
//! assert_eq!(enhancer.install(&mut doc)?, 1);
//! assert!(!doc.is_visible(select));
//! # Ok::<(), chameleon_select::Error>(())
//! ```

mod enhancer;
mod error;
mod keyboard;
mod registry;
mod widget;

pub use enhancer::{Enhancer, PROCESSED_FLAG};
pub use error::{Error, Result};
pub use keyboard::{Key, KeyPressEvent};
pub use registry::{WidgetId, WidgetRegistry};
pub use widget::{FOCUSED_FLAG, MimicDropdown, Part, SELECTED_ROW_FLAG};
