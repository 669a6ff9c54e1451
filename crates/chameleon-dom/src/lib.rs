//! Headless document model for chameleon-select.
//!
//! This crate provides the element tree the enhancement layer operates
//! on: selects with options, text-like inputs, forms, and generic
//! containers, stored in an arena and addressed by stable [`NodeId`]s.
//! The document also owns the state a style sampler and widget layer
//! need from a page environment:
//!
//! - per-node computed styles with `:focus` and `::placeholder` pseudo
//!   records ([`ComputedStyle`]),
//! - document focus and viewport scroll position,
//! - custom style variables with ancestor inheritance,
//! - bubbling change events with registered listeners ([`Event`]),
//! - a mutation journal of inserted subtree roots
//!   ([`Document::take_inserted`]).
//!
//! The host owns the document and drives all interaction; every
//! operation is synchronous.
//!
//! # Example
//!
//! ```
//! use chameleon_dom::{Document, SelectOption};
//!
//! let mut doc = Document::new();
//! let form = doc.create_form();
//! let select = doc.create_select(vec![
//!     SelectOption::new("a", "Apple"),
//!     SelectOption::new("b", "Banana"),
//! ]);
//! doc.append_child(doc.root(), form)?;
//! doc.append_child(form, select)?;
//!
//! assert_eq!(doc.select_value(select)?, "a");
//! # Ok::<(), chameleon_dom::DomError>(())
//! ```

mod document;
mod error;
mod event;
mod node;
mod style;

pub use document::Document;
pub use error::{DomError, DomResult};
pub use event::{Event, EventKind, ListenerId};
pub use node::{ElementKind, Node, NodeId, SelectOption, SelectState};
pub use style::{ComputedStyle, default_value, properties};
