//! Style sampling for chameleon widgets.
//!
//! This crate turns a reference element's computed styles into an
//! immutable [`StyleSnapshot`] that a widget projects onto itself as
//! style variables. Sampling covers the normal state, the focus state
//! (captured with a transient focus/blur round trip), and a derived
//! placeholder color.
//!
//! The sampling strategy lives behind the [`StyleProvider`] trait so
//! widget code can be tested against a fixed snapshot.

mod color;
mod error;
mod provider;
mod snapshot;

pub use color::Color;
pub use error::{Error, Result};
pub use provider::{ComputedStyleProvider, PLACEHOLDER_FALLBACK_ALPHA, StyleProvider};
pub use snapshot::{FALLBACK_WIDTH_PX, StyleSnapshot, variables};
