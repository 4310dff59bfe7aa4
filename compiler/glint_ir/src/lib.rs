//! Glint IR - shared front-end vocabulary
//!
//! This crate contains the data structures every other Glint crate speaks:
//! - Spans for source locations (including the "no position" span used by
//!   rehydrated builtin code)
//! - Operators, with their stable byte encoding
//! - Layout qualifiers and modifiers
//! - The pre-type-check parse tree (`AstNode`) and its debug description
//!
//! The typed IR lives in `glint_types`; this crate has no notion of types.

pub mod ast;
mod layout;
mod modifiers;
mod operator;
mod span;

pub use ast::{AstKind, AstNode};
pub use layout::{CType, Layout, LayoutFlags, Primitive};
pub use modifiers::{ModifierFlags, Modifiers};
pub use operator::Operator;
pub use span::Span;

/// Render a float literal so that it always reads back as a float.
///
/// Integral values keep a trailing `.0` (`1.0`, not `1`).
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
