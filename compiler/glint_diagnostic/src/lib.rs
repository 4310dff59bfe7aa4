//! Diagnostic system for user-facing type errors.
//!
//! Every diagnostic carries:
//! - An error code for searchability
//! - A clear message (what went wrong)
//! - A primary span (where it went wrong)
//!
//! Internal invariant violations are not diagnostics; they panic where they
//! are detected.

mod diagnostic;
mod error_code;
pub mod queue;
mod reporter;

pub use diagnostic::{type_mismatch, Diagnostic, Label};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
pub use reporter::ErrorReporter;
