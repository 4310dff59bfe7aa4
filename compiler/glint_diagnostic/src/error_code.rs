//! Error codes for user-facing diagnostics.
//!
//! Format: E#### where the first digit is the phase. Only the type phase
//! (E2xxx) reports through this crate today; the numbering leaves room for
//! the parser (E1xxx) that feeds the type checker.

use std::fmt;

/// Error codes for all Glint diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Type errors (E2xxx)
    /// Expression cannot be implicitly converted to the expected type
    E2001,
    /// Function name used without a call
    E2002,
    /// Type name used without a constructor call
    E2003,
    /// Target type has no constructor for the coerced value
    E2004,
    /// Integer literal does not fit its declared integer type
    E2005,
}

impl ErrorCode {
    /// Get the numeric code as a string (e.g., "E2001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
        }
    }

    /// One-line summary, used as the text of the primary label.
    pub fn summary(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "type mismatch",
            ErrorCode::E2002 => "function reference without call",
            ErrorCode::E2003 => "type reference without constructor",
            ErrorCode::E2004 => "type cannot be constructed",
            ErrorCode::E2005 => "integer literal out of range",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
