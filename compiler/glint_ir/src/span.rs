//! Source location spans.
//!
//! Builtin code decoded from a blob has no source text, so every node it
//! produces carries [`Span::NONE`].

use std::fmt;

/// Source location span.
///
/// Layout: 8 bytes total
/// - start: u32 - byte offset from file start
/// - end: u32 - byte offset (exclusive)
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Span for nodes that have no source position.
    pub const NONE: Span = Span {
        start: u32::MAX,
        end: u32::MAX,
    };

    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Zero-width span at a byte offset.
    #[inline]
    pub const fn at(offset: u32) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Whether this is the positionless span.
    #[inline]
    pub const fn is_none(&self) -> bool {
        self.start == u32::MAX && self.end == u32::MAX
    }

    /// Length of the span in bytes. The positionless span has length 0.
    #[inline]
    pub const fn len(&self) -> u32 {
        if self.is_none() {
            0
        } else {
            self.end - self.start
        }
    }

    /// Check if span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merge two spans to create one covering both.
    ///
    /// Merging with [`Span::NONE`] yields the other span unchanged.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        if self.is_none() {
            return other;
        }
        if other.is_none() {
            return self;
        }
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Span::NONE
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "<none>")
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
