//! Diagnostic queue for collecting, deduplicating, and sorting diagnostics.
//!
//! Diagnostics are keyed by the source offset of their primary label. The
//! type checker keeps going after an error, so the same problem can be
//! reported more than once for one location; the queue collapses those.

use crate::Diagnostic;

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors before further errors are dropped (0 = unlimited).
    pub error_limit: usize,
    /// Drop an error whose offset, message and notes match one already queued.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 10,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Queued diagnostic with its sort key.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct QueuedDiagnostic {
    diagnostic: Diagnostic,
    offset: u32,
}

/// Queue for collecting, deduplicating, and sorting diagnostics.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DiagnosticQueue {
    diagnostics: Vec<QueuedDiagnostic>,
    error_count: usize,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    /// Create a new diagnostic queue with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a diagnostic queue with custom configuration.
    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            error_count: 0,
            config,
        }
    }

    /// Add a diagnostic to the queue.
    ///
    /// Returns `true` if the diagnostic was added, `false` if it was filtered.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        if self.limit_reached() {
            return false;
        }

        // Positionless diagnostics sort after everything with a location.
        let offset = diag.primary_span().map_or(u32::MAX, |span| span.start);

        if self.config.deduplicate && self.is_duplicate(&diag, offset) {
            return false;
        }

        self.diagnostics.push(QueuedDiagnostic {
            diagnostic: diag,
            offset,
        });
        self.error_count += 1;
        true
    }

    /// Check if the error limit has been reached.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    /// Get the number of errors collected.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Whether nothing has been queued.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Sort diagnostics by offset and return them, clearing the queue.
    ///
    /// The sort is stable, so diagnostics at the same offset keep their
    /// reporting order.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by_key(|d| d.offset);
        self.error_count = 0;
        self.diagnostics.drain(..).map(|d| d.diagnostic).collect()
    }

    /// Get diagnostics without clearing the queue.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().map(|d| &d.diagnostic)
    }

    fn is_duplicate(&self, diag: &Diagnostic, offset: u32) -> bool {
        self.diagnostics
            .iter()
            .any(|queued| {
                queued.offset == offset
                    && queued.diagnostic.message == diag.message
                    && queued.diagnostic.notes == diag.notes
            })
    }
}
