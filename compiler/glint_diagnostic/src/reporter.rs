//! Thread-safe error sink shared by a compilation context.
//!
//! Type-model operations take the context by shared reference, so several
//! threads checking against one context funnel their diagnostics through
//! this mutex.

use glint_ir::Span;
use parking_lot::Mutex;

use crate::{Diagnostic, DiagnosticConfig, DiagnosticQueue, ErrorCode};

/// Collects diagnostics behind a mutex.
#[derive(Debug, Default)]
pub struct ErrorReporter {
    queue: Mutex<DiagnosticQueue>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        ErrorReporter {
            queue: Mutex::new(DiagnosticQueue::with_config(config)),
        }
    }

    /// Report an error with a primary label at `span`.
    pub fn error(&self, span: Span, code: ErrorCode, message: impl Into<String>) {
        let message = message.into();
        let diag = Diagnostic::error(code)
            .with_label(span, code.summary())
            .with_message(message);
        self.report(diag);
    }

    /// Queue a fully-built diagnostic.
    pub fn report(&self, diag: Diagnostic) {
        self.queue.lock().add(diag);
    }

    /// Number of errors queued since the last [`take_diagnostics`](Self::take_diagnostics).
    pub fn error_count(&self) -> usize {
        self.queue.lock().error_count()
    }

    /// Drain every queued diagnostic, sorted by source offset.
    pub fn take_diagnostics(&self) -> Vec<Diagnostic> {
        self.queue.lock().flush()
    }
}
