//! RAII guard for the active symbol table.
//!
//! The guard holds `&mut Rehydrator` and implements `Deref`/`DerefMut`, so
//! decoding continues through it as if it were the rehydrator. Dropping it,
//! including while unwinding from a malformed-stream panic, restores the
//! table that was active before.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use glint_types::SymbolTable;

use super::Rehydrator;

pub(super) struct ActiveTableGuard<'guard, 'a> {
    rehydrator: &'guard mut Rehydrator<'a>,
    previous: Option<Arc<SymbolTable>>,
}

impl Drop for ActiveTableGuard<'_, '_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.rehydrator.symbol_table = previous;
        }
    }
}

impl<'a> Deref for ActiveTableGuard<'_, 'a> {
    type Target = Rehydrator<'a>;

    fn deref(&self) -> &Self::Target {
        self.rehydrator
    }
}

impl DerefMut for ActiveTableGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.rehydrator
    }
}

impl<'a> Rehydrator<'a> {
    /// Make `table` active until the returned guard is dropped.
    pub(super) fn with_active_table(&mut self, table: Arc<SymbolTable>) -> ActiveTableGuard<'_, 'a> {
        let previous = std::mem::replace(&mut self.symbol_table, table);
        ActiveTableGuard {
            rehydrator: self,
            previous: Some(previous),
        }
    }

    /// Decode an inheriting symbol table and make it active until the guard
    /// is dropped. A void table leaves the current table active.
    ///
    /// Returns the decoded table alongside the guard, for the node that
    /// will own it.
    pub(super) fn push_symbol_table(&mut self) -> (Option<Arc<SymbolTable>>, ActiveTableGuard<'_, 'a>) {
        let scoped = self.symbol_table(true);
        let active = match &scoped {
            Some(table) => Arc::clone(table),
            None => Arc::clone(&self.symbol_table),
        };
        (scoped, self.with_active_table(active))
    }
}
