//! Glint IR rehydration.
//!
//! Builtin modules ship as compact binary blobs instead of source text. A
//! blob is a string table followed by a pre-order stream of tagged records:
//! one symbol table, then the module's program elements. Rehydrating it
//! rebuilds the typed IR directly, skipping lexing, parsing and checking.
//!
//! - [`Command`] defines the record tags
//! - [`BlobReader`] is the byte cursor, [`BlobWriter`] its producing side
//! - [`Rehydrator`] is one decoding session
//! - [`rehydrate_module`] decodes a whole module

mod command;
mod error;
mod reader;
mod rehydrator;
mod writer;

use std::sync::Arc;

use glint_types::ir::ProgramElement;
use glint_types::{Context, SymbolTable};

pub use command::{Command, FORMAT_VERSION};
pub use error::BlobError;
pub use reader::BlobReader;
pub use rehydrator::Rehydrator;
pub use writer::BlobWriter;

/// The decoded contents of a module blob.
#[derive(Debug)]
pub struct RehydratedModule {
    /// The module's top-level scope, a child of the table decoding started
    /// from. `None` if the blob carries an empty table marker.
    pub symbols: Option<Arc<SymbolTable>>,
    pub elements: Vec<ProgramElement>,
}

/// Decode a module blob against `builtin_table`.
///
/// The module's symbol table is decoded first and inherits from
/// `builtin_table`; the elements are decoded afterwards with
/// `builtin_table` active again.
///
/// # Errors
///
/// Returns a [`BlobError`] if the blob header is unusable.
///
/// # Panics
///
/// Panics on a malformed command stream, or if `builtin_table` is not a
/// builtin table.
#[tracing::instrument(level = "debug", skip_all, fields(len = bytes.len()))]
pub fn rehydrate_module(
    ctx: &Context,
    builtin_table: Arc<SymbolTable>,
    bytes: &[u8],
) -> Result<RehydratedModule, BlobError> {
    let mut rehydrator = Rehydrator::new(ctx, builtin_table, bytes)?;
    let symbols = rehydrator.symbol_table(true);
    let elements = rehydrator.elements();
    tracing::debug!(
        symbols = rehydrator.registered_ids(),
        elements = elements.len(),
        "rehydrated module"
    );
    Ok(RehydratedModule { symbols, elements })
}
