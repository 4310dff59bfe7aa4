//! Command implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use glint_rehydrate::{rehydrate_module, BlobError, RehydratedModule};
use glint_types::{CoercionCost, Context, SymbolTable, TypeRef};
use rayon::prelude::*;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("'{path}' is not a usable blob: {source}")]
    Blob { path: PathBuf, source: BlobError },
    #[error("'{0}' is not a builtin type")]
    UnknownType(String),
}

/// Read and rehydrate one blob against a fresh builtin root table.
///
/// # Panics
///
/// Panics if the command stream after a valid header is malformed.
pub fn dump_file(ctx: &Context, path: &Path) -> Result<String, CommandError> {
    let bytes = std::fs::read(path).map_err(|source| CommandError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), len = bytes.len(), "read blob");
    let root = SymbolTable::builtin_root(ctx.types);
    let module = rehydrate_module(ctx, root, &bytes).map_err(|source| CommandError::Blob {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(render_module(&module))
}

/// Dump every blob in parallel, then print each listing under its path in
/// argument order.
///
/// Returns the number of blobs that could not be read.
pub fn dump_files(ctx: &Context, paths: &[PathBuf]) -> usize {
    let listings: Vec<(String, Result<String, CommandError>)> = paths
        .par_iter()
        .map(|path| (path.display().to_string(), dump_file(ctx, path)))
        .collect();
    let mut errors = 0;
    for (path, listing) in listings {
        match listing {
            Ok(text) => {
                println!("== {path}");
                print!("{text}");
            }
            Err(err) => {
                eprintln!("error: {err}");
                errors += 1;
            }
        }
    }
    errors
}

/// The module's own symbols followed by its program elements.
pub fn render_module(module: &RehydratedModule) -> String {
    Listing(module).to_string()
}

struct Listing<'m>(&'m RehydratedModule);

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols = self
            .0
            .symbols
            .as_ref()
            .map(|table| table.owned_symbols())
            .unwrap_or_default();
        writeln!(f, "// {} symbols", symbols.len())?;
        for symbol in &symbols {
            writeln!(f, "{}: {symbol}", symbol.kind_name())?;
        }
        writeln!(f, "// {} elements", self.0.elements.len())?;
        for element in &self.0.elements {
            writeln!(f, "{element}")?;
        }
        Ok(())
    }
}

fn builtin_type<'t>(ctx: &'t Context, name: &str) -> Result<&'t TypeRef, CommandError> {
    ctx.types
        .lookup(name)
        .ok_or_else(|| CommandError::UnknownType(name.to_owned()))
}

/// Cost of implicitly converting builtin type `from` to builtin type `to`.
pub fn coercion_cost(ctx: &Context, from: &str, to: &str) -> Result<CoercionCost, CommandError> {
    let from = builtin_type(ctx, from)?;
    let to = builtin_type(ctx, to)?;
    Ok(from.coercion_cost(to))
}

/// One line per builtin type: its name and kind.
pub fn builtin_types(ctx: &Context) -> Vec<String> {
    ctx.types
        .iter()
        .map(|ty| format!("{} ({:?})", ty.name(), ty.class()))
        .collect()
}
