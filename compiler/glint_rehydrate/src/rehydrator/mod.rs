//! The decoding session.
//!
//! A [`Rehydrator`] walks one blob front to back. It owns everything that
//! changes while decoding (the cursor, the active symbol table, and the
//! id-to-symbol registry), so independent sessions never see each other's
//! ids and can run on separate threads against the same builtin types.
//!
//! Newly created symbols are owned by whichever table is active when they
//! are decoded. Nested tables become active through a scope guard, which
//! puts the previous table back when it goes out of scope.
//!
//! The stream is trusted: it comes from a matching encoder, so every
//! malformation (unknown tag, wrong symbol kind, reference to an id that
//! has not been decoded) is a panic rather than an error value.

mod elements;
mod expressions;
mod scope_guard;
mod statements;
mod symbols;

use std::sync::Arc;

use glint_ir::{CType, Layout, LayoutFlags, ModifierFlags, Modifiers, Operator, Primitive};
use glint_types::{Context, FunctionDeclaration, Symbol, SymbolTable, TypeRef, Variable};

use crate::command::Command;
use crate::reader::BlobReader;
use crate::BlobError;

/// Minimum stack space to keep available while recursing (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f` with enough stack for another level of statement or expression
/// nesting.
#[inline]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

pub struct Rehydrator<'a> {
    ctx: &'a Context,
    reader: BlobReader<'a>,
    symbol_table: Arc<SymbolTable>,
    /// Indexed by the ids the stream assigns, in the order it assigns them.
    symbols: Vec<Option<Symbol>>,
}

impl<'a> Rehydrator<'a> {
    /// Start a session over `bytes`, with `symbol_table` active.
    ///
    /// # Errors
    ///
    /// Returns a [`BlobError`] if the header is truncated, names a string
    /// table that does not fit, or carries a different format version.
    ///
    /// # Panics
    ///
    /// Panics if `symbol_table` is not a builtin table.
    pub fn new(
        ctx: &'a Context,
        symbol_table: Arc<SymbolTable>,
        bytes: &'a [u8],
    ) -> Result<Self, BlobError> {
        assert!(
            symbol_table.is_builtin(),
            "rehydration must start from a builtin symbol table"
        );
        Ok(Rehydrator {
            ctx,
            reader: BlobReader::new(bytes)?,
            symbol_table,
            symbols: Vec::new(),
        })
    }

    /// The table new symbols are currently owned by.
    pub fn active_table(&self) -> &Arc<SymbolTable> {
        &self.symbol_table
    }

    /// Number of ids registered so far (the highest id plus one).
    pub fn registered_ids(&self) -> usize {
        self.symbols.len()
    }

    /// Record the symbol decoded for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` already has a symbol.
    fn add_symbol(&mut self, id: u16, symbol: Symbol) {
        let index = usize::from(id);
        if self.symbols.len() <= index {
            self.symbols.resize(index + 1, None);
        }
        assert!(
            self.symbols[index].is_none(),
            "symbol id {id} registered twice"
        );
        tracing::trace!(id, kind = symbol.kind_name(), name = symbol.name(), "decoded symbol");
        self.symbols[index] = Some(symbol);
    }

    /// # Panics
    ///
    /// Panics if nothing was registered for `id` yet.
    fn registered(&self, id: u16) -> Symbol {
        match self.symbols.get(usize::from(id)) {
            Some(Some(symbol)) => symbol.clone(),
            _ => panic!("symbol id {id} referenced before it was decoded"),
        }
    }

    fn command(&mut self) -> Command {
        self.reader.read_command()
    }

    fn operator(&mut self) -> Operator {
        let byte = self.reader.read_u8();
        match Operator::from_u8(byte) {
            Some(op) => op,
            None => panic!("unknown operator byte {byte}"),
        }
    }

    /// # Panics
    ///
    /// Panics on an unknown layout tag, primitive or host type.
    pub fn layout(&mut self) -> Layout {
        match self.command() {
            Command::BuiltinLayout => Layout::builtin(i32::from(self.reader.read_s16())),
            Command::DefaultLayout => Layout::default(),
            Command::Layout => {
                let flags = LayoutFlags::from_bits_retain(self.reader.read_u32());
                let location = i32::from(self.reader.read_s8());
                let offset = i32::from(self.reader.read_s8());
                let binding = i32::from(self.reader.read_s8());
                let index = i32::from(self.reader.read_s8());
                let set = i32::from(self.reader.read_s8());
                let builtin = i32::from(self.reader.read_s16());
                let input_attachment_index = i32::from(self.reader.read_s8());
                let raw_primitive = self.reader.read_s8();
                let Some(primitive) = Primitive::from_raw(raw_primitive) else {
                    panic!("unknown layout primitive {raw_primitive}");
                };
                let max_vertices = i32::from(self.reader.read_s8());
                let invocations = i32::from(self.reader.read_s8());
                let when = self.reader.read_string().to_owned();
                let raw_ctype = self.reader.read_s8();
                let Some(ctype) = CType::from_raw(raw_ctype) else {
                    panic!("unknown layout ctype {raw_ctype}");
                };
                Layout {
                    flags,
                    location,
                    offset,
                    binding,
                    index,
                    set,
                    builtin,
                    input_attachment_index,
                    primitive,
                    max_vertices,
                    invocations,
                    when,
                    ctype,
                }
            }
            other => panic!("expected a layout, found {other}"),
        }
    }

    /// # Panics
    ///
    /// Panics on an unknown modifiers tag.
    pub fn modifiers(&mut self) -> Modifiers {
        match self.command() {
            Command::DefaultModifiers => Modifiers::default(),
            Command::Modifiers8Bit => {
                let layout = self.layout();
                let flags = ModifierFlags::from_bits_retain(u32::from(self.reader.read_u8()));
                Modifiers::new(layout, flags)
            }
            Command::Modifiers => {
                let layout = self.layout();
                let flags = ModifierFlags::from_bits_retain(self.reader.read_s32() as u32);
                Modifiers::new(layout, flags)
            }
            other => panic!("expected modifiers, found {other}"),
        }
    }

    /// Decode a symbol that must be a type.
    ///
    /// # Panics
    ///
    /// Panics if the decoded symbol is not a type.
    pub fn type_(&mut self) -> TypeRef {
        match self.symbol() {
            Symbol::Type(ty) => ty,
            other => panic!("expected a type, found {} '{}'", other.kind_name(), other.name()),
        }
    }

    fn variable(&mut self) -> Arc<Variable> {
        match self.symbol() {
            Symbol::Variable(variable) => variable,
            other => panic!(
                "expected a variable, found {} '{}'",
                other.kind_name(),
                other.name()
            ),
        }
    }

    fn function(&mut self) -> Arc<FunctionDeclaration> {
        match self.symbol() {
            Symbol::Function(function) => function,
            other => panic!(
                "expected a function, found {} '{}'",
                other.kind_name(),
                other.name()
            ),
        }
    }
}
