//! Lexical scopes.
//!
//! A table owns the symbols it allocated and indexes names for those and
//! for symbols borrowed from other tables. Lookup walks the parent chain, so
//! a child sees every name of its ancestors without copying them.
//!
//! Tables are shared as `Arc<SymbolTable>`: a block owns its table, its
//! children point at it, and rehydration keeps adding to an ancestor while
//! nested tables are alive. The contents therefore sit behind a lock.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::symbol::{Symbol, SymbolKind, UnresolvedFunction};
use crate::BuiltinTypes;

#[derive(Default)]
struct Contents {
    /// Symbols allocated by this table, in allocation order.
    owned: Vec<Symbol>,
    names: FxHashMap<String, Symbol>,
}

pub struct SymbolTable {
    parent: Option<Arc<SymbolTable>>,
    builtin: bool,
    contents: RwLock<Contents>,
}

impl SymbolTable {
    /// A parentless table.
    pub fn new(builtin: bool) -> Arc<SymbolTable> {
        Arc::new(SymbolTable {
            parent: None,
            builtin,
            contents: RwLock::default(),
        })
    }

    /// A nested scope under `parent`.
    pub fn new_child(parent: &Arc<SymbolTable>, builtin: bool) -> Arc<SymbolTable> {
        Arc::new(SymbolTable {
            parent: Some(Arc::clone(parent)),
            builtin,
            contents: RwLock::default(),
        })
    }

    /// A parentless builtin table naming every builtin type.
    pub fn builtin_root(types: &BuiltinTypes) -> Arc<SymbolTable> {
        let root = SymbolTable::new(true);
        for ty in types.iter() {
            root.add_without_ownership(Symbol::Type(Arc::clone(ty)));
        }
        root
    }

    pub fn parent(&self) -> Option<&Arc<SymbolTable>> {
        self.parent.as_ref()
    }

    pub fn is_builtin(&self) -> bool {
        self.builtin
    }

    /// Find `name` here or in the nearest ancestor that has it.
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        let mut table = self;
        loop {
            if let Some(symbol) = table.lookup_local(name) {
                return Some(symbol);
            }
            table = table.parent.as_deref()?;
        }
    }

    /// Find `name` in this table only.
    pub fn lookup_local(&self, name: &str) -> Option<Symbol> {
        self.contents.read().names.get(name).cloned()
    }

    /// Own `value` and bind its name, replacing any binding in this table.
    ///
    /// A function added under a name already bound to a function here joins
    /// it in an overload set, which this table also owns.
    pub fn add<T: SymbolKind>(&self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        let symbol = T::into_symbol(Arc::clone(&value));
        let mut contents = self.contents.write();
        contents.owned.push(symbol.clone());

        let name = symbol.name().to_owned();
        let overloads = match (&symbol, contents.names.get(&name)) {
            (Symbol::Function(decl), Some(Symbol::Function(existing))) => {
                Some(vec![Arc::clone(existing), Arc::clone(decl)])
            }
            (Symbol::Function(decl), Some(Symbol::UnresolvedFunction(existing))) => {
                let mut functions = existing.functions().to_vec();
                functions.push(Arc::clone(decl));
                Some(functions)
            }
            _ => None,
        };
        let bound = match overloads {
            Some(functions) => {
                let set = Symbol::UnresolvedFunction(Arc::new(UnresolvedFunction::new(functions)));
                contents.owned.push(set.clone());
                set
            }
            None => symbol,
        };
        contents.names.insert(name, bound);
        value
    }

    /// Own `value`, binding its name only if this table has no binding for
    /// it yet.
    pub fn take_ownership_of_symbol<T: SymbolKind>(&self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        let symbol = T::into_symbol(Arc::clone(&value));
        let mut contents = self.contents.write();
        contents.owned.push(symbol.clone());
        if !contents.names.contains_key(symbol.name()) {
            contents.names.insert(symbol.name().to_owned(), symbol);
        }
        value
    }

    /// Bind a symbol owned elsewhere, replacing any binding in this table.
    pub fn add_without_ownership(&self, symbol: Symbol) {
        let name = symbol.name().to_owned();
        self.contents.write().names.insert(name, symbol);
    }

    /// Snapshot of the owned symbols in allocation order.
    pub fn owned_symbols(&self) -> Vec<Symbol> {
        self.contents.read().owned.clone()
    }

    pub fn owned_count(&self) -> usize {
        self.contents.read().owned.len()
    }

    /// Whether this table allocated `symbol`.
    pub fn owns(&self, symbol: &Symbol) -> bool {
        self.contents.read().owned.iter().any(|owned| owned.ptr_eq(symbol))
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let contents = self.contents.read();
        let mut names: Vec<&str> = contents.names.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("SymbolTable")
            .field("builtin", &self.builtin)
            .field("has_parent", &self.parent.is_some())
            .field("owned", &contents.owned.len())
            .field("names", &names)
            .finish()
    }
}
