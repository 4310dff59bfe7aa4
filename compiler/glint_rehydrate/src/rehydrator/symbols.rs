//! Symbols and symbol tables.

use std::sync::Arc;

use glint_ir::Span;
use glint_types::{
    ArraySize, Field, FunctionDeclaration, StructField, Symbol, SymbolAlias, SymbolTable, Type,
    UnresolvedFunction, Variable, VariableStorage,
};

use super::Rehydrator;
use crate::command::Command;

impl Rehydrator<'_> {
    /// Decode one symbol. Every symbol carrying an id is registered under
    /// it before this returns; new symbols are owned by the active table.
    ///
    /// # Panics
    ///
    /// Panics on a non-symbol tag, a reference to an undecoded id, or a
    /// nested symbol of the wrong kind.
    pub fn symbol(&mut self) -> Symbol {
        match self.command() {
            Command::ArrayType => {
                let id = self.reader.read_u16();
                let component = self.type_();
                let size = ArraySize::from_raw(i32::from(self.reader.read_s8()));
                let name = Type::array_name(&component, size);
                let array = self
                    .symbol_table
                    .take_ownership_of_symbol(Type::make_array(name, &component, size));
                self.register(id, Symbol::Type(array))
            }
            Command::EnumType => {
                let id = self.reader.read_u16();
                let name = self.reader.read_string();
                let ty = self.symbol_table.take_ownership_of_symbol(Type::make_enum(name));
                self.register(id, Symbol::Type(ty))
            }
            Command::FunctionDeclaration => {
                let id = self.reader.read_u16();
                let modifiers = self.modifiers();
                let name = self.reader.read_string();
                let parameter_count = self.reader.read_u8();
                let parameters: Vec<Arc<Variable>> =
                    (0..parameter_count).map(|_| self.variable()).collect();
                let return_type = self.type_();
                let decl = self.symbol_table.take_ownership_of_symbol(FunctionDeclaration::new(
                    Span::NONE,
                    modifiers,
                    name,
                    parameters,
                    return_type,
                    true,
                ));
                self.register(id, Symbol::Function(decl))
            }
            Command::Field => {
                let owner = self.variable();
                let index = usize::from(self.reader.read_u8());
                let field = self
                    .symbol_table
                    .take_ownership_of_symbol(Field::new(Span::NONE, owner, index));
                Symbol::Field(field)
            }
            Command::StructType => {
                let id = self.reader.read_u16();
                let name = self.reader.read_string();
                let field_count = self.reader.read_u8();
                let mut fields = Vec::with_capacity(usize::from(field_count));
                for _ in 0..field_count {
                    let modifiers = self.modifiers();
                    let field_name = self.reader.read_string();
                    let ty = self.type_();
                    fields.push(StructField::new(modifiers, field_name, ty));
                }
                let ty = self
                    .symbol_table
                    .take_ownership_of_symbol(Type::make_struct(Span::NONE, name, fields));
                self.register(id, Symbol::Type(ty))
            }
            Command::SymbolRef => {
                let id = self.reader.read_u16();
                self.registered(id)
            }
            Command::SymbolAlias => {
                let id = self.reader.read_u16();
                let name = self.reader.read_string();
                let original = self.symbol();
                let alias = self
                    .symbol_table
                    .take_ownership_of_symbol(SymbolAlias::new(Span::NONE, name, original));
                self.register(id, Symbol::Alias(alias))
            }
            Command::SystemType => {
                let id = self.reader.read_u16();
                let name = self.reader.read_string();
                let ty = match self.symbol_table.lookup(name) {
                    Some(Symbol::Type(ty)) => ty,
                    Some(other) => panic!("system type '{name}' is bound to a {}", other.kind_name()),
                    None => panic!("system type '{name}' is not visible"),
                };
                self.register(id, Symbol::Type(ty))
            }
            Command::UnresolvedFunction => {
                let id = self.reader.read_u16();
                let count = self.reader.read_u8();
                let functions: Vec<Arc<FunctionDeclaration>> =
                    (0..count).map(|_| self.function()).collect();
                let set = self
                    .symbol_table
                    .take_ownership_of_symbol(UnresolvedFunction::new(functions));
                self.register(id, Symbol::UnresolvedFunction(set))
            }
            Command::Variable => {
                let id = self.reader.read_u16();
                let modifiers = self.modifiers();
                let name = self.reader.read_string();
                let ty = self.type_();
                let raw_storage = self.reader.read_u8();
                let Some(storage) = VariableStorage::from_u8(raw_storage) else {
                    panic!("unknown variable storage {raw_storage}");
                };
                let variable = self.symbol_table.take_ownership_of_symbol(Variable::new(
                    Span::NONE,
                    modifiers,
                    name,
                    ty,
                    true,
                    storage,
                ));
                self.register(id, Symbol::Variable(variable))
            }
            other => panic!("expected a symbol, found {other}"),
        }
    }

    fn register(&mut self, id: u16, symbol: Symbol) -> Symbol {
        self.add_symbol(id, symbol.clone());
        symbol
    }

    /// Decode a nested scope.
    ///
    /// The new table is builtin. With `inherit` it is a child of the active
    /// table; otherwise it stands alone. It is active while its owned
    /// symbols are decoded, and then each entry of the reference list (an
    /// index into those symbols) is bound by name without ownership.
    ///
    /// Returns `None` for a void marker.
    ///
    /// # Panics
    ///
    /// Panics on an unexpected tag or a reference index past the owned
    /// symbols.
    #[tracing::instrument(level = "debug", skip_all, fields(inherit = inherit))]
    pub fn symbol_table(&mut self, inherit: bool) -> Option<Arc<SymbolTable>> {
        match self.command() {
            Command::Void => return None,
            Command::SymbolTable => {}
            other => panic!("expected a symbol table, found {other}"),
        }
        let owned_count = self.reader.read_u16();
        let table = if inherit {
            SymbolTable::new_child(&self.symbol_table, true)
        } else {
            SymbolTable::new(true)
        };

        let mut scope = self.with_active_table(Arc::clone(&table));
        let owned: Vec<Symbol> = (0..owned_count).map(|_| scope.symbol()).collect();
        let reference_count = scope.reader.read_u16();
        for _ in 0..reference_count {
            let index = usize::from(scope.reader.read_u16());
            let Some(symbol) = owned.get(index) else {
                panic!(
                    "symbol table reference {index} is past its {} owned symbols",
                    owned.len()
                );
            };
            table.add_without_ownership(symbol.clone());
        }
        tracing::debug!(owned = owned.len(), references = reference_count, "decoded symbol table");
        Some(table)
    }
}
