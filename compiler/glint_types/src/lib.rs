//! Glint type model.
//!
//! This crate owns the semantic side of the front-end:
//! - [`Type`] descriptors and the shared [`BuiltinTypes`] set
//! - [`CoercionCost`] ranking for implicit conversions and overloads
//! - [`Symbol`]s and chained [`SymbolTable`] scopes
//! - the typed IR ([`ir`]) whose factories compute result types
//! - [`Context`], the per-compilation bundle of settings and error sink
//!
//! # Error regimes
//!
//! User mistakes found while coercing or range-checking are reported through
//! [`Context::errors`] and the operation returns `None`/`false`. Everything
//! else (unsupported compound shapes, cloning a type that cannot be cloned,
//! ill-typed factory input) is an internal invariant violation and panics.

mod builtins;
mod coerce;
mod coercion;
mod context;
pub mod ir;
mod symbol;
mod symbol_table;
mod types;

pub use builtins::BuiltinTypes;
pub use coercion::CoercionCost;
pub use context::{CapValue, Capabilities, Context, ProgramSettings};
pub use symbol::{
    Field, FunctionDeclaration, Symbol, SymbolAlias, SymbolKind, UnresolvedFunction, Variable,
    VariableStorage,
};
pub use symbol_table::SymbolTable;
pub use types::{ArraySize, NumberKind, StructField, Type, TypeClass, TypeKind, TypeRef};
