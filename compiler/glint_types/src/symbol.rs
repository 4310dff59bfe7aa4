//! Named entities that live in symbol tables.
//!
//! Every symbol is reference-counted. The table that allocated a symbol
//! keeps it in its owned list; any other table (or IR node) that mentions
//! it holds a plain clone of the `Arc`, which never transfers ownership.

use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use glint_ir::{Modifiers, Span};

use crate::ir::{Expression, FunctionDefinition};
use crate::types::{Type, TypeRef};
use crate::CoercionCost;

/// Any named entity.
#[derive(Clone, Debug)]
pub enum Symbol {
    Type(TypeRef),
    Variable(Arc<Variable>),
    Function(Arc<FunctionDeclaration>),
    UnresolvedFunction(Arc<UnresolvedFunction>),
    Field(Arc<Field>),
    Alias(Arc<SymbolAlias>),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Type(ty) => ty.name(),
            Symbol::Variable(var) => var.name(),
            Symbol::Function(decl) => decl.name(),
            Symbol::UnresolvedFunction(set) => set.name(),
            Symbol::Field(field) => field.name(),
            Symbol::Alias(alias) => alias.name(),
        }
    }

    /// Short noun for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Symbol::Type(_) => "type",
            Symbol::Variable(_) => "variable",
            Symbol::Function(_) => "function",
            Symbol::UnresolvedFunction(_) => "overload set",
            Symbol::Field(_) => "field",
            Symbol::Alias(_) => "alias",
        }
    }

    /// Whether both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Symbol) -> bool {
        match (self, other) {
            (Symbol::Type(a), Symbol::Type(b)) => Arc::ptr_eq(a, b),
            (Symbol::Variable(a), Symbol::Variable(b)) => Arc::ptr_eq(a, b),
            (Symbol::Function(a), Symbol::Function(b)) => Arc::ptr_eq(a, b),
            (Symbol::UnresolvedFunction(a), Symbol::UnresolvedFunction(b)) => Arc::ptr_eq(a, b),
            (Symbol::Field(a), Symbol::Field(b)) => Arc::ptr_eq(a, b),
            (Symbol::Alias(a), Symbol::Alias(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn as_type(&self) -> Option<&TypeRef> {
        match self {
            Symbol::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&Arc<Variable>> {
        match self {
            Symbol::Variable(var) => Some(var),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Arc<FunctionDeclaration>> {
        match self {
            Symbol::Function(decl) => Some(decl),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Function(decl) => write!(f, "{decl}"),
            Symbol::Variable(var) => write!(f, "{} {}", var.ty().name(), var.name()),
            other => f.write_str(other.name()),
        }
    }
}

/// Implemented by every concrete symbol type, so tables can own any of them
/// through one generic entry point.
pub trait SymbolKind: Sized {
    fn into_symbol(this: Arc<Self>) -> Symbol;
}

impl SymbolKind for Type {
    fn into_symbol(this: Arc<Self>) -> Symbol {
        Symbol::Type(this)
    }
}

impl SymbolKind for Variable {
    fn into_symbol(this: Arc<Self>) -> Symbol {
        Symbol::Variable(this)
    }
}

impl SymbolKind for FunctionDeclaration {
    fn into_symbol(this: Arc<Self>) -> Symbol {
        Symbol::Function(this)
    }
}

impl SymbolKind for UnresolvedFunction {
    fn into_symbol(this: Arc<Self>) -> Symbol {
        Symbol::UnresolvedFunction(this)
    }
}

impl SymbolKind for Field {
    fn into_symbol(this: Arc<Self>) -> Symbol {
        Symbol::Field(this)
    }
}

impl SymbolKind for SymbolAlias {
    fn into_symbol(this: Arc<Self>) -> Symbol {
        Symbol::Alias(this)
    }
}

/// Where a variable's storage lives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VariableStorage {
    Global = 0,
    InterfaceBlock = 1,
    Local = 2,
    Parameter = 3,
}

impl VariableStorage {
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(VariableStorage::Global),
            1 => Some(VariableStorage::InterfaceBlock),
            2 => Some(VariableStorage::Local),
            3 => Some(VariableStorage::Parameter),
            _ => None,
        }
    }
}

/// A named storage location.
///
/// The initial value is attached after construction, once the declaration
/// that introduces the variable has been built, and never changes after that.
#[derive(Debug)]
pub struct Variable {
    span: Span,
    modifiers: Modifiers,
    name: String,
    ty: TypeRef,
    builtin: bool,
    storage: VariableStorage,
    initial_value: OnceLock<Expression>,
}

impl Variable {
    pub fn new(
        span: Span,
        modifiers: Modifiers,
        name: impl Into<String>,
        ty: TypeRef,
        builtin: bool,
        storage: VariableStorage,
    ) -> Self {
        Variable {
            span,
            modifiers,
            name: name.into(),
            ty,
            builtin,
            storage,
            initial_value: OnceLock::new(),
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    pub fn is_builtin(&self) -> bool {
        self.builtin
    }

    pub fn storage(&self) -> VariableStorage {
        self.storage
    }

    pub fn initial_value(&self) -> Option<&Expression> {
        self.initial_value.get()
    }

    /// # Panics
    ///
    /// Panics if an initial value was already attached.
    pub fn set_initial_value(&self, value: Expression) {
        let attached = self.initial_value.set(value).is_ok();
        assert!(attached, "variable '{}' already has an initial value", self.name);
    }
}

/// A function signature.
#[derive(Debug)]
pub struct FunctionDeclaration {
    span: Span,
    modifiers: Modifiers,
    name: String,
    parameters: Vec<Arc<Variable>>,
    return_type: TypeRef,
    builtin: bool,
    definition: OnceLock<Weak<FunctionDefinition>>,
}

impl FunctionDeclaration {
    pub fn new(
        span: Span,
        modifiers: Modifiers,
        name: impl Into<String>,
        parameters: Vec<Arc<Variable>>,
        return_type: TypeRef,
        builtin: bool,
    ) -> Self {
        FunctionDeclaration {
            span,
            modifiers,
            name: name.into(),
            parameters,
            return_type,
            builtin,
            definition: OnceLock::new(),
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Arc<Variable>] {
        &self.parameters
    }

    pub fn return_type(&self) -> &TypeRef {
        &self.return_type
    }

    pub fn is_builtin(&self) -> bool {
        self.builtin
    }

    /// The body attached to this signature, while its program element is
    /// still alive.
    pub fn definition(&self) -> Option<Arc<FunctionDefinition>> {
        self.definition.get().and_then(Weak::upgrade)
    }

    /// # Panics
    ///
    /// Panics if a definition was already attached.
    pub fn set_definition(&self, definition: &Arc<FunctionDefinition>) {
        let attached = self.definition.set(Arc::downgrade(definition)).is_ok();
        assert!(attached, "function '{}' is already defined", self.name);
    }

    /// Total cost of calling this function with arguments of the given types.
    ///
    /// A generic parameter accepts an argument at the cheapest cost of any
    /// member of its coercible list.
    pub fn call_cost(&self, arg_types: &[&Type]) -> CoercionCost {
        if arg_types.len() != self.parameters.len() {
            return CoercionCost::Impossible;
        }
        arg_types
            .iter()
            .zip(&self.parameters)
            .map(|(arg, param)| {
                let param_type = param.ty();
                if param_type.is_generic() {
                    param_type
                        .coercible_types()
                        .iter()
                        .map(|candidate| arg.coercion_cost(candidate))
                        .min()
                        .unwrap_or(CoercionCost::Impossible)
                } else {
                    arg.coercion_cost(param_type)
                }
            })
            .sum()
    }
}

impl fmt::Display for FunctionDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifiers = self.modifiers.to_string();
        if !modifiers.is_empty() {
            write!(f, "{modifiers} ")?;
        }
        write!(f, "{} {}(", self.return_type.display_name(), self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", param.ty().display_name(), param.name())?;
        }
        f.write_str(")")
    }
}

/// An overload set: every function visible under one name.
#[derive(Debug)]
pub struct UnresolvedFunction {
    functions: Vec<Arc<FunctionDeclaration>>,
}

impl UnresolvedFunction {
    /// # Panics
    ///
    /// Panics if `functions` is empty.
    pub fn new(functions: Vec<Arc<FunctionDeclaration>>) -> Self {
        assert!(!functions.is_empty(), "an overload set needs at least one function");
        UnresolvedFunction { functions }
    }

    pub fn name(&self) -> &str {
        self.functions.first().map_or("", |decl| decl.name())
    }

    pub fn functions(&self) -> &[Arc<FunctionDeclaration>] {
        &self.functions
    }

    /// The overload with the lowest total coercion cost for `arg_types`.
    /// Earlier overloads win ties.
    pub fn best_match(
        &self,
        arg_types: &[&Type],
        allow_narrowing: bool,
    ) -> Option<&Arc<FunctionDeclaration>> {
        self.functions
            .iter()
            .map(|decl| (decl.call_cost(arg_types), decl))
            .filter(|(cost, _)| cost.is_possible(allow_narrowing))
            .min_by_key(|(cost, _)| *cost)
            .map(|(_, decl)| decl)
    }
}

/// A member of an anonymous interface block, visible as a bare name.
#[derive(Debug)]
pub struct Field {
    span: Span,
    owner: Arc<Variable>,
    field_index: usize,
}

impl Field {
    /// # Panics
    ///
    /// Panics if `owner` is not a struct-typed variable with a member at
    /// `field_index`.
    pub fn new(span: Span, owner: Arc<Variable>, field_index: usize) -> Self {
        let member_count = owner.ty().fields().len();
        assert!(
            field_index < member_count,
            "field index {field_index} out of range for '{}' ({member_count} members)",
            owner.ty().name()
        );
        Field {
            span,
            owner,
            field_index,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn owner(&self) -> &Arc<Variable> {
        &self.owner
    }

    pub fn field_index(&self) -> usize {
        self.field_index
    }

    pub fn name(&self) -> &str {
        &self.owner.ty().fields()[self.field_index].name
    }

    pub fn ty(&self) -> &TypeRef {
        &self.owner.ty().fields()[self.field_index].ty
    }
}

/// A second name for an existing symbol.
#[derive(Debug)]
pub struct SymbolAlias {
    span: Span,
    name: String,
    original: Symbol,
}

impl SymbolAlias {
    pub fn new(span: Span, name: impl Into<String>, original: Symbol) -> Self {
        SymbolAlias {
            span,
            name: name.into(),
            original,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn original(&self) -> &Symbol {
        &self.original
    }
}
