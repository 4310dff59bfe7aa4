//! Top-level program elements.

use std::fmt;
use std::sync::Arc;

use super::statement::{Statement, VarDeclaration};
use crate::symbol::{FunctionDeclaration, Variable};
use crate::types::TypeRef;
use crate::SymbolTable;

#[derive(Clone, Debug)]
pub enum ProgramElement {
    Enum(EnumDefinition),
    Function(Arc<FunctionDefinition>),
    InterfaceBlock(InterfaceBlock),
    GlobalVar(VarDeclaration),
    StructDefinition(TypeRef),
}

impl ProgramElement {
    /// Wrap a function body and link its declaration back to it.
    ///
    /// # Panics
    ///
    /// Panics if the declaration already has a definition.
    pub fn function(definition: FunctionDefinition) -> ProgramElement {
        let definition = Arc::new(definition);
        definition.declaration.set_definition(&definition);
        ProgramElement::Function(definition)
    }
}

/// An enum and its enumerators. Each enumerator is a `const int` variable
/// owned by `symbols`, declared in `declarations` in source order.
#[derive(Clone, Debug)]
pub struct EnumDefinition {
    pub type_name: String,
    pub symbols: Arc<SymbolTable>,
    pub declarations: Vec<VarDeclaration>,
    pub builtin: bool,
}

impl EnumDefinition {
    /// `(name, value)` for every enumerator.
    pub fn values(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.declarations.iter().filter_map(|decl| {
            let value = decl.value.as_ref()?.as_int_literal()?;
            Some((decl.variable.name(), value))
        })
    }
}

#[derive(Clone, Debug)]
pub struct FunctionDefinition {
    pub declaration: Arc<FunctionDeclaration>,
    pub builtin: bool,
    pub body: Statement,
    /// Functions called from the body, without duplicates.
    pub referenced_functions: Vec<Arc<FunctionDeclaration>>,
}

impl FunctionDefinition {
    pub fn new(
        declaration: Arc<FunctionDeclaration>,
        builtin: bool,
        body: Statement,
        referenced: impl IntoIterator<Item = Arc<FunctionDeclaration>>,
    ) -> Self {
        let mut referenced_functions: Vec<Arc<FunctionDeclaration>> = Vec::new();
        for function in referenced {
            if !referenced_functions.iter().any(|seen| Arc::ptr_eq(seen, &function)) {
                referenced_functions.push(function);
            }
        }
        FunctionDefinition {
            declaration,
            builtin,
            body,
            referenced_functions,
        }
    }
}

/// A uniform or I/O block, named by `type_name` and optionally by an
/// instance name.
#[derive(Clone, Debug)]
pub struct InterfaceBlock {
    pub variable: Arc<Variable>,
    pub type_name: String,
    /// Empty for an anonymous block, whose members are visible unqualified.
    pub instance_name: String,
    pub array_size: i32,
    pub symbols: Option<Arc<SymbolTable>>,
}

impl fmt::Display for ProgramElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramElement::Enum(def) => {
                writeln!(f, "enum class {} {{", def.type_name)?;
                for (name, value) in def.values() {
                    writeln!(f, "    {name} = {value},")?;
                }
                f.write_str("};")
            }
            ProgramElement::Function(def) => write!(f, "{} {}", def.declaration, def.body),
            ProgramElement::InterfaceBlock(block) => {
                let modifiers = block.variable.modifiers().to_string();
                if !modifiers.is_empty() {
                    write!(f, "{modifiers} ")?;
                }
                writeln!(f, "{} {{", block.type_name)?;
                for field in block.variable.ty().component_type().fields() {
                    writeln!(f, "    {} {};", field.ty.display_name(), field.name)?;
                }
                f.write_str("}")?;
                if !block.instance_name.is_empty() {
                    write!(f, " {}", block.instance_name)?;
                    if block.array_size > 0 {
                        write!(f, "[{}]", block.array_size)?;
                    }
                }
                f.write_str(";")
            }
            ProgramElement::GlobalVar(decl) => write!(f, "{decl}"),
            ProgramElement::StructDefinition(ty) => {
                writeln!(f, "struct {} {{", ty.name())?;
                for field in ty.fields() {
                    f.write_str("    ")?;
                    let modifiers = field.modifiers.to_string();
                    if !modifiers.is_empty() {
                        write!(f, "{modifiers} ")?;
                    }
                    writeln!(f, "{} {};", field.ty.display_name(), field.name)?;
                }
                f.write_str("};")
            }
        }
    }
}

#[cfg(test)]
mod tests;
