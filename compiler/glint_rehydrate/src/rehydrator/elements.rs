//! Top-level program elements.

use std::sync::Arc;

use glint_ir::Span;
use glint_types::ir::{
    EnumDefinition, Expression, FunctionDefinition, InterfaceBlock, ProgramElement, Statement,
    VarDeclaration,
};
use glint_types::Symbol;

use super::Rehydrator;
use crate::command::Command;

impl Rehydrator<'_> {
    /// Decode an element list up to its terminator.
    ///
    /// # Panics
    ///
    /// Panics if the list does not open with an elements marker.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn elements(&mut self) -> Vec<ProgramElement> {
        match self.command() {
            Command::Elements => {}
            other => panic!("expected an element list, found {other}"),
        }
        let mut elements = Vec::new();
        while let Some(element) = self.element() {
            elements.push(element);
        }
        tracing::debug!(count = elements.len(), "decoded elements");
        elements
    }

    /// Decode one element, or `None` at the end of the list.
    ///
    /// # Panics
    ///
    /// Panics on a non-element tag or a malformed element.
    pub fn element(&mut self) -> Option<ProgramElement> {
        let element = match self.command() {
            Command::Enum => {
                let type_name = self.reader.read_string().to_owned();
                let Some(symbols) = self.symbol_table(false) else {
                    panic!("enum '{type_name}' has no enumerators table");
                };
                let mut declarations = Vec::with_capacity(symbols.owned_count());
                for symbol in symbols.owned_symbols() {
                    let variable = match symbol {
                        Symbol::Variable(variable) => variable,
                        other => panic!(
                            "enum '{type_name}' owns {} '{}'",
                            other.kind_name(),
                            other.name()
                        ),
                    };
                    let value = self.reader.read_s32();
                    let literal = Expression::int_literal(self.ctx, Span::NONE, i64::from(value));
                    let ty = Arc::clone(variable.ty());
                    declarations.push(VarDeclaration::new(variable, ty, 0, Some(literal)));
                }
                ProgramElement::Enum(EnumDefinition {
                    type_name,
                    symbols,
                    declarations,
                    builtin: true,
                })
            }
            Command::FunctionDefinition => {
                let declaration = self.function();
                let body = self.required_statement("function body");
                let referenced_count = self.reader.read_u8();
                let referenced: Vec<_> = (0..referenced_count).map(|_| self.function()).collect();
                let definition = FunctionDefinition::new(declaration, true, body, referenced);
                ProgramElement::function(definition)
            }
            Command::InterfaceBlock => {
                let variable = self.variable();
                let type_name = self.reader.read_string().to_owned();
                let instance_name = self.reader.read_string().to_owned();
                let array_size = i32::from(self.reader.read_s8());
                ProgramElement::InterfaceBlock(InterfaceBlock {
                    variable,
                    type_name,
                    instance_name,
                    array_size,
                    symbols: None,
                })
            }
            Command::VarDeclarations => match self.statement() {
                Some(Statement::VarDeclaration(decl)) => ProgramElement::GlobalVar(decl),
                Some(other) => panic!("global declaration holds '{other}'"),
                None => panic!("global declaration is empty"),
            },
            Command::StructDefinition => ProgramElement::StructDefinition(self.type_()),
            Command::ElementsComplete => return None,
            other => panic!("expected a program element, found {other}"),
        };
        Some(element)
    }
}
