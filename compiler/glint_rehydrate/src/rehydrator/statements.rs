//! Statements.

use glint_types::ir::{Statement, SwitchCase};

use super::{ensure_sufficient_stack, Rehydrator};
use crate::command::Command;

impl Rehydrator<'_> {
    /// Decode one statement, or `None` for a void marker.
    ///
    /// # Panics
    ///
    /// Panics on a non-statement tag, a missing mandatory child, or children
    /// whose types do not fit the statement.
    pub fn statement(&mut self) -> Option<Statement> {
        ensure_sufficient_stack(|| self.statement_inner())
    }

    /// Decode a statement that must be present.
    pub(super) fn required_statement(&mut self, context: &str) -> Statement {
        match self.statement() {
            Some(statement) => statement,
            None => panic!("{context} is missing"),
        }
    }

    fn statement_inner(&mut self) -> Option<Statement> {
        let statement = match self.command() {
            Command::Block => {
                let (symbols, mut scope) = self.push_symbol_table();
                let count = scope.reader.read_u8();
                let statements = (0..count)
                    .map(|_| scope.required_statement("block entry"))
                    .collect();
                let is_scope = scope.reader.read_bool();
                Statement::block(statements, symbols, is_scope)
            }
            Command::Break => Statement::Break,
            Command::Continue => Statement::Continue,
            Command::Discard => Statement::Discard,
            Command::Do => {
                let body = self.required_statement("do body");
                let test = self.required_expression("do test");
                Statement::do_loop(body, test)
            }
            Command::ExpressionStatement => {
                Statement::Expression(self.required_expression("expression statement"))
            }
            Command::For => {
                let initializer = self.statement();
                let test = self.expression();
                let next = self.expression();
                let body = self.required_statement("for body");
                let symbols = self.symbol_table(true);
                Statement::for_loop(initializer, test, next, body, symbols)
            }
            Command::If => {
                let is_static = self.reader.read_bool();
                let test = self.required_expression("if test");
                let if_true = self.required_statement("if branch");
                let if_false = self.statement();
                Statement::if_statement(is_static, test, if_true, if_false)
            }
            Command::InlineMarker => Statement::InlineMarker(self.function()),
            Command::Return => Statement::Return(self.expression()),
            Command::Switch => {
                let is_static = self.reader.read_bool();
                let (symbols, mut scope) = self.push_symbol_table();
                let value = scope.required_expression("switch value");
                let case_count = scope.reader.read_u8();
                let mut cases = Vec::with_capacity(usize::from(case_count));
                for _ in 0..case_count {
                    let value = scope.expression();
                    let statement = scope.required_statement("switch case");
                    cases.push(SwitchCase {
                        value,
                        statement: Box::new(statement),
                    });
                }
                Statement::switch(is_static, value, cases, symbols)
            }
            Command::VarDeclaration => {
                let variable = self.variable();
                let base_type = self.type_();
                let array_size = i32::from(self.reader.read_s8());
                let value = self.expression();
                Statement::var_declaration(variable, base_type, array_size, value)
            }
            Command::Void => return None,
            other => panic!("expected a statement, found {other}"),
        };
        Some(statement)
    }
}

