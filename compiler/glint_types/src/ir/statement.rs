//! Statement nodes.

use std::fmt;
use std::sync::Arc;

use super::expression::Expression;
use crate::symbol::{FunctionDeclaration, Variable};
use crate::types::TypeRef;
use crate::SymbolTable;

#[derive(Clone, Debug)]
pub enum Statement {
    Block(Block),
    Break,
    Continue,
    Discard,
    Do {
        body: Box<Statement>,
        test: Expression,
    },
    Expression(Expression),
    For(ForStatement),
    If(IfStatement),
    /// Marks where the body of an inlined call begins.
    InlineMarker(Arc<FunctionDeclaration>),
    Nop,
    Return(Option<Expression>),
    Switch(SwitchStatement),
    VarDeclaration(VarDeclaration),
}

/// A statement list, optionally with its own scope.
#[derive(Clone, Debug)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub symbols: Option<Arc<SymbolTable>>,
    /// False for blocks that only group statements (e.g. the result of
    /// inlining) and do not introduce braces in the output.
    pub is_scope: bool,
}

#[derive(Clone, Debug)]
pub struct ForStatement {
    pub initializer: Option<Box<Statement>>,
    pub test: Option<Expression>,
    pub next: Option<Expression>,
    pub body: Box<Statement>,
    pub symbols: Option<Arc<SymbolTable>>,
}

#[derive(Clone, Debug)]
pub struct IfStatement {
    /// `@if`: resolved at compile time.
    pub is_static: bool,
    pub test: Expression,
    pub if_true: Box<Statement>,
    pub if_false: Option<Box<Statement>>,
}

#[derive(Clone, Debug)]
pub struct SwitchStatement {
    pub is_static: bool,
    pub value: Expression,
    pub cases: Vec<SwitchCase>,
    pub symbols: Option<Arc<SymbolTable>>,
}

#[derive(Clone, Debug)]
pub struct SwitchCase {
    /// `None` for `default:`.
    pub value: Option<Expression>,
    pub statement: Box<Statement>,
}

/// Declaration of one variable, possibly with an initial value.
#[derive(Clone, Debug)]
pub struct VarDeclaration {
    pub variable: Arc<Variable>,
    pub base_type: TypeRef,
    /// Zero when the declaration is not an array.
    pub array_size: i32,
    pub value: Option<Expression>,
}

impl Statement {
    pub fn block(statements: Vec<Statement>, symbols: Option<Arc<SymbolTable>>, is_scope: bool) -> Statement {
        Statement::Block(Block {
            statements,
            symbols,
            is_scope,
        })
    }

    /// # Panics
    ///
    /// Panics if `test` is not boolean.
    pub fn do_loop(body: Statement, test: Expression) -> Statement {
        assert_boolean("do", &test);
        Statement::Do {
            body: Box::new(body),
            test,
        }
    }

    /// # Panics
    ///
    /// Panics if `test` is present and not boolean.
    pub fn for_loop(
        initializer: Option<Statement>,
        test: Option<Expression>,
        next: Option<Expression>,
        body: Statement,
        symbols: Option<Arc<SymbolTable>>,
    ) -> Statement {
        if let Some(test) = &test {
            assert_boolean("for", test);
        }
        Statement::For(ForStatement {
            initializer: initializer.map(Box::new),
            test,
            next,
            body: Box::new(body),
            symbols,
        })
    }

    /// # Panics
    ///
    /// Panics if `test` is not boolean.
    pub fn if_statement(
        is_static: bool,
        test: Expression,
        if_true: Statement,
        if_false: Option<Statement>,
    ) -> Statement {
        assert_boolean("if", &test);
        Statement::If(IfStatement {
            is_static,
            test,
            if_true: Box::new(if_true),
            if_false: if_false.map(Box::new),
        })
    }

    /// # Panics
    ///
    /// Panics if `value` is neither an integer nor an enum.
    pub fn switch(
        is_static: bool,
        value: Expression,
        cases: Vec<SwitchCase>,
        symbols: Option<Arc<SymbolTable>>,
    ) -> Statement {
        assert!(
            value.ty().is_integer() || value.ty().is_enum(),
            "switch on '{}'",
            value.ty().name()
        );
        Statement::Switch(SwitchStatement {
            is_static,
            value,
            cases,
            symbols,
        })
    }

    /// Declare `variable`, attaching `value` as its initial value.
    pub fn var_declaration(
        variable: Arc<Variable>,
        base_type: TypeRef,
        array_size: i32,
        value: Option<Expression>,
    ) -> Statement {
        Statement::VarDeclaration(VarDeclaration::new(variable, base_type, array_size, value))
    }

    /// Whether this is a no-op, or a block holding only no-ops.
    pub fn is_empty(&self) -> bool {
        match self {
            Statement::Nop => true,
            Statement::Block(block) => block.statements.iter().all(Statement::is_empty),
            _ => false,
        }
    }
}

impl VarDeclaration {
    /// The variable's initial value is set from `value`, when present.
    ///
    /// # Panics
    ///
    /// Panics if the variable already has an initial value.
    pub fn new(
        variable: Arc<Variable>,
        base_type: TypeRef,
        array_size: i32,
        value: Option<Expression>,
    ) -> VarDeclaration {
        if let Some(value) = &value {
            variable.set_initial_value(value.clone());
        }
        VarDeclaration {
            variable,
            base_type,
            array_size,
            value,
        }
    }
}

fn assert_boolean(context: &str, test: &Expression) {
    assert!(
        test.ty().is_boolean(),
        "{context} test of type '{}'",
        test.ty().name()
    );
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Block(block) => write!(f, "{block}"),
            Statement::Break => f.write_str("break;"),
            Statement::Continue => f.write_str("continue;"),
            Statement::Discard => f.write_str("discard;"),
            Statement::Do { body, test } => write!(f, "do {body} while ({test});"),
            Statement::Expression(expr) => write!(f, "{expr};"),
            Statement::For(stmt) => {
                f.write_str("for (")?;
                match &stmt.initializer {
                    Some(init) => write!(f, "{init}")?,
                    None => f.write_str(";")?,
                }
                if let Some(test) = &stmt.test {
                    write!(f, " {test}")?;
                }
                f.write_str(";")?;
                if let Some(next) = &stmt.next {
                    write!(f, " {next}")?;
                }
                write!(f, ") {}", stmt.body)
            }
            Statement::If(stmt) => {
                if stmt.is_static {
                    f.write_str("@")?;
                }
                write!(f, "if ({}) {}", stmt.test, stmt.if_true)?;
                if let Some(if_false) = &stmt.if_false {
                    write!(f, " else {if_false}")?;
                }
                Ok(())
            }
            Statement::InlineMarker(function) => write!(f, "/* inlined: {} */", function.name()),
            Statement::Nop => f.write_str(";"),
            Statement::Return(Some(value)) => write!(f, "return {value};"),
            Statement::Return(None) => f.write_str("return;"),
            Statement::Switch(stmt) => {
                if stmt.is_static {
                    f.write_str("@")?;
                }
                writeln!(f, "switch ({}) {{", stmt.value)?;
                for case in &stmt.cases {
                    match &case.value {
                        Some(value) => writeln!(f, "case {value}:")?,
                        None => writeln!(f, "default:")?,
                    }
                    writeln!(f, "{}", case.statement)?;
                }
                f.write_str("}")
            }
            Statement::VarDeclaration(decl) => write!(f, "{decl}"),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_scope {
            f.write_str("{\n")?;
        }
        for statement in &self.statements {
            writeln!(f, "{statement}")?;
        }
        if self.is_scope {
            f.write_str("}")?;
        }
        Ok(())
    }
}

impl fmt::Display for VarDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifiers = self.variable.modifiers().to_string();
        if !modifiers.is_empty() {
            write!(f, "{modifiers} ")?;
        }
        write!(f, "{} {}", self.base_type.display_name(), self.variable.name())?;
        if self.array_size > 0 {
            write!(f, "[{}]", self.array_size)?;
        }
        if let Some(value) = &self.value {
            write!(f, " = {value}")?;
        }
        f.write_str(";")
    }
}
