//! Parse tree produced by the front-end parser, before type checking.
//!
//! The parser itself lives outside this workspace; this module only defines
//! the tree shape and, in debug builds, a textual rendering used when
//! diagnosing parser output. The rendering is not a stable or re-parseable
//! format.

use crate::{Modifiers, Operator, Span};

/// A parse tree node.
#[derive(Clone, Debug, PartialEq)]
pub struct AstNode {
    pub span: Span,
    pub kind: AstKind,
}

/// Parse tree node kinds.
///
/// Optional children use `Option`; the `Null` kind stands in for an empty
/// slot where the grammar requires a node position (e.g. a `for` with no
/// test).
#[derive(Clone, Debug, PartialEq)]
pub enum AstKind {
    Null,
    Binary {
        left: Box<AstNode>,
        op: Operator,
        right: Box<AstNode>,
    },
    Block(Vec<AstNode>),
    Bool(bool),
    Break,
    Call {
        callee: Box<AstNode>,
        args: Vec<AstNode>,
    },
    Continue,
    Discard,
    Do {
        body: Box<AstNode>,
        test: Box<AstNode>,
    },
    Enum {
        name: String,
        cases: Vec<AstNode>,
    },
    EnumCase {
        name: String,
        value: Option<Box<AstNode>>,
    },
    Extension(String),
    Field {
        base: Box<AstNode>,
        name: String,
    },
    File(Vec<AstNode>),
    Float(f64),
    For {
        initializer: Box<AstNode>,
        test: Box<AstNode>,
        next: Box<AstNode>,
        body: Box<AstNode>,
    },
    Function {
        modifiers: Modifiers,
        return_type: Box<AstNode>,
        name: String,
        parameters: Vec<AstNode>,
        /// `None` for a prototype.
        body: Option<Box<AstNode>>,
    },
    Identifier(String),
    Index {
        base: Box<AstNode>,
        index: Box<AstNode>,
    },
    If {
        is_static: bool,
        test: Box<AstNode>,
        if_true: Box<AstNode>,
        if_false: Option<Box<AstNode>>,
    },
    Int(i64),
    InterfaceBlock {
        modifiers: Modifiers,
        type_name: String,
        declarations: Vec<AstNode>,
        instance_name: String,
        array_size: Option<Box<AstNode>>,
    },
    Modifiers(Modifiers),
    Parameter {
        ty: Box<AstNode>,
        name: String,
        array_size: Option<Box<AstNode>>,
        default_value: Option<Box<AstNode>>,
    },
    Postfix {
        operand: Box<AstNode>,
        op: Operator,
    },
    Prefix {
        op: Operator,
        operand: Box<AstNode>,
    },
    Return(Option<Box<AstNode>>),
    Scope {
        base: Box<AstNode>,
        name: String,
    },
    Section,
    SwitchCase {
        /// `None` for `default:`.
        value: Option<Box<AstNode>>,
        statements: Vec<AstNode>,
    },
    Switch {
        is_static: bool,
        value: Box<AstNode>,
        cases: Vec<AstNode>,
    },
    Ternary {
        test: Box<AstNode>,
        if_true: Box<AstNode>,
        if_false: Box<AstNode>,
    },
    Type(String),
    VarDeclaration {
        name: String,
        array_size: Option<Box<AstNode>>,
        value: Option<Box<AstNode>>,
    },
    VarDeclarations {
        modifiers: Box<AstNode>,
        ty: Box<AstNode>,
        declarations: Vec<AstNode>,
    },
    While {
        test: Box<AstNode>,
        body: Box<AstNode>,
    },
}

impl AstNode {
    pub fn new(span: Span, kind: AstKind) -> Self {
        AstNode { span, kind }
    }

    /// Node without a source position, for synthesized trees.
    pub fn synthetic(kind: AstKind) -> Self {
        AstNode {
            span: Span::NONE,
            kind,
        }
    }

    /// Boxed synthetic node, the common shape for child slots.
    pub fn boxed(kind: AstKind) -> Box<Self> {
        Box::new(Self::synthetic(kind))
    }
}

#[cfg(debug_assertions)]
impl AstNode {
    /// Debug rendering of the subtree rooted at this node.
    pub fn description(&self) -> String {
        match &self.kind {
            AstKind::Null => String::new(),
            AstKind::Binary { left, op, right } => format!(
                "({} {} {})",
                left.description(),
                op.as_symbol(),
                right.description()
            ),
            AstKind::Block(statements) => {
                let mut result = String::from("{\n");
                for statement in statements {
                    result += &statement.description();
                    result.push('\n');
                }
                result.push('}');
                result
            }
            AstKind::Bool(value) => value.to_string(),
            AstKind::Break => "break".to_owned(),
            AstKind::Call { callee, args } => {
                let args: Vec<String> = args.iter().map(AstNode::description).collect();
                format!("{}({})", callee.description(), args.join(","))
            }
            AstKind::Continue => "continue".to_owned(),
            AstKind::Discard => "discard".to_owned(),
            AstKind::Do { body, test } => {
                format!("do {} while ({})", body.description(), test.description())
            }
            AstKind::Enum { name, cases } => {
                let mut result = format!("enum {name} {{\n");
                for case in cases {
                    result += &case.description();
                    result.push('\n');
                }
                result += "};";
                result
            }
            AstKind::EnumCase { name, value } => match value {
                Some(value) => format!("{name} = {}", value.description()),
                None => name.clone(),
            },
            AstKind::Extension(name) => format!("#extension {name}"),
            AstKind::Field { base, name } => format!("{}.{name}", base.description()),
            AstKind::File(elements) => {
                let mut result = String::new();
                for element in elements {
                    result += &element.description();
                    result.push('\n');
                }
                result
            }
            AstKind::Float(value) => crate::format_float(*value),
            AstKind::For {
                initializer,
                test,
                next,
                body,
            } => format!(
                "for ({}; {}; {}) {}",
                initializer.description(),
                test.description(),
                next.description(),
                body.description()
            ),
            AstKind::Function {
                modifiers,
                return_type,
                name,
                parameters,
                body,
            } => {
                let mut result = modifiers.to_string();
                if !result.is_empty() {
                    result.push(' ');
                }
                let parameters: Vec<String> =
                    parameters.iter().map(AstNode::description).collect();
                result += &format!(
                    "{} {name}({})",
                    return_type.description(),
                    parameters.join(", ")
                );
                match body {
                    Some(body) => {
                        result.push(' ');
                        result += &body.description();
                    }
                    None => result.push(';'),
                }
                result
            }
            AstKind::Identifier(name) | AstKind::Type(name) => name.clone(),
            AstKind::Index { base, index } => {
                format!("{}[{}]", base.description(), index.description())
            }
            AstKind::If {
                is_static,
                test,
                if_true,
                if_false,
            } => {
                let mut result = if *is_static {
                    String::from("@")
                } else {
                    String::new()
                };
                result += &format!("if ({}) {}", test.description(), if_true.description());
                if let Some(if_false) = if_false {
                    result += &format!(" else {}", if_false.description());
                }
                result
            }
            AstKind::Int(value) => value.to_string(),
            AstKind::InterfaceBlock {
                modifiers,
                type_name,
                declarations,
                instance_name,
                array_size,
            } => {
                let mut result = format!("{modifiers} {type_name} {{\n");
                for declaration in declarations {
                    result += &declaration.description();
                    result.push('\n');
                }
                result += "} ";
                result += instance_name;
                if let Some(size) = array_size {
                    result += &format!("[{}]", size.description());
                }
                result.push(';');
                result
            }
            AstKind::Modifiers(modifiers) => modifiers.to_string(),
            AstKind::Parameter {
                ty,
                name,
                array_size,
                default_value,
            } => {
                let mut result = format!("{} {name}", ty.description());
                if let Some(size) = array_size {
                    result += &format!("[{}]", size.description());
                }
                if let Some(value) = default_value {
                    result += &format!(" = {}", value.description());
                }
                result
            }
            AstKind::Postfix { operand, op } => {
                format!("{}{}", operand.description(), op.as_symbol())
            }
            AstKind::Prefix { op, operand } => {
                format!("{}{}", op.as_symbol(), operand.description())
            }
            AstKind::Return(value) => match value {
                Some(value) => format!("return {};", value.description()),
                None => "return;".to_owned(),
            },
            AstKind::Scope { base, name } => format!("{}::{name}", base.description()),
            AstKind::Section => "@section { ... }".to_owned(),
            AstKind::SwitchCase { value, statements } => {
                let mut result = match value {
                    Some(value) => format!("case {}:\n", value.description()),
                    None => "default:\n".to_owned(),
                };
                for statement in statements {
                    result.push('\n');
                    result += &statement.description();
                }
                result
            }
            AstKind::Switch {
                is_static,
                value,
                cases,
            } => {
                let mut result = if *is_static {
                    String::from("@")
                } else {
                    String::new()
                };
                result += &format!("switch ({}) {{", value.description());
                for case in cases {
                    result += &case.description();
                    result.push('\n');
                }
                result.push('}');
                result
            }
            AstKind::Ternary {
                test,
                if_true,
                if_false,
            } => format!(
                "({} ? {} : {})",
                test.description(),
                if_true.description(),
                if_false.description()
            ),
            AstKind::VarDeclaration {
                name,
                array_size,
                value,
            } => {
                let mut result = name.clone();
                if let Some(size) = array_size {
                    result += &format!("[{}]", size.description());
                }
                if let Some(value) = value {
                    result += &format!(" = {}", value.description());
                }
                result
            }
            AstKind::VarDeclarations {
                modifiers,
                ty,
                declarations,
            } => {
                let mut result = modifiers.description();
                if !result.is_empty() {
                    result.push(' ');
                }
                result += &ty.description();
                let mut separator = " ";
                for declaration in declarations {
                    result += separator;
                    result += &declaration.description();
                    separator = ", ";
                }
                result
            }
            AstKind::While { test, body } => {
                format!("while ({}) {}", test.description(), body.description())
            }
        }
    }
}
