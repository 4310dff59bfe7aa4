//! Typed IR.
//!
//! Every expression carries its resolved type. Factories compute that type
//! from their operands and panic on combinations that cannot type-check;
//! callers hand them trusted, already-checked input (the rehydrator, or a
//! front-end after reporting user errors).

mod binary;
mod constructor;
mod element;
mod expression;
mod statement;

pub use binary::binary_result_type;
pub use element::{EnumDefinition, FunctionDefinition, InterfaceBlock, ProgramElement};
pub use expression::{
    ConstructorKind, Expression, ExpressionKind, FieldAccessOwnerKind, RefKind, SwizzleComponent,
};
pub use statement::{
    Block, ForStatement, IfStatement, Statement, SwitchCase, SwitchStatement, VarDeclaration,
};
