//! Expressions.

use glint_ir::Span;
use glint_types::ir::{ConstructorKind, Expression, FieldAccessOwnerKind, RefKind, SwizzleComponent};
use smallvec::SmallVec;

use super::{ensure_sufficient_stack, Rehydrator};
use crate::command::Command;

impl Rehydrator<'_> {
    /// Decode one expression, or `None` for a void marker.
    ///
    /// # Panics
    ///
    /// Panics on a non-expression tag, a missing operand, or operands whose
    /// types do not fit the node.
    pub fn expression(&mut self) -> Option<Expression> {
        ensure_sufficient_stack(|| self.expression_inner())
    }

    /// Decode an expression that must be present.
    pub(super) fn required_expression(&mut self, context: &str) -> Expression {
        match self.expression() {
            Some(expression) => expression,
            None => panic!("{context} is missing"),
        }
    }

    /// A `u8` count followed by that many expressions.
    pub(super) fn expression_array(&mut self) -> Vec<Expression> {
        let count = self.reader.read_u8();
        (0..count)
            .map(|_| self.required_expression("argument"))
            .collect()
    }

    fn constructor(&mut self, kind: ConstructorKind) -> Expression {
        let ty = self.type_();
        let args = self.expression_array();
        Expression::constructor(Span::NONE, kind, ty, args)
    }

    fn expression_inner(&mut self) -> Option<Expression> {
        let expression = match self.command() {
            Command::Binary => {
                let left = self.required_expression("left operand");
                let op = self.operator();
                let right = self.required_expression("right operand");
                Expression::binary(self.ctx, left, op, right)
            }
            Command::BoolLiteral => {
                let value = self.reader.read_bool();
                Expression::bool_literal(self.ctx, Span::NONE, value)
            }
            Command::ConstructorArray => self.constructor(ConstructorKind::Array),
            Command::ConstructorCompound => self.constructor(ConstructorKind::Compound),
            Command::ConstructorCompoundCast => self.constructor(ConstructorKind::CompoundCast),
            Command::ConstructorDiagonalMatrix => self.constructor(ConstructorKind::DiagonalMatrix),
            Command::ConstructorMatrixResize => self.constructor(ConstructorKind::MatrixResize),
            Command::ConstructorScalarCast => self.constructor(ConstructorKind::ScalarCast),
            Command::ConstructorSplat => self.constructor(ConstructorKind::Splat),
            Command::ConstructorStruct => self.constructor(ConstructorKind::Struct),
            Command::FieldAccess => {
                let base = self.required_expression("field owner");
                let index = usize::from(self.reader.read_u8());
                let raw_owner = self.reader.read_u8();
                let Some(owner_kind) = FieldAccessOwnerKind::from_u8(raw_owner) else {
                    panic!("unknown field owner kind {raw_owner}");
                };
                Expression::field_access(base, index, owner_kind)
            }
            Command::FloatLiteral => {
                let ty = self.type_();
                let bits = self.reader.read_s32() as u32;
                Expression::typed_float_literal(Span::NONE, f64::from(f32::from_bits(bits)), ty)
            }
            Command::FunctionCall => {
                let ty = self.type_();
                let function = self.function();
                let args = self.expression_array();
                Expression::function_call(Span::NONE, ty, function, args)
            }
            Command::Index => {
                let base = self.required_expression("indexed value");
                let index = self.required_expression("index");
                Expression::index(self.ctx, base, index)
            }
            Command::IntLiteral => {
                let ty = self.type_();
                let value = self.reader.read_s32();
                Expression::typed_int_literal(Span::NONE, i64::from(value), ty)
            }
            Command::Postfix => {
                let op = self.operator();
                let operand = self.required_expression("postfix operand");
                Expression::postfix(operand, op)
            }
            Command::Prefix => {
                let op = self.operator();
                let operand = self.required_expression("prefix operand");
                Expression::prefix(op, operand)
            }
            Command::Setting => {
                let name = self.reader.read_string();
                Expression::setting(self.ctx, Span::NONE, name)
            }
            Command::Swizzle => {
                let base = self.required_expression("swizzled value");
                let count = self.reader.read_u8();
                let components: SmallVec<[SwizzleComponent; 4]> = (0..count)
                    .map(|_| {
                        let raw = self.reader.read_u8();
                        match SwizzleComponent::from_u8(raw) {
                            Some(component) => component,
                            None => panic!("unknown swizzle component {raw}"),
                        }
                    })
                    .collect();
                Expression::swizzle(self.ctx, base, components)
            }
            Command::Ternary => {
                let test = self.required_expression("ternary test");
                let if_true = self.required_expression("ternary true arm");
                let if_false = self.required_expression("ternary false arm");
                Expression::ternary(test, if_true, if_false)
            }
            Command::VariableReference => {
                let variable = self.variable();
                let raw_kind = self.reader.read_u8();
                let Some(ref_kind) = RefKind::from_u8(raw_kind) else {
                    panic!("unknown reference kind {raw_kind}");
                };
                Expression::variable_reference(Span::NONE, variable, ref_kind)
            }
            Command::Void => return None,
            other => panic!("expected an expression, found {other}"),
        };
        Some(expression)
    }
}
