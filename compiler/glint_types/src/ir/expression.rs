//! Expression nodes.

use std::fmt;
use std::sync::Arc;

use glint_ir::{format_float, Operator, Span};
use smallvec::SmallVec;

use crate::context::CapValue;
use crate::symbol::{FunctionDeclaration, Variable};
use crate::types::{TypeKind, TypeRef};
use crate::Context;

/// A typed expression.
#[derive(Clone, Debug)]
pub struct Expression {
    pub span: Span,
    ty: TypeRef,
    pub kind: ExpressionKind,
}

#[derive(Clone, Debug)]
pub enum ExpressionKind {
    Binary {
        left: Box<Expression>,
        op: Operator,
        right: Box<Expression>,
    },
    BoolLiteral(bool),
    IntLiteral(i64),
    FloatLiteral(f64),
    Constructor {
        kind: ConstructorKind,
        args: Vec<Expression>,
    },
    FieldAccess {
        base: Box<Expression>,
        field_index: usize,
        owner_kind: FieldAccessOwnerKind,
    },
    FunctionCall {
        function: Arc<FunctionDeclaration>,
        args: Vec<Expression>,
    },
    /// A function name not (yet) applied to arguments.
    FunctionReference {
        functions: Vec<Arc<FunctionDeclaration>>,
    },
    Index {
        base: Box<Expression>,
        index: Box<Expression>,
    },
    Postfix {
        operand: Box<Expression>,
        op: Operator,
    },
    Prefix {
        op: Operator,
        operand: Box<Expression>,
    },
    /// A capability query (`caps.name`) that was not folded.
    Setting {
        name: String,
    },
    Swizzle {
        base: Box<Expression>,
        components: SmallVec<[SwizzleComponent; 4]>,
    },
    Ternary {
        test: Box<Expression>,
        if_true: Box<Expression>,
        if_false: Box<Expression>,
    },
    /// A type name used as a value.
    TypeReference {
        value: TypeRef,
    },
    VariableReference {
        variable: Arc<Variable>,
        ref_kind: RefKind,
    },
}

/// The flavour of a constructor call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstructorKind {
    Array,
    /// Vector or matrix assembled from smaller pieces.
    Compound,
    /// Vector or matrix converted component-wise to another component type.
    CompoundCast,
    /// Matrix with a scalar on the diagonal and zero elsewhere.
    DiagonalMatrix,
    MatrixResize,
    ScalarCast,
    /// Vector with every component set to one scalar.
    Splat,
    Struct,
}

/// How a field access reaches its owner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FieldAccessOwnerKind {
    Default = 0,
    /// A member of an anonymous interface block, written without a prefix.
    AnonymousInterfaceBlock = 1,
}

impl FieldAccessOwnerKind {
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(FieldAccessOwnerKind::Default),
            1 => Some(FieldAccessOwnerKind::AnonymousInterfaceBlock),
            _ => None,
        }
    }
}

/// How a variable reference uses the variable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RefKind {
    Read = 0,
    Write = 1,
    ReadWrite = 2,
    /// Taken by reference, e.g. an `out` argument.
    Pointer = 3,
}

impl RefKind {
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(RefKind::Read),
            1 => Some(RefKind::Write),
            2 => Some(RefKind::ReadWrite),
            3 => Some(RefKind::Pointer),
            _ => None,
        }
    }
}

/// One lane of a swizzle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SwizzleComponent {
    X = 0,
    Y = 1,
    Z = 2,
    W = 3,
    Zero = 4,
    One = 5,
}

impl SwizzleComponent {
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(SwizzleComponent::X),
            1 => Some(SwizzleComponent::Y),
            2 => Some(SwizzleComponent::Z),
            3 => Some(SwizzleComponent::W),
            4 => Some(SwizzleComponent::Zero),
            5 => Some(SwizzleComponent::One),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            SwizzleComponent::X => 'x',
            SwizzleComponent::Y => 'y',
            SwizzleComponent::Z => 'z',
            SwizzleComponent::W => 'w',
            SwizzleComponent::Zero => '0',
            SwizzleComponent::One => '1',
        }
    }
}

impl Expression {
    pub(crate) fn from_parts(span: Span, ty: TypeRef, kind: ExpressionKind) -> Expression {
        Expression { span, ty, kind }
    }

    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self.kind,
            ExpressionKind::BoolLiteral(_)
                | ExpressionKind::IntLiteral(_)
                | ExpressionKind::FloatLiteral(_)
        )
    }

    pub fn as_int_literal(&self) -> Option<i64> {
        match self.kind {
            ExpressionKind::IntLiteral(value) => Some(value),
            _ => None,
        }
    }

    pub fn bool_literal(ctx: &Context, span: Span, value: bool) -> Expression {
        Expression::from_parts(span, Arc::clone(&ctx.types.bool), ExpressionKind::BoolLiteral(value))
    }

    /// An `int` literal.
    pub fn int_literal(ctx: &Context, span: Span, value: i64) -> Expression {
        Expression::typed_int_literal(span, value, Arc::clone(&ctx.types.int))
    }

    /// # Panics
    ///
    /// Panics if `ty` is not an integer type.
    pub fn typed_int_literal(span: Span, value: i64, ty: TypeRef) -> Expression {
        assert!(ty.is_integer(), "integer literal of non-integer type '{}'", ty.name());
        Expression::from_parts(span, ty, ExpressionKind::IntLiteral(value))
    }

    /// A `float` literal.
    pub fn float_literal(ctx: &Context, span: Span, value: f64) -> Expression {
        Expression::typed_float_literal(span, value, Arc::clone(&ctx.types.float))
    }

    /// # Panics
    ///
    /// Panics if `ty` is not a floating-point type.
    pub fn typed_float_literal(span: Span, value: f64, ty: TypeRef) -> Expression {
        assert!(ty.is_float(), "float literal of non-float type '{}'", ty.name());
        Expression::from_parts(span, ty, ExpressionKind::FloatLiteral(value))
    }

    /// # Panics
    ///
    /// Panics if `base` is not a struct with a member at `field_index`.
    pub fn field_access(
        base: Expression,
        field_index: usize,
        owner_kind: FieldAccessOwnerKind,
    ) -> Expression {
        let ty = match base.ty.fields().get(field_index) {
            Some(field) => Arc::clone(&field.ty),
            None => panic!("'{}' has no field {field_index}", base.ty.name()),
        };
        Expression::from_parts(
            base.span,
            ty,
            ExpressionKind::FieldAccess {
                base: Box::new(base),
                field_index,
                owner_kind,
            },
        )
    }

    /// # Panics
    ///
    /// Panics if the argument count does not match the parameter count.
    pub fn function_call(
        span: Span,
        ty: TypeRef,
        function: Arc<FunctionDeclaration>,
        args: Vec<Expression>,
    ) -> Expression {
        assert_eq!(
            args.len(),
            function.parameters().len(),
            "wrong argument count for '{}'",
            function.name()
        );
        Expression::from_parts(span, ty, ExpressionKind::FunctionCall { function, args })
    }

    pub fn function_reference(
        ctx: &Context,
        span: Span,
        functions: Vec<Arc<FunctionDeclaration>>,
    ) -> Expression {
        Expression::from_parts(
            span,
            Arc::clone(&ctx.types.invalid),
            ExpressionKind::FunctionReference { functions },
        )
    }

    /// Subscript an array, vector or matrix.
    ///
    /// # Panics
    ///
    /// Panics if `base` cannot be indexed or `index` is not an integer.
    pub fn index(ctx: &Context, base: Expression, index: Expression) -> Expression {
        assert!(index.ty.is_integer(), "index of type '{}'", index.ty.name());
        let ty = match base.ty.kind() {
            TypeKind::Array { component, .. } | TypeKind::Vector { component, .. } => {
                Arc::clone(component)
            }
            TypeKind::Matrix {
                component, rows, ..
            } => component.to_compound(ctx.types, *rows, 1),
            _ => panic!("'{}' cannot be indexed", base.ty.name()),
        };
        Expression::from_parts(
            base.span.merge(index.span),
            ty,
            ExpressionKind::Index {
                base: Box::new(base),
                index: Box::new(index),
            },
        )
    }

    /// # Panics
    ///
    /// Panics unless `op` is `++` or `--` on a numeric operand.
    pub fn postfix(operand: Expression, op: Operator) -> Expression {
        assert!(
            matches!(op, Operator::PlusPlus | Operator::MinusMinus),
            "'{op}' is not a postfix operator"
        );
        assert!(operand.ty.component_type().is_number(), "'{op}' on '{}'", operand.ty.name());
        Expression::from_parts(
            operand.span,
            Arc::clone(&operand.ty),
            ExpressionKind::Postfix {
                operand: Box::new(operand),
                op,
            },
        )
    }

    /// # Panics
    ///
    /// Panics if `op` does not apply to the operand's type.
    pub fn prefix(op: Operator, operand: Expression) -> Expression {
        let component = operand.ty.component_type();
        let valid = match op {
            Operator::LogicalNot => operand.ty.is_boolean(),
            Operator::BitwiseNot => component.is_integer(),
            Operator::Plus | Operator::Minus | Operator::PlusPlus | Operator::MinusMinus => {
                component.is_number()
            }
            _ => false,
        };
        assert!(valid, "'{op}' cannot be applied to '{}'", operand.ty.name());
        Expression::from_parts(
            operand.span,
            Arc::clone(&operand.ty),
            ExpressionKind::Prefix {
                op,
                operand: Box::new(operand),
            },
        )
    }

    /// A capability query. Known capabilities fold to a literal.
    pub fn setting(ctx: &Context, span: Span, name: &str) -> Expression {
        match ctx.caps.get(name) {
            Some(CapValue::Bool(value)) => Expression::bool_literal(ctx, span, value),
            Some(CapValue::Int(value)) => Expression::int_literal(ctx, span, i64::from(value)),
            None => Expression::from_parts(
                span,
                Arc::clone(&ctx.types.bool),
                ExpressionKind::Setting {
                    name: name.to_owned(),
                },
            ),
        }
    }

    /// # Panics
    ///
    /// Panics if `base` is not a scalar or vector, or if there are not one
    /// to four components.
    pub fn swizzle(
        ctx: &Context,
        base: Expression,
        components: SmallVec<[SwizzleComponent; 4]>,
    ) -> Expression {
        assert!(
            base.ty.is_scalar() || base.ty.is_vector(),
            "cannot swizzle '{}'",
            base.ty.name()
        );
        assert!((1..=4).contains(&components.len()), "bad swizzle length {}", components.len());
        let ty = base
            .ty
            .component_type()
            .to_compound(ctx.types, components.len() as u8, 1);
        Expression::from_parts(
            base.span,
            ty,
            ExpressionKind::Swizzle {
                base: Box::new(base),
                components,
            },
        )
    }

    /// # Panics
    ///
    /// Panics if the test is not boolean or the arms disagree on type.
    pub fn ternary(test: Expression, if_true: Expression, if_false: Expression) -> Expression {
        assert!(test.ty.is_boolean(), "ternary test of type '{}'", test.ty.name());
        assert!(
            if_true.ty == if_false.ty,
            "ternary arms '{}' and '{}' differ",
            if_true.ty.name(),
            if_false.ty.name()
        );
        Expression::from_parts(
            test.span.merge(if_false.span),
            Arc::clone(&if_true.ty),
            ExpressionKind::Ternary {
                test: Box::new(test),
                if_true: Box::new(if_true),
                if_false: Box::new(if_false),
            },
        )
    }

    pub fn type_reference(ctx: &Context, span: Span, value: TypeRef) -> Expression {
        Expression::from_parts(
            span,
            Arc::clone(&ctx.types.invalid),
            ExpressionKind::TypeReference { value },
        )
    }

    pub fn variable_reference(span: Span, variable: Arc<Variable>, ref_kind: RefKind) -> Expression {
        Expression::from_parts(
            span,
            Arc::clone(variable.ty()),
            ExpressionKind::VariableReference { variable, ref_kind },
        )
    }

    /// Follow references to `const` variables to the value they were
    /// initialised with.
    pub fn constant_value_for_variable(&self) -> &Expression {
        if let ExpressionKind::VariableReference { variable, .. } = &self.kind {
            if variable.modifiers().is_const() {
                if let Some(value) = variable.initial_value() {
                    return value.constant_value_for_variable();
                }
            }
        }
        self
    }

    /// The literal occupying scalar `slot` of this value, when it is known
    /// at compile time.
    ///
    /// Off-diagonal slots of a diagonal matrix are an implicit zero and
    /// have no node, so they report `None`.
    pub fn constant_subexpression(&self, slot: usize) -> Option<&Expression> {
        match &self.kind {
            ExpressionKind::BoolLiteral(_)
            | ExpressionKind::IntLiteral(_)
            | ExpressionKind::FloatLiteral(_) => (slot == 0).then_some(self),
            ExpressionKind::Constructor { .. } => {
                let (arg, slot) = self.constructor_slot(slot)?;
                arg.constant_subexpression(slot)
            }
            ExpressionKind::VariableReference { .. } => {
                self.followed_constant()?.constant_subexpression(slot)
            }
            _ => None,
        }
    }

    /// The integer held in scalar `slot` once constant operations are
    /// folded: literals, `+`/`-`/`~` prefixes, integer arithmetic, integer
    /// casts and `const` variables.
    ///
    /// Returns `None` for anything not known at compile time, for
    /// non-integer slots, and when folding would overflow or divide by
    /// zero.
    pub fn constant_int_value(&self, slot: usize) -> Option<i64> {
        match &self.kind {
            ExpressionKind::IntLiteral(value) => (slot == 0).then_some(*value),
            ExpressionKind::Constructor {
                kind: ConstructorKind::ScalarCast | ConstructorKind::CompoundCast,
                args,
            } => {
                let arg = args.first()?;
                if !self.ty.component_type().is_integer()
                    || !arg.ty.component_type().is_integer()
                {
                    return None;
                }
                arg.constant_int_value(slot)
            }
            ExpressionKind::Constructor { .. } => {
                let (arg, slot) = self.constructor_slot(slot)?;
                arg.constant_int_value(slot)
            }
            ExpressionKind::Prefix { op, operand } => {
                let value = operand.constant_int_value(slot)?;
                match op {
                    Operator::Plus => Some(value),
                    Operator::Minus => value.checked_neg(),
                    Operator::BitwiseNot => Some(!value),
                    _ => None,
                }
            }
            ExpressionKind::Binary { left, op, right } => {
                if !self.ty.component_type().is_integer() || self.ty.is_matrix() {
                    return None;
                }
                // A scalar operand is broadcast across every lane.
                let lane = |side: &Expression| {
                    side.constant_int_value(if side.ty.is_scalar() { 0 } else { slot })
                };
                fold_int(lane(left)?, *op, lane(right)?)
            }
            ExpressionKind::VariableReference { .. } => {
                self.followed_constant()?.constant_int_value(slot)
            }
            _ => None,
        }
    }

    /// The initial value of a referenced `const` variable, if it has one.
    fn followed_constant(&self) -> Option<&Expression> {
        let value = self.constant_value_for_variable();
        (!std::ptr::eq(value, self)).then_some(value)
    }

    /// The argument of a constructor that holds scalar `slot`, and the slot
    /// within that argument.
    fn constructor_slot(&self, slot: usize) -> Option<(&Expression, usize)> {
        let ExpressionKind::Constructor { kind, args } = &self.kind else {
            return None;
        };
        match kind {
            ConstructorKind::Splat => Some((args.first()?, 0)),
            ConstructorKind::DiagonalMatrix => {
                let rows = usize::from(self.ty.rows()).max(1);
                if slot / rows == slot % rows {
                    Some((args.first()?, 0))
                } else {
                    None
                }
            }
            ConstructorKind::Array | ConstructorKind::Compound | ConstructorKind::Struct => {
                let mut slot = slot;
                for arg in args {
                    let count = arg.ty.slot_count();
                    if slot < count {
                        return Some((arg, slot));
                    }
                    slot -= count;
                }
                None
            }
            ConstructorKind::CompoundCast
            | ConstructorKind::MatrixResize
            | ConstructorKind::ScalarCast => None,
        }
    }
}

fn fold_int(left: i64, op: Operator, right: i64) -> Option<i64> {
    match op {
        Operator::Plus => left.checked_add(right),
        Operator::Minus => left.checked_sub(right),
        Operator::Star => left.checked_mul(right),
        Operator::Slash => left.checked_div(right),
        Operator::Percent => left.checked_rem(right),
        Operator::Shl => left.checked_shl(u32::try_from(right).ok()?),
        Operator::Shr => left.checked_shr(u32::try_from(right).ok()?),
        Operator::BitwiseAnd => Some(left & right),
        Operator::BitwiseOr => Some(left | right),
        Operator::BitwiseXor => Some(left ^ right),
        _ => None,
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, args: &[Expression]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{arg}")?;
    }
    Ok(())
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExpressionKind::Binary { left, op, right } => write!(f, "({left} {op} {right})"),
            ExpressionKind::BoolLiteral(value) => write!(f, "{value}"),
            ExpressionKind::IntLiteral(value) => write!(f, "{value}"),
            ExpressionKind::FloatLiteral(value) => f.write_str(&format_float(*value)),
            ExpressionKind::Constructor { args, .. } => {
                write!(f, "{}(", self.ty.display_name())?;
                write_list(f, args)?;
                f.write_str(")")
            }
            ExpressionKind::FieldAccess {
                base,
                field_index,
                owner_kind,
            } => {
                let name = base
                    .ty
                    .fields()
                    .get(*field_index)
                    .map_or("<field>", |field| field.name.as_str());
                match owner_kind {
                    FieldAccessOwnerKind::Default => write!(f, "{base}.{name}"),
                    FieldAccessOwnerKind::AnonymousInterfaceBlock => f.write_str(name),
                }
            }
            ExpressionKind::FunctionCall { function, args } => {
                write!(f, "{}(", function.name())?;
                write_list(f, args)?;
                f.write_str(")")
            }
            ExpressionKind::FunctionReference { functions } => {
                let name = functions.first().map_or("", |decl| decl.name());
                write!(f, "<function> {name}")
            }
            ExpressionKind::Index { base, index } => write!(f, "{base}[{index}]"),
            ExpressionKind::Postfix { operand, op } => write!(f, "{operand}{op}"),
            ExpressionKind::Prefix { op, operand } => write!(f, "{op}{operand}"),
            ExpressionKind::Setting { name } => write!(f, "caps.{name}"),
            ExpressionKind::Swizzle { base, components } => {
                write!(f, "{base}.")?;
                for component in components {
                    write!(f, "{}", component.as_char())?;
                }
                Ok(())
            }
            ExpressionKind::Ternary {
                test,
                if_true,
                if_false,
            } => write!(f, "({test} ? {if_true} : {if_false})"),
            ExpressionKind::TypeReference { value } => f.write_str(value.display_name()),
            ExpressionKind::VariableReference { variable, .. } => f.write_str(variable.name()),
        }
    }
}

#[cfg(test)]
mod tests;
