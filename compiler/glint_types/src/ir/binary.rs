//! Result typing for binary operators.

use std::sync::Arc;

use glint_ir::Operator;

use super::expression::{Expression, ExpressionKind};
use crate::types::{Type, TypeRef};
use crate::Context;

/// The type of `left op right`, or `None` if the operands do not type-check.
///
/// - comparisons and logical operators produce `bool`
/// - assignments produce the left type
/// - `,` produces the right type
/// - matrix and vector products follow their shapes
/// - a scalar combined with a vector or matrix is broadcast
/// - between two scalars (or two same-shaped compounds) the cheaper
///   direction of coercion wins, so a literal adopts the other side's type
pub fn binary_result_type(
    ctx: &Context,
    left: &TypeRef,
    op: Operator,
    right: &TypeRef,
) -> Option<TypeRef> {
    let types = ctx.types;
    let allow_narrowing = ctx.settings.allow_narrowing_conversions;
    let coerces = |from: &Type, to: &Type| from.coercion_cost(to).is_possible(allow_narrowing);

    match op {
        Operator::Comma => return Some(Arc::clone(right)),
        Operator::Eq => return coerces(right, left).then(|| Arc::clone(left)),
        _ if op.is_assignment() => {
            let result = binary_result_type(ctx, left, op.remove_assignment(), right)?;
            return coerces(&result, left).then(|| Arc::clone(left));
        }
        _ if op.is_logical() => {
            let both = coerces(left, &types.bool) && coerces(right, &types.bool);
            return both.then(|| Arc::clone(&types.bool));
        }
        _ if op.is_equality() => {
            let comparable = coerces(left, right) || coerces(right, left);
            return comparable.then(|| Arc::clone(&types.bool));
        }
        _ if op.is_relational() => {
            let comparable = left.is_number()
                && right.is_number()
                && (coerces(left, right) || coerces(right, left));
            return comparable.then(|| Arc::clone(&types.bool));
        }
        Operator::Plus | Operator::Minus | Operator::Star | Operator::Slash => {}
        _ if op.is_bitwise() => {}
        _ => return None,
    }

    let integer_only = op.is_bitwise();
    let operand_ok = |ty: &Type| {
        let component = ty.component_type();
        if integer_only {
            component.is_integer()
        } else {
            component.is_number()
        }
    };
    let shaped = |ty: &Type| ty.is_scalar() || ty.is_vector() || ty.is_matrix();
    if !shaped(left) || !shaped(right) || !operand_ok(left) || !operand_ok(right) {
        return None;
    }

    if op == Operator::Star && (left.is_matrix() || right.is_matrix()) {
        if let Some(result) = product_type(ctx, left, right) {
            return result;
        }
    }

    match (left.is_scalar(), right.is_scalar()) {
        (true, false) => coerces(left, right.component_type()).then(|| Arc::clone(right)),
        (false, true) => coerces(right, left.component_type()).then(|| Arc::clone(left)),
        _ => {
            if left.columns() != right.columns() || left.rows() != right.rows() {
                return None;
            }
            cheaper_side(left, right, allow_narrowing).map(|side| match side {
                Side::Left => Arc::clone(left),
                Side::Right => Arc::clone(right),
            })
        }
    }
}

/// Linear-algebra products. Returns `None` when the pair is not a product
/// of a matrix with a vector or matrix, and `Some(None)` when it is but the
/// shapes do not line up.
fn product_type(ctx: &Context, left: &TypeRef, right: &TypeRef) -> Option<Option<TypeRef>> {
    let (columns, rows, inner_matches) = if left.is_matrix() && right.is_matrix() {
        (right.columns(), left.rows(), left.columns() == right.rows())
    } else if left.is_matrix() && right.is_vector() {
        (left.rows(), 1, left.columns() == right.columns())
    } else if left.is_vector() && right.is_matrix() {
        (right.columns(), 1, left.columns() == right.rows())
    } else {
        return None;
    };
    if !inner_matches {
        return Some(None);
    }
    let allow_narrowing = ctx.settings.allow_narrowing_conversions;
    let (left, right) = (left.component_type(), right.component_type());
    let component = cheaper_side(left, right, allow_narrowing).map(|side| match side {
        Side::Left => left,
        Side::Right => right,
    });
    Some(component.map(|component| component.to_compound(ctx.types, columns, rows)))
}

#[derive(Copy, Clone)]
enum Side {
    Left,
    Right,
}

/// Whichever of the two types the other converts into more cheaply.
/// The left side wins ties.
fn cheaper_side(left: &Type, right: &Type, allow_narrowing: bool) -> Option<Side> {
    let to_left = right.coercion_cost(left);
    let to_right = left.coercion_cost(right);
    match (
        to_left.is_possible(allow_narrowing),
        to_right.is_possible(allow_narrowing),
    ) {
        (true, true) if to_right < to_left => Some(Side::Right),
        (true, _) => Some(Side::Left),
        (false, true) => Some(Side::Right),
        (false, false) => None,
    }
}

impl Expression {
    /// # Panics
    ///
    /// Panics if the operands do not type-check for `op`.
    pub fn binary(ctx: &Context, left: Expression, op: Operator, right: Expression) -> Expression {
        let ty = binary_result_type(ctx, left.ty(), op, right.ty()).unwrap_or_else(|| {
            panic!(
                "type mismatch: '{}' {op} '{}'",
                left.ty().display_name(),
                right.ty().display_name()
            )
        });
        Expression::from_parts(
            left.span.merge(right.span),
            ty,
            ExpressionKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
        )
    }
}

#[cfg(test)]
mod tests;
