//! Constructor factories.
//!
//! Casts of compile-time literals fold into literals of the target type, so
//! later constant queries see the converted value directly.

use std::sync::Arc;

use glint_ir::Span;

use super::expression::{ConstructorKind, Expression, ExpressionKind};
use crate::types::{TypeKind, TypeRef};

impl Expression {
    /// Build a constructor of the given flavour.
    ///
    /// # Panics
    ///
    /// Panics if `args` does not fit `ty` for that flavour.
    pub fn constructor(
        span: Span,
        kind: ConstructorKind,
        ty: TypeRef,
        args: Vec<Expression>,
    ) -> Expression {
        match kind {
            ConstructorKind::Array => Expression::construct_array(span, ty, args),
            ConstructorKind::Compound => Expression::construct_compound(span, ty, args),
            ConstructorKind::Struct => Expression::construct_struct(span, ty, args),
            single => {
                let arg = single_argument(single, args);
                match single {
                    ConstructorKind::CompoundCast => Expression::compound_cast(span, ty, arg),
                    ConstructorKind::DiagonalMatrix => Expression::diagonal_matrix(span, ty, arg),
                    ConstructorKind::MatrixResize => Expression::matrix_resize(span, ty, arg),
                    ConstructorKind::ScalarCast => Expression::scalar_cast(span, ty, arg),
                    _ => Expression::splat(span, ty, arg),
                }
            }
        }
    }

    pub fn construct_array(span: Span, ty: TypeRef, args: Vec<Expression>) -> Expression {
        let size = ty.array_size();
        assert!(size.is_some(), "array constructor for '{}'", ty.name());
        if let Some(count) = size.and_then(|size| size.count()) {
            assert_eq!(args.len(), count as usize, "wrong element count for '{}'", ty.name());
        }
        debug_assert!(args.iter().all(|arg| **arg.ty() == *ty.component_type()));
        constructed(span, ty, ConstructorKind::Array, args)
    }

    /// Assemble a vector or matrix from arguments whose slots add up to the
    /// target's.
    pub fn construct_compound(span: Span, ty: TypeRef, args: Vec<Expression>) -> Expression {
        assert!(
            ty.is_vector() || ty.is_matrix(),
            "compound constructor for '{}'",
            ty.name()
        );
        let mut args = args;
        if args.len() == 1 && **args[0].ty() == *ty {
            return args.swap_remove(0);
        }
        let slots: usize = args.iter().map(|arg| arg.ty().slot_count()).sum();
        assert_eq!(slots, ty.slot_count(), "wrong slot count for '{}'", ty.name());
        constructed(span, ty, ConstructorKind::Compound, args)
    }

    pub fn construct_struct(span: Span, ty: TypeRef, args: Vec<Expression>) -> Expression {
        assert!(ty.is_struct(), "struct constructor for '{}'", ty.name());
        assert_eq!(args.len(), ty.fields().len(), "wrong field count for '{}'", ty.name());
        constructed(span, ty, ConstructorKind::Struct, args)
    }

    /// Convert a vector or matrix component-wise.
    pub fn compound_cast(span: Span, ty: TypeRef, arg: Expression) -> Expression {
        assert!(
            (ty.is_vector() || ty.is_matrix())
                && arg.ty().columns() == ty.columns()
                && arg.ty().rows() == ty.rows(),
            "cannot cast '{}' to '{}'",
            arg.ty().name(),
            ty.name()
        );
        if **arg.ty() == *ty {
            return arg;
        }
        // A splatted literal casts by casting the scalar.
        if let ExpressionKind::Constructor {
            kind: ConstructorKind::Splat,
            args,
        } = &arg.kind
        {
            if let Some(folded) = args.first().and_then(|scalar| {
                cast_literal(scalar, &component_ref(&ty, scalar.ty()))
            }) {
                return constructed(span, ty, ConstructorKind::Splat, vec![folded]);
            }
        }
        constructed(span, ty, ConstructorKind::CompoundCast, vec![arg])
    }

    /// A matrix with `arg` along the diagonal.
    pub fn diagonal_matrix(span: Span, ty: TypeRef, arg: Expression) -> Expression {
        assert!(
            ty.is_matrix() && arg.ty().is_scalar(),
            "cannot build '{}' from '{}'",
            ty.name(),
            arg.ty().name()
        );
        constructed(span, ty, ConstructorKind::DiagonalMatrix, vec![arg])
    }

    pub fn matrix_resize(span: Span, ty: TypeRef, arg: Expression) -> Expression {
        assert!(
            ty.is_matrix() && arg.ty().is_matrix(),
            "cannot resize '{}' to '{}'",
            arg.ty().name(),
            ty.name()
        );
        if **arg.ty() == *ty {
            return arg;
        }
        constructed(span, ty, ConstructorKind::MatrixResize, vec![arg])
    }

    /// Convert a scalar. A literal argument folds to a literal of `ty`.
    pub fn scalar_cast(span: Span, ty: TypeRef, arg: Expression) -> Expression {
        assert!(
            ty.is_scalar() && arg.ty().is_scalar(),
            "cannot cast '{}' to '{}'",
            arg.ty().name(),
            ty.name()
        );
        if **arg.ty() == *ty {
            return arg;
        }
        if let Some(mut folded) = cast_literal(&arg, &ty) {
            folded.span = span;
            return folded;
        }
        constructed(span, ty, ConstructorKind::ScalarCast, vec![arg])
    }

    /// A vector with every component set to `arg`. A scalar target is just
    /// the argument itself.
    pub fn splat(span: Span, ty: TypeRef, arg: Expression) -> Expression {
        assert!(arg.ty().is_scalar(), "cannot splat '{}'", arg.ty().name());
        if ty.is_scalar() {
            return arg;
        }
        assert!(ty.is_vector(), "cannot splat into '{}'", ty.name());
        constructed(span, ty, ConstructorKind::Splat, vec![arg])
    }
}

fn constructed(span: Span, ty: TypeRef, kind: ConstructorKind, args: Vec<Expression>) -> Expression {
    Expression::from_parts(span, ty, ExpressionKind::Constructor { kind, args })
}

fn single_argument(kind: ConstructorKind, args: Vec<Expression>) -> Expression {
    let count = args.len();
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(arg), None) => arg,
        _ => panic!("{kind:?} constructor takes one argument, got {count}"),
    }
}

/// The component type of `compound` as a shared handle.
fn component_ref(compound: &TypeRef, fallback: &TypeRef) -> TypeRef {
    match compound.kind() {
        TypeKind::Vector { component, .. } | TypeKind::Matrix { component, .. } => {
            Arc::clone(component)
        }
        _ => Arc::clone(fallback),
    }
}

/// Convert a literal to a literal of scalar type `ty`, or `None` if `arg`
/// is not a literal.
#[allow(clippy::cast_precision_loss, reason = "shader literals are at most 32 bits wide")]
fn cast_literal(arg: &Expression, ty: &TypeRef) -> Option<Expression> {
    let value = match arg.kind {
        ExpressionKind::BoolLiteral(value) => f64::from(u8::from(value)),
        ExpressionKind::IntLiteral(value) => value as f64,
        ExpressionKind::FloatLiteral(value) => value,
        _ => return None,
    };
    let kind = if ty.is_boolean() {
        ExpressionKind::BoolLiteral(value != 0.0)
    } else if ty.is_integer() {
        match arg.kind {
            ExpressionKind::IntLiteral(value) => ExpressionKind::IntLiteral(value),
            _ => ExpressionKind::IntLiteral(value as i64),
        }
    } else if ty.is_float() {
        ExpressionKind::FloatLiteral(value)
    } else {
        return None;
    };
    Some(Expression::from_parts(arg.span, Arc::clone(ty), kind))
}
