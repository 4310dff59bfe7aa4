//! Implicit conversion of expressions and literal range checks.
//!
//! These are the only type-model operations that report user-facing
//! errors. Both report through the context's error sink and let the caller
//! keep going.

use std::sync::Arc;

use glint_diagnostic::{type_mismatch, Diagnostic, ErrorCode};

use crate::ir::{Expression, ExpressionKind};
use crate::types::Type;
use crate::Context;

impl Type {
    /// Convert `expr` to this type, wrapping it in a cast if needed.
    ///
    /// Returns `None` after reporting an error when `expr` is a bare
    /// function or type name, or when no implicit conversion exists under
    /// the active narrowing policy.
    #[tracing::instrument(level = "trace", skip_all, fields(target = %self.name()))]
    pub fn coerce_expression(self: &Arc<Self>, expr: Expression, ctx: &Context) -> Option<Expression> {
        let span = expr.span;
        match &expr.kind {
            ExpressionKind::FunctionReference { .. } => {
                ctx.errors
                    .error(span, ErrorCode::E2002, "expected '(' to begin function call");
                return None;
            }
            ExpressionKind::TypeReference { .. } => {
                ctx.errors.error(
                    span,
                    ErrorCode::E2003,
                    "expected '(' to begin constructor invocation",
                );
                return None;
            }
            _ => {}
        }
        if **expr.ty() == **self {
            return Some(expr);
        }

        let allow_narrowing = ctx.settings.allow_narrowing_conversions;
        if !expr.ty().coercion_cost(self).is_possible(allow_narrowing) {
            ctx.errors.report(type_mismatch(
                span,
                self.display_name(),
                expr.ty().display_name(),
            ));
            return None;
        }

        if self.is_scalar() {
            return Some(Expression::scalar_cast(span, Arc::clone(self), expr));
        }
        if self.is_vector() || self.is_matrix() {
            return Some(Expression::compound_cast(span, Arc::clone(self), expr));
        }
        ctx.errors.error(
            span,
            ErrorCode::E2004,
            format!("cannot construct '{}'", self.display_name()),
        );
        None
    }

    /// Report every integer in `expr` that does not fit the scalar type of
    /// the slot it lands in. Returns whether anything was reported.
    ///
    /// Constant operations are folded first, and references to `const`
    /// variables are followed to their initial values. Float and bool slots
    /// are never checked. Each offending slot is reported on its own.
    pub fn check_for_out_of_range_literal(&self, ctx: &Context, expr: &Expression) -> bool {
        let value = expr.constant_value_for_variable();
        let slots = value.ty().slot_count();
        let mut found_error = false;
        for slot in 0..slots {
            let slot_type = self.slot_type(slot);
            let (Some(min), Some(max)) = (slot_type.minimum_value(), slot_type.maximum_value())
            else {
                continue;
            };
            let Some(literal) = value.constant_int_value(slot) else {
                continue;
            };
            if literal < min || literal > max {
                let mut diag = Diagnostic::error(ErrorCode::E2005)
                    .with_message(format!(
                        "integer is out of range for type '{}': {literal}",
                        self.display_name()
                    ))
                    .with_label(expr.span, ErrorCode::E2005.summary());
                if slots > 1 {
                    diag = diag.with_note(format!("in slot {slot}"));
                }
                ctx.errors.report(diag);
                found_error = true;
            }
        }
        found_error
    }
}
