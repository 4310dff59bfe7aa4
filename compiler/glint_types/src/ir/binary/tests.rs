use super::*;
use crate::ProgramSettings;
use pretty_assertions::assert_eq;

fn ty(ctx: &Context, name: &str) -> TypeRef {
    Arc::clone(ctx.types.lookup(name).unwrap_or(&ctx.types.invalid))
}

fn result(ctx: &Context, left: &str, op: Operator, right: &str) -> Option<String> {
    binary_result_type(ctx, &ty(ctx, left), op, &ty(ctx, right)).map(|t| t.name().to_owned())
}

fn some(name: &str) -> Option<String> {
    Some(name.to_owned())
}

#[test]
fn comparisons_and_logic_produce_bool() {
    let ctx = Context::default();
    assert_eq!(result(&ctx, "float", Operator::Lt, "$floatLiteral"), some("bool"));
    assert_eq!(result(&ctx, "int", Operator::GtEq, "int"), some("bool"));
    assert_eq!(result(&ctx, "half4", Operator::EqEq, "half4"), some("bool"));
    assert_eq!(result(&ctx, "bool", Operator::LogicalAnd, "bool"), some("bool"));
    assert_eq!(result(&ctx, "int", Operator::LogicalOr, "bool"), None);
    assert_eq!(result(&ctx, "float2", Operator::Lt, "float2"), None);
}

#[test]
fn literals_adopt_the_other_side() {
    let ctx = Context::default();
    assert_eq!(result(&ctx, "half", Operator::Plus, "$floatLiteral"), some("half"));
    assert_eq!(result(&ctx, "$intLiteral", Operator::Star, "uint"), some("uint"));
    assert_eq!(result(&ctx, "short", Operator::Minus, "$intLiteral"), some("short"));
    assert_eq!(result(&ctx, "$intLiteral", Operator::Plus, "$floatLiteral"), some("$floatLiteral"));
}

#[test]
fn mixed_scalars_widen() {
    let ctx = Context::default();
    assert_eq!(result(&ctx, "half", Operator::Plus, "float"), some("float"));
    assert_eq!(result(&ctx, "float", Operator::Slash, "half"), some("float"));
    assert_eq!(result(&ctx, "int", Operator::Plus, "float"), None);
}

#[test]
fn scalars_broadcast_over_vectors_and_matrices() {
    let ctx = Context::default();
    assert_eq!(result(&ctx, "float3", Operator::Star, "$floatLiteral"), some("float3"));
    assert_eq!(result(&ctx, "$intLiteral", Operator::Minus, "int4"), some("int4"));
    assert_eq!(result(&ctx, "float2x2", Operator::Star, "float"), some("float2x2"));
    assert_eq!(result(&ctx, "half2", Operator::Plus, "float"), None);
}

#[test]
fn narrowing_broadcast_follows_policy() {
    let lenient = Context::new(ProgramSettings {
        allow_narrowing_conversions: true,
    });
    assert_eq!(result(&lenient, "half2", Operator::Plus, "float"), some("half2"));
}

#[test]
fn matrix_products_follow_shapes() {
    let ctx = Context::default();
    // (3 columns x 2 rows) * (4 columns x 3 rows) = 4 columns x 2 rows
    assert_eq!(result(&ctx, "float3x2", Operator::Star, "float4x3"), some("float4x2"));
    assert_eq!(result(&ctx, "float3x2", Operator::Star, "float3"), some("float2"));
    assert_eq!(result(&ctx, "float2", Operator::Star, "float3x2"), some("float3"));
    assert_eq!(result(&ctx, "half2x2", Operator::Star, "float2x2"), some("float2x2"));
    assert_eq!(result(&ctx, "float3x2", Operator::Star, "float3x2"), None);
    assert_eq!(result(&ctx, "float3x2", Operator::Plus, "float3x2"), some("float3x2"));
}

#[test]
fn vectors_need_matching_widths() {
    let ctx = Context::default();
    assert_eq!(result(&ctx, "half3", Operator::Plus, "float3"), some("float3"));
    assert_eq!(result(&ctx, "float3", Operator::Plus, "float4"), None);
}

#[test]
fn bitwise_operators_need_integers() {
    let ctx = Context::default();
    assert_eq!(result(&ctx, "int", Operator::BitwiseAnd, "$intLiteral"), some("int"));
    assert_eq!(result(&ctx, "uint2", Operator::Shl, "$intLiteral"), some("uint2"));
    assert_eq!(result(&ctx, "float", Operator::Percent, "float"), None);
}

#[test]
fn assignment_and_comma() {
    let ctx = Context::default();
    assert_eq!(result(&ctx, "half", Operator::Eq, "$floatLiteral"), some("half"));
    assert_eq!(result(&ctx, "float", Operator::PlusEq, "half"), some("float"));
    assert_eq!(result(&ctx, "half", Operator::PlusEq, "float"), None);
    assert_eq!(result(&ctx, "int", Operator::Comma, "float2"), some("float2"));
}

#[test]
fn binary_node_display_and_type() {
    let ctx = Context::default();
    let x = Expression::float_literal(&ctx, glint_ir::Span::at(0), 1.0);
    let y = Expression::int_literal(&ctx, glint_ir::Span::at(6), 2);
    let sum = Expression::binary(
        &ctx,
        x,
        Operator::Plus,
        Expression::scalar_cast(glint_ir::Span::at(6), Arc::clone(&ctx.types.float), y),
    );
    assert_eq!(sum.ty().name(), "float");
    assert_eq!(sum.to_string(), "(1.0 + 2.0)");
    assert_eq!(sum.span, glint_ir::Span::new(0, 6));
}

#[test]
#[should_panic(expected = "type mismatch")]
fn ill_typed_binary_panics() {
    let ctx = Context::default();
    let x = Expression::int_literal(&ctx, glint_ir::Span::NONE, 1);
    let b = Expression::bool_literal(&ctx, glint_ir::Span::NONE, true);
    let _ = Expression::binary(&ctx, x, Operator::Plus, b);
}
