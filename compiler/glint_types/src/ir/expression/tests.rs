use super::*;
use crate::{Capabilities, StructField, Type, VariableStorage};
use glint_ir::{ModifierFlags, Modifiers};
use pretty_assertions::assert_eq;
use smallvec::smallvec;

fn builtin(ctx: &Context, name: &str) -> TypeRef {
    Arc::clone(ctx.types.lookup(name).unwrap_or(&ctx.types.invalid))
}

fn var(ctx: &Context, name: &str, ty: &str, flags: ModifierFlags) -> Arc<Variable> {
    Arc::new(Variable::new(
        Span::NONE,
        Modifiers::new(glint_ir::Layout::default(), flags),
        name,
        builtin(ctx, ty),
        false,
        VariableStorage::Local,
    ))
}

fn read(variable: &Arc<Variable>) -> Expression {
    Expression::variable_reference(Span::NONE, Arc::clone(variable), RefKind::Read)
}

#[test]
fn literal_types() {
    let ctx = Context::default();
    assert_eq!(Expression::bool_literal(&ctx, Span::NONE, true).ty().name(), "bool");
    assert_eq!(Expression::int_literal(&ctx, Span::NONE, 1).ty().name(), "int");
    assert_eq!(Expression::float_literal(&ctx, Span::NONE, 1.5).ty().name(), "float");
    let half = Expression::typed_float_literal(Span::NONE, 0.5, builtin(&ctx, "half"));
    assert_eq!(half.ty().name(), "half");
    assert!(half.is_literal());
}

#[test]
#[should_panic(expected = "non-integer type")]
fn int_literal_of_float_type_panics() {
    let ctx = Context::default();
    let _ = Expression::typed_int_literal(Span::NONE, 1, builtin(&ctx, "float"));
}

#[test]
fn known_settings_fold_to_literals() {
    let caps = Capabilities::new()
        .with("mustDoOpBetweenFloorAndAbs", CapValue::Bool(true))
        .with("maxFragmentSamplers", CapValue::Int(16));
    let ctx = Context::default().with_caps(caps);

    let folded = Expression::setting(&ctx, Span::NONE, "mustDoOpBetweenFloorAndAbs");
    assert!(matches!(folded.kind, ExpressionKind::BoolLiteral(true)));
    let folded = Expression::setting(&ctx, Span::NONE, "maxFragmentSamplers");
    assert_eq!(folded.as_int_literal(), Some(16));

    let unknown = Expression::setting(&ctx, Span::NONE, "somethingElse");
    assert!(matches!(unknown.kind, ExpressionKind::Setting { .. }));
    assert_eq!(unknown.to_string(), "caps.somethingElse");
}

#[test]
fn swizzle_type_follows_component_count() {
    let ctx = Context::default();
    let color = var(&ctx, "color", "half4", ModifierFlags::empty());
    let swizzled = Expression::swizzle(
        &ctx,
        read(&color),
        smallvec![SwizzleComponent::Z, SwizzleComponent::Y, SwizzleComponent::X],
    );
    assert_eq!(swizzled.ty().name(), "half3");
    assert_eq!(swizzled.to_string(), "color.zyx");

    let single = Expression::swizzle(&ctx, read(&color), smallvec![SwizzleComponent::W]);
    assert!(Arc::ptr_eq(single.ty(), &ctx.types.half));

    let padded = Expression::swizzle(
        &ctx,
        read(&color),
        smallvec![SwizzleComponent::X, SwizzleComponent::Zero, SwizzleComponent::One],
    );
    assert_eq!(padded.to_string(), "color.x01");
}

#[test]
fn index_types() {
    let ctx = Context::default();
    let zero = || Expression::int_literal(&ctx, Span::NONE, 0);

    let v = var(&ctx, "v", "float3", ModifierFlags::empty());
    assert_eq!(Expression::index(&ctx, read(&v), zero()).ty().name(), "float");

    let m = var(&ctx, "m", "half3x2", ModifierFlags::empty());
    assert_eq!(Expression::index(&ctx, read(&m), zero()).ty().name(), "half2");

    let array = Arc::new(Type::make_array("int[4]", &ctx.types.int, crate::ArraySize::Sized(4)));
    let a = Arc::new(Variable::new(
        Span::NONE,
        Modifiers::default(),
        "a",
        array,
        false,
        VariableStorage::Global,
    ));
    let indexed = Expression::index(&ctx, read(&a), zero());
    assert_eq!(indexed.ty().name(), "int");
    assert_eq!(indexed.to_string(), "a[0]");
}

#[test]
#[should_panic(expected = "cannot be indexed")]
fn indexing_a_scalar_panics() {
    let ctx = Context::default();
    let x = var(&ctx, "x", "float", ModifierFlags::empty());
    let _ = Expression::index(&ctx, read(&x), Expression::int_literal(&ctx, Span::NONE, 0));
}

#[test]
fn field_access_reads_member_type() {
    let ctx = Context::default();
    let pixel = Arc::new(Type::make_struct(
        Span::NONE,
        "Pixel",
        vec![
            StructField::new(Modifiers::default(), "rgba", builtin(&ctx, "half4")),
            StructField::new(Modifiers::default(), "coord", builtin(&ctx, "float2")),
        ],
    ));
    let p = Arc::new(Variable::new(
        Span::NONE,
        Modifiers::default(),
        "p",
        pixel,
        false,
        VariableStorage::Parameter,
    ));
    let coord = Expression::field_access(read(&p), 1, FieldAccessOwnerKind::Default);
    assert_eq!(coord.ty().name(), "float2");
    assert_eq!(coord.to_string(), "p.coord");

    let bare = Expression::field_access(read(&p), 0, FieldAccessOwnerKind::AnonymousInterfaceBlock);
    assert_eq!(bare.to_string(), "rgba");
}

#[test]
fn prefix_and_postfix() {
    let ctx = Context::default();
    let i = var(&ctx, "i", "int", ModifierFlags::empty());
    let b = var(&ctx, "b", "bool", ModifierFlags::empty());

    let negated = Expression::prefix(Operator::Minus, read(&i));
    assert_eq!(negated.to_string(), "-i");
    assert_eq!(negated.ty().name(), "int");

    let not = Expression::prefix(Operator::LogicalNot, read(&b));
    assert_eq!(not.ty().name(), "bool");

    let incremented = Expression::postfix(read(&i), Operator::PlusPlus);
    assert_eq!(incremented.to_string(), "i++");
}

#[test]
#[should_panic(expected = "cannot be applied")]
fn logical_not_of_int_panics() {
    let ctx = Context::default();
    let i = var(&ctx, "i", "int", ModifierFlags::empty());
    let _ = Expression::prefix(Operator::LogicalNot, read(&i));
}

#[test]
fn ternary_takes_arm_type() {
    let ctx = Context::default();
    let b = var(&ctx, "b", "bool", ModifierFlags::empty());
    let select = Expression::ternary(
        read(&b),
        Expression::float_literal(&ctx, Span::NONE, 1.0),
        Expression::float_literal(&ctx, Span::NONE, 0.0),
    );
    assert_eq!(select.ty().name(), "float");
    assert_eq!(select.to_string(), "(b ? 1.0 : 0.0)");
}

#[test]
fn references_without_call_are_untyped() {
    let ctx = Context::default();
    let reference = Expression::type_reference(&ctx, Span::NONE, builtin(&ctx, "half3"));
    assert!(reference.ty().is_invalid());
    assert_eq!(reference.to_string(), "half3");
}

#[test]
fn const_variables_fold_to_their_values() {
    let ctx = Context::default();
    let limit = var(&ctx, "limit", "int", ModifierFlags::CONST);
    limit.set_initial_value(Expression::int_literal(&ctx, Span::NONE, 300));
    let alias = var(&ctx, "alias", "int", ModifierFlags::CONST);
    alias.set_initial_value(read(&limit));

    let reference = read(&alias);
    assert_eq!(reference.constant_value_for_variable().as_int_literal(), Some(300));
    assert_eq!(
        reference.constant_subexpression(0).and_then(Expression::as_int_literal),
        Some(300)
    );

    let mutable = var(&ctx, "m", "int", ModifierFlags::empty());
    mutable.set_initial_value(Expression::int_literal(&ctx, Span::NONE, 1));
    assert!(read(&mutable).constant_subexpression(0).is_none());
}

#[test]
fn constant_slots_of_constructors() {
    let ctx = Context::default();
    let int = |value| Expression::int_literal(&ctx, Span::NONE, value);
    let int2 = builtin(&ctx, "int2");
    let int4 = builtin(&ctx, "int4");

    let pair = Expression::construct_compound(Span::NONE, Arc::clone(&int2), vec![int(1), int(2)]);
    let quad = Expression::construct_compound(Span::NONE, int4, vec![int(0), pair, int(3)]);
    let slots: Vec<Option<i64>> = (0..4)
        .map(|slot| quad.constant_subexpression(slot).and_then(Expression::as_int_literal))
        .collect();
    assert_eq!(slots, vec![Some(0), Some(1), Some(2), Some(3)]);
    assert!(quad.constant_subexpression(4).is_none());

    let splat = Expression::splat(Span::NONE, int2, int(7));
    assert_eq!(splat.constant_subexpression(1).and_then(Expression::as_int_literal), Some(7));

    let identity = Expression::diagonal_matrix(
        Span::NONE,
        builtin(&ctx, "float2x2"),
        Expression::float_literal(&ctx, Span::NONE, 1.0),
    );
    assert!(identity.constant_subexpression(0).is_some());
    assert!(identity.constant_subexpression(1).is_none());
    assert!(identity.constant_subexpression(3).is_some());
}

#[test]
fn integer_lanes_fold_through_operators() {
    let ctx = Context::default();
    let int = |value| Expression::int_literal(&ctx, Span::NONE, value);
    let pair = Expression::construct_compound(
        Span::NONE,
        builtin(&ctx, "int2"),
        vec![int(1), Expression::prefix(Operator::Minus, int(2))],
    );
    let scaled = Expression::binary(&ctx, pair, Operator::Star, int(3));
    assert_eq!(scaled.ty().name(), "int2");
    let lanes: Vec<Option<i64>> = (0..2).map(|slot| scaled.constant_int_value(slot)).collect();
    assert_eq!(lanes, vec![Some(3), Some(-6)]);

    let inverted = Expression::prefix(Operator::BitwiseNot, int(0));
    assert_eq!(inverted.constant_int_value(0), Some(-1));

    let overflow = Expression::binary(&ctx, int(i64::MAX), Operator::Plus, int(1));
    assert_eq!(overflow.constant_int_value(0), None);

    let fraction = Expression::float_literal(&ctx, Span::NONE, 2.5);
    assert_eq!(Expression::prefix(Operator::Minus, fraction).constant_int_value(0), None);
}

#[test]
fn scalar_cast_of_literal_folds() {
    let ctx = Context::default();
    let three = Expression::int_literal(&ctx, Span::NONE, 3);
    let folded = Expression::scalar_cast(Span::at(4), builtin(&ctx, "half"), three);
    assert!(matches!(folded.kind, ExpressionKind::FloatLiteral(v) if v == 3.0));
    assert_eq!(folded.ty().name(), "half");
    assert_eq!(folded.span, Span::at(4));

    let truthy = Expression::scalar_cast(
        Span::NONE,
        builtin(&ctx, "bool"),
        Expression::float_literal(&ctx, Span::NONE, 0.25),
    );
    assert!(matches!(truthy.kind, ExpressionKind::BoolLiteral(true)));

    let truncated = Expression::scalar_cast(
        Span::NONE,
        builtin(&ctx, "int"),
        Expression::float_literal(&ctx, Span::NONE, 2.75),
    );
    assert_eq!(truncated.as_int_literal(), Some(2));
}

#[test]
fn scalar_cast_of_variable_builds_node() {
    let ctx = Context::default();
    let x = var(&ctx, "x", "int", ModifierFlags::empty());
    let cast = Expression::scalar_cast(Span::NONE, builtin(&ctx, "short"), read(&x));
    assert!(matches!(
        cast.kind,
        ExpressionKind::Constructor {
            kind: ConstructorKind::ScalarCast,
            ..
        }
    ));
    assert_eq!(cast.to_string(), "short(x)");
}

#[test]
fn compound_cast_of_splat_literal_folds() {
    let ctx = Context::default();
    let splat = Expression::splat(
        Span::NONE,
        builtin(&ctx, "int3"),
        Expression::int_literal(&ctx, Span::NONE, 2),
    );
    let cast = Expression::compound_cast(Span::NONE, builtin(&ctx, "float3"), splat);
    assert_eq!(cast.ty().name(), "float3");
    assert_eq!(cast.to_string(), "float3(2.0)");
}

#[test]
fn constructor_dispatches_on_kind() {
    let ctx = Context::default();
    let one = Expression::float_literal(&ctx, Span::NONE, 1.0);
    let splat = Expression::constructor(
        Span::NONE,
        ConstructorKind::Splat,
        builtin(&ctx, "float4"),
        vec![one],
    );
    assert_eq!(splat.to_string(), "float4(1.0)");
}

#[test]
#[should_panic(expected = "takes one argument")]
fn single_argument_constructor_rejects_two() {
    let ctx = Context::default();
    let one = || Expression::float_literal(&ctx, Span::NONE, 1.0);
    let _ = Expression::constructor(
        Span::NONE,
        ConstructorKind::ScalarCast,
        builtin(&ctx, "half"),
        vec![one(), one()],
    );
}

#[test]
#[should_panic(expected = "wrong slot count")]
fn compound_with_wrong_slot_count_panics() {
    let ctx = Context::default();
    let one = Expression::float_literal(&ctx, Span::NONE, 1.0);
    let two = Expression::float_literal(&ctx, Span::NONE, 2.0);
    let _ = Expression::construct_compound(Span::NONE, builtin(&ctx, "float3"), vec![one, two]);
}
