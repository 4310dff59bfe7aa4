use super::*;
use crate::BuiltinTypes;
use glint_ir::ModifierFlags;
use pretty_assertions::assert_eq;

fn builtin(name: &str) -> TypeRef {
    let types = BuiltinTypes::get();
    Arc::clone(types.lookup(name).unwrap_or(&types.invalid))
}

fn rgba_struct(name: &str) -> Type {
    Type::make_struct(
        Span::new(0, 10),
        name,
        vec![
            StructField::new(Modifiers::default(), "rgba", builtin("half4")),
            StructField::new(Modifiers::default(), "coord", builtin("float2")),
        ],
    )
}

#[test]
fn identical_types_are_free() {
    let float = builtin("float");
    assert_eq!(float.coercion_cost(&float), CoercionCost::Free);
}

#[test]
fn widening_is_normal_by_rank_difference() {
    assert_eq!(builtin("half").coercion_cost(&builtin("float")), CoercionCost::Normal(1));
    assert_eq!(builtin("short").coercion_cost(&builtin("int")), CoercionCost::Normal(3));
    assert_eq!(builtin("byte").coercion_cost(&builtin("int")), CoercionCost::Normal(5));
}

#[test]
fn narrowing_by_rank_difference() {
    assert_eq!(builtin("float").coercion_cost(&builtin("half")), CoercionCost::Narrowing(1));
    assert_eq!(builtin("int").coercion_cost(&builtin("byte")), CoercionCost::Narrowing(5));
}

#[test]
fn number_kind_mismatch_is_impossible() {
    assert_eq!(builtin("int").coercion_cost(&builtin("float")), CoercionCost::Impossible);
    assert_eq!(builtin("uint").coercion_cost(&builtin("int")), CoercionCost::Impossible);
    assert_eq!(builtin("bool").coercion_cost(&builtin("int")), CoercionCost::Impossible);
}

#[test]
fn integer_literal_is_free_to_any_number() {
    let int_literal = builtin("$intLiteral");
    for target in ["float", "half", "int", "uint", "short", "ubyte"] {
        assert_eq!(int_literal.coercion_cost(&builtin(target)), CoercionCost::Free, "{target}");
    }
    assert_eq!(int_literal.coercion_cost(&builtin("bool")), CoercionCost::Impossible);
}

#[test]
fn float_literal_ranks_like_a_float() {
    let float_literal = builtin("$floatLiteral");
    assert_eq!(float_literal.coercion_cost(&builtin("float")), CoercionCost::Normal(2));
    assert_eq!(float_literal.coercion_cost(&builtin("half")), CoercionCost::Normal(1));
    assert_eq!(float_literal.coercion_cost(&builtin("int")), CoercionCost::Impossible);
}

#[test]
fn vectors_compare_components_when_shapes_match() {
    assert_eq!(builtin("half3").coercion_cost(&builtin("float3")), CoercionCost::Normal(1));
    assert_eq!(builtin("half3").coercion_cost(&builtin("float4")), CoercionCost::Impossible);
    assert_eq!(builtin("int2").coercion_cost(&builtin("float2")), CoercionCost::Impossible);
}

#[test]
fn matrices_require_same_shape() {
    assert_eq!(
        builtin("half3x3").coercion_cost(&builtin("float3x3")),
        CoercionCost::Normal(1)
    );
    assert_eq!(
        builtin("float3x2").coercion_cost(&builtin("float2x3")),
        CoercionCost::Impossible
    );
}

#[test]
fn generic_lists_match_by_position() {
    let gen_type = builtin("$genType");
    assert_eq!(gen_type.coercion_cost(&builtin("float")), CoercionCost::Normal(1));
    assert_eq!(gen_type.coercion_cost(&builtin("float4")), CoercionCost::Normal(4));
    assert_eq!(gen_type.coercion_cost(&builtin("half")), CoercionCost::Impossible);
}

#[test]
fn display_name_hides_literal_types() {
    assert_eq!(builtin("$intLiteral").display_name(), "int");
    assert_eq!(builtin("$floatLiteral").display_name(), "float");
    assert_eq!(builtin("half2").display_name(), "half2");
}

#[test]
fn integer_ranges() {
    assert_eq!(builtin("byte").minimum_value(), Some(-128));
    assert_eq!(builtin("byte").maximum_value(), Some(127));
    assert_eq!(builtin("ubyte").maximum_value(), Some(255));
    assert_eq!(builtin("short").minimum_value(), Some(-32_768));
    assert_eq!(builtin("uint").maximum_value(), Some(4_294_967_295));
    assert_eq!(builtin("$intLiteral").maximum_value(), Some(2_147_483_647));
    assert_eq!(builtin("float").maximum_value(), None);
    assert_eq!(builtin("bool").minimum_value(), None);
}

#[test]
fn slot_types_look_through_nesting() {
    let rgba = Arc::new(rgba_struct("Pixel"));
    assert_eq!(rgba.slot_count(), 6);
    assert_eq!(rgba.slot_type(0).name(), "half");
    assert_eq!(rgba.slot_type(3).name(), "half");
    assert_eq!(rgba.slot_type(4).name(), "float");

    let pixels = Type::make_array("Pixel[2]", &rgba, ArraySize::Sized(2));
    assert_eq!(pixels.slot_count(), 12);
    assert_eq!(pixels.slot_type(10).name(), "float");
    assert_eq!(pixels.slot_type(7).name(), "half");
}

#[test]
fn unsized_arrays_have_no_slots() {
    let float = builtin("float");
    let name = Type::array_name(&float, ArraySize::Unsized);
    let floats = Type::make_array(name, &float, ArraySize::Unsized);
    assert_eq!(floats.name(), "float[]");
    assert_eq!(floats.slot_count(), 0);
    assert_eq!(ArraySize::from_raw(-1), ArraySize::Unsized);
    assert_eq!(ArraySize::from_raw(3), ArraySize::Sized(3));
}

#[test]
fn arrays_inside_structs_are_found() {
    let float = builtin("float");
    let weights = Arc::new(Type::make_array("float[4]", &float, ArraySize::Sized(4)));
    let kernel = Type::make_struct(
        Span::NONE,
        "Kernel",
        vec![StructField::new(Modifiers::default(), "weights", Arc::clone(&weights))],
    );
    assert!(weights.is_or_contains_array());
    assert!(kernel.is_or_contains_array());
    assert!(!rgba_struct("Pixel").is_or_contains_array());
    assert!(!float.is_or_contains_array());
}

#[test]
fn equality_is_identity_or_name_and_shape() {
    let float = builtin("float");
    let a = Type::make_array("float[2]", &float, ArraySize::Sized(2));
    let b = Type::make_array("float[2]", &float, ArraySize::Sized(2));
    let c = Type::make_array("float[3]", &float, ArraySize::Sized(3));
    assert_eq!(a, b);
    assert!(a != c);
    assert!(*builtin("float2") != *builtin("half2"));
}

#[test]
fn cloning_a_builtin_returns_it() {
    let table = SymbolTable::new(false);
    let half4 = builtin("half4");
    assert!(Arc::ptr_eq(&half4.clone_into_table(&table), &half4));
    assert_eq!(table.owned_count(), 0);
}

#[test]
fn cloning_a_struct_is_idempotent() {
    let table = SymbolTable::new(false);
    let source = Arc::new(rgba_struct("Pixel"));

    let first = source.clone_into_table(&table);
    assert!(!Arc::ptr_eq(&first, &source));
    assert_eq!(*first, *source);
    assert_eq!(first.fields().len(), 2);

    let second = source.clone_into_table(&table);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(table.owned_count(), 1);
}

#[test]
fn cloning_reuses_a_type_visible_from_a_parent() {
    let parent = SymbolTable::new(false);
    let child = SymbolTable::new_child(&parent, false);
    let source = Arc::new(Type::make_enum("Mode"));
    let in_parent = source.clone_into_table(&parent);
    let in_child = source.clone_into_table(&child);
    assert!(Arc::ptr_eq(&in_parent, &in_child));
    assert_eq!(child.owned_count(), 0);
}

#[test]
#[should_panic(expected = "different kind of type")]
fn cloning_over_a_different_kind_panics() {
    let table = SymbolTable::new(false);
    table.add(Type::make_enum("Pixel"));
    let _ = Arc::new(rgba_struct("Pixel")).clone_into_table(&table);
}

#[test]
#[should_panic(expected = "non-type symbol")]
fn cloning_over_a_variable_panics() {
    let table = SymbolTable::new(false);
    table.add(crate::Variable::new(
        Span::NONE,
        Modifiers::new(glint_ir::Layout::default(), ModifierFlags::CONST),
        "Pixel",
        builtin("int"),
        false,
        crate::VariableStorage::Global,
    ));
    let _ = Arc::new(rgba_struct("Pixel")).clone_into_table(&table);
}

mod proptest_coercion {
    use super::builtin;
    use crate::CoercionCost;
    use proptest::prelude::*;

    const FLOATS: &[&str] = &["float", "half"];
    const SIGNED: &[&str] = &["int", "short", "byte"];
    const UNSIGNED: &[&str] = &["uint", "ushort", "ubyte"];

    fn same_kind_pair() -> impl Strategy<Value = (&'static str, &'static str)> {
        prop_oneof![Just(FLOATS), Just(SIGNED), Just(UNSIGNED)].prop_flat_map(|family| {
            (
                proptest::sample::select(family.to_vec()),
                proptest::sample::select(family.to_vec()),
            )
        })
    }

    fn any_scalar() -> impl Strategy<Value = &'static str> {
        proptest::sample::select(vec![
            "float", "half", "int", "uint", "short", "ushort", "byte", "ubyte", "bool",
        ])
    }

    fn any_vector() -> impl Strategy<Value = String> {
        (any_scalar(), 2u8..=4).prop_map(|(scalar, columns)| format!("{scalar}{columns}"))
    }

    proptest! {
        #[test]
        fn same_kind_scalars_rank_by_priority((a, b) in same_kind_pair()) {
            let (a, b) = (builtin(a), builtin(b));
            let (pa, pb) = (u32::from(a.priority()), u32::from(b.priority()));
            let expected = if a == b {
                CoercionCost::Free
            } else if pb >= pa {
                CoercionCost::Normal(pb - pa)
            } else {
                CoercionCost::Narrowing(pa - pb)
            };
            prop_assert_eq!(a.coercion_cost(&b), expected);
        }

        #[test]
        fn different_kinds_are_impossible(a in any_scalar(), b in any_scalar()) {
            let (a, b) = (builtin(a), builtin(b));
            prop_assume!(a.number_kind() != b.number_kind());
            prop_assert_eq!(a.coercion_cost(&b), CoercionCost::Impossible);
        }

        #[test]
        fn vectors_of_different_width_are_impossible(a in any_vector(), b in any_vector()) {
            let (a, b) = (builtin(&a), builtin(&b));
            prop_assume!(a.columns() != b.columns());
            prop_assert_eq!(a.coercion_cost(&b), CoercionCost::Impossible);
        }

        #[test]
        fn free_only_for_identical_non_literals(a in any_scalar(), b in any_scalar()) {
            let (a, b) = (builtin(a), builtin(b));
            prop_assert_eq!(a.coercion_cost(&b) == CoercionCost::Free, a == b);
        }
    }
}
