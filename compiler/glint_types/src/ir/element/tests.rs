use super::*;
use crate::ir::Expression;
use crate::{BuiltinTypes, Context, StructField, Type, VariableStorage};
use glint_ir::{ModifierFlags, Modifiers, Span};
use pretty_assertions::assert_eq;

fn declaration(name: &str, params: Vec<Arc<Variable>>) -> Arc<FunctionDeclaration> {
    Arc::new(FunctionDeclaration::new(
        Span::NONE,
        Modifiers::default(),
        name,
        params,
        Arc::clone(&BuiltinTypes::get().void),
        false,
    ))
}

#[test]
fn enum_values_follow_declaration_order() {
    let ctx = Context::default();
    let symbols = SymbolTable::new(false);
    let declarations = [("Off", 0), ("On", 1), ("Auto", 7)]
        .into_iter()
        .map(|(name, value)| {
            let variable = symbols.add(Variable::new(
                Span::NONE,
                Modifiers::new(glint_ir::Layout::default(), ModifierFlags::CONST),
                name,
                Arc::clone(&ctx.types.int),
                false,
                VariableStorage::Global,
            ));
            VarDeclaration::new(
                variable,
                Arc::clone(&ctx.types.int),
                0,
                Some(Expression::int_literal(&ctx, Span::NONE, value)),
            )
        })
        .collect();
    let element = ProgramElement::Enum(EnumDefinition {
        type_name: "Mode".to_owned(),
        symbols: Arc::clone(&symbols),
        declarations,
        builtin: true,
    });

    let ProgramElement::Enum(def) = &element else {
        unreachable!()
    };
    let values: Vec<(&str, i64)> = def.values().collect();
    assert_eq!(values, vec![("Off", 0), ("On", 1), ("Auto", 7)]);
    assert_eq!(symbols.owned_count(), 3);
    assert_eq!(
        element.to_string(),
        "enum class Mode {\n    Off = 0,\n    On = 1,\n    Auto = 7,\n};"
    );
}

#[test]
fn referenced_functions_are_deduplicated() {
    let a = declaration("a", Vec::new());
    let b = declaration("b", Vec::new());
    let main = declaration("main", Vec::new());
    let def = FunctionDefinition::new(
        main,
        false,
        Statement::block(Vec::new(), None, true),
        [Arc::clone(&a), Arc::clone(&b), Arc::clone(&a)],
    );
    assert_eq!(def.referenced_functions.len(), 2);
    assert!(Arc::ptr_eq(&def.referenced_functions[0], &a));
    assert!(Arc::ptr_eq(&def.referenced_functions[1], &b));
}

#[test]
fn function_element_links_its_declaration() {
    let main = declaration("main", Vec::new());
    assert!(main.definition().is_none());
    let element = ProgramElement::function(FunctionDefinition::new(
        Arc::clone(&main),
        false,
        Statement::block(Vec::new(), None, true),
        Vec::new(),
    ));
    let ProgramElement::Function(def) = &element else {
        panic!("expected a function element");
    };
    assert!(main.definition().is_some_and(|linked| Arc::ptr_eq(&linked, def)));

    drop(element);
    assert!(main.definition().is_none());
}

#[test]
#[should_panic(expected = "function 'main' is already defined")]
fn second_definition_panics() {
    let main = declaration("main", Vec::new());
    let body = || Statement::block(Vec::new(), None, true);
    let _first = ProgramElement::function(FunctionDefinition::new(
        Arc::clone(&main),
        false,
        body(),
        Vec::new(),
    ));
    let _second =
        ProgramElement::function(FunctionDefinition::new(main, false, body(), Vec::new()));
}

#[test]
fn function_description() {
    let types = BuiltinTypes::get();
    let coord = Arc::new(Variable::new(
        Span::NONE,
        Modifiers::default(),
        "coord",
        Arc::clone(&types.float),
        false,
        VariableStorage::Parameter,
    ));
    let def = FunctionDefinition::new(
        declaration("main", vec![coord]),
        false,
        Statement::block(vec![Statement::Return(None)], None, true),
        Vec::new(),
    );
    assert_eq!(
        ProgramElement::function(def).to_string(),
        "void main(float coord) {\nreturn;\n}"
    );
}

#[test]
fn struct_description() {
    let types = BuiltinTypes::get();
    let pixel = Arc::new(Type::make_struct(
        Span::NONE,
        "Pixel",
        vec![
            StructField::new(Modifiers::default(), "rgba", Arc::clone(&types.half)),
            StructField::new(
                Modifiers::new(glint_ir::Layout::default(), ModifierFlags::FLAT),
                "id",
                Arc::clone(&types.int),
            ),
        ],
    ));
    assert_eq!(
        ProgramElement::StructDefinition(pixel).to_string(),
        "struct Pixel {\n    half rgba;\n    flat int id;\n};"
    );
}

#[test]
fn interface_block_description() {
    let types = BuiltinTypes::get();
    let globals = Arc::new(Type::make_struct(
        Span::NONE,
        "Globals",
        vec![StructField::new(Modifiers::default(), "time", Arc::clone(&types.float))],
    ));
    let variable = Arc::new(Variable::new(
        Span::NONE,
        Modifiers::new(glint_ir::Layout::default(), ModifierFlags::UNIFORM),
        "globals",
        globals,
        false,
        VariableStorage::InterfaceBlock,
    ));
    let named = InterfaceBlock {
        variable: Arc::clone(&variable),
        type_name: "Globals".to_owned(),
        instance_name: "globals".to_owned(),
        array_size: 0,
        symbols: None,
    };
    assert_eq!(
        ProgramElement::InterfaceBlock(named).to_string(),
        "uniform Globals {\n    float time;\n} globals;"
    );

    let anonymous = InterfaceBlock {
        variable,
        type_name: "Globals".to_owned(),
        instance_name: String::new(),
        array_size: 0,
        symbols: None,
    };
    assert_eq!(
        ProgramElement::InterfaceBlock(anonymous).to_string(),
        "uniform Globals {\n    float time;\n};"
    );
}
