//! Grammar validation: every invariant violation is a `ModelError`
//! raised by `build()`, before any code exists.

use super::{expression_category, statement_category};
use crate::error::ModelError;
use crate::grammar::{Category, Field, FieldType, Grammar, ReferencePolicy};
use crate::lox;

fn build(categories: Vec<Category>) -> Result<Grammar, ModelError> {
    categories
        .into_iter()
        .fold(Grammar::builder(), |b, c| b.category(c))
        .build()
}

#[test]
fn test_lox_grammar_is_valid() {
    let grammar = lox::grammar().unwrap();
    let names: Vec<_> = grammar.categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Expr", "Stmt"]);
    assert_eq!(grammar.category("Expr").unwrap().kinds.len(), 12);
    assert_eq!(grammar.category("Stmt").unwrap().kinds.len(), 9);
}

#[test]
fn test_declaration_order_is_preserved() {
    let grammar = build(vec![statement_category(), expression_category()]).unwrap();
    let kinds: Vec<_> = grammar.categories()[1].kinds.iter().map(|k| k.name.as_str()).collect();
    assert_eq!(kinds, ["Literal", "Binary"]);
    assert_eq!(grammar.categories()[0].name, "Statement");
}

#[test]
fn test_duplicate_category() {
    let err = build(vec![expression_category(), expression_category()]).unwrap_err();
    assert_eq!(
        err,
        ModelError::DuplicateCategory {
            name: "Expression".to_string()
        }
    );
}

#[test]
fn test_duplicate_node_kind() {
    let category = expression_category().node("Literal", []);
    let err = build(vec![category]).unwrap_err();
    assert_eq!(
        err,
        ModelError::DuplicateNodeKind {
            category: "Expression".to_string(),
            kind: "Literal".to_string(),
        }
    );
    assert!(err.to_string().contains("'Literal'"));
}

#[test]
fn test_duplicate_field() {
    let category = Category::new("Expr").node(
        "Binary",
        [
            Field::new("left", FieldType::category("Expr")),
            Field::new("left", FieldType::category("Expr")),
        ],
    );
    let err = build(vec![category]).unwrap_err();
    assert!(matches!(err, ModelError::DuplicateField { ref field, .. } if field == "left"));
}

#[test]
fn test_dangling_category_reference() {
    let category = Category::new("Stmt").node("Print", [Field::new("expression", FieldType::category("Expr"))]);
    let err = build(vec![category]).unwrap_err();
    assert_eq!(
        err,
        ModelError::UnknownCategory {
            category: "Stmt".to_string(),
            kind: "Print".to_string(),
            field: "expression".to_string(),
            referenced: "Expr".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "field 'Stmt.Print.expression' references unknown category 'Expr'"
    );
}

#[test]
fn test_dangling_reference_inside_list() {
    let category = Category::new("Stmt").node("Block", [Field::new("body", FieldType::category("Decl").list().optional())]);
    let err = build(vec![category]).unwrap_err();
    assert!(matches!(err, ModelError::UnknownCategory { ref referenced, .. } if referenced == "Decl"));
}

#[test]
fn test_unknown_node_kind_reference() {
    let stmt = Category::new("Stmt").node(
        "Class",
        [Field::new("methods", FieldType::node("Stmt", "Function").list())],
    );
    let err = build(vec![stmt]).unwrap_err();
    assert!(matches!(
        err,
        ModelError::UnknownNodeKind { ref referenced_kind, .. } if referenced_kind == "Function"
    ));
}

#[test]
fn test_self_and_forward_references_allowed_by_default() {
    // Statement (declared first) refers forward to Expression.
    let grammar = build(vec![statement_category(), expression_category()]);
    assert!(grammar.is_ok());
}

#[test]
fn test_backward_only_rejects_forward_references() {
    let err = Grammar::builder()
        .references(ReferencePolicy::BackwardOnly)
        .category(statement_category())
        .category(expression_category())
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        ModelError::ForwardReference { ref category, ref referenced, .. }
            if category == "Statement" && referenced == "Expression"
    ));
}

#[test]
fn test_backward_only_allows_self_and_earlier_references() {
    let grammar = Grammar::builder()
        .references(ReferencePolicy::BackwardOnly)
        .category(expression_category())
        .category(statement_category())
        .build()
        .unwrap();
    assert_eq!(grammar.references(), ReferencePolicy::BackwardOnly);
}

#[test]
fn test_invalid_names() {
    let err = build(vec![Category::new("")]).unwrap_err();
    assert!(matches!(err, ModelError::InvalidName { what: "category", .. }));

    let err = build(vec![Category::new("Self")]).unwrap_err();
    assert!(matches!(err, ModelError::InvalidName { what: "category", .. }));

    let err = build(vec![Category::new("Expr").node("1Binary", [])]).unwrap_err();
    assert!(matches!(err, ModelError::InvalidName { what: "node kind", .. }));

    let err = build(vec![Category::new("Expr").node("Get", [Field::new("the-object", FieldType::value("u8"))])]).unwrap_err();
    assert!(matches!(err, ModelError::InvalidName { what: "field", .. }));
}

#[test]
fn test_keyword_field_names_are_accepted() {
    let grammar = build(vec![Category::new("Decl").node("Alias", [Field::new("type", FieldType::value("String"))])]);
    assert!(grammar.is_ok());
}

#[test]
fn test_node_kind_named_like_its_category() {
    let err = build(vec![Category::new("Expr").node("Expr", [])]).unwrap_err();
    assert!(matches!(err, ModelError::ReservedName { ref generated, .. } if generated == "base type"));
}

#[test]
fn test_node_kind_named_like_the_visitor() {
    let err = build(vec![Category::new("Expr").node("ExprVisitor", [])]).unwrap_err();
    assert!(matches!(err, ModelError::ReservedName { ref generated, .. } if generated == "visitor trait"));
}

#[test]
fn test_category_named_like_another_visitor() {
    let err = build(vec![Category::new("Expr"), Category::new("ExprVisitor")]).unwrap_err();
    assert!(matches!(err, ModelError::ReservedName { ref name, .. } if name == "ExprVisitor"));
}

#[test]
fn test_generic_parameter_names_are_reserved() {
    let err = build(vec![Category::new("Expr").node("R", [])]).unwrap_err();
    assert!(matches!(err, ModelError::ReservedName { ref generated, .. } if generated == "generic parameter"));

    let err = build(vec![Category::new("V")]).unwrap_err();
    assert!(matches!(err, ModelError::ReservedName { .. }));
}

#[test]
fn test_category_mapping_to_root_unit() {
    let err = build(vec![Category::new("Mod")]).unwrap_err();
    assert!(matches!(err, ModelError::ReservedName { ref name, .. } if name == "Mod"));
}

#[test]
fn test_category_mapping_to_keyword_module() {
    let err = build(vec![Category::new("Type")]).unwrap_err();
    assert!(matches!(err, ModelError::ReservedName { ref generated, .. } if generated == "module `type`"));
}

#[test]
fn test_unit_collision() {
    let err = build(vec![Category::new("FooBar"), Category::new("Foo_Bar")]).unwrap_err();
    assert_eq!(
        err,
        ModelError::UnitCollision {
            first: "FooBar".to_string(),
            second: "Foo_Bar".to_string(),
            unit: "foo_bar".to_string(),
        }
    );
}

#[test]
fn test_invalid_value_type() {
    let category = Category::new("Expr").node("Literal", [Field::new("value", FieldType::value("Vec<"))]);
    let err = build(vec![category]).unwrap_err();
    assert!(matches!(err, ModelError::InvalidValueType { ref ty, .. } if ty == "Vec<"));
}

#[test]
fn test_invalid_import_and_derive() {
    let err = Grammar::builder().import("crate::token::").build().unwrap_err();
    assert!(matches!(err, ModelError::InvalidImport { .. }));

    let err = Grammar::builder().derive("Partial Eq").build().unwrap_err();
    assert!(matches!(err, ModelError::InvalidDerive { .. }));
}

#[test]
fn test_builder_options() {
    let grammar = Grammar::builder()
        .imports(["crate::token::Token"])
        .derives(["Debug"])
        .derive("Eq")
        .build()
        .unwrap();
    assert_eq!(grammar.imports(), ["crate::token::Token".to_string()]);
    assert_eq!(grammar.derives(), ["Debug".to_string(), "Eq".to_string()]);
    assert_eq!(grammar.references(), ReferencePolicy::Forward);
}

#[test]
fn test_node_kind_shadowing_a_value_type() {
    let category = Category::new("Expr")
        .node("Literal", [Field::new("value", FieldType::value("String"))])
        .node("String", [Field::new("text", FieldType::value("u8"))]);
    let err = build(vec![category]).unwrap_err();
    assert_eq!(
        err,
        ModelError::ShadowedName {
            category: "Expr".to_string(),
            name: "String".to_string(),
            shadowed: "value type `String` of field 'Literal.value'".to_string(),
        }
    );
}

#[test]
fn test_node_kind_shadowing_a_nested_value_type() {
    let category = Category::new("Stmt")
        .node("Function", [Field::new("params", FieldType::value("Vec<Token>").optional())])
        .node("Token", []);
    let err = build(vec![category]).unwrap_err();
    assert!(matches!(err, ModelError::ShadowedName { ref name, .. } if name == "Token"));
}

#[test]
fn test_qualified_value_types_are_not_shadowed() {
    let category = Category::new("Expr")
        .node("Literal", [Field::new("value", FieldType::value("std::string::String"))])
        .node("String", []);
    assert!(build(vec![category]).is_ok());

    // A value type only shares a unit with its own category's kinds
    let grammar = build(vec![
        Category::new("Expr").node("Literal", [Field::new("value", FieldType::value("String"))]),
        Category::new("Stmt").node("String", []),
    ]);
    assert!(grammar.is_ok());
}

#[test]
fn test_node_kind_shadowing_an_import() {
    let err = Grammar::builder()
        .import("crate::token::Token")
        .category(Category::new("Expr").node("Token", []))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ModelError::ShadowedName {
            category: "Expr".to_string(),
            name: "Token".to_string(),
            shadowed: "import `crate::token::Token`".to_string(),
        }
    );
}

#[test]
fn test_import_bindings_follow_renames_and_groups() {
    let shadowing = |import: &str, kind: &str| {
        let result = Grammar::builder()
            .import(import)
            .category(Category::new("Expr").node(kind, []))
            .build();
        matches!(result, Err(ModelError::ShadowedName { .. }))
    };

    assert!(shadowing("crate::token::Token as Tok", "Tok"));
    assert!(!shadowing("crate::token::Token as Tok", "Token"));
    assert!(shadowing("crate::token::{Object, Token}", "Object"));
    assert!(shadowing("crate::token::{self}", "token"));
    assert!(!shadowing("crate::token::*", "Token"));
    assert!(!shadowing("crate::token::Token as _", "Token"));
}

#[test]
fn test_category_base_type_shadowing_an_import() {
    let err = Grammar::builder()
        .import("crate::token::Token")
        .category(Category::new("Token"))
        .build()
        .unwrap_err();
    assert!(matches!(err, ModelError::ShadowedName { ref name, .. } if name == "Token"));
}
