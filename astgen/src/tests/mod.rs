//! Tests for grammar validation, emission, and output.
//!
//! Generated units are checked structurally: each unit is parsed with
//! `syn::parse_file` and the helpers below pull out the pieces a consumer
//! relies on (visitor operations, `accept` targets, struct fields).

mod model_tests;

use std::collections::BTreeMap;

use quote::ToTokens;

use crate::grammar::{Category, Field, FieldType, Grammar};

/// Category `Expression` with `Literal(value: Object)` and
/// `Binary(left: Expression, operator: Token, right: Expression)`.
pub(crate) fn expression_category() -> Category {
    Category::new("Expression")
        .node("Literal", [Field::new("value", FieldType::value("Object"))])
        .node(
            "Binary",
            [
                Field::new("left", FieldType::category("Expression")),
                Field::new("operator", FieldType::value("Token")),
                Field::new("right", FieldType::category("Expression")),
            ],
        )
}

pub(crate) fn statement_category() -> Category {
    Category::new("Statement")
        .node("Print", [Field::new("expression", FieldType::category("Expression"))])
        .node("Block", [Field::new("statements", FieldType::category("Statement").list())])
}

pub(crate) fn expression_grammar() -> Grammar {
    Grammar::builder()
        .category(expression_category())
        .build()
        .expect("expression grammar is valid")
}

pub(crate) fn parse_unit(source: &str) -> syn::File {
    syn::parse_file(source).unwrap_or_else(|e| panic!("generated unit is not valid Rust: {e}\n{source}"))
}

/// Operation names declared on trait `name`, in order.
pub(crate) fn trait_operations(file: &syn::File, name: &str) -> Vec<String> {
    file.items
        .iter()
        .find_map(|item| match item {
            syn::Item::Trait(t) if t.ident == name => Some(t),
            _ => None,
        })
        .unwrap_or_else(|| panic!("trait {name} not found"))
        .items
        .iter()
        .filter_map(|item| match item {
            syn::TraitItem::Fn(f) => Some(f.sig.ident.to_string()),
            _ => None,
        })
        .collect()
}

/// For every inherent impl whose `accept` body is a single method call on
/// the visitor: self type → called operation.
pub(crate) fn accept_targets(file: &syn::File) -> BTreeMap<String, String> {
    let mut targets = BTreeMap::new();

    for item in &file.items {
        let syn::Item::Impl(imp) = item else { continue };
        if imp.trait_.is_some() {
            continue;
        }
        let syn::Type::Path(self_ty) = &*imp.self_ty else { continue };
        let self_name = self_ty.path.segments.last().unwrap().ident.to_string();

        for impl_item in &imp.items {
            let syn::ImplItem::Fn(f) = impl_item else { continue };
            if f.sig.ident != "accept" {
                continue;
            }
            if let Some(syn::Stmt::Expr(syn::Expr::MethodCall(call), None)) = f.block.stmts.last() {
                targets.insert(self_name.clone(), call.method.to_string());
            }
        }
    }

    targets
}

/// `(field name, field type)` of struct `name`, in declaration order.
pub(crate) fn struct_fields(file: &syn::File, name: &str) -> Vec<(String, String)> {
    let s = file
        .items
        .iter()
        .find_map(|item| match item {
            syn::Item::Struct(s) if s.ident == name => Some(s),
            _ => None,
        })
        .unwrap_or_else(|| panic!("struct {name} not found"));

    s.fields
        .iter()
        .map(|f| {
            (
                f.ident.as_ref().unwrap().to_string(),
                f.ty.to_token_stream().to_string(),
            )
        })
        .collect()
}

/// Variant names of enum `name`.
pub(crate) fn enum_variants(file: &syn::File, name: &str) -> Vec<String> {
    file.items
        .iter()
        .find_map(|item| match item {
            syn::Item::Enum(e) if e.ident == name => Some(e),
            _ => None,
        })
        .unwrap_or_else(|| panic!("enum {name} not found"))
        .variants
        .iter()
        .map(|v| v.ident.to_string())
        .collect()
}

/// A Rust type in the same token spelling the helpers above produce.
pub(crate) fn normalize_type(ty: &str) -> String {
    syn::parse_str::<syn::Type>(ty).unwrap().to_token_stream().to_string()
}
