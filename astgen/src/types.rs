//! Mapping from declared field types to Rust types.
//!
//! | declared                   | emitted                                  |
//! |----------------------------|------------------------------------------|
//! | `Value("Token")`           | `Token`                                  |
//! | `Category("Expr")`         | `Box<super::expr::Expr>`                 |
//! | `Node("Stmt", "Function")` | `Box<super::stmt::Function>`             |
//! | `List(t)`                  | `Vec<t>`, tree references unboxed        |
//! | `Optional(t)`              | `Option<t>`, tree references stay boxed  |
//!
//! Tree references go through `super::<unit>::` so every unit can name
//! every other unit's types the same way. Standard library types are fully
//! qualified so node kinds named `Box` or `Vec` cannot shadow them.

use proc_macro2::TokenStream;
use quote::quote;

use crate::error::EmitError;
use crate::grammar::{FieldType, Grammar};
use crate::naming::{type_ident, unit_ident};

/// Location of the field being emitted, for error reporting.
#[derive(Debug, Clone, Copy)]
pub struct FieldSite<'a> {
    pub category: &'a str,
    pub kind: &'a str,
    pub field: &'a str,
}

/// The stored Rust type for a field.
pub fn field_type_tokens(
    grammar: &Grammar,
    site: FieldSite<'_>,
    ty: &FieldType,
) -> Result<TokenStream, EmitError> {
    render(grammar, site, ty, true)
}

fn render(
    grammar: &Grammar,
    site: FieldSite<'_>,
    ty: &FieldType,
    boxed: bool,
) -> Result<TokenStream, EmitError> {
    match ty {
        FieldType::Value(raw) => {
            let parsed: syn::Type = syn::parse_str(raw).map_err(|e| EmitError::InvalidValueType {
                category: site.category.to_string(),
                kind: site.kind.to_string(),
                field: site.field.to_string(),
                ty: raw.clone(),
                reason: e.to_string(),
            })?;
            Ok(quote! { #parsed })
        },
        FieldType::Category(name) => {
            let category = grammar.category(name).ok_or_else(|| EmitError::UnknownCategory {
                category: site.category.to_string(),
                kind: site.kind.to_string(),
                field: site.field.to_string(),
                referenced: name.clone(),
            })?;
            let unit = unit_ident(&category.name);
            let base = type_ident(&category.name);
            Ok(box_if(quote! { super::#unit::#base }, boxed))
        },
        FieldType::Node { category, kind } => {
            let target = grammar
                .category(category)
                .and_then(|c| c.kind(kind))
                .ok_or_else(|| EmitError::UnknownNodeKind {
                    category: site.category.to_string(),
                    kind: site.kind.to_string(),
                    field: site.field.to_string(),
                    referenced_category: category.clone(),
                    referenced_kind: kind.clone(),
                })?;
            let unit = unit_ident(category);
            let node = type_ident(&target.name);
            Ok(box_if(quote! { super::#unit::#node }, boxed))
        },
        FieldType::List(inner) => {
            let inner = render(grammar, site, inner, false)?;
            Ok(quote! { ::std::vec::Vec<#inner> })
        },
        FieldType::Optional(inner) => {
            let inner = render(grammar, site, inner, boxed)?;
            Ok(quote! { ::std::option::Option<#inner> })
        },
    }
}

fn box_if(path: TokenStream, boxed: bool) -> TokenStream {
    if boxed {
        quote! { ::std::boxed::Box<#path> }
    } else {
        path
    }
}
