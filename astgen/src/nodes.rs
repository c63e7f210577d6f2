//! Node type emission.
//!
//! For a category `Expr` this produces the base enum `Expr`, one struct per
//! node kind, the `From` conversions into the base enum, and the `accept`
//! methods that perform double dispatch into `ExprVisitor`.

use std::collections::HashMap;

use proc_macro2::{Ident, TokenStream};
use quote::quote;

use crate::error::EmitError;
use crate::grammar::{Category, Grammar, NodeKind};
use crate::naming::{to_snake_case, type_ident, value_ident, visit_method_ident, visitor_trait_name};
use crate::types::{field_type_tokens, FieldSite};

/// Emit the base enum and every node struct of `category`.
#[tracing::instrument(level = "debug", skip_all, fields(category = %category.name))]
pub fn generate_node_types(grammar: &Grammar, category: &Category) -> Result<TokenStream, EmitError> {
    let base = type_ident(&category.name);
    let visitor = type_ident(&visitor_trait_name(&category.name));
    let derives = derive_attribute(grammar)?;
    let kinds: Vec<Ident> = category.kinds.iter().map(|k| type_ident(&k.name)).collect();

    let structs = category
        .kinds
        .iter()
        .map(|kind| generate_concrete_type(grammar, category, kind, &derives))
        .collect::<Result<Vec<_>, _>>()?;

    let base_doc = format!(" Any `{}` node. Dispatch on it with [`{}`].", category.name, visitor);

    Ok(quote! {
        #[doc = #base_doc]
        #derives
        pub enum #base {
            #(#kinds(#kinds),)*
        }

        impl #base {
            /// Call the visitor operation for the wrapped node kind.
            pub fn accept<R, V: #visitor<R> + ?Sized>(&self, visitor: &mut V) -> R {
                match *self {
                    #(Self::#kinds(ref node) => node.accept(visitor),)*
                }
            }
        }

        #(
            impl ::std::convert::From<#kinds> for #base {
                fn from(node: #kinds) -> Self {
                    Self::#kinds(node)
                }
            }
        )*

        #(#structs)*
    })
}

fn generate_concrete_type(
    grammar: &Grammar,
    category: &Category,
    kind: &NodeKind,
    derives: &TokenStream,
) -> Result<TokenStream, EmitError> {
    let name = type_ident(&kind.name);
    let visitor = type_ident(&visitor_trait_name(&category.name));
    let method = visit_method_ident(&kind.name, &category.name);
    let fields = field_idents(category, kind)?;

    let types = kind
        .fields
        .iter()
        .map(|field| {
            let site = FieldSite {
                category: &category.name,
                kind: &kind.name,
                field: &field.name,
            };
            field_type_tokens(grammar, site, &field.ty)
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::trace!(kind = %kind.name, fields = fields.len(), "emitting node type");

    Ok(quote! {
        #derives
        pub struct #name {
            #(pub #fields: #types,)*
        }

        impl #name {
            #[allow(clippy::too_many_arguments, clippy::new_without_default)]
            pub fn new(#(#fields: #types),*) -> Self {
                Self { #(#fields),* }
            }

            pub fn accept<R, V: #visitor<R> + ?Sized>(&self, visitor: &mut V) -> R {
                visitor.#method(self)
            }
        }
    })
}

/// Field identifiers in declaration order; two fields may not normalize
/// to the same identifier.
fn field_idents(category: &Category, kind: &NodeKind) -> Result<Vec<Ident>, EmitError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut idents = Vec::with_capacity(kind.fields.len());

    for field in &kind.fields {
        let normalized = to_snake_case(&field.name);
        let ident = value_ident(&field.name).ok_or_else(|| EmitError::UnusableFieldName {
            category: category.name.clone(),
            kind: kind.name.clone(),
            field: field.name.clone(),
            normalized: normalized.clone(),
        })?;

        if let Some(first) = seen.insert(normalized.clone(), &field.name) {
            return Err(EmitError::FieldCollision {
                category: category.name.clone(),
                kind: kind.name.clone(),
                first: first.to_string(),
                second: field.name.clone(),
                normalized,
            });
        }

        idents.push(ident);
    }

    Ok(idents)
}

/// `#[derive(...)]` for the grammar's derive list, or nothing.
fn derive_attribute(grammar: &Grammar) -> Result<TokenStream, EmitError> {
    if grammar.derives().is_empty() {
        return Ok(TokenStream::new());
    }

    let paths = grammar
        .derives()
        .iter()
        .map(|derive| {
            syn::parse_str::<syn::Path>(derive).map_err(|e| EmitError::InvalidDerive {
                derive: derive.clone(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(quote! { #[derive(#(#paths),*)] })
}
