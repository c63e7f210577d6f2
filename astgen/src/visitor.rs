//! Visitor trait emission.

use std::collections::HashMap;

use proc_macro2::TokenStream;
use quote::quote;

use crate::error::EmitError;
use crate::grammar::Category;
use crate::naming::{type_ident, visit_method_ident, visit_method_name, visitor_param, visitor_trait_name};

/// Emit `<Category>Visitor<R>` with one operation per node kind.
///
/// Operation names come from [`visit_method_name`], the same rule the node
/// emitter uses for `accept`. Two node kinds that map to the same operation
/// would break the one-to-one pairing and are rejected.
#[tracing::instrument(level = "debug", skip_all, fields(category = %category.name))]
pub fn generate_visitor(category: &Category) -> Result<TokenStream, EmitError> {
    let visitor = type_ident(&visitor_trait_name(&category.name));
    let param = visitor_param(&category.name);

    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut operations = Vec::with_capacity(category.kinds.len());

    for kind in &category.kinds {
        let method = visit_method_name(&kind.name, &category.name);
        if let Some(first) = seen.insert(method.clone(), &kind.name) {
            return Err(EmitError::VisitMethodCollision {
                category: category.name.clone(),
                first: first.to_string(),
                second: kind.name.clone(),
                method,
            });
        }

        let method = visit_method_ident(&kind.name, &category.name);
        let node = type_ident(&kind.name);
        operations.push(quote! {
            fn #method(&mut self, #param: &#node) -> R;
        });
    }

    let doc = format!(
        " One operation per `{}` node kind, each producing an `R`.",
        category.name
    );

    Ok(quote! {
        #[doc = #doc]
        pub trait #visitor<R> {
            #(#operations)*
        }
    })
}

/// Names of the operations [`generate_visitor`] declares, in order.
pub fn visitor_operations(category: &Category) -> Vec<String> {
    category
        .kinds
        .iter()
        .map(|kind| visit_method_name(&kind.name, &category.name))
        .collect()
}
