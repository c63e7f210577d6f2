//! Emission driver.
//!
//! Runs the node and visitor emitters over every category and assembles the
//! results into an [`Emission`]: one [`Unit`] per category, in declaration
//! order, followed by the root unit that declares them as modules.
//!
//! ```text
//! Grammar ──→ for each category ──→ imports + node types + visitor ──→ Unit
//!         └─→ root unit (pub mod …; pub use …;) ─────────────────────→ Unit
//! ```
//!
//! Generation is a pure function of the grammar: the same grammar always
//! yields byte-identical units, and a unit depends only on its own category
//! (plus the grammar-wide imports and derives).

use proc_macro2::TokenStream;
use quote::quote;

use crate::error::EmitError;
use crate::grammar::{Category, Grammar};
use crate::naming::{file_name, type_ident, unit_ident, unit_name, visitor_trait_name, ROOT_UNIT};
use crate::nodes::generate_node_types;
use crate::visitor::generate_visitor;

/// First line of every generated unit.
pub const GENERATED_HEADER: &str = "// @generated by astgen. Do not edit by hand.";

/// One generated compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Module name: the snake-cased category, or `mod` for the root unit.
    pub name: String,
    pub source: String,
}

impl Unit {
    pub fn file_name(&self) -> String {
        file_name(&self.name)
    }
}

/// The complete output of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Emission {
    units: Vec<Unit>,
}

impl Emission {
    /// Units in emission order; the root unit is last.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|u| u.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn into_units(self) -> Vec<Unit> {
        self.units
    }
}

impl<'a> IntoIterator for &'a Emission {
    type Item = &'a Unit;
    type IntoIter = std::slice::Iter<'a, Unit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}

/// Generate every unit for `grammar`.
///
/// Stops at the first error; no partial emission is ever returned.
#[tracing::instrument(level = "debug", skip_all, fields(categories = grammar.categories().len()))]
pub fn generate(grammar: &Grammar) -> Result<Emission, EmitError> {
    let mut units = Vec::with_capacity(grammar.categories().len() + 1);

    for category in grammar.categories() {
        let source = generate_category_unit(grammar, category)?;
        tracing::debug!(category = %category.name, bytes = source.len(), "emitted category unit");
        units.push(Unit {
            name: unit_name(&category.name),
            source,
        });
    }

    units.push(Unit {
        name: ROOT_UNIT.to_string(),
        source: generate_root_unit(grammar),
    });

    tracing::info!(units = units.len(), "generation complete");
    Ok(Emission { units })
}

/// Source text of the unit holding `category`.
pub fn generate_category_unit(grammar: &Grammar, category: &Category) -> Result<String, EmitError> {
    let imports = generate_imports(grammar)?;
    let nodes = generate_node_types(grammar, category)?;
    let visitor = generate_visitor(category)?;

    Ok(render(quote! {
        #imports
        #nodes
        #visitor
    }))
}

/// Source text of the root unit: a module per category, plus re-exports of
/// each base type and visitor trait.
pub fn generate_root_unit(grammar: &Grammar) -> String {
    let categories = grammar.categories();
    let modules: Vec<_> = categories.iter().map(|c| unit_ident(&c.name)).collect();
    let bases: Vec<_> = categories.iter().map(|c| type_ident(&c.name)).collect();
    let visitors: Vec<_> = categories
        .iter()
        .map(|c| type_ident(&visitor_trait_name(&c.name)))
        .collect();

    render(quote! {
        #(pub mod #modules;)*

        #(pub use self::#modules::{#bases, #visitors};)*
    })
}

fn generate_imports(grammar: &Grammar) -> Result<TokenStream, EmitError> {
    let trees = grammar
        .imports()
        .iter()
        .map(|import| {
            syn::parse_str::<syn::UseTree>(import).map_err(|e| EmitError::InvalidImport {
                import: import.clone(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(quote! {
        #(
            #[allow(unused_imports)]
            use #trees;
        )*
    })
}

fn render(tokens: TokenStream) -> String {
    format!("{}\n{}\n", GENERATED_HEADER, tokens)
}
