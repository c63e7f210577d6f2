use std::collections::{BTreeMap, HashMap, HashSet};

use proc_macro2::{TokenStream, TokenTree};
use quote::ToTokens;

use crate::error::ModelError;
use crate::grammar::{Category, FieldType, GrammarBuilder, NodeKind, ReferencePolicy};
use crate::naming::{
    is_identifier, is_keyword, is_type_name, unit_name, visitor_trait_name, GENERIC_PARAMS, ROOT_UNIT,
};
use crate::types::FieldSite;

pub(crate) fn validate_grammar(builder: &GrammarBuilder) -> Result<(), ModelError> {
    validate_categories(&builder.categories)?;
    let imported = validate_imports(&builder.imports)?;

    for derive in &builder.derives {
        syn::parse_str::<syn::Path>(derive).map_err(|e| ModelError::InvalidDerive {
            derive: derive.clone(),
            reason: e.to_string(),
        })?;
    }

    // Index of every category, for reference and ordering checks
    let positions: HashMap<&str, usize> = builder
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.name.as_str(), i))
        .collect();

    for (index, category) in builder.categories.iter().enumerate() {
        validate_kinds(category)?;
        validate_shadowing(category, &imported)?;

        for kind in &category.kinds {
            validate_fields(category, kind)?;

            for field in &kind.fields {
                let site = FieldSite {
                    category: &category.name,
                    kind: &kind.name,
                    field: &field.name,
                };
                validate_field_type(&site, &field.ty, builder, &positions, index)?;
            }
        }
    }

    Ok(())
}

/// Parse every import; returns each name an import binds, mapped to the
/// import that binds it.
fn validate_imports(imports: &[String]) -> Result<BTreeMap<String, String>, ModelError> {
    let mut bound = BTreeMap::new();

    for import in imports {
        let tree = syn::parse_str::<syn::UseTree>(import).map_err(|e| ModelError::InvalidImport {
            import: import.clone(),
            reason: e.to_string(),
        })?;
        let mut names = Vec::new();
        bound_names(&tree, None, &mut names);
        for name in names {
            bound.entry(name).or_insert_with(|| import.clone());
        }
    }

    Ok(bound)
}

/// Names a use tree brings into scope. Globs bind nothing nameable.
fn bound_names(tree: &syn::UseTree, parent: Option<&syn::Ident>, out: &mut Vec<String>) {
    match tree {
        syn::UseTree::Path(path) => bound_names(&path.tree, Some(&path.ident), out),
        syn::UseTree::Name(name) if name.ident == "self" => {
            if let Some(parent) = parent {
                out.push(parent.to_string());
            }
        },
        syn::UseTree::Name(name) => out.push(name.ident.to_string()),
        syn::UseTree::Rename(rename) if rename.rename == "_" => {},
        syn::UseTree::Rename(rename) => out.push(rename.rename.to_string()),
        syn::UseTree::Glob(_) => {},
        syn::UseTree::Group(group) => {
            for item in &group.items {
                bound_names(item, parent, out);
            }
        },
    }
}

/// Types emitted into a category's unit may not take a name that an
/// import, or a value type of one of its fields, relies on. Otherwise the
/// local definition wins and the field silently changes type.
fn validate_shadowing(category: &Category, imported: &BTreeMap<String, String>) -> Result<(), ModelError> {
    let mut referenced: BTreeMap<String, String> = BTreeMap::new();
    for kind in &category.kinds {
        for field in &kind.fields {
            let FieldType::Value(raw) = field.ty.innermost() else { continue };
            // Unparsable types are reported by `validate_field_type`
            let Ok(ty) = syn::parse_str::<syn::Type>(raw) else { continue };
            let mut names = Vec::new();
            leading_idents(ty.to_token_stream(), &mut names);
            for name in names {
                referenced
                    .entry(name)
                    .or_insert_with(|| format!("value type `{}` of field '{}.{}'", raw, kind.name, field.name));
            }
        }
    }

    let visitor = visitor_trait_name(&category.name);
    let generated = std::iter::once(category.name.as_str())
        .chain(std::iter::once(visitor.as_str()))
        .chain(category.kinds.iter().map(|k| k.name.as_str()));

    for name in generated {
        let shadowed = imported
            .get(name)
            .map(|import| format!("import `{}`", import))
            .or_else(|| referenced.get(name).cloned());
        if let Some(shadowed) = shadowed {
            return Err(ModelError::ShadowedName {
                category: category.name.clone(),
                name: name.to_string(),
                shadowed,
            });
        }
    }

    Ok(())
}

/// Identifiers that start a path inside a type (`Vec` and `Token` in
/// `Vec<Token>`, `std` in `std::string::String`). Later path segments and
/// lifetimes are skipped.
fn leading_idents(tokens: TokenStream, out: &mut Vec<String>) {
    let mut prev: Option<char> = None;

    for token in tokens {
        match token {
            TokenTree::Ident(ident) => {
                if !matches!(prev, Some(':') | Some('\'')) {
                    out.push(ident.to_string());
                }
                prev = None;
            },
            TokenTree::Punct(punct) => prev = Some(punct.as_char()),
            TokenTree::Group(group) => {
                leading_idents(group.stream(), out);
                prev = None;
            },
            TokenTree::Literal(_) => prev = None,
        }
    }
}

/// Category names: well formed, unique, and not clashing with anything
/// generated at unit level.
fn validate_categories(categories: &[Category]) -> Result<(), ModelError> {
    let mut seen = HashSet::new();
    let mut units: HashMap<String, &str> = HashMap::new();

    for category in categories {
        let name = category.name.as_str();
        if !is_type_name(name) {
            return Err(ModelError::InvalidName {
                what: "category",
                name: name.to_string(),
            });
        }
        if GENERIC_PARAMS.contains(&name) {
            return Err(reserved(name, name, "generic parameter"));
        }
        if !seen.insert(name) {
            return Err(ModelError::DuplicateCategory {
                name: name.to_string(),
            });
        }

        let unit = unit_name(name);
        if unit == ROOT_UNIT || is_keyword(&unit) {
            return Err(reserved(name, name, &format!("module `{}`", unit)));
        }
        if let Some(first) = units.insert(unit.clone(), name) {
            return Err(ModelError::UnitCollision {
                first: first.to_string(),
                second: name.to_string(),
                unit,
            });
        }
    }

    // A category may not be named like another category's visitor trait
    let visitors: HashSet<String> = categories.iter().map(|c| visitor_trait_name(&c.name)).collect();
    if let Some(category) = categories.iter().find(|c| visitors.contains(&c.name)) {
        return Err(reserved(&category.name, &category.name, "visitor trait"));
    }

    Ok(())
}

fn validate_kinds(category: &Category) -> Result<(), ModelError> {
    let visitor = visitor_trait_name(&category.name);
    let mut seen = HashSet::new();

    for kind in &category.kinds {
        let name = kind.name.as_str();
        if !is_type_name(name) {
            return Err(ModelError::InvalidName {
                what: "node kind",
                name: name.to_string(),
            });
        }
        if name == category.name {
            return Err(reserved(&category.name, name, "base type"));
        }
        if name == visitor {
            return Err(reserved(&category.name, name, "visitor trait"));
        }
        if GENERIC_PARAMS.contains(&name) {
            return Err(reserved(&category.name, name, "generic parameter"));
        }
        if !seen.insert(name) {
            return Err(ModelError::DuplicateNodeKind {
                category: category.name.clone(),
                kind: name.to_string(),
            });
        }
    }

    Ok(())
}

fn validate_fields(category: &Category, kind: &NodeKind) -> Result<(), ModelError> {
    let mut seen = HashSet::new();

    for field in &kind.fields {
        if !is_identifier(&field.name) {
            return Err(ModelError::InvalidName {
                what: "field",
                name: field.name.clone(),
            });
        }
        if !seen.insert(field.name.as_str()) {
            return Err(ModelError::DuplicateField {
                category: category.name.clone(),
                kind: kind.name.clone(),
                field: field.name.clone(),
            });
        }
    }

    Ok(())
}

fn validate_field_type(
    site: &FieldSite<'_>,
    ty: &FieldType,
    builder: &GrammarBuilder,
    positions: &HashMap<&str, usize>,
    own_index: usize,
) -> Result<(), ModelError> {
    match ty {
        FieldType::Value(raw) => {
            syn::parse_str::<syn::Type>(raw).map_err(|e| ModelError::InvalidValueType {
                category: site.category.to_string(),
                kind: site.kind.to_string(),
                field: site.field.to_string(),
                ty: raw.clone(),
                reason: e.to_string(),
            })?;
            Ok(())
        },
        FieldType::Category(referenced) => {
            check_reference(site, referenced, builder.references, positions, own_index)
        },
        FieldType::Node { category, kind } => {
            check_reference(site, category, builder.references, positions, own_index)?;
            let target = &builder.categories[positions[category.as_str()]];
            if target.kind(kind).is_none() {
                return Err(ModelError::UnknownNodeKind {
                    category: site.category.to_string(),
                    kind: site.kind.to_string(),
                    field: site.field.to_string(),
                    referenced_category: category.clone(),
                    referenced_kind: kind.clone(),
                });
            }
            Ok(())
        },
        FieldType::List(inner) | FieldType::Optional(inner) => {
            validate_field_type(site, inner, builder, positions, own_index)
        },
    }
}

fn check_reference(
    site: &FieldSite<'_>,
    referenced: &str,
    policy: ReferencePolicy,
    positions: &HashMap<&str, usize>,
    own_index: usize,
) -> Result<(), ModelError> {
    let Some(&position) = positions.get(referenced) else {
        return Err(ModelError::UnknownCategory {
            category: site.category.to_string(),
            kind: site.kind.to_string(),
            field: site.field.to_string(),
            referenced: referenced.to_string(),
        });
    };

    if policy == ReferencePolicy::BackwardOnly && position > own_index {
        return Err(ModelError::ForwardReference {
            category: site.category.to_string(),
            kind: site.kind.to_string(),
            field: site.field.to_string(),
            referenced: referenced.to_string(),
        });
    }

    Ok(())
}

fn reserved(category: &str, name: &str, generated: &str) -> ModelError {
    ModelError::ReservedName {
        category: category.to_string(),
        name: name.to_string(),
        generated: generated.to_string(),
    }
}
