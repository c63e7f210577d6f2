//! Deterministic naming rules.
//!
//! Every identifier that appears in generated code is derived from grammar
//! names through this module. In particular the visitor operation for a
//! node kind is always [`visit_method_name`], whether it is being declared
//! on the visitor trait or called from a node's `accept`.

use proc_macro2::{Ident, Span};

/// Keywords in the 2021 edition, strict and reserved.
const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield", "gen",
];

/// Keywords that cannot be escaped as raw identifiers.
const UNESCAPABLE: &[&str] = &["crate", "self", "Self", "super", "_"];

/// Generic parameter names used by the emitted `accept` methods and
/// visitor traits. Type names equal to these would be shadowed.
pub const GENERIC_PARAMS: &[&str] = &["R", "V"];

/// Name of the unit that declares one module per category.
pub const ROOT_UNIT: &str = "mod";

/// Fallback visitor parameter name.
const NODE_PARAM: &str = "node";

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// ASCII identifier check: a letter or `_` followed by letters, digits or
/// `_`. A lone `_` is not an identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {},
        _ => return false,
    }
    name != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether `name` can name a generated type (category or node kind).
pub fn is_type_name(name: &str) -> bool {
    is_identifier(name) && !is_keyword(name)
}

/// Convert `UpperCamel` or `lowerCamel` to `snake_case`.
///
/// Acronyms stay together: `HTTPRequest` becomes `http_request`.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
                if prev.is_ascii_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_ascii_uppercase() && next_is_lower)
                {
                    out.push('_');
                }
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// The visitor operation that handles `kind` in `category`.
///
/// `visit_` + snake(kind) + `_` + snake(category), e.g. `Binary` in `Expr`
/// is handled by `visit_binary_expr`.
pub fn visit_method_name(kind: &str, category: &str) -> String {
    format!("visit_{}_{}", to_snake_case(kind), to_snake_case(category))
}

/// The visitor trait for `category`, e.g. `ExprVisitor`.
pub fn visitor_trait_name(category: &str) -> String {
    format!("{}Visitor", category)
}

/// The unit (and module) holding `category`'s definitions.
pub fn unit_name(category: &str) -> String {
    to_snake_case(category)
}

/// File name a unit is written to.
pub fn file_name(unit: &str) -> String {
    format!("{}.rs", unit)
}

/// Identifier for an already validated type name.
pub(crate) fn type_ident(name: &str) -> Ident {
    Ident::new(name, Span::call_site())
}

/// Snake-cased identifier for a value-level name.
///
/// Keywords become raw identifiers (`type` → `r#type`). Returns `None` when
/// the name has no identifier spelling at all.
pub fn value_ident(name: &str) -> Option<Ident> {
    let snake = to_snake_case(name);
    if !is_identifier(&snake) || UNESCAPABLE.contains(&snake.as_str()) {
        return None;
    }
    if is_keyword(&snake) {
        Some(Ident::new_raw(&snake, Span::call_site()))
    } else {
        Some(Ident::new(&snake, Span::call_site()))
    }
}

/// Parameter name used in visitor operations: the snake-cased category, or
/// `node` if that is not usable.
pub(crate) fn visitor_param(category: &str) -> Ident {
    value_ident(category).unwrap_or_else(|| Ident::new(NODE_PARAM, Span::call_site()))
}

/// Identifier for a category's unit module.
pub(crate) fn unit_ident(category: &str) -> Ident {
    Ident::new(&unit_name(category), Span::call_site())
}

/// Identifier for a visitor operation.
pub(crate) fn visit_method_ident(kind: &str, category: &str) -> Ident {
    Ident::new(&visit_method_name(kind, category), Span::call_site())
}
