//! The Lox syntax tree.
//!
//! Expressions and statements of the Lox language as used by a tree-walking
//! interpreter. Both categories expect a `Token` type and a literal value
//! type `Object` in scope; by default they are imported from
//! `crate::token`.

use crate::error::ModelError;
use crate::grammar::{Category, Field, FieldType, Grammar, GrammarBuilder};

/// Default `use` trees for the Lox units.
pub const DEFAULT_IMPORTS: &[&str] = &["crate::token::Token", "crate::token::Object"];

/// A builder preloaded with the Lox categories and default imports, ready
/// for further configuration.
pub fn builder() -> GrammarBuilder {
    Grammar::builder()
        .imports(DEFAULT_IMPORTS.iter().copied())
        .category(expr())
        .category(stmt())
}

/// The Lox grammar with default settings.
pub fn grammar() -> Result<Grammar, ModelError> {
    builder().build()
}

fn token() -> FieldType {
    FieldType::value("Token")
}

fn expr_ref() -> FieldType {
    FieldType::category("Expr")
}

fn stmt_ref() -> FieldType {
    FieldType::category("Stmt")
}

fn expr() -> Category {
    Category::new("Expr")
        .node("Assign", [Field::new("name", token()), Field::new("value", expr_ref())])
        .node(
            "Binary",
            [
                Field::new("left", expr_ref()),
                Field::new("operator", token()),
                Field::new("right", expr_ref()),
            ],
        )
        .node(
            "Call",
            [
                Field::new("callee", expr_ref()),
                Field::new("paren", token()),
                Field::new("arguments", expr_ref().list()),
            ],
        )
        .node("Get", [Field::new("object", expr_ref()), Field::new("name", token())])
        .node("Grouping", [Field::new("expression", expr_ref())])
        .node("Literal", [Field::new("value", FieldType::value("Object").optional())])
        .node(
            "Logical",
            [
                Field::new("left", expr_ref()),
                Field::new("operator", token()),
                Field::new("right", expr_ref()),
            ],
        )
        .node(
            "Set",
            [
                Field::new("object", expr_ref()),
                Field::new("name", token()),
                Field::new("value", expr_ref()),
            ],
        )
        .node("Super", [Field::new("keyword", token()), Field::new("method", token())])
        .node("This", [Field::new("keyword", token())])
        .node("Unary", [Field::new("operator", token()), Field::new("right", expr_ref())])
        .node("Variable", [Field::new("name", token())])
}

fn stmt() -> Category {
    Category::new("Stmt")
        .node("Block", [Field::new("statements", stmt_ref().list())])
        .node(
            "Class",
            [
                Field::new("name", token()),
                Field::new("superclass", FieldType::node("Expr", "Variable").optional()),
                Field::new("methods", FieldType::node("Stmt", "Function").list()),
            ],
        )
        .node("Expression", [Field::new("expression", expr_ref())])
        .node(
            "Function",
            [
                Field::new("name", token()),
                Field::new("params", token().list()),
                Field::new("body", stmt_ref().list()),
            ],
        )
        .node(
            "If",
            [
                Field::new("condition", expr_ref()),
                Field::new("thenBranch", stmt_ref()),
                Field::new("elseBranch", stmt_ref().optional()),
            ],
        )
        .node("Print", [Field::new("expression", expr_ref())])
        .node("Return", [Field::new("keyword", token()), Field::new("value", expr_ref().optional())])
        .node("Var", [Field::new("name", token()), Field::new("initializer", expr_ref().optional())])
        .node("While", [Field::new("condition", expr_ref()), Field::new("body", stmt_ref())])
}
