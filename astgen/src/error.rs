//! Error types for each generation stage.
//!
//! - [`ModelError`]: the grammar breaks a structural invariant; raised by
//!   [`GrammarBuilder::build`](crate::grammar::GrammarBuilder::build).
//! - [`EmitError`]: an inconsistency only visible while emitting code.
//! - [`SinkError`]: a unit could not be persisted.
//!
//! All three are fatal for the run that raised them.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The grammar violates one of its structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{what} name '{name}' is not a valid Rust identifier")]
    InvalidName { what: &'static str, name: String },

    #[error("category '{name}' is declared more than once")]
    DuplicateCategory { name: String },

    #[error("node kind '{kind}' is declared more than once in category '{category}'")]
    DuplicateNodeKind { category: String, kind: String },

    #[error("field '{field}' is declared more than once in '{category}.{kind}'")]
    DuplicateField {
        category: String,
        kind: String,
        field: String,
    },

    #[error("field '{category}.{kind}.{field}' references unknown category '{referenced}'")]
    UnknownCategory {
        category: String,
        kind: String,
        field: String,
        referenced: String,
    },

    #[error(
        "field '{category}.{kind}.{field}' references unknown node kind \
         '{referenced_category}.{referenced_kind}'"
    )]
    UnknownNodeKind {
        category: String,
        kind: String,
        field: String,
        referenced_category: String,
        referenced_kind: String,
    },

    #[error(
        "field '{category}.{kind}.{field}' references category '{referenced}', \
         which is declared later and forward references are disabled"
    )]
    ForwardReference {
        category: String,
        kind: String,
        field: String,
        referenced: String,
    },

    #[error("name '{name}' in category '{category}' collides with the generated {generated}")]
    ReservedName {
        category: String,
        name: String,
        generated: String,
    },

    #[error("type '{name}' generated for category '{category}' would shadow {shadowed}")]
    ShadowedName {
        category: String,
        name: String,
        shadowed: String,
    },

    #[error("categories '{first}' and '{second}' both map to unit '{unit}'")]
    UnitCollision {
        first: String,
        second: String,
        unit: String,
    },

    #[error("field '{category}.{kind}.{field}' has an invalid type `{ty}`: {reason}")]
    InvalidValueType {
        category: String,
        kind: String,
        field: String,
        ty: String,
        reason: String,
    },

    #[error("import `{import}` is not a valid use tree: {reason}")]
    InvalidImport { import: String, reason: String },

    #[error("derive `{derive}` is not a valid path: {reason}")]
    InvalidDerive { derive: String, reason: String },
}

/// An inconsistency discovered while emitting a category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    #[error(
        "field '{category}.{kind}.{field}' references category '{referenced}', \
         which is not part of the grammar"
    )]
    UnknownCategory {
        category: String,
        kind: String,
        field: String,
        referenced: String,
    },

    #[error(
        "field '{category}.{kind}.{field}' references node kind \
         '{referenced_category}.{referenced_kind}', which is not part of the grammar"
    )]
    UnknownNodeKind {
        category: String,
        kind: String,
        field: String,
        referenced_category: String,
        referenced_kind: String,
    },

    #[error("fields '{first}' and '{second}' of '{category}.{kind}' both normalize to `{normalized}`")]
    FieldCollision {
        category: String,
        kind: String,
        first: String,
        second: String,
        normalized: String,
    },

    #[error(
        "field '{category}.{kind}.{field}' normalizes to `{normalized}`, \
         which cannot be written as a Rust identifier"
    )]
    UnusableFieldName {
        category: String,
        kind: String,
        field: String,
        normalized: String,
    },

    #[error(
        "node kinds '{first}' and '{second}' of category '{category}' both map to \
         visitor operation `{method}`"
    )]
    VisitMethodCollision {
        category: String,
        first: String,
        second: String,
        method: String,
    },

    #[error("field '{category}.{kind}.{field}' has an invalid type `{ty}`: {reason}")]
    InvalidValueType {
        category: String,
        kind: String,
        field: String,
        ty: String,
        reason: String,
    },

    #[error("import `{import}` is not a valid use tree: {reason}")]
    InvalidImport { import: String, reason: String },

    #[error("derive `{derive}` is not a valid path: {reason}")]
    InvalidDerive { derive: String, reason: String },
}

/// A generated unit could not be persisted.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write unit '{unit}' to {}: {source}", path.display())]
    Write {
        unit: String,
        path: PathBuf,
        source: io::Error,
    },
}

/// Any failure of a generation run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid grammar: {0}")]
    Model(#[from] ModelError),

    #[error("code emission failed: {0}")]
    Emit(#[from] EmitError),

    #[error("writing generated code failed: {0}")]
    Sink(#[from] SinkError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
