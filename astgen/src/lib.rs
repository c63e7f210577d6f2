//! # astgen: AST definition generator
//!
//! astgen turns one authoritative, in-memory grammar description into Rust
//! source for a syntax tree: a base enum per category, one node struct per
//! production, and a visitor trait per category that lets new tree
//! operations (printing, resolving, evaluating) be written without touching
//! the node types.
//!
//! ## Architecture
//!
//! ```text
//!  GrammarBuilder ──build()──▶ Grammar (validated, immutable)
//!                                 │
//!                ┌────────────────┴────────────────┐
//!                ▼                                 ▼
//!      nodes::generate_node_types      visitor::generate_visitor
//!      (base enum + node structs)      (one op per node kind)
//!                └────────────────┬────────────────┘
//!                                 ▼
//!                      pipeline::generate ──▶ Emission (unit → source)
//!                                 │
//!                                 ▼
//!                        sink::OutputSink (directory, memory)
//! ```
//!
//! Naming is centralised in [`naming`]: the node emitter and the visitor
//! emitter both derive the visitor operation for a node kind from
//! [`naming::visit_method_name`], which keeps every `accept` in bijection
//! with the visitor trait's operations.
//!
//! ## Example
//!
//! ```
//! use astgen::grammar::{Category, Field, FieldType, Grammar};
//!
//! let grammar = Grammar::builder()
//!     .import("crate::token::Token")
//!     .category(
//!         Category::new("Expr")
//!             .node("Literal", [Field::new("value", FieldType::value("f64"))])
//!             .node(
//!                 "Binary",
//!                 [
//!                     Field::new("left", FieldType::category("Expr")),
//!                     Field::new("operator", FieldType::value("Token")),
//!                     Field::new("right", FieldType::category("Expr")),
//!                 ],
//!             ),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let emission = astgen::generate(&grammar).unwrap();
//! let expr = emission.get("expr").unwrap();
//! assert!(expr.source.contains("visit_binary_expr"));
//! ```

pub mod error;
pub mod grammar;
pub mod lox;
pub mod naming;
pub mod nodes;
pub mod pipeline;
pub mod sink;
pub mod types;
mod validation;
pub mod visitor;

#[cfg(test)]
mod tests;

pub use error::{EmitError, Error, ModelError, Result, SinkError};
pub use grammar::{Category, Field, FieldType, Grammar, GrammarBuilder, NodeKind, ReferencePolicy};
pub use pipeline::{generate, Emission, Unit};
pub use sink::{DirectorySink, MemorySink, OutputSink};

/// Generate every unit for `grammar` and hand them to `sink`.
///
/// Emission finishes completely before the first unit is written, so an
/// emission failure never reaches the sink.
pub fn generate_to<S>(grammar: &Grammar, sink: &mut S) -> Result<Emission>
where
    S: OutputSink + ?Sized,
{
    let emission = generate(grammar)?;
    sink::write_all(&emission, sink)?;
    Ok(emission)
}
