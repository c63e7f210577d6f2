//! The Lox syntax tree, generated at build time by `astgen`.
//!
//! `build.rs` writes one unit per category plus the root `mod.rs` into
//! `$OUT_DIR/ast`, and the root unit is mounted here as module [`ast`].
//! [`printer::AstPrinter`] walks both trees through the generated visitor
//! traits.

pub mod printer;
pub mod token;

include!(concat!(env!("OUT_DIR"), "/ast_module.rs"));

pub use ast::{expr, stmt, Expr, ExprVisitor, Stmt, StmtVisitor};
pub use printer::AstPrinter;
pub use token::{Object, Token, TokenType};
