//! Renders Lox trees as parenthesized prefix expressions.
//!
//! ```text
//! -123 * (45.67)   ──▶   (* (- 123.0) (group 45.67))
//! ```

use crate::expr::{self, Expr, ExprVisitor};
use crate::stmt::{self, Stmt, StmtVisitor};

#[derive(Debug, Default)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn new() -> Self {
        AstPrinter
    }

    pub fn print_expr(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    pub fn print_stmt(&mut self, stmt: &Stmt) -> String {
        stmt.accept(self)
    }

    fn parenthesize<'a>(&mut self, name: &str, exprs: impl IntoIterator<Item = &'a Expr>) -> String {
        let mut out = format!("({name}");
        for expr in exprs {
            out.push(' ');
            out.push_str(&expr.accept(self));
        }
        out.push(')');
        out
    }

    fn parenthesize_parts(name: &str, parts: impl IntoIterator<Item = String>) -> String {
        let mut out = format!("({name}");
        for part in parts {
            out.push(' ');
            out.push_str(&part);
        }
        out.push(')');
        out
    }
}

impl ExprVisitor<String> for AstPrinter {
    fn visit_assign_expr(&mut self, expr: &expr::Assign) -> String {
        let value = expr.value.accept(self);
        Self::parenthesize_parts("=", [expr.name.lexeme.clone(), value])
    }

    fn visit_binary_expr(&mut self, expr: &expr::Binary) -> String {
        self.parenthesize(&expr.operator.lexeme, [&*expr.left, &*expr.right])
    }

    fn visit_call_expr(&mut self, expr: &expr::Call) -> String {
        self.parenthesize("call", std::iter::once(&*expr.callee).chain(&expr.arguments))
    }

    fn visit_get_expr(&mut self, expr: &expr::Get) -> String {
        let object = expr.object.accept(self);
        Self::parenthesize_parts(".", [object, expr.name.lexeme.clone()])
    }

    fn visit_grouping_expr(&mut self, expr: &expr::Grouping) -> String {
        self.parenthesize("group", [&*expr.expression])
    }

    fn visit_literal_expr(&mut self, expr: &expr::Literal) -> String {
        match &expr.value {
            Some(value) => value.to_string(),
            None => "nil".to_string(),
        }
    }

    fn visit_logical_expr(&mut self, expr: &expr::Logical) -> String {
        self.parenthesize(&expr.operator.lexeme, [&*expr.left, &*expr.right])
    }

    fn visit_set_expr(&mut self, expr: &expr::Set) -> String {
        let object = expr.object.accept(self);
        let value = expr.value.accept(self);
        Self::parenthesize_parts("=", [
            Self::parenthesize_parts(".", [object, expr.name.lexeme.clone()]),
            value,
        ])
    }

    fn visit_super_expr(&mut self, expr: &expr::Super) -> String {
        Self::parenthesize_parts("super", [expr.method.lexeme.clone()])
    }

    fn visit_this_expr(&mut self, _expr: &expr::This) -> String {
        "this".to_string()
    }

    fn visit_unary_expr(&mut self, expr: &expr::Unary) -> String {
        self.parenthesize(&expr.operator.lexeme, [&*expr.right])
    }

    fn visit_variable_expr(&mut self, expr: &expr::Variable) -> String {
        expr.name.lexeme.clone()
    }
}

impl StmtVisitor<String> for AstPrinter {
    fn visit_block_stmt(&mut self, stmt: &stmt::Block) -> String {
        let body: Vec<String> = stmt.statements.iter().map(|s| s.accept(self)).collect();
        Self::parenthesize_parts("block", body)
    }

    fn visit_class_stmt(&mut self, stmt: &stmt::Class) -> String {
        let mut parts = vec![stmt.name.lexeme.clone()];
        if let Some(superclass) = &stmt.superclass {
            parts.push("<".to_string());
            parts.push(self.visit_variable_expr(superclass));
        }
        for method in &stmt.methods {
            parts.push(self.visit_function_stmt(method));
        }
        Self::parenthesize_parts("class", parts)
    }

    fn visit_expression_stmt(&mut self, stmt: &stmt::Expression) -> String {
        self.parenthesize(";", [&*stmt.expression])
    }

    fn visit_function_stmt(&mut self, stmt: &stmt::Function) -> String {
        let params: Vec<&str> = stmt.params.iter().map(|p| p.lexeme.as_str()).collect();
        let params = format!("({})", params.join(" "));

        let mut parts = vec![stmt.name.lexeme.clone(), params];
        parts.extend(stmt.body.iter().map(|s| s.accept(self)));
        Self::parenthesize_parts("fun", parts)
    }

    fn visit_if_stmt(&mut self, stmt: &stmt::If) -> String {
        let mut parts = vec![stmt.condition.accept(self), stmt.then_branch.accept(self)];
        if let Some(else_branch) = &stmt.else_branch {
            parts.push(else_branch.accept(self));
        }
        Self::parenthesize_parts("if", parts)
    }

    fn visit_print_stmt(&mut self, stmt: &stmt::Print) -> String {
        self.parenthesize("print", [&*stmt.expression])
    }

    fn visit_return_stmt(&mut self, stmt: &stmt::Return) -> String {
        self.parenthesize("return", stmt.value.as_deref())
    }

    fn visit_var_stmt(&mut self, stmt: &stmt::Var) -> String {
        let mut parts = vec![stmt.name.lexeme.clone()];
        if let Some(initializer) = &stmt.initializer {
            parts.push("=".to_string());
            parts.push(initializer.accept(self));
        }
        Self::parenthesize_parts("var", parts)
    }

    fn visit_while_stmt(&mut self, stmt: &stmt::While) -> String {
        let condition = stmt.condition.accept(self);
        let body = stmt.body.accept(self);
        Self::parenthesize_parts("while", [condition, body])
    }
}
