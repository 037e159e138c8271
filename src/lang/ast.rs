use super::Column;
use std::rc::Rc;

pub type Ident = Rc<str>;

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Assign(Column, Ident, Expression),
    Expression(Column, Expression),
    For(Column, Box<Statement>, Expression, Box<Statement>, Vec<Statement>),
    Function(Column, Ident, Vec<Ident>, Vec<Statement>),
    If(Column, Expression, Vec<Statement>, Vec<Statement>),
    Print(Column, Expression),
    Return(Column, Option<Expression>),
    While(Column, Expression, Vec<Statement>),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Integer(Column, i32),
    Var(Column, Ident),
    Call(Column, Ident, Vec<Expression>),
    Negation(Column, Box<Expression>),
    Not(Column, Box<Expression>),
    Multiply(Column, Box<Expression>, Box<Expression>),
    Divide(Column, Box<Expression>, Box<Expression>),
    Modulus(Column, Box<Expression>, Box<Expression>),
    Add(Column, Box<Expression>, Box<Expression>),
    Subtract(Column, Box<Expression>, Box<Expression>),
    Equal(Column, Box<Expression>, Box<Expression>),
    NotEqual(Column, Box<Expression>, Box<Expression>),
    Less(Column, Box<Expression>, Box<Expression>),
    LessEqual(Column, Box<Expression>, Box<Expression>),
    Greater(Column, Box<Expression>, Box<Expression>),
    GreaterEqual(Column, Box<Expression>, Box<Expression>),
    And(Column, Box<Expression>, Box<Expression>),
    Or(Column, Box<Expression>, Box<Expression>),
}

impl Statement {
    pub fn column(&self) -> &Column {
        use Statement::*;
        match self {
            Assign(col, ..) | Expression(col, ..) | For(col, ..) | Function(col, ..) => col,
            If(col, ..) | Print(col, ..) | Return(col, ..) | While(col, ..) => col,
        }
    }
}

impl Expression {
    pub fn column(&self) -> &Column {
        use Expression::*;
        match self {
            Integer(col, ..) | Var(col, ..) | Call(col, ..) | Negation(col, ..) | Not(col, ..) => {
                col
            }
            Multiply(col, ..)
            | Divide(col, ..)
            | Modulus(col, ..)
            | Add(col, ..)
            | Subtract(col, ..)
            | Equal(col, ..)
            | NotEqual(col, ..)
            | Less(col, ..)
            | LessEqual(col, ..)
            | Greater(col, ..)
            | GreaterEqual(col, ..)
            | And(col, ..)
            | Or(col, ..) => col,
        }
    }
}

pub trait Visitor {
    fn visit_statement(&mut self, _: &Statement) {}
    fn visit_expression(&mut self, _: &Expression) {}
}

/// Walks a subtree. Function bodies are their own scope and are not
/// entered from the enclosing statement list.
pub trait AcceptVisitor {
    fn accept<V: Visitor>(&self, visitor: &mut V);
}

impl AcceptVisitor for Statement {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        use Statement::*;
        match self {
            Function(..) => {}
            Assign(_, _, expr) | Expression(_, expr) | Print(_, expr) => {
                expr.accept(visitor);
            }
            Return(_, expr) => {
                if let Some(expr) = expr {
                    expr.accept(visitor);
                }
            }
            For(_, init, predicate, step, vec_stmt) => {
                init.accept(visitor);
                predicate.accept(visitor);
                step.accept(visitor);
                for stmt in vec_stmt {
                    stmt.accept(visitor);
                }
            }
            If(_, predicate, vec_stmt1, vec_stmt2) => {
                predicate.accept(visitor);
                for stmt in vec_stmt1 {
                    stmt.accept(visitor);
                }
                for stmt in vec_stmt2 {
                    stmt.accept(visitor);
                }
            }
            While(_, predicate, vec_stmt) => {
                predicate.accept(visitor);
                for stmt in vec_stmt {
                    stmt.accept(visitor);
                }
            }
        }
        visitor.visit_statement(self)
    }
}

impl AcceptVisitor for Expression {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        use Expression::*;
        match self {
            Integer(..) | Var(..) => {}
            Call(_, _, vec_expr) => {
                for expr in vec_expr {
                    expr.accept(visitor);
                }
            }
            Negation(_, expr) | Not(_, expr) => expr.accept(visitor),
            Multiply(_, expr1, expr2)
            | Divide(_, expr1, expr2)
            | Modulus(_, expr1, expr2)
            | Add(_, expr1, expr2)
            | Subtract(_, expr1, expr2)
            | Equal(_, expr1, expr2)
            | NotEqual(_, expr1, expr2)
            | Less(_, expr1, expr2)
            | LessEqual(_, expr1, expr2)
            | Greater(_, expr1, expr2)
            | GreaterEqual(_, expr1, expr2)
            | And(_, expr1, expr2)
            | Or(_, expr1, expr2) => {
                expr1.accept(visitor);
                expr2.accept(visitor);
            }
        }
        visitor.visit_expression(self)
    }
}
