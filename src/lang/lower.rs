use super::ast::{Expression, Ident, Statement};
use super::grammar::RuleId;
use super::parse::Node;
use super::token::TokenKind;
use super::{Column, Error};
use crate::error;

type Result<T> = std::result::Result<T, Error>;

/// Converts the generic parse tree into the typed syntax tree.
///
/// Statement chains are flattened into vectors and right-leaning chains
/// of equal-precedence operators are rotated to associate left to right.
pub fn lower(node: &Node) -> Result<Vec<Statement>> {
    block(node)
}

fn unexpected(node: &Node) -> Error {
    error!(InternalError, ..node.column(); &format!("UNEXPECTED {}", node.rule().name()))
}

fn child<'a, 'g>(node: &'a Node<'g>, index: usize) -> Result<&'a Node<'g>> {
    node.child(index).ok_or_else(|| unexpected(node))
}

fn name(node: &Node) -> Result<Ident> {
    match node.operator() {
        Some(token) if token.kind() == TokenKind::Ref => Ok(token.text().into()),
        _ => Err(unexpected(node)),
    }
}

fn block(node: &Node) -> Result<Vec<Statement>> {
    let mut statements = vec![];
    let mut next = Some(node);
    while let Some(node) = next {
        next = match node.id() {
            RuleId::CodeBlock => {
                if node.children().is_empty() {
                    None
                } else {
                    let (statement, rest) = construct(child(node, 0)?)?;
                    statements.push(statement);
                    rest
                }
            }
            RuleId::Lines => {
                statements.push(line(child(node, 0)?)?);
                node.child(1)
            }
            _ => {
                let (statement, rest) = construct(node)?;
                statements.push(statement);
                rest
            }
        }
    }
    Ok(statements)
}

/// A compound statement and the code block following it, if any.
fn construct<'a, 'g>(node: &'a Node<'g>) -> Result<(Statement, Option<&'a Node<'g>>)> {
    let column = node.column().clone();
    match node.id() {
        RuleId::If => {
            let predicate = expression(child(node, 0)?)?;
            let then = block(child(node, 1)?)?;
            match node.child(2) {
                Some(third) if third.id() == RuleId::Else => {
                    let otherwise = block(child(third, 0)?)?;
                    let statement = Statement::If(column, predicate, then, otherwise);
                    Ok((statement, third.child(1)))
                }
                rest => Ok((Statement::If(column, predicate, then, vec![]), rest)),
            }
        }
        RuleId::While => {
            let predicate = expression(child(node, 0)?)?;
            let body = block(child(node, 1)?)?;
            Ok((Statement::While(column, predicate, body), node.child(2)))
        }
        RuleId::For => {
            let init = assign(child(node, 0)?)?;
            let predicate = expression(child(node, 1)?)?;
            let step = assign(child(node, 2)?)?;
            let body = block(child(node, 3)?)?;
            let statement = Statement::For(column, Box::new(init), predicate, Box::new(step), body);
            Ok((statement, node.child(4)))
        }
        RuleId::Function => {
            let mut params = vec![];
            parameters(child(node, 0)?, &mut params)?;
            let body = block(child(node, 1)?)?;
            let statement = Statement::Function(column, name(node)?, params, body);
            Ok((statement, node.child(2)))
        }
        _ => Err(unexpected(node)),
    }
}

fn parameters(node: &Node, params: &mut Vec<Ident>) -> Result<()> {
    for child in node.children() {
        match child.id() {
            RuleId::Ref => params.push(child.text().into()),
            RuleId::ArgsDec => parameters(child, params)?,
            _ => return Err(unexpected(child)),
        }
    }
    Ok(())
}

fn arguments(node: &Node, args: &mut Vec<Expression>) -> Result<()> {
    if node.id() != RuleId::Args {
        args.push(expression(node)?);
        return Ok(());
    }
    for child in node.children() {
        arguments(child, args)?;
    }
    Ok(())
}

fn line(node: &Node) -> Result<Statement> {
    let column = node.column().clone();
    match node.id() {
        RuleId::Assign => assign(node),
        RuleId::Print => Ok(Statement::Print(column, expression(child(node, 0)?)?)),
        RuleId::Ret => match node.child(0) {
            Some(value) => Ok(Statement::Return(column, Some(expression(value)?))),
            None => Ok(Statement::Return(column, None)),
        },
        _ => Ok(Statement::Expression(column, expression(node)?)),
    }
}

fn assign(node: &Node) -> Result<Statement> {
    if node.id() != RuleId::Assign {
        return Err(unexpected(node));
    }
    let target = child(node, 0)?;
    let value = expression(child(node, 1)?)?;
    Ok(Statement::Assign(
        node.column().clone(),
        target.text().into(),
        value,
    ))
}

fn expression(node: &Node) -> Result<Expression> {
    let column = node.column().clone();
    match node.id() {
        RuleId::Or
        | RuleId::And
        | RuleId::Equality
        | RuleId::Comparison
        | RuleId::Sum
        | RuleId::Product => binary(node),
        RuleId::Unary => {
            let operand = child(node, 0)?;
            let op = node.operator().map(|op| op.kind());
            if op == Some(TokenKind::Sub) && operand.id() == RuleId::Const {
                let literal = format!("-{}", operand.text());
                return integer(column, &literal);
            }
            let operand = Box::new(expression(operand)?);
            match op {
                Some(TokenKind::Sub) => Ok(Expression::Negation(column, operand)),
                Some(TokenKind::Not) => Ok(Expression::Not(column, operand)),
                _ => Err(unexpected(node)),
            }
        }
        RuleId::Item => expression(child(node, 0)?),
        RuleId::FuncCall => {
            let mut args = vec![];
            arguments(child(node, 0)?, &mut args)?;
            Ok(Expression::Call(column, name(node)?, args))
        }
        RuleId::Const => integer(column, &node.text()),
        RuleId::Ref => Ok(Expression::Var(column, node.text().into())),
        _ => Err(unexpected(node)),
    }
}

fn integer(column: Column, literal: &str) -> Result<Expression> {
    match literal.parse::<i32>() {
        Ok(n) => Ok(Expression::Integer(column, n)),
        Err(_) => Err(error!(Overflow, ..&column; literal)),
    }
}

/// Folds `a - b - c`, parsed as `a - (b - c)`, into `(a - b) - c`.
fn binary(node: &Node) -> Result<Expression> {
    let id = node.id();
    let mut lhs = expression(child(node, 0)?)?;
    let mut op = node.operator().map(|t| t.kind());
    let mut rhs = child(node, 1)?;
    while rhs.id() == id && rhs.operator().is_some() {
        let next = expression(child(rhs, 0)?)?;
        lhs = combine(op, lhs, next).ok_or_else(|| unexpected(node))?;
        op = rhs.operator().map(|t| t.kind());
        rhs = child(rhs, 1)?;
    }
    let last = expression(rhs)?;
    combine(op, lhs, last).ok_or_else(|| unexpected(node))
}

fn combine(op: Option<TokenKind>, lhs: Expression, rhs: Expression) -> Option<Expression> {
    let column: Column = lhs.column().start..rhs.column().end;
    let (l, r) = (Box::new(lhs), Box::new(rhs));
    use TokenKind::*;
    Some(match op? {
        Mul => Expression::Multiply(column, l, r),
        Div => Expression::Divide(column, l, r),
        Mod => Expression::Modulus(column, l, r),
        Add => Expression::Add(column, l, r),
        Sub => Expression::Subtract(column, l, r),
        Eq => Expression::Equal(column, l, r),
        Neq => Expression::NotEqual(column, l, r),
        Lt => Expression::Less(column, l, r),
        Leq => Expression::LessEqual(column, l, r),
        Gt => Expression::Greater(column, l, r),
        Geq => Expression::GreaterEqual(column, l, r),
        And => Expression::And(column, l, r),
        Or => Expression::Or(column, l, r),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::super::{lex, parse};
    use super::*;

    fn lower_str(s: &str) -> Vec<Statement> {
        parse(&lex(s).unwrap()).unwrap()
    }

    fn print_expr(s: &str) -> Expression {
        match lower_str(s).pop() {
            Some(Statement::Print(_, expr)) => expr,
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_left_association() {
        let expr = print_expr("print(10 - 3 - 2);");
        let answer = Expression::Subtract(
            2..7,
            Box::new(Expression::Subtract(
                2..5,
                Box::new(Expression::Integer(2..3, 10)),
                Box::new(Expression::Integer(4..5, 3)),
            )),
            Box::new(Expression::Integer(6..7, 2)),
        );
        assert_eq!(expr, answer);
    }

    #[test]
    fn test_parentheses_keep_grouping() {
        let expr = print_expr("print(10 - (3 - 2));");
        match expr {
            Expression::Subtract(_, lhs, rhs) => {
                assert_eq!(*lhs, Expression::Integer(2..3, 10));
                assert!(matches!(*rhs, Expression::Subtract(..)));
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_statement_chain() {
        let statements = lower_str(
            "x = 1; while (x < 3) { x = x + 1; } if (x == 3) { print(x); } else { print(0); } print(1);",
        );
        assert_eq!(statements.len(), 4);
        assert!(matches!(statements[1], Statement::While(..)));
        match &statements[2] {
            Statement::If(_, _, then, otherwise) => {
                assert_eq!(then.len(), 1);
                assert_eq!(otherwise.len(), 1);
            }
            other => panic!("{:?}", other),
        }
        assert!(matches!(statements[3], Statement::Print(..)));
    }

    #[test]
    fn test_function_and_call() {
        let statements = lower_str("func f(a, b) { return a; } func g() { return; } f(1, g());");
        match &statements[0] {
            Statement::Function(_, name, params, body) => {
                assert_eq!(&**name, "f");
                assert_eq!(params.len(), 2);
                assert_eq!(&*params[1], "b");
                assert_eq!(body.len(), 1);
            }
            other => panic!("{:?}", other),
        }
        match &statements[1] {
            Statement::Function(_, _, params, body) => {
                assert!(params.is_empty());
                assert_eq!(body, &vec![Statement::Return(17..18, None)]);
            }
            other => panic!("{:?}", other),
        }
        match &statements[2] {
            Statement::Expression(_, Expression::Call(_, name, args)) => {
                assert_eq!(&**name, "f");
                assert_eq!(args.len(), 2);
                assert!(matches!(args[1], Expression::Call(..)));
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_var_and_for() {
        let statements = lower_str("var i = 0; for (i = 0; i < 2; i = i + 1) { print(i); }");
        assert!(matches!(statements[0], Statement::Assign(..)));
        match &statements[1] {
            Statement::For(_, init, _, step, body) => {
                assert!(matches!(**init, Statement::Assign(..)));
                assert!(matches!(**step, Statement::Assign(..)));
                assert_eq!(body.len(), 1);
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_constant_out_of_range() {
        let err = parse(&lex("print(99999999999);").unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "OVERFLOW IN 2..3; 99999999999");
        let err = parse(&lex("print(-2147483649);").unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "OVERFLOW IN 2..4; -2147483649");
    }

    #[test]
    fn test_negative_literal() {
        assert_eq!(
            print_expr("print(-2147483648);"),
            Expression::Integer(2..4, i32::min_value())
        );
        assert_eq!(
            print_expr("print(-x);"),
            Expression::Negation(2..4, Box::new(Expression::Var(3..4, "x".into())))
        );
        match print_expr("print(--5);") {
            Expression::Negation(_, operand) => {
                assert_eq!(*operand, Expression::Integer(3..5, -5));
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_long_statement_list() {
        let mut src = String::from("x = 0;");
        for _ in 0..5000 {
            src.push_str("x = x + 1;");
        }
        src.push_str("print(x);");
        let statements = lower_str(&src);
        assert_eq!(statements.len(), 5002);
        assert!(matches!(statements[5001], Statement::Print(..)));
    }
}
