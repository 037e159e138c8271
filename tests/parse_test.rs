use vee::lang::ast::{Expression, Statement};
use vee::lang::{lex, parse, parse_tree, ErrorCode, Grammar, RuleId};

#[test]
fn test_program_structure() {
    let src = "x = 1; func f(a) { return a; } while (x < 3) { x = f(x) + 1; } print(x);";
    let ast = parse(&lex(src).unwrap()).unwrap();
    assert_eq!(ast.len(), 4);
    assert!(matches!(&ast[0], Statement::Assign(_, name, Expression::Integer(_, 1)) if &**name == "x"));
    assert!(matches!(&ast[1], Statement::Function(_, name, params, body) if &**name == "f" && params.len() == 1 && body.len() == 1));
    assert!(matches!(&ast[2], Statement::While(_, Expression::Less(..), body) if body.len() == 1));
    assert!(matches!(&ast[3], Statement::Print(_, Expression::Var(..))));
}

#[test]
fn test_tree_root() {
    let grammar = Grammar::new();
    let tokens = lex("print(1 + 2);").unwrap();
    let tree = parse_tree(&grammar, &tokens).unwrap();
    assert_eq!(tree.id(), RuleId::Lines);
    assert_eq!(tree.child(0).unwrap().id(), RuleId::Print);
    assert_eq!(tree.column(), &(0..7));
}

#[test]
fn test_syntax_errors() {
    for src in &["print(1", "x = ;", "if x { }", "func (a) { }", "1 +;", "while (1) { print(1); "] {
        let err = parse(&lex(src).unwrap()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::SyntaxError, "{}", src);
    }
}
