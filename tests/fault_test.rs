mod common;
use common::*;
use vee::lang::ErrorCode;
use vee::mach::{Config, Program, Runtime};

fn compile_errors(src: &str) -> Vec<ErrorCode> {
    match vee::compile(src) {
        Ok(program) => panic!("{}", program),
        Err(errors) => errors.iter().map(|e| e.code()).collect(),
    }
}

#[test]
fn test_division_by_zero() {
    assert_eq!(run_source("print(1 / 0);"), "DIVISION BY ZERO AT 4\n");
    assert_eq!(
        run_source("print(5); x = 0; print(5 % x);"),
        "5\nDIVISION BY ZERO AT 12\n"
    );
}

#[test]
fn test_overflow() {
    assert_eq!(
        run_source("x = 2147483647; print(x + 1);"),
        "OVERFLOW AT 9\n"
    );
}

#[test]
fn test_local_slot_out_of_range() {
    let program: Program = "24 5 0 0 23 16 0 17 25".parse().unwrap();
    assert_eq!(
        exec(&mut Runtime::new(program)),
        "INVALID ADDRESS AT 7; LOCAL SLOT 0 OUT OF RANGE\n"
    );
}

#[test]
fn test_runaway_recursion() {
    let config = Config {
        stack_capacity: 64,
        global_capacity: 8,
    };
    let program = vee::compile("func f(n) { return f(n + 1); } print(f(0));").unwrap();
    let mut runtime = Runtime::with_config(program, config);
    let output = exec(&mut runtime);
    assert!(output.starts_with("STACK OVERFLOW AT"));
    assert!(output.ends_with("; OPERAND STACK\n"));
}

#[test]
fn test_compile_errors() {
    assert_eq!(compile_errors("x = 1 $ 2;"), vec![ErrorCode::LexicalError]);
    assert_eq!(compile_errors("print(1"), vec![ErrorCode::SyntaxError]);
    assert_eq!(compile_errors("print(y);"), vec![ErrorCode::UndefinedVariable]);
    assert_eq!(compile_errors("x = x + 1;"), vec![ErrorCode::UndefinedVariable]);
    assert_eq!(compile_errors("print(nope());"), vec![ErrorCode::UndefinedFunction]);
    assert_eq!(
        compile_errors("print(a); print(b());"),
        vec![ErrorCode::UndefinedVariable, ErrorCode::UndefinedFunction]
    );
    assert_eq!(
        compile_errors("x = 99999999999;"),
        vec![ErrorCode::Overflow]
    );
}
