mod common;
use common::*;

#[test]
fn test_while() {
    let src = "i = 0; while (i < 5) { print(i); i = i + 1; }";
    assert_eq!(run_source(src), "0\n1\n2\n3\n4\n");
}

#[test]
fn test_while_never_entered() {
    assert_eq!(run_source("i = 9; while (i < 5) { print(i); } print(i);"), "9\n");
}

#[test]
fn test_if_else() {
    let src = "
        x = 3;
        if (x > 2) { print(1); } else { print(2); }
        if (x > 5) { print(3); } else { print(4); }
        if (x == 3) { print(5); }
        if (x != 3) { print(6); }
        print(7);
    ";
    assert_eq!(run_source(src), "1\n4\n5\n7\n");
}

#[test]
fn test_for() {
    let src = "for (i = 0; i < 4; i = i + 1) { print(i * i); } print(i);";
    assert_eq!(run_source(src), "0\n1\n4\n9\n4\n");
}

#[test]
fn test_nested_loops() {
    let src = "
        var total = 0;
        for (i = 1; i <= 3; i = i + 1) {
            j = 0;
            while (j < i) {
                total = total + 1;
                j = j + 1;
            }
        }
        print(total);
    ";
    assert_eq!(run_source(src), "6\n");
}

#[test]
fn test_global_and_local_are_distinct() {
    let src = "
        x = 10;
        func f() { x = 1; return x; }
        func g() { return x + 1; }
        print(f());
        print(x);
        print(g());
    ";
    assert_eq!(run_source(src), "1\n10\n11\n");
}

#[test]
fn test_expression_statement() {
    let src = "func f() { print(8); return 0; } f(); 1 + 2; print(9);";
    assert_eq!(run_source(src), "8\n9\n");
}

#[test]
fn test_comments() {
    let src = "# counter\nx = 2; /* doubled\n below */ print(x * 2); # done";
    assert_eq!(run_source(src), "4\n");
}

#[test]
fn test_empty_program() {
    assert_eq!(run_source(""), "");
}

#[test]
fn test_long_program() {
    let mut src = String::from("x = 0;\n");
    for _ in 0..3000 {
        src.push_str("x = x + 1;\n");
    }
    src.push_str("print(x);\n");
    let program = vee::compile(&src).unwrap();
    let mut runtime = vee::mach::Runtime::new(program);
    assert_eq!(runtime.run().unwrap(), "3000\n");
}

#[test]
fn test_long_expression() {
    let mut src = String::from("print(0");
    for n in 1..=1000 {
        src.push_str(&format!(" + {}", n));
    }
    src.push_str(");");
    assert_eq!(run_source(&src), "500500\n");
}
