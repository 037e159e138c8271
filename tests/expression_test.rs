mod common;
use common::*;

#[test]
fn test_precedence() {
    assert_eq!(run_source("print(2 + 3 * 4);"), "14\n");
    assert_eq!(run_source("print((2 + 3) * 4);"), "20\n");
    assert_eq!(run_source("print(3 > 2 && 1 == 1);"), "1\n");
    assert_eq!(run_source("print(1 + 2 == 3 || 0);"), "1\n");
}

#[test]
fn test_left_association() {
    assert_eq!(run_source("print(10 - 3 - 2);"), "5\n");
    assert_eq!(run_source("print(100 / 10 / 5);"), "2\n");
    assert_eq!(run_source("print(17 % 5 * 2);"), "4\n");
}

#[test]
fn test_unary() {
    assert_eq!(run_source("print(-5 + 2);"), "-3\n");
    assert_eq!(run_source("print(!0);"), "1\n");
    assert_eq!(run_source("print(!(2 < 1));"), "1\n");
    assert_eq!(run_source("print(!7);"), "7\n");
    assert_eq!(run_source("print(--4);"), "4\n");
}

#[test]
fn test_comparisons() {
    assert_eq!(
        run_source("print(1 < 2); print(2 <= 2); print(1 > 2); print(3 >= 4); print(1 != 1);"),
        "1\n1\n0\n0\n0\n"
    );
}

#[test]
fn test_logic_uses_one_as_true() {
    assert_eq!(run_source("print(2 && 1);"), "0\n");
    assert_eq!(run_source("print(0 || 2);"), "0\n");
    assert_eq!(run_source("print(0 || 1);"), "1\n");
}

#[test]
fn test_negative_division() {
    assert_eq!(run_source("print(-7 / 2); print(-7 % 2);"), "-3\n-1\n");
}

#[test]
fn test_integer_limits() {
    assert_eq!(run_source("print(-2147483648);"), "-2147483648\n");
    assert_eq!(run_source("print(2147483647);"), "2147483647\n");
    assert_eq!(run_source("print(-(2147483647) - 1);"), "-2147483648\n");
}
