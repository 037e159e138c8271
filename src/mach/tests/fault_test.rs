use super::*;

#[test]
fn test_division_by_zero() {
    let mut r = runtime(&[16, 5, 21, 16, 1, 16, 0, 4, 23]);
    assert_eq!(run(&mut r), "5\nDIVISION BY ZERO AT 7\n");
    let mut r = runtime(&[16, 1, 16, 0, 26, 23]);
    assert_eq!(run(&mut r), "DIVISION BY ZERO AT 4\n");
}

#[test]
fn test_overflow() {
    let mut r = runtime(&[16, i32::max_value(), 16, 1, 1, 23]);
    assert_eq!(run(&mut r), "OVERFLOW AT 4\n");
    let mut r = runtime(&[16, i32::min_value(), 27, 23]);
    assert_eq!(run(&mut r), "OVERFLOW AT 2\n");
}

#[test]
fn test_stack_limits() {
    let config = Config {
        stack_capacity: 4,
        global_capacity: 0,
    };
    let words = vec![16, 1, 16, 1, 16, 1, 16, 1, 16, 1, 23];
    let mut r = Runtime::with_config(Program::new(words), config);
    assert_eq!(run(&mut r), "STACK OVERFLOW AT 8; OPERAND STACK\n");
    let mut r = runtime(&[22, 23]);
    assert_eq!(run(&mut r), "STACK UNDERFLOW AT 0\n");
}

#[test]
fn test_local_slot_out_of_range() {
    let mut r = runtime(&[24, 5, 0, 0, 23, 16, 0, 17, 25]);
    assert_eq!(run(&mut r), "INVALID ADDRESS AT 7; LOCAL SLOT 0 OUT OF RANGE\n");
    let mut r = runtime(&[16, 9, 24, 7, 1, 0, 23, 16, -2, 17, 25]);
    assert_eq!(run(&mut r), "INVALID ADDRESS AT 9; LOCAL SLOT -2 OUT OF RANGE\n");
}

#[test]
fn test_local_slot_without_frame() {
    let mut r = runtime(&[16, 1, 16, 2, 16, 3, 19, 0, 21, 21, 23]);
    assert_eq!(run(&mut r), "INVALID ADDRESS AT 6; LOCAL SLOT 0 OUT OF RANGE\n");
    assert_eq!(r.stack(), &[1, 2]);
    let mut r = runtime(&[16, 7, 16, 0, 17, 23]);
    assert_eq!(run(&mut r), "INVALID ADDRESS AT 4; LOCAL SLOT 0 OUT OF RANGE\n");
    let mut r = runtime(&[16, 7, 16, -1, 17, 23]);
    assert_eq!(run(&mut r), "INVALID ADDRESS AT 4; LOCAL SLOT -1 OUT OF RANGE\n");
}

#[test]
fn test_bad_program() {
    let mut r = runtime(&[99]);
    assert_eq!(run(&mut r), "ILLEGAL INSTRUCTION AT 0; 99\n");
    let mut r = runtime(&[16, 100, 13]);
    assert_eq!(run(&mut r), "INVALID ADDRESS AT 2; JUMP TO 100\n");
    let mut r = runtime(&[16, 1]);
    assert_eq!(run(&mut r), "INVALID ADDRESS AT 2; PROGRAM COUNTER OUT OF RANGE\n");
    let mut r = runtime(&[16, 1, 25]);
    assert_eq!(run(&mut r), "STACK UNDERFLOW AT 2; RETURN WITHOUT CALL\n");
}

#[test]
fn test_interrupt() {
    let mut r = runtime(&[16, 0, 13]);
    assert_eq!(r.execute(10), Event::Running);
    r.interrupt();
    assert_eq!(run(&mut r), "BREAK AT 0\n");
    assert!(r.is_halted());
    assert_eq!(run_cycles(&mut runtime(&[16, 0, 13]), 10), "\n10 Execution cycles exceeded.\n");
}
