use super::{Opcode, Program};
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;

/// Maps assembly text to an integer program.
///
/// Lines starting with `#` are comments. Every other whitespace separated
/// token is a mnemonic or a decimal integer.
pub fn assemble(s: &str) -> Result<Program, Vec<Error>> {
    let mut words = vec![];
    let mut errors = vec![];
    for (number, line) in s.lines().enumerate() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        for token in line.split_whitespace() {
            if let Some(op) = Opcode::from_mnemonic(token) {
                words.push(i32::from(op));
            } else if let Ok(n) = token.parse::<i32>() {
                words.push(n);
            } else {
                let message = format!("{} ON LINE {}", token, number + 1);
                errors.push(error!(UnknownMnemonic; &message));
            }
        }
    }
    if errors.is_empty() {
        Ok(Program::new(words))
    } else {
        Err(errors)
    }
}

/// Renders an integer program back to assembly, one instruction per line.
/// Words that are not opcodes are written as plain integers.
pub fn disassemble(program: &Program) -> String {
    let mut s = String::new();
    let mut words = program.words().iter();
    while let Some(word) = words.next() {
        match Opcode::try_from(*word) {
            Ok(op) => {
                s.push_str(op.mnemonic());
                for operand in words.by_ref().take(op.operands()) {
                    s.push_str(&format!(" {}", operand));
                }
            }
            Err(_) => s.push_str(&word.to_string()),
        }
        s.push('\n');
    }
    s
}
