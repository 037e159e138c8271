use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::convert::TryFrom;

thread_local!(
    static MNEMONIC_TO_OPCODE: HashMap<&'static str, Opcode> = Opcode::ALL
        .iter()
        .map(|op| (op.mnemonic(), *op))
        .collect();
);

/// ## Virtual machine instruction set
///
/// Operands travel on the stack except for the inline words that follow
/// `CONST`, `STORE`, `GSTORE` and `CALL` in program memory.
///
/// For example: `print(3*b);` with `b` in global slot 0 assembles to
/// `CONST 3 CONST 0 GLOAD MUL PRINT`.
///
/// See <https://en.wikipedia.org/wiki/Reverse_Polish_notation>

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // *** Expression operations
    Add = 1,
    Sub = 2,
    Mul = 3,
    Div = 4,
    Lt = 5,
    Gt = 6,
    Leq = 7,
    Geq = 8,
    Eq = 9,
    And = 10,
    Or = 11,
    Not = 12,

    // *** Branch control
    /// Pop target and branch.
    Jmp = 13,
    /// Pop target, pop condition, branch if condition is 1.
    Jmpt = 14,
    /// Pop target, pop condition, branch if condition is 0.
    Jmpf = 15,

    // *** Memory
    /// Push the inline operand.
    Const = 16,
    /// Pop a signed frame slot and push its value.
    Load = 17,
    Gload = 18,
    /// Pop a value into the signed frame slot given inline.
    Store = 19,
    Gstore = 20,

    // *** Statements
    Print = 21,
    Pop = 22,
    Halt = 23,
    /// Inline: target address, argument count, local count.
    Call = 24,
    Ret = 25,

    Mod = 26,
    Neg = 27,
}

impl Opcode {
    pub const ALL: [Opcode; 27] = [
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Lt,
        Opcode::Gt,
        Opcode::Leq,
        Opcode::Geq,
        Opcode::Eq,
        Opcode::And,
        Opcode::Or,
        Opcode::Not,
        Opcode::Jmp,
        Opcode::Jmpt,
        Opcode::Jmpf,
        Opcode::Const,
        Opcode::Load,
        Opcode::Gload,
        Opcode::Store,
        Opcode::Gstore,
        Opcode::Print,
        Opcode::Pop,
        Opcode::Halt,
        Opcode::Call,
        Opcode::Ret,
        Opcode::Mod,
        Opcode::Neg,
    ];

    pub fn mnemonic(self) -> &'static str {
        use Opcode::*;
        match self {
            Add => "ADD",
            Sub => "SUB",
            Mul => "MUL",
            Div => "DIV",
            Lt => "LT",
            Gt => "GT",
            Leq => "LEQ",
            Geq => "GEQ",
            Eq => "EQ",
            And => "AND",
            Or => "OR",
            Not => "NOT",
            Jmp => "JMP",
            Jmpt => "JMPT",
            Jmpf => "JMPF",
            Const => "CONST",
            Load => "LOAD",
            Gload => "GLOAD",
            Store => "STORE",
            Gstore => "GSTORE",
            Print => "PRINT",
            Pop => "POP",
            Halt => "HALT",
            Call => "CALL",
            Ret => "RET",
            Mod => "MOD",
            Neg => "NEG",
        }
    }

    pub fn from_mnemonic(s: &str) -> Option<Opcode> {
        MNEMONIC_TO_OPCODE.with(|mto| mto.get(s).copied())
    }

    /// Number of inline operand words following the opcode.
    pub fn operands(self) -> usize {
        match self {
            Opcode::Const | Opcode::Store | Opcode::Gstore => 1,
            Opcode::Call => 3,
            _ => 0,
        }
    }
}

impl From<Opcode> for i32 {
    fn from(op: Opcode) -> i32 {
        op as i32
    }
}

impl TryFrom<i32> for Opcode {
    type Error = Error;

    fn try_from(word: i32) -> Result<Opcode, Error> {
        match usize::try_from(word) {
            Ok(n) if n >= 1 && n <= Opcode::ALL.len() => Ok(Opcode::ALL[n - 1]),
            _ => Err(error!(IllegalInstruction; &word.to_string())),
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbering() {
        for (index, op) in Opcode::ALL.iter().enumerate() {
            assert_eq!(i32::from(*op), index as i32 + 1);
            assert_eq!(Opcode::try_from(i32::from(*op)), Ok(*op));
            assert_eq!(Opcode::from_mnemonic(op.mnemonic()), Some(*op));
        }
        assert_eq!(i32::from(Opcode::Const), 16);
        assert_eq!(i32::from(Opcode::Ret), 25);
        assert!(Opcode::try_from(0).is_err());
        assert!(Opcode::try_from(28).is_err());
        assert_eq!(Opcode::from_mnemonic("add"), None);
    }
}
