use super::{Address, Opcode};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Compiled program
///
/// Opcodes interleaved with their inline operands, as plain integers.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    words: Vec<i32>,
}

impl Program {
    pub fn new(words: Vec<i32>) -> Program {
        Program { words }
    }

    /// Program that stops immediately.
    pub fn halt() -> Program {
        Program::new(vec![i32::from(Opcode::Halt)])
    }

    /// Parses a comma separated list such as `16,2,21,23`.
    pub fn from_csv(s: &str) -> Result<Program> {
        s.split(',')
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(parse_word)
            .collect::<Result<Vec<i32>>>()
            .map(Program::new)
    }

    pub fn words(&self) -> &[i32] {
        &self.words
    }

    pub fn get(&self, addr: Address) -> Option<i32> {
        self.words.get(addr).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn parse_word(word: &str) -> Result<i32> {
    word.parse::<i32>()
        .map_err(|_| error!(SyntaxError; &format!("INVALID PROGRAM WORD {}", word)))
}

impl From<Vec<i32>> for Program {
    fn from(words: Vec<i32>) -> Program {
        Program::new(words)
    }
}

impl std::str::FromStr for Program {
    type Err = Error;

    /// Whitespace separated decimal integers.
    fn from_str(s: &str) -> Result<Program> {
        s.split_whitespace()
            .map(parse_word)
            .collect::<Result<Vec<i32>>>()
            .map(Program::new)
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let words: Vec<String> = self.words.iter().map(|w| w.to_string()).collect();
        writeln!(f, "{}", words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_forms() {
        let program: Program = "16 2\n16 3 1 21 23".parse().unwrap();
        assert_eq!(program.words(), &[16, 2, 16, 3, 1, 21, 23]);
        assert_eq!(program.to_string(), "16 2 16 3 1 21 23\n");
        assert_eq!(Program::from_csv("16, 2,21,23").unwrap().len(), 4);
        assert!("16 x".parse::<Program>().is_err());
        assert_eq!(Program::halt().words(), &[23]);
    }
}
