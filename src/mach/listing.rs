use super::{Address, Opcode, Program, Symbol};
use crate::error;
use crate::lang::Error;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// One word of generated code before assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word {
    Opcode(Opcode),
    Int(i32),
    /// Placeholder for a function address, resolved by the linker.
    Symbol(Symbol),
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Word::Opcode(op) => write!(f, "{}", op),
            Word::Int(n) => write!(f, "{}", n),
            Word::Symbol(sym) => write!(f, "${}", sym),
        }
    }
}

/// ## Generated assembly
///
/// Renders as one instruction per line with its inline operands. Each
/// function body is introduced by a `#func name` comment line.

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Listing {
    words: Vec<Word>,
    sections: Vec<(Address, Rc<str>)>,
}

impl Listing {
    pub fn new() -> Listing {
        Listing::default()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn words_mut(&mut self) -> &mut [Word] {
        &mut self.words
    }

    pub fn sections(&self) -> &[(Address, Rc<str>)] {
        &self.sections
    }

    /// Starts a named section at the current end of the listing.
    pub fn section(&mut self, name: &Rc<str>) {
        self.sections.push((self.words.len(), name.clone()));
    }

    pub fn append(&mut self, words: &mut Vec<Word>) {
        self.words.append(words);
    }

    /// Integer program; fails if any symbol was left unlinked.
    pub fn to_program(&self) -> Result<Program> {
        let mut vec = Vec::with_capacity(self.words.len());
        for (addr, word) in self.words.iter().enumerate() {
            match word {
                Word::Opcode(op) => vec.push(i32::from(*op)),
                Word::Int(n) => vec.push(*n),
                Word::Symbol(_) => {
                    return Err(error!(InternalError; "UNLINKED SYMBOL").at_address(addr))
                }
            }
        }
        Ok(Program::new(vec))
    }
}

impl std::fmt::Display for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut sections = self.sections.iter().peekable();
        let mut line_open = false;
        for (addr, word) in self.words.iter().enumerate() {
            while let Some((_, name)) = sections.peek().filter(|(at, _)| *at == addr) {
                if line_open {
                    writeln!(f)?;
                    line_open = false;
                }
                writeln!(f, "\n#func {}", name)?;
                sections.next();
            }
            if line_open {
                match word {
                    Word::Opcode(_) => writeln!(f)?,
                    _ => write!(f, " ")?,
                }
            }
            write!(f, "{}", word)?;
            line_open = true;
        }
        if line_open {
            writeln!(f)?;
        }
        Ok(())
    }
}
