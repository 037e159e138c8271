use super::{Address, Symbol, Word};
use crate::error;
use crate::lang::Error;
use log::debug;
use std::collections::BTreeMap;
use std::convert::TryFrom;

/// ## Relocation table
///
/// Records where each function was placed and which words still hold a
/// symbolic placeholder. Linking patches placeholders by index.

#[derive(Debug, Default)]
pub struct Link {
    symbols: BTreeMap<Symbol, Address>,
    unlinked: BTreeMap<Address, Symbol>,
}

impl Link {
    pub fn new() -> Link {
        Link::default()
    }

    pub fn insert(&mut self, sym: Symbol, addr: Address) {
        self.symbols.insert(sym, addr);
    }

    pub fn link_addr_to_symbol(&mut self, addr: Address, symbol: Symbol) {
        self.unlinked.insert(addr, symbol);
    }

    /// Records every placeholder in `words`, which will be placed at `base`.
    pub fn scan(&mut self, base: Address, words: &[Word]) {
        for (offset, word) in words.iter().enumerate() {
            if let Word::Symbol(symbol) = word {
                self.link_addr_to_symbol(base + offset, *symbol);
            }
        }
    }

    pub fn link(&mut self, words: &mut [Word]) -> Vec<Error> {
        let mut errors: Vec<Error> = vec![];
        for (word_addr, symbol) in std::mem::take(&mut self.unlinked) {
            let dest = match self.symbols.get(&symbol) {
                Some(dest) => *dest,
                None => {
                    let message = format!("UNRESOLVED SYMBOL ${}", symbol);
                    errors.push(error!(InternalError; &message).at_address(word_addr));
                    continue;
                }
            };
            match (words.get_mut(word_addr), i32::try_from(dest)) {
                (Some(word), Ok(dest)) if matches!(word, Word::Symbol(_)) => {
                    debug!("linked ${} at {} to {}", symbol, word_addr, dest);
                    *word = Word::Int(dest);
                }
                _ => errors.push(error!(InternalError; "LINK FAILURE").at_address(word_addr)),
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mach::Opcode;

    #[test]
    fn test_link() {
        let mut words = vec![
            Word::Opcode(Opcode::Call),
            Word::Symbol(1),
            Word::Int(0),
            Word::Int(0),
            Word::Opcode(Opcode::Halt),
        ];
        let mut link = Link::new();
        link.scan(0, &words);
        link.insert(1, 5);
        assert!(link.link(&mut words).is_empty());
        assert_eq!(words[1], Word::Int(5));
        assert!(link.link(&mut words).is_empty());
    }

    #[test]
    fn test_unresolved() {
        let mut words = vec![Word::Opcode(Opcode::Call), Word::Symbol(7)];
        let mut link = Link::new();
        link.scan(0, &words);
        let errors = link.link(&mut words);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "INTERNAL ERROR AT 1; UNRESOLVED SYMBOL $7"
        );
    }
}
