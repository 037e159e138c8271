/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of the Vee language.
Parsing is driven by a declarative grammar table; the resulting generic
tree is lowered into a typed syntax tree.

*/

/// Half-open range of positions: characters for lexical errors,
/// token indices everywhere else.
pub type Column = std::ops::Range<usize>;

#[macro_use]
mod error;
mod grammar;
mod lex;
mod lower;
mod parse;
pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use grammar::{Element, Grammar, Rule, RuleId};
pub use lex::{lex, read_tokens, write_tokens};
pub use parse::{parse, parse_tree, Node};
pub use token::{Token, TokenKind};

pub mod ast;
