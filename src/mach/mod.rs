/*!
## Rust Machine Module

This Rust module is a code generator, assembler and stack virtual machine
for Vee.

*/

pub type Address = usize;
pub type Symbol = usize;

mod assemble;
mod codegen;
mod function;
mod link;
mod listing;
mod opcode;
mod program;
mod runtime;
mod stack;
mod var;

#[cfg(test)]
mod tests;

pub use assemble::{assemble, disassemble};
pub use codegen::codegen;
pub use function::{Function, Functions};
pub use link::Link;
pub use listing::{Listing, Word};
pub use opcode::Opcode;
pub use program::Program;
pub use runtime::{Config, Event, Runtime, GLOBAL_CAPACITY, STACK_CAPACITY};
pub use stack::Stack;
pub use var::{Slot, Var};
