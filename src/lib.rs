//! # Vee
//!
//! A toolchain for the Vee language. Source text is tokenized, matched
//! against a table driven grammar, lowered to a typed syntax tree and
//! compiled to stack machine assembly. The assembler maps that text to
//! integer words which the virtual machine executes.
//!
//! ```
//! let program = vee::compile("print(2 + 3 * 4);").unwrap();
//! let mut runtime = vee::mach::Runtime::new(program);
//! assert_eq!(runtime.run().unwrap(), "14\n");
//! ```

#[path = "doc/language.rs"]
#[allow(non_snake_case)]
pub mod _Language;

pub mod lang;
pub mod mach;

use lang::Error;
use mach::{Listing, Program};

/// Source text to assembly listing.
pub fn compile_listing(source: &str) -> Result<Listing, Vec<Error>> {
    let tokens = lang::lex(source).map_err(|e| vec![e])?;
    let ast = lang::parse(&tokens).map_err(|e| vec![e])?;
    mach::codegen(&ast)
}

/// Source text to an executable program, by way of the assembly text.
pub fn compile(source: &str) -> Result<Program, Vec<Error>> {
    let listing = compile_listing(source)?;
    mach::assemble(&listing.to_string())
}
