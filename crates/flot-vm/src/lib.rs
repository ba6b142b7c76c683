//! flot virtual machine
//!
//! This crate executes flot programs: byte strings in which the program
//! text is simultaneously source and executable. A single byte is an
//! operation; a handful of bytes form inline operands (selector bytes, or
//! numeric literals parsed by a small state machine). Every value is an
//! `f64`.
//!
//! # Architecture
//!
//! The machine is built from:
//! - An immutable [`Program`] store with a bounds-checked fetch that reads
//!   back the termination bytecode outside the image.
//! - A [`Prescan`] built once at construction, which caches literal values,
//!   records global-label definitions, and pre-resolves every static branch
//!   (conditionals, local labels, whitespace skips) into a flat
//!   branch-target table, then collapses branch-to-branch chains.
//! - A flat dispatch loop over the opcode alphabet, with a one-byte `\`
//!   escape into the math library.
//! - A [`Stack`] with an implicit floor of zeros and a 256-slot variable
//!   bank addressed by raw selector byte.
//!
//! Program output (the `'` and `!` print opcodes) goes through an injected
//! `io::Write` sink, so embedders and tests can capture it.
//!
//! # Example
//!
//! ```
//! use flot_vm::Machine;
//!
//! let mut machine = Machine::with_output(&b"1 2 +'X"[..], Vec::new());
//! machine.run().unwrap();
//! assert_eq!(machine.output(), b"3\n");
//! ```

mod dispatch;
mod machine;
mod mathlib;
mod number;
mod prescan;
mod program;
mod stack;
mod value;

pub use machine::Machine;
pub use number::parse_literal;
pub use prescan::Prescan;
pub use program::{Program, TERMINATE_BYTE};
pub use stack::Stack;
pub use value::{Loc, TERMINATE_LOC, Value, encode_loc, int, nat, uint};
