//! Embedding interface for the flot byte-string virtual machine.
//!
//! This crate is a thin adapter around [`flot_vm`]: it assembles program
//! text into the executable byte string, loads programs from files or
//! stdin with typed errors, and provides [`run`], which executes a program
//! and appends the end-of-run marker.
//!
//! # Example
//!
//! ```
//! let mut out = Vec::new();
//! flot::run("1 2 +'", &mut out, false).unwrap();
//! assert_eq!(out, b"3\nDONE\n");
//! ```

mod error;

pub use error::LoadError;
pub use flot_vm::{Loc, Machine, Prescan, Program, TERMINATE_LOC, Value};

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Assembles program text into the executable byte string.
///
/// Every line is terminated by a single space, so that whitespace closes a
/// numeric literal at each line boundary instead of letting two lines
/// merge into one literal.
pub fn assemble(source: &str) -> Vec<u8> {
    let mut prog = Vec::with_capacity(source.len() + 1);
    for line in source.lines() {
        prog.extend_from_slice(line.as_bytes());
        prog.push(b' ');
    }
    prog
}

/// Reads program text from a file.
pub fn load_file(path: impl AsRef<Path>) -> Result<String, LoadError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| LoadError::File {
        path: path.to_owned(),
        source,
    })
}

/// Reads program text from stdin until EOF.
pub fn load_stdin() -> Result<String, LoadError> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(LoadError::Stdin)?;
    Ok(buf)
}

/// Assembles and runs a program to completion, writing its output followed
/// by the end-of-run marker to `out`. With `report_steps` the marker also
/// carries the step count (the traced variant). Returns the number of
/// bytecode steps executed.
pub fn run<W: Write>(source: &str, out: &mut W, report_steps: bool) -> io::Result<u64> {
    let mut machine = Machine::with_output(assemble(source), &mut *out);
    machine.run()?;
    let steps = machine.steps();

    if report_steps {
        writeln!(out, "DONE  {steps} steps")?;
    } else {
        writeln!(out, "DONE")?;
    }
    Ok(steps)
}
