//! Virtual machine state.

use std::io::{self, Stdout, Write};

use crate::prescan::Prescan;
use crate::program::{Program, TERMINATE_BYTE};
use crate::stack::Stack;
use crate::value::{Loc, Value};

/// A flot virtual machine.
///
/// Construction runs the prescanner; after that the program image and all
/// prescan tables are read-only, and the stack, variable bank, and PC
/// mutate only through [`step`](Machine::step).
///
/// Program output (`'`, `!`, and the undefined-opcode diagnostic) is
/// written to the injected sink, one line per print.
pub struct Machine<W: Write = Stdout> {
    pub(crate) prog: Program,
    pub(crate) scan: Prescan,
    pub(crate) stack: Stack,
    pub(crate) vars: [Value; 256],
    pub(crate) pc: Loc,
    pub(crate) steps: u64,
    pub(crate) terminate: bool,
    pub(crate) out: W,
}

impl Machine<Stdout> {
    /// Creates a machine that prints to stdout.
    pub fn new(program: impl Into<Vec<u8>>) -> Self {
        Self::with_output(program, io::stdout())
    }
}

impl<W: Write> Machine<W> {
    /// Creates a machine printing to `out`.
    pub fn with_output(program: impl Into<Vec<u8>>, out: W) -> Self {
        let prog = Program::new(program);
        let scan = Prescan::build(&prog);
        Self {
            prog,
            scan,
            stack: Stack::new(),
            vars: [0.0; 256],
            pc: 0,
            steps: 0,
            terminate: false,
            out,
        }
    }

    /// Runs the program until completion.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.terminate = false;
            self.step()?;
            if self.terminate {
                return Ok(());
            }
        }
    }

    /// Gets a variable, given its selector byte.
    pub fn var(&self, selector: u8) -> Value {
        self.vars[selector as usize]
    }

    /// Sets a variable to a given value.
    pub fn set_var(&mut self, selector: u8, val: Value) {
        self.vars[selector as usize] = val;
    }

    /// The current PC.
    pub fn pc(&self) -> Loc {
        self.pc
    }

    /// Sets the current PC.
    pub fn set_pc(&mut self, loc: Loc) {
        self.pc = loc;
    }

    /// The live stack entries, bottom to top.
    pub fn stack(&self) -> &[Value] {
        self.stack.as_slice()
    }

    /// Number of bytecode steps executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Whether the last step set the terminate flag.
    pub fn terminated(&self) -> bool {
        self.terminate
    }

    pub fn program(&self) -> &Program {
        &self.prog
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Consumes the machine and returns the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Fetches the next bytecode, advancing the PC. Reads back the
    /// termination bytecode if the PC is out of range.
    pub(crate) fn next_byte(&mut self) -> u8 {
        if self.pc < 0 || self.pc >= self.prog.len() {
            return TERMINATE_BYTE;
        }
        let byte = self.prog.byte_at(self.pc);
        self.pc += 1;
        byte
    }
}
