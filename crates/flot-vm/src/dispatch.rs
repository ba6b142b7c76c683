//! The flat opcode dispatch loop.
//!
//! One step: fetch a byte (whitespace flattened to `' '`), form an escape
//! opcode if it was `\`, bump the step counter, and switch. Every
//! statically resolvable branch was pre-resolved by the prescanner, so the
//! branch arms are table lookups.

use std::io::{self, Write};

use log::{Level, log_enabled, trace};

use crate::machine::Machine;
use crate::mathlib;
use crate::program::{TERMINATE_BYTE, fix_ws};
use crate::value::{Value, encode_loc, int, nat, uint};

impl<W: Write> Machine<W> {
    /// Single-steps the program.
    pub fn step(&mut self) -> io::Result<()> {
        if log_enabled!(Level::Trace) {
            self.trace_step();
        }

        let bytecode = fix_ws(self.next_byte());
        if bytecode == b'\\' {
            let escape = self.next_byte();
            self.steps += 1;
            return mathlib::dispatch(self, escape);
        }
        self.steps += 1;

        match bytecode {
            TERMINATE_BYTE => self.terminate = true,

            b'0'..=b'9' | b'.' => {
                let (val, after) = self.scan.literal(&self.prog, self.pc - 1);
                self.pc = after;
                self.stack.push(val);
            }

            // Lowercase letters are pre-baked variable fetches; `Vc` and
            // `c` read the same slot.
            b'a'..=b'z' => {
                let val = self.vars[bytecode as usize];
                self.stack.push(val);
            }

            b'+' => {
                let rhs = self.stack.pop();
                *self.stack.top_mut() += rhs;
            }
            b'-' => {
                let rhs = self.stack.pop();
                *self.stack.top_mut() -= rhs;
            }
            b'*' => {
                let rhs = self.stack.pop();
                *self.stack.top_mut() *= rhs;
            }
            b'/' => {
                let rhs = self.stack.pop();
                *self.stack.top_mut() /= rhs;
            }
            b'~' => {
                let top = self.stack.top_mut();
                *top = -*top;
            }
            b'%' => {
                let rhs = self.stack.pop();
                *self.stack.top_mut() %= rhs;
            }

            b'&' => {
                let rhs = self.stack.pop();
                let top = self.stack.top_mut();
                *top = (uint(*top) & uint(rhs)) as Value;
            }
            b'|' => {
                let rhs = self.stack.pop();
                let top = self.stack.top_mut();
                *top = (uint(*top) | uint(rhs)) as Value;
            }
            b'^' => {
                let rhs = self.stack.pop();
                let top = self.stack.top_mut();
                *top = (uint(*top) ^ uint(rhs)) as Value;
            }

            // Scale by a power of two.
            b'<' => {
                let rhs = self.stack.pop();
                *self.stack.top_mut() *= rhs.exp2();
            }
            b'>' => {
                let rhs = self.stack.pop();
                *self.stack.top_mut() /= rhs.exp2();
            }

            b'\'' => {
                let top = *self.stack.top_mut();
                writeln!(self.out, "{top}")?;
            }
            b'!' => {
                let selector = self.next_byte();
                let val = self.vars[selector as usize];
                writeln!(self.out, "{val}")?;
            }

            b'C' => {
                let dst = self.scan.resolve(self.stack.pop());
                self.stack.push(encode_loc(self.pc));
                self.pc = dst;
            }
            b'G' => {
                let dst = self.stack.pop();
                self.pc = self.scan.resolve(dst);
            }

            b'I' => {
                let top = self.stack.top_mut();
                *top = int(*top) as Value;
            }
            b'U' => {
                let top = self.stack.top_mut();
                *top = uint(*top) as Value;
            }

            b'M' => {
                let selector = self.next_byte();
                self.vars[selector as usize] = self.stack.pop();
            }
            b'V' => {
                let selector = self.next_byte();
                let val = self.vars[selector as usize];
                self.stack.push(val);
            }

            b'D' => {
                let top = *self.stack.top_mut();
                self.stack.push(top);
            }
            b'P' => {
                self.stack.pop();
            }
            b'Q' => {
                let n = nat(self.stack.pop());
                self.stack.drop_n(n as usize);
            }
            b'R' => {
                let n = nat(self.stack.pop());
                self.stack.rotate(n as usize);
            }
            b'S' => {
                let a = self.stack.pop();
                let b = self.stack.pop();
                self.stack.push(a);
                self.stack.push(b);
            }

            b'?' => {
                if self.stack.pop() < 0.0 {
                    self.pc = self.scan.branch_target(self.pc);
                }
            }
            b'L' | b'@' | b':' | b';' | b'B' | b'F' | b' ' => {
                self.pc = self.scan.branch_target(self.pc);
            }

            other => self.undefined(other as char)?,
        }
        Ok(())
    }

    /// Reports an undefined opcode and halts.
    pub(crate) fn undefined(&mut self, bytecode: char) -> io::Result<()> {
        writeln!(
            self.out,
            "Undefined bytecode '{}' at {}. Terminating.",
            bytecode,
            self.pc - 1
        )?;
        self.terminate = true;
        Ok(())
    }

    fn trace_step(&self) {
        let stack = self.stack.as_slice();
        let top = &stack[stack.len().saturating_sub(4)..];
        trace!(
            "step {}: pc={} byte={:?} stack top {top:?}",
            self.steps,
            self.pc,
            self.prog.byte_at(self.pc) as char,
        );
    }
}
