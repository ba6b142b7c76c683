//! Numeric literal state machine.
//!
//! Literals share the opcode alphabet: digits and `.` are opcodes whose
//! first byte starts a parse. The machine has four states and an unusual
//! exponent notation driven entirely by dots:
//!
//! - The first `.` starts the fraction.
//! - A second `.` starts a dot-counted exponent.
//! - A third `.` closes the literal applying a *negative* exponent, while
//!   any other non-digit closes it applying a *positive* exponent.
//!
//! So `1..2` is 100.0 but `1..2.` is 0.01. The asymmetric close is
//! deliberate and observable.
//!
//! The parse is a pure function of the program and the start location;
//! the prescanner caches results keyed by start PC.

use crate::program::Program;
use crate::value::{Loc, Value};

enum NumState {
    Idle,
    Integer,
    Fraction,
    Exponent,
}

/// Parses the literal beginning at `start`. Returns the value and the
/// location of the first byte not consumed by the parse. A non-literal
/// byte at `start` yields `(0.0, start)`.
pub fn parse_literal(prog: &Program, start: Loc) -> (Value, Loc) {
    let mut state = NumState::Idle;
    let mut val: Value = 0.0;
    let mut p: Value = 0.0;
    let mut loc = start;

    loop {
        let byte = prog.byte_at(loc);
        loc += 1;

        match byte {
            b'0'..=b'9' => {
                let digit = Value::from(byte - b'0');
                match state {
                    NumState::Idle => {
                        val = digit;
                        state = NumState::Integer;
                    }
                    NumState::Integer => val = val * 10.0 + digit,
                    NumState::Fraction => {
                        val += digit / p;
                        p *= 10.0;
                    }
                    NumState::Exponent => p = p * 10.0 + digit,
                }
            }

            b'.' => match state {
                NumState::Idle | NumState::Integer => {
                    state = NumState::Fraction;
                    p = 10.0;
                }
                NumState::Fraction => {
                    state = NumState::Exponent;
                    p = 0.0;
                }
                NumState::Exponent => {
                    // Dot-terminated exponent is negative; the dot is
                    // consumed.
                    val *= 10f64.powi(-(p as i32));
                    return (val, loc);
                }
            },

            _ => {
                // Back up past the non-numeric byte.
                loc -= 1;
                if let NumState::Exponent = state {
                    val *= 10f64.powi(p as i32);
                }
                return (val, loc);
            }
        }
    }
}
