//! Math-library escape opcodes.
//!
//! A `\` prefix extends the opcode space by one byte: the escaped byte
//! plus 256 indexes this table. Functions `std::f64` does not provide
//! (error functions, gamma, frexp/ldexp/modf) come from `libm`.
//!
//! The two-operand order contract matches the rest of the machine:
//! `rhs = pop()`, then the operation applies to the new top.

use std::io::{self, Write};

use crate::machine::Machine;
use crate::value::{Value, int};

pub(crate) fn dispatch<W: Write>(machine: &mut Machine<W>, escape: u8) -> io::Result<()> {
    match escape {
        b'^' => binary(machine, f64::powf),
        b'h' => binary(machine, f64::hypot),
        b'H' => {
            let x = machine.stack.pop();
            let y = machine.stack.pop();
            let top = machine.stack.top_mut();
            *top = top.hypot(y).hypot(x);
        }
        b'a' => binary(machine, f64::atan2),

        b's' => unary(machine, f64::sin),
        b'S' => unary(machine, f64::asin),
        b'c' => unary(machine, f64::cos),
        b'C' => unary(machine, f64::acos),
        b't' => unary(machine, f64::tan),
        b'T' => unary(machine, f64::atan),
        b'x' => unary(machine, f64::sinh),
        b'X' => unary(machine, f64::asinh),
        b'y' => unary(machine, f64::cosh),
        b'Y' => unary(machine, f64::acosh),
        b'z' => unary(machine, f64::tanh),
        b'Z' => unary(machine, f64::atanh),

        b'v' => unary(machine, libm::erf),
        b'V' => unary(machine, libm::erfc),
        b'u' => unary(machine, libm::tgamma),
        b'U' => unary(machine, libm::lgamma),

        b'e' => unary(machine, f64::exp),
        b'l' => unary(machine, f64::ln),
        b'2' => unary(machine, f64::log2),
        b'q' => unary(machine, f64::sqrt),
        b'3' => unary(machine, f64::cbrt),

        b'>' => unary(machine, f64::ceil),
        b'<' => unary(machine, f64::floor),
        b'_' => unary(machine, f64::trunc),
        b'|' => unary(machine, f64::abs),
        b'i' => unary(machine, f64::round),
        b'I' => unary(machine, f64::round_ties_even),

        b'f' => {
            let top = machine.stack.top_mut();
            let (frac, exp) = libm::frexp(*top);
            *top = frac;
            machine.stack.push(Value::from(exp));
        }
        b'F' => {
            let rhs = machine.stack.pop();
            let exp = int(rhs).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
            let top = machine.stack.top_mut();
            *top = libm::ldexp(*top, exp);
        }
        b'm' => {
            let top = machine.stack.top_mut();
            let (frac, int_part) = libm::modf(*top);
            *top = frac;
            machine.stack.push(int_part);
        }

        b'-' => unary(machine, |val| if val.is_sign_negative() { 1.0 } else { 0.0 }),
        b'+' => binary(machine, f64::copysign),

        other => return machine.undefined(other as char),
    }
    Ok(())
}

fn unary<W: Write>(machine: &mut Machine<W>, op: impl Fn(f64) -> f64) {
    let top = machine.stack.top_mut();
    *top = op(*top);
}

fn binary<W: Write>(machine: &mut Machine<W>, op: impl Fn(f64, f64) -> f64) {
    let rhs = machine.stack.pop();
    let top = machine.stack.top_mut();
    *top = op(*top, rhs);
}
