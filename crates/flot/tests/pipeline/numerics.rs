//! Tests for bitwise opcodes, coercions, and the math-library escapes.

use super::{assert_output, assert_prints_approx};

#[test]
fn bitwise_and_of_small_integers() {
    assert_output("7 5 &'", &["5"]);
    assert_output("6 3 |'", &["7"]);
    assert_output("6 3 ^'", &["5"]);
}

#[test]
fn integer_coercion_truncates() {
    assert_output("3.7 I'", &["3"]);
    assert_output("3.7~ I'", &["-3"]);
}

#[test]
fn unsigned_coercion_clamps_negatives() {
    assert_output("5~ U'", &["0"]);
}

#[test]
fn coercion_clamps_out_of_range() {
    // 1e20 saturates at the i64 ceiling, 2^63.
    assert_output("1..20 I'", &["9223372036854775808"]);
}

#[test]
fn nan_coerces_to_zero() {
    // sqrt(-1) is NaN; `I` turns it into 0.
    assert_output("1~\\qI'", &["0"]);
}

#[test]
fn shift_by_power_of_two() {
    assert_output("1 52 <'", &["4503599627370496"]);
    assert_output("8 2 >'", &["2"]);
}

#[test]
fn fmod_keeps_the_sign_of_the_dividend() {
    assert_output("7 3 %'", &["1"]);
    assert_output("7~ 3 %'", &["-1"]);
}

#[test]
fn library_escapes_run_through_the_pipeline() {
    assert_output("2 10\\^'", &["1024"]);
    assert_output("3 4\\h'", &["5"]);
    assert_prints_approx("1\\e\\l'", &[1.0], 1e-12);
}

#[test]
fn traced_run_reports_step_count() {
    let mut out = Vec::new();
    let steps = flot::run("X", &mut out, true).unwrap();
    assert_eq!(steps, 1);
    assert_eq!(out, b"DONE  1 steps\n");
}
