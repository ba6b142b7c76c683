//! Tests for conditionals, labels, and whitespace skip chains.

use super::assert_output;

#[test]
fn counted_loop_prints_ten_times() {
    // Counter runs 9..0 inclusive: ten iterations.
    assert_output("9 La 42'P 1- D? Ba ;", &["42"; 10]);
}

#[test]
fn conditional_takes_else_then_crosses_back() {
    // The taken `?` lands after the `:`; `Ba` then re-enters the then
    // branch, whose `:` exits the construct.
    assert_output("1~ ? La 42'P : 17'P Ba ;", &["17", "42"]);
}

#[test]
fn conditional_not_taken_runs_then_branch() {
    assert_output("1 ? 5' : 9' ; 3'", &["5", "3"]);
}

#[test]
fn conditional_taken_runs_else_branch() {
    assert_output("1~ ? 5' : 9' ; 3'", &["9", "3"]);
}

#[test]
fn conditional_without_else_skips_past_semicolon() {
    assert_output("1~ ? 5' ; 3'", &["3"]);
    assert_output("1 ? 5' ; 3'", &["5", "3"]);
}

#[test]
fn nested_conditional_resolves_inner_frame() {
    // Outer and inner both taken: inner else, outer else tail, shared
    // continuation.
    assert_output("1~ ? 5' : 1~ ? 6' : 7' ; 8' ; 9'", &["7", "8", "9"]);
    // Outer not taken: then branch jumps past both closers.
    assert_output("1 ? 5' : 1~ ? 6' : 7' ; 8' ; 9'", &["5", "9"]);
}

#[test]
fn orphan_conditional_terminates() {
    assert_output("1~ ? 5'", &[]);
    // Not taken, execution just continues.
    assert_output("1 ? 5'", &["5"]);
}

#[test]
fn forward_branch_skips_to_label() {
    assert_output("Fa 9' La 7'", &["7"]);
}

#[test]
fn backward_branch_to_unknown_label_terminates() {
    assert_output("Bz 9'", &[]);
}

#[test]
fn label_definition_is_a_skip() {
    // `L` and its selector are pass-through at run time.
    assert_output("La 5'", &["5"]);
}

#[test]
fn whitespace_forms_are_equivalent() {
    assert_output("1\t2\u{b}+'", &["3"]);
}
