//! Tests for stack opcodes and the implicit zero floor.

use super::{assert_output, run_lines};

#[test]
fn empty_program_prints_only_the_marker() {
    assert_eq!(run_lines(""), ["DONE"]);
}

#[test]
fn lone_pop_is_not_an_error() {
    assert_eq!(run_lines("P"), ["DONE"]);
}

#[test]
fn swap_and_print() {
    assert_output("1 2 S'P'", &["1", "2"]);
}

#[test]
fn dup_then_square() {
    assert_output("4D*'", &["16"]);
}

#[test]
fn rotate_zero_is_identity() {
    assert_output("1 2 3 0R 'P'P'", &["3", "2", "1"]);
}

#[test]
fn rotate_extracts_nth_from_top() {
    assert_output("1 2 3 2R 'P'P'", &["1", "3", "2"]);
}

#[test]
fn rotate_past_bottom_reads_the_floor() {
    assert_output("5 9R'", &["0"]);
}

#[test]
fn drop_n_discards_from_the_top() {
    assert_output("1 2 3 4 5 3Q 'P'", &["2", "1"]);
}

#[test]
fn print_on_empty_stack_materializes_zero() {
    assert_output("'", &["0"]);
}

#[test]
fn variables_survive_across_the_program() {
    assert_output("3Ma 4Mb a b +'", &["7"]);
}
