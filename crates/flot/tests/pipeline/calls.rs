//! Tests for call/goto, global labels, and the destination encoding.

use super::{assert_output, run_lines};

#[test]
fn call_and_return_through_encoded_pc() {
    // The callee returns by popping the encoded PC that `C` pushed.
    assert_output("100C 5' X @100 G", &["5"]);
}

#[test]
fn polynomial_via_call_and_rotates() {
    // a*x^2 + b*x + c with (a, b, c, x) = (1, 2, 3, 4).
    let src = "1 2 3 4 100C ' X\n@100 S DD* 5R*S 4R*+ 2R+S G";
    assert_output(src, &["27"]);
}

#[test]
fn looped_caller_prints_eighteen_times() {
    let src = "17 La 100C 1- D ? Ba : X ; @100 42'P G";
    assert_output(src, &["42"; 18]);
}

#[test]
fn call_to_unknown_label_terminates() {
    assert_output("7C 5'", &[]);
}

#[test]
fn goto_rejects_null_destinations() {
    // Zero, a positive non-label, and NaN all resolve to the
    // terminating PC.
    assert_output("0 G 5'", &[]);
    assert_output("7 G 5'", &[]);
    assert_output("1~\\q G 5'", &[]);
}

#[test]
fn global_label_last_definition_wins() {
    assert_output("5G X @5 1' G X @5 2' X", &["2"]);
}

#[test]
fn negative_destination_is_a_computed_goto() {
    // -8 is the encoding of PC 7; `G` lands on the `5` directly.
    assert_output("8~ G X 5'", &["5"]);
}

#[test]
fn fall_off_the_end_terminates_cleanly() {
    let lines = run_lines("1 2 +");
    assert_eq!(lines, ["DONE"]);
}
