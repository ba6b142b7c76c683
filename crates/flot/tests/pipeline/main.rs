//! End-to-end execution tests.
//!
//! These tests drive the complete assemble → prescan → dispatch path and
//! check the printed output. Tests are organized into modules by
//! functionality.

mod calls;
mod flow;
mod numerics;
mod stack_ops;

/// Run a program and return its output lines, including the final `DONE`.
pub fn run_lines(source: &str) -> Vec<String> {
    let mut out = Vec::new();
    flot::run(source, &mut out, false)
        .unwrap_or_else(|e| panic!("run failed for '{source}': {e}"));
    let text = String::from_utf8(out).expect("output was not UTF-8");
    text.lines().map(str::to_owned).collect()
}

/// Check printed lines exactly; `expected` omits the final `DONE`.
pub fn assert_output(source: &str, expected: &[&str]) {
    let mut want: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    want.push("DONE".to_owned());
    assert_eq!(run_lines(source), want, "output mismatch for '{source}'");
}

/// The values a program printed, in order.
pub fn printed_values(source: &str) -> Vec<f64> {
    let lines = run_lines(source);
    let (done, values) = lines.split_last().expect("missing DONE line");
    assert_eq!(done, "DONE", "missing DONE line for '{source}'");
    values
        .iter()
        .map(|line| {
            line.parse()
                .unwrap_or_else(|_| panic!("non-numeric line {line:?} for '{source}'"))
        })
        .collect()
}

/// Check printed values with a floating point tolerance.
pub fn assert_prints_approx(source: &str, expected: &[f64], epsilon: f64) {
    let actual = printed_values(source);
    assert_eq!(
        actual.len(),
        expected.len(),
        "print count mismatch for '{source}': expected {expected:?}, got {actual:?}"
    );
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            (a - e).abs() < epsilon,
            "print[{i}] mismatch for '{source}': expected {e}, got {a}"
        );
    }
}
