//! Custom assertions for integration tests

use serde_json::Value;

/// Assert that output is valid JSON and return parsed value
pub fn assert_valid_json(output: &str, context: &str) -> Value {
    serde_json::from_str(output).unwrap_or_else(|e| {
        panic!(
            "Expected valid JSON ({}): {}\nOutput:\n{}",
            context, e, output
        )
    })
}

/// Assert that output contains a substring
pub fn assert_contains(output: &str, needle: &str) {
    assert!(
        output.contains(needle),
        "Expected output to contain {:?}\nOutput:\n{}",
        needle,
        output
    );
}

/// Assert that output does not contain a substring
pub fn assert_not_contains(output: &str, needle: &str) {
    assert!(
        !output.contains(needle),
        "Expected output NOT to contain {:?}\nOutput:\n{}",
        needle,
        output
    );
}

/// Assert that `first` appears before `second` in the output
pub fn assert_ordered(output: &str, first: &str, second: &str) {
    let a = output
        .find(first)
        .unwrap_or_else(|| panic!("{:?} not found in:\n{}", first, output));
    let b = output
        .find(second)
        .unwrap_or_else(|| panic!("{:?} not found in:\n{}", second, output));
    assert!(a < b, "Expected {:?} before {:?} in:\n{}", first, second, output);
}

/// Headings of the given level, in document order
pub fn headings(markdown: &str, level: usize) -> Vec<String> {
    let prefix = format!("{} ", "#".repeat(level));
    markdown
        .lines()
        .filter_map(|line| line.strip_prefix(prefix.as_str()))
        .map(|s| s.to_string())
        .collect()
}
