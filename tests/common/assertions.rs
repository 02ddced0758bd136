//! Assertion utilities for testing.
//!
//! Floating-point comparisons and checks on the JSON shapes the API returns.

use serde_json::Value;

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that a value is a JSON array of single-key objects and return the entries.
///
/// # Panics
///
/// Panics if `json` is not an array or if any element has other than one key.
pub fn single_key_entries(json: &Value) -> Vec<(String, Value)> {
    json.as_array()
        .expect("Expected a JSON array")
        .iter()
        .map(|item| {
            let object = item.as_object().expect("Expected a JSON object");
            assert_eq!(object.len(), 1, "Expected a single key in {}", item);
            let (key, value) = object.iter().next().unwrap();
            (key.clone(), value.clone())
        })
        .collect()
}

/// Assert that a date string lies inside an inclusive string range
pub fn assert_date_in_range(date: &str, start: &str, end: &str) {
    assert!(
        date >= start && date <= end,
        "Date {} not in range {}..={}",
        date,
        start,
        end
    );
}

/// The `(TMIN, TAVG, TMAX)` triple of a temperature summary response
pub fn summary_triple(json: &Value) -> (Option<f64>, Option<f64>, Option<f64>) {
    let items = json.as_array().expect("Expected a JSON array");
    assert_eq!(items.len(), 1, "Expected exactly one summary object");

    let summary = &items[0];
    (
        summary["TMIN"].as_f64(),
        summary["TAVG"].as_f64(),
        summary["TMAX"].as_f64(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(1.0, 1.0 + 1e-12, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_single_key_entries() {
        let json = serde_json::json!([{"2017-01-01": 1.5}, {"2017-01-02": null}]);
        let entries = single_key_entries(&json);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "2017-01-01");
        assert!(entries[1].1.is_null());
    }
}
