use crate::array::Array;
use num_traits::Float;
use std::fmt::Debug;

/// Checks that an array has the expected shape and that its elements are
/// within `tolerance` of `expected_data`.
/// Panics on the first difference.
pub fn check_array_near<F: Float + Debug>(
    actual: &Array<F>,
    expected_shape: &[usize],
    expected_data: &[f64],
    tolerance: f64,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    assert_eq!(
        actual.numel(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual.data().iter().zip(expected_data.iter()).enumerate() {
        let a = a.to_f64().unwrap_or(f64::NAN);
        let diff = (a - e).abs();
        if !approx::abs_diff_eq!(a, *e, epsilon = tolerance) {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Checks a scalar payload against an expected value.
pub fn check_scalar_near<F: Float + Debug>(actual: F, expected: f64, tolerance: f64) {
    let a = actual.to_f64().unwrap_or(f64::NAN);
    assert!(
        approx::abs_diff_eq!(a, expected, epsilon = tolerance),
        "Value mismatch: actual={:?}, expected={:?}, tolerance={:?}",
        a,
        expected,
        tolerance
    );
}
