// ============================================================
// Layer 5 — Error Metric
// ============================================================
// Root-mean-squared error, the single formula used for both the
// training and the validation metric. The two are never
// cross-applied: training RMSE compares training predictions to
// training targets, validation RMSE compares validation
// predictions to validation targets.

use ndarray::ArrayView1;

/// RMSE between predicted and actual durations.
/// Empty inputs yield NaN rather than a panic.
pub fn rmse(predicted: ArrayView1<f64>, actual: ArrayView1<f64>) -> f64 {
    debug_assert_eq!(predicted.len(), actual.len());

    if predicted.is_empty() {
        return f64::NAN;
    }

    let mean_sq = predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (p - a) * (p - a))
        .sum::<f64>()
        / predicted.len() as f64;

    mean_sq.sqrt()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_perfect_predictions_give_zero() {
        let y = array![1.0, 2.0, 3.0];
        assert_eq!(rmse(y.view(), y.view()), 0.0);
    }

    #[test]
    fn test_known_value() {
        // errors are (1, -1) → mean square 1 → rmse 1
        let predicted = array![2.0, 1.0];
        let actual    = array![1.0, 2.0];
        assert!((rmse(predicted.view(), actual.view()) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input_is_nan() {
        let empty: ndarray::Array1<f64> = array![];
        assert!(rmse(empty.view(), empty.view()).is_nan());
    }
}
