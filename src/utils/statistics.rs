//! Statistical utility functions

use ndarray::Array1;

/// Calculate mean of a slice, skipping non-finite values
pub fn mean(data: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for &x in data {
        if x.is_finite() {
            sum += x;
            n += 1;
        }
    }
    if n == 0 {
        return f64::NAN;
    }
    sum / n as f64
}

/// Calculate the p-th percentile (0-100) with linear interpolation
/// between order statistics, skipping non-finite values
pub fn percentile(data: &[f64], p: f64) -> f64 {
    let mut sorted: Vec<f64> = data.iter().filter(|x| x.is_finite()).copied().collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;

    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Calculate median, skipping non-finite values
pub fn median(data: &[f64]) -> f64 {
    percentile(data, 50.0)
}

/// Sample correlation between two series, using only rows where both
/// values are finite
///
/// Returns NAN when fewer than two overlapping observations exist or
/// either series has zero variance over the overlap.
pub fn correlation(x: &Array1<f64>, y: &Array1<f64>) -> f64 {
    let n = x.len().min(y.len());

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut count = 0usize;
    for i in 0..n {
        if x[i].is_finite() && y[i].is_finite() {
            sum_x += x[i];
            sum_y += y[i];
            count += 1;
        }
    }
    if count < 2 {
        return f64::NAN;
    }

    let mean_x = sum_x / count as f64;
    let mean_y = sum_y / count as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        if x[i].is_finite() && y[i].is_finite() {
            let dx = x[i] - mean_x;
            let dy = y[i] - mean_y;
            cov += dx * dy;
            var_x += dx * dx;
            var_y += dy * dy;
        }
    }

    if var_x > 1e-12 && var_y > 1e-12 {
        cov / (var_x.sqrt() * var_y.sqrt())
    } else {
        f64::NAN
    }
}

/// Subtract a series' own mean from each value (non-finite values are
/// skipped when computing the mean and passed through unchanged)
pub fn mean_center(data: &Array1<f64>) -> Array1<f64> {
    let values: Vec<f64> = data.to_vec();
    let m = mean(&values);
    if !m.is_finite() {
        return data.clone();
    }
    data.mapv(|x| x - m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_mean() {
        assert!((mean(&[1.0, 2.0, 3.0, 4.0, 5.0]) - 3.0).abs() < 1e-10);
        assert!((mean(&[1.0, f64::NAN, 3.0]) - 2.0).abs() < 1e-10);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_percentile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&data, 0.0), 1.0);
        assert_eq!(percentile(&data, 100.0), 4.0);
        // rank 1.5 sits midway between the 2nd and 3rd order statistics
        assert!((percentile(&data, 50.0) - 2.5).abs() < 1e-10);
        assert!((percentile(&data, 25.0) - 1.75).abs() < 1e-10);
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3.0);
        assert!((median(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < 1e-10);
        assert!(median(&[f64::NAN]).is_nan());
    }

    #[test]
    fn test_correlation() {
        let x = array![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = array![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((correlation(&x, &y) - 1.0).abs() < 1e-10);

        let y_neg = array![5.0, 4.0, 3.0, 2.0, 1.0];
        assert!((correlation(&x, &y_neg) - (-1.0)).abs() < 1e-10);
    }

    #[test]
    fn test_correlation_skips_missing_rows() {
        let x = array![1.0, f64::NAN, 3.0, 4.0, 5.0];
        let y = array![2.0, 10.0, 6.0, 8.0, 10.0];
        // the NAN row drops out and the remainder is perfectly linear
        assert!((correlation(&x, &y) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_correlation_degenerate() {
        let x = array![1.0, f64::NAN];
        let y = array![f64::NAN, 2.0];
        assert!(correlation(&x, &y).is_nan());

        let flat = array![3.0, 3.0, 3.0];
        let ramp = array![1.0, 2.0, 3.0];
        assert!(correlation(&flat, &ramp).is_nan());
    }

    #[test]
    fn test_mean_center() {
        let data = array![1.0, 2.0, 3.0];
        let centered = mean_center(&data);
        assert!((centered[0] + 1.0).abs() < 1e-10);
        assert!(centered[1].abs() < 1e-10);
        assert!((centered[2] - 1.0).abs() < 1e-10);
    }
}
