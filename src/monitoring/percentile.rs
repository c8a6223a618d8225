//! Percentile estimation over duration samples
//!
//! Discrete nearest-rank estimator: for percentile `p` over `len` sorted
//! samples the index is `floor(len * p)`. The metrics snapshot and the
//! alert evaluation both rely on this exact rule; an interpolated estimator
//! would shift boundary values. Empty input yields 0 for every requested
//! point; callers treat 0 as "no data", never as a measured value.

/// Calculate one percentile from sorted values
pub fn percentile(sorted_values: &[f64], point: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let index = (sorted_values.len() as f64 * point).floor() as usize;
    sorted_values[index.min(sorted_values.len() - 1)]
}

/// Calculate several percentiles in one pass over sorted values
pub fn percentiles(sorted_values: &[f64], points: &[f64]) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|&p| (p, percentile(sorted_values, p)))
        .collect()
}

/// Calculate the average of a sample set
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_determinism() {
        let samples = [10.0, 20.0, 30.0, 40.0, 50.0];
        // index = floor(5 * 0.5) = 2
        assert_eq!(percentile(&samples, 0.5), 30.0);
        // index = floor(5 * 0.95) = 4
        assert_eq!(percentile(&samples, 0.95), 50.0);
        assert_eq!(percentile(&samples, 0.99), 50.0);
    }

    #[test]
    fn test_percentile_empty_returns_zero() {
        assert_eq!(percentile(&[], 0.5), 0.0);
        assert_eq!(percentile(&[], 0.99), 0.0);
    }

    #[test]
    fn test_percentile_single_sample() {
        assert_eq!(percentile(&[42.0], 0.5), 42.0);
        assert_eq!(percentile(&[42.0], 0.99), 42.0);
    }

    #[test]
    fn test_percentile_full_point_clamps() {
        let samples = [1.0, 2.0, 3.0];
        // floor(3 * 1.0) = 3 clamps to the last index
        assert_eq!(percentile(&samples, 1.0), 3.0);
    }

    #[test]
    fn test_percentiles_multi_point() {
        let samples = [10.0, 20.0, 30.0, 40.0, 50.0];
        let result = percentiles(&samples, &[0.5, 0.95]);
        assert_eq!(result, vec![(0.5, 30.0), (0.95, 50.0)]);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(&[10.0, 20.0, 30.0]), 20.0);
        assert_eq!(average(&[]), 0.0);
    }
}
