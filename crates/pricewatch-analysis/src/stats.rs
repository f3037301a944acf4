//! Statistics shared by the pipeline stages.

use statrs::statistics::{Data, Median};

/// Median of `values`; mean of the two middle values for even sizes.
/// Returns `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let m = Data::new(values.to_vec()).median();
    m.is_finite().then_some(m)
}

/// Quantile of an ascending-sorted slice by linear interpolation between
/// closest ranks: `h = (n - 1) * q`, result `v[⌊h⌋] + (h - ⌊h⌋)(v[⌊h⌋+1] - v[⌊h⌋])`.
///
/// Returns `None` for an empty slice or `q` outside [0, 1].
pub fn linear_quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    Some(sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo]))
}

/// Percentile rank of each value within `values`, in (0, 100].
///
/// Ties share the average of the ranks they span, and the rank is divided by
/// the group size: the largest value scores 100, a singleton scores 100.
/// Output is aligned with input.
pub fn average_rank_percentiles(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut pct = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // 1-based ranks start+1 ..= end share their mean.
        let avg_rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            pct[idx] = avg_rank / n as f64 * 100.0;
        }
        start = end;
    }
    pct
}

/// `(current - base) / base * 100`, or `None` when `base` is zero or the
/// result is not finite.
pub fn percent_change(current: f64, base: f64) -> Option<f64> {
    if base == 0.0 {
        return None;
    }
    let pct = (current - base) / base * 100.0;
    pct.is_finite().then_some(pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[7.5]), Some(7.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn quantile_interpolates() {
        let v = [10.0, 10.0, 10.0, 50.0, 50.0, 90.0];
        let q33 = linear_quantile(&v, 0.33).unwrap();
        let q66 = linear_quantile(&v, 0.66).unwrap();
        assert_eq!(q33, 10.0);
        assert!((q66 - 50.0).abs() < 1e-9);
        assert_eq!(linear_quantile(&[1.0, 3.0], 0.5), Some(2.0));
        assert_eq!(linear_quantile(&v, 1.0), Some(90.0));
        assert_eq!(linear_quantile(&v, 0.0), Some(10.0));
        assert_eq!(linear_quantile(&[], 0.5), None);
    }

    #[test]
    fn ranks_average_ties() {
        let pct = average_rank_percentiles(&[10.0, 20.0, 20.0, 40.0]);
        assert_eq!(pct, vec![25.0, 62.5, 62.5, 100.0]);
        assert_eq!(average_rank_percentiles(&[5.0]), vec![100.0]);
        assert_eq!(average_rank_percentiles(&[3.0, 3.0]), vec![75.0, 75.0]);
    }

    #[test]
    fn percent_change_guards_zero_base() {
        assert_eq!(percent_change(50.0, 100.0), Some(-50.0));
        assert_eq!(percent_change(20.0, 0.0), None);
        assert_eq!(percent_change(0.0, 0.0), None);
    }
}
