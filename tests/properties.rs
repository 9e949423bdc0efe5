//! Property tests for the reduction invariants

use gridstats::grid::Grid;
use gridstats::statistics::{percentile, reduce_all, reduce_along_axis, StatOperation};
use proptest::prelude::*;

/// Finite f64 vectors of bounded magnitude.
fn finite_vec(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(-1e6_f64..1e6, min_len..=max_len)
}

/// Integer rows of one shared length.
fn integer_rows() -> impl Strategy<Value = Vec<Vec<i64>>> {
    (1_usize..6, 1_usize..6).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec(proptest::collection::vec(-1000_i64..1000, cols), rows)
    })
}

fn reference_median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn min_and_max_bound_every_element(values in finite_vec(1, 200)) {
        let grid = Grid::from_vec(values.clone());
        let min = reduce_all(&grid, StatOperation::Min).unwrap();
        let max = reduce_all(&grid, StatOperation::Max).unwrap();
        for &x in &values {
            prop_assert!(min <= x && x <= max, "{} <= {} <= {} violated", min, x, max);
        }
    }

    #[test]
    fn sum_ignores_order(values in finite_vec(0, 100).prop_map(|v| {
        // Integral values keep the comparison exact
        v.into_iter().map(f64::trunc).collect::<Vec<_>>()
    })) {
        let forward = reduce_all(&Grid::from_vec(values.clone()), StatOperation::Sum).unwrap();
        let mut reversed = values.clone();
        reversed.reverse();
        let backward = reduce_all(&Grid::from_vec(reversed), StatOperation::Sum).unwrap();
        let mut sorted = values;
        sorted.sort_by(f64::total_cmp);
        let ascending = reduce_all(&Grid::from_vec(sorted), StatOperation::Sum).unwrap();
        prop_assert_eq!(forward, backward);
        prop_assert_eq!(forward, ascending);
    }

    #[test]
    fn percentile_extremes_are_min_and_max(values in finite_vec(1, 200)) {
        let grid = Grid::from_vec(values.clone());
        let min = reduce_all(&grid, StatOperation::Min).unwrap();
        let max = reduce_all(&grid, StatOperation::Max).unwrap();
        prop_assert_eq!(percentile(&values, 0.0).unwrap(), min);
        prop_assert_eq!(percentile(&values, 100.0).unwrap(), max);
    }

    #[test]
    fn fiftieth_percentile_is_median(values in finite_vec(1, 200)) {
        let p50 = percentile(&values, 50.0).unwrap();
        let expected = reference_median(&values);
        let tolerance = 1e-9 * expected.abs().max(1.0);
        prop_assert!((p50 - expected).abs() <= tolerance, "{} != {}", p50, expected);
    }

    #[test]
    fn percentile_is_monotone_in_rank(
        values in finite_vec(1, 100),
        p in 0.0_f64..=100.0,
        q in 0.0_f64..=100.0,
    ) {
        let (lo, hi) = if p <= q { (p, q) } else { (q, p) };
        let lower = percentile(&values, lo).unwrap();
        let upper = percentile(&values, hi).unwrap();
        // Interpolation may round by an ulp at segment boundaries
        prop_assert!(lower <= upper + 1e-9 * upper.abs().max(1.0), "{} > {}", lower, upper);
    }

    #[test]
    fn axis_sums_add_up_to_total(rows in integer_rows()) {
        let grid = Grid::from_rows(rows).unwrap();
        let total = reduce_all(&grid, StatOperation::Sum).unwrap();
        let per_column = reduce_along_axis(&grid, StatOperation::Sum, 0).unwrap();
        let per_row = reduce_along_axis(&grid, StatOperation::Sum, 1).unwrap();

        prop_assert_eq!(per_column.len(), grid.shape()[1]);
        prop_assert_eq!(per_row.len(), grid.shape()[0]);
        prop_assert_eq!(per_column.sum(), total);
        prop_assert_eq!(per_row.sum(), total);
    }

    #[test]
    fn standard_deviation_is_non_negative(values in finite_vec(1, 100)) {
        let std = reduce_all(&Grid::from_vec(values), StatOperation::Std).unwrap();
        prop_assert!(std >= 0.0);
    }
}
