use geostat_tables::{nearest, nearest_index, TableCatalog, Tails};
use proptest::prelude::*;

proptest! {
    #[test]
    fn normal_lookup_is_deterministic(hundredths in 0u32..410) {
        let normal = TableCatalog::embedded().normal().unwrap();
        let z = f64::from(hundredths) / 100.0;
        let first = normal.probability_for_score(z).unwrap();
        let second = normal.probability_for_score(z).unwrap();
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn t_lookup_is_deterministic(t in 0.0f64..10.0, df in 1u32..2000) {
        let table = TableCatalog::embedded().student_t(Tails::One).unwrap();
        let first = table.confidence_for_statistic(t, df).unwrap();
        let second = table.confidence_for_statistic(t, df).unwrap();
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }

    // Below z = 3 repeated areas sit in adjacent columns, so the nearest cell
    // is never more than one column away.
    #[test]
    fn score_round_trip_within_one_step(hundredths in 0u32..=300) {
        let normal = TableCatalog::embedded().normal().unwrap();
        let z = f64::from(hundredths) / 100.0;
        let area = normal.probability_for_score(z).unwrap();
        let back = normal.score_for_probability(area, Tails::One).unwrap();
        prop_assert!(
            (back - z).abs() <= 0.01 + 1e-9,
            "z = {}, area = {}, back = {}",
            z,
            area,
            back
        );
    }

    #[test]
    fn nearest_returns_a_candidate(
        candidates in prop::collection::vec(-1000.0f64..1000.0, 1..50),
        target in -2000.0f64..2000.0,
    ) {
        let found = nearest(&candidates, target).unwrap();
        prop_assert!(candidates.contains(&found));
        let best = (found - target).abs();
        prop_assert!(candidates.iter().all(|c| (c - target).abs() >= best));
    }

    #[test]
    fn nearest_prefers_first_of_equals(
        value in -100.0f64..100.0,
        copies in 2usize..6,
        target in -200.0f64..200.0,
    ) {
        let candidates = vec![value; copies];
        prop_assert_eq!(nearest_index(candidates, target).unwrap(), 0);
    }

    #[test]
    fn out_of_range_scores_are_rejected(z in 4.1f64..1.0e6) {
        let normal = TableCatalog::embedded().normal().unwrap();
        prop_assert!(normal.probability_for_score(z).unwrap_err().is_out_of_range());
    }
}
