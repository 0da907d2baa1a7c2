use geostat_pvalue::{PValueEngine, PValueQuery, Rejection};
use proptest::prelude::*;

proptest! {
    #[test]
    fn two_tailed_is_twice_one_tailed(hundredths in 0u32..410, n in 1u32..500) {
        let engine = PValueEngine::embedded();
        let z = f64::from(hundredths) / 100.0;
        let one = engine.evaluate(&PValueQuery::new(z, n, Rejection::Positive)).unwrap();
        let two = engine.evaluate(&PValueQuery::new(z, n, Rejection::TwoTailed)).unwrap();
        prop_assert_eq!(one.area, two.area);
        prop_assert_eq!(two.pvalue, 2.0 * one.pvalue);
    }

    #[test]
    fn negative_region_mirrors_positive(stat in -4.0f64..4.0, n in 1u32..500) {
        let engine = PValueEngine::embedded();
        let pos = engine.evaluate(&PValueQuery::new(stat, n, Rejection::Positive)).unwrap();
        let neg = engine.evaluate(&PValueQuery::new(stat, n, Rejection::Negative)).unwrap();
        prop_assert_eq!(neg.pvalue, -pos.pvalue);
    }

    #[test]
    fn one_tailed_pvalue_is_a_probability(stat in -4.0f64..4.0, n in 1u32..500) {
        let result = PValueEngine::embedded().pvalue(stat, n, 1).unwrap();
        prop_assert!((0.0..=0.5).contains(&result.pvalue), "{:?}", result);
        prop_assert!((result.area + result.pvalue - 0.5).abs() < 1e-9);
    }

    #[test]
    fn lookups_are_deterministic(stat in -4.0f64..4.0, n in 1u32..500, min_n in 1u32..60) {
        let engine = PValueEngine::embedded();
        let query = PValueQuery::new(stat, n, Rejection::TwoTailed).with_min_n(min_n);
        let first = engine.evaluate(&query).unwrap();
        let second = engine.evaluate(&query).unwrap();
        prop_assert_eq!(first.pvalue.to_bits(), second.pvalue.to_bits());
        prop_assert_eq!(first.area.to_bits(), second.area.to_bits());
    }

    #[test]
    fn larger_chi_square_never_raises_pvalue(
        a in 0.0f64..40.0,
        b in 0.0f64..40.0,
        categories in 2u32..30,
    ) {
        let engine = PValueEngine::embedded();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let p_low = engine.evaluate(&PValueQuery::chi_square(low, categories)).unwrap();
        let p_high = engine.evaluate(&PValueQuery::chi_square(high, categories)).unwrap();
        prop_assert!(p_high.pvalue <= p_low.pvalue);
    }
}
