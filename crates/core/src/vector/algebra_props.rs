//! Property-based tests for the vector engine.
//!
//! - Round trip: `restore(store(v)) == v`
//! - Space closure of `+` and `-`
//! - Dot/evaluate consistency
//! - Gamma self-consistency
//! - Forex invariants

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::*;

const CODES: [&str; 4] = ["EUR", "GBP", "JPY", "USD"];

fn test_space() -> Arc<CurrencySpace> {
    Arc::new(CurrencySpace::new(CODES).unwrap())
}

/// Strategy for amounts with up to 13 digits, up to 6 of them fractional.
fn amount() -> impl Strategy<Value = Decimal> {
    (-10_000_000_000_000i64..10_000_000_000_000i64, 0u32..=6)
        .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// Strategy for positive rates between 0.001 and 1,000,000.
fn rate() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|v| Decimal::new(v, 3))
}

fn money_vector() -> impl Strategy<Value = MoneyVector> {
    prop::collection::vec(amount(), CODES.len())
        .prop_map(|components| MoneyVector::from_components(test_space(), components).unwrap())
}

/// Forex vector based on USD with random rates for the other three currencies.
fn forex_vector() -> impl Strategy<Value = ForexVector> {
    prop::collection::vec(rate(), 3).prop_map(|rates| {
        let mapping = ForexRates::new("USD", ["EUR", "GBP", "JPY"].into_iter().zip(rates));
        let overrides: [(&str, i32); 0] = [];
        forex(&mapping, overrides).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Storing and restoring gives back an equal vector.
    #[test]
    fn prop_store_restore_round_trip(v in money_vector()) {
        let restored = restore(&store(&v)).unwrap();
        prop_assert_eq!(restored, v);
    }

    /// Sums and differences stay in the operands' space.
    #[test]
    fn prop_add_sub_stay_in_space(a in money_vector(), b in money_vector()) {
        let sum = (&a + &b).unwrap();
        let diff = (&sum - &b).unwrap();
        prop_assert_eq!(sum.space().axes(), a.space().axes());
        prop_assert_eq!(sum.kind(), VectorKind::Money);
        prop_assert_eq!(diff, a);
    }

    /// Adding a forex vector to money gives a plain money vector in the same space.
    #[test]
    fn prop_forex_sum_is_money(v in money_vector(), fo in forex_vector()) {
        let sum = (&v + &fo).unwrap();
        prop_assert_eq!(sum.kind(), VectorKind::Money);
        prop_assert_eq!(sum.space().axes(), fo.space().axes());
    }

    /// `evaluate(v, t, F) == dot(v, F) / F[t]`.
    #[test]
    fn prop_evaluate_matches_dot(
        v in money_vector(),
        fo in forex_vector(),
        target in prop::sample::select(CODES.to_vec()),
    ) {
        let expected = dot(&v, &fo)
            .unwrap()
            .checked_div(fo.get(target).unwrap())
            .unwrap();
        prop_assert_eq!(evaluate(&v, target, &fo).unwrap(), expected);
    }

    /// Converting gives a vector whose only value sits on the target axis.
    #[test]
    fn prop_convert_targets_one_axis(
        v in money_vector(),
        fo in forex_vector(),
        target in prop::sample::select(CODES.to_vec()),
    ) {
        let converted = convert(&v, target, &fo).unwrap();
        for (axis, value) in converted.iter() {
            if axis != target {
                prop_assert!(value.is_zero());
            }
        }
    }

    /// Rebasing onto any axis gives that axis a rate of exactly 1.
    #[test]
    fn prop_gamma_self_consistent(
        fo in forex_vector(),
        target in prop::sample::select(CODES.to_vec()),
    ) {
        let g = gamma(&fo, target).unwrap();
        prop_assert_eq!(g.get(target), Some(Decimal::ONE));
        prop_assert!(g.components().iter().all(|c| c.scale() == DEFAULT_GAMMA_PLACES));
    }

    /// Forex vectors are positive, have a unit base and cannot be negated.
    #[test]
    fn prop_forex_invariants(fo in forex_vector()) {
        prop_assert!(fo.components().iter().all(|c| *c > Decimal::ZERO));
        prop_assert_eq!(fo.get(fo.base()), Some(Decimal::ONE));
        prop_assert!(matches!(-&fo, Err(VectorError::Integrity(_))));
    }

    /// Any zero or negative rate is rejected.
    #[test]
    fn prop_non_positive_rate_rejected(bad in -1_000_000i64..=0) {
        let mapping = ForexRates::new("USD", [("EUR", 1), ("JPY", bad)]);
        let overrides: [(&str, i64); 0] = [];
        prop_assert!(matches!(forex(&mapping, overrides), Err(VectorError::Integrity(_))));
    }
}
