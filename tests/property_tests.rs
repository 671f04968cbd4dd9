use loan_calculator::amortization::engine::{AmortizationEngine, RepaymentMethod};
use loan_calculator::amortization::equal_payment::compute_equal_payment;
use loan_calculator::amortization::equal_principal::compute_equal_capital;
use loan_calculator::amortization::terms::LoanTerms;
use loan_calculator::core::schedule::Schedule;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Principal between 0.00 and 1,000,000.00 in whole cents.
fn arb_principal() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Non-zero annual rate between 0.01% and 30%.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (1i64..=3_000i64).prop_map(|bp| Decimal::new(bp, 4))
}

/// Commission between 0% and 5%, zero included.
fn arb_commission() -> impl Strategy<Value = Decimal> {
    (0i64..=500i64).prop_map(|bp| Decimal::new(bp, 4))
}

fn arb_terms() -> impl Strategy<Value = LoanTerms> {
    (arb_principal(), arb_rate(), 1u32..=120u32, arb_commission()).prop_map(
        |(principal, rate, months, commission)| LoanTerms::new(principal, rate, months, commission),
    )
}

fn all_amounts_at_cents(schedule: &Schedule) -> bool {
    schedule.periods().iter().all(|p| {
        p.payment().scale() == 2
            && p.interest().scale() == 2
            && p.principal().scale() == 2
            && p.commission().scale() == 2
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Totals are the exact running sums of the per-period values,
    // and terms run 1..=N.
    #[test]
    fn totals_match_period_sums(terms in arb_terms()) {
        for method in RepaymentMethod::ALL {
            let schedule = AmortizationEngine::compute(method, &terms).unwrap();
            prop_assert_eq!(schedule.len(), terms.months as usize);
            prop_assert!(schedule.is_consistent(), "{} schedule totals drifted", method);
        }
    }

    // Equal payment: one installment amount for the whole term, split
    // exactly into interest and principal.
    #[test]
    fn equal_payment_is_constant(terms in arb_terms()) {
        let schedule = compute_equal_payment(&terms).unwrap();
        let payment = schedule.periods()[0].payment();
        for p in schedule.periods() {
            prop_assert_eq!(p.payment(), payment);
            prop_assert_eq!(p.principal(), p.payment() - p.interest());
        }
    }

    // Equal principal: every slice but the last is identical and the
    // slices add up to the principal to the cent.
    #[test]
    fn equal_principal_closes_exactly(terms in arb_terms()) {
        let schedule = compute_equal_capital(&terms).unwrap();
        let periods = schedule.periods();
        let base = periods[0].principal();
        for p in &periods[..periods.len() - 1] {
            prop_assert_eq!(p.principal(), base);
        }
        prop_assert_eq!(schedule.total_principal(), terms.principal);
    }

    // Without interest both methods produce the same schedule.
    #[test]
    fn zero_rate_methods_coincide(
        principal in arb_principal(),
        months in 1u32..=120u32,
        commission in arb_commission(),
    ) {
        let terms = LoanTerms::new(principal, Decimal::ZERO, months, commission);
        prop_assert_eq!(
            compute_equal_payment(&terms).unwrap(),
            compute_equal_capital(&terms).unwrap()
        );
    }

    // Every reported amount has exactly two decimal places.
    #[test]
    fn amounts_have_cent_scale(terms in arb_terms()) {
        for method in RepaymentMethod::ALL {
            let schedule = AmortizationEngine::compute(method, &terms).unwrap();
            prop_assert!(all_amounts_at_cents(&schedule));
            prop_assert_eq!(schedule.total_payment().scale(), 2);
        }
    }

    // Same inputs, same schedule. No hidden state between calls.
    #[test]
    fn computation_is_deterministic(terms in arb_terms()) {
        for method in RepaymentMethod::ALL {
            let first = AmortizationEngine::compute(method, &terms).unwrap();
            let second = AmortizationEngine::compute(method, &terms).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    // Commission is interest at a different rate: with the commission rate
    // equal to the loan rate, the two streams are identical.
    #[test]
    fn commission_mirrors_interest(
        principal in arb_principal(),
        rate in arb_rate(),
        months in 1u32..=120u32,
    ) {
        let terms = LoanTerms::new(principal, rate, months, rate);
        for method in RepaymentMethod::ALL {
            let schedule = AmortizationEngine::compute(method, &terms).unwrap();
            for p in schedule.periods() {
                prop_assert_eq!(p.commission(), p.interest());
            }
        }
    }
}
