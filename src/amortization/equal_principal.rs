//! Equal-principal amortization.
//!
//! Every installment repays the same slice of principal, `invest / month`
//! rounded to cents, except the last one, which absorbs the rounding so the
//! slices sum to the principal exactly. Interest is charged on a declining
//! balance built from that uncorrected base slice.

use crate::amortization::terms::LoanTerms;
use crate::core::error::ScheduleError;
use crate::core::money::{divide, exact, exact_count, round, Money, Rate, MONEY_SCALE};
use crate::core::period::Period;
use crate::core::schedule::{Schedule, ScheduleBuilder};
use bigdecimal::BigDecimal;
use log::{debug, trace};

/// Principal slice for every installment but the last.
pub fn base_principal(invest: Money, months: u32) -> Result<Money, ScheduleError> {
    divide(
        &exact(invest),
        &exact_count(months),
        MONEY_SCALE,
        "base principal",
    )
}

/// Principal repaid in installment `term`, with the last-period correction.
pub fn principal_portion(invest: Money, months: u32, term: u32) -> Result<Money, ScheduleError> {
    let base = base_principal(invest, months)?;
    if term != months {
        return Ok(base);
    }
    round(&outstanding(invest, base, term), MONEY_SCALE, "final principal")
}

/// Interest owed in installment `term` at `month_rate`.
///
/// The outstanding balance is taken as `invest - base * (term - 1)`, also for
/// the final installment whose principal was corrected.
pub fn declining_interest(
    invest: Money,
    month_rate: Rate,
    months: u32,
    term: u32,
) -> Result<Money, ScheduleError> {
    let base = base_principal(invest, months)?;
    let balance = outstanding(invest, base, term);
    round(&(balance * exact(month_rate)), MONEY_SCALE, "declining interest")
}

fn outstanding(invest: Money, base: Money, term: u32) -> BigDecimal {
    exact(invest) - exact(base) * exact_count(term - 1)
}

/// Build an equal-principal schedule.
///
/// # Errors
///
/// [`ScheduleError::InvalidTerm`] for a zero-month term and
/// [`ScheduleError::NegativePrincipal`] for a negative principal.
/// [`ScheduleError::Overflow`] when an installment or a running total can
/// no longer be carried at cents.
///
/// # Examples
///
/// ```
/// use loan_calculator::amortization::equal_principal::compute_equal_capital;
/// use loan_calculator::amortization::terms::LoanTerms;
/// use rust_decimal_macros::dec;
///
/// let terms = LoanTerms::new(dec!(10000), dec!(0.0414), 12, dec!(0.012));
/// let schedule = compute_equal_capital(&terms).unwrap();
/// assert_eq!(schedule.periods()[0].principal(), dec!(833.33));
/// assert_eq!(schedule.periods()[11].principal(), dec!(833.37));
/// assert_eq!(schedule.total_principal(), dec!(10000));
/// ```
pub fn compute_equal_capital(terms: &LoanTerms) -> Result<Schedule, ScheduleError> {
    terms.validate()?;
    let month_rate = terms.monthly_rate()?;
    let commission_rate = terms.monthly_commission()?;

    let mut builder = ScheduleBuilder::with_capacity(terms.months);
    for term in 1..=terms.months {
        let principal = principal_portion(terms.principal, terms.months, term)?;
        let interest = declining_interest(terms.principal, month_rate, terms.months, term)?;
        let commission =
            declining_interest(terms.principal, commission_rate, terms.months, term)?;
        trace!(
            "equal principal term {}: principal={} interest={} commission={}",
            term,
            principal,
            interest,
            commission
        );
        builder.push(Period::new(term, interest, principal, commission)?)?;
    }

    let schedule = builder.build();
    debug!(
        "equal principal schedule: {} months, total payment {}, total interest {}",
        terms.months,
        schedule.total_payment(),
        schedule.total_interest()
    );
    Ok(schedule)
}
