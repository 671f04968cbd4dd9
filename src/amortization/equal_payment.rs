//! Equal-payment (equated installment) amortization.
//!
//! The installment is constant; its split between interest and principal
//! shifts towards principal as the loan ages. Both the installment and each
//! period's interest come straight from closed-form annuity formulas, never
//! from a running balance.

use crate::amortization::equal_principal::compute_equal_capital;
use crate::amortization::terms::LoanTerms;
use crate::core::error::ScheduleError;
use crate::core::money::{
    divide, exact, exact_count, pow, sub_money, zero_money, Money, Rate, MONEY_SCALE,
};
use crate::core::period::Period;
use crate::core::schedule::{Schedule, ScheduleBuilder};
use bigdecimal::BigDecimal;
use log::{debug, trace};
use num_traits::{One, Zero};

/// Closed-form annuity at one monthly rate.
///
/// `growth` is `(1 + rate)^months`, evaluated exactly once and shared by the
/// installment and every interest lookup.
struct Annuity {
    invest: BigDecimal,
    rate: BigDecimal,
    growth: BigDecimal,
    months: u32,
}

impl Annuity {
    fn new(invest: Money, month_rate: Rate, months: u32) -> Self {
        let rate = exact(month_rate);
        let growth = pow(&(BigDecimal::one() + &rate), months);
        Self {
            invest: exact(invest),
            rate,
            growth,
            months,
        }
    }

    /// `invest * r * (1+r)^n / ((1+r)^n - 1)`, or `invest / n` at a zero rate.
    fn installment(&self) -> Result<Money, ScheduleError> {
        if self.rate.is_zero() {
            return divide(&self.invest, &exact_count(self.months), MONEY_SCALE, "installment");
        }
        let numerator = &self.invest * &(&self.rate * &self.growth);
        divide(&numerator, &self.denominator(), MONEY_SCALE, "installment")
    }

    /// `invest * r * ((1+r)^n - (1+r)^(i-1)) / ((1+r)^n - 1)`, or zero at a zero rate.
    fn interest(&self, term: u32) -> Result<Money, ScheduleError> {
        if self.rate.is_zero() {
            return Ok(zero_money());
        }
        let elapsed = pow(&(BigDecimal::one() + &self.rate), term - 1);
        let numerator = &(&self.invest * &self.rate) * &(&self.growth - &elapsed);
        divide(&numerator, &self.denominator(), MONEY_SCALE, "annuity interest")
    }

    fn denominator(&self) -> BigDecimal {
        &self.growth - &BigDecimal::one()
    }
}

/// Constant installment of an equal-payment loan.
pub fn installment(invest: Money, month_rate: Rate, months: u32) -> Result<Money, ScheduleError> {
    Annuity::new(invest, month_rate, months).installment()
}

/// Interest part of installment `term` of an equal-payment loan.
///
/// Also yields the commission of a period when given the commission rate.
pub fn interest_portion(
    invest: Money,
    month_rate: Rate,
    months: u32,
    term: u32,
) -> Result<Money, ScheduleError> {
    Annuity::new(invest, month_rate, months).interest(term)
}

/// Build an equal-payment schedule.
///
/// A zero annual rate makes the two methods coincide, so the schedule is
/// produced by [`compute_equal_capital`] instead.
///
/// # Errors
///
/// Besides the input checks of [`LoanTerms::validate`], a monthly rate of
/// `-2` over an even term makes the annuity denominator vanish and yields
/// [`ScheduleError::DivisionByZero`]. Amounts too large to be carried at
/// cents yield [`ScheduleError::Overflow`].
///
/// # Examples
///
/// ```
/// use loan_calculator::amortization::equal_payment::compute_equal_payment;
/// use loan_calculator::amortization::terms::LoanTerms;
/// use rust_decimal_macros::dec;
///
/// let terms = LoanTerms::new(dec!(10000), dec!(0.0414), 12, dec!(0.012));
/// let schedule = compute_equal_payment(&terms).unwrap();
/// assert!(schedule.periods().iter().all(|p| p.payment() == dec!(852.14)));
/// assert_eq!(schedule.total_interest(), dec!(225.68));
/// ```
pub fn compute_equal_payment(terms: &LoanTerms) -> Result<Schedule, ScheduleError> {
    terms.validate()?;
    if terms.annual_rate.is_zero() {
        debug!("zero annual rate, building equal principal schedule instead");
        return compute_equal_capital(terms);
    }

    let loan = Annuity::new(terms.principal, terms.monthly_rate()?, terms.months);
    let commission = Annuity::new(terms.principal, terms.monthly_commission()?, terms.months);
    let payment = loan.installment()?;

    let mut builder = ScheduleBuilder::with_capacity(terms.months);
    for term in 1..=terms.months {
        let interest = loan.interest(term)?;
        let principal = sub_money(payment, interest, "annuity principal")?;
        let fee = commission.interest(term)?;
        trace!(
            "equal payment term {}: interest={} principal={} commission={}",
            term,
            interest,
            principal,
            fee
        );
        builder.push(Period::new(term, interest, principal, fee)?)?;
    }

    let schedule = builder.build();
    debug!(
        "equal payment schedule: {} months, installment {}, total interest {}",
        terms.months,
        payment,
        schedule.total_interest()
    );
    Ok(schedule)
}
