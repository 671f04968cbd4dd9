use crate::core::error::ScheduleError;
use crate::core::money::{add_money, zero_money, Money};
use crate::core::period::Period;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A complete repayment schedule: ordered installments plus running totals.
///
/// Totals are accumulated from the already-rounded per-period values, so
/// `total_payment` is exactly the sum of every `payment` even where a
/// closed-form total would differ in the last cent.
///
/// Schedules are produced by [`ScheduleBuilder`] and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    periods: Vec<Period>,
    total_payment: Money,
    total_interest: Money,
    total_principal: Money,
    total_commission: Money,
}

impl Schedule {
    /// Installments in ascending term order, starting at 1.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Look up an installment by its 1-based term number.
    pub fn period(&self, term: u32) -> Option<&Period> {
        let index = usize::try_from(term).ok()?.checked_sub(1)?;
        self.periods.get(index)
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn total_payment(&self) -> Money {
        self.total_payment
    }

    pub fn total_interest(&self) -> Money {
        self.total_interest
    }

    pub fn total_commission(&self) -> Money {
        self.total_commission
    }

    pub fn total_principal(&self) -> Money {
        self.total_principal
    }

    pub fn payment_by_term(&self) -> BTreeMap<u32, Money> {
        self.by_term(Period::payment)
    }

    pub fn interest_by_term(&self) -> BTreeMap<u32, Money> {
        self.by_term(Period::interest)
    }

    pub fn principal_by_term(&self) -> BTreeMap<u32, Money> {
        self.by_term(Period::principal)
    }

    pub fn commission_by_term(&self) -> BTreeMap<u32, Money> {
        self.by_term(Period::commission)
    }

    fn by_term(&self, field: fn(&Period) -> Money) -> BTreeMap<u32, Money> {
        self.periods.iter().map(|p| (p.term(), field(p))).collect()
    }

    /// Re-sum the periods and check them against the stored totals, and
    /// check that terms run 1..=N without gaps.
    pub fn is_consistent(&self) -> bool {
        let mut resummed = ScheduleBuilder::with_capacity(0);
        for (index, p) in self.periods.iter().enumerate() {
            if p.term() as usize != index + 1 || resummed.accumulate(p).is_err() {
                return false;
            }
        }
        resummed.total_payment == self.total_payment
            && resummed.total_interest == self.total_interest
            && resummed.total_principal == self.total_principal
            && resummed.total_commission == self.total_commission
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>5} {:>14} {:>12} {:>14} {:>12}",
            "Term", "Payment", "Interest", "Principal", "Commission"
        )?;
        for period in &self.periods {
            writeln!(f, "{}", period)?;
        }
        writeln!(f)?;
        writeln!(f, "Total Payment:    {}", self.total_payment)?;
        writeln!(f, "Total Interest:   {}", self.total_interest)?;
        writeln!(f, "Total Principal:  {}", self.total_principal)?;
        writeln!(f, "Total Commission: {}", self.total_commission)?;
        Ok(())
    }
}

/// Accumulates periods in order and keeps the running totals.
#[derive(Debug)]
pub struct ScheduleBuilder {
    periods: Vec<Period>,
    total_payment: Money,
    total_interest: Money,
    total_principal: Money,
    total_commission: Money,
}

impl ScheduleBuilder {
    pub fn with_capacity(months: u32) -> Self {
        Self {
            periods: Vec::with_capacity(months as usize),
            total_payment: zero_money(),
            total_interest: zero_money(),
            total_principal: zero_money(),
            total_commission: zero_money(),
        }
    }

    /// Append the next installment. Its term must follow the last one.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::Overflow`] when a running total no longer fits at
    /// cents. The builder is left unchanged.
    pub fn push(&mut self, period: Period) -> Result<(), ScheduleError> {
        debug_assert_eq!(period.term() as usize, self.periods.len() + 1);
        self.accumulate(&period)?;
        self.periods.push(period);
        Ok(())
    }

    fn accumulate(&mut self, period: &Period) -> Result<(), ScheduleError> {
        let payment = add_money(self.total_payment, period.payment(), "total payment")?;
        let interest = add_money(self.total_interest, period.interest(), "total interest")?;
        let principal = add_money(self.total_principal, period.principal(), "total principal")?;
        let commission =
            add_money(self.total_commission, period.commission(), "total commission")?;
        self.total_payment = payment;
        self.total_interest = interest;
        self.total_principal = principal;
        self.total_commission = commission;
        Ok(())
    }

    pub fn build(self) -> Schedule {
        Schedule {
            periods: self.periods,
            total_payment: self.total_payment,
            total_interest: self.total_interest,
            total_principal: self.total_principal,
            total_commission: self.total_commission,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn period(term: u32, interest: Money, principal: Money, commission: Money) -> Period {
        Period::new(term, interest, principal, commission).unwrap()
    }

    fn sample() -> Schedule {
        let mut builder = ScheduleBuilder::with_capacity(3);
        builder.push(period(1, dec!(1.00), dec!(333.33), dec!(0.50))).unwrap();
        builder.push(period(2, dec!(0.67), dec!(333.33), dec!(0.33))).unwrap();
        builder.push(period(3, dec!(0.33), dec!(333.34), dec!(0.17))).unwrap();
        builder.build()
    }

    #[test]
    fn test_builder_accumulates_totals() {
        let schedule = sample();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.total_payment(), dec!(1002.00));
        assert_eq!(schedule.total_interest(), dec!(2.00));
        assert_eq!(schedule.total_commission(), dec!(1.00));
        assert_eq!(schedule.total_principal(), dec!(1000.00));
        assert!(schedule.is_consistent());
    }

    #[test]
    fn test_period_lookup_is_one_based() {
        let schedule = sample();
        assert_eq!(schedule.period(1).unwrap().principal(), dec!(333.33));
        assert_eq!(schedule.period(3).unwrap().principal(), dec!(333.34));
        assert!(schedule.period(0).is_none());
        assert!(schedule.period(4).is_none());
    }

    #[test]
    fn test_term_views() {
        let schedule = sample();
        let principal = schedule.principal_by_term();
        assert_eq!(principal.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(principal[&3], dec!(333.34));
        assert_eq!(schedule.interest_by_term()[&2], dec!(0.67));
        assert_eq!(schedule.commission_by_term()[&1], dec!(0.50));
        assert_eq!(schedule.payment_by_term()[&1], dec!(334.33));
    }

    #[test]
    fn test_empty_totals_have_money_scale() {
        let schedule = ScheduleBuilder::with_capacity(0).build();
        assert!(schedule.is_empty());
        assert_eq!(schedule.total_payment().to_string(), "0.00");
        assert_eq!(schedule.total_principal().to_string(), "0.00");
    }

    #[test]
    fn test_tampered_totals_are_inconsistent() {
        let mut schedule = sample();
        schedule.total_interest += dec!(0.01);
        assert!(!schedule.is_consistent());
    }

    #[test]
    fn test_running_total_overflow_is_an_error() {
        let large = Decimal::from_i128_with_scale(50_000_000_000_000_000_000_000_000_000, 2);
        let mut builder = ScheduleBuilder::with_capacity(2);
        builder.push(period(1, dec!(0.00), large, dec!(0.00))).unwrap();
        assert_eq!(
            builder.push(period(2, dec!(0.00), large, dec!(0.00))),
            Err(ScheduleError::Overflow {
                context: "total payment".to_string()
            })
        );

        let schedule = builder.build();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.total_principal(), large);
        assert!(schedule.is_consistent());
    }
}
