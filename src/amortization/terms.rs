use crate::core::error::ScheduleError;
use crate::core::money::{divide, exact, Money, Rate, MONTHS_PER_YEAR, RATE_SCALE};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The four inputs of an amortization run.
///
/// Rates are annual fractions. Zero and negative rates are accepted; only
/// the term count and the sign of the principal are checked.
///
/// # Examples
///
/// ```
/// use loan_calculator::amortization::terms::LoanTerms;
/// use rust_decimal_macros::dec;
///
/// let terms = LoanTerms::new(dec!(10000), dec!(0.0414), 12, dec!(0.012));
/// assert!(terms.validate().is_ok());
/// assert_eq!(terms.monthly_rate().unwrap(), dec!(0.003450));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual loan rate.
    pub annual_rate: Rate,
    /// Number of monthly installments.
    pub months: u32,
    /// Annual platform commission rate.
    pub annual_commission: Rate,
}

impl LoanTerms {
    pub fn new(principal: Money, annual_rate: Rate, months: u32, annual_commission: Rate) -> Self {
        Self {
            principal,
            annual_rate,
            months,
            annual_commission,
        }
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.months == 0 {
            return Err(ScheduleError::InvalidTerm {
                months: self.months,
            });
        }
        if self.principal < Decimal::ZERO {
            return Err(ScheduleError::NegativePrincipal {
                principal: self.principal,
            });
        }
        Ok(())
    }

    /// Loan rate per month, normalised once per schedule.
    pub fn monthly_rate(&self) -> Result<Rate, ScheduleError> {
        monthly_rate(self.annual_rate)
    }

    /// Commission rate per month, normalised independently of the loan rate.
    pub fn monthly_commission(&self) -> Result<Rate, ScheduleError> {
        monthly_rate(self.annual_commission)
    }
}

/// Annual rate divided by twelve, rounded half-to-even to six places.
pub fn monthly_rate(annual: Rate) -> Result<Rate, ScheduleError> {
    divide(
        &exact(annual),
        &exact(Decimal::from(MONTHS_PER_YEAR)),
        RATE_SCALE,
        "monthly rate",
    )
}
