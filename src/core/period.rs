use crate::core::error::ScheduleError;
use crate::core::money::{add_money, Money};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One installment of a repayment schedule.
///
/// `payment` is always `interest + principal`. `commission` is a parallel
/// platform fee computed like interest but at the commission rate; it is
/// reported alongside the installment and never deducted from it.
///
/// # Examples
///
/// ```
/// use loan_calculator::core::period::Period;
/// use rust_decimal_macros::dec;
///
/// let period = Period::new(1, dec!(34.50), dec!(817.64), dec!(10.00)).unwrap();
/// assert_eq!(period.payment(), dec!(852.14));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// 1-based installment number.
    term: u32,
    payment: Money,
    interest: Money,
    principal: Money,
    commission: Money,
}

impl Period {
    /// Build a period from its interest and principal portions.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::Overflow`] when the payment cannot be held at cents.
    pub fn new(
        term: u32,
        interest: Money,
        principal: Money,
        commission: Money,
    ) -> Result<Self, ScheduleError> {
        Ok(Self {
            term,
            payment: add_money(interest, principal, "period payment")?,
            interest,
            principal,
            commission,
        })
    }

    pub fn term(&self) -> u32 {
        self.term
    }

    pub fn payment(&self) -> Money {
        self.payment
    }

    pub fn interest(&self) -> Money {
        self.interest
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn commission(&self) -> Money {
        self.commission
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>5} {:>14} {:>12} {:>14} {:>12}",
            self.term, self.payment, self.interest, self.principal, self.commission
        )
    }
}
