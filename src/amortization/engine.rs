use crate::amortization::equal_payment::compute_equal_payment;
use crate::amortization::equal_principal::compute_equal_capital;
use crate::amortization::terms::LoanTerms;
use crate::core::error::ScheduleError;
use crate::core::schedule::Schedule;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How installments are shaped over the life of the loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepaymentMethod {
    /// Constant installment; the interest share shrinks over time.
    EqualPayment,
    /// Constant principal slice; the installment shrinks over time.
    EqualPrincipal,
}

impl RepaymentMethod {
    pub const ALL: [RepaymentMethod; 2] =
        [RepaymentMethod::EqualPayment, RepaymentMethod::EqualPrincipal];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepaymentMethod::EqualPayment => "equal-payment",
            RepaymentMethod::EqualPrincipal => "equal-principal",
        }
    }
}

impl fmt::Display for RepaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown repayment method '{0}', expected equal-payment or equal-principal")]
pub struct UnknownMethod(pub String);

impl FromStr for RepaymentMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equal-payment" => Ok(RepaymentMethod::EqualPayment),
            "equal-principal" | "equal-capital" => Ok(RepaymentMethod::EqualPrincipal),
            other => Err(UnknownMethod(other.to_string())),
        }
    }
}

/// Entry point over both amortization methods.
///
/// Stateless: every call is an independent pure computation, so the engine
/// can be used from any number of threads at once.
pub struct AmortizationEngine;

impl AmortizationEngine {
    /// Build the schedule for `terms` under `method`.
    pub fn compute(method: RepaymentMethod, terms: &LoanTerms) -> Result<Schedule, ScheduleError> {
        match method {
            RepaymentMethod::EqualPayment => compute_equal_payment(terms),
            RepaymentMethod::EqualPrincipal => compute_equal_capital(terms),
        }
    }
}
