//! # loan-calculator
//!
//! Exact decimal amortization schedules.
//!
//! Given a principal, an annual interest rate, a term in months and an
//! annual platform commission rate, this crate produces the month-by-month
//! installments of a loan under either the equal-payment or the
//! equal-principal method, plus running totals. All arithmetic is decimal;
//! compound factors are evaluated exactly and every reported amount is
//! rounded half-to-even to cents.
//!
//! ## Architecture
//!
//! - **core**: Money and rate types, the exact rounding kernel, periods and schedules
//! - **amortization**: Loan terms, the two amortization methods, and the engine facade

pub mod amortization;
pub mod core;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::amortization::engine::{AmortizationEngine, RepaymentMethod};
    pub use crate::amortization::equal_payment::compute_equal_payment;
    pub use crate::amortization::equal_principal::compute_equal_capital;
    pub use crate::amortization::terms::LoanTerms;
    pub use crate::core::error::ScheduleError;
    pub use crate::core::money::{Money, Rate};
    pub use crate::core::period::Period;
    pub use crate::core::schedule::Schedule;
}
