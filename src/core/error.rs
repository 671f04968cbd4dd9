use rust_decimal::Decimal;
use thiserror::Error;

/// Errors arising while building an amortization schedule.
///
/// Every variant is fatal for the call that raised it: the computation is
/// pure, so there is nothing to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("term must be at least one month, got {months}")]
    InvalidTerm { months: u32 },
    #[error("principal must not be negative, got {principal}")]
    NegativePrincipal { principal: Decimal },
    #[error("division by zero in {context}")]
    DivisionByZero { context: String },
    #[error("{context} does not fit in a 96-bit decimal")]
    Overflow { context: String },
}
