//! Monetary types and the exact decimal kernel.
//!
//! Reportable amounts are `rust_decimal::Decimal` values carried at a fixed
//! scale. Anything that needs more than 28 significant digits on the way
//! there (compound growth factors run to thousands of digits for long terms)
//! is evaluated in `BigDecimal`, where addition, subtraction and
//! multiplication are exact, and brought back with a single
//! round-half-to-even division.

use crate::core::error::ScheduleError;
use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::{BigInt, Sign};
use num_traits::{One, ToPrimitive, Zero};
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// All monetary values.
pub type Money = Decimal;

/// Rates expressed as fractions (0.0414 = 4.14%). Never as percentages.
pub type Rate = Decimal;

/// Decimal places of every reported amount.
pub const MONEY_SCALE: u32 = 2;

/// Decimal places of a normalised monthly rate.
pub const RATE_SCALE: u32 = 6;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Zero at money scale (`0.00`).
pub fn zero_money() -> Money {
    Decimal::new(0, MONEY_SCALE)
}

/// Lossless conversion into the arbitrary-precision domain.
pub fn exact(value: Decimal) -> BigDecimal {
    BigDecimal::new(BigInt::from(value.mantissa()), i64::from(value.scale()))
}

/// An installment count or index in the arbitrary-precision domain.
pub fn exact_count(n: u32) -> BigDecimal {
    exact(Decimal::from(n))
}

/// Exact integer power by repeated squaring.
///
/// No digits are ever dropped, so `(1 + r)^n` is the true value regardless
/// of how large `n` gets.
pub fn pow(base: &BigDecimal, exponent: u32) -> BigDecimal {
    let mut result = BigDecimal::one();
    let mut square = base.clone();
    let mut remaining = exponent;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = &result * &square;
        }
        remaining >>= 1;
        if remaining > 0 {
            square = &square * &square;
        }
    }
    result
}

/// Divide exactly and round the quotient half-to-even at `scale` places.
///
/// `context` names the quantity being computed and only shows up in errors.
pub fn divide(
    numerator: &BigDecimal,
    denominator: &BigDecimal,
    scale: u32,
    context: &str,
) -> Result<Decimal, ScheduleError> {
    if denominator.is_zero() {
        return Err(ScheduleError::DivisionByZero {
            context: context.to_string(),
        });
    }

    let (num_digits, num_exp) = numerator.as_bigint_and_exponent();
    let (den_digits, den_exp) = denominator.as_bigint_and_exponent();

    // numerator / denominator * 10^scale == num_digits * 10^shift / den_digits
    let shift = den_exp - num_exp + i64::from(scale);
    let (dividend, divisor) = if shift >= 0 {
        (num_digits * ten_pow(shift.unsigned_abs()), den_digits)
    } else {
        (num_digits, den_digits * ten_pow(shift.unsigned_abs()))
    };

    from_digits(&round_half_even(&dividend, &divisor), scale, context)
}

/// Round an exact value half-to-even at `scale` places.
pub fn round(value: &BigDecimal, scale: u32, context: &str) -> Result<Decimal, ScheduleError> {
    let rounded = value.with_scale_round(i64::from(scale), RoundingMode::HalfEven);
    let (digits, _) = rounded.as_bigint_and_exponent();
    from_digits(&digits, scale, context)
}

/// `a + b` for amounts at money scale.
///
/// Fails instead of giving up a decimal place when the sum no longer fits.
pub fn add_money(a: Money, b: Money, context: &str) -> Result<Money, ScheduleError> {
    a.checked_add(b)
        .filter(|sum| sum.scale() == MONEY_SCALE)
        .ok_or_else(|| overflow(context))
}

/// `a - b` for amounts at money scale.
pub fn sub_money(a: Money, b: Money, context: &str) -> Result<Money, ScheduleError> {
    a.checked_sub(b)
        .filter(|difference| difference.scale() == MONEY_SCALE)
        .ok_or_else(|| overflow(context))
}

/// A `Decimal` from its integer digits at `scale` places.
fn from_digits(digits: &BigInt, scale: u32, context: &str) -> Result<Decimal, ScheduleError> {
    let mantissa = digits.to_i128().ok_or_else(|| overflow(context))?;
    Decimal::try_from_i128_with_scale(mantissa, scale).map_err(|_| overflow(context))
}

fn ten_pow(exponent: u64) -> BigInt {
    num_traits::pow(BigInt::from(10), exponent as usize)
}

/// Integer division with banker's rounding on the discarded remainder.
fn round_half_even(dividend: &BigInt, divisor: &BigInt) -> BigInt {
    let quotient = dividend / divisor;
    let remainder = dividend % divisor;
    if remainder.is_zero() {
        return quotient;
    }

    let twice = remainder.magnitude() + remainder.magnitude();
    let away_from_zero = match twice.cmp(divisor.magnitude()) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => !(&quotient % BigInt::from(2)).is_zero(),
    };
    if !away_from_zero {
        return quotient;
    }

    let negative = (dividend.sign() == Sign::Minus) != (divisor.sign() == Sign::Minus);
    if negative {
        quotient - BigInt::one()
    } else {
        quotient + BigInt::one()
    }
}

fn overflow(context: &str) -> ScheduleError {
    ScheduleError::Overflow {
        context: context.to_string(),
    }
}
