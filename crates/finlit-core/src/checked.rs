//! Overflow-checked `Decimal` arithmetic. Every operation that can leave the
//! 96-bit range reports `InvalidInput` for the named field instead of
//! panicking.

use rust_decimal::Decimal;

use crate::error::FinLitError;
use crate::FinLitResult;

pub(crate) fn mul(a: Decimal, b: Decimal, field: &str) -> FinLitResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| FinLitError::overflow(field))
}

pub(crate) fn add(a: Decimal, b: Decimal, field: &str) -> FinLitResult<Decimal> {
    a.checked_add(b).ok_or_else(|| FinLitError::overflow(field))
}

pub(crate) fn sub(a: Decimal, b: Decimal, field: &str) -> FinLitResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| FinLitError::overflow(field))
}

/// Division; a zero divisor is reported as `DivisionByZero`.
pub(crate) fn div(a: Decimal, b: Decimal, field: &str) -> FinLitResult<Decimal> {
    if b.is_zero() {
        return Err(FinLitError::DivisionByZero {
            context: field.into(),
        });
    }
    a.checked_div(b).ok_or_else(|| FinLitError::overflow(field))
}

pub(crate) fn sum<'a>(
    values: impl IntoIterator<Item = &'a Decimal>,
    field: &str,
) -> FinLitResult<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| add(acc, *v, field))
}
