//! Discount code lookup and evaluation.
//!
//! A code applies only to the cart lines whose product it lists (or to every line when it
//! lists none). Both percentage and fixed codes are computed against that eligible subset:
//! a fixed code is capped at the eligible subtotal, never at the whole order.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::{
    models::{CartLine, DiscountCode, DiscountType},
    rules::pricing,
};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiscountError {
    #[error("Discount code `{0}` does not exist")]
    UnknownCode(String),

    #[error("Discount code `{0}` is not active")]
    Inactive(String),

    #[error("Discount code `{0}` is not valid yet")]
    NotStarted(String),

    #[error("Discount code `{0}` has expired")]
    Expired(String),

    #[error("Discount code `{0}` does not apply to any item in the cart")]
    NotApplicable(String),

    #[error("Cart is empty")]
    EmptyCart,
}

/// Codes compare trimmed and upper-cased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

pub fn is_valid_on(code: &DiscountCode, today: NaiveDate) -> bool {
    code.is_active && code.start_date <= today && today <= code.end_date
}

fn applies_to(code: &DiscountCode, product_id: &str) -> bool {
    code.applicable_product_ids.is_empty()
        || code.applicable_product_ids.iter().any(|id| id == product_id)
}

/// Finds the code the customer typed. When several records share the code, the first one
/// valid today wins; otherwise the reason of the first record is reported.
pub fn find_code<'a>(
    promotions: &'a [DiscountCode],
    entered: &str,
    today: NaiveDate,
) -> Result<&'a DiscountCode, DiscountError> {
    let wanted = normalize_code(entered);
    let mut candidates = promotions
        .iter()
        .filter(|promo| normalize_code(&promo.code) == wanted)
        .peekable();

    let first = match candidates.peek() {
        Some(first) => *first,
        None => return Err(DiscountError::UnknownCode(wanted)),
    };

    if let Some(valid) = candidates.find(|promo| is_valid_on(promo, today)) {
        return Ok(valid);
    }

    Err(if !first.is_active {
        DiscountError::Inactive(wanted)
    } else if today < first.start_date {
        DiscountError::NotStarted(wanted)
    } else {
        DiscountError::Expired(wanted)
    })
}

/// Discount amount `code` grants on `lines`, rounded to cents.
pub fn evaluate(
    code: &DiscountCode,
    lines: &[CartLine],
    size_upcharge: Decimal,
) -> Result<Decimal, DiscountError> {
    if lines.is_empty() {
        return Err(DiscountError::EmptyCart);
    }

    let eligible: Vec<&CartLine> = lines
        .iter()
        .filter(|line| applies_to(code, &line.product_id))
        .collect();
    if eligible.is_empty() {
        return Err(DiscountError::NotApplicable(normalize_code(&code.code)));
    }

    let eligible_subtotal = pricing::subtotal(eligible, size_upcharge);
    let value = code.value.max(Decimal::ZERO);
    let amount = match code.discount_type {
        DiscountType::Percent => eligible_subtotal * value.min(HUNDRED) / HUNDRED,
        DiscountType::Fixed => value.min(eligible_subtotal),
    };

    Ok(amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Looks up `entered` and evaluates it against `lines` in one step.
pub fn apply(
    promotions: &[DiscountCode],
    entered: &str,
    lines: &[CartLine],
    size_upcharge: Decimal,
    today: NaiveDate,
) -> Result<(String, Decimal), DiscountError> {
    let code = find_code(promotions, entered, today)?;
    let amount = evaluate(code, lines, size_upcharge)?;
    Ok((normalize_code(&code.code), amount))
}
