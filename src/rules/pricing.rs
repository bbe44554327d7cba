use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{CartLine, OrderLine, ProductSize};

/// Price of one unit of `line`: base price, the L upcharge when applicable, and every topping.
pub fn unit_price(line: &CartLine, size_upcharge: Decimal) -> Decimal {
    let size = match line.size {
        ProductSize::L => size_upcharge,
        ProductSize::M => Decimal::ZERO,
    };
    let toppings: Decimal = line.toppings.iter().map(|t| t.price).sum();
    line.base_price + size + toppings
}

pub fn line_total(line: &CartLine, size_upcharge: Decimal) -> Decimal {
    unit_price(line, size_upcharge) * Decimal::from(line.quantity)
}

pub fn subtotal<'a, I>(lines: I, size_upcharge: Decimal) -> Decimal
where
    I: IntoIterator<Item = &'a CartLine>,
{
    lines
        .into_iter()
        .map(|line| line_total(line, size_upcharge))
        .sum()
}

/// Order total after discount. Never negative.
pub fn order_total(subtotal: Decimal, discount: Decimal) -> Decimal {
    (subtotal - discount).max(Decimal::ZERO)
}

/// Freezes a cart line with the prices it is charged at right now.
pub fn freeze_line(line: CartLine, size_upcharge: Decimal) -> OrderLine {
    let unit_price = unit_price(&line, size_upcharge);
    let line_total = unit_price * Decimal::from(line.quantity);
    OrderLine {
        line,
        unit_price,
        line_total,
    }
}

/// Price breakdown shown before checkout.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PriceQuote {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub discount_code: Option<String>,
}

impl PriceQuote {
    pub fn new(subtotal: Decimal, discount: Decimal, discount_code: Option<String>) -> Self {
        Self {
            subtotal,
            discount,
            total: order_total(subtotal, discount),
            discount_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Topping;

    fn line(size: ProductSize, toppings: Vec<Topping>, quantity: u32) -> CartLine {
        CartLine {
            id: "line-1".to_string(),
            product_id: "p-1".to_string(),
            name: "Latte".to_string(),
            image: None,
            base_price: Decimal::new(400, 2),
            size,
            note: None,
            toppings,
            quantity,
        }
    }

    fn pearl() -> Topping {
        Topping {
            id: "pearl".to_string(),
            name: "Pearl".to_string(),
            price: Decimal::new(75, 2),
        }
    }

    #[test]
    fn large_line_with_topping() {
        let line = line(ProductSize::L, vec![pearl()], 2);
        assert_eq!(unit_price(&line, Decimal::new(50, 2)), Decimal::new(525, 2));
        assert_eq!(line_total(&line, Decimal::new(50, 2)), Decimal::new(1050, 2));
    }

    #[test]
    fn medium_has_no_upcharge() {
        let line = line(ProductSize::M, vec![], 1);
        assert_eq!(unit_price(&line, Decimal::new(50, 2)), Decimal::new(400, 2));
    }

    #[test]
    fn upgrades_never_lower_the_price() {
        let upcharge = Decimal::new(50, 2);
        let base = line(ProductSize::M, vec![], 1);
        let large = line(ProductSize::L, vec![], 1);
        let topped = line(ProductSize::M, vec![pearl()], 1);
        let both = line(ProductSize::L, vec![pearl(), pearl()], 1);

        assert!(unit_price(&large, upcharge) >= unit_price(&base, upcharge));
        assert!(unit_price(&topped, upcharge) >= unit_price(&base, upcharge));
        assert!(unit_price(&both, upcharge) >= unit_price(&large, upcharge));
    }

    #[test]
    fn subtotal_sums_every_line() {
        let lines = vec![
            line(ProductSize::L, vec![pearl()], 2),
            line(ProductSize::M, vec![], 3),
        ];
        assert_eq!(subtotal(&lines, Decimal::new(50, 2)), Decimal::new(2250, 2));
    }

    #[test]
    fn total_never_goes_negative() {
        assert_eq!(
            order_total(Decimal::new(1000, 2), Decimal::new(50, 0)),
            Decimal::ZERO
        );
        assert_eq!(
            order_total(Decimal::new(2000, 2), Decimal::new(200, 2)),
            Decimal::new(1800, 2)
        );
    }

    #[test]
    fn frozen_line_keeps_charged_prices() {
        let frozen = freeze_line(line(ProductSize::L, vec![pearl()], 2), Decimal::new(50, 2));
        assert_eq!(frozen.unit_price, Decimal::new(525, 2));
        assert_eq!(frozen.line_total, Decimal::new(1050, 2));
        assert_eq!(frozen.line.quantity, 2);
    }
}
