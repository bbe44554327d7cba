use thiserror::Error;
use uuid::Uuid;

use crate::models::{CartLine, Product, ProductSize, Topping};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("cart line {0} not found")]
    LineNotFound(String),

    #[error("product {0} is not available")]
    Unavailable(String),
}

/// Identity used to merge cart additions: two additions with the same key land on one line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    product_id: String,
    size: ProductSize,
    note: Option<String>,
    topping_ids: Vec<String>,
}

impl LineKey {
    pub fn new(product_id: &str, size: ProductSize, note: Option<&str>, toppings: &[Topping]) -> Self {
        let mut topping_ids: Vec<String> = toppings.iter().map(|t| t.id.clone()).collect();
        topping_ids.sort();
        Self {
            product_id: product_id.to_owned(),
            size,
            note: normalize_note(note),
            topping_ids,
        }
    }

    pub fn of(line: &CartLine) -> Self {
        Self::new(&line.product_id, line.size, line.note.as_deref(), &line.toppings)
    }
}

/// Blank notes count as no note at all.
pub fn normalize_note(note: Option<&str>) -> Option<String> {
    note.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_owned)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Adds one unit of `product` with the given customization. An existing line with the
    /// same product, size, note and topping set gets its quantity bumped instead.
    pub fn add(
        &mut self,
        product: &Product,
        size: Option<ProductSize>,
        note: Option<&str>,
        toppings: Vec<Topping>,
    ) -> Result<CartLine, CartError> {
        if !product.is_available {
            return Err(CartError::Unavailable(product.id.clone()));
        }

        let size = size.unwrap_or_default();
        let key = LineKey::new(&product.id, size, note, &toppings);

        if let Some(line) = self.lines.iter_mut().find(|line| LineKey::of(line) == key) {
            line.quantity = line.quantity.saturating_add(1);
            return Ok(line.clone());
        }

        let line = CartLine {
            id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            base_price: product.price,
            size,
            note: normalize_note(note),
            toppings,
            quantity: 1,
        };
        self.lines.push(line.clone());
        Ok(line)
    }

    /// Changes a line's quantity by `delta`, staying within `1..=u32::MAX`.
    pub fn update_quantity(&mut self, line_id: &str, delta: i64) -> Result<CartLine, CartError> {
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.id == line_id)
            .ok_or_else(|| CartError::LineNotFound(line_id.to_owned()))?;

        let next = i64::from(line.quantity)
            .saturating_add(delta)
            .clamp(1, i64::from(u32::MAX));
        line.quantity = u32::try_from(next).unwrap_or(1);
        Ok(line.clone())
    }

    /// Takes `ordered` out of the cart. Lines added or bumped since that snapshot keep the
    /// difference.
    pub fn settle(&mut self, ordered: &[CartLine]) {
        for sold in ordered {
            if let Some(line) = self.lines.iter_mut().find(|line| line.id == sold.id) {
                line.quantity = line.quantity.saturating_sub(sold.quantity);
            }
        }
        self.lines.retain(|line| line.quantity > 0);
    }

    pub fn remove(&mut self, line_id: &str) -> Result<CartLine, CartError> {
        let idx = self
            .lines
            .iter()
            .position(|line| line.id == line_id)
            .ok_or_else(|| CartError::LineNotFound(line_id.to_owned()))?;
        Ok(self.lines.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn latte() -> Product {
        Product {
            id: "latte".to_string(),
            name: "Latte".to_string(),
            description: String::new(),
            price: Decimal::new(400, 2),
            original_price: None,
            category: "coffee".to_string(),
            image: None,
            rating: 0.0,
            review_count: 0,
            is_available: true,
        }
    }

    fn topping(id: &str, cents: i64) -> Topping {
        Topping {
            id: id.to_string(),
            name: id.to_string(),
            price: Decimal::new(cents, 2),
        }
    }

    #[test]
    fn identical_additions_merge_into_one_line() {
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add(&latte(), Some(ProductSize::L), Some("less ice"), vec![topping("boba", 75)])
                .unwrap();
        }
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn topping_order_does_not_matter() {
        let mut cart = Cart::new();
        cart.add(&latte(), None, None, vec![topping("a", 10), topping("b", 20)])
            .unwrap();
        cart.add(&latte(), None, None, vec![topping("b", 20), topping("a", 10)])
            .unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn different_customizations_get_separate_lines() {
        let mut cart = Cart::new();
        let first = cart.add(&latte(), Some(ProductSize::M), None, vec![]).unwrap();
        let second = cart.add(&latte(), Some(ProductSize::L), None, vec![]).unwrap();
        let third = cart.add(&latte(), Some(ProductSize::M), Some("hot"), vec![]).unwrap();

        assert_eq!(cart.lines().len(), 3);
        assert_ne!(first.id, second.id);
        assert_ne!(second.id, third.id);
        assert_ne!(first.id, "latte");
    }

    #[test]
    fn missing_size_and_blank_note_are_normalized() {
        let mut cart = Cart::new();
        cart.add(&latte(), None, Some("   "), vec![]).unwrap();
        cart.add(&latte(), Some(ProductSize::M), None, vec![]).unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].note, None);
    }

    #[test]
    fn quantity_never_drops_below_one() {
        let mut cart = Cart::new();
        let line = cart.add(&latte(), None, None, vec![]).unwrap();
        cart.update_quantity(&line.id, 3).unwrap();
        let updated = cart.update_quantity(&line.id, -1000).unwrap();
        assert_eq!(updated.quantity, 1);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn huge_deltas_saturate_instead_of_wrapping() {
        let mut cart = Cart::new();
        let line = cart.add(&latte(), None, None, vec![]).unwrap();

        let maxed = cart.update_quantity(&line.id, i64::from(u32::MAX)).unwrap();
        assert_eq!(maxed.quantity, u32::MAX);
        let again = cart.add(&latte(), None, None, vec![]).unwrap();
        assert_eq!(again.quantity, u32::MAX);

        cart.update_quantity(&line.id, -5).unwrap();
        let capped = cart.update_quantity(&line.id, i64::MAX).unwrap();
        assert_eq!(capped.quantity, u32::MAX);
        let floored = cart.update_quantity(&line.id, i64::MIN).unwrap();
        assert_eq!(floored.quantity, 1);

        cart.add(&latte(), Some(ProductSize::L), None, vec![]).unwrap();
        cart.update_quantity(&line.id, i64::MAX).unwrap();
        assert_eq!(cart.item_count(), u32::MAX);
    }

    #[test]
    fn settle_keeps_lines_added_after_the_snapshot() {
        let mut cart = Cart::new();
        cart.add(&latte(), None, None, vec![]).unwrap();
        let snapshot = cart.lines().to_vec();

        cart.add(&latte(), None, None, vec![]).unwrap();
        let late = cart.add(&latte(), Some(ProductSize::L), None, vec![]).unwrap();
        cart.settle(&snapshot);

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.lines()[1].id, late.id);

        let rest = cart.lines().to_vec();
        cart.settle(&rest);
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_deletes_the_line_and_unknown_ids_error() {
        let mut cart = Cart::new();
        let line = cart.add(&latte(), None, None, vec![]).unwrap();
        assert_eq!(
            cart.update_quantity("missing", 1),
            Err(CartError::LineNotFound("missing".to_string()))
        );
        cart.remove(&line.id).unwrap();
        assert!(cart.is_empty());
        assert!(cart.remove(&line.id).is_err());
    }

    #[test]
    fn unavailable_products_are_rejected() {
        let mut product = latte();
        product.is_available = false;
        let mut cart = Cart::new();
        assert_eq!(
            cart.add(&product, None, None, vec![]),
            Err(CartError::Unavailable("latte".to_string()))
        );
        assert!(cart.is_empty());
    }
}
