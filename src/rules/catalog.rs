use rust_decimal::Decimal;

use crate::models::Product;

/// Category sentinel that matches every product.
pub const ALL_CATEGORIES: &str = "All";

/// Filter state applied to the product list. Every criterion left unset matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub category: Option<String>,
    pub query: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl CatalogFilter {
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_category(product) && self.matches_query(product) && self.matches_price(product)
    }

    fn matches_category(&self, product: &Product) -> bool {
        match self.category.as_deref().map(str::trim) {
            None | Some("") | Some(ALL_CATEGORIES) => true,
            Some(category) => product.category == category,
        }
    }

    fn matches_query(&self, product: &Product) -> bool {
        let query = match self.query.as_deref().map(str::trim) {
            None | Some("") => return true,
            Some(q) => q.to_lowercase(),
        };
        product.name.to_lowercase().contains(&query)
            || product.description.to_lowercase().contains(&query)
    }

    fn matches_price(&self, product: &Product) -> bool {
        let above_min = self.min_price.is_none_or(|min| product.price >= min);
        let below_max = self.max_price.is_none_or(|max| product.price <= max);
        above_min && below_max
    }
}

/// Returns the products matching `filter`, preserving their original order.
pub fn filter_products(products: &[Product], filter: &CatalogFilter) -> Vec<Product> {
    products
        .iter()
        .filter(|product| filter.matches(product))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, description: &str, category: &str, cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price: Decimal::new(cents, 2),
            original_price: None,
            category: category.to_string(),
            image: None,
            rating: 0.0,
            review_count: 0,
            is_available: true,
        }
    }

    fn menu() -> Vec<Product> {
        vec![
            product("1", "Espresso", "Short and strong", "coffee", 300),
            product("2", "Matcha Latte", "Ceremonial grade green tea", "tea", 550),
            product("3", "Iced Americano", "Espresso over ice", "coffee", 400),
            product("4", "Croissant", "Buttery pastry", "bakery", 350),
        ]
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let products = menu();
        let result = filter_products(&products, &CatalogFilter::default());
        assert_eq!(result, products);
    }

    #[test]
    fn all_sentinel_matches_every_category() {
        let filter = CatalogFilter {
            category: Some(ALL_CATEGORIES.to_string()),
            ..Default::default()
        };
        assert_eq!(filter_products(&menu(), &filter).len(), 4);
    }

    #[test]
    fn category_must_match_exactly() {
        let filter = CatalogFilter {
            category: Some("coffee".to_string()),
            ..Default::default()
        };
        let ids: Vec<_> = filter_products(&menu(), &filter)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["1", "3"]);

        let filter = CatalogFilter {
            category: Some("Coffee".to_string()),
            ..Default::default()
        };
        assert!(filter_products(&menu(), &filter).is_empty());
    }

    #[test]
    fn query_matches_name_or_description_case_insensitively() {
        let filter = CatalogFilter {
            query: Some("  ESPRESSO ".to_string()),
            ..Default::default()
        };
        let ids: Vec<_> = filter_products(&menu(), &filter)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["1", "3"]);

        let filter = CatalogFilter {
            query: Some("green".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_products(&menu(), &filter)[0].id, "2");
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let filter = CatalogFilter {
            min_price: Some(Decimal::new(350, 2)),
            max_price: Some(Decimal::new(400, 2)),
            ..Default::default()
        };
        let ids: Vec<_> = filter_products(&menu(), &filter)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["3", "4"]);
    }

    #[test]
    fn filtering_is_idempotent_and_a_subset() {
        let products = menu();
        let filters = [
            CatalogFilter {
                category: Some("coffee".to_string()),
                query: Some("ice".to_string()),
                ..Default::default()
            },
            CatalogFilter {
                min_price: Some(Decimal::new(310, 2)),
                ..Default::default()
            },
            CatalogFilter {
                query: Some("nothing matches this".to_string()),
                ..Default::default()
            },
        ];

        for filter in &filters {
            let once = filter_products(&products, filter);
            let twice = filter_products(&once, filter);
            assert_eq!(once, twice);
            assert!(once.iter().all(|p| products.contains(p)));
        }
    }
}
