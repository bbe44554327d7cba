use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{response::Meta, rules::catalog::CatalogFilter};

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }

    /// Cuts one page out of `items` and describes it.
    pub fn paginate<T>(&self, items: Vec<T>) -> (Vec<T>, Meta) {
        let (page, per_page, offset) = self.normalize();
        let total = items.len() as i64;
        let items = items
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(per_page).unwrap_or(usize::MAX))
            .collect();
        (items, Meta::new(page, per_page, total))
    }
}

/// Catalog query string. Fields are inlined rather than flattened so numbers parse.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Category key; empty or `All` matches every category.
    pub category: Option<String>,
    /// Case-insensitive substring of name or description.
    pub q: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl ProductQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }

    pub fn filter(&self) -> CatalogFilter {
        CatalogFilter {
            category: self.category.clone(),
            query: self.q.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Case-insensitive status name.
    pub status: Option<String>,
}

impl OrderListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps_page_and_size() {
        let p = Pagination {
            page: Some(0),
            per_page: Some(1000),
        };
        assert_eq!(p.normalize(), (1, 100, 0));
        assert_eq!(Pagination::default().normalize(), (1, 20, 0));
    }

    #[test]
    fn paginate_reports_total_of_all_items() {
        let p = Pagination {
            page: Some(2),
            per_page: Some(2),
        };
        let (items, meta) = p.paginate(vec![1, 2, 3, 4, 5]);
        assert_eq!(items, vec![3, 4]);
        assert_eq!(meta.total, Some(5));
        assert_eq!(meta.page, Some(2));
    }
}
