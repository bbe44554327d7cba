use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub category: String,
    pub image: Option<String>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    /// `null` ends a sale; omitting the field keeps the current value.
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>)]
    pub original_price: Option<Option<Decimal>>,
    pub category: Option<String>,
    /// `null` removes the image.
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
    pub is_available: Option<bool>,
}

/// Tells an explicit `null` (`Some(None)`) apart from a missing field (`None`).
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_clears_and_missing_keeps() {
        let cleared: UpdateProductRequest =
            serde_json::from_str(r#"{"originalPrice":null,"image":null}"#).unwrap();
        assert_eq!(cleared.original_price, Some(None));
        assert_eq!(cleared.image, Some(None));

        let untouched: UpdateProductRequest = serde_json::from_str(r#"{"name":"Mocha"}"#).unwrap();
        assert_eq!(untouched.original_price, None);
        assert_eq!(untouched.image, None);

        let set: UpdateProductRequest =
            serde_json::from_str(r#"{"originalPrice":"5.50"}"#).unwrap();
        assert_eq!(set.original_price, Some(Some(Decimal::new(550, 2))));
    }
}
