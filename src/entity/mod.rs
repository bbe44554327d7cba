use sea_orm::prelude::Json;
use serde::{Serialize, de::DeserializeOwned};

pub mod banners;
pub mod brand_settings;
pub mod categories;
pub mod job_applications;
pub mod jobs;
pub mod orders;
pub mod partnership_content;
pub mod products;
pub mod promotions;
pub mod reservations;
pub mod reviews;
pub mod toppings;
pub mod users;

pub use banners::Entity as Banners;
pub use brand_settings::Entity as BrandSettings;
pub use categories::Entity as Categories;
pub use job_applications::Entity as JobApplications;
pub use jobs::Entity as Jobs;
pub use orders::Entity as Orders;
pub use partnership_content::Entity as PartnershipContent;
pub use products::Entity as Products;
pub use promotions::Entity as Promotions;
pub use reservations::Entity as Reservations;
pub use reviews::Entity as Reviews;
pub use toppings::Entity as Toppings;
pub use users::Entity as Users;

/// Encodes a JSONB column value.
pub(crate) fn to_json<T: Serialize>(value: &T) -> Json {
    serde_json::to_value(value).unwrap_or_else(|_| Json::Array(Vec::new()))
}

/// Decodes a JSONB column, falling back to the default when the stored shape is off.
pub(crate) fn from_json<T: DeserializeOwned + Default>(value: Json, column: &str) -> T {
    serde_json::from_value(value).unwrap_or_else(|err| {
        tracing::warn!(error = %err, column, "undecodable json column, using default");
        T::default()
    })
}

/// Counters are stored signed; negative values read as zero.
pub(crate) fn unsigned<T: TryFrom<i64> + Default>(value: i64) -> T {
    T::try_from(value).unwrap_or_default()
}

pub(crate) fn signed<T: TryInto<i64>>(value: T) -> i64 {
    value.try_into().unwrap_or(i64::MAX)
}
