use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::{Role, User},
    rules::loyalty::{LoyaltyThresholds, LoyaltyTier},
};

/// Public shape of a user; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub loyalty_points: u64,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            avatar: user.avatar,
            phone: user.phone,
            address: user.address,
            loyalty_points: user.loyalty_points,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct UserList {
    pub items: Vec<UserView>,
}

/// Editable profile fields. Email and role are not editable here.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePointsRequest {
    pub points: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyView {
    pub points: u64,
    pub tier: LoyaltyTier,
    pub next_tier: Option<LoyaltyTier>,
    pub points_to_next_tier: Option<u64>,
    pub thresholds: LoyaltyThresholds,
}
