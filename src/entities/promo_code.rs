//! Promo code entity - A discount token with an expiry flag and a usage budget.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Promo code database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "promo_codes")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The code customers type in (e.g., `"PROMO10"`)
    #[sea_orm(unique)]
    pub code: String,
    /// Whether the code has expired regardless of remaining uses
    pub is_expired: bool,
    /// How many more times the code may be applied
    pub usage_left: i32,
}

/// `PromoCode` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
