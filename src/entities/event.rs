//! Event entity - A bookable event and its remaining seat count.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Event database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    /// Event identifier, assigned by configuration rather than the database
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Display name (e.g., "Concert")
    pub name: String,
    /// Seats still available for booking
    pub seats: i64,
}

/// `Event` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
