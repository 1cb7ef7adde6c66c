//! Project entity - Source of project deadlines.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    /// Project identifier, assigned by configuration rather than the database
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Human-readable project name
    pub name: String,
    /// Last moment at which the project is still on schedule
    pub deadline: DateTimeUtc,
}

/// `Project` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
