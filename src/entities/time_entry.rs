//! Time entry entity - Hours worked on a task.
//!
//! A task's total is the sum of `hours` over all its entries.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Time entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "time_entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the task the hours were spent on
    pub task_id: i64,
    /// Hours worked, in `(0, 1000]`
    pub hours: f64,
    /// When the entry was recorded
    pub recorded_at: DateTimeUtc,
}

/// Defines relationships between `TimeEntry` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry belongs to one task
    #[sea_orm(
        belongs_to = "super::task::Entity",
        from = "Column::TaskId",
        to = "super::task::Column::Id"
    )]
    Task,
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
