//! Task entity - A unit of work inside a project.
//!
//! The `project_id` is validated for shape only; tasks are not linked to
//! the `projects` table by a foreign key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Task database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    /// Unique identifier for the task
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Project the task belongs to
    pub project_id: i64,
    /// Task title, never blank
    pub title: String,
    /// When the task is due
    pub deadline: DateTimeUtc,
    /// When the task was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Task and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One task has many time entries
    #[sea_orm(has_many = "super::time_entry::Entity")]
    TimeEntries,
}

impl Related<super::time_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimeEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
