//! Outbox entity - Messages handed to the database-backed mail transport.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Outbox database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "outbox")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Sender address from the `[mail]` configuration
    pub sender: String,
    /// Recipient e-mail address
    pub recipient: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
    /// When the message was queued
    pub queued_at: DateTimeUtc,
}

/// `Outbox` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
