//! Mail transport.
//!
//! Delivery itself is outside this crate. [`OutboxMailer`] queues messages in the
//! `outbox` table for an external relay to pick up. The sender address comes from
//! the `[mail]` section of `config.toml`.

use crate::{
    core::ports::{EmailMessage, Mailer},
    entities::outbox,
    errors::Result,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing::info;

/// Queues messages in the `outbox` table.
#[derive(Debug)]
pub struct OutboxMailer {
    db: DatabaseConnection,
    sender: String,
}

impl OutboxMailer {
    /// Creates a mailer that queues messages from `sender`.
    pub fn new(db: DatabaseConnection, sender: impl Into<String>) -> Self {
        Self {
            db,
            sender: sender.into(),
        }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl Mailer for OutboxMailer {
    async fn send(&self, email: &str, message: &EmailMessage) -> Result<()> {
        let queued = outbox::ActiveModel {
            sender: Set(self.sender.clone()),
            recipient: Set(email.to_string()),
            subject: Set(message.subject.clone()),
            body: Set(message.body.clone()),
            queued_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(id = queued.id, to = email, "Mail queued");
        Ok(())
    }
}
