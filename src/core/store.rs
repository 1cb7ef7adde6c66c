//! Database-backed collaborators.
//!
//! [`DbStore`] wraps a `SeaORM` connection and implements every data port: seat
//! counts, promo codes, project deadlines, task persistence and the time ledger.

use crate::{
    core::ports::{DeadlineSource, PromoRecord, PromoSource, SeatSource, TaskStore, TimeLedger},
    entities::{Event, Project, PromoCode, Task, TimeEntry, promo_code, task, time_entry},
    errors::{Error, Result},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::debug;

/// Collaborator implementation over a `SeaORM` database connection.
#[derive(Debug)]
pub struct DbStore {
    db: DatabaseConnection,
}

impl DbStore {
    /// Wraps an open connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl SeatSource for DbStore {
    /// Unknown events report zero seats.
    async fn available_seats(&self, event_id: i64) -> Result<i64> {
        let event = Event::find_by_id(event_id).one(&self.db).await?;
        Ok(event.map_or(0, |e| e.seats))
    }
}

#[async_trait]
impl PromoSource for DbStore {
    async fn find(&self, code: &str) -> Result<Option<PromoRecord>> {
        let promo = PromoCode::find()
            .filter(promo_code::Column::Code.eq(code))
            .one(&self.db)
            .await?;

        Ok(promo.map(|p| PromoRecord {
            code: p.code,
            is_expired: p.is_expired,
            usage_left: p.usage_left,
        }))
    }

    /// Decrements `usage_left` in a single UPDATE guarded by `usage_left > 0`.
    /// Only the redemption whose UPDATE touched the row gets `true`.
    async fn mark_used(&self, code: &str) -> Result<bool> {
        let result = PromoCode::update_many()
            .col_expr(
                promo_code::Column::UsageLeft,
                Expr::col(promo_code::Column::UsageLeft).sub(1),
            )
            .filter(promo_code::Column::Code.eq(code))
            .filter(promo_code::Column::UsageLeft.gt(0))
            .exec(&self.db)
            .await?;

        debug!(code, rows = result.rows_affected, "Promo code usage decremented");
        Ok(result.rows_affected == 1)
    }
}

#[async_trait]
impl DeadlineSource for DbStore {
    async fn deadline(&self, project_id: i64) -> Result<DateTime<Utc>> {
        Project::find_by_id(project_id)
            .one(&self.db)
            .await?
            .map(|p| p.deadline)
            .ok_or(Error::ProjectNotFound { project_id })
    }
}

#[async_trait]
impl TaskStore for DbStore {
    async fn insert_task(
        &self,
        project_id: i64,
        title: &str,
        deadline: DateTime<Utc>,
    ) -> Result<i64> {
        let task = task::ActiveModel {
            project_id: Set(project_id),
            title: Set(title.to_string()),
            deadline: Set(deadline),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let saved = task.insert(&self.db).await?;
        Ok(saved.id)
    }
}

#[async_trait]
impl TimeLedger for DbStore {
    async fn add_hours(&self, task_id: i64, hours: f64) -> Result<f64> {
        // Insert and re-total inside one transaction so the returned total
        // includes exactly this entry.
        let txn = self.db.begin().await?;

        Task::find_by_id(task_id)
            .one(&txn)
            .await?
            .ok_or(Error::TaskNotFound { task_id })?;

        let entry = time_entry::ActiveModel {
            task_id: Set(task_id),
            hours: Set(hours),
            recorded_at: Set(Utc::now()),
            ..Default::default()
        };
        entry.insert(&txn).await?;

        let total: f64 = TimeEntry::find()
            .filter(time_entry::Column::TaskId.eq(task_id))
            .all(&txn)
            .await?
            .iter()
            .map(|e| e.hours)
            .sum();

        txn.commit().await?;
        Ok(total)
    }
}
