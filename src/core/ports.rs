//! Collaborator ports - the external lookups and effects the operations depend on.
//!
//! Every operation that needs a seat count, a promo record, a deadline, persistence
//! or a mail transport receives it as one of these traits. Production code passes a
//! [`DbStore`](crate::core::store::DbStore) or one of the mailers in
//! [`mail`](crate::core::mail); tests pass in-memory stand-ins.

use crate::errors::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Looks up how many seats an event still has.
#[async_trait]
pub trait SeatSource: Send + Sync {
    /// Available seat count for `event_id`.
    async fn available_seats(&self, event_id: i64) -> Result<i64>;
}

/// Any `Fn(event_id) -> seats` closure is a seat source.
#[async_trait]
impl<F> SeatSource for F
where
    F: Fn(i64) -> i64 + Send + Sync,
{
    async fn available_seats(&self, event_id: i64) -> Result<i64> {
        Ok(self(event_id))
    }
}

/// Snapshot of a promo code's validity state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoRecord {
    /// The code itself
    pub code: String,
    /// Expired codes are never applicable
    pub is_expired: bool,
    /// Remaining number of applications
    pub usage_left: i32,
}

impl PromoRecord {
    /// A code is applicable while it is not expired and has uses left.
    #[must_use]
    pub const fn is_applicable(&self) -> bool {
        !self.is_expired && self.usage_left > 0
    }
}

/// Reads and consumes promo codes.
#[async_trait]
pub trait PromoSource: Send + Sync {
    /// Returns the record for `code`, or `None` if no such code exists.
    async fn find(&self, code: &str) -> Result<Option<PromoRecord>>;

    /// Consumes one use of `code`.
    ///
    /// Returns `false` if no use was left to consume, for example because a
    /// concurrent redemption took the last one after [`PromoSource::find`].
    async fn mark_used(&self, code: &str) -> Result<bool>;
}

/// Provides project deadlines.
#[async_trait]
pub trait DeadlineSource: Send + Sync {
    /// Deadline of `project_id`; fails with `ProjectNotFound` for unknown projects.
    async fn deadline(&self, project_id: i64) -> Result<DateTime<Utc>>;
}

/// Persists newly created tasks.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a task and returns the identifier assigned to it.
    async fn insert_task(&self, project_id: i64, title: &str, deadline: DateTime<Utc>)
    -> Result<i64>;
}

/// Accumulates hours worked per task.
#[async_trait]
pub trait TimeLedger: Send + Sync {
    /// Records `hours` against `task_id` and returns the task's new total.
    async fn add_hours(&self, task_id: i64, hours: f64) -> Result<f64>;
}

/// A formatted plain-text e-mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

/// Delivers e-mail. Implementations may fail; callers decide how to report it.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends `message` to `email`.
    async fn send(&self, email: &str, message: &EmailMessage) -> Result<()>;
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
