//! Task business logic - task creation, time tracking, invoicing, deadline checks
//! and task notification e-mails.
//!
//! Validation messages are part of the contract: callers match on them, so they
//! are kept verbatim.

use crate::{
    core::{
        ports::{Clock, DeadlineSource, EmailMessage, Mailer, TaskStore, TimeLedger},
        validation::{
            require_email, require_non_negative, require_not_blank, require_positive_id,
            round_cents,
        },
    },
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::{debug, info, warn};

/// Upper bound on the hours a single time entry may record.
pub const MAX_TRACKED_HOURS: f64 = 1000.0;

/// Currencies an invoice can be issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar
    Usd,
    /// Euro
    Eur,
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            _ => Err(Error::invalid("Unsupported currency.")),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usd => f.write_str("USD"),
            Self::Eur => f.write_str("EUR"),
        }
    }
}

/// Lifecycle state of a task as reported in notifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Just created
    #[default]
    Created,
    /// Someone is working on it
    InProgress,
    /// Finished
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => f.write_str("created"),
            Self::InProgress => f.write_str("in progress"),
            Self::Done => f.write_str("done"),
        }
    }
}

/// What a task notification tells the recipient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInfo {
    /// Task title
    pub title: String,
    /// Current status
    #[serde(default)]
    pub status: TaskStatus,
}

/// Creates a task inside a project and returns the ID assigned by the store.
///
/// Checks run in order: title, deadline, project ID.
///
/// # Errors
/// - `"Title cannot be empty."` for a blank title
/// - `"Deadline cannot be in the past."` when `deadline` is before `clock.now()`
/// - `"Invalid project ID."` when `project_id <= 0`
pub async fn create_task<S, C>(
    store: &S,
    clock: &C,
    project_id: i64,
    title: &str,
    deadline: DateTime<Utc>,
) -> Result<i64>
where
    S: TaskStore + ?Sized,
    C: Clock + ?Sized,
{
    require_not_blank(title, "Title cannot be empty.")?;
    if deadline < clock.now() {
        return Err(Error::invalid("Deadline cannot be in the past."));
    }
    require_positive_id(project_id, "Invalid project ID.")?;

    let task_id = store.insert_task(project_id, title.trim(), deadline).await?;
    info!(task_id, project_id, "Task created");
    Ok(task_id)
}

/// Adds worked hours to a task and returns the task's new total.
///
/// # Errors
/// - `"Invalid task ID."` when `task_id <= 0`
/// - `"Hours must be positive."` when `hours <= 0` or not a number
/// - `"Unrealistic number of hours."` when `hours > 1000`
pub async fn track_time<L>(ledger: &L, task_id: i64, hours: f64) -> Result<f64>
where
    L: TimeLedger + ?Sized,
{
    require_positive_id(task_id, "Invalid task ID.")?;
    if hours.is_nan() || hours <= 0.0 {
        return Err(Error::invalid("Hours must be positive."));
    }
    if hours > MAX_TRACKED_HOURS {
        return Err(Error::invalid("Unrealistic number of hours."));
    }

    let total = ledger.add_hours(task_id, hours).await?;
    info!(task_id, hours, total, "Time tracked");
    Ok(total)
}

/// Calculates an invoice amount as `hours * rate`, rounded to cents with ties to even.
///
/// `currency` must be exactly `"USD"` or `"EUR"`.
pub fn calculate_invoice(hours: f64, rate: f64, currency: &str) -> Result<f64> {
    require_non_negative(hours, "Hours and rate must be non-negative.")?;
    require_non_negative(rate, "Hours and rate must be non-negative.")?;
    let currency: Currency = currency.parse()?;

    let amount = round_cents(hours * rate)?;
    debug!(hours, rate, %currency, amount, "Invoice calculated");
    Ok(amount)
}

/// Checks whether a project is still within its deadline.
///
/// Returns `true` while `clock.now() <= deadline`, including the exact deadline instant.
pub async fn check_project_deadline<D, C>(deadlines: &D, clock: &C, project_id: i64) -> Result<bool>
where
    D: DeadlineSource + ?Sized,
    C: Clock + ?Sized,
{
    require_positive_id(project_id, "Invalid project ID.")?;

    let deadline = deadlines.deadline(project_id).await?;
    let now = clock.now();
    debug!(project_id, %deadline, %now, "Checking project deadline");
    Ok(now <= deadline)
}

/// Sends an e-mail describing a task.
///
/// Returns `Ok(false)` instead of an error when the transport fails.
///
/// # Errors
/// Returns `"Invalid email."` if `email` has no `@`.
pub async fn send_task_notification<M>(mailer: &M, email: &str, task_info: &TaskInfo) -> Result<bool>
where
    M: Mailer + ?Sized,
{
    require_email(email, "Invalid email.")?;

    let message = EmailMessage {
        subject: format!("Task \"{}\" is {}", task_info.title, task_info.status),
        body: format!(
            "Title: {}\nStatus: {}\n",
            task_info.title, task_info.status
        ),
    };

    match mailer.send(email, &message).await {
        Ok(()) => {
            info!(email, title = %task_info.title, "Task notification sent");
            Ok(true)
        }
        Err(e) => {
            warn!(email, error = %e, "Failed to send task notification");
            Ok(false)
        }
    }
}
