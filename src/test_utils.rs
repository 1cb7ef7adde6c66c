//! Shared test utilities for `BookingBuddy`.
//!
//! This module provides helpers for setting up test databases, seeding
//! collaborator data and recording or failing mail transports.

use crate::{
    core::{
        ports::{EmailMessage, Mailer, TaskStore},
        store::DbStore,
    },
    entities::{event, project, promo_code},
    errors::{Error, Result},
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, DatabaseBackend, DatabaseConnection, MockDatabase, Set};
use std::sync::Mutex;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A [`DbStore`] over a fresh in-memory database.
pub async fn setup_test_store() -> Result<DbStore> {
    Ok(DbStore::new(setup_test_db().await?))
}

/// A [`DbStore`] whose every query fails. Use it to prove that validation
/// rejects input before any collaborator is touched.
pub fn mock_store() -> DbStore {
    DbStore::new(MockDatabase::new(DatabaseBackend::Sqlite).into_connection())
}

/// The fixed "current time" used by task tests: 2025-05-10 12:00 UTC.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 10, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Inserts an event with the given seat count.
pub async fn create_test_event(
    db: &DatabaseConnection,
    id: i64,
    seats: i64,
) -> Result<event::Model> {
    event::ActiveModel {
        id: Set(id),
        name: Set(format!("Event {id}")),
        seats: Set(seats),
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Inserts a promo code.
pub async fn create_test_promo(
    db: &DatabaseConnection,
    code: &str,
    usage_left: i32,
    is_expired: bool,
) -> Result<promo_code::Model> {
    promo_code::ActiveModel {
        code: Set(code.to_string()),
        usage_left: Set(usage_left),
        is_expired: Set(is_expired),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Inserts a project with the given deadline.
pub async fn create_test_project(
    db: &DatabaseConnection,
    id: i64,
    deadline: DateTime<Utc>,
) -> Result<project::Model> {
    project::ActiveModel {
        id: Set(id),
        name: Set(format!("Project {id}")),
        deadline: Set(deadline),
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a task in project 1, due a week after [`test_now`].
///
/// # Defaults
/// * `project_id`: 1
/// * `title`: "Test task"
pub async fn create_test_task(store: &DbStore) -> Result<i64> {
    store
        .insert_task(1, "Test task", test_now() + Duration::days(7))
        .await
}

/// Mailer that records every message it is asked to send.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, EmailMessage)>>,
}

impl RecordingMailer {
    /// Messages sent so far, as `(recipient, message)` pairs.
    pub fn sent(&self) -> Vec<(String, EmailMessage)> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &str, message: &EmailMessage) -> Result<()> {
        self.sent
            .lock()
            .map_err(|e| Error::Mail {
                message: e.to_string(),
            })?
            .push((email.to_string(), message.clone()));
        Ok(())
    }
}

/// Mailer whose transport always fails, like an SMTP server that is down.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: &str, _message: &EmailMessage) -> Result<()> {
        Err(Error::Mail {
            message: "SMTP Error".to_string(),
        })
    }
}
