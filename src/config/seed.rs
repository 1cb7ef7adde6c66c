//! Seeds the database with the events, promo codes and projects from the catalog.
//!
//! Entries already present (matched by ID, or by code for promo codes) are left
//! untouched so that seat counts and remaining promo uses survive restarts.

use crate::{
    config::catalog::CatalogConfig,
    core::{
        ports::{EmailMessage, Mailer},
        validation::require_email,
    },
    entities::{Event, Project, PromoCode, event, project, promo_code},
    errors::Result,
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::{info, warn};

/// Number of entries inserted by [`seed_catalog`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Events inserted
    pub events: usize,
    /// Promo codes inserted
    pub promo_codes: usize,
    /// Projects inserted
    pub projects: usize,
}

/// Inserts every catalog entry that is not in the database yet.
pub async fn seed_catalog(db: &DatabaseConnection, catalog: &CatalogConfig) -> Result<SeedSummary> {
    let txn = db.begin().await?;
    let mut summary = SeedSummary::default();

    for cfg in &catalog.events {
        if Event::find_by_id(cfg.id).one(&txn).await?.is_none() {
            event::ActiveModel {
                id: Set(cfg.id),
                name: Set(cfg.name.clone()),
                seats: Set(cfg.seats),
            }
            .insert(&txn)
            .await?;
            summary.events += 1;
        }
    }

    for cfg in &catalog.promo_codes {
        let existing = PromoCode::find()
            .filter(promo_code::Column::Code.eq(cfg.code.as_str()))
            .one(&txn)
            .await?;
        if existing.is_none() {
            promo_code::ActiveModel {
                code: Set(cfg.code.clone()),
                usage_left: Set(cfg.usage_left),
                is_expired: Set(cfg.is_expired),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            summary.promo_codes += 1;
        }
    }

    for cfg in &catalog.projects {
        if Project::find_by_id(cfg.id).one(&txn).await?.is_none() {
            project::ActiveModel {
                id: Set(cfg.id),
                name: Set(cfg.name.clone()),
                deadline: Set(cfg.deadline),
            }
            .insert(&txn)
            .await?;
            summary.projects += 1;
        }
    }

    txn.commit().await?;

    info!(
        events = summary.events,
        promo_codes = summary.promo_codes,
        projects = summary.projects,
        "Catalog seeded"
    );
    Ok(summary)
}

/// Tells `email` what a startup seeding run inserted.
///
/// Returns `Ok(false)` if the mailer fails, like the booking and task notifications.
pub async fn notify_seeded<M>(mailer: &M, email: &str, summary: &SeedSummary) -> Result<bool>
where
    M: Mailer + ?Sized,
{
    require_email(email, "Invalid email address")?;

    let message = EmailMessage {
        subject: "Catalog seeded".to_string(),
        body: format!(
            "Inserted {} events, {} promo codes and {} projects.",
            summary.events, summary.promo_codes, summary.projects
        ),
    };

    match mailer.send(email, &message).await {
        Ok(()) => Ok(true),
        Err(e) => {
            warn!(to = email, error = %e, "Failed to send seeding notice");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        config::catalog::{EventConfig, ProjectConfig, PromoCodeConfig},
        config::catalog::MailConfig,
        core::{
            booking::{apply_promo_code, check_availability},
            mail::OutboxMailer,
            ports::FixedClock,
            store::DbStore,
            tasks::check_project_deadline,
        },
        entities::Outbox,
        errors::Error,
        test_utils::*,
    };
    use chrono::{Duration, TimeZone, Utc};

    fn catalog() -> CatalogConfig {
        CatalogConfig {
            events: vec![EventConfig {
                id: 1,
                name: "Concert".to_string(),
                seats: 10,
            }],
            promo_codes: vec![PromoCodeConfig {
                code: "PROMO10".to_string(),
                usage_left: 2,
                is_expired: false,
            }],
            projects: vec![ProjectConfig {
                id: 1,
                name: "Website".to_string(),
                deadline: Utc.with_ymd_and_hms(2025, 5, 15, 0, 0, 0).unwrap(),
            }],
            ..CatalogConfig::default()
        }
    }

    #[tokio::test]
    async fn test_seed_catalog_inserts_everything() -> Result<()> {
        let db = setup_test_db().await?;

        let summary = seed_catalog(&db, &catalog()).await?;
        assert_eq!(
            summary,
            SeedSummary {
                events: 1,
                promo_codes: 1,
                projects: 1,
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_catalog_keeps_existing_state() -> Result<()> {
        let store = setup_test_store().await?;
        seed_catalog(store.connection(), &catalog()).await?;

        assert!(apply_promo_code(&store, 1, "PROMO10").await?);

        // Re-seeding inserts nothing and does not restore the used promo
        let summary = seed_catalog(store.connection(), &catalog()).await?;
        assert_eq!(summary, SeedSummary::default());

        let promo = PromoCode::find().one(store.connection()).await?.unwrap();
        assert_eq!(promo.usage_left, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_seeded_catalog_serves_collaborators() -> Result<()> {
        let db = setup_test_db().await?;
        seed_catalog(&db, &catalog()).await?;
        let store = DbStore::new(db);

        assert!(check_availability(&store, 1, 10).await?);
        assert!(!check_availability(&store, 1, 11).await?);

        let deadline = Utc.with_ymd_and_hms(2025, 5, 15, 0, 0, 0).unwrap();
        let before = FixedClock(deadline - Duration::days(1));
        let after = FixedClock(deadline + Duration::days(1));
        assert!(check_project_deadline(&store, &before, 1).await?);
        assert!(!check_project_deadline(&store, &after, 1).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_seeding_notice_is_queued_from_configured_sender() -> Result<()> {
        let catalog = CatalogConfig {
            mail: MailConfig {
                from: "bookings@example.com".to_string(),
            },
            ..catalog()
        };
        let db = setup_test_db().await?;
        let summary = seed_catalog(&db, &catalog).await?;
        let mailer = OutboxMailer::new(db, catalog.mail.from.as_str());

        assert!(notify_seeded(&mailer, "admin@example.com", &summary).await?);

        let queued = Outbox::find().all(mailer.connection()).await?;
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].sender, "bookings@example.com");
        assert_eq!(queued[0].recipient, "admin@example.com");
        assert_eq!(queued[0].subject, "Catalog seeded");
        assert_eq!(
            queued[0].body,
            "Inserted 1 events, 1 promo codes and 1 projects."
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_seeding_notice_transport_failure() -> Result<()> {
        let summary = SeedSummary::default();
        assert!(!notify_seeded(&FailingMailer, "admin@example.com", &summary).await?);
        assert!(matches!(
            notify_seeded(&FailingMailer, "admin", &summary).await,
            Err(Error::InvalidArgument { .. })
        ));
        Ok(())
    }
}
