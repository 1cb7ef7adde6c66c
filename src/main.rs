use booking_buddy::{
    config::{catalog, database, seed},
    core::mail::OutboxMailer,
    errors::Result,
};
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the catalog
    let catalog = catalog::load_default_config()
        .inspect_err(|e| error!("Critical error loading config.toml: {}", e))?;
    info!(
        events = catalog.events.len(),
        promo_codes = catalog.promo_codes.len(),
        projects = catalog.projects.len(),
        "Loaded catalog configuration."
    );

    // 4. Connect and create tables
    if std::env::var("DATABASE_URL").is_err() {
        std::fs::create_dir_all("data")?;
    }
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Seed events, promo codes and projects
    let summary = seed::seed_catalog(&db, &catalog)
        .await
        .inspect_err(|e| error!("Failed to seed catalog: {}", e))?;

    // 6. Queue the seeding notice, sent from the configured address
    let mailer = OutboxMailer::new(db, catalog.mail.from.as_str());
    match std::env::var("NOTIFY_EMAIL") {
        Ok(admin) => {
            if !seed::notify_seeded(&mailer, &admin, &summary).await? {
                warn!(to = %admin, "Seeding notice was not queued.");
            }
        }
        Err(_) => info!("NOTIFY_EMAIL not set; skipping seeding notice."),
    }

    info!(mail_from = %catalog.mail.from, "Ready.");
    Ok(())
}
