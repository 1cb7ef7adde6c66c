/// Database connection and schema creation
pub mod database;

/// Catalog configuration loading from config.toml
pub mod catalog;

/// Seeding the database from the catalog configuration
pub mod seed;
