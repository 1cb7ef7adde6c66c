//! Core business logic, independent of how the crate is driven.

/// Pricing, availability, promo codes, booking references and booking e-mails
pub mod booking;
/// Log-only and outbox-backed mail transports
pub mod mail;
/// Collaborator traits the operations are written against
pub mod ports;
/// `SeaORM` implementations of the data ports
pub mod store;
/// Task creation, time tracking, invoicing, deadlines and task e-mails
pub mod tasks;
/// Shared input validation helpers
pub mod validation;
