//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities back the collaborator ports: seat counts, promo codes,
//! project deadlines, tasks, time entries and the outgoing mail outbox.

pub mod event;
pub mod outbox;
pub mod project;
pub mod promo_code;
pub mod task;
pub mod time_entry;

// Re-export specific types to avoid conflicts
pub use event::{Column as EventColumn, Entity as Event, Model as EventModel};
pub use outbox::{Column as OutboxColumn, Entity as Outbox, Model as OutboxModel};
pub use project::{Column as ProjectColumn, Entity as Project, Model as ProjectModel};
pub use promo_code::{Column as PromoCodeColumn, Entity as PromoCode, Model as PromoCodeModel};
pub use task::{Column as TaskColumn, Entity as Task, Model as TaskModel};
pub use time_entry::{Column as TimeEntryColumn, Entity as TimeEntry, Model as TimeEntryModel};
