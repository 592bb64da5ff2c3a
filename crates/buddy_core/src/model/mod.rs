//! Daily wellbeing domain model.
//!
//! # Responsibility
//! - Define the day record, its date key and the date-keyed store.
//! - Keep merge and default rules next to the data they govern.
//!
//! # Invariants
//! - Every record is addressed by a validated `IsoDate`.
//! - Store values are replaced wholesale on mutation, never edited in place.

pub mod date;
pub mod day;
pub mod store;
