//! Persistence contracts for the journal.
//!
//! # Responsibility
//! - Define the storage handle the journal service writes through.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories store opaque text; encoding belongs to the service layer.

pub mod kv_repo;
