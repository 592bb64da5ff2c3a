//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations and persistence into use-case level APIs.
//! - Keep CLI callers decoupled from storage details.

pub mod journal_service;
