//! lernplan: study-schedule planning for law-exam candidates.
//!
//! The crate centers on two engines: a deterministic slot allocator that
//! distributes a prioritized topic list across a bounded calendar window,
//! and a local/remote merge protocol that reconciles two eventually
//! consistent copies of daily check-in records without ever overwriting a
//! locally committed entry with a stale remote read. Around them sit the
//! check-in eligibility decision, the versioned local-store migration, and
//! a line-based schedule text importer.

pub mod checkin;
pub mod cli;
pub mod config;
pub mod domain;
pub mod import;
pub mod merge;
pub mod plan;
pub mod provider;
pub mod store;
