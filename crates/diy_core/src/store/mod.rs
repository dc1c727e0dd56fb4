//! Authoritative in-process project collection.
//!
//! # Responsibility
//! - Funnel every mutation through one owner so id and timestamp
//!   invariants always hold.
//! - Persist the full collection after each applied mutation.
//!
//! # Invariants
//! - Missing project/material/step ids are silent no-ops, not errors.
//! - Readers only ever receive owned copies of records.

pub mod project_store;
