//! Persistence layer for the project collection.
//!
//! # Responsibility
//! - Define the contract for loading and saving the whole project snapshot.
//! - Isolate SQLite and JSON encoding details from the store.
//!
//! # Invariants
//! - Saves overwrite the named record wholesale; there are no partial writes.
//! - Reads reject undecodable persisted state instead of masking it.

pub mod state_repo;
