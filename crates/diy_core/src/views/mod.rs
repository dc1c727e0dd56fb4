//! Derived read-only views over a project collection.
//!
//! # Responsibility
//! - Compute dashboard statistics, filtered/sorted listings and progress.
//!
//! # Invariants
//! - Every function is pure: same input, same output, no side effects.
//! - Results are owned values; callers cannot mutate store state through them.
//! - No division by zero: empty inputs produce zero rates.

pub mod listing;
pub mod progress;
pub mod stats;
