//! Domain model for projects and their nested materials and steps.
//!
//! # Responsibility
//! - Define canonical records shared by store, persistence and views.
//! - Define explicit create and patch request types.
//!
//! # Invariants
//! - Materials and steps exist only inside exactly one project.
//! - Progress is derived by views, never stored.

pub mod material;
pub mod project;
pub mod step;
