//! Core domain logic for the DIY project tracker.
//! This crate is the single source of truth for project, material and step
//! invariants; presentation layers call into [`ProjectStore`] and [`views`].

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;
mod time;
pub mod views;

pub use config::{ConfigError, StoreConfig, DEFAULT_DB_FILE_NAME, DEFAULT_STORAGE_KEY};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::material::{
    Material, MaterialId, MaterialPatch, MaterialValidationError, NewMaterial,
};
pub use model::project::{
    Difficulty, NewProject, Project, ProjectId, ProjectPatch, ProjectStatus,
    ProjectValidationError, UnknownVariantError,
};
pub use model::step::{NewStep, Step, StepId, StepPatch, StepValidationError};
pub use repo::state_repo::{
    decode_state, encode_state, PersistedState, RepoError, RepoResult, SqliteStateRepository,
    StateRepository,
};
pub use store::project_store::{open_store, ProjectStore, StoreError, StoreResult, StoreSnapshot};
pub use views::listing::{
    active_projects, filter_and_sort, recent_projects, DifficultyFilter, ProjectQuery, SortKey,
    StatusFilter,
};
pub use views::progress::{
    material_summary, ordered_steps, project_progress, MaterialSummary, StepProgress,
};
pub use views::stats::{count_with_status, dashboard_stats, DashboardStats, StatusCounts};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
