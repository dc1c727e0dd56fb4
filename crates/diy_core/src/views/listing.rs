//! Filtered and sorted project listings.
//!
//! # Invariants
//! - Search, status and difficulty predicates are ANDed.
//! - `All` filters and an empty search match every project.
//! - Sorting is stable, so ties keep store (insertion) order.

use crate::model::project::{Difficulty, Project, ProjectStatus, UnknownVariantError};
use std::cmp::Ordering;
use std::str::FromStr;

/// Status dimension of a listing query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ProjectStatus),
}

impl StatusFilter {
    pub fn matches(self, status: ProjectStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownVariantError;

    /// Accepts `all` or any serialized status value.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "" | "all" => Ok(Self::All),
            other => other.parse::<ProjectStatus>().map(Self::Only),
        }
    }
}

/// Difficulty dimension of a listing query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    pub fn matches(self, difficulty: Difficulty) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == difficulty,
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = UnknownVariantError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "" | "all" => Ok(Self::All),
            other => other.parse::<Difficulty>().map(Self::Only),
        }
    }
}

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Store order.
    Insertion,
    /// Alphabetical ascending, case-insensitive.
    Title,
    /// Newest first.
    CreatedAt,
    /// Most recently touched first.
    #[default]
    UpdatedAt,
    /// Most expensive first.
    EstimatedCost,
    /// Longest first.
    EstimatedDuration,
}

impl FromStr for SortKey {
    type Err = UnknownVariantError;

    /// Accepts the camelCase field names used by the projects page.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "insertion" => Ok(Self::Insertion),
            "title" => Ok(Self::Title),
            "createdAt" => Ok(Self::CreatedAt),
            "updatedAt" => Ok(Self::UpdatedAt),
            "estimatedCost" => Ok(Self::EstimatedCost),
            "estimatedDuration" => Ok(Self::EstimatedDuration),
            other => Err(UnknownVariantError {
                kind: "sort key",
                value: other.to_string(),
            }),
        }
    }
}

/// Search, filter and sort options for a project listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectQuery {
    /// Case-insensitive substring over title, description and category.
    pub search: String,
    pub status: StatusFilter,
    pub difficulty: DifficultyFilter,
    pub sort: SortKey,
}

impl ProjectQuery {
    /// Query matching everything, in store order.
    pub fn all_in_store_order() -> Self {
        Self {
            sort: SortKey::Insertion,
            ..Self::default()
        }
    }

    fn matches(&self, project: &Project, needle: &str) -> bool {
        let matches_search = needle.is_empty()
            || project.title.to_lowercase().contains(needle)
            || project.description.to_lowercase().contains(needle)
            || project.category.to_lowercase().contains(needle);

        matches_search
            && self.status.matches(project.status)
            && self.difficulty.matches(project.difficulty)
    }
}

/// Returns the matching projects in the requested order.
pub fn filter_and_sort(projects: &[Project], query: &ProjectQuery) -> Vec<Project> {
    let needle = query.search.to_lowercase();
    let mut matched: Vec<Project> = projects
        .iter()
        .filter(|project| query.matches(project, &needle))
        .cloned()
        .collect();

    sort_projects(&mut matched, query.sort);
    matched
}

/// Top `limit` projects by `updated_at`, newest first.
pub fn recent_projects(projects: &[Project], limit: usize) -> Vec<Project> {
    let mut sorted = projects.to_vec();
    sort_projects(&mut sorted, SortKey::UpdatedAt);
    sorted.truncate(limit);
    sorted
}

/// In-progress projects in store order, at most `limit`.
pub fn active_projects(projects: &[Project], limit: usize) -> Vec<Project> {
    projects
        .iter()
        .filter(|project| project.status == ProjectStatus::InProgress)
        .take(limit)
        .cloned()
        .collect()
}

fn sort_projects(projects: &mut [Project], key: SortKey) {
    match key {
        SortKey::Insertion => {}
        SortKey::Title => projects.sort_by(compare_titles),
        SortKey::CreatedAt => projects.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::UpdatedAt => projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortKey::EstimatedCost => {
            projects.sort_by(|a, b| b.estimated_cost.total_cmp(&a.estimated_cost))
        }
        SortKey::EstimatedDuration => {
            projects.sort_by(|a, b| b.estimated_duration.total_cmp(&a.estimated_duration))
        }
    }
}

fn compare_titles(a: &Project, b: &Project) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}
