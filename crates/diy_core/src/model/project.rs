//! Project domain model.
//!
//! # Responsibility
//! - Define the canonical project record and its lifecycle enums.
//! - Define create/patch request shapes used by the store.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes.
//! - `created_at` is set once at creation; `updated_at` only moves forward.
//! - Patch requests carry no id or timestamp fields.

use crate::model::material::{Material, NewMaterial};
use crate::model::step::{NewStep, Step};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

static HTTP_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/?#]+[^\s]*$").expect("valid url regex"));

/// Stable identifier for a project.
pub type ProjectId = Uuid;

/// Project lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    /// Not started yet. Default for newly created projects.
    Planning,
    /// Work is underway.
    InProgress,
    /// Finished.
    Completed,
    /// Paused.
    OnHold,
}

impl ProjectStatus {
    /// All statuses in display order.
    pub const ALL: [ProjectStatus; 4] = [
        Self::Planning,
        Self::InProgress,
        Self::Completed,
        Self::OnHold,
    ];

    /// Stable string id, identical to the serialized value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::OnHold => "on-hold",
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = UnknownVariantError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "planning" => Ok(Self::Planning),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "on-hold" => Ok(Self::OnHold),
            other => Err(UnknownVariantError {
                kind: "project status",
                value: other.to_string(),
            }),
        }
    }
}

/// Skill level required by a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Stable string id, identical to the serialized value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownVariantError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(UnknownVariantError {
                kind: "difficulty",
                value: other.to_string(),
            }),
        }
    }
}

/// Parse error for enum string values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariantError {
    pub kind: &'static str,
    pub value: String,
}

impl Display for UnknownVariantError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} `{}`", self.kind, self.value)
    }
}

impl Error for UnknownVariantError {}

/// Canonical project record.
///
/// Serialized with camelCase keys so the persisted document keeps the
/// `{ "projects": [...] }` layout used by earlier releases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ProjectStatus,
    pub difficulty: Difficulty,
    /// Hours.
    pub estimated_duration: f64,
    pub estimated_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_cost: Option<f64>,
    /// Unix epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,
    /// Unix epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Unix epoch milliseconds. Set once by the store.
    pub created_at: i64,
    /// Unix epoch milliseconds. Refreshed by the store on every mutation.
    pub updated_at: i64,
}

impl Project {
    /// Builds a project record from a create request.
    ///
    /// Both timestamps are set to `now_ms`. Nested materials and steps get
    /// fresh ids. Tags are deduplicated.
    pub(crate) fn from_request(id: ProjectId, request: NewProject, now_ms: i64) -> Self {
        Self {
            id,
            title: request.title,
            description: request.description,
            category: request.category,
            status: request.status,
            difficulty: request.difficulty,
            estimated_duration: request.estimated_duration,
            estimated_cost: request.estimated_cost,
            actual_cost: request.actual_cost,
            start_date: request.start_date,
            completion_date: request.completion_date,
            image_url: request.image_url,
            materials: request
                .materials
                .into_iter()
                .map(|material| Material::from_request(Uuid::new_v4(), material))
                .collect(),
            steps: request
                .steps
                .into_iter()
                .map(|step| Step::from_request(Uuid::new_v4(), step))
                .collect(),
            notes: request.notes,
            tags: dedup_tags(request.tags),
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Advances `updated_at` to `max(now_ms, updated_at + 1)`.
    pub(crate) fn touch(&mut self, now_ms: i64) {
        self.updated_at = now_ms.max(self.updated_at.saturating_add(1));
    }

    /// Applies every `Some` field of `patch`. Does not touch timestamps.
    pub(crate) fn apply_patch(&mut self, patch: &ProjectPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(duration) = patch.estimated_duration {
            self.estimated_duration = duration;
        }
        if let Some(cost) = patch.estimated_cost {
            self.estimated_cost = cost;
        }
        if let Some(actual_cost) = patch.actual_cost {
            self.actual_cost = actual_cost;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(completion_date) = patch.completion_date {
            self.completion_date = completion_date;
        }
        if let Some(image_url) = &patch.image_url {
            self.image_url = image_url.clone();
        }
        if let Some(notes) = &patch.notes {
            self.notes = notes.clone();
        }
        if let Some(tags) = &patch.tags {
            self.tags = dedup_tags(tags.clone());
        }
    }
}

/// Create request for a project. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ProjectStatus,
    pub difficulty: Difficulty,
    pub estimated_duration: f64,
    pub estimated_cost: f64,
    pub actual_cost: Option<f64>,
    pub start_date: Option<i64>,
    pub completion_date: Option<i64>,
    pub image_url: Option<String>,
    pub materials: Vec<NewMaterial>,
    pub steps: Vec<NewStep>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

impl NewProject {
    /// Creates a request with the defaults used by the new-project flow.
    ///
    /// # Invariants
    /// - Status starts as `Planning`, difficulty as `Beginner`.
    /// - Duration defaults to 1 hour, cost to 0.
    /// - Materials, steps and tags start empty.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
            status: ProjectStatus::Planning,
            difficulty: Difficulty::Beginner,
            estimated_duration: 1.0,
            estimated_cost: 0.0,
            actual_cost: None,
            start_date: None,
            completion_date: None,
            image_url: None,
            materials: Vec::new(),
            steps: Vec::new(),
            notes: None,
            tags: Vec::new(),
        }
    }

    /// Validates form-level constraints.
    ///
    /// The store never calls this; callers run it before submitting.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        validate_required("title", &self.title)?;
        validate_required("description", &self.description)?;
        validate_required("category", &self.category)?;
        validate_duration(self.estimated_duration)?;
        validate_cost("estimated_cost", self.estimated_cost)?;
        if let Some(actual_cost) = self.actual_cost {
            validate_cost("actual_cost", actual_cost)?;
        }
        if let Some(url) = &self.image_url {
            validate_image_url(url)?;
        }
        Ok(())
    }
}

/// Partial update for a project.
///
/// `Some(value)` assigns, `None` leaves the field untouched. Optional record
/// fields are doubly wrapped so a patch can clear them with `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<ProjectStatus>,
    pub difficulty: Option<Difficulty>,
    pub estimated_duration: Option<f64>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<Option<f64>>,
    pub start_date: Option<Option<i64>>,
    pub completion_date: Option<Option<i64>>,
    pub image_url: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

impl ProjectPatch {
    /// Validates only the fields present in the patch.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if let Some(title) = &self.title {
            validate_required("title", title)?;
        }
        if let Some(description) = &self.description {
            validate_required("description", description)?;
        }
        if let Some(category) = &self.category {
            validate_required("category", category)?;
        }
        if let Some(duration) = self.estimated_duration {
            validate_duration(duration)?;
        }
        if let Some(cost) = self.estimated_cost {
            validate_cost("estimated_cost", cost)?;
        }
        if let Some(Some(cost)) = self.actual_cost {
            validate_cost("actual_cost", cost)?;
        }
        if let Some(Some(url)) = &self.image_url {
            validate_image_url(url)?;
        }
        Ok(())
    }

    /// Returns whether the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Form-level validation failures for project input.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectValidationError {
    /// A required text field is empty or whitespace.
    MissingField(&'static str),
    /// Estimated duration must be at least one hour.
    DurationTooShort(f64),
    /// Costs must be finite and non-negative.
    InvalidCost { field: &'static str, value: f64 },
    /// Image URL is set but is not an http(s) URL.
    InvalidImageUrl(String),
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::DurationTooShort(value) => {
                write!(f, "duration must be at least 1 hour, got {value}")
            }
            Self::InvalidCost { field, value } => {
                write!(f, "{field} must be 0 or greater, got {value}")
            }
            Self::InvalidImageUrl(value) => write!(f, "invalid image url `{value}`"),
        }
    }
}

impl Error for ProjectValidationError {}

fn validate_required(field: &'static str, value: &str) -> Result<(), ProjectValidationError> {
    if value.trim().is_empty() {
        return Err(ProjectValidationError::MissingField(field));
    }
    Ok(())
}

fn validate_duration(value: f64) -> Result<(), ProjectValidationError> {
    if !value.is_finite() || value < 1.0 {
        return Err(ProjectValidationError::DurationTooShort(value));
    }
    Ok(())
}

fn validate_cost(field: &'static str, value: f64) -> Result<(), ProjectValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ProjectValidationError::InvalidCost { field, value });
    }
    Ok(())
}

fn validate_image_url(value: &str) -> Result<(), ProjectValidationError> {
    // Empty string means "no image" in the form.
    if value.is_empty() || HTTP_URL_RE.is_match(value) {
        return Ok(());
    }
    Err(ProjectValidationError::InvalidImageUrl(value.to_string()))
}

fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut deduped: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !deduped.contains(&tag) {
            deduped.push(tag);
        }
    }
    deduped
}
