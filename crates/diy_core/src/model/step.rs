//! Step model: ordered tasks in a project's execution plan.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a step, unique across all projects.
pub type StepId = Uuid;

/// One task in a project's plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: StepId,
    pub title: String,
    pub description: String,
    /// Hours.
    pub duration: f64,
    pub completed: bool,
    /// Display sort key. Not necessarily contiguous or unique.
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Vec<String>>,
}

impl Step {
    pub(crate) fn from_request(id: StepId, request: NewStep) -> Self {
        Self {
            id,
            title: request.title,
            description: request.description,
            duration: request.duration,
            completed: request.completed,
            order: request.order,
            image_url: request.image_url,
            tips: request.tips,
        }
    }

    pub(crate) fn apply_patch(&mut self, patch: &StepPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        if let Some(image_url) = &patch.image_url {
            self.image_url = image_url.clone();
        }
        if let Some(tips) = &patch.tips {
            self.tips = tips.clone();
        }
    }
}

/// Create request for a step. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStep {
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub completed: bool,
    pub order: i64,
    pub image_url: Option<String>,
    pub tips: Option<Vec<String>>,
}

impl NewStep {
    /// Creates an incomplete step request.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        duration: f64,
        order: i64,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            duration,
            completed: false,
            order,
            image_url: None,
            tips: None,
        }
    }

    /// Validates caller input. The store does not call this.
    pub fn validate(&self) -> Result<(), StepValidationError> {
        if self.title.trim().is_empty() {
            return Err(StepValidationError::MissingTitle);
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(StepValidationError::NegativeDuration(self.duration));
        }
        Ok(())
    }
}

/// Partial update for a step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<f64>,
    pub completed: Option<bool>,
    pub order: Option<i64>,
    pub image_url: Option<Option<String>>,
    pub tips: Option<Option<Vec<String>>>,
}

impl StepPatch {
    /// Validates only the fields present in the patch.
    pub fn validate(&self) -> Result<(), StepValidationError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(StepValidationError::MissingTitle);
            }
        }
        if let Some(duration) = self.duration {
            if !duration.is_finite() || duration < 0.0 {
                return Err(StepValidationError::NegativeDuration(duration));
            }
        }
        Ok(())
    }
}

/// Validation failures for step input.
#[derive(Debug, Clone, PartialEq)]
pub enum StepValidationError {
    MissingTitle,
    NegativeDuration(f64),
}

impl Display for StepValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "step title is required"),
            Self::NegativeDuration(value) => {
                write!(f, "step duration must be 0 or greater, got {value}")
            }
        }
    }
}

impl Error for StepValidationError {}
