//! Material model: purchasable items owned by exactly one project.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a material, unique across all projects.
pub type MaterialId = Uuid;

/// Purchasable item required by a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    pub quantity: f64,
    /// Free text, e.g. `pcs`, `m`, `gallon`.
    pub unit: String,
    pub estimated_cost: f64,
    pub purchased: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Material {
    pub(crate) fn from_request(id: MaterialId, request: NewMaterial) -> Self {
        Self {
            id,
            name: request.name,
            quantity: request.quantity,
            unit: request.unit,
            estimated_cost: request.estimated_cost,
            purchased: request.purchased,
            notes: request.notes,
        }
    }

    pub(crate) fn apply_patch(&mut self, patch: &MaterialPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(unit) = &patch.unit {
            self.unit = unit.clone();
        }
        if let Some(cost) = patch.estimated_cost {
            self.estimated_cost = cost;
        }
        if let Some(purchased) = patch.purchased {
            self.purchased = purchased;
        }
        if let Some(notes) = &patch.notes {
            self.notes = notes.clone();
        }
    }
}

/// Create request for a material. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaterial {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub estimated_cost: f64,
    pub purchased: bool,
    pub notes: Option<String>,
}

impl NewMaterial {
    /// Creates an unpurchased material request.
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        estimated_cost: f64,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            estimated_cost,
            purchased: false,
            notes: None,
        }
    }

    /// Validates caller input. The store does not call this.
    pub fn validate(&self) -> Result<(), MaterialValidationError> {
        if self.name.trim().is_empty() {
            return Err(MaterialValidationError::MissingName);
        }
        check_non_negative("quantity", self.quantity)?;
        check_non_negative("estimated_cost", self.estimated_cost)
    }
}

/// Partial update for a material.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialPatch {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub estimated_cost: Option<f64>,
    pub purchased: Option<bool>,
    pub notes: Option<Option<String>>,
}

impl MaterialPatch {
    /// Validates only the fields present in the patch.
    pub fn validate(&self) -> Result<(), MaterialValidationError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(MaterialValidationError::MissingName);
            }
        }
        if let Some(quantity) = self.quantity {
            check_non_negative("quantity", quantity)?;
        }
        if let Some(cost) = self.estimated_cost {
            check_non_negative("estimated_cost", cost)?;
        }
        Ok(())
    }
}

/// Validation failures for material input.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialValidationError {
    MissingName,
    Negative { field: &'static str, value: f64 },
}

impl Display for MaterialValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "material name is required"),
            Self::Negative { field, value } => {
                write!(f, "material {field} must be 0 or greater, got {value}")
            }
        }
    }
}

impl Error for MaterialValidationError {}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), MaterialValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(MaterialValidationError::Negative { field, value });
    }
    Ok(())
}
