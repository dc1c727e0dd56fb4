//! Per-project progress and nested-collection summaries.

use crate::model::project::Project;
use crate::model::step::Step;

/// Completed steps over total steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepProgress {
    pub completed: usize,
    pub total: usize,
}

impl StepProgress {
    /// `completed / total`, or 0.0 when there are no steps.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }

    /// Fraction scaled to `0.0..=100.0`.
    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }
}

pub fn project_progress(project: &Project) -> StepProgress {
    StepProgress {
        completed: project.steps.iter().filter(|step| step.completed).count(),
        total: project.steps.len(),
    }
}

/// Material cost and purchase tracking totals for one project.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MaterialSummary {
    pub total: usize,
    pub purchased: usize,
    pub total_cost: f64,
    pub purchased_cost: f64,
}

impl MaterialSummary {
    /// Cost of materials still to buy.
    pub fn remaining_cost(&self) -> f64 {
        self.total_cost - self.purchased_cost
    }
}

pub fn material_summary(project: &Project) -> MaterialSummary {
    project
        .materials
        .iter()
        .fold(MaterialSummary::default(), |mut summary, material| {
            summary.total += 1;
            summary.total_cost += material.estimated_cost;
            if material.purchased {
                summary.purchased += 1;
                summary.purchased_cost += material.estimated_cost;
            }
            summary
        })
}

/// Steps in display order: ascending `order`, ties kept in insertion order.
pub fn ordered_steps(project: &Project) -> Vec<Step> {
    let mut steps = project.steps.clone();
    steps.sort_by_key(|step| step.order);
    steps
}
