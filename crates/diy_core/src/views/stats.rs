//! Dashboard aggregates.

use crate::model::project::{Project, ProjectStatus};

/// Project count per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub planning: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub on_hold: usize,
}

impl StatusCounts {
    pub fn get(&self, status: ProjectStatus) -> usize {
        match status {
            ProjectStatus::Planning => self.planning,
            ProjectStatus::InProgress => self.in_progress,
            ProjectStatus::Completed => self.completed,
            ProjectStatus::OnHold => self.on_hold,
        }
    }

    fn increment(&mut self, status: ProjectStatus) {
        let slot = match status {
            ProjectStatus::Planning => &mut self.planning,
            ProjectStatus::InProgress => &mut self.in_progress,
            ProjectStatus::Completed => &mut self.completed,
            ProjectStatus::OnHold => &mut self.on_hold,
        };
        *slot += 1;
    }
}

/// Aggregate statistics shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashboardStats {
    pub total_projects: usize,
    pub status_counts: StatusCounts,
    pub total_estimated_cost: f64,
    /// Projects without an actual cost contribute 0.
    pub total_actual_cost: f64,
    /// Hours.
    pub total_estimated_duration: f64,
    /// Completed share as a percentage in `0.0..=100.0`; 0 when empty.
    pub completion_rate: f64,
}

/// Computes dashboard aggregates in one pass.
pub fn dashboard_stats(projects: &[Project]) -> DashboardStats {
    let mut stats = DashboardStats {
        total_projects: projects.len(),
        ..DashboardStats::default()
    };

    for project in projects {
        stats.status_counts.increment(project.status);
        stats.total_estimated_cost += project.estimated_cost;
        stats.total_actual_cost += project.actual_cost.unwrap_or(0.0);
        stats.total_estimated_duration += project.estimated_duration;
    }

    if stats.total_projects > 0 {
        stats.completion_rate =
            stats.status_counts.completed as f64 / stats.total_projects as f64 * 100.0;
    }

    stats
}

/// Count of projects in one status, as shown in navigation badges.
pub fn count_with_status(projects: &[Project], status: ProjectStatus) -> usize {
    projects
        .iter()
        .filter(|project| project.status == status)
        .count()
}

#[cfg(test)]
mod tests {
    use super::dashboard_stats;

    #[test]
    fn empty_collection_has_zero_rate() {
        let stats = dashboard_stats(&[]);
        assert_eq!(stats.total_projects, 0);
        assert_eq!(stats.completion_rate, 0.0);
        assert_eq!(stats.total_estimated_cost, 0.0);
    }
}
