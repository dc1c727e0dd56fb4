//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `diy_core` linkage without any UI runtime.
//! - Optionally open a store file and print its dashboard summary.
//!
//! Usage: `diy_cli [db_path]`

use diy_core::{
    active_projects, dashboard_stats, open_store, recent_projects, ProjectStatus, StoreConfig,
};
use std::process::ExitCode;

const RECENT_LIMIT: usize = 3;
const ACTIVE_LIMIT: usize = 2;

fn main() -> ExitCode {
    println!("diy_core ping={}", diy_core::ping());
    println!("diy_core version={}", diy_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let store = match open_store(&StoreConfig::new(db_path)) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to open store: {err}");
            return ExitCode::FAILURE;
        }
    };

    let projects = store.projects();
    let stats = dashboard_stats(projects);
    println!("projects total={}", stats.total_projects);
    for status in ProjectStatus::ALL {
        println!("projects {}={}", status, stats.status_counts.get(status));
    }
    println!("completion_rate={:.1}%", stats.completion_rate);
    println!("estimated_cost={:.2}", stats.total_estimated_cost);
    println!("actual_cost={:.2}", stats.total_actual_cost);
    println!("estimated_hours={}", stats.total_estimated_duration);

    for project in active_projects(projects, ACTIVE_LIMIT) {
        println!("active id={} title={}", project.id, project.title);
    }
    for project in recent_projects(projects, RECENT_LIMIT) {
        println!(
            "recent id={} status={} title={}",
            project.id, project.status, project.title
        );
    }

    ExitCode::SUCCESS
}
