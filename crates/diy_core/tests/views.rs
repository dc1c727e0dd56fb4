use diy_core::{
    active_projects, count_with_status, dashboard_stats, filter_and_sort, material_summary,
    ordered_steps, project_progress, recent_projects, Difficulty, DifficultyFilter, Material,
    Project, ProjectQuery, ProjectStatus, SortKey, StatusFilter, Step,
};
use uuid::Uuid;

fn project(title: &str, category: &str, status: ProjectStatus, cost: f64, hours: f64) -> Project {
    Project {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: format!("{title} plan"),
        category: category.to_string(),
        status,
        difficulty: Difficulty::Intermediate,
        estimated_duration: hours,
        estimated_cost: cost,
        actual_cost: None,
        start_date: None,
        completion_date: None,
        image_url: None,
        materials: Vec::new(),
        steps: Vec::new(),
        notes: None,
        tags: Vec::new(),
        created_at: 0,
        updated_at: 0,
    }
}

fn step(order: i64, completed: bool) -> Step {
    Step {
        id: Uuid::new_v4(),
        title: format!("step {order}"),
        description: String::new(),
        duration: 1.0,
        completed,
        order,
        image_url: None,
        tips: None,
    }
}

/// Three projects mirroring the sample data set.
fn sample() -> Vec<Project> {
    let mut cabinets = project(
        "Kitchen Cabinet Makeover",
        "Kitchen Renovation",
        ProjectStatus::InProgress,
        450.0,
        24.0,
    );
    cabinets.created_at = 1_000;
    cabinets.updated_at = 5_000;
    cabinets.actual_cost = Some(180.0);

    let mut bench = project(
        "Garden Bench",
        "Outdoor/Garden",
        ProjectStatus::Completed,
        320.0,
        16.0,
    );
    bench.difficulty = Difficulty::Beginner;
    bench.created_at = 2_000;
    bench.updated_at = 3_000;
    bench.actual_cost = Some(295.0);

    let mut shelves = project(
        "Floating Shelves",
        "Living Room",
        ProjectStatus::Planning,
        280.0,
        12.0,
    );
    shelves.created_at = 3_000;
    shelves.updated_at = 4_000;

    vec![cabinets, bench, shelves]
}

fn titles(projects: &[Project]) -> Vec<&str> {
    projects.iter().map(|project| project.title.as_str()).collect()
}

#[test]
fn dashboard_totals_and_completion_rate() {
    let stats = dashboard_stats(&sample());

    assert_eq!(stats.total_projects, 3);
    assert_eq!(stats.total_estimated_cost, 1050.0);
    assert_eq!(stats.total_actual_cost, 475.0);
    assert_eq!(stats.total_estimated_duration, 52.0);
    assert_eq!(stats.status_counts.get(ProjectStatus::Completed), 1);
    assert_eq!(stats.status_counts.in_progress, 1);
    assert_eq!(stats.status_counts.on_hold, 0);
    assert_eq!(format!("{:.1}", stats.completion_rate), "33.3");
}

#[test]
fn status_badge_counts() {
    let projects = sample();
    assert_eq!(count_with_status(&projects, ProjectStatus::Planning), 1);
    assert_eq!(count_with_status(&projects, ProjectStatus::OnHold), 0);
}

#[test]
fn match_all_query_keeps_store_order() {
    let projects = sample();
    let listed = filter_and_sort(&projects, &ProjectQuery::all_in_store_order());
    assert_eq!(listed, projects);
}

#[test]
fn search_is_case_insensitive_over_title_description_category() {
    let projects = sample();
    let query = ProjectQuery {
        search: "kitchen".to_string(),
        ..ProjectQuery::default()
    };
    assert_eq!(
        titles(&filter_and_sort(&projects, &query)),
        vec!["Kitchen Cabinet Makeover"]
    );

    let by_category = ProjectQuery {
        search: "OUTDOOR".to_string(),
        ..ProjectQuery::default()
    };
    assert_eq!(
        titles(&filter_and_sort(&projects, &by_category)),
        vec!["Garden Bench"]
    );

    let by_description = ProjectQuery {
        search: "shelves plan".to_string(),
        ..ProjectQuery::default()
    };
    assert_eq!(filter_and_sort(&projects, &by_description).len(), 1);
}

#[test]
fn filters_are_anded() {
    let projects = sample();
    let query = ProjectQuery {
        status: StatusFilter::Only(ProjectStatus::Completed),
        difficulty: DifficultyFilter::Only(Difficulty::Intermediate),
        ..ProjectQuery::default()
    };
    assert!(filter_and_sort(&projects, &query).is_empty());

    let beginner_completed = ProjectQuery {
        difficulty: DifficultyFilter::Only(Difficulty::Beginner),
        ..query
    };
    assert_eq!(
        titles(&filter_and_sort(&projects, &beginner_completed)),
        vec!["Garden Bench"]
    );
}

#[test]
fn sort_keys_order_results() {
    let projects = sample();
    let sorted = |sort: SortKey| {
        let query = ProjectQuery {
            sort,
            ..ProjectQuery::default()
        };
        filter_and_sort(&projects, &query)
    };

    let durations: Vec<f64> = sorted(SortKey::EstimatedDuration)
        .iter()
        .map(|project| project.estimated_duration)
        .collect();
    assert_eq!(durations, vec![24.0, 16.0, 12.0]);

    assert_eq!(
        titles(&sorted(SortKey::Title)),
        vec!["Floating Shelves", "Garden Bench", "Kitchen Cabinet Makeover"]
    );
    assert_eq!(
        titles(&sorted(SortKey::CreatedAt)),
        vec!["Floating Shelves", "Garden Bench", "Kitchen Cabinet Makeover"]
    );
    assert_eq!(
        titles(&sorted(SortKey::UpdatedAt)),
        vec!["Kitchen Cabinet Makeover", "Floating Shelves", "Garden Bench"]
    );
    assert_eq!(
        titles(&sorted(SortKey::EstimatedCost)),
        vec!["Kitchen Cabinet Makeover", "Garden Bench", "Floating Shelves"]
    );
}

#[test]
fn recent_and_active_selections() {
    let projects = sample();
    assert_eq!(
        titles(&recent_projects(&projects, 2)),
        vec!["Kitchen Cabinet Makeover", "Floating Shelves"]
    );
    assert_eq!(recent_projects(&projects, 10).len(), 3);
    assert_eq!(
        titles(&active_projects(&projects, 2)),
        vec!["Kitchen Cabinet Makeover"]
    );
    assert!(active_projects(&projects, 0).is_empty());
}

#[test]
fn progress_handles_empty_and_partial_plans() {
    let mut target = project("Deck", "Outdoor/Garden", ProjectStatus::Planning, 0.0, 1.0);
    let empty = project_progress(&target);
    assert_eq!((empty.completed, empty.total), (0, 0));
    assert_eq!(empty.fraction(), 0.0);

    target.steps = vec![step(3, true), step(1, false), step(2, true), step(4, false)];
    let partial = project_progress(&target);
    assert_eq!((partial.completed, partial.total), (2, 4));
    assert_eq!(partial.fraction(), 0.5);
    assert_eq!(partial.percent(), 50.0);
}

#[test]
fn ordered_steps_sorts_by_order_key_stably() {
    let mut target = project("Deck", "Outdoor/Garden", ProjectStatus::Planning, 0.0, 1.0);
    let first_two = step(2, false);
    let second_two = step(2, true);
    target.steps = vec![step(5, false), first_two.clone(), step(1, false), second_two.clone()];

    let ordered = ordered_steps(&target);
    let orders: Vec<i64> = ordered.iter().map(|step| step.order).collect();
    assert_eq!(orders, vec![1, 2, 2, 5]);
    assert_eq!(ordered[1].id, first_two.id);
    assert_eq!(ordered[2].id, second_two.id);
}

#[test]
fn material_summary_tracks_purchases() {
    let mut target = project("Shed", "Outdoor/Garden", ProjectStatus::Planning, 0.0, 1.0);
    target.materials = vec![
        Material {
            id: Uuid::new_v4(),
            name: "Lumber".to_string(),
            quantity: 20.0,
            unit: "pcs".to_string(),
            estimated_cost: 240.0,
            purchased: true,
            notes: None,
        },
        Material {
            id: Uuid::new_v4(),
            name: "Roofing".to_string(),
            quantity: 3.0,
            unit: "rolls".to_string(),
            estimated_cost: 90.0,
            purchased: false,
            notes: None,
        },
    ];

    let summary = material_summary(&target);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.purchased, 1);
    assert_eq!(summary.total_cost, 330.0);
    assert_eq!(summary.remaining_cost(), 90.0);
}
