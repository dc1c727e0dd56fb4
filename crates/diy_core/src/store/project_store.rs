//! Project store: CRUD over projects plus nested material/step helpers.
//!
//! # Responsibility
//! - Own the ordered project collection and its repository.
//! - Assign ids and timestamps; refresh `updated_at` on every mutation.
//! - Rehydrate once on open and persist after every applied mutation.
//!
//! # Invariants
//! - Collection order is insertion order.
//! - A nested mutation is a mutation of its owning project.
//! - When persistence fails the in-memory change is kept and the error is
//!   returned; the next successful save carries the full collection.

use crate::config::{ConfigError, StoreConfig};
use crate::db::{open_db, DbError};
use crate::model::material::{Material, MaterialId, MaterialPatch, NewMaterial};
use crate::model::project::{NewProject, Project, ProjectId, ProjectPatch};
use crate::model::step::{NewStep, Step, StepId, StepPatch};
use crate::repo::state_repo::{RepoError, SqliteStateRepository, StateRepository};
use crate::time::now_epoch_ms;
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure. Not-found is never reported here.
#[derive(Debug)]
pub enum StoreError {
    Config(ConfigError),
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid store config: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ConfigError> for StoreError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

/// Owned, immutable view of the collection at one revision.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    /// Bumped on every applied mutation; unchanged by no-ops.
    pub revision: u64,
    pub projects: Vec<Project>,
}

/// Single source of truth for projects.
pub struct ProjectStore<R: StateRepository> {
    repo: R,
    projects: Vec<Project>,
    revision: u64,
}

/// Opens the configured database and rehydrates a store from it.
pub fn open_store(config: &StoreConfig) -> StoreResult<ProjectStore<SqliteStateRepository>> {
    config.validate()?;
    let conn = open_db(&config.db_path)?;
    ProjectStore::open(SqliteStateRepository::new(conn, config.storage_key.clone()))
}

impl<R: StateRepository> ProjectStore<R> {
    /// Creates a store and rehydrates it from `repo` exactly once.
    ///
    /// An absent record yields an empty store. An undecodable record is an
    /// error; it is never silently replaced.
    pub fn open(repo: R) -> StoreResult<Self> {
        let projects = repo.load_projects()?.unwrap_or_default();
        info!(
            "event=store_open module=store status=ok projects={}",
            projects.len()
        );
        Ok(Self {
            repo,
            projects,
            revision: 0,
        })
    }

    /// Borrowed read of the current collection.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Owned copy of the current collection and its revision.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            revision: self.revision,
            projects: self.projects.clone(),
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Returns a copy of the project, or `None` when absent.
    pub fn get_project(&self, id: ProjectId) -> Option<Project> {
        self.projects.iter().find(|project| project.id == id).cloned()
    }

    /// Appends a new project with a fresh id and `created_at == updated_at`.
    ///
    /// On persistence failure the project stays in memory and the error is
    /// returned.
    pub fn create_project(&mut self, request: NewProject) -> StoreResult<Project> {
        let project = Project::from_request(Uuid::new_v4(), request, now_epoch_ms());
        self.projects.push(project.clone());
        self.revision += 1;
        self.persist("project_create")?;
        Ok(project)
    }

    /// Assigns every field present in `patch` and refreshes `updated_at`.
    ///
    /// Returns `Ok(false)` when `id` is absent.
    pub fn update_project(&mut self, id: ProjectId, patch: &ProjectPatch) -> StoreResult<bool> {
        self.mutate_project(id, "project_update", |project| {
            project.apply_patch(patch);
            Some(())
        })
        .map(|outcome| outcome.is_some())
    }

    /// Removes the project together with its materials and steps.
    ///
    /// Returns `Ok(false)` when `id` is absent.
    pub fn delete_project(&mut self, id: ProjectId) -> StoreResult<bool> {
        let Some(index) = self.projects.iter().position(|project| project.id == id) else {
            debug!("event=project_delete module=store status=noop reason=project_not_found");
            return Ok(false);
        };
        self.projects.remove(index);
        self.revision += 1;
        self.persist("project_delete")?;
        Ok(true)
    }

    /// Flips `purchased` on one material.
    pub fn toggle_material_purchased(
        &mut self,
        project_id: ProjectId,
        material_id: MaterialId,
    ) -> StoreResult<bool> {
        self.mutate_project(project_id, "material_toggle", |project| {
            let material = find_material(project, material_id)?;
            material.purchased = !material.purchased;
            Some(())
        })
        .map(|outcome| outcome.is_some())
    }

    /// Flips `completed` on one step.
    pub fn toggle_step_completed(
        &mut self,
        project_id: ProjectId,
        step_id: StepId,
    ) -> StoreResult<bool> {
        self.mutate_project(project_id, "step_toggle", |project| {
            let step = find_step(project, step_id)?;
            step.completed = !step.completed;
            Some(())
        })
        .map(|outcome| outcome.is_some())
    }

    /// Appends a material and returns its new id, or `None` when the
    /// project is absent.
    pub fn add_material(
        &mut self,
        project_id: ProjectId,
        request: NewMaterial,
    ) -> StoreResult<Option<MaterialId>> {
        self.mutate_project(project_id, "material_add", |project| {
            let material = Material::from_request(Uuid::new_v4(), request);
            let id = material.id;
            project.materials.push(material);
            Some(id)
        })
    }

    /// Appends a step and returns its new id, or `None` when the project is
    /// absent.
    pub fn add_step(
        &mut self,
        project_id: ProjectId,
        request: NewStep,
    ) -> StoreResult<Option<StepId>> {
        self.mutate_project(project_id, "step_add", |project| {
            let step = Step::from_request(Uuid::new_v4(), request);
            let id = step.id;
            project.steps.push(step);
            Some(id)
        })
    }

    pub fn update_material(
        &mut self,
        project_id: ProjectId,
        material_id: MaterialId,
        patch: &MaterialPatch,
    ) -> StoreResult<bool> {
        self.mutate_project(project_id, "material_update", |project| {
            find_material(project, material_id)?.apply_patch(patch);
            Some(())
        })
        .map(|outcome| outcome.is_some())
    }

    pub fn update_step(
        &mut self,
        project_id: ProjectId,
        step_id: StepId,
        patch: &StepPatch,
    ) -> StoreResult<bool> {
        self.mutate_project(project_id, "step_update", |project| {
            find_step(project, step_id)?.apply_patch(patch);
            Some(())
        })
        .map(|outcome| outcome.is_some())
    }

    pub fn delete_material(
        &mut self,
        project_id: ProjectId,
        material_id: MaterialId,
    ) -> StoreResult<bool> {
        self.mutate_project(project_id, "material_delete", |project| {
            let index = project
                .materials
                .iter()
                .position(|material| material.id == material_id)?;
            project.materials.remove(index);
            Some(())
        })
        .map(|outcome| outcome.is_some())
    }

    pub fn delete_step(&mut self, project_id: ProjectId, step_id: StepId) -> StoreResult<bool> {
        self.mutate_project(project_id, "step_delete", |project| {
            let index = project.steps.iter().position(|step| step.id == step_id)?;
            project.steps.remove(index);
            Some(())
        })
        .map(|outcome| outcome.is_some())
    }

    /// Writes the current collection again. Used to retry after a failed
    /// save.
    pub fn flush(&self) -> StoreResult<()> {
        self.persist("store_flush")
    }

    /// Looks up `id`, runs `apply`, and on success refreshes `updated_at`,
    /// bumps the revision and persists.
    ///
    /// `apply` returns `None` when its nested target is missing; nothing is
    /// touched or written in that case.
    fn mutate_project<T>(
        &mut self,
        id: ProjectId,
        event: &'static str,
        apply: impl FnOnce(&mut Project) -> Option<T>,
    ) -> StoreResult<Option<T>> {
        let now_ms = now_epoch_ms();
        let Some(project) = self.projects.iter_mut().find(|project| project.id == id) else {
            debug!("event={event} module=store status=noop reason=project_not_found");
            return Ok(None);
        };
        let Some(outcome) = apply(project) else {
            debug!("event={event} module=store status=noop reason=nested_not_found");
            return Ok(None);
        };
        project.touch(now_ms);

        self.revision += 1;
        self.persist(event)?;
        Ok(Some(outcome))
    }

    fn persist(&self, event: &'static str) -> StoreResult<()> {
        match self.repo.save_projects(&self.projects) {
            Ok(()) => {
                info!(
                    "event={event} module=store status=ok projects={} revision={}",
                    self.projects.len(),
                    self.revision
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event={event} module=store status=error error_code=persist_failed revision={} error={}",
                    self.revision, err
                );
                Err(err.into())
            }
        }
    }
}

fn find_material(project: &mut Project, id: MaterialId) -> Option<&mut Material> {
    project.materials.iter_mut().find(|material| material.id == id)
}

fn find_step(project: &mut Project, id: StepId) -> Option<&mut Step> {
    project.steps.iter_mut().find(|step| step.id == id)
}
