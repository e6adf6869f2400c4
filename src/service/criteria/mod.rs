//! Objective criteria research service
//!
//! Runs the research pipeline for a project at most once and stores the result on
//! the project. Later requests return the stored result without any external call.
//!
//! Pipeline: prompt -> research API -> strip reasoning -> segment -> extract fields
//! -> match citations.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::model::{ExtractionResult, Project};
use crate::service::projects::ProjectAccess;
use crate::service::research::ResearchClient;

pub mod citations;
pub mod error;
pub mod extraction;
pub mod prompts;
pub mod sanitize;
pub mod sections;
pub mod segment;

pub use error::CriteriaError;

use extraction::parse_criteria;
use prompts::{RESEARCH_SYSTEM_PROMPT, build_search_query};
use sanitize::remove_thinking_content;

/// One async lock per project with a computation in flight
#[derive(Default)]
struct ProjectLocks {
    locks: Mutex<HashMap<i64, Arc<tokio::sync::Mutex<()>>>>,
}

impl ProjectLocks {
    fn acquire(&self, project_id: i64) -> ProjectLockHandle<'_> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        ProjectLockHandle {
            locks: self,
            project_id,
            lock: Arc::clone(locks.entry(project_id).or_default()),
        }
    }
}

/// Share of a project lock; the map entry goes away with the last handle,
/// including when the owning request is cancelled mid-flight
struct ProjectLockHandle<'a> {
    locks: &'a ProjectLocks,
    project_id: i64,
    lock: Arc<tokio::sync::Mutex<()>>,
}

impl ProjectLockHandle<'_> {
    async fn lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}

impl Drop for ProjectLockHandle<'_> {
    fn drop(&mut self) {
        let mut locks = self
            .locks
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // the map's reference plus this handle's
        if locks
            .get(&self.project_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 2)
        {
            locks.remove(&self.project_id);
        }
    }
}

/// Service producing objective criteria for negotiation projects
pub struct ObjectiveCriteriaService {
    access: ProjectAccess,
    research_client: Arc<dyn ResearchClient>,
    locks: ProjectLocks,
}

impl ObjectiveCriteriaService {
    pub fn new(access: ProjectAccess, research_client: Arc<dyn ResearchClient>) -> Self {
        Self {
            access,
            research_client,
            locks: ProjectLocks::default(),
        }
    }

    /// Return the stored criteria for a project, computing them on first request
    pub async fn get_objective_criteria(
        &self,
        token: Option<&str>,
        project_id: i64,
    ) -> Result<ExtractionResult, CriteriaError> {
        let project = self.access.load_owned(token, project_id).await?;

        if let Some(stored) = project.objective_criteria {
            tracing::debug!(project_id = project_id, "Returning stored objective criteria");
            return Ok(stored);
        }

        let handle = self.locks.acquire(project_id);
        let _guard = handle.lock().await;

        // another request may have finished while we waited
        let project = self
            .access
            .load_for_owner(project.owner_id, project_id)
            .await?;
        if let Some(stored) = project.objective_criteria.clone() {
            tracing::debug!(
                project_id = project_id,
                "Objective criteria computed by a concurrent request"
            );
            return Ok(stored);
        }

        self.compute_and_store(&project).await
    }

    async fn compute_and_store(&self, project: &Project) -> Result<ExtractionResult, CriteriaError> {
        let result = self.compute(project).await?;

        match self
            .access
            .store()
            .save_objective_criteria(project.id, &result)
            .await
        {
            Ok(true) => Ok(result),
            Ok(false) => {
                tracing::info!(
                    project_id = project.id,
                    "Objective criteria already stored, returning stored result"
                );
                let stored = self
                    .access
                    .store()
                    .find_by_id(project.id)
                    .await
                    .ok()
                    .flatten()
                    .and_then(|p| p.objective_criteria);
                Ok(stored.unwrap_or(result))
            }
            Err(e) => {
                tracing::error!(
                    project_id = project.id,
                    error = %e,
                    "Failed to store objective criteria"
                );
                Ok(result)
            }
        }
    }

    /// Run the research pipeline for a project without touching the store
    async fn compute(&self, project: &Project) -> Result<ExtractionResult, CriteriaError> {
        let search_query = build_search_query(project);

        let output = self
            .research_client
            .research(RESEARCH_SYSTEM_PROMPT, &search_query)
            .await?;

        let content = remove_thinking_content(&output.content);
        let criteria = parse_criteria(&content, &output.citations);

        tracing::info!(
            project_id = project.id,
            criteria_count = criteria.len(),
            citation_count = output.citations.len(),
            "Objective criteria extracted"
        );

        Ok(ExtractionResult {
            criteria,
            search_query,
            citations: output.citations,
            raw_content: content,
        })
    }
}
