//! Authenticated project lookup shared by the project-scoped services

use std::sync::Arc;

use crate::db::{DbError, ProjectStore};
use crate::model::Project;
use crate::service::auth::{AuthError, AuthVerifier};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AccessError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Project not found: {0}")]
    NotFound(i64),

    #[error("Project {0} does not belong to the caller")]
    NotOwner(i64),

    #[error(transparent)]
    Database(#[from] DbError),
}

/// Resolves a bearer token and project ID to a project the caller owns
#[derive(Clone)]
pub struct ProjectAccess {
    auth: Arc<dyn AuthVerifier>,
    store: Arc<dyn ProjectStore>,
}

impl ProjectAccess {
    pub fn new(auth: Arc<dyn AuthVerifier>, store: Arc<dyn ProjectStore>) -> Self {
        Self { auth, store }
    }

    pub fn store(&self) -> &dyn ProjectStore {
        self.store.as_ref()
    }

    /// Verify the token and load the project, checking ownership
    pub async fn load_owned(
        &self,
        token: Option<&str>,
        project_id: i64,
    ) -> Result<Project, AccessError> {
        let owner_id = self.auth.verify(token).await?;
        self.load_for_owner(owner_id, project_id).await
    }

    /// Load a project for an already verified owner
    pub async fn load_for_owner(
        &self,
        owner_id: i64,
        project_id: i64,
    ) -> Result<Project, AccessError> {
        let project = self
            .store
            .find_by_id(project_id)
            .await?
            .ok_or(AccessError::NotFound(project_id))?;

        if project.owner_id != owner_id {
            tracing::warn!(
                project_id = project_id,
                owner_id = owner_id,
                "Project access denied"
            );
            return Err(AccessError::NotOwner(project_id));
        }

        Ok(project)
    }
}
