//! Error types for objective criteria research

use thiserror::Error;

use crate::service::projects::AccessError;
use crate::service::research::ResearchError;

/// Error type for objective criteria research
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CriteriaError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Research(#[from] ResearchError),
}
