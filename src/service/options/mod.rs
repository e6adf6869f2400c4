//! Negotiation option generation service
//!
//! Options are generated once per project. Each option is expected to start with a
//! short subtitle followed by a colon; the subtitle is rendered in bold.

use std::sync::Arc;

use crate::db::DbError;
use crate::service::llm::{LlmError, NegotiationLlm};
use crate::service::projects::{AccessError, ProjectAccess};

pub mod prompts;

use prompts::{OPTIONS_SYSTEM_PROMPT, build_options_prompt};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OptionsError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Generation(#[from] LlmError),

    #[error(transparent)]
    Database(#[from] DbError),
}

/// Service generating options for mutual gain
pub struct NegotiationOptionsService {
    access: ProjectAccess,
    llm: Arc<dyn NegotiationLlm>,
}

impl NegotiationOptionsService {
    pub fn new(access: ProjectAccess, llm: Arc<dyn NegotiationLlm>) -> Self {
        Self { access, llm }
    }

    /// Return the stored options for a project, generating them if there are none
    pub async fn get_options(
        &self,
        token: Option<&str>,
        project_id: i64,
    ) -> Result<Vec<String>, OptionsError> {
        let project = self.access.load_owned(token, project_id).await?;

        if !project.options.is_empty() {
            tracing::debug!(
                project_id = project_id,
                count = project.options.len(),
                "Returning stored options"
            );
            return Ok(project.options);
        }

        let prompt = build_options_prompt(&project);
        let extracted = self
            .llm
            .generate_options(OPTIONS_SYSTEM_PROMPT, &prompt)
            .await?;

        let options: Vec<String> = extracted
            .options
            .iter()
            .map(|option| format_option(option))
            .collect();

        self.access
            .store()
            .save_options(project_id, &options)
            .await?;

        tracing::info!(
            project_id = project_id,
            count = options.len(),
            "Negotiation options generated"
        );

        Ok(options)
    }
}

/// Bold the subtitle before the first colon, if there is a non-empty one
pub fn format_option(option: &str) -> String {
    match option.find(':') {
        Some(index) if index > 0 => {
            format!("**{}**{}", &option[..index], &option[index..])
        }
        _ => option.to_string(),
    }
}
