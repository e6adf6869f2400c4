//! In-memory fakes of the service seams for unit tests

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::db::{DbError, ProjectStore};
use crate::model::generation::{
    ExtractedOptions, ExtractedQuestion, ExtractedScore, ExtractedStatement, ExtractedSuggestion,
    ExtractedSuggestions,
};
use crate::model::research::ResearchOutput;
use crate::model::{ExtractionResult, PartyScore, PartyType, Project};
use crate::service::auth::{AuthError, AuthVerifier};
use crate::service::llm::{LlmError, NegotiationLlm};
use crate::service::research::{ResearchClient, ResearchError};

pub const OWNER_ID: i64 = 7;
pub const OWNER_TOKEN: &str = "owner-token";
pub const OTHER_TOKEN: &str = "other-token";

pub fn project(id: i64) -> Project {
    Project {
        id,
        owner_id: OWNER_ID,
        name: "Freelance design contract".to_string(),
        party_a_name: Some("Designer".to_string()),
        party_b_name: Some("Agency".to_string()),
        party_a: "Fair hourly rate reflecting ten years of experience".to_string(),
        party_b: "Predictable monthly budget for design work".to_string(),
        party_a_score: None,
        party_b_score: None,
        options: vec![],
        objective_criteria: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Maps fixed tokens to users
pub struct FakeAuth;

#[async_trait]
impl AuthVerifier for FakeAuth {
    async fn verify(&self, token: Option<&str>) -> Result<i64, AuthError> {
        match token {
            None => Err(AuthError::MissingToken),
            Some(OWNER_TOKEN) => Ok(OWNER_ID),
            Some(OTHER_TOKEN) => Ok(OWNER_ID + 1),
            Some(_) => Err(AuthError::InvalidToken),
        }
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    projects: Mutex<HashMap<i64, Project>>,
    pub fail_writes: bool,
    pub criteria_writes: AtomicUsize,
}

impl InMemoryStore {
    pub fn with(projects: impl IntoIterator<Item = Project>) -> Self {
        Self {
            projects: Mutex::new(projects.into_iter().map(|p| (p.id, p)).collect()),
            ..Default::default()
        }
    }

    pub fn failing(projects: impl IntoIterator<Item = Project>) -> Self {
        Self {
            fail_writes: true,
            ..Self::with(projects)
        }
    }

    pub fn get(&self, id: i64) -> Option<Project> {
        self.projects.lock().unwrap().get(&id).cloned()
    }

    /// Store a result as if another process had written it
    pub fn put_criteria(&self, id: i64, result: ExtractionResult) {
        if let Some(project) = self.projects.lock().unwrap().get_mut(&id) {
            project.objective_criteria = Some(result);
        }
    }

    fn write_error() -> DbError {
        DbError::Serialization("write rejected".to_string())
    }
}

#[async_trait]
impl ProjectStore for InMemoryStore {
    async fn find_by_id(&self, project_id: i64) -> Result<Option<Project>, DbError> {
        Ok(self.get(project_id))
    }

    async fn save_objective_criteria(
        &self,
        project_id: i64,
        result: &ExtractionResult,
    ) -> Result<bool, DbError> {
        if self.fail_writes {
            return Err(Self::write_error());
        }
        let mut projects = self.projects.lock().unwrap();
        let project = projects
            .get_mut(&project_id)
            .ok_or_else(|| DbError::NotFound(project_id.to_string()))?;
        if project.objective_criteria.is_some() {
            return Ok(false);
        }
        project.objective_criteria = Some(result.clone());
        self.criteria_writes.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn save_party_score(
        &self,
        project_id: i64,
        party: PartyType,
        score: &PartyScore,
    ) -> Result<(), DbError> {
        if self.fail_writes {
            return Err(Self::write_error());
        }
        let mut projects = self.projects.lock().unwrap();
        let project = projects
            .get_mut(&project_id)
            .ok_or_else(|| DbError::NotFound(project_id.to_string()))?;
        match party {
            PartyType::A => project.party_a_score = Some(score.clone()),
            PartyType::B => project.party_b_score = Some(score.clone()),
        }
        Ok(())
    }

    async fn save_enhanced_interests(
        &self,
        project_id: i64,
        party: PartyType,
        interests: &str,
        score: &PartyScore,
    ) -> Result<(), DbError> {
        if self.fail_writes {
            return Err(Self::write_error());
        }
        let mut projects = self.projects.lock().unwrap();
        let project = projects
            .get_mut(&project_id)
            .ok_or_else(|| DbError::NotFound(project_id.to_string()))?;
        match party {
            PartyType::A => {
                project.party_a = interests.to_string();
                project.party_a_score = Some(score.clone());
            }
            PartyType::B => {
                project.party_b = interests.to_string();
                project.party_b_score = Some(score.clone());
            }
        }
        Ok(())
    }

    async fn save_options(&self, project_id: i64, options: &[String]) -> Result<(), DbError> {
        if self.fail_writes {
            return Err(Self::write_error());
        }
        let mut projects = self.projects.lock().unwrap();
        let project = projects
            .get_mut(&project_id)
            .ok_or_else(|| DbError::NotFound(project_id.to_string()))?;
        project.options = options.to_vec();
        Ok(())
    }
}

/// Research client returning a canned response body
pub struct FakeResearch {
    body: String,
    delay: Duration,
    pub calls: AtomicUsize,
}

impl FakeResearch {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResearchClient for FakeResearch {
    async fn research(
        &self,
        _system_prompt: &str,
        _query: &str,
    ) -> Result<ResearchOutput, ResearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        crate::service::research::parse_research_response(&self.body)
    }
}

/// Build a well-formed research response body around `content`
pub fn research_body(content: &str, citations: &[&str]) -> String {
    serde_json::json!({
        "id": "resp-1",
        "model": "sonar-reasoning-pro",
        "object": "chat.completion",
        "created": 1_740_000_000,
        "citations": citations,
        "choices": [{
            "index": 0,
            "finish_reason": "stop",
            "message": { "role": "assistant", "content": content }
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30 }
    })
    .to_string()
}

pub fn suggestion(title: &str) -> ExtractedSuggestion {
    ExtractedSuggestion {
        title: title.to_string(),
        content: format!("{title}: let us look at what each of us needs"),
        reasoning: "Keeps the focus on interests".to_string(),
    }
}

/// LLM returning fixed structured outputs and recording every prompt it sees
pub struct FakeLlm {
    pub score: i64,
    pub options: Vec<String>,
    pub suggestions: Vec<ExtractedSuggestion>,
    pub statement: String,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    pub fn new(score: i64, options: &[&str]) -> Self {
        Self {
            score,
            options: options.iter().map(|o| o.to_string()).collect(),
            suggestions: vec![
                suggestion("Collaborative Problem-Solving"),
                suggestion("Clarifying Interests"),
                suggestion("Exploring Alternatives"),
            ],
            statement: "- Recognition of ten years of experience\n- Income stable enough to plan around"
                .to_string(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(vec![]),
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<ExtractedSuggestion>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }

    fn record(&self, prompt: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
    }
}

#[async_trait]
impl NegotiationLlm for FakeLlm {
    async fn score_interests(
        &self,
        _preamble: &str,
        prompt: &str,
    ) -> Result<ExtractedScore, LlmError> {
        self.record(prompt);
        Ok(ExtractedScore {
            score: self.score,
            reasoning: "Interests are stated clearly".to_string(),
        })
    }

    async fn generate_options(
        &self,
        _preamble: &str,
        prompt: &str,
    ) -> Result<ExtractedOptions, LlmError> {
        self.record(prompt);
        Ok(ExtractedOptions {
            options: self.options.clone(),
        })
    }

    async fn suggest_responses(
        &self,
        _preamble: &str,
        prompt: &str,
    ) -> Result<ExtractedSuggestions, LlmError> {
        self.record(prompt);
        Ok(ExtractedSuggestions {
            suggestions: self.suggestions.clone(),
        })
    }

    async fn enhancement_question(
        &self,
        _preamble: &str,
        prompt: &str,
    ) -> Result<ExtractedQuestion, LlmError> {
        self.record(prompt);
        Ok(ExtractedQuestion {
            question: "What would a fair rate let you do that a lower one would not?".to_string(),
            explanation: "Uncovers the need behind the number".to_string(),
        })
    }

    async fn enhance_statement(
        &self,
        _preamble: &str,
        prompt: &str,
    ) -> Result<ExtractedStatement, LlmError> {
        self.record(prompt);
        Ok(ExtractedStatement {
            enhanced_statement: self.statement.clone(),
        })
    }
}
