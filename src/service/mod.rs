pub mod auth;
pub mod criteria;
pub mod enhancement;
pub mod llm;
pub mod options;
pub mod projects;
pub mod research;
pub mod scoring;
pub mod suggestions;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthVerifier, JwtAuthVerifier};
pub use criteria::ObjectiveCriteriaService;
pub use enhancement::InterestEnhancementService;
pub use llm::LlmClient;
pub use options::NegotiationOptionsService;
pub use projects::ProjectAccess;
pub use research::PerplexityClient;
pub use scoring::PartyScoreService;
pub use suggestions::ResponseSuggestionService;
