pub mod config;
pub mod criteria;
pub mod generation;
pub mod project;
pub mod research;

pub use config::{Config, ResearchConfig};
pub use criteria::{Criterion, ExtractionResult};
pub use project::{EnhancedInterests, PartyScore, PartyType, Project};
