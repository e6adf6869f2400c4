use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::criteria::ExtractionResult;

/// One side of the negotiation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PartyType {
    A,
    B,
}

impl FromStr for PartyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(PartyType::A),
            "B" => Ok(PartyType::B),
            other => Err(format!("Unknown party '{}', expected 'a' or 'b'", other)),
        }
    }
}

impl fmt::Display for PartyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartyType::A => write!(f, "A"),
            PartyType::B => write!(f, "B"),
        }
    }
}

/// Score of one party's interest statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PartyScore {
    pub score: i32,
    pub reasoning: String,
}

/// A rewritten interest statement and the score it was given
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EnhancedInterests {
    pub enhanced_statement: String,
    pub score: i32,
    pub reasoning: String,
}

// A negotiation project as read from the project store
// - party_a / party_b: the interest statements of each side
// - objective_criteria: present once the criteria pipeline has run for this project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub party_a_name: Option<String>,
    pub party_b_name: Option<String>,
    pub party_a: String,
    pub party_b: String,
    pub party_a_score: Option<PartyScore>,
    pub party_b_score: Option<PartyScore>,
    pub options: Vec<String>,
    pub objective_criteria: Option<ExtractionResult>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Display name for a party, falling back to "Party A" / "Party B"
    pub fn party_name(&self, party: PartyType) -> String {
        let name = match party {
            PartyType::A => self.party_a_name.as_deref(),
            PartyType::B => self.party_b_name.as_deref(),
        };

        match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => format!("Party {}", party),
        }
    }

    pub fn interests(&self, party: PartyType) -> &str {
        match party {
            PartyType::A => &self.party_a,
            PartyType::B => &self.party_b,
        }
    }

    pub fn score(&self, party: PartyType) -> Option<&PartyScore> {
        match party {
            PartyType::A => self.party_a_score.as_ref(),
            PartyType::B => self.party_b_score.as_ref(),
        }
    }
}
