//! Prompts for response suggestions

use crate::model::{PartyType, Project};

/// System prompt for response suggestions
pub const SUGGESTIONS_SYSTEM_PROMPT: &str = "You are an expert negotiation coach trained in the principled negotiation method of 'Getting to Yes' by Fisher and Ury. You help craft effective responses during a negotiation.";

/// Build the prompt asking for three replies to the other party's latest message
///
/// The caller negotiates as party A.
pub fn build_suggestions_prompt(project: &Project, other_party_response: &str) -> String {
    format!(
        r#"You are an expert negotiation coach helping craft effective responses during a negotiation.

Your interests ({party_a_name} interests):
{party_a}

The other party's interests ({party_b_name} interests):
{party_b}

The other party's latest response:
{other_party_response}

Generate three different response suggestions that follow the principled negotiation method:
1. Focus on interests, not positions
2. Look for mutual gains where possible
3. Use objective criteria when appropriate
4. Separate the people from the problem

For each suggestion, provide:
1. A short title describing the approach (e.g., "Collaborative Problem-Solving", "Exploring Alternatives", "Clarifying Interests")
2. The suggested response text (written in first person, as if from the user)
3. A brief explanation of why this response is effective

Make each suggestion distinct in its approach. One should be more collaborative, one more assertive (but still principled), and one more creative/innovative. Keep the responses concise, clear, and focused on moving the negotiation forward constructively."#,
        party_a_name = project.party_name(PartyType::A),
        party_a = project.party_a,
        party_b_name = project.party_name(PartyType::B),
        party_b = project.party_b,
    )
}
