//! Prompts for interest statement scoring

/// System prompt for interest scoring
pub const SCORING_SYSTEM_PROMPT: &str = "You evaluate negotiation interest statements using the principled negotiation method of 'Getting to Yes' by Fisher and Ury. Return an integer score between 0 and 100 and a concise explanation of the score.";

/// Build the scoring prompt for one party's interest statement
pub fn build_scoring_prompt(interests: &str) -> String {
    format!(
        r#"Evaluate these negotiation interests (0-100) based on:

1. Separation of people from problem (focuses on issues, not personalities)
2. Expression of underlying interests, not positions (explains why, not just what)
3. Potential for inventing options for mutual gain
4. Reference to objective criteria or fair standards

Interests to evaluate:
{interests}

Score: [X/100]

Brief explanation: [Provide a concise analysis in 35 words or less that focuses on how well these interests enable principled negotiation and creative problem-solving]

To strengthen these interests:
- What underlying needs remain unexpressed?
- How could you focus on interests rather than positions?
- What objective standards would make any solution feel fair?
- What might the other party value that costs you little?"#
    )
}
