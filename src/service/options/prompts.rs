//! Prompts for negotiation option generation

use crate::model::{PartyType, Project};

/// System prompt for option generation
pub const OPTIONS_SYSTEM_PROMPT: &str = "You are a negotiation advisor trained in the principled negotiation method of 'Getting to Yes' by Fisher and Ury. You invent options for mutual gain.";

/// Build the option generation prompt for a project
pub fn build_options_prompt(project: &Project) -> String {
    format!(
        r#"Given these negotiation interests:

{party_a_name}: {party_a}
{party_b_name}: {party_b}

Generate creative options that might satisfy both parties by:

1. Looking for shared and compatible interests
2. Inventing options for mutual gain (expand the pie before dividing it)
3. Identifying package deals that address different priorities
4. Using objective criteria to resolve competing interests

For each option:
- Explain which specific interests from each party it addresses
- Identify any objective standards that support its fairness
- Note how it might "expand the pie" rather than just divide fixed resources
- Consider low-cost/high-value trades based on different priorities

Present only the 3-5 strongest options that solve the underlying problem rather than splitting differences. Include at least one option that neither party might have initially considered. Rank options from strongest to most innovative.

IMPORTANT: Format each option with a clear subtitle/topic before a colon. For example: "Revenue Sharing: ..." or "Timeline Extension: ...". These subtitles should be concise and descriptive."#,
        party_a_name = project.party_name(PartyType::A),
        party_a = project.party_a,
        party_b_name = project.party_name(PartyType::B),
        party_b = project.party_b,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::project;

    #[test]
    fn test_prompt_names_both_parties() {
        let prompt = build_options_prompt(&project(1));
        assert!(prompt.contains("Designer: Fair hourly rate"));
        assert!(prompt.contains("Agency: Predictable monthly budget"));
    }
}
