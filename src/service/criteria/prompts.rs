//! Prompts for objective criteria research

use crate::model::{PartyType, Project};

/// System prompt sent with every research request
pub const RESEARCH_SYSTEM_PROMPT: &str = "You are an expert in finding objective criteria for negotiations as described in 'Getting to Yes' by Fisher and Ury. For this negotiation, identify 3-5 specific, measurable standards from credible sources.";

/// Build the research query for a project
///
/// The requested layout (`### TITLE` then `- **Standard**:`, `- **Source**:` and
/// `- **Relevance**:` bullets) is what the block segmenter and field extractor expect.
pub fn build_search_query(project: &Project) -> String {
    format!(
        r#"Find objective criteria for a negotiation about "{name}" where:

- {party_a_name} interests: "{party_a}"
- {party_b_name} interests: "{party_b}"

Identify 3-5 specific, measurable standards that both parties could accept as fair and legitimate regardless of their willingness to agree. Focus on:
1. Industry benchmarks and professional standards
2. Scientific research and expert recommendations
3. Legal precedents or regulations
4. Market rates or common practices
5. Comparable cases or situations

Present each as a structured criterion in this format:

### [CRITERION TITLE]
- **Standard**: [Clear description of the standard with specific metrics when possible]
- **Source**: [Specific research, institution, or publication]
- **Relevance**: [How this standard applies to both parties' interests]

Ensure each criterion:
- Is legitimately objective and independent of either party's will
- Contains specific numbers or measurable benchmarks
- Comes from authoritative sources (research institutions, professional organizations, etc.)
- Addresses both parties' concerns

Avoid conversational language or thinking out loud. Present each criterion as a clear, authoritative standard."#,
        name = project.name,
        party_a_name = project.party_name(PartyType::A),
        party_a = project.party_a,
        party_b_name = project.party_name(PartyType::B),
        party_b = project.party_b,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_query_interpolates_project_fields() {
        let project = Project {
            id: 3,
            owner_id: 1,
            name: "Freelance contract".to_string(),
            party_a_name: Some("Designer".to_string()),
            party_b_name: None,
            party_a: "Fair hourly pay".to_string(),
            party_b: "Fixed budget".to_string(),
            party_a_score: None,
            party_b_score: None,
            options: vec![],
            objective_criteria: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let query = build_search_query(&project);

        assert!(query.starts_with("Find objective criteria for a negotiation about \"Freelance contract\""));
        assert!(query.contains("- Designer interests: \"Fair hourly pay\""));
        assert!(query.contains("- Party B interests: \"Fixed budget\""));
        assert!(query.contains("### [CRITERION TITLE]\n- **Standard**:"));
        assert_eq!(query, build_search_query(&project));
    }
}
