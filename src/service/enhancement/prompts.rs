//! Prompts for interest statement coaching

/// System prompt for the coaching question
pub const QUESTION_SYSTEM_PROMPT: &str = "You are an expert negotiation coach trained in the principled negotiation method of 'Getting to Yes' by Fisher and Ury. You ask one short question that helps someone improve their interest statement.";

/// System prompt for the statement rewrite
pub const ENHANCE_SYSTEM_PROMPT: &str = "You are an expert negotiation coach trained in the principled negotiation method of 'Getting to Yes' by Fisher and Ury. You rewrite interest statements so they express interests rather than positions.";

/// Build the prompt asking for one coaching question
///
/// `previous_feedback` is the reasoning of an earlier score, if there is one.
pub fn build_question_prompt(interests: &str, previous_feedback: Option<&str>) -> String {
    let feedback = previous_feedback
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(|f| format!("Previous feedback: {f}\n\n"))
        .unwrap_or_default();

    format!(
        r#"You are an expert negotiation coach helping someone improve their interest statement.

Current interest statement:
{interests}

{feedback}Based on the core principle that focusing on interests rather than positions leads to better outcomes, ask ONE specific question that helps the user uncover their deeper underlying interests.

Your question should help them:
- Move from what they want (positions) to why they want it (interests)
- Identify needs, concerns, hopes, and fears driving their requests
- Consider what problem they're truly trying to solve
- Explore multiple ways their core interests could be satisfied

Frame your question to help them discover what's truly important to them beyond their stated position. The question should be short and easy to understand. Include a brief explanation of how answering this will strengthen their negotiation stance."#
    )
}

/// Build the prompt rewriting a statement with the answer to a coaching question
pub fn build_enhance_prompt(original_statement: &str, question: &str, answer: &str) -> String {
    format!(
        r#"You are an expert negotiation coach helping improve an interest statement.

Original statement:
{original_statement}

Question asked:
{question}

Their answer:
{answer}

Create a concise and effective enhanced interest statement that:

1. Separates people from the problem (focuses on issues, not personalities)
2. Articulates underlying interests, not positions (explains why, not just what)
3. Creates space for inventing options for mutual gain
4. References objective criteria or fair standards where possible

The enhanced statement should:
- Express interests in terms of needs, concerns, hopes and fears
- Avoid fixed positions that limit creative solutions
- Identify potential areas of compatibility with the other side
- Use neutral, problem-solving language
- Be structured to facilitate joint problem-solving

Provide the enhanced statement in a clear, concise format that would serve as a strong foundation for principled negotiation. Organize the statement into a list of less than 4 bullet points for easy reading. Be as concise as possible."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_prompt_includes_feedback_when_present() {
        let prompt = build_question_prompt("A higher rate", Some("States a position only"));
        assert!(prompt.contains(
            "Current interest statement:\nA higher rate\n\nPrevious feedback: States a position only\n\nBased on"
        ));
    }

    #[test]
    fn test_question_prompt_without_feedback() {
        for feedback in [None, Some("   ")] {
            let prompt = build_question_prompt("A higher rate", feedback);
            assert!(!prompt.contains("Previous feedback"));
            assert!(prompt.contains("Current interest statement:\nA higher rate\n\nBased on"));
        }
    }

    #[test]
    fn test_enhance_prompt_embeds_exchange() {
        let prompt = build_enhance_prompt("A higher rate", "Why that rate?", "Rent went up");
        assert!(prompt.contains("Original statement:\nA higher rate\n"));
        assert!(prompt.contains("Question asked:\nWhy that rate?\n"));
        assert!(prompt.contains("Their answer:\nRent went up\n"));
    }
}
