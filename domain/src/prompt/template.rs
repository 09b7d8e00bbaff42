//! Prompt templates for the three council stages and title generation

use crate::council::entries::{DeliberationMetadata, StageTwoEntry};
use crate::council::labels::Label;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for Stage 1 answers
    pub fn answer_system() -> &'static str {
        r#"You are one voice on a council of independent experts answering the same question.
Give your own best answer. Be accurate, well-structured, and concise.
Do not speculate about what the other council members might say."#
    }

    /// User prompt for Stage 1
    pub fn answer_prompt(question: &str) -> String {
        question.to_string()
    }

    /// System prompt for the Stage 2 ranking task
    pub fn ranking_system() -> &'static str {
        r#"You are evaluating anonymous answers to a question. You do not know which
model wrote which answer, and you must not guess. Judge only the text:
accuracy, completeness, clarity, and usefulness."#
    }

    /// User prompt for Stage 2: the question plus anonymized answer blocks
    pub fn ranking_prompt(question: &str, responses: &[(Label, &str)]) -> String {
        let mut prompt = format!(
            r#"Original question: {}

Below are answers from several anonymous responders.
"#,
            question
        );

        for (label, content) in responses {
            prompt.push_str(&format!("\n--- {} ---\n{}\n", label, content));
        }

        prompt.push_str(
            r#"
Rank ALL of the responses from best to worst. End your reply with the full
ranking as a numbered list, one label per line, for example:

1. Response B
2. Response A

Briefly justify your ordering first if you wish, but the list must come last."#,
        );

        prompt
    }

    /// System prompt for Stage 3 synthesis
    pub fn synthesis_system() -> &'static str {
        r#"You are the synthesizer of a council of models. Several answers to the same
question were written independently and then ranked by the council. Produce
the single best final answer: start from the top-ranked material, repair its
weaknesses with points from the others, and resolve disagreements explicitly.
Answer the user directly; do not describe the process."#
    }

    /// User prompt for Stage 3: answers, per-judge rankings, consensus order
    pub fn synthesis_prompt(
        question: &str,
        responses: &[(Label, &str)],
        rankings: &[StageTwoEntry],
        metadata: &DeliberationMetadata,
    ) -> String {
        let mut prompt = format!(
            r#"Original question: {}

Council answers:
"#,
            question
        );

        for (label, content) in responses {
            prompt.push_str(&format!("\n--- {} ---\n{}\n", label, content));
        }

        let usable: Vec<_> = rankings.iter().filter(|r| r.is_success()).collect();
        if !usable.is_empty() {
            prompt.push_str("\nIndividual rankings (best first):\n");
            for entry in usable {
                let order = entry
                    .ordered_labels
                    .iter()
                    .map(|l| l.to_string())
                    .collect::<Vec<_>>()
                    .join(" > ");
                prompt.push_str(&format!("- one judge ranked: {}\n", order));
            }
        }

        if !metadata.aggregate_rankings.is_empty() {
            prompt.push_str("\nConsensus ranking (aggregated over all judges, best first):\n");
            for entry in &metadata.aggregate_rankings {
                if let Some(label) = metadata.label_to_model.label_for(&entry.model) {
                    prompt.push_str(&format!(
                        "{}. {} (score {})\n",
                        entry.rank, label, entry.score
                    ));
                }
            }
        }

        prompt.push_str(
            r#"
Write the final answer to the original question, giving most weight to the
consensus-preferred material."#,
        );

        prompt
    }

    /// System prompt for conversation title generation
    pub fn title_system() -> &'static str {
        r#"You summarize a chat message into a short conversation title.
Reply with the title only: at most six words, no quotes, no trailing punctuation."#
    }

    /// User prompt for conversation title generation
    pub fn title_prompt(first_message: &str) -> String {
        format!(
            "Write a title for a conversation that starts with this message:\n\n{}",
            first_message
        )
    }
}
