//! Console output formatter for council results

use colored::Colorize;
use council_domain::CouncilResult;

/// Formats council results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete council result
    pub fn format(question: &str, result: &CouncilResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Council Results"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Question:".cyan().bold(), question));

        output.push_str(&Self::section_header("Stage 1: Responses"));
        for entry in &result.stage1 {
            if entry.is_success() {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── {} ──", entry.model).yellow().bold(),
                    entry.content
                ));
            } else {
                output.push_str(&format!(
                    "\n{}\nError: {}\n",
                    format!("── {} ──", entry.model).red().bold(),
                    entry.error.as_deref().unwrap_or("Unknown")
                ));
            }
        }

        output.push_str(&Self::section_header("Stage 2: Peer Rankings"));
        for entry in &result.stage2 {
            if entry.is_success() {
                let order = entry
                    .ordered_labels
                    .iter()
                    .map(|l| l.to_string())
                    .collect::<Vec<_>>()
                    .join(" > ");
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── {} ──", entry.judge).yellow().bold(),
                    order
                ));
            } else {
                output.push_str(&format!(
                    "\n{}\nError: {}\n",
                    format!("── {} ──", entry.judge).red().bold(),
                    entry.error.as_deref().unwrap_or("Unknown")
                ));
            }
        }

        // Consensus with identities revealed
        output.push_str(&format!("\n{}\n", "Consensus:".green().bold()));
        for row in &result.metadata.aggregate_rankings {
            output.push_str(&format!(
                "  {}. {} (score {})\n",
                row.rank, row.model, row.score
            ));
        }

        output.push_str(&Self::section_header("Stage 3: Final Synthesis"));
        if result.stage3.is_success() {
            output.push_str(&format!(
                "\n{}\n\n{}\n",
                format!("Synthesizer: {}", result.stage3.model)
                    .yellow()
                    .bold(),
                result.stage3.content
            ));
        } else {
            output.push_str(&format!(
                "\n{}\nError: {}\n",
                format!("Synthesizer: {}", result.stage3.model).red().bold(),
                result.stage3.error.as_deref().unwrap_or("Unknown")
            ));
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &CouncilResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the final answer only (concise output)
    pub fn format_final(question: &str, result: &CouncilResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== LLM Council Conclusion ===".cyan().bold()
        ));

        output.push_str(&format!("{} {}\n\n", "Q:".bold(), question));

        output.push_str(&format!(
            "{} {}\n\n",
            "Council:".dimmed(),
            result
                .stage1
                .iter()
                .map(|e| e.model.short_name().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ));

        if result.stage3.is_success() {
            output.push_str(&result.stage3.content);
        } else {
            output.push_str(&format!(
                "Synthesis failed: {}",
                result.stage3.error.as_deref().unwrap_or("Unknown")
            ));
        }
        output.push('\n');

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
