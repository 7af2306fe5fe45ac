//! Analysis prompt builder. One template per mode; pure functions.
//!
//! Items with no substantive text short-circuit to `PromptPlan::Pending` so the LLM is
//! never called for them.

use crate::domain::AnalysisMode;

/// Shown instead of an analysis when the source has not published text yet.
pub const PENDING_MESSAGE: &str =
    "I can't summarize this yet because the official text hasn't been provided by the source.";

/// Lowercase phrases the sources use in place of real text.
const PLACEHOLDER_PHRASES: &[&str] = &[
    "not yet available",
    "not yet published",
    "no abstract available",
    "still being drafted",
];

/// Marker the constitution template asks the model to lead with.
pub const RISK_SCORE_MARKER: &str = "Risk Score:";

/// What the pipeline should do for a (mode, title, text) triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPlan {
    Ready(String),
    Pending,
}

/// True when `text` carries no substantive content.
pub fn is_placeholder(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return true;
    }
    let lower = trimmed.to_lowercase();
    PLACEHOLDER_PHRASES.iter().any(|p| lower.contains(p))
}

/// Build the prompt for `mode`, or `Pending` when `text` is empty or a placeholder.
pub fn build(mode: AnalysisMode, title: &str, text: &str) -> PromptPlan {
    if is_placeholder(text) {
        return PromptPlan::Pending;
    }
    PromptPlan::Ready(render(mode, title.trim(), text.trim()))
}

/// Like [`build`] but takes a mode tag. Unknown tags use the impact template.
pub fn build_for_tag(tag: &str, title: &str, text: &str) -> PromptPlan {
    build(AnalysisMode::resolve(tag), title, text)
}

fn render(mode: AnalysisMode, title: &str, text: &str) -> String {
    match mode {
        AnalysisMode::Impact => format!(
            "Explain this law or order in 3 simple, non-partisan bullet points for a high school student. \
             Highlight why it matters. Title: {}. Text: {}",
            title, text
        ),
        AnalysisMode::Sentiment => format!(
            "Describe, in neutral and non-partisan terms, which groups are likely to support and which are \
             likely to oppose this measure, and summarize the overall tone of its language in 2-3 sentences. \
             Title: {}. Text: {}",
            title, text
        ),
        AnalysisMode::Constitution => format!(
            "Assess the constitutional risk of this law, order or case. Start your answer with a single line \
             in the exact form \"{} N\" where N is an integer from 1 (no concerns) to 10 (very likely \
             unconstitutional). Then explain the main constitutional questions in plain language. \
             Title: {}. Text: {}",
            RISK_SCORE_MARKER, title, text
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_pending() {
        assert_eq!(build(AnalysisMode::Impact, "Title X", ""), PromptPlan::Pending);
        assert_eq!(
            build(AnalysisMode::Constitution, "Title X", "   \n"),
            PromptPlan::Pending
        );
    }

    #[test]
    fn test_placeholder_text_is_pending() {
        let placeholder = "Official summary text not yet available for this bill.";
        assert_eq!(
            build(AnalysisMode::Sentiment, "Title X", placeholder),
            PromptPlan::Pending
        );
        assert!(is_placeholder("No abstract available."));
        assert!(is_placeholder(
            "Official summary is still being drafted by the Library of Congress."
        ));
        assert!(!is_placeholder("This bill amends the Clean Air Act."));
    }

    #[test]
    fn test_impact_template() {
        let plan = build(AnalysisMode::Impact, "Title X", "Body text");
        assert_eq!(
            plan,
            PromptPlan::Ready(
                "Explain this law or order in 3 simple, non-partisan bullet points for a high school student. \
                 Highlight why it matters. Title: Title X. Text: Body text"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_constitution_template_asks_for_marker() {
        let PromptPlan::Ready(prompt) = build(AnalysisMode::Constitution, "T", "B") else {
            panic!("expected a prompt");
        };
        assert!(prompt.contains("\"Risk Score: N\""));
        assert!(prompt.ends_with("Title: T. Text: B"));
    }

    #[test]
    fn test_templates_differ_per_mode() {
        let prompts: Vec<PromptPlan> = AnalysisMode::ALL
            .iter()
            .map(|m| build(*m, "T", "B"))
            .collect();
        assert_ne!(prompts[0], prompts[1]);
        assert_ne!(prompts[1], prompts[2]);
        assert_ne!(prompts[0], prompts[2]);
    }

    #[test]
    fn test_unknown_tag_uses_impact_template() {
        assert_eq!(
            build_for_tag("astrology", "T", "B"),
            build(AnalysisMode::Impact, "T", "B")
        );
        assert_eq!(
            build_for_tag("constitution", "T", "B"),
            build(AnalysisMode::Constitution, "T", "B")
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(
            build(AnalysisMode::Sentiment, "T", "B"),
            build(AnalysisMode::Sentiment, "T", "B")
        );
    }
}
