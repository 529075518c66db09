//! Instruction text sent to the generative backend.
//!
//! The backend runs with search grounding, which rules out a machine-enforced response schema,
//! so the whole output contract (shape, enum sets, count, fencing) is spelled out here.

use crate::strategy::{KeywordDifficulty, SearchIntent, EXPECTED_SUB_PILLARS};

const TOPIC_PLACEHOLDER: &str = "{topic}";

const STRATEGY_INSTRUCTION: &str = r#"You are an expert SEO strategist and content architect.
Use web search to research the current landscape for this main pillar topic: "{topic}".

Design a complete pillar / sub-pillar content system that follows current SEO, semantic
search and AI answer (SGE) practice.

Requirements:
1. Define exactly 1 Core Pillar Page: the main authoritative topic.
2. Find the top {count} sub-pillar topics directly related to the pillar.
   - Prefer high search volume, intent-driven topics based on current trends.
   - Mix informational, commercial and transactional intents.

For every sub-pillar provide:
- primaryKeyword: the primary keyword.
- semanticKeywords: 3-5 supporting semantic keywords (LSI terms / entities).
- clusterKeywords: 2-3 related keywords that could each become a supporting article.
- keywordDifficulty: difficulty estimate from competition, exactly one of: {difficulties}.
- searchIntent: exactly one of: {intents}.
- contentAngle: an angle tuned for AI-generated answers (SGE): unique data points, expert
  opinions or structured formats that make the page likely to be cited.
- internalLinking: a concrete recommendation (anchor text or strategy) for linking back to the pillar.

Output format:
Return a single JSON object wrapped in one markdown code block fenced as ```json ... ```.
The object must have exactly this structure:
{
  "pillar": {
    "topic": "The main topic",
    "pageTitle": "Optimized H1 title",
    "searchIntent": "Dominant intent",
    "targetAudience": "Who this is for"
  },
  "subPillars": [
    {
      "primaryKeyword": "...",
      "semanticKeywords": ["...", "..."],
      "clusterKeywords": ["...", "..."],
      "keywordDifficulty": "Medium",
      "searchIntent": "Informational",
      "contentAngle": "...",
      "internalLinking": "..."
    }
  ]
}
"subPillars" must contain exactly {count} entries.

Do not write any conversational text outside the JSON code block."#;

fn join_names<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names.into_iter().collect::<Vec<_>>().join(", ")
}

/// Builds the full instruction for `topic`. The topic is embedded as given; callers trim and
/// reject empty topics before getting here.
pub fn strategy_instruction(topic: &str) -> String {
    let difficulties = join_names(KeywordDifficulty::ALL.iter().map(|d| d.as_str()));
    let intents = join_names(SearchIntent::ALL.iter().map(|i| i.as_str()));
    // Topic goes last so a literal "{count}" typed by the user is left alone.
    STRATEGY_INSTRUCTION
        .replace("{count}", &EXPECTED_SUB_PILLARS.to_string())
        .replace("{difficulties}", &difficulties)
        .replace("{intents}", &intents)
        .replace(TOPIC_PLACEHOLDER, topic)
}
