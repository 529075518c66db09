//! CSV export of a finished [`Strategy`].
//!
//! Fixed eight-column layout: one `Core Pillar` row, then one `Sub-Pillar` row per sub-pillar.
//! Free-text sub-pillar fields are always quoted with embedded quotes doubled; pillar fields are
//! quoted only when they contain a comma, quote or line break. Keyword lists are joined with
//! `"; "`. Rows are separated by `\n`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::strategy::{Strategy, SubPillar};

/// Header row columns, in order.
pub const CSV_HEADERS: [&str; 8] = [
    "Type",
    "Topic/Keyword",
    "Intent",
    "Difficulty",
    "Semantic Keywords",
    "Cluster Keywords",
    "Content Angle",
    "Internal Linking Strategy",
];

const NOT_APPLICABLE: &str = "N/A";
const LIST_SEPARATOR: &str = "; ";

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Characters that would split or escape the filename when used as a path.
static PATH_UNSAFE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[/\\:*?"<>|]"#).expect("valid path-unsafe regex"));

/// Wraps `s` in double quotes, doubling any embedded quote.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Quotes `s` only when it would otherwise break the row.
fn field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        quoted(s)
    } else {
        s.to_string()
    }
}

fn pillar_row(strategy: &Strategy) -> String {
    let p = &strategy.pillar;
    [
        "Core Pillar",
        field(&p.page_title).as_str(),
        field(&p.search_intent).as_str(),
        NOT_APPLICABLE,
        NOT_APPLICABLE,
        NOT_APPLICABLE,
        NOT_APPLICABLE,
        NOT_APPLICABLE,
    ]
    .join(",")
}

fn sub_pillar_row(sub: &SubPillar) -> String {
    [
        "Sub-Pillar".to_string(),
        quoted(&sub.primary_keyword),
        sub.search_intent.to_string(),
        sub.keyword_difficulty.to_string(),
        quoted(&sub.semantic_keywords.join(LIST_SEPARATOR)),
        quoted(&sub.cluster_keywords.join(LIST_SEPARATOR)),
        quoted(&sub.content_angle),
        quoted(&sub.internal_linking),
    ]
    .join(",")
}

/// Renders the whole strategy as CSV (no trailing newline).
pub fn to_csv(strategy: &Strategy) -> String {
    let mut rows = Vec::with_capacity(strategy.sub_pillars.len() + 2);
    rows.push(CSV_HEADERS.join(","));
    rows.push(pillar_row(strategy));
    rows.extend(strategy.sub_pillars.iter().map(sub_pillar_row));
    rows.join("\n")
}

/// Download filename for `topic`: each whitespace run becomes `-`, as does every path
/// separator or reserved character, then lowercased. Always a single path component.
pub fn csv_filename(topic: &str) -> String {
    let dashed = WHITESPACE_RUN.replace_all(topic, "-");
    format!(
        "seo-strategy-{}.csv",
        PATH_UNSAFE.replace_all(&dashed, "-").to_lowercase()
    )
}
