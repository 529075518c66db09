//! Terminal rendering of a [`Strategy`]: pillar card, hierarchy tree, execution table and
//! research sources.
//!
//! All functions return plain strings (no ANSI) so the output can be piped or captured in tests.

use pillar::{sort_sub_pillars, Pillar, SortConfig, Source, Strategy, SubPillar};

const KEYWORD_WIDTH: usize = 32;
const DIFFICULTY_WIDTH: usize = 10;
const INTENT_WIDTH: usize = 13;
const CLUSTERS_WIDTH: usize = 36;
const TEXT_WIDTH: usize = 48;

/// Truncates a string to at most `max` chars; appends "..." when truncated. UTF-8 safe.
pub fn truncate_display(s: &str, max: usize) -> String {
    const SUFFIX: &str = "...";
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max <= SUFFIX.len() {
        return s.chars().take(max).collect();
    }
    let mut out: String = s.chars().take(max - SUFFIX.len()).collect();
    out.push_str(SUFFIX);
    out
}

fn cell(s: &str, width: usize) -> String {
    format!("{:<width$}", truncate_display(s, width), width = width)
}

fn initial(s: &str) -> char {
    s.chars().next().unwrap_or('?')
}

/// Summary card for the core pillar page.
pub fn pillar_card(pillar: &Pillar) -> String {
    format!(
        "CORE PILLAR\n  {}\n  Topic:    {}\n  Audience: {}\n  Intent:   {}\n",
        pillar.page_title, pillar.topic, pillar.target_audience, pillar.search_intent
    )
}

/// Tree with the pillar title at the root and one branch per sub-pillar, tagged with
/// `[intent initial · difficulty initial]`. Always in received order.
pub fn hierarchy(strategy: &Strategy) -> String {
    let mut out = format!("{}\n", strategy.pillar.page_title);
    let last = strategy.sub_pillars.len().saturating_sub(1);
    for (i, sub) in strategy.sub_pillars.iter().enumerate() {
        let branch = if i == last { "└──" } else { "├──" };
        out.push_str(&format!(
            "{} {} [{} · {}]\n",
            branch,
            sub.primary_keyword,
            initial(sub.search_intent.as_str()),
            initial(sub.keyword_difficulty.as_str()),
        ));
    }
    out
}

fn clusters(sub: &SubPillar) -> String {
    if sub.cluster_keywords.is_empty() {
        "No clusters".to_string()
    } else {
        sub.cluster_keywords.join(", ")
    }
}

/// Execution table, one row per sub-pillar in the order given.
pub fn table(rows: &[&SubPillar]) -> String {
    let header = [
        cell("Keyword", KEYWORD_WIDTH),
        cell("Difficulty", DIFFICULTY_WIDTH),
        cell("Intent", INTENT_WIDTH),
        cell("Clusters", CLUSTERS_WIDTH),
        cell("Content Angle", TEXT_WIDTH),
        "Internal Linking".to_string(),
    ]
    .join(" | ");
    let rule = "-".repeat(header.chars().count().max(TEXT_WIDTH));

    let mut out = format!("{}\n{}\n", header.trim_end(), rule);
    for sub in rows {
        let line = [
            cell(&sub.primary_keyword, KEYWORD_WIDTH),
            cell(sub.keyword_difficulty.as_str(), DIFFICULTY_WIDTH),
            cell(sub.search_intent.as_str(), INTENT_WIDTH),
            cell(&clusters(sub), CLUSTERS_WIDTH),
            cell(&sub.content_angle, TEXT_WIDTH),
            truncate_display(&sub.internal_linking, TEXT_WIDTH),
        ]
        .join(" | ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Numbered list of research sources.
pub fn sources(sources: &[Source]) -> String {
    if sources.is_empty() {
        return "RESEARCH SOURCES\n  (none returned)\n".to_string();
    }
    let mut out = String::from("RESEARCH SOURCES\n");
    for (i, source) in sources.iter().enumerate() {
        out.push_str(&format!("  {:>2}. {}\n      {}\n", i + 1, source.title, source.uri));
    }
    out
}

/// Full text report: card, hierarchy, table (sorted by `sort` when given) and sources.
pub fn render_strategy(strategy: &Strategy, sort: Option<SortConfig>) -> String {
    let rows = sort_sub_pillars(&strategy.sub_pillars, sort);
    let sort_note = match sort {
        Some(c) => format!(" (sorted by {} {:?})", c.key, c.direction).to_lowercase(),
        None => String::new(),
    };
    format!(
        "{}\nHIERARCHY\n{}\nEXECUTION PLAN{}\n{}\n{}",
        pillar_card(&strategy.pillar),
        hierarchy(strategy),
        sort_note,
        table(&rows),
        sources(&strategy.sources),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pillar::{KeywordDifficulty, SearchIntent, SortDirection, SortKey};

    fn sub(kw: &str, d: KeywordDifficulty, i: SearchIntent, clusters: &[&str]) -> SubPillar {
        SubPillar {
            primary_keyword: kw.into(),
            semantic_keywords: vec![],
            cluster_keywords: clusters.iter().map(|c| c.to_string()).collect(),
            keyword_difficulty: d,
            search_intent: i,
            content_angle: "angle".into(),
            internal_linking: "link up".into(),
        }
    }

    fn strategy() -> Strategy {
        Strategy {
            pillar: Pillar {
                topic: "Coffee".into(),
                page_title: "Coffee Guide".into(),
                search_intent: "Informational".into(),
                target_audience: "Home brewers".into(),
            },
            sub_pillars: vec![
                sub("grind size", KeywordDifficulty::Hard, SearchIntent::Commercial, &["burr"]),
                sub("aeropress", KeywordDifficulty::Easy, SearchIntent::Transactional, &[]),
            ],
            sources: vec![Source {
                title: "Source".into(),
                uri: "https://example.com/a".into(),
            }],
        }
    }

    #[test]
    fn truncate_display_is_char_safe() {
        assert_eq!(truncate_display("héllo wörld", 8), "héllo...");
        assert_eq!(truncate_display("short", 10), "short");
        assert_eq!(truncate_display("abcdef", 2), "ab");
    }

    #[test]
    fn hierarchy_tags_intent_and_difficulty() {
        let h = hierarchy(&strategy());
        assert_eq!(
            h,
            "Coffee Guide\n├── grind size [C · H]\n└── aeropress [T · E]\n"
        );
    }

    #[test]
    fn table_marks_missing_clusters() {
        let s = strategy();
        let rows: Vec<&SubPillar> = s.sub_pillars.iter().collect();
        let t = table(&rows);
        let lines: Vec<&str> = t.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Keyword"));
        assert!(lines[2].contains("burr"));
        assert!(lines[3].contains("No clusters"));
    }

    #[test]
    fn render_applies_sort_to_table_only() {
        let sort = SortConfig::new(SortKey::KeywordDifficulty, SortDirection::Asc);
        let out = render_strategy(&strategy(), Some(sort));
        assert!(out.contains("(sorted by difficulty asc)"));
        let table_start = out.find("EXECUTION PLAN").unwrap();
        let table = &out[table_start..];
        assert!(table.find("aeropress").unwrap() < table.find("grind size").unwrap());
        let tree = &out[..table_start];
        assert!(tree.find("grind size").unwrap() < tree.find("aeropress").unwrap());
    }

    #[test]
    fn sources_are_numbered() {
        let out = sources(&strategy().sources);
        assert!(out.contains(" 1. Source"));
        assert!(out.contains("https://example.com/a"));
        assert!(sources(&[]).contains("none returned"));
    }
}
