//! Sorting of sub-pillars for the strategy table.
//!
//! Three sortable columns. Selecting the same column again while ascending flips to descending;
//! any other selection starts ascending. Difficulty sorts by weight (Easy < Medium < Hard), the
//! other columns by their text. The sort is stable, so ties keep received order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::strategy::SubPillar;

/// Sortable table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    PrimaryKeyword,
    KeywordDifficulty,
    SearchIntent,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keyword" | "primarykeyword" | "primary_keyword" => Ok(Self::PrimaryKeyword),
            "difficulty" | "keyworddifficulty" | "keyword_difficulty" => {
                Ok(Self::KeywordDifficulty)
            }
            "intent" | "searchintent" | "search_intent" => Ok(Self::SearchIntent),
            _ => Err(format!(
                "unknown sort key: {} (use keyword, difficulty, or intent)",
                s
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PrimaryKeyword => "keyword",
            Self::KeywordDifficulty => "difficulty",
            Self::SearchIntent => "intent",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Active sort column and direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Next config after selecting `key` given the `current` one.
    pub fn toggle(current: Option<SortConfig>, key: SortKey) -> SortConfig {
        let direction = match current {
            Some(c) if c.key == key && c.direction == SortDirection::Asc => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        SortConfig { key, direction }
    }
}

fn compare(a: &SubPillar, b: &SubPillar, key: SortKey) -> Ordering {
    match key {
        SortKey::PrimaryKeyword => a.primary_keyword.cmp(&b.primary_keyword),
        SortKey::SearchIntent => a.search_intent.as_str().cmp(b.search_intent.as_str()),
        SortKey::KeywordDifficulty => a
            .keyword_difficulty
            .weight()
            .cmp(&b.keyword_difficulty.weight()),
    }
}

/// Returns the sub-pillars in display order. `None` keeps received order.
pub fn sort_sub_pillars(sub_pillars: &[SubPillar], config: Option<SortConfig>) -> Vec<&SubPillar> {
    let mut out: Vec<&SubPillar> = sub_pillars.iter().collect();
    if let Some(config) = config {
        out.sort_by(|a, b| {
            let ord = compare(a, b, config.key);
            match config.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }
    out
}
