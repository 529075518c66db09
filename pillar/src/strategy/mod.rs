//! Content strategy data model: one [`Pillar`], its [`SubPillar`]s and the grounding [`Source`]s.
//!
//! Field names serialize in camelCase so a [`Strategy`] round-trips through the same JSON shape
//! the backend is asked to produce (`pageTitle`, `subPillars`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The single authoritative topic anchoring a strategy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pillar {
    pub topic: String,
    pub page_title: String,
    /// Free-text label; unlike [`SubPillar::search_intent`] this is not an enum.
    pub search_intent: String,
    pub target_audience: String,
}

/// Coarse competitiveness estimate for ranking a keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeywordDifficulty {
    Easy,
    Medium,
    Hard,
}

impl KeywordDifficulty {
    pub const ALL: [KeywordDifficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Sort weight used by the strategy table: Easy < Medium < Hard.
    pub fn weight(&self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }
}

impl fmt::Display for KeywordDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeywordDifficulty {
    type Err = String;

    /// Exact, case-sensitive match. Anything else is rejected rather than coerced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("expected one of Easy, Medium, Hard; got {:?}", s))
    }
}

/// Search intent of a sub-pillar keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchIntent {
    Informational,
    Commercial,
    Transactional,
    Navigational,
}

impl SearchIntent {
    pub const ALL: [SearchIntent; 4] = [
        Self::Informational,
        Self::Commercial,
        Self::Transactional,
        Self::Navigational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Informational => "Informational",
            Self::Commercial => "Commercial",
            Self::Transactional => "Transactional",
            Self::Navigational => "Navigational",
        }
    }
}

impl fmt::Display for SearchIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchIntent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "expected one of Informational, Commercial, Transactional, Navigational; got {:?}",
                    s
                )
            })
    }
}

/// One related topic supporting the pillar through internal linking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubPillar {
    pub primary_keyword: String,
    /// LSI keywords / entities; three to five are requested but any count is kept.
    pub semantic_keywords: Vec<String>,
    /// Supporting-article keywords. Empty when the backend omitted the field.
    #[serde(default)]
    pub cluster_keywords: Vec<String>,
    pub keyword_difficulty: KeywordDifficulty,
    pub search_intent: SearchIntent,
    pub content_angle: String,
    pub internal_linking: String,
}

/// A web page the backend consulted while grounding its answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

/// Aggregate root returned by a successful generation.
///
/// Built fresh per request and never mutated afterwards; a new request replaces it wholesale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub pillar: Pillar,
    /// In the order the backend returned them. Usually ten, but not enforced.
    pub sub_pillars: Vec<SubPillar>,
    pub sources: Vec<Source>,
}

/// Number of sub-pillars the instruction asks for.
pub const EXPECTED_SUB_PILLARS: usize = 10;
