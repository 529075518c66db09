//! Shape validation of a parsed payload into [`Pillar`] and [`SubPillar`]s.
//!
//! Works on [`serde_json::Value`] rather than `Deserialize` so every failure can name the exact
//! offending field, e.g. `subPillars[2].keywordDifficulty`.

use serde_json::{Map, Value};

use crate::error::StrategyError;
use crate::strategy::{KeywordDifficulty, Pillar, SearchIntent, SubPillar};

type Object = Map<String, Value>;

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn field<'a>(obj: &'a Object, key: &str, path: &str) -> Result<&'a Value, StrategyError> {
    obj.get(key)
        .ok_or_else(|| StrategyError::validation(path, "is missing"))
}

fn object<'a>(value: &'a Value, path: &str) -> Result<&'a Object, StrategyError> {
    value.as_object().ok_or_else(|| {
        StrategyError::validation(path, format!("must be an object, got {}", type_name(value)))
    })
}

fn string(obj: &Object, key: &str, path: &str) -> Result<String, StrategyError> {
    match field(obj, key, path)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(StrategyError::validation(
            path,
            format!("must be a string, got {}", type_name(other)),
        )),
    }
}

fn non_empty_string(obj: &Object, key: &str, path: &str) -> Result<String, StrategyError> {
    let s = string(obj, key, path)?;
    if s.trim().is_empty() {
        return Err(StrategyError::validation(path, "must not be empty"));
    }
    Ok(s)
}

fn string_list(value: &Value, path: &str) -> Result<Vec<String>, StrategyError> {
    let items = value.as_array().ok_or_else(|| {
        StrategyError::validation(path, format!("must be an array, got {}", type_name(value)))
    })?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(StrategyError::validation(
                format!("{}[{}]", path, i),
                format!("must be a string, got {}", type_name(other)),
            )),
        })
        .collect()
}

fn parsed<T: std::str::FromStr<Err = String>>(
    obj: &Object,
    key: &str,
    path: &str,
) -> Result<T, StrategyError> {
    let raw = string(obj, key, path)?;
    raw.parse::<T>()
        .map_err(|reason| StrategyError::validation(path, reason))
}

/// Validates the `pillar` object: four non-empty strings.
pub fn pillar(value: &Value) -> Result<Pillar, StrategyError> {
    let obj = object(value, "pillar")?;
    Ok(Pillar {
        topic: non_empty_string(obj, "topic", "pillar.topic")?,
        page_title: non_empty_string(obj, "pageTitle", "pillar.pageTitle")?,
        search_intent: non_empty_string(obj, "searchIntent", "pillar.searchIntent")?,
        target_audience: non_empty_string(obj, "targetAudience", "pillar.targetAudience")?,
    })
}

/// Validates one sub-pillar at `subPillars[index]`.
pub fn sub_pillar(value: &Value, index: usize) -> Result<SubPillar, StrategyError> {
    let base = format!("subPillars[{}]", index);
    let path = |key: &str| format!("{}.{}", base, key);
    let obj = object(value, &base)?;

    let semantic_path = path("semanticKeywords");
    let semantic_keywords = string_list(field(obj, "semanticKeywords", &semantic_path)?, &semantic_path)?;

    let cluster_path = path("clusterKeywords");
    let cluster_keywords = match obj.get("clusterKeywords") {
        None | Some(Value::Null) => Vec::new(),
        Some(v) => string_list(v, &cluster_path)?,
    };

    Ok(SubPillar {
        primary_keyword: non_empty_string(obj, "primaryKeyword", &path("primaryKeyword"))?,
        semantic_keywords,
        cluster_keywords,
        keyword_difficulty: parsed::<KeywordDifficulty>(
            obj,
            "keywordDifficulty",
            &path("keywordDifficulty"),
        )?,
        search_intent: parsed::<SearchIntent>(obj, "searchIntent", &path("searchIntent"))?,
        content_angle: string(obj, "contentAngle", &path("contentAngle"))?,
        internal_linking: string(obj, "internalLinking", &path("internalLinking"))?,
    })
}

/// Validates the top-level payload and returns the pillar and sub-pillars in received order.
pub fn payload(value: &Value) -> Result<(Pillar, Vec<SubPillar>), StrategyError> {
    let root = object(value, "payload")?;
    let pillar = pillar(field(root, "pillar", "pillar")?)?;

    let subs = field(root, "subPillars", "subPillars")?;
    let items = subs.as_array().ok_or_else(|| {
        StrategyError::validation(
            "subPillars",
            format!("must be an array, got {}", type_name(subs)),
        )
    })?;
    let sub_pillars = items
        .iter()
        .enumerate()
        .map(|(i, v)| sub_pillar(v, i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((pillar, sub_pillars))
}
