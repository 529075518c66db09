//! Locates the structured payload inside free-form backend text.
//!
//! Layered fallback, first hit wins: a ```json fenced block, then any fenced block, then the
//! slice from the first `{` to the last `}`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseFailure;

/// Tagged fence: the `json` tag and a newline, content, a newline, closing fence. Non-greedy so
/// the first block wins.
static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\r?\n(.*?)\r?\n```").expect("valid json fence regex"));

/// Any ``` ... ``` pair; inner content taken verbatim (including a language tag, if any).
static ANY_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(.*?)```").expect("valid fence regex"));

/// Which extraction layer produced the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadOrigin {
    JsonFence,
    AnyFence,
    BraceSlice,
}

/// A candidate payload borrowed from the response text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payload<'a> {
    pub origin: PayloadOrigin,
    pub text: &'a str,
}

fn fence_content<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .map(|c| c.get(1).map_or("", |m| m.as_str()))
}

fn brace_slice(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Finds the candidate payload string.
///
/// The first fence pattern that matches decides: a tagged fence short-circuits the untagged
/// search even when its content is empty, and an empty matched fence falls through to the
/// brace slice.
pub fn locate_payload(text: &str) -> Result<Payload<'_>, ParseFailure> {
    let fenced = match fence_content(&JSON_FENCE, text) {
        Some(inner) => Some((PayloadOrigin::JsonFence, inner)),
        None => fence_content(&ANY_FENCE, text).map(|inner| (PayloadOrigin::AnyFence, inner)),
    };
    if let Some((origin, inner)) = fenced.filter(|(_, inner)| !inner.is_empty()) {
        return Ok(Payload {
            origin,
            text: inner,
        });
    }
    brace_slice(text)
        .map(|slice| Payload {
            origin: PayloadOrigin::BraceSlice,
            text: slice,
        })
        .ok_or(ParseFailure::NoPayload)
}
