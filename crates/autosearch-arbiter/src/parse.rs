// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction and validation of the model classifier's JSON verdict.
//!
//! Models wrap JSON in prose or code fences, so the first balanced `{...}`
//! object in the raw text is taken and validated against the
//! [`SearchDecision`] shape. Anything else is a [`ModelError::Parse`].

use autosearch_core::{DecisionCategory, ModelError, SearchDecision};
use serde::Deserialize;

/// Wire shape of a model verdict. Extra keys are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelVerdict {
    should_search: bool,
    confidence: f64,
    reasoning: String,
    category: DecisionCategory,
}

/// Return the first balanced-brace substring of `raw`, if any.
///
/// Braces inside JSON string literals (including escaped quotes) do not
/// count toward the balance.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in raw[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse raw classifier output into a [`SearchDecision`].
pub fn parse_decision(raw: &str) -> Result<SearchDecision, ModelError> {
    let json = extract_json_object(raw).ok_or_else(|| ModelError::Parse {
        reason: "no JSON object found in response".to_string(),
        raw: raw.to_string(),
    })?;

    let verdict: ModelVerdict = serde_json::from_str(json).map_err(|e| ModelError::Parse {
        reason: e.to_string(),
        raw: raw.to_string(),
    })?;

    if !(verdict.confidence.is_finite() && (0.0..=1.0).contains(&verdict.confidence)) {
        return Err(ModelError::Parse {
            reason: format!("confidence {} outside [0, 1]", verdict.confidence),
            raw: raw.to_string(),
        });
    }

    Ok(SearchDecision {
        should_search: verdict.should_search,
        confidence: verdict.confidence,
        reasoning: verdict.reasoning,
        category: verdict.category,
    })
}
