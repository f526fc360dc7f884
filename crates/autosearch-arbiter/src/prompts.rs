// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompts sent to the model classifier.

use autosearch_core::{ClassifierRequest, SearchConfig};

/// Sampling temperature used unless configured otherwise.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;
/// Output token cap used unless configured otherwise.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 256;

/// Fixed system prompt: JSON schema plus the conservative search policy.
pub const SYSTEM_PROMPT: &str = r#"you are a search decision classifier. given a user query, determine if web search is needed.

respond ONLY with valid json:
{"shouldSearch":boolean,"confidence":number,"reasoning":"string","category":"factual_current|factual_static|opinion|creative|code|math|personal|ambiguous"}

rules:
- shouldSearch=true ONLY for queries requiring current/real-time information
- shouldSearch=false for: coding, math, creative writing, opinions, general knowledge, greetings
- confidence: 0-1, how certain you are
- be extremely conservative - when in doubt, don't search
- if the model can answer from training data, no search needed"#;

/// User prompt embedding the raw query.
pub fn user_prompt(query: &str) -> String {
    format!("classify this query (json only, no explanation):\n\"{query}\"")
}

/// Build the single request sent for `query`.
pub fn build_request(
    query: &str,
    config: &SearchConfig,
    temperature: f32,
    max_output_tokens: u32,
) -> ClassifierRequest {
    ClassifierRequest {
        system_prompt: SYSTEM_PROMPT.to_string(),
        user_prompt: user_prompt(query),
        model: config.model_name().to_string(),
        temperature,
        max_output_tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_embeds_raw_query() {
        let p = user_prompt("Is it  raining?");
        assert!(p.ends_with("\"Is it  raining?\""));
        assert!(p.starts_with("classify this query"));
    }

    #[test]
    fn system_prompt_lists_every_category() {
        for c in [
            "factual_current",
            "factual_static",
            "opinion",
            "creative",
            "code",
            "math",
            "personal",
            "ambiguous",
        ] {
            assert!(SYSTEM_PROMPT.contains(c), "missing {c}");
        }
    }

    #[test]
    fn request_uses_configured_model() {
        let config = SearchConfig::default();
        let req = build_request("q", &config, DEFAULT_TEMPERATURE, DEFAULT_MAX_OUTPUT_TOKENS);
        assert_eq!(req.model, "qwen2.5vl:3b");
        assert_eq!(req.max_output_tokens, 256);
        assert_eq!(req.system_prompt, SYSTEM_PROMPT);
    }
}
