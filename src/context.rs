// src/context.rs
//! Renders prior exchanges into the transcript block prepended to each
//! prompt. Bounding happens upstream via the record-count limit on
//! `HistoryStore::recent`; nothing here truncates by character count.

use crate::history::Exchange;

/// Render exchanges (oldest-first) as a labeled transcript.
///
/// One "User:" / "Assistant:" line pair per exchange, newline-separated.
/// Empty input yields an empty string.
pub fn build_context(exchanges: &[Exchange]) -> String {
    exchanges
        .iter()
        .map(|e| format!("User: {}\nAssistant: {}", e.query, e.response))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Combine the transcript with the new query into the full model prompt.
pub fn assemble_prompt(context: &str, query: &str) -> String {
    format!(
        "Here is the conversation so far:\n{}\n\nNow the user asks: {}",
        context, query
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exchange(query: &str, response: &str) -> Exchange {
        Exchange {
            query: query.to_string(),
            response: response.to_string(),
        }
    }

    #[test]
    fn test_empty_history_is_empty_string() {
        assert_eq!(build_context(&[]), "");
    }

    #[test]
    fn test_transcript_preserves_input_order() {
        let history = vec![exchange("hi", "hello"), exchange("weather?", "sunny")];
        assert_eq!(
            build_context(&history),
            "User: hi\nAssistant: hello\nUser: weather?\nAssistant: sunny"
        );
    }

    #[test]
    fn test_prompt_contains_preamble_and_query_even_without_history() {
        let prompt = assemble_prompt("", "what now?");
        assert!(prompt.starts_with("Here is the conversation so far:\n"));
        assert!(prompt.ends_with("Now the user asks: what now?"));
    }

    #[test]
    fn test_prompt_embeds_transcript_verbatim() {
        let context = build_context(&[exchange("a", "b")]);
        let prompt = assemble_prompt(&context, "c");
        assert!(prompt.contains("User: a\nAssistant: b"));
    }
}
