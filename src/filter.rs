// src/filter.rs
//! Keyword denylist applied to incoming queries before any model call.
//!
//! This is a coarse, advisory heuristic and not a security boundary:
//! substring matching catches "hackathon" as readily as "hack", and a
//! determined caller can trivially rephrase around it.

const BANNED_KEYWORDS: &[&str] = &[
    "hack",
    "crack",
    "bypass",
    "phish",
    "exploit",
    "malware",
    "keylogger",
    "unauthorized",
    "unauthorised",
    "steal",
    "breach",
];

/// Fixed refusal text returned for blocked queries.
pub const REFUSAL_MESSAGE: &str = "I can't assist with unauthorized or harmful activities.";

/// Case-insensitive substring match against the denylist.
pub fn is_blocked(query: &str) -> bool {
    let q = query.to_lowercase();
    BANNED_KEYWORDS.iter().any(|kw| q.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_denylisted_terms_any_case() {
        assert!(is_blocked("how do I hack a server"));
        assert!(is_blocked("HOW DO I HACK A SERVER"));
        assert!(is_blocked("Write me a KeyLogger"));
        assert!(is_blocked("unauthorised access please"));
    }

    #[test]
    fn test_blocks_embedded_substrings() {
        // Substring match is intentionally coarse.
        assert!(is_blocked("tell me about the hackathon"));
        assert!(is_blocked("my firecracker recipe"));
    }

    #[test]
    fn test_allows_clean_queries() {
        assert!(!is_blocked("what is the capital of France?"));
        assert!(!is_blocked(""));
        assert!(!is_blocked("explain ownership in Rust"));
    }
}
