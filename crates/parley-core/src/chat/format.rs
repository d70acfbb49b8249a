//! Reply text normalization.
//!
//! Provider replies arrive as free-form prose, sometimes with numbered
//! lists. This module reshapes them into a uniform bulleted layout:
//! numbered items become bullet points, each point is capitalized and
//! separated by a blank line, and colon-introduced runs get breathing room.

use std::sync::OnceLock;

use regex::Regex;

fn numbered_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+\.\s+").expect("valid regex"))
}

fn point_split_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\n\u{2022}]+").expect("valid regex"))
}

fn colon_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r":\s*").expect("valid regex"))
}

/// Normalize a provider reply into bulleted points.
///
/// An empty or whitespace-only reply normalizes to an empty string.
pub fn normalize_reply(raw: &str) -> String {
    // Turn "1. ", "2. " list markers into bullet markers.
    let bulleted = numbered_item_re().replace_all(raw, "\u{2022} ");

    // Split into points on newlines and bullets, dropping blanks.
    let mut points: Vec<String> = Vec::new();
    for part in point_split_re().split(&bulleted) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let mut point = String::with_capacity(part.len() + 4);
        point.push_str("\u{2022} ");
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            point.extend(first.to_uppercase());
            point.push_str(chars.as_str());
        }
        points.push(point);
    }

    let joined = points.join("\n\n");
    let spaced = colon_run_re().replace_all(&joined, ":\n\n");
    spaced.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_list_becomes_bullets() {
        let raw = "1. drink water\n2. rest well";
        let formatted = normalize_reply(raw);
        assert_eq!(formatted, "\u{2022} Drink water\n\n\u{2022} Rest well");
    }

    #[test]
    fn test_plain_sentence_gets_single_bullet() {
        let formatted = normalize_reply("hello there");
        assert_eq!(formatted, "\u{2022} Hello there");
    }

    #[test]
    fn test_capitalizes_each_point() {
        let formatted = normalize_reply("first point\nsecond point");
        assert!(formatted.contains("\u{2022} First point"));
        assert!(formatted.contains("\u{2022} Second point"));
    }

    #[test]
    fn test_colon_introduces_spacing() {
        let formatted = normalize_reply("Remember: stay hydrated");
        assert_eq!(formatted, "\u{2022} Remember:\n\nstay hydrated");
    }

    #[test]
    fn test_existing_bullets_are_preserved_as_points() {
        let raw = "\u{2022} one\n\u{2022} two";
        let formatted = normalize_reply(raw);
        assert_eq!(formatted, "\u{2022} One\n\n\u{2022} Two");
    }

    #[test]
    fn test_empty_reply_normalizes_to_empty() {
        assert_eq!(normalize_reply(""), "");
        assert_eq!(normalize_reply("   \n  "), "");
    }
}
