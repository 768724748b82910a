//! Split QIF hierarchical category strings (`Parent/Child/Tag`) into a
//! category path and a trailing tag.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTag {
    /// Every non-trailing segment, rejoined with `/`.
    pub category: String,
    /// The last segment.
    pub tag: String,
}

/// Split `raw` on `/`, ignoring empty segments.
///
/// Two or more segments: the last is the tag, the rest form the category path.
/// A single segment yields an empty category *and* an empty tag; exported
/// ledgers have always dropped undivided categories this way.
pub fn split_category_and_tag(raw: &str) -> CategoryTag {
    let parts: Vec<&str> = raw.split('/').filter(|p| !p.is_empty()).collect();

    match parts.split_last() {
        Some((tag, rest)) if !rest.is_empty() => CategoryTag {
            category: rest.join("/"),
            tag: (*tag).to_string(),
        },
        _ => CategoryTag::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(raw: &str) -> (String, String) {
        let ct = split_category_and_tag(raw);
        (ct.category, ct.tag)
    }

    #[test]
    fn test_three_segments() {
        assert_eq!(
            split("Food/Groceries/Dining"),
            ("Food/Groceries".to_string(), "Dining".to_string())
        );
    }

    #[test]
    fn test_two_segments() {
        assert_eq!(split("Food/Dining"), ("Food".to_string(), "Dining".to_string()));
    }

    #[test]
    fn test_single_segment_collapses_to_empty() {
        assert_eq!(split("Utilities"), (String::new(), String::new()));
    }

    #[test]
    fn test_empty_and_slash_only() {
        assert_eq!(split(""), (String::new(), String::new()));
        assert_eq!(split("///"), (String::new(), String::new()));
    }

    #[test]
    fn test_empty_segments_are_ignored() {
        assert_eq!(
            split("/Auto//Fuel/"),
            ("Auto".to_string(), "Fuel".to_string())
        );
        // one real segment surrounded by slashes still collapses
        assert_eq!(split("/Gifts/"), (String::new(), String::new()));
    }
}
