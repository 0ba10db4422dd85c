//! Urgency classification for transcribed issue descriptions.

use crate::session::Priority;

/// Keywords that mark a description as urgent. Matching is lower-cased
/// substring containment; any single hit is sufficient.
const URGENT_KEYWORDS: &[&str] = &[
    "leak",
    "storm",
    "emergency",
    "tarp",
    "collapse",
    "caving",
    "sagging roof",
    "water coming in",
    "hole in",
];

/// Classify free text as urgent or normal.
pub fn classify_urgency(text: &str) -> Priority {
    let lowered = text.to_lowercase();

    if URGENT_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        Priority::Urgent
    } else {
        Priority::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leak_is_urgent() {
        assert_eq!(
            classify_urgency("There is a leak in my ceiling"),
            Priority::Urgent
        );
    }

    #[test]
    fn test_quote_request_is_normal() {
        assert_eq!(
            classify_urgency("I want a new roof quote"),
            Priority::Normal
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(classify_urgency("STORM DAMAGE"), Priority::Urgent);
    }

    #[test]
    fn test_empty_text_is_normal() {
        assert_eq!(classify_urgency(""), Priority::Normal);
    }

    #[test]
    fn test_sagging_roof_phrase() {
        assert_eq!(
            classify_urgency("the sagging roof over the porch"),
            Priority::Urgent
        );
    }
}
