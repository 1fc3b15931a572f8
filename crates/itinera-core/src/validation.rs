// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Advisory prompt gate used by clients before asking for a completion.
//!
//! The server never applies this check; any non-empty message is forwarded.

/// Words whose presence marks a prompt as travel-related.
pub const TRAVEL_KEYWORDS: [&str; 5] = ["destination", "travel", "trip", "itinerary", "vacation"];

/// Returns true when the lowercased prompt contains any travel keyword as a substring.
pub fn is_travel_prompt(prompt: &str) -> bool {
    let lowered = prompt.to_lowercase();
    TRAVEL_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_prompt_is_rejected() {
        assert!(!is_travel_prompt(""));
    }

    #[test]
    fn keyword_anywhere_in_any_case() {
        assert!(is_travel_prompt("Plan a vacation to Rome"));
        assert!(is_travel_prompt("TRIP to Lisbon"));
        assert!(is_travel_prompt("best DESTINATIONs in Peru"));
        assert!(is_travel_prompt("my itinerary"));
    }

    #[test]
    fn substring_not_whole_word() {
        assert!(is_travel_prompt("travelling light"));
        assert!(is_travel_prompt("striped shirts"));
    }

    #[test]
    fn unrelated_text_is_rejected() {
        assert!(!is_travel_prompt("write me a poem"));
        assert!(!is_travel_prompt("tri p"));
    }

    proptest! {
        #[test]
        fn any_text_with_a_keyword_passes(
            prefix in "[a-z ]{0,20}",
            suffix in "[a-z ]{0,20}",
            idx in 0usize..TRAVEL_KEYWORDS.len(),
            upper in any::<bool>(),
        ) {
            let keyword = if upper {
                TRAVEL_KEYWORDS[idx].to_uppercase()
            } else {
                TRAVEL_KEYWORDS[idx].to_string()
            };
            let prompt = format!("{prefix}{keyword}{suffix}");
            prop_assert!(is_travel_prompt(&prompt));
        }

        #[test]
        fn digits_and_punctuation_never_pass(prompt in "[0-9 .,!?]{0,40}") {
            prop_assert!(!is_travel_prompt(&prompt));
        }
    }
}
