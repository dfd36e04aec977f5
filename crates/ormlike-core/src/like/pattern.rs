//! Wildcard detection for equality values.

/// The store's native "any run of characters" pattern character.
pub const NATIVE_WILDCARD: char = '%';

/// Outcome of inspecting one string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternDecision {
    /// Whether the value should be compared with LIKE semantics.
    pub is_pattern: bool,
    /// The value to compare with; marker occurrences are replaced by `%`
    /// when `is_pattern` holds, otherwise this is the input unchanged.
    pub rewritten_value: String,
}

impl PatternDecision {
    fn exact(value: &str) -> Self {
        Self {
            is_pattern: false,
            rewritten_value: value.to_string(),
        }
    }
}

/// Decide whether `value` is a pattern and produce the store-native pattern.
///
/// `marker` is an optional substitute token for `%`. It is matched as a whole
/// substring, so multi-character and multi-codepoint markers work. An empty
/// marker behaves like no marker.
pub fn detect(value: &str, marker: Option<&str>) -> PatternDecision {
    let marker = marker.filter(|m| !m.is_empty());
    let has_native = value.contains(NATIVE_WILDCARD);

    match marker {
        None if has_native => PatternDecision {
            is_pattern: true,
            rewritten_value: value.to_string(),
        },
        None => PatternDecision::exact(value),
        Some(m) if value.contains(m) => PatternDecision {
            is_pattern: true,
            rewritten_value: value.replace(m, "%"),
        },
        Some(_) if has_native => PatternDecision {
            is_pattern: true,
            rewritten_value: value.to_string(),
        },
        Some(_) => PatternDecision::exact(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_is_exact() {
        let d = detect("jessica", None);
        assert!(!d.is_pattern);
        assert_eq!(d.rewritten_value, "jessica");

        let d = detect("jessica", Some("🍌"));
        assert!(!d.is_pattern);
        assert_eq!(d.rewritten_value, "jessica");
    }

    #[test]
    fn test_native_wildcard() {
        let d = detect("%a%", None);
        assert!(d.is_pattern);
        assert_eq!(d.rewritten_value, "%a%");

        // Native character still counts when a marker is configured.
        let d = detect("jes%", Some("*"));
        assert!(d.is_pattern);
        assert_eq!(d.rewritten_value, "jes%");
    }

    #[test]
    fn test_marker_without_config_is_literal() {
        let d = detect("🍌a🍌", None);
        assert!(!d.is_pattern);
        assert_eq!(d.rewritten_value, "🍌a🍌");
    }

    #[test]
    fn test_emoji_marker() {
        let d = detect("🍌a🍌", Some("🍌"));
        assert!(d.is_pattern);
        assert_eq!(d.rewritten_value, "%a%");
    }

    #[test]
    fn test_multi_character_marker_is_atomic() {
        let d = detect("ab**c*", Some("**"));
        assert!(d.is_pattern);
        assert_eq!(d.rewritten_value, "ab%c*");

        // Composite emoji: the joined sequence is one marker.
        let family = "👨\u{200d}👩";
        let d = detect(&format!("{family}x{family}"), Some(family));
        assert_eq!(d.rewritten_value, "%x%");

        let d = detect("👨x", Some(family));
        assert!(!d.is_pattern);
    }

    #[test]
    fn test_mixed_marker_and_native() {
        let d = detect("🍓a%", Some("🍓"));
        assert!(d.is_pattern);
        assert_eq!(d.rewritten_value, "%a%");
    }

    #[test]
    fn test_every_occurrence_replaced() {
        let d = detect("🍎🍎x🍎y🍎🍎🍎", Some("🍎"));
        assert_eq!(d.rewritten_value, "%%x%y%%%");
        assert!(!d.rewritten_value.contains('🍎'));
    }

    #[test]
    fn test_empty_marker_is_unset() {
        let d = detect("abc", Some(""));
        assert!(!d.is_pattern);
        assert_eq!(d.rewritten_value, "abc");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn marker_strategy() -> impl Strategy<Value = &'static str> {
            prop::sample::select(vec!["🍌", "**", "#", "👨\u{200d}👩"])
        }

        proptest! {
            #[test]
            fn every_marker_occurrence_becomes_wildcard(
                segments in prop::collection::vec("[a-z ]{0,6}", 1..8),
                marker in marker_strategy(),
            ) {
                let value = segments.join(marker);
                let d = detect(&value, Some(marker));

                prop_assert_eq!(d.is_pattern, segments.len() > 1);
                prop_assert_eq!(&d.rewritten_value, &segments.join("%"));
                prop_assert!(!d.rewritten_value.contains(marker));
            }

            #[test]
            fn value_without_wildcards_is_untouched(
                value in "[a-z0-9 ]{0,24}",
                marker in marker_strategy(),
            ) {
                for marker in [None, Some(marker)] {
                    let d = detect(&value, marker);
                    prop_assert!(!d.is_pattern);
                    prop_assert_eq!(&d.rewritten_value, &value);
                }
            }

            #[test]
            fn rewritten_pattern_is_stable(
                segments in prop::collection::vec("[a-z]{0,6}", 2..8),
                marker in marker_strategy(),
            ) {
                let first = detect(&segments.join(marker), Some(marker));
                let second = detect(&first.rewritten_value, Some(marker));
                prop_assert!(second.is_pattern);
                prop_assert_eq!(second.rewritten_value, first.rewritten_value);
            }
        }
    }
}
