//! Cyclic substitution engine
//!
//! Replaces every occurrence of a literal marker with entries drawn, in
//! order, from a replacement list that wraps around once exhausted. All
//! offsets are computed against the original text, so the result does not
//! depend on the order spans are applied in.

use thiserror::Error;

/// Errors raised by the substitution engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubstituteError {
    /// The inputs cannot produce a meaningful substitution.
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
}

/// One located instance of the marker in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    /// Byte offset where the marker starts
    pub start: usize,
    /// Byte offset one past the end of the marker
    pub end: usize,
    /// 0-based position among all occurrences, left to right
    pub index: usize,
}

/// Result of a cyclic substitution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// The rewritten text
    pub text: String,
    /// Number of marker occurrences that were replaced
    pub occurrences_replaced: usize,
}

impl Substitution {
    /// Returns true if the marker was not found and the text is unchanged.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.occurrences_replaced == 0
    }
}

/// Result of a literal replace pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralSubstitution {
    /// The rewritten text
    pub text: String,
    /// Whether anything was replaced
    pub changed: bool,
}

/// Find all non-overlapping occurrences of `marker`, left to right.
///
/// Matching is literal substring matching; there is no word-boundary check.
/// An empty marker yields no occurrences.
#[must_use]
pub fn find_occurrences(source: &str, marker: &str) -> Vec<Occurrence> {
    if marker.is_empty() {
        return Vec::new();
    }

    source
        .match_indices(marker)
        .enumerate()
        .map(|(index, (start, matched))| Occurrence {
            start,
            end: start + matched.len(),
            index,
        })
        .collect()
}

/// Pick the replacement for an occurrence, cycling through the list.
fn replacement_for<'a, S: AsRef<str>>(replacements: &'a [S], occurrence: &Occurrence) -> &'a str {
    replacements[occurrence.index % replacements.len()].as_ref()
}

/// Build the result text from occurrences computed against `source`.
///
/// `occurrences` must be sorted by offset and non-overlapping, as returned by
/// [`find_occurrences`].
///
/// # Errors
/// Returns [`SubstituteError::InvalidInput`] if `replacements` is empty.
pub fn apply_occurrences<S: AsRef<str>>(
    source: &str,
    occurrences: &[Occurrence],
    replacements: &[S],
) -> Result<String, SubstituteError> {
    if replacements.is_empty() {
        return Err(SubstituteError::InvalidInput(
            "replacement list cannot be empty",
        ));
    }

    let mut result = String::with_capacity(source.len());
    let mut cursor = 0;

    for occurrence in occurrences {
        result.push_str(&source[cursor..occurrence.start]);
        result.push_str(replacement_for(replacements, occurrence));
        cursor = occurrence.end;
    }
    result.push_str(&source[cursor..]);

    Ok(result)
}

/// Replace each occurrence of `marker` with `replacements[i % len]`, where
/// `i` is the occurrence's left-to-right position.
///
/// Zero occurrences is not an error: the text comes back unchanged with a
/// count of 0.
///
/// # Errors
/// Returns [`SubstituteError::InvalidInput`] if `marker` or `replacements`
/// is empty.
///
/// # Example
/// ```
/// use recast::substitute_cyclic;
///
/// let out = substitute_cyclic(
///     "Hi John Wick, meet John Wick.",
///     "John Wick",
///     &["Amina", "David"],
/// )
/// .unwrap();
/// assert_eq!(out.text, "Hi Amina, meet David.");
/// assert_eq!(out.occurrences_replaced, 2);
/// ```
pub fn substitute_cyclic<S: AsRef<str>>(
    source: &str,
    marker: &str,
    replacements: &[S],
) -> Result<Substitution, SubstituteError> {
    if marker.is_empty() {
        return Err(SubstituteError::InvalidInput("marker cannot be empty"));
    }

    let occurrences = find_occurrences(source, marker);
    let text = apply_occurrences(source, &occurrences, replacements)?;

    Ok(Substitution {
        text,
        occurrences_replaced: occurrences.len(),
    })
}

/// Replace every occurrence of `old` with `new`.
///
/// # Errors
/// Returns [`SubstituteError::InvalidInput`] if `old` is empty.
pub fn substitute_literal(
    source: &str,
    old: &str,
    new: &str,
) -> Result<LiteralSubstitution, SubstituteError> {
    let substitution = substitute_cyclic(source, old, &[new])?;
    Ok(LiteralSubstitution {
        changed: !substitution.is_noop(),
        text: substitution.text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Apply occurrences back to front with in-place splicing.
    fn apply_reversed(source: &str, occurrences: &[Occurrence], replacements: &[&str]) -> String {
        let mut text = source.to_string();
        for occurrence in occurrences.iter().rev() {
            text.replace_range(
                occurrence.start..occurrence.end,
                replacements[occurrence.index % replacements.len()],
            );
        }
        text
    }

    #[test]
    fn test_rotates_two_names() {
        let out =
            substitute_cyclic("Hi John Wick, meet John Wick.", "John Wick", &["Amina", "David"])
                .unwrap();
        assert_eq!(out.text, "Hi Amina, meet David.");
        assert_eq!(out.occurrences_replaced, 2);
    }

    #[test]
    fn test_cycles_when_occurrences_exceed_list() {
        let source = "X X X X X X X";
        let out = substitute_cyclic(source, "X", &["A", "B", "C"]).unwrap();
        assert_eq!(out.text, "A B C A B C A");
        assert_eq!(out.occurrences_replaced, 7);
    }

    #[test]
    fn test_no_occurrences_returns_source() {
        let source = "<p>Nothing to see here</p>";
        let out = substitute_cyclic(source, "John Wick", &["Amina"]).unwrap();
        assert_eq!(out.text, source);
        assert_eq!(out.occurrences_replaced, 0);
        assert!(out.is_noop());
    }

    #[test]
    fn test_empty_replacements_rejected() {
        let empty: [&str; 0] = [];
        let err = substitute_cyclic("John Wick", "John Wick", &empty).unwrap_err();
        assert!(matches!(err, SubstituteError::InvalidInput(_)));
        assert!(err.to_string().contains("replacement list"));
    }

    #[test]
    fn test_empty_replacements_rejected_even_without_matches() {
        let empty: [&str; 0] = [];
        assert!(substitute_cyclic("no marker here", "John Wick", &empty).is_err());
    }

    #[test]
    fn test_empty_marker_rejected() {
        let err = substitute_cyclic("abc", "", &["x"]).unwrap_err();
        assert_eq!(err, SubstituteError::InvalidInput("marker cannot be empty"));
    }

    #[test]
    fn test_single_char_marker() {
        let out = substitute_cyclic("a-b-c", "-", &["+", "*"]).unwrap();
        assert_eq!(out.text, "a+b*c");
    }

    #[test]
    fn test_marker_is_whole_source() {
        let out = substitute_cyclic("John Wick", "John Wick", &["Grace Wanjiku"]).unwrap();
        assert_eq!(out.text, "Grace Wanjiku");
        assert_eq!(out.occurrences_replaced, 1);
    }

    #[test]
    fn test_marker_at_start_and_end() {
        let out = substitute_cyclic("JW middle JW", "JW", &["first", "last"]).unwrap();
        assert_eq!(out.text, "first middle last");
    }

    #[test]
    fn test_adjacent_markers() {
        let out = substitute_cyclic("JWJWJW", "JW", &["1", "2"]).unwrap();
        assert_eq!(out.text, "121");
    }

    #[test]
    fn test_overlapping_candidates_are_not_double_counted() {
        // "aaa" holds one non-overlapping "aa" starting at 0
        let occurrences = find_occurrences("aaa", "aa");
        assert_eq!(
            occurrences,
            vec![Occurrence {
                start: 0,
                end: 2,
                index: 0
            }]
        );
        let out = substitute_cyclic("aaa", "aa", &["b"]).unwrap();
        assert_eq!(out.text, "ba");
    }

    #[test]
    fn test_matches_inside_larger_words() {
        let out = substitute_cyclic("cat concatenate", "cat", &["dog"]).unwrap();
        assert_eq!(out.text, "dog condogenate");
        assert_eq!(out.occurrences_replaced, 2);
    }

    #[test]
    fn test_surrounding_markup_preserved() {
        let source = "<span class=\"author\">\n  By John Wick\t</span>\n<a>John Wick</a>";
        let out = substitute_cyclic(source, "John Wick", &["Onyango Owino", "James Kariuki"])
            .unwrap();
        assert_eq!(
            out.text,
            "<span class=\"author\">\n  By Onyango Owino\t</span>\n<a>James Kariuki</a>"
        );
    }

    #[test]
    fn test_multibyte_text_preserved() {
        let source = "© John Wick — ñandú John Wick ✓";
        let out = substitute_cyclic(source, "John Wick", &["Amina", "Musa"]).unwrap();
        assert_eq!(out.text, "© Amina — ñandú Musa ✓");
    }

    #[test]
    fn test_occurrences_indexed_left_to_right() {
        let occurrences = find_occurrences("x.x..x", "x");
        let starts: Vec<usize> = occurrences.iter().map(|o| o.start).collect();
        let indices: Vec<usize> = occurrences.iter().map(|o| o.index).collect();
        assert_eq!(starts, vec![0, 2, 5]);
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(occurrences.iter().all(|o| o.end == o.start + 1));
    }

    #[test]
    fn test_occurrence_count_matches_insertions() {
        let source = "M and M and M";
        let found = find_occurrences(source, "M").len();
        let out = substitute_cyclic(source, "M", &["<1>", "<2>"]).unwrap();
        assert_eq!(out.occurrences_replaced, found);
        assert_eq!(out.text.matches('<').count(), found);
    }

    #[test]
    fn test_forward_and_reverse_application_agree() {
        let source = "By John Wick | John Wick | end John Wick";
        let names = ["Peter Mwangi", "Sarah", "Daniel Kamau Mutua"];
        let occurrences = find_occurrences(source, "John Wick");

        let forward = apply_occurrences(source, &occurrences, &names).unwrap();
        let reverse = apply_reversed(source, &occurrences, &names);

        assert_eq!(forward, reverse);
        assert_eq!(
            forward,
            "By Peter Mwangi | Sarah | end Daniel Kamau Mutua"
        );
    }

    #[test]
    fn test_deterministic() {
        let source = "John Wick, John Wick, John Wick";
        let names = vec!["A".to_string(), "B".to_string()];
        let first = substitute_cyclic(source, "John Wick", names.as_slice()).unwrap();
        let second = substitute_cyclic(source, "John Wick", names.as_slice()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_literal_copyright_swap() {
        let out = substitute_literal(
            "Copyright © 2022 All Rights Reserved.",
            "Copyright © 2022 All Rights Reserved.",
            "Copyright © 2026 Bankai Labs. All Rights Reserved",
        )
        .unwrap();
        assert_eq!(out.text, "Copyright © 2026 Bankai Labs. All Rights Reserved");
        assert!(out.changed);
    }

    #[test]
    fn test_literal_replaces_every_occurrence() {
        let out = substitute_literal("2022 and 2022", "2022", "2026").unwrap();
        assert_eq!(out.text, "2026 and 2026");
        assert!(out.changed);
    }

    #[test]
    fn test_literal_unchanged_when_absent() {
        let out = substitute_literal("<footer></footer>", "Copyright", "x").unwrap();
        assert_eq!(out.text, "<footer></footer>");
        assert!(!out.changed);
    }

    #[test]
    fn test_literal_empty_old_rejected() {
        assert!(substitute_literal("abc", "", "x").is_err());
    }
}
