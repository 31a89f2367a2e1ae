use strsim::normalized_levenshtein;

pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Approximate substring matcher over a record's searchable fields.
/// A score of 0.0 is an exact hit and 1.0 a complete mismatch; hits must score at most `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    threshold: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self { Self { threshold: DEFAULT_THRESHOLD } }
}

impl FuzzyMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold: threshold.clamp(0.0, 1.0) }
    }

    #[inline] pub fn threshold(&self) -> f64 { self.threshold }

    /// Best score of `query` against any field, or `None` if no field is within the threshold.
    /// An empty query matches everything with score 0.0.
    pub fn score<'a, I>(&self, query: &str, fields: I) -> Option<f64>
    where I: IntoIterator<Item = &'a str> {
        let query = normalize(query);
        if query.is_empty() { return Some(0.0) }

        fields.into_iter()
            .filter_map(|field| window_score(&query, &normalize(field)))
            .filter(|score| *score <= self.threshold)
            .min_by(f64::total_cmp)
    }

    #[inline]
    pub fn is_match<'a, I>(&self, query: &str, fields: I) -> bool
    where I: IntoIterator<Item = &'a str> {
        self.score(query, fields).is_some()
    }
}

/// Lowercase and keep only alphanumeric characters, so "Wi-Fi" and "wifi" compare equal.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Smallest edit distance (normalized) between `query` and any query-length window of `field`.
fn window_score(query: &str, field: &str) -> Option<f64> {
    if field.is_empty() { return None }
    if field.contains(query) { return Some(0.0) }

    let field: Vec<char> = field.chars().collect();
    let width = query.chars().count();
    if field.len() <= width {
        let field: String = field.iter().collect();
        return Some(1.0 - normalized_levenshtein(query, &field));
    }

    field.windows(width)
        .map(|window| {
            let window: String = window.iter().collect();
            1.0 - normalized_levenshtein(query, &window)
        })
        .min_by(f64::total_cmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_and_case_are_ignored() {
        let m = FuzzyMatcher::default();
        assert_eq!(m.score("wifi", ["free Wi-Fi access"]), Some(0.0));
    }

    #[test]
    fn small_typo_matches() {
        let m = FuzzyMatcher::default();
        let score = m.score("librery", ["Wake County Public Library"]).unwrap();
        assert!(score > 0.0 && score <= DEFAULT_THRESHOLD);
    }

    #[test]
    fn unrelated_text_does_not_match() {
        let m = FuzzyMatcher::default();
        assert!(!m.is_match("broadband", ["Food pantry", "Durham"]));
    }

    #[test]
    fn best_field_wins() {
        let m = FuzzyMatcher::default();
        assert_eq!(m.score("durham", ["Nothing here", "Durham"]), Some(0.0));
    }

    #[test]
    fn empty_query_matches_everything() {
        let m = FuzzyMatcher::default();
        assert_eq!(m.score("  ", ["anything"]), Some(0.0));
        assert_eq!(m.score("", Vec::<&str>::new()), Some(0.0));
    }

    #[test]
    fn zero_threshold_needs_exact_substring() {
        let m = FuzzyMatcher::new(0.0);
        assert!(m.is_match("raleigh", ["Downtown Raleigh"]));
        assert!(!m.is_match("raleig", ["Downtown Ralegh"]));
    }
}
