//! Fuzzy filtering of option labels using nucleo-matcher.

use std::fmt;

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32String};

/// A label that matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterMatch {
    /// Index of the option in the registry.
    pub index: usize,
    /// Match score (higher is better).
    pub score: u32,
}

/// Reusable matcher over a fixed set of labels.
///
/// Labels are converted to matcher strings once, so a searchable dropdown
/// only pays for scoring on each keystroke.
pub struct LabelFilter {
    matcher: Matcher,
    haystacks: Vec<Utf32String>,
}

impl fmt::Debug for LabelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelFilter")
            .field("labels", &self.haystacks.len())
            .finish()
    }
}

impl LabelFilter {
    pub fn new<S: AsRef<str>>(labels: impl IntoIterator<Item = S>) -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            haystacks: labels
                .into_iter()
                .map(|label| Utf32String::from(label.as_ref()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.haystacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.haystacks.is_empty()
    }

    /// Match `query` against every label.
    ///
    /// An empty query keeps every label in registry order with score 0.
    /// Otherwise matches are sorted by score, best first; equal scores keep
    /// registry order.
    pub fn filter(&mut self, query: &str) -> Vec<FilterMatch> {
        if query.is_empty() {
            return (0..self.haystacks.len())
                .map(|index| FilterMatch { index, score: 0 })
                .collect();
        }

        let pattern = Pattern::new(
            query,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );
        let matcher = &mut self.matcher;
        let mut matches: Vec<FilterMatch> = self
            .haystacks
            .iter()
            .enumerate()
            .filter_map(|(index, haystack)| {
                pattern
                    .score(haystack.slice(..), matcher)
                    .map(|score| FilterMatch { index, score })
            })
            .collect();

        // sort_by is stable
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches
    }
}

/// One-shot [`LabelFilter::filter`] over `labels`.
pub fn fuzzy_filter(query: &str, labels: &[String]) -> Vec<FilterMatch> {
    LabelFilter::new(labels).filter(query)
}
