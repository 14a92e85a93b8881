use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32String};

use crate::definition::CommandDefinition;

/// Fuzzy "did you mean" ranking of definitions against free text.
pub struct FuzzyRanker {
    matcher: Matcher,
}

impl Default for FuzzyRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyRanker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
        }
    }

    /// Scores each definition by its best-matching name or example.
    /// Returns `(index, score)` sorted by score descending, scores normalized to 0-1.
    pub fn rank<'a>(
        &mut self,
        query: &str,
        definitions: impl IntoIterator<Item = &'a CommandDefinition>,
        limit: usize,
    ) -> Vec<(usize, f32)> {
        let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);

        let mut scored: Vec<(usize, u32)> = definitions
            .into_iter()
            .enumerate()
            .filter_map(|(idx, definition)| {
                let best = std::iter::once(definition.name())
                    .chain(definition.examples().iter().copied())
                    .filter_map(|candidate| {
                        let haystack = Utf32String::from(candidate);
                        pattern.score(haystack.slice(..), &mut self.matcher)
                    })
                    .max()?;
                Some((idx, best))
            })
            .collect();

        // Stable sort keeps catalog order among equal scores.
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(limit);

        let max_score = scored.first().map_or(1.0, |(_, s)| *s as f32);
        scored
            .into_iter()
            .map(|(idx, score)| {
                let normalized = if max_score > 0.0 {
                    score as f32 / max_score
                } else {
                    0.0
                };
                (idx, normalized)
            })
            .collect()
    }
}
