// crates/om-core/src/suggest.rs - Ranked suggestions for missed lookups
//
// When a name matches nothing exactly, the CLI presents ranked candidates
// from both keyspaces instead of failing silently. Candidates are substring
// matches against the normalized query, ordered by fuzzy score.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::name;
use crate::store::StoreState;

/// Suggestion candidates, best match first within each keyspace.
#[derive(Debug, Default)]
pub struct Suggestions {
    pub repos: Vec<String>,
    pub collections: Vec<String>,
}

impl Suggestions {
    pub fn is_empty(&self) -> bool {
        self.repos.is_empty() && self.collections.is_empty()
    }
}

/// Rank both keyspaces against a query the user typed.
pub fn suggestions(state: &StoreState, query: &str) -> Suggestions {
    let needle = name::normalize(query);
    if needle.is_empty() {
        return Suggestions::default();
    }

    let matcher = SkimMatcherV2::default();
    Suggestions {
        repos: rank(&matcher, state.repos.keys(), &needle),
        collections: rank(&matcher, state.collections.keys(), &needle),
    }
}

fn rank<'a>(
    matcher: &SkimMatcherV2,
    candidates: impl Iterator<Item = &'a String>,
    needle: &str,
) -> Vec<String> {
    let mut scored: Vec<(i64, String)> = candidates
        .filter(|c| c.contains(needle))
        .map(|c| {
            let score = matcher.fuzzy_match(c, needle).unwrap_or(0);
            (score, c.clone())
        })
        .collect();
    // Highest score first, name as tiebreaker for stable output.
    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    scored.into_iter().map(|(_, c)| c).collect()
}
