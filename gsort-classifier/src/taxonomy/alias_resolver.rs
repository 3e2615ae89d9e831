//! Alias Resolver
//!
//! Maps loose genre/tag strings (metadata tags, provider genres, AI tags) onto a
//! canonical taxonomy bucket.
//!
//! # Policy
//! 1. Exact match against the alias table
//! 2. Substring fallback: walk the table in registration order and return the
//!    first alias that contains the input or is contained by it
//!
//! The fallback is order-dependent: the first registered overlap wins, not the
//! longest or closest one.

use std::collections::HashMap;
use tracing::trace;

/// Ordered alias → genre table with an exact-match index
#[derive(Debug, Clone, Default)]
pub struct AliasResolver {
    /// (lowercased alias, genre) in registration order
    table: Vec<(String, String)>,
    /// alias → index into `table`; first registration wins
    exact: HashMap<String, usize>,
}

impl AliasResolver {
    pub fn new(table: Vec<(String, String)>) -> Self {
        let mut exact = HashMap::with_capacity(table.len());
        for (index, (alias, _)) in table.iter().enumerate() {
            exact.entry(alias.clone()).or_insert(index);
        }
        Self { table, exact }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Resolve `input` to a canonical genre.
    ///
    /// Blank input never resolves.
    pub fn resolve(&self, input: &str) -> Option<&str> {
        let lowered = input.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }

        if let Some(&index) = self.exact.get(&lowered) {
            return Some(self.table[index].1.as_str());
        }

        let hit = self
            .table
            .iter()
            .find(|(alias, _)| lowered.contains(alias.as_str()) || alias.contains(lowered.as_str()));

        if let Some((alias, genre)) = hit {
            trace!(input = %lowered, alias = %alias, genre = %genre, "Alias matched by substring");
        }
        hit.map(|(_, genre)| genre.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Taxonomy;

    fn resolver(pairs: &[(&str, &str)]) -> AliasResolver {
        AliasResolver::new(
            pairs
                .iter()
                .map(|(a, g)| (a.to_string(), g.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_exact_match() {
        let taxonomy = Taxonomy::builtin();
        assert_eq!(taxonomy.aliases().resolve("psytrance"), Some("trance"));
        assert_eq!(taxonomy.aliases().resolve("DNB"), Some("drum_and_bass"));
    }

    #[test]
    fn test_exact_match_beats_earlier_substring() {
        // The substring walk alone would stop at "club rave"
        let r = resolver(&[("club rave", "a"), ("rave", "b")]);
        assert_eq!(r.resolve("rave"), Some("b"));
    }

    #[test]
    fn test_first_registered_overlap_wins() {
        let r = resolver(&[("deep bass", "first"), ("deep bass music", "second")]);
        // "deep" is contained in both aliases
        assert_eq!(r.resolve("deep"), Some("first"));

        let swapped = resolver(&[("deep bass music", "second"), ("deep bass", "first")]);
        assert_eq!(swapped.resolve("deep"), Some("second"));
    }

    #[test]
    fn test_input_containing_alias() {
        let taxonomy = Taxonomy::builtin();
        assert_eq!(
            taxonomy.aliases().resolve("dark liquid dnb"),
            Some("drum_and_bass")
        );
        assert_eq!(taxonomy.aliases().resolve("minimal deep house"), Some("house"));
    }

    #[test]
    fn test_builtin_ambient_hits_industrial_alias() {
        // No alias is exactly "ambient"; the first overlap is "industrial ambient"
        let taxonomy = Taxonomy::builtin();
        assert_eq!(taxonomy.aliases().resolve("ambient"), Some("industrial"));
    }

    #[test]
    fn test_no_match() {
        let taxonomy = Taxonomy::builtin();
        assert_eq!(taxonomy.aliases().resolve("polka"), None);
        assert_eq!(taxonomy.aliases().resolve(""), None);
        assert_eq!(taxonomy.aliases().resolve("   "), None);
    }

    #[test]
    fn test_duplicate_alias_first_registration_wins() {
        let r = resolver(&[("acid", "acid_techno"), ("acid", "acid_house")]);
        assert_eq!(r.resolve("acid"), Some("acid_techno"));
        assert_eq!(r.len(), 2);
    }
}
