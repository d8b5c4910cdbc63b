use std::collections::HashSet;

use super::lookups::StandardLookup;

/// Lookup keywords the host accepts in filter terms.
///
/// Starts out with the standard lookups. Plugins that add keywords must be
/// registered explicitly through [`KeywordRegistry::register`] before their
/// terms are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRegistry {
    keywords: HashSet<String>,
}

impl Default for KeywordRegistry {
    fn default() -> Self {
        Self {
            keywords: StandardLookup::ALL
                .iter()
                .map(|lookup| lookup.name().to_string())
                .collect(),
        }
    }
}

impl KeywordRegistry {
    /// Registry without any keyword.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            keywords: HashSet::new(),
        }
    }

    /// Extend the accepted keyword set. Registering a keyword twice is a no-op.
    pub fn register<I, S>(&mut self, keywords: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for keyword in keywords {
            let keyword = keyword.into();
            if !self.keywords.contains(&keyword) {
                tracing::debug!(keyword = %keyword, "registering lookup keyword");
                self.keywords.insert(keyword);
            }
        }
        self
    }

    #[must_use]
    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}
