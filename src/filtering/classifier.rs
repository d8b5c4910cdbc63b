use super::fold::has_non_ascii_content;
use super::lookups::{StandardLookup, UnaccentLookup};

/// Outcome of classifying a requested lookup against a search value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    /// Not an accent-aware lookup; the host handles the keyword as usual.
    Passthrough(&'a str),
    /// A smart lookup saw an accented search term and demoted itself.
    Fallback(StandardLookup),
    /// Accent folding applies with the resolved plain lookup.
    Unaccent(UnaccentLookup),
}

impl<'a> Classification<'a> {
    /// `(is_accent_aware, resolved_lookup_name)`
    #[must_use]
    pub fn into_parts(self) -> (bool, &'a str) {
        match self {
            Self::Passthrough(name) => (false, name),
            Self::Fallback(lookup) => (false, lookup.name()),
            Self::Unaccent(lookup) => (true, lookup.name()),
        }
    }

    #[must_use]
    pub const fn is_accent_aware(&self) -> bool {
        matches!(self, Self::Unaccent(_))
    }
}

/// Decide how a lookup keyword should be handled for a given search value.
///
/// Plain unaccent lookups always fold accents. Smart lookups fold accents only
/// when the search value is plain ASCII; otherwise the caller asked for a
/// specific spelling and the standard lookup is returned instead.
///
/// ```rust
/// use crudcrate_unaccent::filtering::classify;
///
/// assert_eq!(classify("unaccent_smart", "Otaeku").into_parts(), (true, "unaccent"));
/// assert_eq!(classify("unaccent_smart", "Ôtâèkù").into_parts(), (false, "exact"));
/// ```
#[must_use]
pub fn classify<'a>(lookup: &'a str, value: &str) -> Classification<'a> {
    if let Some(plain) = UnaccentLookup::from_name(lookup) {
        return Classification::Unaccent(plain);
    }

    let Some(smart) = UnaccentLookup::from_smart_name(lookup) else {
        return Classification::Passthrough(lookup);
    };

    if has_non_ascii_content(value) {
        tracing::debug!(
            lookup = %lookup,
            fallback = %smart.fallback(),
            "accented search term, demoting smart lookup"
        );
        Classification::Fallback(smart.fallback())
    } else {
        Classification::Unaccent(smart)
    }
}
