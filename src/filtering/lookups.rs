//! Catalog of accent-insensitive lookups.
//!
//! Every lookup carries its SQL templates, its `_smart` keyword and the standard
//! lookup it falls back to as data on the enum, so adding a variant forces all
//! three mappings to be updated together.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Suffix appended to a lookup name to obtain its smart variant.
pub const SMART_SUFFIX: &str = "_smart";

/// Name of the database-side normalization function.
pub const UNACCENT_FUNCTION: &str = "unaccent";

/// Shape of the right-hand pattern for a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupFamily {
    /// Full equality (`=`)
    Exact,
    /// `%value%`
    Contains,
    /// `value%`
    StartsWith,
    /// `%value`
    EndsWith,
}

impl LookupFamily {
    /// Wrap an already escaped value with the wildcards of this family.
    ///
    /// Equality lookups get the value back untouched.
    #[must_use]
    pub fn wrap_pattern(self, escaped: &str) -> String {
        match self {
            Self::Exact => escaped.to_string(),
            Self::Contains => format!("%{escaped}%"),
            Self::StartsWith => format!("{escaped}%"),
            Self::EndsWith => format!("%{escaped}"),
        }
    }

    #[must_use]
    pub const fn uses_like(self) -> bool {
        !matches!(self, Self::Exact)
    }
}

/// Standard (accent-sensitive) lookups that smart lookups demote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardLookup {
    Exact,
    IExact,
    Contains,
    IContains,
    StartsWith,
    IStartsWith,
    EndsWith,
    IEndsWith,
}

impl StandardLookup {
    pub const ALL: [Self; 8] = [
        Self::Exact,
        Self::IExact,
        Self::Contains,
        Self::IContains,
        Self::StartsWith,
        Self::IStartsWith,
        Self::EndsWith,
        Self::IEndsWith,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::IExact => "iexact",
            Self::Contains => "contains",
            Self::IContains => "icontains",
            Self::StartsWith => "startswith",
            Self::IStartsWith => "istartswith",
            Self::EndsWith => "endswith",
            Self::IEndsWith => "iendswith",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lookup| lookup.name() == name)
    }

    #[must_use]
    pub const fn family(self) -> LookupFamily {
        match self {
            Self::Exact | Self::IExact => LookupFamily::Exact,
            Self::Contains | Self::IContains => LookupFamily::Contains,
            Self::StartsWith | Self::IStartsWith => LookupFamily::StartsWith,
            Self::EndsWith | Self::IEndsWith => LookupFamily::EndsWith,
        }
    }

    #[must_use]
    pub const fn is_case_insensitive(self) -> bool {
        matches!(
            self,
            Self::IExact | Self::IContains | Self::IStartsWith | Self::IEndsWith
        )
    }
}

/// Accent-insensitive lookups understood by the unaccent translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaccentLookup {
    Unaccent,
    IUnaccent,
    ContainsUnaccent,
    IContainsUnaccent,
    StartsWithUnaccent,
    IStartsWithUnaccent,
    EndsWithUnaccent,
    IEndsWithUnaccent,
}

impl UnaccentLookup {
    pub const ALL: [Self; 8] = [
        Self::Unaccent,
        Self::IUnaccent,
        Self::ContainsUnaccent,
        Self::IContainsUnaccent,
        Self::StartsWithUnaccent,
        Self::IStartsWithUnaccent,
        Self::EndsWithUnaccent,
        Self::IEndsWithUnaccent,
    ];

    /// Keyword used in filter requests, e.g. `icontains_unaccent`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unaccent => "unaccent",
            Self::IUnaccent => "iunaccent",
            Self::ContainsUnaccent => "contains_unaccent",
            Self::IContainsUnaccent => "icontains_unaccent",
            Self::StartsWithUnaccent => "startswith_unaccent",
            Self::IStartsWithUnaccent => "istartswith_unaccent",
            Self::EndsWithUnaccent => "endswith_unaccent",
            Self::IEndsWithUnaccent => "iendswith_unaccent",
        }
    }

    /// Keyword of the smart variant: [`Self::name`] followed by [`SMART_SUFFIX`].
    #[must_use]
    pub const fn smart_name(self) -> &'static str {
        match self {
            Self::Unaccent => "unaccent_smart",
            Self::IUnaccent => "iunaccent_smart",
            Self::ContainsUnaccent => "contains_unaccent_smart",
            Self::IContainsUnaccent => "icontains_unaccent_smart",
            Self::StartsWithUnaccent => "startswith_unaccent_smart",
            Self::IStartsWithUnaccent => "istartswith_unaccent_smart",
            Self::EndsWithUnaccent => "endswith_unaccent_smart",
            Self::IEndsWithUnaccent => "iendswith_unaccent_smart",
        }
    }

    /// Standard lookup used when a smart lookup sees an accented search term.
    #[must_use]
    pub const fn fallback(self) -> StandardLookup {
        match self {
            Self::Unaccent => StandardLookup::Exact,
            Self::IUnaccent => StandardLookup::IExact,
            Self::ContainsUnaccent => StandardLookup::Contains,
            Self::IContainsUnaccent => StandardLookup::IContains,
            Self::StartsWithUnaccent => StandardLookup::StartsWith,
            Self::IStartsWithUnaccent => StandardLookup::IStartsWith,
            Self::EndsWithUnaccent => StandardLookup::EndsWith,
            Self::IEndsWithUnaccent => StandardLookup::IEndsWith,
        }
    }

    #[must_use]
    pub const fn family(self) -> LookupFamily {
        self.fallback().family()
    }

    #[must_use]
    pub const fn is_case_insensitive(self) -> bool {
        self.fallback().is_case_insensitive()
    }

    /// Comparison template applied to the bound parameter (`%s`).
    #[must_use]
    pub const fn operator(self) -> &'static str {
        match (self.family(), self.is_case_insensitive()) {
            (LookupFamily::Exact, false) => "= unaccent(%s)",
            (LookupFamily::Exact, true) => "= UPPER(unaccent(%s))",
            (_, false) => "LIKE unaccent(%s)",
            (_, true) => "LIKE UPPER(unaccent(%s))",
        }
    }

    /// Template wrapping the column expression (`%s`).
    #[must_use]
    pub const fn lhs_template(self) -> &'static str {
        if self.is_case_insensitive() {
            "UPPER(unaccent(%s::text))"
        } else {
            "unaccent(%s::text)"
        }
    }

    /// Resolve a plain keyword such as `iunaccent`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match CATALOG_INDEX.get(name) {
            Some(&(lookup, false)) => Some(lookup),
            _ => None,
        }
    }

    /// Resolve a smart keyword such as `iunaccent_smart`.
    #[must_use]
    pub fn from_smart_name(name: &str) -> Option<Self> {
        match CATALOG_INDEX.get(name) {
            Some(&(lookup, true)) => Some(lookup),
            _ => None,
        }
    }

    /// All plain and smart keywords, for registration with a host.
    pub fn keywords() -> impl Iterator<Item = &'static str> {
        Self::ALL
            .into_iter()
            .flat_map(|lookup| [lookup.name(), lookup.smart_name()])
    }
}

impl std::fmt::Display for UnaccentLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::fmt::Display for StandardLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// keyword -> (lookup, is_smart); built once, read-only afterwards
static CATALOG_INDEX: LazyLock<HashMap<&'static str, (UnaccentLookup, bool)>> =
    LazyLock::new(|| {
        UnaccentLookup::ALL
            .into_iter()
            .flat_map(|lookup| [(lookup.name(), (lookup, false)), (lookup.smart_name(), (lookup, true))])
            .collect()
    });
