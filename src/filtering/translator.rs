//! Translation plugins consulted by [`FilterBuilder`](super::conditions::FilterBuilder)
//! before it falls back to the standard lookups.

use std::fmt;

use super::classifier::{Classification, classify};
use super::column::ColumnRef;
use super::fragment::{ConnectionOps, SqlFragment, generate};
use super::lookups::{StandardLookup, UnaccentLookup};

/// A single `(column, lookup, value)` filter request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTerm {
    pub column: ColumnRef,
    pub lookup: String,
    pub value: String,
}

impl FilterTerm {
    pub fn new(column: ColumnRef, lookup: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column,
            lookup: lookup.into(),
            value: value.into(),
        }
    }
}

/// What a translator decided to do with a term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// Not handled here; try the next translator or the default handler.
    Passthrough,
    /// Handle the term with this standard lookup instead of the requested one.
    Fallback(StandardLookup),
    /// Ready-to-embed condition.
    Fragment(SqlFragment),
}

pub trait LookupTranslator: fmt::Debug + Send + Sync {
    /// Keywords this translator understands. The host must register them.
    fn keywords(&self) -> Vec<&'static str>;

    fn translate(&self, term: &FilterTerm, ops: &dyn ConnectionOps) -> Translation;
}

/// Translator for the `*unaccent` and `*unaccent_smart` lookups.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnaccentTranslator;

impl LookupTranslator for UnaccentTranslator {
    fn keywords(&self) -> Vec<&'static str> {
        UnaccentLookup::keywords().collect()
    }

    fn translate(&self, term: &FilterTerm, ops: &dyn ConnectionOps) -> Translation {
        match classify(&term.lookup, &term.value) {
            Classification::Passthrough(_) => Translation::Passthrough,
            Classification::Fallback(lookup) => Translation::Fallback(lookup),
            Classification::Unaccent(lookup) => {
                let column_sql = term.column.to_sql(ops);
                Translation::Fragment(generate(lookup, &column_sql, &term.value, ops))
            }
        }
    }
}
