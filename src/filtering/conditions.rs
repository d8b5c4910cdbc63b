use sea_orm::{
    Condition, DatabaseBackend,
    sea_query::{BinOper, Expr, Func, SimpleExpr},
};

use super::column::ColumnRef;
use super::fragment::ConnectionOps;
use super::lookups::{StandardLookup, UnaccentLookup};
use super::registry::KeywordRegistry;
use super::translator::{FilterTerm, LookupTranslator, Translation, UnaccentTranslator};
use crate::errors::FilterError;

/// Separates the field from the lookup in filter keys (`username__iunaccent`).
pub const LOOKUP_SEPARATOR: &str = "__";

// Basic safety limit
const MAX_FIELD_VALUE_LENGTH: usize = 10_000;

/// Turns filter terms into Sea-ORM conditions.
///
/// Translators are tried in the order they were added; the first one that
/// does not pass a term through decides how it is rendered. Terms nobody
/// claims are handled as standard lookups.
#[derive(Debug)]
pub struct FilterBuilder {
    backend: DatabaseBackend,
    keywords: KeywordRegistry,
    translators: Vec<Box<dyn LookupTranslator>>,
}

impl FilterBuilder {
    /// Builder that only understands the standard lookups.
    #[must_use]
    pub fn new(backend: DatabaseBackend) -> Self {
        Self {
            backend,
            keywords: KeywordRegistry::default(),
            translators: Vec::new(),
        }
    }

    /// Builder with the unaccent lookups registered and their translator installed.
    #[must_use]
    pub fn with_unaccent(backend: DatabaseBackend) -> Self {
        let mut builder = Self::new(backend);
        builder.register_keywords(UnaccentLookup::keywords());
        builder.with_translator(UnaccentTranslator)
    }

    /// Accept additional lookup keywords in filter terms.
    pub fn register_keywords<I, S>(&mut self, keywords: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.register(keywords);
        self
    }

    /// Append a translator. Its keywords still have to be registered.
    #[must_use]
    pub fn with_translator(mut self, translator: impl LookupTranslator + 'static) -> Self {
        self.translators.push(Box::new(translator));
        self
    }

    #[must_use]
    pub const fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    #[must_use]
    pub const fn keywords(&self) -> &KeywordRegistry {
        &self.keywords
    }

    /// Build the condition for one term.
    ///
    /// # Errors
    ///
    /// - [`FilterError::UnregisteredLookup`] if the keyword was never registered
    /// - [`FilterError::UnknownLookup`] if a registered keyword has no handler
    pub fn build_term(&self, term: &FilterTerm) -> Result<SimpleExpr, FilterError> {
        if !self.keywords.contains(&term.lookup) {
            return Err(FilterError::unregistered_lookup(&term.lookup));
        }

        let ops: &dyn ConnectionOps = &self.backend;
        for translator in &self.translators {
            match translator.translate(term, ops) {
                Translation::Passthrough => {}
                Translation::Fallback(lookup) => {
                    return Ok(standard_condition(lookup, &term.column, &term.value, ops));
                }
                Translation::Fragment(fragment) => return Ok(fragment.into_expr()),
            }
        }

        let lookup = StandardLookup::from_name(&term.lookup)
            .ok_or_else(|| FilterError::unknown_lookup(&term.lookup))?;
        Ok(standard_condition(lookup, &term.column, &term.value, ops))
    }

    /// Conjunction of all terms (`AND`).
    ///
    /// # Errors
    ///
    /// Fails on the first term [`Self::build_term`] rejects.
    pub fn all<'a>(
        &self,
        terms: impl IntoIterator<Item = &'a FilterTerm>,
    ) -> Result<Condition, FilterError> {
        terms
            .into_iter()
            .try_fold(Condition::all(), |condition, term| {
                Ok(condition.add(self.build_term(term)?))
            })
    }

    /// Disjunction of all terms (`OR`).
    ///
    /// # Errors
    ///
    /// Fails on the first term [`Self::build_term`] rejects.
    pub fn any<'a>(
        &self,
        terms: impl IntoIterator<Item = &'a FilterTerm>,
    ) -> Result<Condition, FilterError> {
        terms
            .into_iter()
            .try_fold(Condition::any(), |condition, term| {
                Ok(condition.add(self.build_term(term)?))
            })
    }
}

/// Accent-sensitive condition for a standard lookup.
///
/// Case-insensitive lookups apply SQL `UPPER()` to both the column and the
/// bound value, so both sides are folded by the database's case rules.
/// `LIKE` patterns are escaped before the wildcards are added.
#[must_use]
pub fn standard_condition(
    lookup: StandardLookup,
    column: &ColumnRef,
    value: &str,
    ops: &(impl ConnectionOps + ?Sized),
) -> SimpleExpr {
    let case_insensitive = lookup.is_case_insensitive();
    let fold_case = |expr: SimpleExpr| {
        if case_insensitive {
            SimpleExpr::from(Func::upper(expr))
        } else {
            expr
        }
    };

    let target = fold_case(column.expr().into());
    let family = lookup.family();
    if family.uses_like() {
        let pattern = family.wrap_pattern(&ops.prep_for_like_query(value));
        let pattern = SimpleExpr::Binary(
            Box::new(fold_case(Expr::val(pattern).into())),
            BinOper::Escape,
            Box::new(SimpleExpr::Constant('\\'.into())),
        );
        target.binary(BinOper::Like, pattern)
    } else {
        target.eq(fold_case(Expr::val(value).into()))
    }
}

fn parse_filter_json(
    filter: &str,
) -> Result<serde_json::Map<String, serde_json::Value>, FilterError> {
    serde_json::from_str(filter).map_err(|e| {
        tracing::warn!(error = %e, "Invalid JSON in filter string");
        FilterError::invalid_filter("Filter must be a JSON object")
    })
}

/// Split `username__icontains_unaccent` into `("username", "icontains_unaccent")`.
/// A key without a lookup means `exact`.
#[must_use]
pub fn split_filter_key(key: &str) -> (&str, &str) {
    key.split_once(LOOKUP_SEPARATOR)
        .unwrap_or((key, StandardLookup::Exact.name()))
}

fn filter_value(key: &str, value: &serde_json::Value) -> Result<String, FilterError> {
    let text = match value {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Number(number) => number.to_string(),
        serde_json::Value::Bool(flag) => flag.to_string(),
        _ => {
            return Err(FilterError::invalid_filter(format!(
                "Unsupported value for '{key}'"
            )));
        }
    };

    if text.len() > MAX_FIELD_VALUE_LENGTH {
        return Err(FilterError::invalid_filter(format!(
            "Value for '{key}' is too long"
        )));
    }
    Ok(text)
}

/// Build a conjunctive condition from a JSON filter string such as
/// `{"username__unaccent_smart": "Otaeku"}`.
///
/// Fields missing from `columns` are ignored.
///
/// # Errors
///
/// Returns [`FilterError::InvalidFilter`] for malformed JSON or non-scalar
/// values, and whatever [`FilterBuilder::build_term`] reports for the lookups.
pub fn apply_filters(
    filter_str: Option<&str>,
    columns: &[(&str, ColumnRef)],
    builder: &FilterBuilder,
) -> Result<Condition, FilterError> {
    let Some(filter_str) = filter_str else {
        return Ok(Condition::all());
    };

    let mut terms = Vec::new();
    for (key, value) in &parse_filter_json(filter_str)? {
        let (field, lookup) = split_filter_key(key);
        let Some((_, column)) = columns.iter().find(|(name, _)| *name == field) else {
            tracing::debug!(field = %field, "Skipping filter on unknown field");
            continue;
        };
        terms.push(FilterTerm::new(column.clone(), lookup, filter_value(key, value)?));
    }

    builder.all(&terms)
}
