use sea_orm::{
    DatabaseBackend,
    sea_query::{Expr, SimpleExpr},
};

use super::lookups::UnaccentLookup;
use crate::errors::FilterError;

/// Placeholder used by the catalog templates.
const TEMPLATE_SLOT: &str = "%s";

/// Database capabilities the fragment generator relies on.
pub trait ConnectionOps {
    /// Quote an identifier (table alias or column name).
    fn quote_name(&self, name: &str) -> String;

    /// Template (with a `%s` slot) applied to a column of the given database type
    /// before it is compared.
    fn field_cast_sql(&self, _db_type: Option<&str>) -> &'static str {
        TEMPLATE_SLOT
    }

    /// Escape the characters reserved by `LIKE` so the value matches literally.
    fn prep_for_like_query(&self, value: &str) -> String {
        escape_like_wildcards(value)
    }

    /// Placeholder for the single value bound by a fragment, in the syntax the
    /// backend's query builder substitutes.
    fn bind_placeholder(&self) -> &'static str {
        "?"
    }
}

impl ConnectionOps for DatabaseBackend {
    fn quote_name(&self, name: &str) -> String {
        match self {
            Self::MySql => format!("`{}`", name.replace('`', "``")),
            Self::Postgres | Self::Sqlite => format!("\"{}\"", name.replace('"', "\"\"")),
        }
    }

    fn field_cast_sql(&self, db_type: Option<&str>) -> &'static str {
        match (self, db_type) {
            (Self::Postgres, Some("inet" | "cidr")) => "HOST(%s)",
            _ => TEMPLATE_SLOT,
        }
    }

    fn bind_placeholder(&self) -> &'static str {
        match self {
            Self::Postgres => "$1",
            Self::MySql | Self::Sqlite => "?",
        }
    }
}

/// Escape `LIKE` wildcards with a backslash.
/// Backslash goes first so the escapes added for `%` and `_` survive.
#[must_use]
pub fn escape_like_wildcards(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// A parametrized SQL condition with exactly one bound value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFragment {
    lhs: String,
    operator: &'static str,
    placeholder: &'static str,
    param: String,
}

impl SqlFragment {
    /// Column side, e.g. `UPPER(unaccent("auth_user"."username"::text))`
    #[must_use]
    pub fn lhs(&self) -> &str {
        &self.lhs
    }

    /// Comparison template with a `%s` slot, e.g. `LIKE unaccent(%s)`
    #[must_use]
    pub const fn operator(&self) -> &'static str {
        self.operator
    }

    /// The value bound to the placeholder, already escaped and wildcarded.
    #[must_use]
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Full condition with the backend's placeholder (`$1` or `?`) for the parameter.
    #[must_use]
    pub fn sql(&self) -> String {
        format!(
            "{} {}",
            self.lhs,
            self.operator.replacen(TEMPLATE_SLOT, self.placeholder, 1)
        )
    }

    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.sql(), self.param)
    }

    /// Convert into a sea-query expression carrying the bound parameter.
    #[must_use]
    pub fn into_expr(self) -> SimpleExpr {
        let (sql, param) = self.into_parts();
        Expr::cust_with_values(sql, [param])
    }
}

/// Build the accent-insensitive condition for `column_sql`.
///
/// `column_sql` must already be quoted and cast by the caller; it is inserted
/// as-is into the lookup's column template. Wildcards for the `LIKE` families
/// are added after `ops` has escaped the value.
#[must_use]
pub fn generate(
    lookup: UnaccentLookup,
    column_sql: &str,
    value: &str,
    ops: &(impl ConnectionOps + ?Sized),
) -> SqlFragment {
    let family = lookup.family();
    let param = if family.uses_like() {
        family.wrap_pattern(&ops.prep_for_like_query(value))
    } else {
        value.to_string()
    };

    tracing::trace!(lookup = %lookup, column = %column_sql, "building unaccent fragment");

    SqlFragment {
        lhs: lookup.lhs_template().replacen(TEMPLATE_SLOT, column_sql, 1),
        operator: lookup.operator(),
        placeholder: ops.bind_placeholder(),
        param,
    }
}

/// Same as [`generate`] for a lookup known only by name.
///
/// # Errors
///
/// Returns [`FilterError::UnknownLookup`] when `lookup` is not a plain catalog
/// entry. Smart names must be classified first.
pub fn generate_by_name(
    lookup: &str,
    column_sql: &str,
    value: &str,
    ops: &(impl ConnectionOps + ?Sized),
) -> Result<SqlFragment, FilterError> {
    let resolved =
        UnaccentLookup::from_name(lookup).ok_or_else(|| FilterError::unknown_lookup(lookup))?;
    Ok(generate(resolved, column_sql, value, ops))
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMN: &str = "\"auth_user\".\"username\"";

    fn pg(lookup: UnaccentLookup, value: &str) -> SqlFragment {
        generate(lookup, COLUMN, value, &DatabaseBackend::Postgres)
    }

    #[test]
    fn test_exact_fragment() {
        let fragment = pg(UnaccentLookup::Unaccent, "Otaeku");
        assert_eq!(
            fragment.sql(),
            "unaccent(\"auth_user\".\"username\"::text) = unaccent($1)"
        );
        assert_eq!(fragment.param(), "Otaeku");
    }

    #[test]
    fn test_iexact_fragment_keeps_value_case() {
        let fragment = pg(UnaccentLookup::IUnaccent, "otaeku");
        assert_eq!(
            fragment.sql(),
            "UPPER(unaccent(\"auth_user\".\"username\"::text)) = UPPER(unaccent($1))"
        );
        assert_eq!(fragment.param(), "otaeku");
    }

    #[test]
    fn test_like_families_wrap_value() {
        assert_eq!(pg(UnaccentLookup::ContainsUnaccent, "tae").param(), "%tae%");
        assert_eq!(pg(UnaccentLookup::IContainsUnaccent, "tae").param(), "%tae%");
        assert_eq!(pg(UnaccentLookup::StartsWithUnaccent, "Ota").param(), "Ota%");
        assert_eq!(pg(UnaccentLookup::IStartsWithUnaccent, "Ota").param(), "Ota%");
        assert_eq!(pg(UnaccentLookup::EndsWithUnaccent, "eku").param(), "%eku");
        assert_eq!(pg(UnaccentLookup::IEndsWithUnaccent, "eku").param(), "%eku");

        let fragment = pg(UnaccentLookup::IContainsUnaccent, "tae");
        assert_eq!(
            fragment.sql(),
            "UPPER(unaccent(\"auth_user\".\"username\"::text)) LIKE UPPER(unaccent($1))"
        );
    }

    #[test]
    fn test_escaping_happens_before_wildcards() {
        assert_eq!(pg(UnaccentLookup::ContainsUnaccent, "100%").param(), "%100\\%%");
        assert_eq!(pg(UnaccentLookup::StartsWithUnaccent, "a_b").param(), "a\\_b%");
        assert_eq!(pg(UnaccentLookup::EndsWithUnaccent, "c:\\").param(), "%c:\\\\");
        // equality does not go through LIKE and stays literal
        assert_eq!(pg(UnaccentLookup::Unaccent, "100%").param(), "100%");
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(pg(UnaccentLookup::ContainsUnaccent, "").param(), "%%");
        assert_eq!(pg(UnaccentLookup::StartsWithUnaccent, "").param(), "%");
        assert_eq!(pg(UnaccentLookup::Unaccent, "").param(), "");
    }

    #[test]
    fn test_generate_by_name() {
        let fragment = generate_by_name("endswith_unaccent", COLUMN, "ku", &DatabaseBackend::Postgres)
            .expect("catalog lookup");
        assert_eq!(fragment.param(), "%ku");

        let err = generate_by_name("unaccent_smart", COLUMN, "ku", &DatabaseBackend::Postgres)
            .expect_err("smart names are not catalog entries");
        assert_eq!(err, FilterError::unknown_lookup("unaccent_smart"));

        assert!(generate_by_name("exact", COLUMN, "ku", &DatabaseBackend::Postgres).is_err());
    }

    #[test]
    fn test_quote_name() {
        assert_eq!(DatabaseBackend::Postgres.quote_name("user"), "\"user\"");
        assert_eq!(DatabaseBackend::Postgres.quote_name("a\"b"), "\"a\"\"b\"");
        assert_eq!(DatabaseBackend::MySql.quote_name("user"), "`user`");
    }

    #[test]
    fn test_field_cast_sql() {
        let pg = DatabaseBackend::Postgres;
        assert_eq!(pg.field_cast_sql(Some("inet")), "HOST(%s)");
        assert_eq!(pg.field_cast_sql(Some("varchar(150)")), "%s");
        assert_eq!(pg.field_cast_sql(None), "%s");
        assert_eq!(DatabaseBackend::Sqlite.field_cast_sql(Some("inet")), "%s");
    }

    #[test]
    fn test_into_expr_binds_single_value() {
        let expr = pg(UnaccentLookup::IUnaccent, "Otaeku").into_expr();
        let debug = format!("{expr:?}");
        assert!(debug.contains("UPPER(unaccent($1))"), "{debug}");
        assert!(debug.contains("Otaeku"), "{debug}");
    }

    #[test]
    fn test_placeholder_follows_backend() {
        let fragment = generate(UnaccentLookup::Unaccent, "`username`", "Otaeku", &DatabaseBackend::MySql);
        assert_eq!(fragment.sql(), "unaccent(`username`::text) = unaccent(?)");
        assert_eq!(pg(UnaccentLookup::Unaccent, "Otaeku").sql().matches("$1").count(), 1);
    }

    #[test]
    fn test_into_expr_binds_one_value_under_postgres() {
        use sea_orm::sea_query::{Alias, Asterisk, PostgresQueryBuilder, Query};

        for lookup in UnaccentLookup::ALL {
            let (sql, values) = Query::select()
                .column(Asterisk)
                .from(Alias::new("auth_user"))
                .and_where(pg(lookup, "Ôtâèkù").into_expr())
                .build(PostgresQueryBuilder);
            assert_eq!(values.0.len(), 1, "{lookup}: {sql}");
            assert!(sql.contains("unaccent($1)"), "{lookup}: {sql}");
            assert!(!sql.contains('?'), "{lookup}: {sql}");
        }
    }
}
