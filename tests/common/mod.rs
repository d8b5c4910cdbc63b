#![allow(dead_code)]

use crudcrate_unaccent::filtering::{ColumnRef, FilterBuilder, FilterTerm, fold, split_filter_key};
use sea_orm::{
    Condition, DatabaseBackend,
    sea_query::{Alias, Asterisk, PostgresQueryBuilder, Query, Value},
};

pub mod user_entity;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn username_column() -> ColumnRef {
    ColumnRef::from_column(user_entity::Column::Username)
}

pub fn unaccent_builder() -> FilterBuilder {
    FilterBuilder::with_unaccent(DatabaseBackend::Postgres)
}

/// Build a term from a `field__lookup` key against the `username` column.
pub fn term(key: &str, value: &str) -> FilterTerm {
    let (_, lookup) = split_filter_key(key);
    FilterTerm::new(username_column(), lookup, value)
}

/// Render a condition into the WHERE clause of a Postgres query, values inlined.
pub fn render(condition: Condition) -> String {
    Query::select()
        .column(Asterisk)
        .from(Alias::new("auth_user"))
        .cond_where(condition)
        .to_string(PostgresQueryBuilder)
}

/// Build a single-term condition with Postgres placeholders; returns the
/// WHERE clause and the bound values.
pub fn build_where(term: &FilterTerm) -> (String, Vec<Value>) {
    let condition = unaccent_builder().all([term]).expect("registered lookup");
    let (sql, values) = Query::select()
        .column(Asterisk)
        .from(Alias::new("auth_user"))
        .cond_where(condition)
        .build(PostgresQueryBuilder);
    let clause = sql
        .split_once(" WHERE ")
        .map(|(_, clause)| clause.to_string())
        .unwrap_or_default();
    (clause, values.0)
}

/// In-memory stand-in for a Postgres table with a single text column.
///
/// Evaluates the SQL and the bound value emitted for a term. `unaccent()` is
/// emulated with `fold`, which agrees with the database extension on the
/// Latin characters used by these tests; `UPPER()` uppercases per character
/// the way Postgres does.
pub struct UserTable {
    usernames: Vec<String>,
}

impl UserTable {
    pub fn with_usernames(usernames: &[&str]) -> Self {
        Self {
            usernames: usernames.iter().map(ToString::to_string).collect(),
        }
    }

    /// Whether any row satisfies the term.
    pub fn exists(&self, term: &FilterTerm) -> bool {
        let (clause, values) = build_where(term);
        assert_eq!(values.len(), 1, "exactly one bound value: {clause}");
        let Value::String(Some(param)) = &values[0] else {
            panic!("expected a string parameter, got {:?}", values[0]);
        };

        let (lhs, operator, rhs) = match clause.split_once(" LIKE ") {
            Some((lhs, rhs)) => (lhs, Operator::Like, rhs),
            None => {
                let (lhs, rhs) = clause
                    .split_once(" = ")
                    .unwrap_or_else(|| panic!("unsupported clause: {clause}"));
                (lhs, Operator::Equal, rhs)
            }
        };
        let rhs = rhs.split_once(" ESCAPE ").map_or(rhs, |(rhs, _)| rhs);
        assert!(lhs.contains(r#""username""#), "{clause}");
        assert!(rhs.contains("$1"), "{clause}");

        let param = apply_functions(rhs, param);
        self.usernames.iter().any(|stored| {
            let column = apply_functions(lhs, stored);
            match operator {
                Operator::Like => like(&column, &param),
                Operator::Equal => column == param,
            }
        })
    }
}

#[derive(Clone, Copy)]
enum Operator {
    Equal,
    Like,
}

/// Apply the `unaccent()` and `UPPER()` calls found in one side of a clause.
fn apply_functions(side: &str, text: &str) -> String {
    let text = if side.contains("unaccent(") {
        fold(text)
    } else {
        text.to_string()
    };
    if side.contains("UPPER(") {
        sql_upper(&text)
    } else {
        text
    }
}

/// Postgres `UPPER()`: characters without a single-character uppercase stay as they are.
pub fn sql_upper(text: &str) -> String {
    text.chars()
        .map(|c| {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            }
        })
        .collect()
}

/// SQL `LIKE` with `\` as escape character.
pub fn like(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    like_from(&text, &pattern)
}

fn like_from(text: &[char], pattern: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('%', rest)) => (0..=text.len()).any(|skip| like_from(&text[skip..], rest)),
        Some(('_', rest)) => !text.is_empty() && like_from(&text[1..], rest),
        Some(('\\', rest)) => match rest.split_first() {
            Some((literal, rest)) => text.first() == Some(literal) && like_from(&text[1..], rest),
            None => false,
        },
        Some((c, rest)) => text.first() == Some(c) && like_from(&text[1..], rest),
    }
}
