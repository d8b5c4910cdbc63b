use sea_orm::{
    ColumnTrait, ColumnType, EntityName, IdenStatic,
    sea_query::{Alias, Expr},
};
use std::collections::HashMap;

use super::fragment::ConnectionOps;

/// Reference to the column a filter applies to.
///
/// Quoting and casting are applied when the reference is rendered, never
/// when it is built, so the same reference can be rendered for any backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    table_alias: Option<String>,
    column: String,
    db_type: Option<String>,
}

impl ColumnRef {
    /// Bare column, e.g. `"username"`
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            table_alias: None,
            column: column.into(),
            db_type: None,
        }
    }

    /// Table-qualified column, e.g. `"auth_user"."username"`
    pub fn qualified(table_alias: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table_alias: Some(table_alias.into()),
            column: column.into(),
            db_type: None,
        }
    }

    /// Record the database type so backend-specific casts can be applied.
    #[must_use]
    pub fn with_db_type(mut self, db_type: impl Into<String>) -> Self {
        self.db_type = Some(db_type.into());
        self
    }

    /// Build a reference from a Sea-ORM column, qualified with its table name.
    pub fn from_column<C: ColumnTrait>(column: C) -> Self {
        let table = C::EntityName::default();
        let db_type = match column.def().get_column_type() {
            ColumnType::Inet => Some("inet".to_string()),
            ColumnType::Cidr => Some("cidr".to_string()),
            _ => None,
        };

        Self {
            table_alias: Some(table.table_name().to_string()),
            column: IdenStatic::as_str(&column).to_string(),
            db_type,
        }
    }

    #[must_use]
    pub fn table_alias(&self) -> Option<&str> {
        self.table_alias.as_deref()
    }

    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Point the reference at a renamed alias when the query relabels its tables.
    pub fn relabel_aliases(&mut self, change_map: &HashMap<String, String>) {
        if let Some(new_alias) = self
            .table_alias
            .as_ref()
            .and_then(|alias| change_map.get(alias))
        {
            self.table_alias = Some(new_alias.clone());
        }
    }

    /// Quoted and cast SQL for the column, ready for the fragment generator.
    #[must_use]
    pub fn to_sql(&self, ops: &(impl ConnectionOps + ?Sized)) -> String {
        let quoted = match &self.table_alias {
            Some(alias) => format!("{}.{}", ops.quote_name(alias), ops.quote_name(&self.column)),
            None => ops.quote_name(&self.column),
        };
        ops.field_cast_sql(self.db_type.as_deref())
            .replacen("%s", &quoted, 1)
    }

    /// The column as a sea-query expression, for the standard lookups.
    #[must_use]
    pub fn expr(&self) -> Expr {
        match &self.table_alias {
            Some(alias) => Expr::col((Alias::new(alias), Alias::new(&self.column))),
            None => Expr::col(Alias::new(&self.column)),
        }
    }
}
