//! # Accent-Insensitive Filtering
//!
//! Translates filter terms such as `username__iunaccent=otaeku` into SQL
//! conditions that compare `unaccent()`-normalized text on both sides.
//!
//! ## Lookups
//!
//! | Lookup                 | Condition                                         | Falls back to |
//! |------------------------|---------------------------------------------------|---------------|
//! | `unaccent`             | `unaccent(col::text) = unaccent(v)`               | `exact`       |
//! | `iunaccent`            | `UPPER(unaccent(col::text)) = UPPER(unaccent(v))` | `iexact`      |
//! | `contains_unaccent`    | `... LIKE unaccent('%v%')`                        | `contains`    |
//! | `icontains_unaccent`   | `... LIKE UPPER(unaccent('%v%'))`                 | `icontains`   |
//! | `startswith_unaccent`  | `... LIKE unaccent('v%')`                         | `startswith`  |
//! | `istartswith_unaccent` | `... LIKE UPPER(unaccent('v%'))`                  | `istartswith` |
//! | `endswith_unaccent`    | `... LIKE unaccent('%v')`                         | `endswith`    |
//! | `iendswith_unaccent`   | `... LIKE UPPER(unaccent('%v'))`                  | `iendswith`   |
//!
//! Every lookup has a `_smart` variant. A smart lookup ignores accents only
//! when the search value is plain ASCII; `Ôtaèkù` is taken literally and the
//! term is rendered with the fallback lookup instead.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crudcrate_unaccent::{ColumnRef, FilterBuilder, apply_filters};
//! use sea_orm::DatabaseBackend;
//!
//! let builder = FilterBuilder::with_unaccent(DatabaseBackend::Postgres);
//! let columns = [("username", ColumnRef::from_column(user::Column::Username))];
//!
//! // GET /users?filter={"username__icontains_unaccent_smart":"otae"}
//! let condition = apply_filters(params.filter.as_deref(), &columns, &builder)?;
//! let users = user::Entity::find().filter(condition).all(&db).await?;
//! ```
//!
//! ## Database requirements
//!
//! `PostgreSQL` with the `unaccent` extension installed
//! (`CREATE EXTENSION IF NOT EXISTS unaccent;`). The function's presence is
//! not checked; a missing extension surfaces as a query error.
//!
//! The smart heuristic uses [`fold()`], not the database function. The two
//! agree on Latin diacritics but may differ on ligatures and non-Latin scripts.

pub mod classifier;
pub mod column;
pub mod conditions;
pub mod fold;
pub mod fragment;
pub mod lookups;
pub mod registry;
pub mod translator;

// Re-export commonly used items
pub use classifier::{Classification, classify};
pub use column::ColumnRef;
pub use conditions::{FilterBuilder, apply_filters, split_filter_key, standard_condition};
pub use fold::{fold, has_non_ascii_content};
pub use fragment::{ConnectionOps, SqlFragment, escape_like_wildcards, generate, generate_by_name};
pub use lookups::{LookupFamily, SMART_SUFFIX, StandardLookup, UnaccentLookup};
pub use registry::KeywordRegistry;
pub use translator::{FilterTerm, LookupTranslator, Translation, UnaccentTranslator};
