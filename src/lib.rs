pub mod errors;
pub mod filtering;
pub mod models;

pub use errors::FilterError;
pub use filtering::{
    ColumnRef, FilterBuilder, FilterTerm, KeywordRegistry, LookupTranslator, SqlFragment,
    StandardLookup, Translation, UnaccentLookup, UnaccentTranslator, apply_filters, classify,
    fold, generate,
};
pub use models::UnaccentFilterOptions;
