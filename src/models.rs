use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Query parameters carrying accent-insensitive filters.
///
/// The `filter` parameter is a JSON object whose keys are `<field>__<lookup>`:
/// ```json
/// {"username__iunaccent": "otaeku", "city__startswith_unaccent_smart": "Sao"}
/// ```
/// A key without a lookup compares with `exact`. Smart lookups
/// (`*_unaccent_smart`) only ignore accents when the search value has none.
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema, Default)]
#[into_params(parameter_in = Query)]
pub struct UnaccentFilterOptions {
    /// JSON-encoded filter, e.g. `{"username__unaccent": "Otaeku"}`
    #[param(example = r#"{"username__unaccent": "Otaeku"}"#)]
    pub filter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_filter_options() {
        let options: UnaccentFilterOptions =
            serde_json::from_str(r#"{"filter": "{\"username__unaccent\": \"Otaeku\"}"}"#)
                .expect("valid options");
        assert_eq!(
            options.filter.as_deref(),
            Some(r#"{"username__unaccent": "Otaeku"}"#)
        );
    }

    #[test]
    fn test_default_has_no_filter() {
        assert!(UnaccentFilterOptions::default().filter.is_none());
    }
}
