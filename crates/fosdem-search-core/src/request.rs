//! Search backend request built from a [`SearchState`].
//!
//! The hosted search service does the ranking, filtering and highlighting;
//! this module only assembles the parameters it is called with.

use serde::{Deserialize, Serialize};

use crate::codec::QUERY_KEY;
use crate::error::ConfigError;
use crate::state::{SearchState, StateValue};

/// Filterable schedule dimensions, in the order filters are emitted.
pub const FACETS: [&str; 4] = ["track", "day", "room", "speaker"];

/// State key of the nested per-facet selections.
pub const REFINEMENT_LIST_KEY: &str = "refinementList";

/// State key of the one-based result page.
pub const PAGE_KEY: &str = "page";

/// Backend settings (`[search]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Index holding the schedule records.
    pub index_name: String,
    pub hits_per_page: u32,
    /// Upper bound of facet values shown per filter panel.
    pub max_values_per_facet: u32,
    /// Snippet spec, e.g. `description:50` (attribute:word count).
    pub attributes_to_snippet: Vec<String>,
    /// Day refinement applied while no day is selected.
    pub default_days: Vec<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            index_name: "fosdem".to_string(),
            hits_per_page: 20,
            max_values_per_facet: 100,
            attributes_to_snippet: vec!["description:50".to_string()],
            default_days: vec!["Saturday".to_string(), "Sunday".to_string()],
        }
    }
}

impl SearchSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.index_name.trim().is_empty() {
            return Err(ConfigError::EmptyIndexName);
        }
        if self.hits_per_page == 0 {
            return Err(ConfigError::ZeroHitsPerPage);
        }
        Ok(())
    }
}

/// Parameters sent to the search backend for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub index_name: String,
    pub query: String,
    /// Zero-based page.
    pub page: u32,
    pub hits_per_page: u32,
    pub max_values_per_facet: u32,
    /// Facets to return value counts for.
    pub facets: Vec<String>,
    /// Conjunction of disjunctions: one `facet:value` group per filtered facet.
    pub facet_filters: Vec<Vec<String>>,
    pub attributes_to_snippet: Vec<String>,
}

impl SearchRequest {
    pub fn from_state(state: &SearchState, settings: &SearchSettings) -> Self {
        let query = state.get_str(QUERY_KEY).unwrap_or_default().to_string();
        let page = state.get_str(PAGE_KEY).map(zero_based_page).unwrap_or(0);

        let mut facet_filters: Vec<Vec<String>> = Vec::new();
        for facet in FACETS {
            let mut values = selected_values(state, facet);
            if values.is_empty() && facet == "day" {
                values = settings.default_days.clone();
            }
            if values.is_empty() {
                continue;
            }
            facet_filters.push(
                values
                    .iter()
                    .map(|v| format!("{}:{}", facet, v))
                    .collect(),
            );
        }

        let request = SearchRequest {
            index_name: settings.index_name.clone(),
            query,
            page,
            hits_per_page: settings.hits_per_page,
            max_values_per_facet: settings.max_values_per_facet,
            facets: FACETS.iter().map(|f| f.to_string()).collect(),
            facet_filters,
            attributes_to_snippet: settings.attributes_to_snippet.clone(),
        };
        tracing::debug!(
            query = %request.query,
            page = request.page,
            filters = request.facet_filters.len(),
            "built search request"
        );
        request
    }
}

/// Selected values for `facet`: `refinementList.<facet>` wins over a
/// top-level `<facet>` entry. Empty strings are ignored.
fn selected_values(state: &SearchState, facet: &str) -> Vec<String> {
    let refined = state
        .get(REFINEMENT_LIST_KEY)
        .and_then(StateValue::as_map)
        .and_then(|refinements| refinements.get(facet));
    let values = refined
        .or_else(|| state.get(facet))
        .and_then(StateValue::to_strings)
        .unwrap_or_default();
    values.into_iter().filter(|v| !v.is_empty()).collect()
}

/// Converts the one-based page from the URL; anything unusable is page 0.
fn zero_based_page(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 1 => u32::try_from(n - 1).unwrap_or(u32::MAX),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    #[test]
    fn default_days_when_no_day_selected() {
        let req = SearchRequest::from_state(&SearchState::new(), &SearchSettings::default());
        assert_eq!(
            req.facet_filters,
            vec![vec!["day:Saturday".to_string(), "day:Sunday".to_string()]]
        );
        assert_eq!(req.query, "");
        assert_eq!(req.page, 0);
    }

    #[test]
    fn selected_day_overrides_default() {
        let state = codec::decode("/?day=Sunday");
        let req = SearchRequest::from_state(&state, &SearchSettings::default());
        assert_eq!(req.facet_filters, vec![vec!["day:Sunday".to_string()]]);
    }

    #[test]
    fn facets_in_fixed_order() {
        let state = codec::decode("/?speaker=Ann&room[0]=K.1.1&room[1]=H.1309&track=Rust");
        let req = SearchRequest::from_state(&state, &SearchSettings::default());
        assert_eq!(
            req.facet_filters,
            vec![
                vec!["track:Rust".to_string()],
                vec!["day:Saturday".to_string(), "day:Sunday".to_string()],
                vec!["room:K.1.1".to_string(), "room:H.1309".to_string()],
                vec!["speaker:Ann".to_string()],
            ]
        );
    }

    #[test]
    fn refinement_list_wins_over_top_level() {
        let state = codec::decode(concat!(
            "/?track=Go",
            "&refinementList[track][0]=Rust",
            "&refinementList[day][0]=Saturday",
        ));
        let req = SearchRequest::from_state(&state, &SearchSettings::default());
        assert_eq!(
            req.facet_filters,
            vec![
                vec!["track:Rust".to_string()],
                vec!["day:Saturday".to_string()],
            ]
        );
    }

    #[test]
    fn page_is_zero_based() {
        assert_eq!(zero_based_page("1"), 0);
        assert_eq!(zero_based_page("3"), 2);
        assert_eq!(zero_based_page("0"), 0);
        assert_eq!(zero_based_page("-4"), 0);
        assert_eq!(zero_based_page("two"), 0);
        assert_eq!(zero_based_page(" 2 "), 1);
    }

    #[test]
    fn query_and_settings_flow_through() {
        let state = codec::decode("/?query=rust%20async&page=2");
        let settings = SearchSettings {
            index_name: "fosdem-2020".to_string(),
            hits_per_page: 5,
            ..SearchSettings::default()
        };
        let req = SearchRequest::from_state(&state, &settings);
        assert_eq!(req.index_name, "fosdem-2020");
        assert_eq!(req.query, "rust async");
        assert_eq!(req.page, 1);
        assert_eq!(req.hits_per_page, 5);
        assert_eq!(req.attributes_to_snippet, vec!["description:50".to_string()]);
    }

    #[test]
    fn serializes_camel_case() {
        let req = SearchRequest::from_state(&SearchState::new(), &SearchSettings::default());
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["indexName"], "fosdem");
        assert_eq!(json["hitsPerPage"], 20);
        assert_eq!(json["maxValuesPerFacet"], 100);
        assert_eq!(json["attributesToSnippet"][0], "description:50");
        assert!(json["facetFilters"].is_array());
    }

    #[test]
    fn validate_settings() {
        assert!(SearchSettings::default().validate().is_ok());
        let unnamed = SearchSettings {
            index_name: " ".to_string(),
            ..SearchSettings::default()
        };
        assert!(matches!(unnamed.validate(), Err(ConfigError::EmptyIndexName)));
    }
}
