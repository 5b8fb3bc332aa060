//! Order-preserving query-string serialization of a [`SearchState`].

use super::escape::{encode_query, escape_key, escape_value};
use super::{ArrayFormat, CodecOptions, QUERY_KEY};
use crate::state::{SearchState, StateValue};

pub(super) fn serialize_state(state: &SearchState, opts: &CodecOptions) -> String {
    let mut pairs: Vec<String> = Vec::new();
    for (key, value) in state.iter() {
        if key.is_empty() {
            continue;
        }
        match value {
            StateValue::Scalar(query) if key == QUERY_KEY && !query.is_empty() => {
                pairs.push(format!("{}={}", QUERY_KEY, encode_query(query)));
            }
            _ => write_value(&mut pairs, escape_key(key).into_owned(), value, opts),
        }
    }
    pairs.join("&")
}

fn write_value(pairs: &mut Vec<String>, prefix: String, value: &StateValue, opts: &CodecOptions) {
    match value {
        StateValue::Scalar(s) => pairs.push(format!("{}={}", prefix, escape_value(s))),
        StateValue::List(items) => {
            for (i, item) in items.iter().enumerate() {
                // Positions past the array limit would decode as map keys; `[]` appends instead.
                let key = match opts.array_format {
                    ArrayFormat::Indices if i <= opts.array_limit => {
                        format!("{}[{}]", prefix, i)
                    }
                    ArrayFormat::Indices | ArrayFormat::Brackets => format!("{}[]", prefix),
                };
                pairs.push(format!("{}={}", key, escape_value(item)));
            }
        }
        StateValue::Map(map) => {
            for (k, v) in map.iter().filter(|(k, _)| !k.is_empty()) {
                write_value(pairs, format!("{}[{}]", prefix, escape_key(k)), v, opts);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_in_insertion_order() {
        let state: SearchState = [("track", "Go"), ("day", "Sunday"), ("page", "2")]
            .into_iter()
            .collect();
        assert_eq!(
            serialize_state(&state, &CodecOptions::default()),
            "track=Go&day=Sunday&page=2"
        );
    }

    #[test]
    fn list_formats() {
        let state: SearchState = [("room", vec!["K.1.1", "H.1309"])].into_iter().collect();
        assert_eq!(
            serialize_state(&state, &CodecOptions::default()),
            "room[0]=K.1.1&room[1]=H.1309"
        );
        let brackets = CodecOptions {
            array_format: ArrayFormat::Brackets,
            ..CodecOptions::default()
        };
        assert_eq!(
            serialize_state(&state, &brackets),
            "room[]=K.1.1&room[]=H.1309"
        );
    }

    #[test]
    fn indices_past_array_limit_fall_back_to_brackets() {
        let rooms: Vec<String> = (0..1003).map(|i| format!("R.{}", i)).collect();
        let state: SearchState = [("room", rooms)].into_iter().collect();
        let encoded = serialize_state(&state, &CodecOptions::default());
        assert!(encoded.contains("room[1000]=R.1000&room[]=R.1001&room[]=R.1002"));
        assert!(!encoded.contains("room[1001]"));
    }

    #[test]
    fn nested_maps() {
        let mut refinements = SearchState::new();
        refinements.insert("track", vec!["Rust"]);
        refinements.insert("speaker", "Jane Doe");
        let mut state = SearchState::new();
        state.insert("refinementList", refinements);
        assert_eq!(
            serialize_state(&state, &CodecOptions::default()),
            "refinementList[track][0]=Rust&refinementList[speaker]=Jane Doe"
        );
    }

    #[test]
    fn empty_shapes_are_omitted() {
        let mut state = SearchState::new();
        state.insert("room", Vec::<String>::new());
        state.insert("refinementList", SearchState::new());
        state.insert("", "orphan");
        assert_eq!(serialize_state(&state, &CodecOptions::default()), "");
    }

    #[test]
    fn empty_query_passes_through() {
        let state: SearchState = [("query", "")].into_iter().collect();
        assert_eq!(serialize_state(&state, &CodecOptions::default()), "query=");
    }
}
