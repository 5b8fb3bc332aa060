//! Query-string parsing into a [`SearchState`].
//!
//! Parsing is best-effort: fragments that cannot be placed in the state are
//! dropped and logged at debug level, never reported as errors.

use std::collections::BTreeMap;

use super::escape::decode_component;
use super::CodecOptions;
use crate::state::{SearchState, StateValue};

/// How the last bracket segment of a key places its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leaf {
    /// `key=value`; repeats turn into a list.
    Plain,
    /// `key[]=value`
    Push,
    /// `key[n]=value` with `n` within the array limit.
    Index(usize),
}

/// Parsed key: mapping path from the top-level name down, plus leaf placement.
#[derive(Debug, PartialEq, Eq)]
struct KeyPath {
    path: Vec<String>,
    leaf: Leaf,
}

/// Intermediate tree; sequences collect `(index, arrival)` slots and are
/// compacted when the state is built.
enum Node {
    Seq {
        slots: BTreeMap<(usize, usize), String>,
        bracketed: bool,
    },
    Map(Vec<(String, Node)>),
}

pub(super) fn parse_query(input: &str, opts: &CodecOptions) -> SearchState {
    let mut root: Vec<(String, Node)> = Vec::new();

    let fragments = input.split('&').filter(|f| !f.is_empty());
    for (n, fragment) in fragments.enumerate() {
        if let Some(limit) = opts.parameter_limit.filter(|&limit| n >= limit) {
            tracing::debug!(limit, "parameter limit reached; dropping rest");
            break;
        }
        let (raw_key, raw_value) = fragment.split_once('=').unwrap_or((fragment, ""));
        let Some(key) = parse_key(raw_key, opts) else {
            tracing::debug!(fragment, "dropping fragment with unusable key");
            continue;
        };
        let value = decode_component(raw_value);
        if !insert(&mut root, &key.path, key.leaf, value) {
            tracing::debug!(fragment, "dropping fragment that conflicts with an earlier shape");
        }
    }

    build_state(root)
}

/// Splits `name[a][b]` into its segments, honouring the depth limit.
fn parse_key(raw: &str, opts: &CodecOptions) -> Option<KeyPath> {
    let literal = |raw: &str| {
        let key = decode_component(raw);
        (!key.is_empty()).then(|| KeyPath {
            path: vec![key],
            leaf: Leaf::Plain,
        })
    };

    let open = match raw.find('[') {
        Some(0) | None => return literal(raw),
        Some(i) => i,
    };

    let mut segments: Vec<String> = Vec::new();
    let mut rest = &raw[open..];
    while segments.len() < opts.depth {
        let Some(inner) = rest.strip_prefix('[') else {
            break;
        };
        let Some(close) = inner.find(']') else {
            break;
        };
        if inner[..close].contains('[') {
            break;
        }
        segments.push(inner[..close].to_string());
        rest = &inner[close + 1..];
    }
    if segments.is_empty() {
        return literal(raw);
    }

    let head = decode_component(&raw[..open]);
    if head.is_empty() {
        return None;
    }
    let mut path = vec![head];
    let mut leaf = Leaf::Plain;
    let last = segments.len() - 1;

    for (i, segment) in segments.iter().enumerate() {
        let is_leaf = i == last && rest.is_empty();
        if segment.is_empty() {
            if !is_leaf {
                // `a[][b]`: lists of mappings are not part of the state model.
                return None;
            }
            leaf = Leaf::Push;
            continue;
        }
        if is_leaf {
            if let Some(index) = parse_index(segment, opts.array_limit) {
                leaf = Leaf::Index(index);
                continue;
            }
        }
        path.push(decode_component(segment));
    }

    // Anything past the depth limit or trailing the last bracket pair is one literal segment.
    if !rest.is_empty() {
        path.push(decode_component(rest));
    }

    Some(KeyPath { path, leaf })
}

fn parse_index(segment: &str, array_limit: usize) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse::<usize>().ok().filter(|&n| n <= array_limit)
}

fn insert(entries: &mut Vec<(String, Node)>, path: &[String], leaf: Leaf, value: String) -> bool {
    let Some((key, rest)) = path.split_first() else {
        return false;
    };
    let pos = match entries.iter().position(|(k, _)| k == key) {
        Some(pos) => pos,
        None => {
            let node = if rest.is_empty() {
                Node::Seq {
                    slots: BTreeMap::new(),
                    bracketed: false,
                }
            } else {
                Node::Map(Vec::new())
            };
            entries.push((key.clone(), node));
            entries.len() - 1
        }
    };

    match (&mut entries[pos].1, rest.is_empty()) {
        (Node::Seq { slots, bracketed }, true) => {
            let arrival = slots.len();
            let index = match leaf {
                Leaf::Index(n) => n,
                Leaf::Plain | Leaf::Push => slots
                    .keys()
                    .next_back()
                    .map(|&(last, _)| last + 1)
                    .unwrap_or(0),
            };
            *bracketed |= leaf != Leaf::Plain;
            slots.insert((index, arrival), value);
            true
        }
        (Node::Map(children), false) => insert(children, rest, leaf, value),
        _ => false,
    }
}

fn build_state(entries: Vec<(String, Node)>) -> SearchState {
    let mut state = SearchState::new();
    for (key, node) in entries {
        let value = match node {
            Node::Seq { slots, bracketed } => {
                let mut items: Vec<String> = slots.into_values().collect();
                if !bracketed && items.len() == 1 {
                    StateValue::Scalar(items.remove(0))
                } else {
                    StateValue::List(items)
                }
            }
            Node::Map(children) => {
                let map = build_state(children);
                if map.is_empty() {
                    continue;
                }
                StateValue::Map(map)
            }
        };
        state.insert(key, value);
    }
    state
}
