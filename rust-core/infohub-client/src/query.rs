// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Query-string assembly.
//!
//! Selection, attribute and cursor parameters use the formats defined by the
//! Information Hub Data API and are passed through opaquely. This module
//! only merges them and renders the result as a query string.

use serde_json::{Map, Value};
use url::form_urlencoded;

/// A flat (or nested) set of query parameters, as a JSON object.
pub type Params = Map<String, Value>;

/// Merge parameter sets left to right and encode them as a query string.
///
/// Later sets override earlier ones key by key; `None` entries are skipped.
/// Returns `""` when nothing remains, otherwise the encoded pairs prefixed
/// with `?`. Only values are percent-encoded; nested objects and arrays are
/// flattened as `key[sub]=v` and `key[0]=v`.
///
/// ```
/// use infohub_client::query::{assemble_query, Params};
/// use serde_json::json;
///
/// let sel: Params = json!({"type": "cc:person"}).as_object().unwrap().clone();
/// let cursor: Params = json!({"limit": 10}).as_object().unwrap().clone();
/// assert_eq!(assemble_query([Some(&sel), None, Some(&cursor)]), "?type=cc%3Aperson&limit=10");
/// assert_eq!(assemble_query([None]), "");
/// ```
pub fn assemble_query<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = Option<&'a Params>>,
{
    let mut merged = Params::new();
    for params in parts.into_iter().flatten() {
        for (key, value) in params {
            merged.insert(key.clone(), value.clone());
        }
    }

    let mut pairs = Vec::new();
    for (key, value) in &merged {
        encode_value(key, value, &mut pairs);
    }

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

fn encode_value(key: &str, value: &Value, pairs: &mut Vec<String>) {
    match value {
        Value::Object(fields) => {
            for (sub, inner) in fields {
                encode_value(&format!("{key}[{sub}]"), inner, pairs);
            }
        }
        Value::Array(items) => {
            for (index, inner) in items.iter().enumerate() {
                encode_value(&format!("{key}[{index}]"), inner, pairs);
            }
        }
        Value::Null => pairs.push(format!("{key}=")),
        Value::String(s) => pairs.push(format!("{key}={}", encode_component(s))),
        other => pairs.push(format!("{key}={}", encode_component(&other.to_string()))),
    }
}

/// Percent-encode a value as a URI component, leaving only RFC 3986
/// unreserved characters raw.
///
/// `form_urlencoded` renders spaces as `+` (and a literal `+` as `%2B`),
/// keeps `*` raw and escapes `~`; all three are corrected here.
fn encode_component(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace('*', "%2A")
        .replace("%7E", "~")
}
