//! Query parameter trees.
//!
//! Query strings may use bracket syntax (`tags[]=a&filter[lang]=en`), so a
//! parameter value is either a scalar or a nested, insertion-ordered map.
//! The same parser reads request queries and stored rule constraints.

use indexmap::IndexMap;
use url::form_urlencoded;

/// Ordered parameter map. Re-inserting a key keeps its original position.
pub type QueryMap = IndexMap<String, QueryValue>;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Scalar(String),
    Map(QueryMap),
}

impl QueryValue {
    /// Empty string, `"0"`, or an empty map.
    ///
    /// A falsy required value in a rule constraint accepts any request value.
    pub fn is_falsy(&self) -> bool {
        match self {
            QueryValue::Scalar(s) => s.is_empty() || s == "0",
            QueryValue::Map(m) => m.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::Scalar(s) => Some(s),
            QueryValue::Map(_) => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::Scalar(s.to_string())
    }
}

/// Parse a raw query string (without the leading `?`).
///
/// Never fails: pairs with an empty or bracket-only name are skipped.
pub fn parse_query(query: &str) -> QueryMap {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut map = QueryMap::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let Some((name, path)) = split_key(&key) else {
            continue;
        };
        insert(&mut map, name, &path, value.into_owned());
    }

    map
}

/// Serialize a query map back to `application/x-www-form-urlencoded` form.
/// Nested maps are written as `name[key]=value`.
pub fn build_query(query: &QueryMap) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in query {
        append_value(&mut serializer, key, value);
    }
    serializer.finish()
}

fn append_value(
    serializer: &mut form_urlencoded::Serializer<'_, String>,
    key: &str,
    value: &QueryValue,
) {
    match value {
        QueryValue::Scalar(s) => {
            serializer.append_pair(key, s);
        }
        QueryValue::Map(children) => {
            for (child_key, child) in children {
                append_value(serializer, &format!("{}[{}]", key, child_key), child);
            }
        }
    }
}

/// Split `name[a][]` into `("name", [Some("a"), None])`.
/// `None` segments append at the next numeric index.
fn split_key(key: &str) -> Option<(String, Vec<Option<String>>)> {
    let Some(open) = key.find('[') else {
        return (!key.is_empty()).then(|| (key.to_string(), Vec::new()));
    };

    let name = &key[..open];
    if name.is_empty() {
        return None;
    }

    let mut path = Vec::new();
    let mut rest = &key[open..];
    while let Some(inner) = rest.strip_prefix('[') {
        let Some(close) = inner.find(']') else {
            // Unbalanced bracket: the whole key is a plain name.
            return Some((key.to_string(), Vec::new()));
        };
        let segment = &inner[..close];
        path.push((!segment.is_empty()).then(|| segment.to_string()));
        rest = &inner[close + 1..];
    }

    Some((name.to_string(), path))
}

fn insert(map: &mut QueryMap, key: String, path: &[Option<String>], value: String) {
    let Some((next, rest)) = path.split_first() else {
        map.insert(key, QueryValue::Scalar(value));
        return;
    };

    let entry = map
        .entry(key)
        .or_insert_with(|| QueryValue::Map(QueryMap::new()));
    if let QueryValue::Scalar(_) = entry {
        *entry = QueryValue::Map(QueryMap::new());
    }

    if let QueryValue::Map(children) = entry {
        let child_key = match next {
            Some(k) => k.clone(),
            None => next_index(children).to_string(),
        };
        insert(children, child_key, rest, value);
    }
}

fn next_index(map: &QueryMap) -> u64 {
    map.keys()
        .filter_map(|k| k.parse::<u64>().ok())
        .max()
        .map(|max| max + 1)
        .unwrap_or(0)
}
