//! Call parameters and their wire rendering.
//!
//! # Design
//! `Params` is BTreeMap-backed so iteration (and therefore query composition
//! and signing) happens in lexicographic key order without a separate sort.
//! Structured values render as compact JSON — serde_json's default `Map`
//! keeps object keys sorted and `to_string` emits no whitespace, which the
//! remote endpoint requires byte-for-byte.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::VkError;

/// A single parameter value supplied to an API call.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    /// A structured value, sent as compact JSON (`{"id":1,"type":"1"}`).
    Json(Value),
}

impl ParamValue {
    /// Render the value as it appears in the query string.
    pub fn render(&self) -> Result<String, VkError> {
        match self {
            ParamValue::Str(s) => Ok(s.clone()),
            ParamValue::Int(n) => Ok(n.to_string()),
            ParamValue::Json(Value::String(s)) => Ok(s.clone()),
            ParamValue::Json(v) => {
                serde_json::to_string(v).map_err(|e| VkError::Serialization(e.to_string()))
            }
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        ParamValue::Json(value)
    }
}

/// Ordered set of parameters for one API call.
#[derive(Debug, Clone, Default)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add a parameter, consuming and returning the set for chaining.
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate pairs in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render every value to its wire string, preserving key order.
    pub(crate) fn render(&self) -> Result<Vec<(String, String)>, VkError> {
        self.0
            .iter()
            .map(|(k, v)| Ok((k.clone(), v.render()?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_and_int_render_verbatim() {
        assert_eq!(ParamValue::from("1,2").render().unwrap(), "1,2");
        assert_eq!(ParamValue::from(642177).render().unwrap(), "642177");
    }

    #[test]
    fn json_string_renders_without_quotes() {
        assert_eq!(
            ParamValue::from(json!("education")).render().unwrap(),
            "education"
        );
    }

    #[test]
    fn structured_value_renders_compact_with_sorted_keys() {
        let value = ParamValue::from(json!({"type": "1", "id": 1}));
        assert_eq!(value.render().unwrap(), r#"{"id":1,"type":"1"}"#);
    }

    #[test]
    fn nested_structure_stays_compact() {
        let value = ParamValue::from(json!({"b": [1, 2], "a": {"x": "y"}}));
        assert_eq!(value.render().unwrap(), r#"{"a":{"x":"y"},"b":[1,2]}"#);
    }

    #[test]
    fn params_iterate_in_key_order() {
        let params = Params::new().arg("uids", "1,2").arg("fields", "education");
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["fields", "uids"]);
    }

    #[test]
    fn later_arg_overwrites_earlier() {
        let params = Params::new().arg("uid", 1).arg("uid", 2);
        assert_eq!(params.len(), 1);
        let rendered = params.render().unwrap();
        assert_eq!(rendered[0].1, "2");
    }
}
