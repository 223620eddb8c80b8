//! The JSON value tree consumed by the manifest reader.
//!
//! JSON tokenization is not this crate's job: an external parser hands
//! over a variant tree where every node carries the byte range of its
//! first token. Object members are kept as an ordered list because key
//! order is significant for `exports` and `imports`.
//!
//! Callers that do not track spans (and the tests in this crate) can
//! convert a `serde_json::Value` instead; the resulting tree has empty
//! ranges but identical structure and member order.

use crate::source::SourceRange;

/// A JSON value with the source range of its first token.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonValue {
    pub kind: JsonKind,
    pub range: SourceRange,
}

/// The variants of a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonKind {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Array(Vec<JsonValue>),
    /// Members in source order. Duplicate keys are preserved.
    Object(Vec<JsonMember>),
}

/// A single `key: value` member of a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonMember {
    pub key: String,
    pub key_range: SourceRange,
    pub value: JsonValue,
}

impl JsonValue {
    #[must_use]
    pub fn new(kind: JsonKind, range: SourceRange) -> Self {
        Self { kind, range }
    }

    /// Look up an object member by key, first match wins.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&JsonMember> {
        match &self.kind {
            JsonKind::Object(members) => members.iter().find(|member| member.key == key),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            JsonKind::Str(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match &self.kind {
            JsonKind::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Build a span-less tree from a `serde_json::Value`.
    ///
    /// Member order follows the input value, which preserves source
    /// order when serde_json is compiled with `preserve_order`.
    #[must_use]
    pub fn from_serde(value: &serde_json::Value) -> Self {
        let kind = match value {
            serde_json::Value::Null => JsonKind::Null,
            serde_json::Value::Bool(value) => JsonKind::Bool(*value),
            serde_json::Value::Number(value) => JsonKind::Number(value.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(value) => JsonKind::Str(value.clone()),
            serde_json::Value::Array(items) => {
                JsonKind::Array(items.iter().map(Self::from_serde).collect())
            }
            serde_json::Value::Object(members) => JsonKind::Object(
                members
                    .iter()
                    .map(|(key, value)| JsonMember {
                        key: key.clone(),
                        key_range: SourceRange::default(),
                        value: Self::from_serde(value),
                    })
                    .collect(),
            ),
        };
        Self {
            kind,
            range: SourceRange::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_serde_keeps_member_order() {
        let value = JsonValue::from_serde(&json!({
            "zebra": 1,
            "apple": 2,
            "mango": 3
        }));

        let JsonKind::Object(members) = &value.kind else {
            panic!("expected object");
        };
        let keys: Vec<&str> = members.iter().map(|member| member.key.as_str()).collect();
        assert_eq!(keys, ["zebra", "apple", "mango"]);
    }

    #[test]
    fn property_finds_first_match() {
        let value = JsonValue::from_serde(&json!({"main": "./index.js"}));
        assert_eq!(
            value.property("main").and_then(|member| member.value.as_str()),
            Some("./index.js")
        );
        assert!(value.property("module").is_none());
    }
}
