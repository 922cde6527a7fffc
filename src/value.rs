//! Input value classification and the tree-source seam.
//!
//! The traversal in [`crate::convert`] is written against the [`TreeSource`]
//! trait rather than one concrete value representation. The primary
//! implementation covers `serde_json::Value`; custom implementations can
//! adapt other hierarchical models without touching the engine.

use serde::{Deserialize, Serialize};

/// Classification of a hierarchical value.
///
/// Exactly three mutually exclusive categories. Classification is decided
/// before emptiness: an empty mapping is still a mapping, not a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Associative container with unique keys and stable iteration order.
    #[serde(rename = "container-mapping")]
    Mapping,
    /// Ordered, integer-indexed container.
    #[serde(rename = "container-sequence")]
    Sequence,
    /// Anything else, including the absence-of-value marker.
    #[serde(rename = "scalar")]
    Scalar,
}

impl ValueKind {
    /// Whether this kind has children.
    pub fn is_container(self) -> bool {
        matches!(self, ValueKind::Mapping | ValueKind::Sequence)
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueKind::Mapping => write!(f, "container-mapping"),
            ValueKind::Sequence => write!(f, "container-sequence"),
            ValueKind::Scalar => write!(f, "scalar"),
        }
    }
}

/// A hierarchical value the engine can traverse.
///
/// Children are handed out as shared references, so an implementation may
/// alias (the same child reachable from two positions). The engine detects
/// aliasing that forms a cycle and rejects it; plain tree-shaped values
/// never trigger that path.
pub trait TreeSource {
    /// Classify this value. Pure and total.
    fn kind(&self) -> ValueKind;

    /// Mapping children in stable iteration order. Empty for non-mappings.
    fn entries(&self) -> Vec<(String, &Self)>;

    /// Sequence children in index order. Empty for non-sequences.
    fn items(&self) -> Vec<&Self>;

    /// Display rendering of a scalar, used in node labels.
    fn scalar_text(&self) -> String;

    /// Raw scalar payload carried on the node record. `None` for containers.
    fn scalar_value(&self) -> Option<serde_json::Value>;
}

impl TreeSource for serde_json::Value {
    fn kind(&self) -> ValueKind {
        match self {
            serde_json::Value::Object(_) => ValueKind::Mapping,
            serde_json::Value::Array(_) => ValueKind::Sequence,
            _ => ValueKind::Scalar,
        }
    }

    fn entries(&self) -> Vec<(String, &Self)> {
        match self {
            // Insertion order: serde_json is compiled with preserve_order.
            serde_json::Value::Object(map) => {
                map.iter().map(|(k, v)| (k.clone(), v)).collect()
            }
            _ => Vec::new(),
        }
    }

    fn items(&self) -> Vec<&Self> {
        match self {
            serde_json::Value::Array(items) => items.iter().collect(),
            _ => Vec::new(),
        }
    }

    fn scalar_text(&self) -> String {
        match self {
            serde_json::Value::Null => "null".to_owned(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            // Unquoted: labels show the text itself, not its JSON encoding.
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => String::new(),
        }
    }

    fn scalar_value(&self) -> Option<serde_json::Value> {
        match self.kind() {
            ValueKind::Scalar => Some(self.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn containers_classify_before_emptiness() {
        assert_eq!(json!({}).kind(), ValueKind::Mapping);
        assert_eq!(json!([]).kind(), ValueKind::Sequence);
    }

    #[test]
    fn everything_else_is_scalar() {
        assert_eq!(json!(null).kind(), ValueKind::Scalar);
        assert_eq!(json!(true).kind(), ValueKind::Scalar);
        assert_eq!(json!(42).kind(), ValueKind::Scalar);
        assert_eq!(json!(1.5).kind(), ValueKind::Scalar);
        assert_eq!(json!("text").kind(), ValueKind::Scalar);
    }

    #[test]
    fn mapping_entries_keep_insertion_order() {
        let doc = json!({"b": 1, "a": 2, "c": 3});
        let keys: Vec<String> = doc.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn scalar_text_renders_display_forms() {
        assert_eq!(json!(null).scalar_text(), "null");
        assert_eq!(json!(false).scalar_text(), "false");
        assert_eq!(json!(7).scalar_text(), "7");
        // Strings render unquoted.
        assert_eq!(json!("hello").scalar_text(), "hello");
    }

    #[test]
    fn scalar_value_present_only_for_scalars() {
        assert_eq!(json!(3).scalar_value(), Some(json!(3)));
        assert_eq!(json!({"a": 1}).scalar_value(), None);
        assert_eq!(json!([1]).scalar_value(), None);
    }

    #[test]
    fn kind_display() {
        assert_eq!(ValueKind::Mapping.to_string(), "container-mapping");
        assert_eq!(ValueKind::Sequence.to_string(), "container-sequence");
        assert_eq!(ValueKind::Scalar.to_string(), "scalar");
    }

    #[test]
    fn kind_serializes_as_wire_tag() {
        assert_eq!(
            serde_json::to_string(&ValueKind::Sequence).unwrap(),
            "\"container-sequence\""
        );
    }
}
