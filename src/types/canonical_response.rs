//! Format independent view of a decoded API response.

use crate::types::feature::Feature;
use log::warn;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// The data cached and returned for one feature: response section name → value.
pub type FieldBundle = Map<String, Value>;

/// A decoded API response.
///
/// Both the JSON and the XML parser produce this shape: the set of features the
/// service says it answered, and every top-level section of the payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalResponse {
    features: BTreeSet<Feature>,
    sections: Map<String, Value>,
}

impl CanonicalResponse {
    /// Builds the canonical view from a decoded document whose
    /// `response.features` entry is a `{name: 1}` flag map.
    ///
    /// Flags set to anything other than `1` (number, string or `true`) are
    /// inactive. Flags naming a feature this crate doesn't know are dropped.
    pub(crate) fn from_document(sections: Map<String, Value>) -> Self {
        let mut features = BTreeSet::new();

        let flags = sections
            .get("response")
            .and_then(|response| response.get("features"))
            .and_then(Value::as_object);

        for (name, flag) in flags.into_iter().flatten() {
            if !is_active(flag) {
                continue;
            }
            match name.parse::<Feature>() {
                Ok(feature) => {
                    features.insert(feature);
                }
                Err(_) => warn!("Ignoring unknown feature '{}' flagged in response", name),
            }
        }

        Self { features, sections }
    }

    /// Features flagged active by the service, in canonical order.
    pub fn features(&self) -> &BTreeSet<Feature> {
        &self.features
    }

    pub fn is_active(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    /// A top-level section of the payload, e.g. `current_observation`.
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }

    pub fn sections(&self) -> &Map<String, Value> {
        &self.sections
    }

    /// The declared response fields of `feature`; absent sections come back as `null`.
    pub fn bundle_for(&self, feature: Feature) -> FieldBundle {
        feature
            .response_fields()
            .iter()
            .map(|&field| {
                let value = self.sections.get(field).cloned().unwrap_or(Value::Null);
                (field.to_string(), value)
            })
            .collect()
    }
}

fn is_active(flag: &Value) -> bool {
    match flag {
        Value::Number(n) => n.as_u64() == Some(1),
        Value::String(s) => s.trim() == "1",
        Value::Bool(b) => *b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn collects_active_known_features() {
        let response = CanonicalResponse::from_document(document(json!({
            "response": {
                "version": "0.1",
                "features": {"conditions": 1, "tide": "1", "astronomy": 0, "radar": 1}
            },
            "current_observation": {"temp_c": 21.5}
        })));

        let features: Vec<_> = response.features().iter().copied().collect();
        assert_eq!(features, vec![Feature::Conditions, Feature::Tide]);
        assert!(!response.is_active(Feature::Astronomy));
    }

    #[test]
    fn bundle_holds_declared_fields_only() {
        let response = CanonicalResponse::from_document(document(json!({
            "response": {"features": {"alerts": 1}},
            "alerts": [],
            "current_observation": {"temp_c": 21.5}
        })));

        let bundle = response.bundle_for(Feature::Alerts);
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle["alerts"], json!([]));
        assert_eq!(bundle["query_zone"], Value::Null);
    }

    #[test]
    fn missing_flag_map_means_no_features() {
        let response = CanonicalResponse::from_document(document(json!({"response": {}})));
        assert!(response.features().is_empty());
        assert!(response.section("response").is_some());
    }
}
