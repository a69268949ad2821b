//! The flattened document a [`CacheRecord`] is stored as:
//! `{<feature>: <fields>, …, "features": {<feature>: 1, …}, "lastUpdated": {<feature>: <unix seconds>, …}}`.

use crate::cache::error::CodecError;
use crate::types::cache_record::CacheRecord;
use crate::types::feature::Feature;
use chrono::DateTime;
use log::warn;
use serde_json::{json, Map, Value};

const FEATURES: &str = "features";
const LAST_UPDATED: &str = "lastUpdated";

pub(crate) fn to_document(record: &CacheRecord) -> Value {
    let mut document = Map::new();
    let mut features = Map::new();
    let mut last_updated = Map::new();

    for (feature, entry) in record.iter() {
        document.insert(feature.name().to_string(), Value::Object(entry.fields.clone()));
        features.insert(feature.name().to_string(), json!(1));
        last_updated.insert(feature.name().to_string(), json!(entry.last_updated.timestamp()));
    }

    document.insert(FEATURES.to_string(), Value::Object(features));
    document.insert(LAST_UPDATED.to_string(), Value::Object(last_updated));
    Value::Object(document)
}

pub(crate) fn from_document(document: Value) -> Result<CacheRecord, CodecError> {
    let Value::Object(mut document) = document else {
        return Err(CodecError::Shape("document is not a map".to_string()));
    };

    let features = take_map(&mut document, FEATURES)?;
    let last_updated = take_map(&mut document, LAST_UPDATED)?;
    let mut record = CacheRecord::new();

    for (name, flag) in features {
        if !is_set(&flag) {
            continue;
        }
        let Ok(feature) = name.parse::<Feature>() else {
            warn!("Skipping unknown feature '{}' in cache file", name);
            continue;
        };

        let fields = match document.remove(&name) {
            Some(Value::Object(fields)) => fields,
            _ => return Err(CodecError::Shape(format!("feature '{name}' has no field bundle"))),
        };
        let fetched_at = last_updated
            .get(&name)
            .and_then(timestamp)
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
            .ok_or_else(|| CodecError::Shape(format!("feature '{name}' has no valid timestamp")))?;

        record.insert(feature, fields, fetched_at);
    }

    Ok(record)
}

fn take_map(document: &mut Map<String, Value>, key: &str) -> Result<Map<String, Value>, CodecError> {
    match document.remove(key) {
        None => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        // An empty XML element reads back as an empty string.
        Some(Value::String(s)) if s.is_empty() => Ok(Map::new()),
        Some(_) => Err(CodecError::Shape(format!("'{key}' is not a map"))),
    }
}

fn is_set(flag: &Value) -> bool {
    match flag {
        Value::Number(n) => n.as_u64() == Some(1),
        Value::String(s) => s == "1",
        Value::Bool(b) => *b,
        _ => false,
    }
}

fn timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
