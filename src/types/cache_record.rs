//! The per query, language and format cache record.

use crate::types::canonical_response::FieldBundle;
use crate::types::feature::Feature;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// One cached feature: its field bundle and when it was fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedFeature {
    pub fields: FieldBundle,
    pub last_updated: DateTime<Utc>,
}

/// Everything cached for one (query path, language, format).
///
/// Bundles and fetch timestamps are stored side by side, so a feature either
/// has both or neither.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheRecord {
    entries: BTreeMap<Feature, CachedFeature>,
}

impl CacheRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, feature: Feature) -> Option<&CachedFeature> {
        self.entries.get(&feature)
    }

    /// The cached bundle of `feature` if it is still fresh at `now`.
    pub fn fresh_bundle(&self, feature: Feature, now: DateTime<Utc>) -> Option<&FieldBundle> {
        self.entries
            .get(&feature)
            .filter(|entry| feature.is_fresh(entry.last_updated, now))
            .map(|entry| &entry.fields)
    }

    /// Stores `fields` for `feature` as fetched at `fetched_at`, replacing any
    /// previous entry. Timestamps are kept at whole-second precision, the
    /// precision of the cache files.
    pub fn insert(&mut self, feature: Feature, fields: FieldBundle, fetched_at: DateTime<Utc>) {
        let last_updated = DateTime::from_timestamp(fetched_at.timestamp(), 0).unwrap_or(fetched_at);
        self.entries.insert(
            feature,
            CachedFeature {
                fields,
                last_updated,
            },
        );
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, &CachedFeature)> {
        self.entries.iter().map(|(feature, entry)| (*feature, entry))
    }
}
