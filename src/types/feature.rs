//! Defines the Weather Underground data features, the response sections each
//! one populates and how long a cached copy of each stays fresh.

use crate::error::InvalidArgument;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named dataset the Weather Underground API can return in one request.
///
/// Every feature is cached and aged independently: a request for several
/// features only goes to the network for those whose cached copy is older than
/// [`Feature::ttl_seconds`].
///
/// The declaration order is the canonical order used when several features are
/// joined into one request URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    /// Severe weather alerts for the queried zone.
    Alerts,
    /// Historical average and record temperatures for today.
    Almanac,
    /// Moon phase, sunrise and sunset.
    Astronomy,
    /// Current observed conditions.
    Conditions,
    /// Summary forecast for the next three days.
    Forecast,
    /// Summary forecast for the next ten days.
    Forecast10Day,
    /// City name, zip code and nearby stations for the query.
    Geolookup,
    /// Hourly forecast for the next 36 hours.
    Hourly,
    /// Hourly forecast for the next ten days.
    Hourly10Day,
    /// Raw tidal information.
    RawTide,
    /// Links to satellite images.
    Satellite,
    /// Tidal forecast.
    Tide,
    /// Nearby webcams.
    Webcams,
    /// Weather summary for yesterday.
    Yesterday,
}

impl Feature {
    /// Every feature, in canonical order.
    pub const ALL: [Feature; 14] = [
        Feature::Alerts,
        Feature::Almanac,
        Feature::Astronomy,
        Feature::Conditions,
        Feature::Forecast,
        Feature::Forecast10Day,
        Feature::Geolookup,
        Feature::Hourly,
        Feature::Hourly10Day,
        Feature::RawTide,
        Feature::Satellite,
        Feature::Tide,
        Feature::Webcams,
        Feature::Yesterday,
    ];

    /// The name used for this feature in request URLs, response flags and cache files.
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Alerts => "alerts",
            Feature::Almanac => "almanac",
            Feature::Astronomy => "astronomy",
            Feature::Conditions => "conditions",
            Feature::Forecast => "forecast",
            Feature::Forecast10Day => "forecast10day",
            Feature::Geolookup => "geolookup",
            Feature::Hourly => "hourly",
            Feature::Hourly10Day => "hourly10day",
            Feature::RawTide => "rawtide",
            Feature::Satellite => "satellite",
            Feature::Tide => "tide",
            Feature::Webcams => "webcams",
            Feature::Yesterday => "yesterday",
        }
    }

    /// The top-level response sections that carry this feature's data.
    ///
    /// Some features share a section (`forecast` and `forecast10day` both answer
    /// in `forecast`); the cached bundle for a feature holds exactly these keys.
    pub fn response_fields(&self) -> &'static [&'static str] {
        match self {
            Feature::Alerts => &["query_zone", "alerts"],
            Feature::Almanac => &["almanac"],
            Feature::Astronomy => &["moon_phase", "sun_phase"],
            Feature::Conditions => &["current_observation"],
            Feature::Forecast | Feature::Forecast10Day => &["forecast"],
            Feature::Geolookup => &["location"],
            Feature::Hourly | Feature::Hourly10Day => &["hourly_forecast"],
            Feature::RawTide => &["rawtide"],
            Feature::Satellite => &["satellite"],
            Feature::Tide => &["tide"],
            Feature::Webcams => &["webcams"],
            Feature::Yesterday => &["history"],
        }
    }

    /// Number of seconds a cached copy of this feature is considered fresh.
    pub fn ttl_seconds(&self) -> i64 {
        const QUARTER_HOUR: i64 = 900;
        const HALF_HOUR: i64 = 1_800;
        const HOUR: i64 = 3_600;
        const DAY: i64 = 86_400;
        const YEAR: i64 = 31_536_000;

        match self {
            Feature::Satellite => QUARTER_HOUR,
            Feature::Alerts | Feature::RawTide | Feature::Tide => HALF_HOUR,
            Feature::Astronomy | Feature::Conditions => HOUR,
            Feature::Forecast
            | Feature::Forecast10Day
            | Feature::Hourly
            | Feature::Hourly10Day
            | Feature::Yesterday => DAY,
            Feature::Almanac | Feature::Geolookup | Feature::Webcams => YEAR,
        }
    }

    /// [`Feature::ttl_seconds`] as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        Duration::seconds(self.ttl_seconds())
    }

    /// Whether data fetched at `fetched_at` is still fresh at `now`.
    ///
    /// Fresh on `[fetched_at, fetched_at + ttl)`, stale from `fetched_at + ttl` on.
    pub fn is_fresh(&self, fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        fetched_at > now - self.ttl()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .iter()
            .copied()
            .find(|feature| feature.name() == s)
            .ok_or_else(|| InvalidArgument::new("feature", s))
    }
}
