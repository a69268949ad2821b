//! Classification of the free-form location query accepted by the API.

use crate::error::InvalidArgument;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static REGION_CITY: LazyLock<Regex> = LazyLock::new(|| build(r"^[a-zA-Z_]+/[a-zA-Z_]+$"));
static COUNTRY_CODE_CITY: LazyLock<Regex> = LazyLock::new(|| build(r"^[a-zA-Z]{2}/[a-zA-Z_]+$"));
static ZIP_CODE: LazyLock<Regex> = LazyLock::new(|| build(r"^[0-9]+$"));
static STATION_ID: LazyLock<Regex> = LazyLock::new(|| build(r"^pws:[0-9a-zA-Z]+$"));

/// Two-letter regions that are filed under `USA/`: the states and DC.
const US_STATES: [&str; 51] = [
    "AK", "AL", "AR", "AZ", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "HI", "IA", "ID", "IL", "IN", "KS",
    "KY", "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MS", "MT", "NC", "ND", "NE", "NH", "NJ", "NM", "NV",
    "NY", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VA", "VT", "WA", "WI", "WV", "WY",
];

// Only ever called with the literal patterns above.
fn build(pattern: &str) -> Regex {
    Regex::new(pattern).expect("query pattern must compile")
}

/// The shape of a location query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// `Country/City` or `Region/City`, e.g. `Croatia/Zagreb`.
    RegionCity,
    /// US state code and city, e.g. `CA/San_Francisco`.
    CountryCodeCity,
    /// Numeric US zip code, e.g. `94107`.
    ZipCode,
    /// Personal weather station id, e.g. `pws:KCASANFR70`.
    StationId,
}

/// A validated location query together with the cache directory it maps to.
///
/// # Examples
///
/// ```
/// use wunderground::{Query, QueryKind};
///
/// let query = Query::classify("94107").unwrap();
/// assert_eq!(query.kind(), QueryKind::ZipCode);
/// assert_eq!(query.cache_path(), "USA/ZIP/94107");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    raw: String,
    kind: QueryKind,
}

impl Query {
    /// Classifies `raw` against the supported shapes.
    ///
    /// A `Region/City` query whose region is a US state code (`CA/San_Francisco`)
    /// is [`QueryKind::CountryCodeCity`]. Other `Region/City` queries, including
    /// two-letter country codes such as `UK/London`, are
    /// [`QueryKind::RegionCity`]. Zip codes and station ids are tried after that.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`] when `raw` is empty or matches no shape.
    pub fn classify(raw: &str) -> Result<Self, InvalidArgument> {
        let kind = if is_us_state_city(raw) {
            QueryKind::CountryCodeCity
        } else if REGION_CITY.is_match(raw) {
            QueryKind::RegionCity
        } else if ZIP_CODE.is_match(raw) {
            QueryKind::ZipCode
        } else if STATION_ID.is_match(raw) {
            QueryKind::StationId
        } else {
            return Err(InvalidArgument::new("query", raw));
        };

        Ok(Self {
            raw: raw.to_string(),
            kind,
        })
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    /// The query exactly as it is sent to the API.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Relative directory (segments joined by `/`) holding this query's cache files.
    pub fn cache_path(&self) -> String {
        match self.kind {
            QueryKind::RegionCity => self.raw.clone(),
            QueryKind::CountryCodeCity => format!("USA/{}", self.raw),
            QueryKind::ZipCode => format!("USA/ZIP/{}", self.raw),
            QueryKind::StationId => self.raw.replacen(':', "/", 1),
        }
    }
}

fn is_us_state_city(raw: &str) -> bool {
    COUNTRY_CODE_CITY.is_match(raw)
        && raw
            .split_once('/')
            .is_some_and(|(region, _)| US_STATES.contains(&region.to_ascii_uppercase().as_str()))
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
