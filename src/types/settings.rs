//! Request settings sent along with every API call.

use bon::Builder;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

const DEFAULT_LANGUAGE: &str = "EN";

// Language codes end up in the URL path and in cache file names.
static LANGUAGE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,3}$").expect("language pattern must compile"));

/// Effective settings for one request.
///
/// Built by merging an optional [`SettingsOverride`] over [`Settings::default`]
/// with [`Settings::merged`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Settings {
    /// Language code of the response, e.g. `EN`, `DL`, `CR`.
    pub language: String,
    /// Use personal weather stations for current conditions.
    pub pws: bool,
    /// Use Weather Underground Best Forecast for forecasts.
    pub best_forecast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            pws: true,
            best_forecast: true,
        }
    }
}

impl Settings {
    /// Applies every explicitly and validly set field of `overrides` on top of
    /// the defaults. A language is valid when it is two or three ASCII letters
    /// (after trimming); anything else is ignored and keeps the default.
    pub fn merged(overrides: Option<&SettingsOverride>) -> Self {
        let mut settings = Self::default();
        let Some(overrides) = overrides else {
            return settings;
        };

        if let Some(language) = overrides.language.as_deref().map(str::trim) {
            if LANGUAGE_CODE.is_match(language) {
                settings.language = language.to_string();
            }
        }
        if let Some(pws) = overrides.pws {
            settings.pws = pws;
        }
        if let Some(best_forecast) = overrides.best_forecast {
            settings.best_forecast = best_forecast;
        }
        settings
    }

    /// The `key:value` path segments the API expects, in a fixed order.
    pub fn url_segments(&self) -> [String; 3] {
        [
            format!("lang:{}", self.language),
            format!("pws:{}", u8::from(self.pws)),
            format!("bestfct:{}", u8::from(self.best_forecast)),
        ]
    }
}

/// Formats as the `/`-joined settings path, e.g. `lang:EN/pws:1/bestfct:1`.
impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url_segments().join("/"))
    }
}

/// Caller supplied settings; `None` fields keep their default.
///
/// # Examples
///
/// ```
/// use wunderground::{Settings, SettingsOverride};
///
/// let overrides = SettingsOverride::builder().language("DL").best_forecast(false).build();
/// let settings = Settings::merged(Some(&overrides));
/// assert_eq!(settings.to_string(), "lang:DL/pws:1/bestfct:0");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct SettingsOverride {
    #[builder(into)]
    pub language: Option<String>,
    pub pws: Option<bool>,
    pub best_forecast: Option<bool>,
}
