//! Builds and reverse-matches Weather Underground request URLs.

use crate::routing::error::RoutingError;
use crate::routing::url_template::{UrlParams, UrlTemplate};
use std::collections::HashMap;

/// Identifier of the one data endpoint: features, settings and query in the path.
pub const WEATHER_DATA: &str = "weather_data";

const WEATHER_DATA_TEMPLATE: &str = "/{features}/{settings}/q/{query}.{format}";

/// Registry of URL templates under a base URL and an access key.
///
/// Generated URLs have the shape `<base>/<access key><template path>[?query]`.
#[derive(Debug, Clone)]
pub struct UrlRouter {
    base_url: String,
    api_key: String,
    templates: HashMap<String, UrlTemplate>,
}

impl UrlRouter {
    /// Router for the Weather Underground API with its [`WEATHER_DATA`] template.
    ///
    /// # Errors
    ///
    /// Only fails if a built-in template does not compile.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, RoutingError> {
        Self::with_templates(base_url, api_key, [(WEATHER_DATA, WEATHER_DATA_TEMPLATE)])
    }

    /// Router with a custom set of `(identifier, template)` pairs.
    ///
    /// # Errors
    ///
    /// [`RoutingError::InvalidPattern`] if any template does not compile.
    pub fn with_templates<'a>(
        base_url: &str,
        api_key: &str,
        templates: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, RoutingError> {
        let templates = templates
            .into_iter()
            .map(|(id, template)| {
                UrlTemplate::compile(template).map(|compiled| (id.to_string(), compiled))
            })
            .collect::<Result<HashMap<_, _>, RoutingError>>()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            templates,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn template(&self, identifier: &str) -> Result<&UrlTemplate, RoutingError> {
        self.templates
            .get(identifier)
            .ok_or_else(|| RoutingError::TemplateNotFound(identifier.to_string()))
    }

    /// Generates the full URL of template `identifier`.
    ///
    /// Query parameters whose value is `None` are skipped; the others are
    /// appended as `key=value` with the value URL-encoded, joined by `&`.
    ///
    /// # Errors
    ///
    /// [`RoutingError::TemplateNotFound`] for an unknown identifier and
    /// [`RoutingError::MissingParameter`] when `path_params` lacks a placeholder.
    pub fn generate(
        &self,
        identifier: &str,
        path_params: &UrlParams,
        query_params: &[(&str, Option<&str>)],
    ) -> Result<String, RoutingError> {
        let path = self.template(identifier)?.expand(path_params)?;

        let query = query_params
            .iter()
            .filter_map(|(key, value)| value.map(|value| format!("{key}={}", urlencoding::encode(value))))
            .collect::<Vec<_>>()
            .join("&");

        let mut url = format!("{}/{}{}", self.base_url, self.api_key, path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        Ok(url)
    }

    /// Extracts the placeholder values of template `identifier` from `url`.
    ///
    /// The base URL must prefix `url`. The access key segment and any `?query`
    /// suffix are removed before matching.
    ///
    /// # Errors
    ///
    /// [`RoutingError::TemplateNotFound`], [`RoutingError::InvalidUrl`] when the
    /// base URL is missing and [`RoutingError::NoMatch`] when the path does not
    /// fit the template.
    pub fn parse(&self, identifier: &str, url: &str) -> Result<UrlParams, RoutingError> {
        let template = self.template(identifier)?;

        let path = url
            .strip_prefix(self.base_url.as_str())
            .ok_or_else(|| RoutingError::InvalidUrl(url.to_string()))?;
        let path = path.split_once('?').map_or(path, |(path, _)| path);
        let path = self.strip_api_key(path);

        template.captures(path).ok_or_else(|| RoutingError::NoMatch {
            template: identifier.to_string(),
            url: url.to_string(),
        })
    }

    fn strip_api_key<'a>(&self, path: &'a str) -> &'a str {
        if self.api_key.is_empty() {
            return path;
        }
        path.strip_prefix('/')
            .and_then(|rest| rest.strip_prefix(self.api_key.as_str()))
            .filter(|rest| rest.starts_with('/'))
            .unwrap_or(path)
    }

    /// `url` with the access key masked, for logging.
    pub fn redact(&self, url: &str) -> String {
        if self.api_key.is_empty() {
            url.to_string()
        } else {
            url.replace(self.api_key.as_str(), "***")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://api.wunderground.com/api";

    fn params(pairs: &[(&str, &str)]) -> UrlParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn router() -> UrlRouter {
        UrlRouter::new(&format!("{BASE}/"), "abc123").unwrap()
    }

    #[test]
    fn generates_weather_data_url() {
        let url = router()
            .generate(
                WEATHER_DATA,
                &params(&[
                    ("features", "conditions/tide"),
                    ("settings", "lang:EN/pws:1/bestfct:1"),
                    ("query", "Croatia/Zagreb"),
                    ("format", "json"),
                ]),
                &[],
            )
            .unwrap();

        assert_eq!(
            url,
            "http://api.wunderground.com/api/abc123/conditions/tide/lang:EN/pws:1/bestfct:1/q/Croatia/Zagreb.json"
        );
    }

    #[test]
    fn appends_non_null_query_parameters_encoded() {
        let url = router()
            .generate(
                WEATHER_DATA,
                &params(&[
                    ("features", "conditions"),
                    ("settings", "lang:EN"),
                    ("query", "94107"),
                    ("format", "xml"),
                ]),
                &[("callback", Some("my fn&co")), ("skipped", None), ("v", Some("2"))],
            )
            .unwrap();

        assert!(url.ends_with("/q/94107.xml?callback=my%20fn%26co&v=2"), "{url}");
    }

    #[test]
    fn unknown_template_is_reported() {
        let router = router();
        assert_eq!(
            router.generate("history", &UrlParams::new(), &[]),
            Err(RoutingError::TemplateNotFound("history".to_string()))
        );
        assert!(matches!(
            router.parse("history", BASE),
            Err(RoutingError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn generate_then_parse_round_trips() {
        let router = router();
        let original = params(&[
            ("features", "conditions"),
            ("settings", "lang:EN"),
            ("query", "94107"),
            ("format", "json"),
        ]);

        let url = router.generate(WEATHER_DATA, &original, &[]).unwrap();
        assert_eq!(router.parse(WEATHER_DATA, &url).unwrap(), original);

        let with_query = router
            .generate(WEATHER_DATA, &original, &[("x", Some("1"))])
            .unwrap();
        assert_eq!(router.parse(WEATHER_DATA, &with_query).unwrap(), original);
    }

    #[test]
    fn parse_rejects_foreign_and_mismatched_urls() {
        let router = router();
        assert!(matches!(
            router.parse(WEATHER_DATA, "https://example.com/abc123/conditions/lang:EN/q/1.json"),
            Err(RoutingError::InvalidUrl(_))
        ));
        assert!(matches!(
            router.parse(WEATHER_DATA, &format!("{BASE}/abc123/conditions/q/1.json")),
            Err(RoutingError::NoMatch { .. })
        ));
    }

    #[test]
    fn parse_accepts_urls_without_access_key() {
        let router = router();
        let parsed = router
            .parse(WEATHER_DATA, &format!("{BASE}/conditions/lang:EN/q/94107.json"))
            .unwrap();
        assert_eq!(parsed["features"], "conditions");
        assert_eq!(parsed["query"], "94107");
    }

    #[test]
    fn redacts_access_key() {
        let router = router();
        assert_eq!(router.redact(&format!("{BASE}/abc123/x")), format!("{BASE}/***/x"));
    }
}
