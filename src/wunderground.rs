//! The main entry point: a Weather Underground client that answers from the
//! local feature cache where it can and makes one combined request for the rest.

use crate::cache::codec::{JsonRecordCodec, XmlRecordCodec};
use crate::cache::feature_cache::{JsonFeatureCache, XmlFeatureCache};
use crate::cache::key_locks::KeyLocks;
use crate::config::WundergroundConfig;
use crate::error::{InvalidArgument, WundergroundError};
use crate::parsing::error::ParseError;
use crate::parsing::json_parser::JsonParser;
use crate::parsing::xml_parser::XmlParser;
use crate::parsing::ResponseParser;
use crate::routing::url_router::{UrlRouter, WEATHER_DATA};
use crate::routing::url_template::UrlParams;
use crate::transport::http_transport::HttpTransport;
use crate::transport::{FetchRequest, Transport};
use crate::types::cache_record::CacheRecord;
use crate::types::canonical_response::FieldBundle;
use crate::types::feature::Feature;
use crate::types::output_format::OutputFormat;
use crate::types::query::{Query, QueryKind};
use crate::types::settings::{Settings, SettingsOverride};
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use bon::bon;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;

/// Weather data per feature, as returned by [`Wunderground::get_weather_data`].
pub type WeatherData = BTreeMap<Feature, FieldBundle>;

/// Client for the Weather Underground data API with a per-feature disk cache.
///
/// Every feature ([`Feature`]) is cached on its own, under the query, the
/// response language and the output format. A request only goes to the network
/// for features whose cached copy is missing or older than their TTL, and then
/// asks for all of them in one call.
///
/// Build one client at startup and share it by reference.
///
/// # Examples
///
/// ```no_run
/// # use wunderground::{Feature, OutputFormat, Wunderground, WundergroundError};
/// # async fn run() -> Result<(), WundergroundError> {
/// let client = Wunderground::from_env().await?;
///
/// let data = client
///     .weather_data()
///     .features(&[Feature::Conditions, Feature::Tide])
///     .query("Croatia/Zagreb")
///     .format(OutputFormat::Xml)
///     .call()
///     .await?;
///
/// if let Some(conditions) = data.get(&Feature::Conditions) {
///     println!("{}", conditions["current_observation"]);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Wunderground {
    router: UrlRouter,
    transport: Arc<dyn Transport>,
    json_cache: JsonFeatureCache,
    xml_cache: XmlFeatureCache,
    key_locks: KeyLocks,
}

#[bon]
impl Wunderground {
    /// Creates a client from `config`, talking HTTP to the API.
    ///
    /// # Errors
    ///
    /// Returns [`WundergroundError::CacheDirResolution`] if no cache directory is
    /// configured and the system one cannot be found, and
    /// [`WundergroundError::CacheDirCreation`] if the cache directory cannot be created.
    pub async fn with_config(config: WundergroundConfig) -> Result<Self, WundergroundError> {
        let transport = HttpTransport::new().map_err(WundergroundError::HttpClient)?;
        Self::with_transport(config, Arc::new(transport)).await
    }

    /// Creates a client with the default base URL and the system cache directory.
    ///
    /// # Errors
    ///
    /// See [`Wunderground::with_config`].
    pub async fn new(api_key: &str) -> Result<Self, WundergroundError> {
        Self::with_config(WundergroundConfig::builder().api_key(api_key).build()).await
    }

    /// Creates a client configured from the environment
    /// (see [`WundergroundConfig::from_env`]).
    ///
    /// # Errors
    ///
    /// [`WundergroundError::Config`] when no API key is set, otherwise see
    /// [`Wunderground::with_config`].
    pub async fn from_env() -> Result<Self, WundergroundError> {
        Self::with_config(WundergroundConfig::from_env()?).await
    }

    /// Creates a client that fetches through `transport`.
    ///
    /// # Errors
    ///
    /// See [`Wunderground::with_config`].
    pub async fn with_transport(
        config: WundergroundConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, WundergroundError> {
        let cache_dir = match config.cache_dir {
            Some(dir) => dir,
            None => get_cache_dir().map_err(WundergroundError::CacheDirResolution)?,
        };
        ensure_cache_dir_exists(&cache_dir)
            .await
            .map_err(|e| WundergroundError::CacheDirCreation(cache_dir.clone(), e))?;

        Ok(Self {
            router: UrlRouter::new(&config.base_url, &config.api_key)?,
            transport,
            json_cache: JsonFeatureCache::new(&cache_dir, JsonRecordCodec),
            xml_cache: XmlFeatureCache::new(&cache_dir, XmlRecordCodec),
            key_locks: KeyLocks::default(),
        })
    }

    /// Fetches weather data for a query, using the cache where possible.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.features(&[Feature])`: **Required.** The datasets to return; must not be empty.
    /// * `.query(&str)`: **Required.** `Region/City`, `<US state>/City`, a zip code or `pws:<station id>`.
    /// * `.format(OutputFormat)`: Optional. Wire and cache format. Defaults to JSON.
    /// * `.settings(SettingsOverride)`: Optional. Language, pws and best forecast overrides.
    ///
    /// # Errors
    ///
    /// See [`Wunderground::get_weather_data`].
    #[builder]
    pub async fn weather_data(
        &self,
        features: &[Feature],
        query: &str,
        format: Option<OutputFormat>,
        settings: Option<SettingsOverride>,
    ) -> Result<WeatherData, WundergroundError> {
        self.get_weather_data(features, settings.as_ref(), query, format.unwrap_or_default())
            .await
    }

    /// Fetches weather data for `query`.
    ///
    /// Features whose cached copy is fresh are answered from the cache; the
    /// others are requested together in a single call and the cache file is
    /// rewritten with the answer. A requested feature that is neither fresh in
    /// the cache nor present in the response is left out of the result.
    ///
    /// # Errors
    ///
    /// * [`WundergroundError::InvalidArgument`] for an empty feature list or an unsupported query.
    /// * [`WundergroundError::InvalidSettings`] for a `pws:` query with pws disabled.
    /// * [`WundergroundError::Cache`] if the cache file is unreadable or cannot be written.
    /// * [`WundergroundError::Parse`] if no usable response was received, or the
    ///   service answered with an error ([`ParseError::Api`]).
    ///
    /// No error leaves a partially updated cache file behind.
    pub async fn get_weather_data(
        &self,
        features: &[Feature],
        settings: Option<&SettingsOverride>,
        query: &str,
        format: OutputFormat,
    ) -> Result<WeatherData, WundergroundError> {
        self.weather_data_at(features, settings, query, format, Utc::now())
            .await
    }

    /// Same as [`Wunderground::get_weather_data`] with features and format given by name.
    ///
    /// # Errors
    ///
    /// [`WundergroundError::InvalidArgument`] for an unknown feature name or a
    /// format other than `json` or `xml`, otherwise see [`Wunderground::get_weather_data`].
    pub async fn get_weather_data_by_name(
        &self,
        features: &[&str],
        settings: Option<&SettingsOverride>,
        query: &str,
        format: &str,
    ) -> Result<WeatherData, WundergroundError> {
        let features = features
            .iter()
            .map(|name| name.parse::<Feature>())
            .collect::<Result<Vec<_>, _>>()?;
        let format = format.parse::<OutputFormat>()?;
        self.get_weather_data(&features, settings, query, format).await
    }

    pub(crate) async fn weather_data_at(
        &self,
        features: &[Feature],
        overrides: Option<&SettingsOverride>,
        query: &str,
        format: OutputFormat,
        now: DateTime<Utc>,
    ) -> Result<WeatherData, WundergroundError> {
        if features.is_empty() {
            return Err(InvalidArgument::new("features", "").into());
        }

        let query = Query::classify(query)?;
        let settings = Settings::merged(overrides);
        if query.kind() == QueryKind::StationId && !settings.pws {
            return Err(WundergroundError::InvalidSettings(format!(
                "query '{query}' searches by pws id, but pws is disabled in settings"
            )));
        }

        let cache_path = query.cache_path();
        let file_name = format!("{}.{}", settings.language, format.extension());
        let _guard = self
            .key_locks
            .lock(&self.cache_file(format, &file_name, &cache_path))
            .await;

        let mut record = self.read_record(format, &file_name, &cache_path).await?;
        let mut output = WeatherData::new();
        let mut stale = BTreeSet::new();

        for &feature in features {
            match record.fresh_bundle(feature, now) {
                Some(bundle) => {
                    output.insert(feature, bundle.clone());
                }
                None => {
                    stale.insert(feature);
                }
            }
        }

        if stale.is_empty() {
            info!("Cache hit for all features of '{}' ({})", query, file_name);
            return Ok(output);
        }
        info!(
            "Cache miss for {} feature(s) of '{}' ({}). Fetching from remote.",
            stale.len(),
            query,
            file_name
        );

        let url = self.request_url(&stale, &settings, &query, format)?;
        debug!("Requesting {}", self.router.redact(&url));
        let request = FetchRequest::get(url).header("Accept", format.mime_type());

        let payload = self.transport.fetch(&request).await.map_err(|e| {
            warn!("Fetching '{}' failed: {}", query, e);
            ParseError::NoData(e)
        })?;
        let response = parser(format).parse(&payload)?;

        for &feature in response.features() {
            let bundle = response.bundle_for(feature);
            record.insert(feature, bundle.clone(), now);
            output.insert(feature, bundle);
        }

        self.write_record(format, &file_name, &cache_path, &record)
            .await?;
        Ok(output)
    }

    fn request_url(
        &self,
        features: &BTreeSet<Feature>,
        settings: &Settings,
        query: &Query,
        format: OutputFormat,
    ) -> Result<String, WundergroundError> {
        let features = features
            .iter()
            .map(Feature::name)
            .collect::<Vec<_>>()
            .join("/");

        let params: UrlParams = [
            ("features", features),
            ("settings", settings.to_string()),
            ("query", query.as_str().to_string()),
            ("format", format.extension().to_string()),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();

        Ok(self.router.generate(WEATHER_DATA, &params, &[])?)
    }

    fn cache_file(&self, format: OutputFormat, name: &str, path: &str) -> PathBuf {
        match format {
            OutputFormat::Json => self.json_cache.file_path(name, path),
            OutputFormat::Xml => self.xml_cache.file_path(name, path),
        }
    }

    async fn read_record(
        &self,
        format: OutputFormat,
        name: &str,
        path: &str,
    ) -> Result<CacheRecord, WundergroundError> {
        let record = match format {
            OutputFormat::Json => self.json_cache.read(name, path).await?,
            OutputFormat::Xml => self.xml_cache.read(name, path).await?,
        };
        Ok(record)
    }

    async fn write_record(
        &self,
        format: OutputFormat,
        name: &str,
        path: &str,
        record: &CacheRecord,
    ) -> Result<(), WundergroundError> {
        match format {
            OutputFormat::Json => self.json_cache.write(name, path, record).await?,
            OutputFormat::Xml => self.xml_cache.write(name, path, record).await?,
        }
        Ok(())
    }
}

fn parser(format: OutputFormat) -> &'static dyn ResponseParser {
    match format {
        OutputFormat::Json => &JsonParser,
        OutputFormat::Xml => &XmlParser,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::error::TransportError;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tempfile::TempDir;

    const BASE_URL: &str = "http://api.test/api";

    /// Answers with queued payloads and remembers every request.
    #[derive(Default)]
    struct RecordingTransport {
        replies: Mutex<VecDeque<Result<Vec<u8>, TransportError>>>,
        requests: Mutex<Vec<FetchRequest>>,
    }

    impl RecordingTransport {
        fn replying(replies: impl IntoIterator<Item = &'static str>) -> Arc<Self> {
            let transport = Self::default();
            transport
                .replies
                .lock()
                .unwrap()
                .extend(replies.into_iter().map(|reply| Ok(reply.as_bytes().to_vec())));
            Arc::new(transport)
        }

        fn failing() -> Arc<Self> {
            let transport = Self::default();
            transport
                .replies
                .lock()
                .unwrap()
                .push_back(Err(TransportError::Unavailable("connection refused".to_string())));
            Arc::new(transport)
        }

        fn requests(&self) -> Vec<FetchRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn fetch(&self, request: &FetchRequest) -> Result<Vec<u8>, TransportError> {
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Unavailable("no reply queued".to_string())))
        }
    }

    async fn client(dir: &TempDir, transport: Arc<RecordingTransport>) -> Wunderground {
        let config = WundergroundConfig::builder()
            .api_key("KEY")
            .base_url(BASE_URL)
            .cache_dir(dir.path())
            .build();
        Wunderground::with_transport(config, transport).await.unwrap()
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
    }

    const CONDITIONS: &str = r#"{
        "response": {"version": "0.1", "features": {"conditions": 1}},
        "current_observation": {"temp_c": 21.5, "weather": "Clear"}
    }"#;

    const CONDITIONS_AND_TIDE: &str = r#"{
        "response": {"version": "0.1", "features": {"conditions": 1, "tide": 1}},
        "current_observation": {"temp_c": 21.5, "weather": "Clear"},
        "tide": {"tideInfo": [{"tideSite": "Zagreb"}]}
    }"#;

    const TIDE: &str = r#"{
        "response": {"version": "0.1", "features": {"tide": 1}},
        "tide": {"tideInfo": [{"tideSite": "Split"}]}
    }"#;

    #[tokio::test]
    async fn fetches_then_serves_from_cache() -> Result<(), WundergroundError> {
        let dir = TempDir::new().unwrap();
        let transport = RecordingTransport::replying([CONDITIONS]);
        let client = client(&dir, transport.clone()).await;

        let first = client
            .weather_data_at(&[Feature::Conditions], None, "Croatia/Zagreb", OutputFormat::Json, at(0))
            .await?;
        assert_eq!(
            first[&Feature::Conditions]["current_observation"],
            json!({"temp_c": 21.5, "weather": "Clear"})
        );

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url,
            "http://api.test/api/KEY/conditions/lang:EN/pws:1/bestfct:1/q/Croatia/Zagreb.json"
        );
        assert_eq!(
            requests[0].headers,
            vec![("Accept".to_string(), "application/json".to_string())]
        );
        assert!(dir.path().join("Croatia/Zagreb/EN.json").is_file());

        let second = client
            .weather_data_at(&[Feature::Conditions], None, "Croatia/Zagreb", OutputFormat::Json, at(3_599))
            .await?;
        assert_eq!(second, first);
        assert_eq!(transport.requests().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn requests_only_stale_features() -> Result<(), WundergroundError> {
        let dir = TempDir::new().unwrap();
        let transport = RecordingTransport::replying([CONDITIONS_AND_TIDE, TIDE]);
        let client = client(&dir, transport.clone()).await;
        let features = [Feature::Tide, Feature::Conditions];

        client
            .weather_data_at(&features, None, "Croatia/Zagreb", OutputFormat::Json, at(0))
            .await?;
        // Tide expires after half an hour, conditions after an hour.
        let data = client
            .weather_data_at(&features, None, "Croatia/Zagreb", OutputFormat::Json, at(1_800))
            .await?;

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0].url,
            "http://api.test/api/KEY/conditions/tide/lang:EN/pws:1/bestfct:1/q/Croatia/Zagreb.json"
        );
        assert_eq!(
            requests[1].url,
            "http://api.test/api/KEY/tide/lang:EN/pws:1/bestfct:1/q/Croatia/Zagreb.json"
        );
        assert_eq!(data[&Feature::Tide]["tide"], json!({"tideInfo": [{"tideSite": "Split"}]}));
        assert_eq!(data[&Feature::Conditions]["current_observation"]["weather"], json!("Clear"));

        let stored: serde_json::Value =
            serde_json::from_slice(&std::fs::read(dir.path().join("Croatia/Zagreb/EN.json")).unwrap()).unwrap();
        assert_eq!(stored["lastUpdated"]["tide"], json!(at(1_800).timestamp()));
        assert_eq!(stored["lastUpdated"]["conditions"], json!(at(0).timestamp()));
        Ok(())
    }

    #[tokio::test]
    async fn omits_features_missing_from_response() -> Result<(), WundergroundError> {
        let dir = TempDir::new().unwrap();
        let transport = RecordingTransport::replying([CONDITIONS]);
        let client = client(&dir, transport.clone()).await;

        let data = client
            .weather_data_at(&[Feature::Conditions, Feature::Tide], None, "94107", OutputFormat::Json, at(0))
            .await?;

        assert_eq!(data.keys().copied().collect::<Vec<_>>(), vec![Feature::Conditions]);
        assert!(dir.path().join("USA/ZIP/94107/EN.json").is_file());
        Ok(())
    }

    #[tokio::test]
    async fn settings_shape_url_and_cache_file() -> Result<(), WundergroundError> {
        let dir = TempDir::new().unwrap();
        let transport = RecordingTransport::replying([CONDITIONS]);
        let client = client(&dir, transport.clone()).await;
        let overrides = SettingsOverride::builder().language("DL").best_forecast(false).build();

        client
            .weather_data_at(&[Feature::Conditions], Some(&overrides), "CA/San_Francisco", OutputFormat::Json, at(0))
            .await?;

        assert_eq!(
            transport.requests()[0].url,
            "http://api.test/api/KEY/conditions/lang:DL/pws:1/bestfct:0/q/CA/San_Francisco.json"
        );
        assert!(dir.path().join("USA/CA/San_Francisco/DL.json").is_file());
        Ok(())
    }

    #[tokio::test]
    async fn malformed_language_falls_back_to_default() -> Result<(), WundergroundError> {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("cache");
        let transport = RecordingTransport::replying([CONDITIONS, CONDITIONS]);
        let config = WundergroundConfig::builder()
            .api_key("KEY")
            .base_url(BASE_URL)
            .cache_dir(&root)
            .build();
        let client = Wunderground::with_transport(config, transport.clone()).await?;

        for (language, query) in [("../../../escaped", "Croatia/Zagreb"), ("EN/pws:0", "94107")] {
            let overrides = SettingsOverride::builder().language(language).build();
            client
                .weather_data_at(&[Feature::Conditions], Some(&overrides), query, OutputFormat::Json, at(0))
                .await?;
        }

        let urls: Vec<_> = transport.requests().into_iter().map(|request| request.url).collect();
        assert_eq!(
            urls,
            vec![
                "http://api.test/api/KEY/conditions/lang:EN/pws:1/bestfct:1/q/Croatia/Zagreb.json",
                "http://api.test/api/KEY/conditions/lang:EN/pws:1/bestfct:1/q/94107.json",
            ]
        );
        assert!(root.join("Croatia/Zagreb/EN.json").is_file());
        assert!(root.join("USA/ZIP/94107/EN.json").is_file());
        assert!(!dir.path().join("escaped.json").exists());
        assert!(!root.join("escaped.json").exists());
        Ok(())
    }

    #[tokio::test]
    async fn xml_format_round_trips_through_cache() -> Result<(), WundergroundError> {
        let dir = TempDir::new().unwrap();
        let transport = RecordingTransport::replying([
            "<response><version>0.1</version><features><feature>conditions</feature></features>\
             <current_observation><temp_c>21</temp_c></current_observation></response>",
        ]);
        let client = client(&dir, transport.clone()).await;

        let fetched = client
            .weather_data_at(&[Feature::Conditions], None, "pws:KCASANFR70", OutputFormat::Xml, at(0))
            .await?;
        let cached = client
            .weather_data_at(&[Feature::Conditions], None, "pws:KCASANFR70", OutputFormat::Xml, at(60))
            .await?;

        assert_eq!(fetched[&Feature::Conditions]["current_observation"], json!({"temp_c": "21"}));
        assert_eq!(cached, fetched);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.ends_with("/q/pws:KCASANFR70.xml"), "{}", requests[0].url);
        assert_eq!(requests[0].headers[0].1, "application/xml");
        assert!(dir.path().join("pws/KCASANFR70/EN.xml").is_file());
        Ok(())
    }

    #[tokio::test]
    async fn station_query_requires_pws() {
        let dir = TempDir::new().unwrap();
        let transport = RecordingTransport::replying([CONDITIONS]);
        let client = client(&dir, transport.clone()).await;
        let overrides = SettingsOverride::builder().pws(false).build();

        let err = client
            .get_weather_data(&[Feature::Conditions], Some(&overrides), "pws:KCASANFR70", OutputFormat::Json)
            .await
            .unwrap_err();

        assert!(matches!(err, WundergroundError::InvalidSettings(_)), "{err}");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn rejects_bad_arguments_before_fetching() {
        let dir = TempDir::new().unwrap();
        let transport = RecordingTransport::replying([CONDITIONS]);
        let client = client(&dir, transport.clone()).await;

        let empty = client
            .get_weather_data(&[], None, "Croatia/Zagreb", OutputFormat::Json)
            .await;
        let bad_query = client
            .get_weather_data(&[Feature::Conditions], None, "Zagreb", OutputFormat::Json)
            .await;
        let bad_format = client
            .get_weather_data_by_name(&["conditions"], None, "Croatia/Zagreb", "yaml")
            .await;
        let bad_feature = client
            .get_weather_data_by_name(&["weather"], None, "Croatia/Zagreb", "json")
            .await;

        for result in [empty, bad_query, bad_format, bad_feature] {
            let err = result.unwrap_err();
            assert!(matches!(err, WundergroundError::InvalidArgument(_)), "{err}");
            assert!(err.is_recoverable());
        }
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn api_error_leaves_cache_untouched() {
        let dir = TempDir::new().unwrap();
        let transport = RecordingTransport::replying([
            r#"{"response": {"version": "0.1", "error": {"type": "keynotfound", "description": "this key does not exist"}}}"#,
        ]);
        let client = client(&dir, transport.clone()).await;

        let err = client
            .get_weather_data(&[Feature::Conditions], None, "Croatia/Zagreb", OutputFormat::Json)
            .await
            .unwrap_err();

        match &err {
            WundergroundError::Parse(ParseError::Api { kind, description }) => {
                assert_eq!(kind, "keynotfound");
                assert_eq!(description, "this key does not exist");
            }
            other => panic!("expected an API error, got {other:?}"),
        }
        assert!(err.is_recoverable());
        assert!(!dir.path().join("Croatia/Zagreb/EN.json").exists());
    }

    #[tokio::test]
    async fn transport_failure_is_runtime_parse_error() {
        let dir = TempDir::new().unwrap();
        let client = client(&dir, RecordingTransport::failing()).await;

        let err = client
            .get_weather_data(&[Feature::Conditions], None, "Croatia/Zagreb", OutputFormat::Json)
            .await
            .unwrap_err();

        match &err {
            WundergroundError::Parse(parse) => assert!(parse.is_runtime_error(), "{parse}"),
            other => panic!("expected a parse error, got {other:?}"),
        }
        assert!(!err.is_recoverable());
    }

    #[tokio::test]
    async fn builder_defaults_to_json() -> Result<(), WundergroundError> {
        let dir = TempDir::new().unwrap();
        let transport = RecordingTransport::replying([CONDITIONS]);
        let client = client(&dir, transport.clone()).await;

        let data = client
            .weather_data()
            .features(&[Feature::Conditions])
            .query("Croatia/Zagreb")
            .call()
            .await?;

        assert!(data.contains_key(&Feature::Conditions));
        assert!(transport.requests()[0].url.ends_with(".json"));
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_requests_for_same_file_fetch_once() -> Result<(), WundergroundError> {
        let dir = TempDir::new().unwrap();
        let transport = RecordingTransport::replying([CONDITIONS]);
        let client = client(&dir, transport.clone()).await;

        let (a, b) = tokio::join!(
            client.weather_data_at(&[Feature::Conditions], None, "Croatia/Zagreb", OutputFormat::Json, at(0)),
            client.weather_data_at(&[Feature::Conditions], None, "Croatia/Zagreb", OutputFormat::Json, at(0)),
        );

        assert_eq!(a?, b?);
        assert_eq!(transport.requests().len(), 1);
        Ok(())
    }
}
