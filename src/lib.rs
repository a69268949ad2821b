mod cache;
mod config;
mod error;
mod parsing;
mod routing;
mod transport;
mod types;
mod utils;
mod wunderground;

pub use error::{InvalidArgument, WundergroundError};
pub use wunderground::*;

pub use config::{ConfigError, WundergroundConfig, API_KEY_VAR, BASE_URL_VAR, CACHE_DIR_VAR, DEFAULT_BASE_URL};

pub use types::cache_record::{CacheRecord, CachedFeature};
pub use types::canonical_response::{CanonicalResponse, FieldBundle};
pub use types::feature::Feature;
pub use types::output_format::OutputFormat;
pub use types::query::{Query, QueryKind};
pub use types::settings::{Settings, SettingsOverride};

pub use routing::url_router::{UrlRouter, WEATHER_DATA};
pub use routing::url_template::{UrlParams, UrlTemplate};

pub use transport::http_transport::HttpTransport;
pub use transport::{FetchRequest, Transport};

pub use parsing::json_parser::JsonParser;
pub use parsing::xml_parser::XmlParser;
pub use parsing::ResponseParser;

pub use cache::codec::{JsonRecordCodec, RecordCodec, XmlRecordCodec};
pub use cache::feature_cache::{FeatureCache, JsonFeatureCache, XmlFeatureCache};

pub use cache::error::{CacheError, CodecError};
pub use parsing::error::ParseError;
pub use routing::error::RoutingError;
pub use transport::error::TransportError;
pub use parsing::xml_value::XmlError;
