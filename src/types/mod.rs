pub mod cache_record;
pub mod canonical_response;
pub mod feature;
pub mod output_format;
pub mod query;
pub mod settings;
