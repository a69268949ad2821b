//! On-disk persistence of [`CacheRecord`](crate::CacheRecord)s, one file per
//! query path, language and format.

pub mod codec;
pub mod error;
pub mod feature_cache;
pub(crate) mod key_locks;
mod record_document;
