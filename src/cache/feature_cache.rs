use crate::cache::codec::{JsonRecordCodec, RecordCodec, XmlRecordCodec};
use crate::cache::error::CacheError;
use crate::cache::record_document::{from_document, to_document};
use crate::types::cache_record::CacheRecord;
use log::info;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

pub type JsonFeatureCache = FeatureCache<JsonRecordCodec>;
pub type XmlFeatureCache = FeatureCache<XmlRecordCodec>;

/// Reads and writes cache records under a storage directory.
///
/// A record named `name` under the relative `path` lives at
/// `<storage_dir>/<path segments>/<name>`, e.g. `…/USA/ZIP/94107/EN.json`.
#[derive(Debug, Clone)]
pub struct FeatureCache<C> {
    storage_dir: PathBuf,
    codec: C,
}

impl<C: RecordCodec> FeatureCache<C> {
    pub fn new(storage_dir: &Path, codec: C) -> Self {
        Self {
            storage_dir: storage_dir.to_path_buf(),
            codec,
        }
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    fn directory(&self, path: &str) -> PathBuf {
        path.split('/')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .fold(self.storage_dir.clone(), |dir, segment| dir.join(segment))
    }

    /// Full path of the record file.
    pub fn file_path(&self, name: &str, path: &str) -> PathBuf {
        self.directory(path).join(name)
    }

    /// Loads a record. A missing or empty file is an empty record.
    ///
    /// # Errors
    ///
    /// [`CacheError::InvalidDataFormat`] when the file holds something that is
    /// not a record, [`CacheError::Read`] on other I/O failures.
    pub async fn read(&self, name: &str, path: &str) -> Result<CacheRecord, CacheError> {
        let file = self.file_path(name, path);

        let bytes = match fs::read(&file).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(CacheRecord::new()),
            Err(e) => return Err(CacheError::Read(file, e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(CacheRecord::new());
        }

        self.codec
            .decode(&bytes)
            .and_then(from_document)
            .map_err(|e| CacheError::InvalidDataFormat(file, e))
    }

    /// Stores a record, creating missing directories first and replacing any
    /// existing file.
    ///
    /// # Errors
    ///
    /// [`CacheError::DirCreation`] or [`CacheError::Write`] on I/O failure.
    pub async fn write(&self, name: &str, path: &str, record: &CacheRecord) -> Result<(), CacheError> {
        let directory = self.directory(path);
        let file = directory.join(name);

        let bytes = self
            .codec
            .encode(&to_document(record))
            .map_err(|e| CacheError::Encode(file.clone(), e))?;

        fs::create_dir_all(&directory)
            .await
            .map_err(|e| CacheError::DirCreation(directory.clone(), e))?;
        fs::write(&file, &bytes)
            .await
            .map_err(|e| CacheError::Write(file.clone(), e))?;

        info!("Wrote {} cached features ({} bytes) to {:?}", record.len(), bytes.len(), file);
        Ok(())
    }
}
