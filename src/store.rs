use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::error::IngestError;
use crate::submission::parser::Submission;

pub const STORE_FILE: &str = "data.json";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a record key: local time, second resolution.
pub fn timestamp_key(at: DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// JSON file of `{ "<timestamp>": { "<field>": "<value>" } }` records.
///
/// Every write rewrites the whole file in place. Only one writer may use a
/// given directory at a time.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
    path: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let path = dir.join(STORE_FILE);
        RecordStore { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current records. A missing file or one that is not a JSON
    /// object reads as empty.
    pub async fn load(&self) -> Result<Map<String, Value>, IngestError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Value>(&raw) {
            Ok(Value::Object(records)) => Ok(records),
            Ok(_) | Err(_) => {
                tracing::warn!("{} is not a JSON object, starting empty", self.path.display());
                Ok(Map::new())
            }
        }
    }

    /// Store a submission under the current timestamp and return the key.
    /// A second submission within the same second replaces the first.
    pub async fn append(&self, submission: Submission) -> Result<String, IngestError> {
        let key = timestamp_key(Local::now());
        self.insert(&key, submission).await?;
        Ok(key)
    }

    pub async fn insert(&self, key: &str, submission: Submission) -> Result<(), IngestError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let mut records = self.load().await?;
        records.insert(key.to_string(), Value::Object(submission));

        let encoded = encode(&records)?;
        tokio::fs::write(&self.path, encoded).await?;

        tracing::debug!("Stored record {key} ({} total)", records.len());
        Ok(())
    }
}

fn encode(records: &Map<String, Value>) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut ser)?;
    Ok(buf)
}
