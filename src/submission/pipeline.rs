use crate::error::IngestError;
use crate::store::RecordStore;

use super::parser;

/// Decode one relayed payload and persist it. Nothing is written unless the
/// whole body parses.
pub async fn run(store: &RecordStore, payload: &[u8]) -> Result<String, IngestError> {
    let submission = parser::parse_form(payload)?;
    let fields = submission.len();

    let key = store.append(submission).await?;
    tracing::info!("Saved submission {key} ({fields} fields)");

    Ok(key)
}
