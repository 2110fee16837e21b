use serde_json::{Map, Value};

use crate::error::IngestError;

/// One decoded form body: field name to field value, in order of first
/// appearance.
pub type Submission = Map<String, Value>;

/// Parse an `application/x-www-form-urlencoded` body.
///
/// Every `&`-separated segment must contain exactly one `=`. A single bad
/// segment rejects the whole body, so an empty body is rejected too.
/// Repeated fields keep the last value.
pub fn parse_form(body: &[u8]) -> Result<Submission, IngestError> {
    let body_str = std::str::from_utf8(body)
        .map_err(|e| IngestError::Malformed(format!("Invalid UTF-8: {e}")))?;

    let mut map = Map::new();
    for segment in body_str.split('&') {
        let separators = segment.matches('=').count();
        if separators != 1 {
            return Err(IngestError::Malformed(format!(
                "expected one '=' in segment {segment:?}, found {separators}"
            )));
        }

        // Decoding a lone `key=value` yields exactly one pair.
        for (key, value) in form_urlencoded::parse(segment.as_bytes()) {
            map.insert(key.into_owned(), Value::String(value.into_owned()));
        }
    }

    Ok(map)
}
