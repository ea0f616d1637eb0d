use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("at JSON path {path} → {source}")]
pub struct PathError {
    pub path: String,
    pub source: serde_json::Error,
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, PathError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| PathError {
        path: err.path().to_string(),
        source: err.into_inner(),
    })
}

/// Every whitespace-separated document in `src`, in order (NDJSON and
/// concatenated JSON alike).
pub fn stream_with_path<T: DeserializeOwned>(src: &str) -> Result<Vec<T>, PathError> {
    let mut out = Vec::new();
    let mut rest = src;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return Ok(out);
        }
        let mut de = serde_json::Deserializer::from_str(rest);
        let value = serde_path_to_error::deserialize::<_, T>(&mut de).map_err(|err| PathError {
            path: err.path().to_string(),
            source: err.into_inner(),
        })?;
        out.push(value);
        // advance past the document just read
        let consumed = de.into_iter::<serde::de::IgnoredAny>().byte_offset();
        rest = &rest[consumed..];
    }
}
