use serde_json::{
    Map,
    Value,
};
use url::form_urlencoded;

use crate::error::FileError;

pub const FIELD_FILENAME: &str = "filename";
pub const FIELD_CONTENT: &str = "content";

/// A validated client request against a single file.
#[derive(Debug, PartialEq)]
pub struct FileRequest {
    pub filename: String,
    pub content: Option<String>,
}

/// Decode a JSON request body into untyped fields.
///
/// An empty body yields no fields. A body that is valid JSON but not an object also yields no
/// fields, so that validation reports what is missing.
pub fn body_fields(body: &str) -> Result<Map<String, Value>, FileError> {
    if body.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(v)) => {
            Ok(v)
        },
        Ok(_) => {
            Ok(Map::new())
        },
        Err(e) => {
            Err(FileError::MalformedBody(e.to_string()))
        },
    }
}

/// Decode a URL query string into untyped fields. The first occurrence of a key wins.
pub fn query_fields(query: &str) -> Map<String, Value> {
    let mut fields = Map::new();
    for (k, v) in form_urlencoded::parse(query.as_bytes()) {
        if !fields.contains_key(k.as_ref()) {
            fields.insert(k.into_owned(), Value::String(v.into_owned()));
        }
    }
    fields
}

// An empty string counts as absent.
fn string_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    match fields.get(name) {
        Some(Value::String(v)) if !v.is_empty() => Some(v.clone()),
        _ => None,
    }
}

/// Check that every field in `required` is present as a string.
///
/// All absent fields are reported together.
pub fn require(fields: &Map<String, Value>, required: &[&'static str]) -> Result<(), FileError> {
    let missing: Vec<&'static str> = required.iter()
        .filter(|k| string_field(fields, k).is_none())
        .copied()
        .collect();
    if missing.len() > 0 {
        return Err(FileError::MissingField(missing));
    }
    Ok(())
}

/// Validate fields for create and modify, which need both filename and content.
pub fn write_request(fields: &Map<String, Value>) -> Result<FileRequest, FileError> {
    require(fields, &[FIELD_FILENAME, FIELD_CONTENT])?;
    Ok(FileRequest{
        filename: string_field(fields, FIELD_FILENAME).unwrap_or_default(),
        content: string_field(fields, FIELD_CONTENT),
    })
}

/// Validate fields for read and delete, which need the filename only.
pub fn name_request(fields: &Map<String, Value>) -> Result<FileRequest, FileError> {
    require(fields, &[FIELD_FILENAME])?;
    Ok(FileRequest{
        filename: string_field(fields, FIELD_FILENAME).unwrap_or_default(),
        content: None,
    })
}
