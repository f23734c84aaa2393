//! Input and output for a conversion run.
//!
//! Reads the Takeout JSON document into a [`FeatureCollection`] and writes the
//! rendered document. Structural problems fail the run here, before any
//! extraction happens. Output goes to a temporary file beside the target and
//! is renamed into place, so a failed run leaves no partial file behind.

use crate::error::{LauncherError, Result};
use crate::models::FeatureCollection;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

#[cfg(unix)]
const OUTPUT_FILE_MODE: u32 = 0o644;

/// Read and parse a feature collection from disk
pub fn read_collection(path: &Path) -> Result<FeatureCollection> {
    if !path.exists() {
        return Err(LauncherError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path)?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    let collection = parse_collection(&bytes, path)?;
    info!(
        "Loaded {} features from {}",
        collection.features.len(),
        path.display()
    );
    Ok(collection)
}

/// Parse a feature collection from JSON bytes; `origin` is used in errors only
///
/// Invalid UTF-8 is malformed input like any other JSON syntax error.
/// The document must be a JSON object. A missing or `null` `features` entry
/// reads as an empty collection; any other non-array value is a shape error.
pub fn parse_collection(input: impl AsRef<[u8]>, origin: &Path) -> Result<FeatureCollection> {
    let document: Value = serde_json::from_slice(input.as_ref())
        .map_err(|e| LauncherError::malformed(origin, e.to_string()))?;

    let mut object = match document {
        Value::Object(object) => object,
        other => {
            return Err(LauncherError::invalid_shape(
                origin,
                format!(
                    "expected a top-level object, found {}",
                    json_type_name(&other)
                ),
            ));
        }
    };

    match object.remove("features") {
        None | Some(Value::Null) => Ok(FeatureCollection::default()),
        Some(Value::Array(features)) => Ok(FeatureCollection { features }),
        Some(other) => Err(LauncherError::invalid_shape(
            origin,
            format!("'features' must be an array, found {}", json_type_name(&other)),
        )),
    }
}

/// Write `contents` to `path` atomically, creating parent directories
pub fn write_output(path: &Path, contents: &str) -> Result<usize> {
    let output_error = |source: std::io::Error| LauncherError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(output_error)?;

    let mut temp_file = NamedTempFile::new_in(parent).map_err(output_error)?;
    temp_file
        .write_all(contents.as_bytes())
        .and_then(|_| temp_file.flush())
        .map_err(output_error)?;

    // Temp files are created 0600; the published document must be world-readable
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp_file
            .as_file()
            .set_permissions(fs::Permissions::from_mode(OUTPUT_FILE_MODE))
            .map_err(output_error)?;
    }
    temp_file
        .persist(path)
        .map_err(|e| output_error(e.error))?;

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(contents.len())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn origin() -> &'static Path {
        Path::new("Saved Places.json")
    }

    #[test]
    fn test_parse_feature_collection() {
        let text = r#"{"type": "FeatureCollection", "features": [{"type": "Feature"}, 3]}"#;
        let collection = parse_collection(text, origin()).unwrap();
        assert_eq!(collection.features.len(), 2);
    }

    #[test]
    fn test_missing_or_null_features_is_empty() {
        assert!(
            parse_collection(r#"{"type": "FeatureCollection"}"#, origin())
                .unwrap()
                .features
                .is_empty()
        );
        assert!(
            parse_collection(r#"{"features": null}"#, origin())
                .unwrap()
                .features
                .is_empty()
        );
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let result = parse_collection("{not json", origin());
        assert!(matches!(result, Err(LauncherError::MalformedInput { .. })));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1.json");
        fs::write(&path, b"{\"features\": [\"\xff\"]}").unwrap();

        let result = read_collection(&path);
        assert!(matches!(result, Err(LauncherError::MalformedInput { .. })));
    }

    #[test]
    fn test_wrong_top_level_shape() {
        let result = parse_collection("[1, 2, 3]", origin());
        assert!(matches!(result, Err(LauncherError::InvalidShape { .. })));

        let result = parse_collection(r#"{"features": {"a": 1}}"#, origin());
        assert!(matches!(result, Err(LauncherError::InvalidShape { .. })));
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_collection(&temp_dir.path().join("absent.json"));
        assert!(matches!(result, Err(LauncherError::InputNotFound { .. })));
    }

    #[test]
    fn test_write_output_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("saved_places.html");

        let written = write_output(&path, "<html></html>").unwrap();
        assert_eq!(written, 13);
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_output_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("saved_places.html");
        write_output(&path, "x").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn test_write_output_replaces_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");
        fs::write(&path, "old contents that are longer").unwrap();

        write_output(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }
}
