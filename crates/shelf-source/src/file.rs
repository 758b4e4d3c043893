//! Loads a catalog snapshot from a JSON or YAML file.

use std::path::Path;

use serde_json::Value;
use shelf_core::CatalogItem;

use crate::error::SourceError;
use crate::parse::parse_catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Yaml,
}

fn detect_format(path: &Path) -> Option<FileFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "json" => Some(FileFormat::Json),
        "yaml" | "yml" => Some(FileFormat::Yaml),
        _ => None,
    }
}

/// Reads the catalog at `path`. The format follows the file extension.
///
/// # Errors
///
/// Returns [`SourceError::UnsupportedFormat`] for unknown extensions,
/// [`SourceError::Io`] if the file cannot be read, [`SourceError::Deserialize`]
/// or [`SourceError::Yaml`] if it does not parse, and
/// [`SourceError::MalformedCatalog`] if it holds no book list.
pub fn load_catalog_file(path: &Path) -> Result<Vec<CatalogItem>, SourceError> {
    let format = detect_format(path).ok_or_else(|| SourceError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let contents = std::fs::read_to_string(path).map_err(|e| SourceError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let context = path.display().to_string();
    let value: Value = match format {
        FileFormat::Json => {
            serde_json::from_str(&contents).map_err(|e| SourceError::Deserialize {
                context: context.clone(),
                source: e,
            })?
        }
        FileFormat::Yaml => serde_yaml::from_str(&contents).map_err(|e| SourceError::Yaml {
            path: path.to_path_buf(),
            source: e,
        })?,
    };

    let items = parse_catalog(value, &context)?;
    tracing::info!(path = %context, items = items.len(), "loaded catalog file");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn loads_json_array() {
        let file = write_temp(
            ".json",
            r#"[{"name": "Dune", "category": "Fiction", "oldPrice": 9.5}]"#,
        );
        let items = load_catalog_file(file.path()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name(), Some("Dune"));
        assert_eq!(items[0].category(), Some("Fiction"));
    }

    #[test]
    fn loads_yaml_books_object() {
        let file = write_temp(
            ".yaml",
            "books:\n  - name: Beowulf\n    category: Myth\n    discountPrice: \"$12.00\"\n    ratings: 4.5\n  - name: Odyssey\n    type: audiobook\n",
        );
        let items = load_catalog_file(file.path()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name(), Some("Beowulf"));
        assert!((items[0].rating() - 4.5).abs() < f64::EPSILON);
        assert_eq!(items[1].item_type(), Some("audiobook"));
    }

    #[test]
    fn yml_extension_is_yaml() {
        let file = write_temp(".yml", "- name: Emma\n");
        let items = load_catalog_file(file.path()).unwrap();
        assert_eq!(items[0].name(), Some("Emma"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_temp(".csv", "name\nDune\n");
        let err = load_catalog_file(file.path()).unwrap_err();
        assert!(
            matches!(err, SourceError::UnsupportedFormat { .. }),
            "expected UnsupportedFormat, got: {err:?}"
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_catalog_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }), "got: {err:?}");
    }

    #[test]
    fn invalid_json_is_deserialize_error() {
        let file = write_temp(".json", "[{\"name\": ");
        let err = load_catalog_file(file.path()).unwrap_err();
        assert!(matches!(err, SourceError::Deserialize { .. }), "got: {err:?}");
    }

    #[test]
    fn invalid_yaml_is_yaml_error() {
        let file = write_temp(".yaml", "books: [unterminated\n");
        let err = load_catalog_file(file.path()).unwrap_err();
        assert!(matches!(err, SourceError::Yaml { .. }), "got: {err:?}");
    }
}
