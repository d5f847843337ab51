//! Room template catalogs
//!
//! A catalog is the JSON array of templates the editor exports. Loading does
//! not validate; call [`validate_catalog`] before generating.

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use thiserror::Error;

use crate::dungeon::{RoomTemplate, RoomType};
use crate::error::GenerateError;

/// Catalog IO and validation errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] GenerateError),

    #[error("Duplicate template id \"{0}\"")]
    DuplicateId(String),
}

/// Load a catalog from a JSON file
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<RoomTemplate>, CatalogError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Parse a catalog from JSON text
pub fn parse_catalog(json: &str) -> Result<Vec<RoomTemplate>, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

/// Write a catalog as pretty-printed JSON
pub fn save_catalog(templates: &[RoomTemplate], path: impl AsRef<Path>) -> Result<(), CatalogError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, templates)?;
    Ok(())
}

/// Check every template and that ids are unique
pub fn validate_catalog(templates: &[RoomTemplate]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for template in templates {
        template.validate()?;
        if !seen.insert(template.id.as_str()) {
            return Err(CatalogError::DuplicateId(template.id.clone()));
        }
    }
    Ok(())
}

/// Number of templates per room type
pub fn count_by_type(templates: &[RoomTemplate]) -> BTreeMap<RoomType, usize> {
    let mut counts = BTreeMap::new();
    for template in templates {
        *counts.entry(template.room_type).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {
            "id": "hall",
            "type": "monsters",
            "width": 3,
            "height": 2,
            "layers": {
                "tiles": [[0, 0, 0], [0, 1, 0]],
                "props": [[0, 12, 0], [0, 0, 0]],
                "monsters": [[0, 0, 0], [2, 0, 0]]
            }
        },
        {
            "id": "start",
            "type": "entrance",
            "width": 1,
            "height": 1,
            "layers": { "tiles": [[0]], "props": [[21]], "monsters": [[0]] }
        }
    ]"#;

    #[test]
    fn test_parse_catalog() {
        let templates = parse_catalog(CATALOG).unwrap();
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0].room_type, RoomType::Monsters);
        assert_eq!(templates[0].layers.tiles.get(1, 1), Some(1));
        assert_eq!(templates[1].layers.props.get(0, 0), Some(21));
        assert!(validate_catalog(&templates).is_ok());
    }

    #[test]
    fn test_unknown_room_type_fails_to_parse() {
        let json = CATALOG.replace("\"entrance\"", "\"lobby\"");
        assert!(matches!(parse_catalog(&json), Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_duplicate_id() {
        let mut templates = parse_catalog(CATALOG).unwrap();
        templates[1].id = "hall".to_string();
        match validate_catalog(&templates) {
            Err(CatalogError::DuplicateId(id)) => assert_eq!(id, "hall"),
            other => panic!("expected duplicate id, got {other:?}"),
        }
    }

    #[test]
    fn test_layer_size_mismatch() {
        let mut templates = parse_catalog(CATALOG).unwrap();
        templates[0].height = 3;
        let err = validate_catalog(&templates).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Invalid(GenerateError::InvalidTemplate { .. })
        ));
        assert!(err.to_string().contains("hall"));
    }

    #[test]
    fn test_count_by_type() {
        let mut templates = parse_catalog(CATALOG).unwrap();
        templates.push(RoomTemplate::blank("another", RoomType::Monsters, 2, 2));
        let counts = count_by_type(&templates);
        assert_eq!(counts.get(&RoomType::Monsters), Some(&2));
        assert_eq!(counts.get(&RoomType::Entrance), Some(&1));
        assert_eq!(counts.get(&RoomType::Boss), None);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join("dg_core_test_catalog.json");
        let templates = parse_catalog(CATALOG).unwrap();
        save_catalog(&templates, &path).unwrap();
        let loaded = load_catalog(&path).unwrap();
        assert_eq!(loaded, templates);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_nonexistent() {
        let result = load_catalog("/nonexistent/path/catalog.json");
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
