use std::fmt;
use std::path::Path;

use bson::Document;

#[derive(Debug)]
pub enum SeedError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::Io(e) => write!(f, "cannot read seed file: {e}"),
            SeedError::Json(e) => write!(f, "seed file is not a JSON array of objects: {e}"),
        }
    }
}

impl std::error::Error for SeedError {}

impl From<std::io::Error> for SeedError {
    fn from(e: std::io::Error) -> Self {
        SeedError::Io(e)
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(e: serde_json::Error) -> Self {
        SeedError::Json(e)
    }
}

/// Parse a JSON array of song objects.
pub fn parse_songs(json: &str) -> Result<Vec<Document>, SeedError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_songs(path: &Path) -> Result<Vec<Document>, SeedError> {
    let json = std::fs::read_to_string(path)?;
    parse_songs(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_array_of_objects() {
        let docs = parse_songs(
            r#"[{ "song": "song 1", "year": 2000, "plays": 112 }, { "song": "song 2" }]"#,
        )
        .unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].get_str("song").unwrap(), "song 1");
        assert!(docs[1].get("year").is_none());
    }

    #[test]
    fn rejects_non_array() {
        let err = parse_songs(r#"{ "song": "song 1" }"#).unwrap_err();
        assert!(matches!(err, SeedError::Json(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_songs(Path::new("no/such/songs.json")).unwrap_err();
        assert!(matches!(err, SeedError::Io(_)));
    }

    #[test]
    fn bundled_data_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/songs.json");
        let docs = load_songs(&path).unwrap();
        assert_eq!(docs.len(), 9);
    }
}
