/// layout reads and writes `layout.json`, the document the calendar page positions its doors from. Only the
/// values under `door` are ever rewritten; every other key, the order of keys and the spelling of numbers
/// survive a round trip.
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use door_placement::{DoorId, Integer, PlacementResult, Rect};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LayoutError;

pub const DOOR_SECTION: &str = "door";

/// One entry of the `door` section, in the field order the page expects.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DoorEntry {
    pub top: Integer,
    pub left: Integer,
    pub width: Integer,
    pub height: Integer,
}

impl From<&Rect> for DoorEntry {
    fn from(rect: &Rect) -> Self {
        Self {
            top: rect.top,
            left: rect.left,
            width: rect.width,
            height: rect.height,
        }
    }
}

/// `layout.json` -> `layout.json.bak`, next to the original.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("layout"));
    name.push(".bak");
    path.with_file_name(name)
}

#[derive(Clone, Debug)]
pub struct LayoutDocument {
    path: PathBuf,
    original: String,
    root: Map<String, Value>,
}

impl LayoutDocument {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let path = path.as_ref().to_path_buf();
        let original = fs::read_to_string(&path).map_err(|source| LayoutError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(path, original)
    }

    pub fn parse(path: impl Into<PathBuf>, original: String) -> Result<Self, LayoutError> {
        let path = path.into();
        let value: Value = serde_json::from_str(&original).map_err(|source| LayoutError::Parse {
            path: path.clone(),
            source,
        })?;
        match value {
            Value::Object(root) => Ok(Self {
                path,
                original,
                root,
            }),
            _ => Err(LayoutError::NotAnObject { path }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The document exactly as it was read.
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    fn door_section(&self) -> Result<&Map<String, Value>, LayoutError> {
        match self.root.get(DOOR_SECTION) {
            None => Err(LayoutError::MissingDoorSection {
                path: self.path.clone(),
            }),
            Some(Value::Object(doors)) => Ok(doors),
            Some(_) => Err(LayoutError::InvalidDoorSection {
                path: self.path.clone(),
            }),
        }
    }

    /// Keys of the `door` section, in document order.
    pub fn door_ids(&self) -> Result<Vec<DoorId>, LayoutError> {
        Ok(self
            .door_section()?
            .keys()
            .map(|key| DoorId::new(key.as_str()))
            .collect())
    }

    /// Overwrite every door with its placed rectangle. Door keys and their order stay as they are; a door
    /// without a rectangle in `placement` is an error and leaves the document unchanged.
    pub fn replace_doors(&mut self, placement: &PlacementResult) -> Result<(), LayoutError> {
        let mut doors = self.door_section()?.clone();
        for (key, value) in doors.iter_mut() {
            let rect = placement
                .get(&DoorId::new(key.as_str()))
                .ok_or_else(|| LayoutError::IncompletePlacement {
                    id: DoorId::new(key.as_str()),
                })?;
            *value = serde_json::to_value(DoorEntry::from(rect)).map_err(LayoutError::Serialize)?;
        }
        self.root.insert(DOOR_SECTION.to_string(), Value::Object(doors));
        Ok(())
    }

    /// Two space indented JSON with a trailing newline. Non-ASCII text is written as UTF-8, not escaped.
    pub fn to_pretty_json(&self) -> Result<String, LayoutError> {
        let mut rendered = serde_json::to_string_pretty(&self.root).map_err(LayoutError::Serialize)?;
        rendered.push('\n');
        Ok(rendered)
    }

    /// Copy the document as it was read to the sibling `.bak` file.
    pub fn write_backup(&self) -> Result<PathBuf, LayoutError> {
        let backup = backup_path(&self.path);
        fs::write(&backup, self.original.as_bytes()).map_err(|source| LayoutError::BackupWrite {
            path: backup.clone(),
            source,
        })?;
        Ok(backup)
    }

    pub fn save(&self) -> Result<(), LayoutError> {
        let rendered = self.to_pretty_json()?;
        fs::write(&self.path, rendered).map_err(|source| LayoutError::Write {
            path: self.path.clone(),
            source,
        })
    }
}


#[cfg(test)]
mod layout_document_tests {
    use door_placement::{Canvas, Placer, SizingPolicy};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;

    const LAYOUT: &str = r#"{
  "title": "Adventskalender für Groß und Klein",
  "scale": 1.50,
  "door": {
    "7": { "width": 18, "height": 22 },
    "1": { "width": 14, "height": 18 },
    "24": { "width": 20, "height": 24 }
  },
  "stage": { "background": "assets/bg.jpg" }
}"#;

    fn document(raw: &str) -> Result<LayoutDocument, LayoutError> {
        LayoutDocument::parse("layout.json", raw.to_string())
    }

    fn placement(doc: &LayoutDocument) -> PlacementResult {
        let placer = Placer::new(
            SizingPolicy::default().with_primary_secondary("24", "6"),
            Canvas::default(),
            10_000,
        );
        placer
            .place(doc.door_ids().unwrap(), &mut ChaCha20Rng::seed_from_u64(3))
            .unwrap()
    }

    #[test]
    fn test_door_ids_in_document_order() {
        let doc = document(LAYOUT).unwrap();
        let ids: Vec<String> = doc.door_ids().unwrap().iter().map(|id| id.to_string()).collect();
        assert_eq!(vec!["7", "1", "24"], ids);
    }

    #[test]
    fn test_missing_door_section() {
        let doc = document(r#"{ "title": "x" }"#).unwrap();
        assert!(matches!(doc.door_ids(), Err(LayoutError::MissingDoorSection { .. })));
    }

    #[test]
    fn test_door_section_must_be_object() {
        let doc = document(r#"{ "door": [1, 2, 3] }"#).unwrap();
        assert!(matches!(doc.door_ids(), Err(LayoutError::InvalidDoorSection { .. })));
    }

    #[test]
    fn test_top_level_must_be_object() {
        assert!(matches!(document("[1, 2]"), Err(LayoutError::NotAnObject { .. })));
        assert!(matches!(document("{ nope"), Err(LayoutError::Parse { .. })));
    }

    #[test]
    fn test_replace_doors_keeps_keys_and_other_fields() {
        let mut doc = document(LAYOUT).unwrap();
        let before = doc.root().clone();
        let placement = placement(&doc);
        doc.replace_doors(&placement).unwrap();

        for key in ["title", "scale", "stage"] {
            assert_eq!(before.get(key), doc.root().get(key), "{}", key);
        }
        let keys: Vec<&String> = doc.root().keys().collect();
        assert_eq!(vec!["title", "scale", "door", "stage"], keys);

        let doors = doc.root().get(DOOR_SECTION).unwrap().as_object().unwrap();
        let door_keys: Vec<&String> = doors.keys().collect();
        assert_eq!(vec!["7", "1", "24"], door_keys);
        let primary: DoorEntry = serde_json::from_value(doors.get("24").unwrap().clone()).unwrap();
        assert_eq!(18, primary.width);
        assert_eq!(18, primary.height);
        let fields: Vec<&String> = doors.get("7").unwrap().as_object().unwrap().keys().collect();
        assert_eq!(vec!["top", "left", "width", "height"], fields);
    }

    #[test]
    fn test_replace_doors_requires_every_door() {
        let mut doc = document(LAYOUT).unwrap();
        let err = doc.replace_doors(&PlacementResult::default()).unwrap_err();
        assert!(matches!(err, LayoutError::IncompletePlacement { .. }));
        assert_eq!(
            document(LAYOUT).unwrap().root().get(DOOR_SECTION),
            doc.root().get(DOOR_SECTION)
        );
    }

    #[test]
    fn test_pretty_json_keeps_utf8_and_number_spelling() {
        let doc = document(LAYOUT).unwrap();
        let rendered = doc.to_pretty_json().unwrap();
        assert!(rendered.contains("Adventskalender für Groß und Klein"));
        assert!(rendered.contains("\"scale\": 1.50"));
        assert!(rendered.starts_with("{\n  \"title\""));
        assert!(rendered.ends_with("}\n"));
    }
}
