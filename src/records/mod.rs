//! Raw event records as they are stored in the events directory.
//!
//! Records are kept as JSON objects so that fields unknown to the
//! event map survive listing, comparing and merging.

use anyhow::{anyhow, Context as _, Result};
use emap_core::entities::Timestamp;
use serde::Serialize;
use serde_json::{Map, Value};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub mod generate;

pub type Record = Map<String, Value>;

const FRONT_MATTER_DELIMITER: &str = "---";

pub const LAST_UPDATED_FIELD: &str = "last_updated";

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("missing front matter")]
    Missing,
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

fn is_record_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext == "json" || ext == "md")
}

/// All record files of a directory in file-name order.
pub fn list_record_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Unable to read events directory {}", dir.display()))?
    {
        let file = entry?.path();
        if is_record_file(&file) {
            files.push(file);
        }
    }
    files.sort();
    Ok(files)
}

/// Extract the YAML front matter of a markdown document.
///
/// The body after the closing delimiter is ignored.
pub fn parse_front_matter(content: &str) -> Result<Value, FrontMatterError> {
    let rest = content
        .trim_start_matches('\u{feff}')
        .strip_prefix(FRONT_MATTER_DELIMITER)
        .ok_or(FrontMatterError::Missing)?;
    let mut front = None;
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if offset > 0 && line.trim_end() == FRONT_MATTER_DELIMITER {
            front = Some(&rest[..offset]);
            break;
        }
        offset += line.len();
    }
    let front = front.ok_or(FrontMatterError::Missing)?;
    Ok(serde_yaml::from_str(front)?)
}

/// Read a single record from a `*.json` or `*.md` file.
pub fn read_record(path: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Unable to read {}", path.display()))?;
    let value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        Some("md") => parse_front_matter(&content)?,
        _ => return Err(anyhow!("Unsupported record file {}", path.display())),
    };
    Ok(value)
}

pub fn read_record_object(path: &Path) -> Result<Record> {
    match read_record(path)? {
        Value::Object(record) => Ok(record),
        _ => Err(anyhow!("Expected a single event record in {}", path.display())),
    }
}

/// Write a record as pretty-printed JSON.
pub fn write_record<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Unable to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(record)?;
    fs::write(path, json).with_context(|| format!("Unable to write {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    pub old: Value,
    pub new: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordDiff {
    pub identical: bool,
    pub added_fields: Vec<String>,
    pub removed_fields: Vec<String>,
    pub modified_fields: BTreeMap<String, FieldChange>,
    pub unchanged_fields: Vec<String>,
}

pub fn compare_records(old: &Record, new: &Record) -> RecordDiff {
    let mut added_fields: Vec<_> = new
        .keys()
        .filter(|key| !old.contains_key(*key))
        .cloned()
        .collect();
    let mut removed_fields: Vec<_> = old
        .keys()
        .filter(|key| !new.contains_key(*key))
        .cloned()
        .collect();
    let mut modified_fields = BTreeMap::new();
    let mut unchanged_fields = vec![];
    for (key, old_value) in old {
        let Some(new_value) = new.get(key) else {
            continue;
        };
        if old_value == new_value {
            unchanged_fields.push(key.clone());
        } else {
            modified_fields.insert(
                key.clone(),
                FieldChange {
                    old: old_value.clone(),
                    new: new_value.clone(),
                },
            );
        }
    }
    added_fields.sort();
    removed_fields.sort();
    unchanged_fields.sort();
    RecordDiff {
        identical: old == new,
        added_fields,
        removed_fields,
        modified_fields,
        unchanged_fields,
    }
}

/// Copy all fields (or only the given ones) of `updates` into `base`.
pub fn merge_records(
    mut base: Record,
    updates: &Record,
    fields: Option<&[String]>,
    now: Timestamp,
) -> Record {
    match fields {
        None => {
            for (key, value) in updates {
                base.insert(key.clone(), value.clone());
            }
        }
        Some(fields) => {
            for field in fields {
                if let Some(value) = updates.get(field) {
                    base.insert(field.clone(), value.clone());
                }
            }
        }
    }
    base.insert(LAST_UPDATED_FIELD.to_string(), now.to_string().into());
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(record) => record,
            _ => panic!("object expected"),
        }
    }

    #[test]
    fn parse_jekyll_front_matter() {
        let content = "---\ntitle: Punk im Hof\ncategory: music\ndate: 2026-10-24T20:00:00+02:00\nlat: 50.3167\nlng: 11.9167\nvenue:\n  name: Galeriehaus\n---\n\nKommt alle!\n---\n";
        let value = parse_front_matter(content).unwrap();
        assert_eq!(value["title"], "Punk im Hof");
        assert_eq!(value["date"], "2026-10-24T20:00:00+02:00");
        assert_eq!(value["lat"], 50.3167);
        assert_eq!(value["venue"]["name"], "Galeriehaus");
        assert!(value.get("content").is_none());
    }

    #[test]
    fn reject_markdown_without_front_matter() {
        assert!(matches!(
            parse_front_matter("# Punk im Hof\n"),
            Err(FrontMatterError::Missing)
        ));
        assert!(matches!(
            parse_front_matter("---\ntitle: never closed\n"),
            Err(FrontMatterError::Missing)
        ));
        assert!(matches!(
            parse_front_matter("---\ntitle: [unbalanced\n---\n"),
            Err(FrontMatterError::Yaml(_))
        ));
    }

    #[test]
    fn list_json_and_markdown_records() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.md", "a.json", "c.txt", "d.json"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("e.json")).unwrap();
        let files = list_record_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.json", "b.md", "d.json"]);
    }

    #[test]
    fn compare_two_records() {
        let old = record(json!({ "title": "Punk", "date": "2026-10-24", "status": "draft" }));
        let new = record(json!({ "title": "Punk im Hof", "date": "2026-10-24", "lat": 50.3 }));
        let diff = compare_records(&old, &new);
        assert!(!diff.identical);
        assert_eq!(diff.added_fields, vec!["lat"]);
        assert_eq!(diff.removed_fields, vec!["status"]);
        assert_eq!(diff.unchanged_fields, vec!["date"]);
        assert_eq!(
            diff.modified_fields["title"],
            FieldChange {
                old: json!("Punk"),
                new: json!("Punk im Hof")
            }
        );
        assert!(compare_records(&old, &old).identical);
    }

    #[test]
    fn merge_selected_fields() {
        let now: Timestamp = "2026-10-19T12:00:00Z".parse().unwrap();
        let base = record(json!({ "title": "Punk", "date": "2026-10-24", "id": "1" }));
        let updates = record(json!({ "title": "Punk im Hof", "date": "2026-10-25", "lat": 50.3 }));

        let fields = vec!["title".to_string(), "missing".to_string()];
        let merged = merge_records(base.clone(), &updates, Some(&fields), now);
        assert_eq!(merged["title"], "Punk im Hof");
        assert_eq!(merged["date"], "2026-10-24");
        assert_eq!(merged["id"], "1");
        assert!(!merged.contains_key("lat"));
        assert!(!merged.contains_key("missing"));
        assert_eq!(merged[LAST_UPDATED_FIELD], "2026-10-19T12:00:00Z");

        let merged = merge_records(base, &updates, None, now);
        assert_eq!(merged["date"], "2026-10-25");
        assert_eq!(merged["lat"], 50.3);
        assert_eq!(merged["id"], "1");
    }

    #[test]
    fn write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("punk.json");
        let punk = record(json!({ "title": "Punk im Hof", "genre": "Punk" }));
        write_record(&file, &punk).unwrap();
        assert_eq!(read_record_object(&file).unwrap(), punk);
    }
}
