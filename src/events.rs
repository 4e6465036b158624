use anyhow::{Context as _, Result};
use emap_boundary as json;
use emap_core::entities::Event;
use serde_json::Value;
use std::{fs, path::Path};
use thiserror::Error;

use crate::records;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Conversion(#[from] json::ConversionError),
}

pub fn event_from_json(value: Value) -> Result<Event, RecordError> {
    let event: json::Event = serde_json::from_value(value)?;
    Ok(Event::try_from(event)?)
}

/// Load all events from a JSON file or a directory of record files.
///
/// Records that cannot be read are skipped.
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let records = if path.is_dir() {
        read_dir(path)?
    } else {
        read_file(path)?
    };
    let mut events = Vec::with_capacity(records.len());
    for (origin, value) in records {
        match event_from_json(value) {
            Ok(event) => events.push(event),
            Err(err) => {
                log::warn!("Skipping event {origin}: {err}");
            }
        }
    }
    log::debug!("Loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

fn read_file(path: &Path) -> Result<Vec<(String, Value)>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Unable to read events from {}", path.display()))?;
    let values: Vec<Value> = serde_json::from_str(&content)
        .with_context(|| format!("Expected a JSON array of events in {}", path.display()))?;
    Ok(values
        .into_iter()
        .enumerate()
        .map(|(i, value)| (format!("#{i} of {}", path.display()), value))
        .collect())
}

fn read_dir(path: &Path) -> Result<Vec<(String, Value)>> {
    let files = records::list_record_files(path)?;
    let mut values = Vec::with_capacity(files.len());
    for file in files {
        let origin = file.display().to_string();
        match records::read_record(&file) {
            Ok(value) => values.push((origin, value)),
            Err(err) => {
                log::warn!("Skipping event {origin}: {err:#}");
            }
        }
    }
    Ok(values)
}
