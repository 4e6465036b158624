use emap_boundary as json;
use emap_core::entities::{Event, MapConfig};
use leptos::document;
use serde_json::Value;

const MAP_CONFIG_ID: &str = "map-config";
const EVENTS_DATA_ID: &str = "events-data";

fn script_text(id: &str) -> Result<String, String> {
    document()
        .get_element_by_id(id)
        .and_then(|el| el.text_content())
        .ok_or_else(|| format!("Missing #{id} element"))
}

pub fn read_map_config() -> Result<MapConfig, String> {
    let text = script_text(MAP_CONFIG_ID)?;
    let config: json::MapConfig = serde_json::from_str(&text).map_err(|err| err.to_string())?;
    MapConfig::try_from(config).map_err(|err| err.to_string())
}

/// Invalid records are skipped.
pub fn read_events() -> Result<Vec<Event>, String> {
    let text = script_text(EVENTS_DATA_ID)?;
    let values: Vec<Value> = serde_json::from_str(&text).map_err(|err| err.to_string())?;
    let events = values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| {
            let event = serde_json::from_value::<json::Event>(value)
                .map_err(|err| err.to_string())
                .and_then(|event| Event::try_from(event).map_err(|err| err.to_string()));
            event
                .map_err(|err| log::warn!("Skipping event #{i}: {err}"))
                .ok()
        })
        .collect();
    Ok(events)
}
