use anyhow::{anyhow, Context as _, Result};
use emap_boundary as json;
use emap_core::entities::*;
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "eventmap.toml";

pub struct Config {
    pub map: MapConfig,
    pub events: Events,
}

pub struct Events {
    /// A JSON file with an array of events or
    /// a directory with one JSON file per event.
    pub path: PathBuf,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)
                .with_context(|| format!("Invalid configuration file {}", file_path.display()))?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    raw::Config::default()
                }
                _ => return Err(err.into()),
            },
        };
        Self::try_from(raw_config)
    }
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            map,
            tiles,
            defaults,
            categories,
            filters,
            locations,
            events,
        } = from;

        let raw::Map {
            center_lat,
            center_lng,
            zoom,
        } = map.unwrap_or_default();
        let center = MapPoint::try_from_lat_lng_deg(center_lat, center_lng)
            .ok_or_else(|| anyhow!("Invalid map center {center_lat},{center_lng}"))?;
        if !(zoom >= 0.0) {
            return Err(anyhow!("Invalid zoom level {zoom}"));
        }
        let viewport = Viewport { center, zoom };

        let raw::Tiles {
            url,
            attribution,
            max_zoom,
            subdomains,
        } = tiles.unwrap_or_default();
        if url.is_empty() {
            return Err(anyhow!("Missing tile layer URL"));
        }
        let tiles = TileLayer {
            url_template: url,
            attribution,
            max_zoom,
            subdomains: TileLayer::subdomains_from_chars(
                subdomains.as_deref().unwrap_or(DEFAULT_SUBDOMAINS),
            ),
        };

        let raw::Defaults {
            category,
            time,
            distance,
            location,
        } = defaults.unwrap_or_default();
        let fallback = FilterSelection::default();
        let defaults = FilterSelection {
            category: category.unwrap_or(fallback.category),
            time: time.unwrap_or(fallback.time),
            distance: distance.unwrap_or(fallback.distance),
            location: location.unwrap_or(fallback.location),
        };

        let categories = categories
            .unwrap_or_else(raw::default_categories)
            .into_iter()
            .map(|raw::Category { tag, label }| CategoryOption {
                tag: tag.into(),
                label,
            })
            .collect();

        let raw::Filters { time, distance } = filters.unwrap_or_default();
        let time_windows = time
            .unwrap_or_default()
            .into_iter()
            .map(|raw::TimeFilter { id, label, hours, days, dynamic }| {
                TimeWindow::try_from(json::TimeFilter {
                    id,
                    label,
                    hours,
                    days,
                    dynamic,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let distances = distance
            .unwrap_or_default()
            .into_iter()
            .map(|raw::DistanceFilter { id, label, meters }| DistanceRadius {
                id,
                label,
                radius: meters.map(Distance::from_meters),
            })
            .collect();

        let locations = locations
            .unwrap_or_else(raw::default_locations)
            .into_iter()
            .map(|raw::Location { id, label, lat, lng }| {
                LocationPreset::try_from(json::Location { id, label, lat, lng })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let raw::Events { path } = events.unwrap_or_default();
        let events = Events { path };

        let map = MapConfig {
            viewport,
            tiles,
            defaults,
            categories,
            time_windows,
            distances,
            locations,
        };
        Ok(Self { map, events })
    }
}

/// Default selections that do not refer to a configured option.
pub fn dangling_defaults(config: &MapConfig) -> Vec<String> {
    let FilterSelection {
        category,
        time,
        distance,
        location,
    } = &config.defaults;
    let mut dangling = vec![];
    if category != CATEGORY_ALL && config.category(category).is_none() {
        dangling.push(format!("Unknown default category '{category}'"));
    }
    if time != TIME_WITHOUT_LIMIT && config.time_window(time).is_none() {
        dangling.push(format!("Unknown default time window '{time}'"));
    }
    if distance != DISTANCE_WITHOUT_LIMIT && config.distance(distance).is_none() {
        dangling.push(format!("Unknown default distance '{distance}'"));
    }
    if !location.is_empty() && config.location(location).is_none() {
        dangling.push(format!("Unknown default location '{location}'"));
    }
    dangling
}
