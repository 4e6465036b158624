use serde::Deserialize;
use std::path::PathBuf;

pub(crate) const DEFAULT_CONFIG_FILE: &str = include_str!("eventmap.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub map: Option<Map>,
    pub tiles: Option<Tiles>,
    pub defaults: Option<Defaults>,
    pub categories: Option<Vec<Category>>,
    pub filters: Option<Filters>,
    pub locations: Option<Vec<Location>>,
    pub events: Option<Events>,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Map {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: f64,
}

impl Default for Map {
    fn default() -> Self {
        Config::default().map.expect("Map configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Tiles {
    pub url: String,
    pub attribution: String,
    pub max_zoom: u8,
    pub subdomains: Option<String>,
}

impl Default for Tiles {
    fn default() -> Self {
        Config::default().tiles.expect("Tiles configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Defaults {
    pub category: Option<String>,
    pub time: Option<String>,
    pub distance: Option<String>,
    pub location: Option<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Config::default().defaults.expect("Defaults configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Category {
    pub tag: String,
    pub label: String,
}

pub fn default_categories() -> Vec<Category> {
    Config::default()
        .categories
        .expect("Categories configuration")
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Filters {
    pub time: Option<Vec<TimeFilter>>,
    pub distance: Option<Vec<DistanceFilter>>,
}

impl Default for Filters {
    fn default() -> Self {
        Config::default().filters.expect("Filters configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TimeFilter {
    pub id: String,
    pub label: String,
    pub hours: Option<u32>,
    pub days: Option<u32>,
    pub dynamic: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DistanceFilter {
    pub id: String,
    pub label: String,
    pub meters: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Location {
    pub id: String,
    pub label: String,
    pub lat: f64,
    pub lng: f64,
}

pub fn default_locations() -> Vec<Location> {
    Config::default().locations.expect("Locations configuration")
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Events {
    pub path: PathBuf,
}

impl Default for Events {
    fn default() -> Self {
        Config::default().events.expect("Events configuration")
    }
}
