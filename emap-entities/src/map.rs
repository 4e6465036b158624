use crate::{category::*, filter::*, geo::*};

pub const DEFAULT_SUBDOMAINS: &str = "abcd";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: MapPoint,
    pub zoom: f64,
}

/// Descriptor of the base layer with the map imagery.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    /// e.g. `https://{s}.basemaps.example.org/{z}/{x}/{y}.png`
    pub url_template : String,
    pub attribution  : String,
    pub max_zoom     : u8,
    /// Rotated for the `{s}` placeholder
    pub subdomains   : Vec<String>,
}

impl TileLayer {
    pub fn subdomains_from_chars(chars: &str) -> Vec<String> {
        chars.chars().map(String::from).collect()
    }
}

/// Everything the map needs at startup. Immutable afterwards.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub viewport     : Viewport,
    pub tiles        : TileLayer,
    pub defaults     : FilterSelection,
    pub categories   : Vec<CategoryOption>,
    pub time_windows : Vec<TimeWindow>,
    pub distances    : Vec<DistanceRadius>,
    pub locations    : Vec<LocationPreset>,
}

impl MapConfig {
    pub fn time_window(&self, id: &str) -> Option<&TimeWindow> {
        self.time_windows.iter().find(|w| w.id == id)
    }

    pub fn distance(&self, id: &str) -> Option<&DistanceRadius> {
        self.distances.iter().find(|d| d.id == id)
    }

    pub fn location(&self, id: &str) -> Option<&LocationPreset> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn category(&self, tag: &str) -> Option<&CategoryOption> {
        self.categories.iter().find(|c| c.tag.as_str() == tag)
    }
}
