//! Preconfigured filter options ("buckets") a visitor can choose from.

use crate::{geo::*, time::Duration};

/// Category selection that matches every event.
pub const CATEGORY_ALL: &str = "all";

/// Time window selection that matches every event.
pub const TIME_WITHOUT_LIMIT: &str = "withoutLimit";

/// Distance selection that matches every event.
pub const DISTANCE_WITHOUT_LIMIT: &str = "withoutLimit";

/// The look-ahead of a time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSpan {
    Hours(u32),
    Days(u32),
    /// Computed at runtime from external data (e.g. "till full moon").
    /// Not implemented yet: such windows match every event.
    Dynamic,
    Unbounded,
}

impl TimeSpan {
    pub fn duration(self) -> Option<Duration> {
        match self {
            Self::Hours(hours) => Some(Duration::hours(i64::from(hours))),
            Self::Days(days) => Some(Duration::days(i64::from(days))),
            Self::Dynamic | Self::Unbounded => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub id: String,
    pub label: String,
    pub span: TimeSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceRadius {
    pub id: String,
    pub label: String,
    /// `None` means "no limit"
    pub radius: Option<Distance>,
}

/// A named reference location that recenters the map.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationPreset {
    pub id: String,
    pub label: String,
    pub pos: MapPoint,
}

/// The identifiers of the currently selected filter options.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub category : String,
    pub time     : String,
    pub distance : String,
    pub location : String,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            category: CATEGORY_ALL.to_owned(),
            time: TIME_WITHOUT_LIMIT.to_owned(),
            distance: DISTANCE_WITHOUT_LIMIT.to_owned(),
            location: String::new(),
        }
    }
}
