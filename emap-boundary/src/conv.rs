use super::*;
use emap_entities as e;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Date(#[from] e::time::ParseTimestampError),
    #[error("Time filter '{0}' must declare at most one of 'hours', 'days' and 'dynamic'")]
    AmbiguousTimeSpan(String),
    #[error("Invalid coordinates of '{0}'")]
    Coordinates(String),
}

impl From<e::geo::MapPoint> for Coordinate {
    fn from(from: e::geo::MapPoint) -> Self {
        let (lat, lng) = from.to_lat_lng_deg();
        Self { lat, lng }
    }
}

fn map_point(name: &str, lat: f64, lng: f64) -> Result<e::geo::MapPoint, ConversionError> {
    e::geo::MapPoint::try_from_lat_lng_deg(lat, lng)
        .ok_or_else(|| ConversionError::Coordinates(name.to_owned()))
}

impl From<e::map::TileLayer> for Tiles {
    fn from(from: e::map::TileLayer) -> Self {
        let e::map::TileLayer {
            url_template,
            attribution,
            max_zoom,
            subdomains,
        } = from;
        Self {
            url: url_template,
            attribution,
            max_zoom,
            subdomains: subdomains.concat(),
        }
    }
}

impl From<Tiles> for e::map::TileLayer {
    fn from(from: Tiles) -> Self {
        let Tiles {
            url,
            attribution,
            max_zoom,
            subdomains,
        } = from;
        Self {
            url_template: url,
            attribution,
            max_zoom,
            subdomains: e::map::TileLayer::subdomains_from_chars(&subdomains),
        }
    }
}

impl From<e::filter::FilterSelection> for FilterDefaults {
    fn from(from: e::filter::FilterSelection) -> Self {
        let e::filter::FilterSelection {
            category,
            time,
            distance,
            location,
        } = from;
        Self {
            category,
            time,
            distance,
            location,
        }
    }
}

impl From<FilterDefaults> for e::filter::FilterSelection {
    fn from(from: FilterDefaults) -> Self {
        let FilterDefaults {
            category,
            time,
            distance,
            location,
        } = from;
        Self {
            category,
            time,
            distance,
            location,
        }
    }
}

impl From<e::filter::TimeWindow> for TimeFilter {
    fn from(from: e::filter::TimeWindow) -> Self {
        use e::filter::TimeSpan;
        let e::filter::TimeWindow { id, label, span } = from;
        let (hours, days, dynamic) = match span {
            TimeSpan::Hours(h) => (Some(h), None, None),
            TimeSpan::Days(d) => (None, Some(d), None),
            TimeSpan::Dynamic => (None, None, Some(true)),
            TimeSpan::Unbounded => (None, None, None),
        };
        Self {
            id,
            label,
            hours,
            days,
            dynamic,
        }
    }
}

impl TryFrom<TimeFilter> for e::filter::TimeWindow {
    type Error = ConversionError;
    fn try_from(from: TimeFilter) -> Result<Self, Self::Error> {
        use e::filter::TimeSpan;
        let TimeFilter {
            id,
            label,
            hours,
            days,
            dynamic,
        } = from;
        let span = match (hours, days, dynamic.unwrap_or(false)) {
            (None, None, false) => TimeSpan::Unbounded,
            (Some(h), None, false) => TimeSpan::Hours(h),
            (None, Some(d), false) => TimeSpan::Days(d),
            (None, None, true) => TimeSpan::Dynamic,
            _ => return Err(ConversionError::AmbiguousTimeSpan(id)),
        };
        Ok(Self { id, label, span })
    }
}

impl From<e::filter::DistanceRadius> for DistanceFilter {
    fn from(from: e::filter::DistanceRadius) -> Self {
        let e::filter::DistanceRadius { id, label, radius } = from;
        Self {
            id,
            label,
            meters: radius.map(e::geo::Distance::to_meters),
        }
    }
}

impl From<DistanceFilter> for e::filter::DistanceRadius {
    fn from(from: DistanceFilter) -> Self {
        let DistanceFilter { id, label, meters } = from;
        Self {
            id,
            label,
            radius: meters.map(e::geo::Distance::from_meters),
        }
    }
}

impl From<e::category::CategoryOption> for CategoryOption {
    fn from(from: e::category::CategoryOption) -> Self {
        Self {
            tag: from.tag.as_str().to_owned(),
            label: from.label,
        }
    }
}

impl From<CategoryOption> for e::category::CategoryOption {
    fn from(from: CategoryOption) -> Self {
        Self {
            tag: from.tag.into(),
            label: from.label,
        }
    }
}

impl From<e::filter::LocationPreset> for Location {
    fn from(from: e::filter::LocationPreset) -> Self {
        let e::filter::LocationPreset { id, label, pos } = from;
        let (lat, lng) = pos.to_lat_lng_deg();
        Self { id, label, lat, lng }
    }
}

impl TryFrom<Location> for e::filter::LocationPreset {
    type Error = ConversionError;
    fn try_from(from: Location) -> Result<Self, Self::Error> {
        let Location { id, label, lat, lng } = from;
        let pos = map_point(&id, lat, lng)?;
        Ok(Self { id, label, pos })
    }
}

impl From<e::map::MapConfig> for MapConfig {
    fn from(from: e::map::MapConfig) -> Self {
        let e::map::MapConfig {
            viewport,
            tiles,
            defaults,
            categories,
            time_windows,
            distances,
            locations,
        } = from;
        Self {
            center: viewport.center.into(),
            zoom: viewport.zoom,
            tiles: tiles.into(),
            defaults: defaults.into(),
            filters: Filters {
                time: time_windows.into_iter().map(Into::into).collect(),
                distance: distances.into_iter().map(Into::into).collect(),
            },
            categories: categories.into_iter().map(Into::into).collect(),
            locations: locations.into_iter().map(Into::into).collect(),
        }
    }
}

impl TryFrom<MapConfig> for e::map::MapConfig {
    type Error = ConversionError;
    fn try_from(from: MapConfig) -> Result<Self, Self::Error> {
        let MapConfig {
            center,
            zoom,
            tiles,
            defaults,
            filters,
            categories,
            locations,
        } = from;
        let center = map_point("center", center.lat, center.lng)?;
        let time_windows = filters
            .time
            .into_iter()
            .map(e::filter::TimeWindow::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let locations = locations
            .into_iter()
            .map(e::filter::LocationPreset::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            viewport: e::map::Viewport { center, zoom },
            tiles: tiles.into(),
            defaults: defaults.into(),
            categories: categories.into_iter().map(Into::into).collect(),
            time_windows,
            distances: filters.distance.into_iter().map(Into::into).collect(),
            locations,
        })
    }
}

impl From<e::event::Event> for Event {
    fn from(from: e::event::Event) -> Self {
        let e::event::Event {
            title,
            category,
            date,
            lat,
            lng,
            venue,
            organizer,
            contact,
        } = from;
        Self {
            title,
            category: category.as_str().to_owned(),
            date: date.to_string(),
            lat,
            lng,
            venue: Venue {
                name: venue.name,
                address: venue.address,
            },
            organizer: Organizer {
                name: organizer.name,
                avatar: organizer.avatar,
            },
            contact: Contact {
                website: contact.website.map(|url| url.to_string()),
            },
        }
    }
}

/// A website that is not an absolute URL is dropped.
impl TryFrom<Event> for e::event::Event {
    type Error = ConversionError;
    fn try_from(from: Event) -> Result<Self, Self::Error> {
        let Event {
            title,
            category,
            date,
            lat,
            lng,
            venue,
            organizer,
            contact,
        } = from;
        let date: e::time::Timestamp = date.parse()?;
        let website = contact
            .website
            .and_then(|website| website.trim().parse::<e::url::Url>().ok());
        Ok(Self {
            title,
            category: category.into(),
            date,
            lat,
            lng,
            venue: e::event::Venue {
                name: venue.name,
                address: venue.address,
            },
            organizer: e::event::Organizer {
                name: organizer.name,
                avatar: organizer.avatar,
            },
            contact: e::event::Contact { website },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time_filter(hours: Option<u32>, days: Option<u32>, dynamic: Option<bool>) -> TimeFilter {
        TimeFilter {
            id: "x".into(),
            label: "X".into(),
            hours,
            days,
            dynamic,
        }
    }

    #[test]
    fn time_filter_into_time_window() {
        use e::filter::{TimeSpan, TimeWindow};
        let span = |f: TimeFilter| TimeWindow::try_from(f).unwrap().span;
        assert_eq!(span(time_filter(Some(24), None, None)), TimeSpan::Hours(24));
        assert_eq!(span(time_filter(None, Some(7), None)), TimeSpan::Days(7));
        assert_eq!(span(time_filter(None, None, Some(true))), TimeSpan::Dynamic);
        assert_eq!(span(time_filter(None, None, Some(false))), TimeSpan::Unbounded);
        assert_eq!(span(time_filter(None, None, None)), TimeSpan::Unbounded);
    }

    #[test]
    fn reject_ambiguous_time_filter() {
        let res = e::filter::TimeWindow::try_from(time_filter(Some(24), Some(1), None));
        assert!(matches!(res, Err(ConversionError::AmbiguousTimeSpan(id)) if id == "x"));
        let res = e::filter::TimeWindow::try_from(time_filter(None, Some(1), Some(true)));
        assert!(res.is_err());
    }

    #[test]
    fn time_window_round_trip_keeps_span() {
        use e::filter::{TimeSpan, TimeWindow};
        for span in [
            TimeSpan::Hours(3),
            TimeSpan::Days(30),
            TimeSpan::Dynamic,
            TimeSpan::Unbounded,
        ] {
            let w = TimeWindow {
                id: "w".into(),
                label: "W".into(),
                span,
            };
            assert_eq!(TimeWindow::try_from(TimeFilter::from(w.clone())).unwrap(), w);
        }
    }

    #[test]
    fn convert_event() {
        let json = r#"{
            "title": "Vernissage",
            "category": "art",
            "date": "2026-10-20T19:30",
            "lat": 50.31,
            "lng": 11.92,
            "venue": { "name": "Galeriehaus" },
            "organizer": { "name": "Kunstverein", "avatar": "/img/kv.png" },
            "contact": { "website": "https://example.org/vernissage" }
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        let event = e::event::Event::try_from(event).unwrap();
        assert_eq!(event.category.as_str(), "art");
        assert_eq!(event.date.to_string(), "2026-10-20T19:30:00Z");
        assert_eq!(
            event.pos(),
            Some(e::geo::MapPoint::from_lat_lng_deg(50.31, 11.92))
        );
        assert_eq!(event.venue.name.as_deref(), Some("Galeriehaus"));
        assert_eq!(event.venue.address, None);
        assert_eq!(event.organizer.avatar.as_deref(), Some("/img/kv.png"));
        assert_eq!(
            event.contact.website.map(|url| url.to_string()),
            Some("https://example.org/vernissage".to_owned())
        );
    }

    #[test]
    fn reject_event_with_invalid_date() {
        let event = Event {
            title: "x".into(),
            category: String::new(),
            date: "next friday".into(),
            lat: None,
            lng: None,
            venue: Venue::default(),
            organizer: Organizer::default(),
            contact: Contact::default(),
        };
        assert!(matches!(
            e::event::Event::try_from(event),
            Err(ConversionError::Date(_))
        ));
    }

    #[test]
    fn drop_relative_website() {
        let event = Event {
            title: "x".into(),
            category: String::new(),
            date: "2026-10-20".into(),
            lat: None,
            lng: None,
            venue: Venue::default(),
            organizer: Organizer::default(),
            contact: Contact {
                website: Some("www.example.org".into()),
            },
        };
        let event = e::event::Event::try_from(event).unwrap();
        assert!(event.contact.website.is_none());
    }

    #[test]
    fn reject_invalid_center() {
        let config = MapConfig {
            center: Coordinate {
                lat: 91.0,
                lng: 0.0,
            },
            zoom: 13.0,
            tiles: Tiles {
                url: String::new(),
                attribution: String::new(),
                max_zoom: 19,
                subdomains: "abc".into(),
            },
            defaults: FilterDefaults {
                category: "all".into(),
                time: "withoutLimit".into(),
                distance: "withoutLimit".into(),
                location: String::new(),
            },
            filters: Filters {
                time: vec![],
                distance: vec![],
            },
            categories: vec![],
            locations: vec![],
        };
        assert!(matches!(
            e::map::MapConfig::try_from(config),
            Err(ConversionError::Coordinates(name)) if name == "center"
        ));
    }
}
