pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{event_builder::*, map_config_builder::*};

pub mod event_builder {

    use super::*;
    use crate::{event::*, geo::*, time::*};

    #[derive(Debug)]
    pub struct EventBuild {
        event: Event,
    }

    impl EventBuild {
        pub fn title(mut self, title: &str) -> Self {
            self.event.title = title.into();
            self
        }
        pub fn category(mut self, category: &str) -> Self {
            self.event.category = category.into();
            self
        }
        pub fn date(mut self, date: Timestamp) -> Self {
            self.event.date = date;
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.event.lat = Some(pos.lat());
            self.event.lng = Some(pos.lng());
            self
        }
        pub fn lat(mut self, lat: Option<f64>) -> Self {
            self.event.lat = lat;
            self
        }
        pub fn lng(mut self, lng: Option<f64>) -> Self {
            self.event.lng = lng;
            self
        }
        pub fn venue(mut self, name: Option<&str>, address: Option<&str>) -> Self {
            self.event.venue = Venue {
                name: name.map(Into::into),
                address: address.map(Into::into),
            };
            self
        }
        pub fn organizer(mut self, name: Option<&str>, avatar: Option<&str>) -> Self {
            self.event.organizer = Organizer {
                name: name.map(Into::into),
                avatar: avatar.map(Into::into),
            };
            self
        }
        pub fn website(mut self, website: Option<&str>) -> Self {
            self.event.contact.website = website.map(|url| url.parse().unwrap());
            self
        }
        pub fn finish(self) -> Event {
            self.event
        }
    }

    impl Builder for Event {
        type Build = EventBuild;
        fn build() -> EventBuild {
            EventBuild {
                event: Event {
                    title: String::new(),
                    category: String::new().into(),
                    date: Timestamp::from_seconds(0).unwrap(),
                    lat: None,
                    lng: None,
                    venue: Venue::default(),
                    organizer: Organizer::default(),
                    contact: Contact::default(),
                },
            }
        }
    }
}

pub mod map_config_builder {

    use super::*;
    use crate::{category::*, filter::*, geo::*, map::*};

    #[derive(Debug)]
    pub struct MapConfigBuild {
        config: MapConfig,
    }

    impl MapConfigBuild {
        pub fn center(mut self, center: MapPoint) -> Self {
            self.config.viewport.center = center;
            self
        }
        pub fn zoom(mut self, zoom: f64) -> Self {
            self.config.viewport.zoom = zoom;
            self
        }
        pub fn defaults(mut self, defaults: FilterSelection) -> Self {
            self.config.defaults = defaults;
            self
        }
        pub fn category(mut self, tag: &str, label: &str) -> Self {
            self.config.categories.push(CategoryOption {
                tag: tag.into(),
                label: label.into(),
            });
            self
        }
        pub fn time_window(mut self, id: &str, span: TimeSpan) -> Self {
            self.config.time_windows.push(TimeWindow {
                id: id.into(),
                label: id.into(),
                span,
            });
            self
        }
        pub fn distance(mut self, id: &str, meters: Option<f64>) -> Self {
            self.config.distances.push(DistanceRadius {
                id: id.into(),
                label: id.into(),
                radius: meters.map(Distance::from_meters),
            });
            self
        }
        pub fn location(mut self, id: &str, pos: MapPoint) -> Self {
            self.config.locations.push(LocationPreset {
                id: id.into(),
                label: id.into(),
                pos,
            });
            self
        }
        pub fn finish(self) -> MapConfig {
            self.config
        }
    }

    impl Builder for MapConfig {
        type Build = MapConfigBuild;
        fn build() -> MapConfigBuild {
            MapConfigBuild {
                config: MapConfig {
                    viewport: Viewport {
                        center: MapPoint::from_lat_lng_deg(50.3167, 11.9167),
                        zoom: 13.0,
                    },
                    tiles: TileLayer {
                        url_template: "https://{s}.tile.example.org/{z}/{x}/{y}.png".into(),
                        attribution: "&copy; Example".into(),
                        max_zoom: 19,
                        subdomains: TileLayer::subdomains_from_chars(DEFAULT_SUBDOMAINS),
                    },
                    defaults: FilterSelection::default(),
                    categories: vec![],
                    time_windows: vec![],
                    distances: vec![],
                    locations: vec![],
                },
            }
        }
    }
}
