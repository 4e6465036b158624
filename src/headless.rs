//! Implementations of the map capabilities without a browser.

use emap_core::{
    app::EventMap, entities::*, marker::Marker, panel::EventDetails, util::event_count_label,
    EventCountView, MapSurface, PanelView, SystemClock,
};

use crate::view;

pub type HeadlessEventMap = EventMap<RecordingSurface, RenderedPanel, CountReadout, SystemClock>;

pub fn init(config: MapConfig, events: Vec<Event>) -> HeadlessEventMap {
    EventMap::init(
        config,
        events,
        RecordingSurface::default(),
        RenderedPanel::default(),
        CountReadout::default(),
        SystemClock,
    )
}

/// Keeps track of the viewport and the placed markers.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    viewport: Option<Viewport>,
    markers: Vec<Marker>,
}

impl RecordingSurface {
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl MapSurface for RecordingSurface {
    fn initialize(&mut self, viewport: &Viewport, tiles: &TileLayer) {
        log::debug!(
            "Initialize map at {} (zoom {}) with tiles from {}",
            viewport.center,
            viewport.zoom,
            tiles.url_template
        );
        self.viewport = Some(*viewport);
    }

    fn set_viewport(&mut self, viewport: &Viewport) {
        log::debug!("Move map to {} (zoom {})", viewport.center, viewport.zoom);
        self.viewport = Some(*viewport);
    }

    fn place_marker(&mut self, marker: &Marker) {
        self.markers.push(marker.clone());
    }

    fn remove_all_markers(&mut self) {
        self.markers.clear();
    }

    fn center(&self) -> MapPoint {
        self.viewport.map(|v| v.center).unwrap_or_default()
    }
}

/// Renders the detail panel into an HTML fragment.
#[derive(Debug, Default)]
pub struct RenderedPanel {
    html: Option<String>,
    visible: bool,
}

impl RenderedPanel {
    /// The HTML of the panel content if it is visible.
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref().filter(|_| self.visible)
    }
}

impl PanelView for RenderedPanel {
    fn render(&mut self, details: &EventDetails) {
        self.html = Some(view::event_details(details).into_string());
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn remember_focus(&mut self) {}

    fn focus_dismiss_control(&mut self) {}

    fn restore_focus(&mut self) {}
}

#[derive(Debug, Default)]
pub struct CountReadout {
    label: String,
}

impl CountReadout {
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl EventCountView for CountReadout {
    fn show_event_count(&mut self, count: usize) {
        self.label = event_count_label(count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emap_core::app::Msg;
    use emap_entities::builders::*;

    #[test]
    fn drive_the_map_without_a_browser() {
        let hof = MapPoint::from_lat_lng_deg(50.3167, 11.9167);
        let config = MapConfig::build().center(hof).category("art", "Kunst").finish();
        let events = vec![
            Event::build()
                .title("Vernissage")
                .category("art")
                .pos(hof)
                .venue(Some("Galeriehaus"), None)
                .finish(),
            Event::build().title("Konzert").category("music").pos(hof).finish(),
            Event::build().title("Irgendwo").category("art").finish(),
        ];
        let mut map = init(config, events);
        assert_eq!(map.counter().label(), "3 events");
        assert_eq!(map.map().surface().markers().len(), 2);
        assert_eq!(map.map().surface().center(), hof);

        map.update(Msg::CategoryChanged("art".into()));
        assert_eq!(map.counter().label(), "2 events");
        let markers = map.map().surface().markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].title, "Vernissage");

        assert!(map.panel().view().html().is_none());
        let id = markers[0].id;
        map.update(Msg::MarkerActivated(id));
        let html = map.panel().view().html().unwrap();
        assert!(html.contains("Vernissage"));
        assert!(html.contains("Galeriehaus"));

        map.update(Msg::DismissRequested);
        assert!(map.panel().view().html().is_none());
    }
}
