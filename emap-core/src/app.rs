//! The input controller: every user interaction arrives as a [`Msg`]
//! and is applied by [`EventMap::update`].

use std::rc::Rc;

use crate::{
    entities::*,
    filter::{filter_events, FilterContext},
    marker::{build_markers, Key, MarkerId},
    panel::DetailPanel,
    surface::Map,
    Clock, EventCountView, MapSurface, PanelView,
};

/// Where a pointer activation (click, tap) landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    InsidePanel,
    Marker,
    Elsewhere,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    CategoryChanged(String),
    TimeWindowChanged(String),
    DistanceChanged(String),
    /// Recenters the map before filtering
    LocationChanged(String),
    MarkerActivated(MarkerId),
    MarkerKeyPressed(MarkerId, Key),
    /// A key pressed anywhere on the page
    KeyPressed(Key),
    PointerActivated(PointerTarget),
    /// The close control of the detail panel
    DismissRequested,
}

pub struct EventMap<S, P, C, T> {
    config: MapConfig,
    events: Vec<Rc<Event>>,
    filters: FilterSelection,
    map: Map<S>,
    panel: DetailPanel<P>,
    counter: C,
    clock: T,
    matching: usize,
}

impl<S, P, C, T> EventMap<S, P, C, T>
where
    S: MapSurface,
    P: PanelView,
    C: EventCountView,
    T: Clock,
{
    /// Set up the map and show all events that match the default filters.
    pub fn init(
        config: MapConfig,
        events: Vec<Event>,
        surface: S,
        panel_view: P,
        counter: C,
        clock: T,
    ) -> Self {
        let map = Map::initialize(surface, &config);
        let filters = config.defaults.clone();
        let mut event_map = Self {
            config,
            events: events.into_iter().map(Rc::new).collect(),
            filters,
            map,
            panel: DetailPanel::new(panel_view),
            counter,
            clock,
            matching: 0,
        };
        event_map.refresh();
        log::info!(
            "Event map initialized with {} events",
            event_map.events.len()
        );
        event_map
    }

    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::CategoryChanged(category) => {
                self.filters.category = category;
                self.refresh();
            }
            Msg::TimeWindowChanged(time) => {
                self.filters.time = time;
                self.refresh();
            }
            Msg::DistanceChanged(distance) => {
                self.filters.distance = distance;
                self.refresh();
            }
            Msg::LocationChanged(id) => {
                let Some(location) = self.config.location(&id) else {
                    log::warn!("Unknown location: {id}");
                    return;
                };
                let center = location.pos;
                let zoom = self.config.viewport.zoom;
                self.map.set_viewport(center, zoom);
                self.filters.location = id;
                self.refresh();
            }
            Msg::MarkerActivated(id) => {
                self.activate(id);
            }
            Msg::MarkerKeyPressed(id, key) => {
                if key.is_activation() {
                    self.activate(id);
                }
            }
            Msg::KeyPressed(Key::Escape) | Msg::DismissRequested => {
                self.panel.dismiss();
            }
            Msg::KeyPressed(_) => {}
            Msg::PointerActivated(target) => match target {
                PointerTarget::Elsewhere => {
                    self.panel.dismiss();
                }
                PointerTarget::InsidePanel | PointerTarget::Marker => {}
            },
        }
    }

    fn activate(&mut self, id: MarkerId) {
        let Some(marker) = self.map.marker(id) else {
            log::debug!("Ignoring activation of unknown marker {id:?}");
            return;
        };
        let event = Rc::clone(&marker.event);
        self.panel.show(event);
    }

    /// Filter all events and rebuild the markers from scratch.
    fn refresh(&mut self) {
        let ctx = FilterContext {
            config: &self.config,
            reference: self.map.reference_point(),
            now: self.clock.now(),
        };
        let filtered = filter_events(&self.events, &self.filters, &ctx);
        log::debug!("{:?} matches {} events", self.filters, filtered.len());
        self.matching = filtered.len();
        self.counter.show_event_count(self.matching);
        let markers = build_markers(filtered);
        self.map.replace_markers(markers);
    }

    pub const fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn events(&self) -> &[Rc<Event>] {
        &self.events
    }

    pub const fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    /// Number of events that matched the last filter pass.
    pub const fn matching_count(&self) -> usize {
        self.matching
    }

    pub const fn map(&self) -> &Map<S> {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut Map<S> {
        &mut self.map
    }

    pub const fn panel(&self) -> &DetailPanel<P> {
        &self.panel
    }

    pub const fn counter(&self) -> &C {
        &self.counter
    }
}
