//! # emap-core
//!
//! The behaviour of the event map, independent of any rendering library.
//!
//! All side effects are delegated to the capability traits defined here,
//! i.e. the browser frontend and the headless CLI provide their own
//! implementations.

pub mod app;
pub mod filter;
pub mod marker;
pub mod panel;
pub mod surface;
pub mod util;

#[cfg(test)]
mod tests;

pub mod entities {
    pub use emap_entities::{
        category::*, event::*, filter::*, geo::*, map::*, time::*, url::*,
    };
}

use self::{entities::*, marker::Marker, panel::EventDetails};

/// The map rendering capability, e.g. a Leaflet map.
pub trait MapSurface {
    /// One-time setup of the viewport and the base tile layer.
    fn initialize(&mut self, viewport: &Viewport, tiles: &TileLayer);
    fn set_viewport(&mut self, viewport: &Viewport);
    fn place_marker(&mut self, marker: &Marker);
    fn remove_all_markers(&mut self);
    /// The center of the currently visible map section.
    ///
    /// Might differ from the last viewport if the visitor panned the map.
    fn center(&self) -> MapPoint;
}

/// The overlay that shows the details of a single event.
pub trait PanelView {
    /// Replace the content. Every text must be inserted as plain text.
    fn render(&mut self, details: &EventDetails);
    /// Toggle the visibility, including the `aria-hidden` state.
    fn set_visible(&mut self, visible: bool);
    /// Remember the element that currently has the input focus.
    fn remember_focus(&mut self);
    fn focus_dismiss_control(&mut self);
    /// Give the focus back to the element remembered by
    /// [`PanelView::remember_focus`].
    fn restore_focus(&mut self);
}

/// The readout with the number of matching events.
pub trait EventCountView {
    fn show_event_count(&mut self, count: usize);
}

pub trait Clock {
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
