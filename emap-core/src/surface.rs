use crate::{
    entities::*,
    marker::{Marker, MarkerId},
    MapSurface,
};

/// The map with its viewport and the currently displayed markers.
#[derive(Debug)]
pub struct Map<S> {
    surface: S,
    viewport: Viewport,
    markers: Vec<Marker>,
}

impl<S> Map<S>
where
    S: MapSurface,
{
    pub fn initialize(mut surface: S, config: &MapConfig) -> Self {
        let viewport = config.viewport;
        surface.initialize(&viewport, &config.tiles);
        Self {
            surface,
            viewport,
            markers: vec![],
        }
    }

    pub fn set_viewport(&mut self, center: MapPoint, zoom: f64) {
        self.viewport = Viewport { center, zoom };
        self.surface.set_viewport(&self.viewport);
    }

    /// Swap the whole marker set.
    pub fn replace_markers(&mut self, markers: Vec<Marker>) {
        self.surface.remove_all_markers();
        for marker in &markers {
            self.surface.place_marker(marker);
        }
        self.markers = markers;
    }

    /// The point that distances are measured from.
    pub fn reference_point(&self) -> MapPoint {
        self.surface.center()
    }

    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
