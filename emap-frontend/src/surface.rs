use emap_core::{
    app::Msg,
    entities::*,
    marker::{marker_key_action, Key, Marker, MarkerGlyph, MarkerKeyAction},
    MapSurface,
};
use js_sys::Reflect;
use leaflet::{
    Attribution, AttributionOptions, Icon, IconOptions, LatLng, LayerGroup, Map as LeafletMap,
    MapOptions, Marker as LeafletMarker, MarkerOptions, Point, TileLayer as LeafletTileLayer,
    TileLayerOptions,
};
use wasm_bindgen::{prelude::*, JsCast};

use crate::dispatch;

const MAP_CONTAINER_ID: &str = "map";

type Handler = Closure<dyn FnMut(JsValue)>;

/// A Leaflet map with all markers in a single layer group.
pub struct LeafletSurface {
    map: Option<LeafletMap>,
    markers: LayerGroup,
    // Dropped together with the markers they are registered at
    handlers: Vec<Handler>,
}

impl LeafletSurface {
    pub fn new() -> Self {
        Self {
            map: None,
            markers: LayerGroup::new(),
            handlers: vec![],
        }
    }
}

fn lat_lng(pos: MapPoint) -> LatLng {
    LatLng::new(pos.lat(), pos.lng())
}

fn point((x, y): (impl Into<f64>, impl Into<f64>)) -> Point {
    Point::new(x.into(), y.into())
}

fn keyboard_event_of_leaflet_event(ev: &JsValue) -> Option<web_sys::KeyboardEvent> {
    Reflect::get(ev, &JsValue::from_str("originalEvent"))
        .ok()
        .and_then(|original| original.dyn_into::<web_sys::KeyboardEvent>().ok())
}

impl MapSurface for LeafletSurface {
    fn initialize(&mut self, viewport: &Viewport, tiles: &TileLayer) {
        let options = MapOptions::new();
        options.set_zoom_control(false);
        options.set_attribution_control(false);
        let map = LeafletMap::new(MAP_CONTAINER_ID, &options);
        map.set_view(&lat_lng(viewport.center), viewport.zoom);

        let tile_options = TileLayerOptions::new();
        tile_options.set_attribution(tiles.attribution.clone());
        tile_options.set_max_zoom(f64::from(tiles.max_zoom));
        tile_options.set_subdomains(tiles.subdomains.clone());
        LeafletTileLayer::new_options(&tiles.url_template, &tile_options).add_to(&map);

        let attribution_options = AttributionOptions::new();
        attribution_options.set_position("bottomright".to_string());
        attribution_options.set_prefix(false);
        let attribution = Attribution::new(&attribution_options);
        attribution.add_to(&map);
        attribution.add_attribution(&tiles.attribution);

        self.markers.add_to(&map);
        self.map = Some(map);
    }

    fn set_viewport(&mut self, viewport: &Viewport) {
        let Some(map) = &self.map else {
            log::warn!("No leaflet map found");
            return;
        };
        map.set_view(&lat_lng(viewport.center), viewport.zoom);
    }

    fn place_marker(&mut self, marker: &Marker) {
        let icon_options = IconOptions::new();
        if let MarkerGlyph::Avatar(url) = &marker.icon.glyph {
            icon_options.set_icon_url(url.clone());
        }
        icon_options.set_icon_size(point(marker.icon.size));
        icon_options.set_icon_anchor(point(marker.icon.anchor));
        icon_options.set_popup_anchor(point(marker.icon.popup_anchor));
        icon_options.set_class_name(marker.icon.class_name.to_string());

        let options = MarkerOptions::new();
        if matches!(marker.icon.glyph, MarkerGlyph::Avatar(_)) {
            options.set_icon(Icon::new(&icon_options));
        }
        options.set_title(marker.title.clone());
        options.set_alt(marker.alt.clone());
        options.set_keyboard(true);
        let leaflet_marker = LeafletMarker::new_with_options(&lat_lng(marker.pos), &options);

        let id = marker.id;
        let on_click: Handler = Closure::new(move |_: JsValue| {
            dispatch(Msg::MarkerActivated(id));
        });
        let on_keydown: Handler = Closure::new(move |ev: JsValue| {
            let Some(ev) = keyboard_event_of_leaflet_event(&ev) else {
                return;
            };
            let key = Key::from_dom_key(&ev.key());
            match marker_key_action(key) {
                MarkerKeyAction::Ignore => {}
                MarkerKeyAction::Forward { prevent_default } => {
                    if prevent_default {
                        ev.prevent_default();
                    }
                    dispatch(Msg::MarkerKeyPressed(id, key));
                }
            }
        });
        leaflet_marker.on("click", on_click.as_ref());
        leaflet_marker.on("keydown", on_keydown.as_ref());
        leaflet_marker.add_to_layer(&self.markers);
        self.handlers.push(on_click);
        self.handlers.push(on_keydown);
    }

    fn remove_all_markers(&mut self) {
        self.markers.clear_layers();
        self.handlers.clear();
    }

    fn center(&self) -> MapPoint {
        self.map.as_ref().map_or_else(MapPoint::default, |map| {
            let center = map.get_center();
            MapPoint::from_lat_lng_deg(center.lat(), center.lng())
        })
    }
}
