use std::cell::RefCell;

use emap_core::{
    app::{EventMap, Msg, PointerTarget},
    marker::{Key, MARKER_CLASS_NAME},
    panel::EventDetails,
    SystemClock,
};
use leptos::*;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{Element, HtmlElement, HtmlSelectElement};

mod data;
mod panel;
mod surface;

use self::{
    panel::{DomEventCount, DomPanel, FlyerContent},
    surface::LeafletSurface,
};

type FrontendMap = EventMap<LeafletSurface, DomPanel, DomEventCount, SystemClock>;

const FLYER_ID: &str = "event-flyer";
const FLYER_CLOSE_ID: &str = "flyer-close";
const FLYER_CONTENT_ID: &str = "flyer-content";
const EVENT_COUNT_ID: &str = "event-count";
const LEAFLET_MARKER_ICON_SELECTOR: &str = ".leaflet-marker-icon";

thread_local! {
    static EVENT_MAP: RefCell<Option<FrontendMap>> = const { RefCell::new(None) };
}

/// Deliver a message to the event map.
pub fn dispatch(msg: Msg) {
    EVENT_MAP.with(|event_map| {
        let Ok(mut event_map) = event_map.try_borrow_mut() else {
            log::warn!("Dropping {msg:?} while the map is busy");
            return;
        };
        match event_map.as_mut() {
            Some(event_map) => event_map.update(msg),
            None => log::warn!("Dropping {msg:?}: map is not initialized"),
        }
    });
}

fn element_by_id(id: &str) -> Result<Element, String> {
    document()
        .get_element_by_id(id)
        .ok_or_else(|| format!("Missing #{id} element"))
}

fn listen<E, F>(target: &web_sys::EventTarget, event_type: &str, mut handler: F)
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    });
    if let Err(err) = target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref()) {
        log::error!("Unable to listen to {event_type} events: {err:?}");
    }
    // Listeners live as long as the page
    closure.forget();
}

fn on_select_change(id: &str, msg: fn(String) -> Msg) -> Result<(), String> {
    let select = element_by_id(id)?;
    listen(&select, "change", move |ev: web_sys::Event| {
        let Some(select) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
        else {
            return;
        };
        dispatch(msg(select.value()));
    });
    Ok(())
}

fn pointer_target(target: Option<web_sys::EventTarget>, flyer: &Element) -> PointerTarget {
    let Some(el) = target.and_then(|t| t.dyn_into::<Element>().ok()) else {
        return PointerTarget::Elsewhere;
    };
    if flyer.contains(Some(&el)) {
        return PointerTarget::InsidePanel;
    }
    let on_marker = el
        .closest(LEAFLET_MARKER_ICON_SELECTOR)
        .ok()
        .flatten()
        .is_some()
        || el.class_list().contains(MARKER_CLASS_NAME);
    if on_marker {
        PointerTarget::Marker
    } else {
        PointerTarget::Elsewhere
    }
}

fn setup_input_routing(flyer: Element, close: &HtmlElement) -> Result<(), String> {
    on_select_change("category-filter", Msg::CategoryChanged)?;
    on_select_change("time-filter", Msg::TimeWindowChanged)?;
    on_select_change("distance-filter", Msg::DistanceChanged)?;
    on_select_change("location-filter", Msg::LocationChanged)?;

    let doc = document();
    listen(&doc, "keydown", |ev: web_sys::KeyboardEvent| {
        let key = Key::from_dom_key(&ev.key());
        if key == Key::Escape {
            dispatch(Msg::KeyPressed(key));
        }
    });
    listen(&doc, "click", move |ev: web_sys::Event| {
        dispatch(Msg::PointerActivated(pointer_target(ev.target(), &flyer)));
    });
    listen(close, "click", |_: web_sys::Event| {
        dispatch(Msg::DismissRequested);
    });
    Ok(())
}

fn start() -> Result<(), String> {
    let config = data::read_map_config()?;
    let events = data::read_events()?;

    let flyer = element_by_id(FLYER_ID)?;
    let close = element_by_id(FLYER_CLOSE_ID)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| format!("#{FLYER_CLOSE_ID} is not an HTML element"))?;
    let content = element_by_id(FLYER_CONTENT_ID)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| format!("#{FLYER_CONTENT_ID} is not an HTML element"))?;
    let readout = element_by_id(EVENT_COUNT_ID)?;

    let (details, set_details) = create_signal(None::<EventDetails>);
    mount_to(content, move || view! { <FlyerContent details /> });

    let event_map = EventMap::init(
        config,
        events,
        LeafletSurface::new(),
        DomPanel::new(set_details, flyer.clone(), close.clone()),
        DomEventCount::new(readout),
        SystemClock,
    );
    EVENT_MAP.with(|m| *m.borrow_mut() = Some(event_map));

    setup_input_routing(flyer, &close)
}

fn main() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
    log::info!("Start event map");
    if let Err(err) = start() {
        log::error!("Unable to start the event map: {err}");
    }
}
