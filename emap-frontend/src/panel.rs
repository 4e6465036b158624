use emap_core::{panel::EventDetails, util::event_count_label, EventCountView, PanelView};
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

const ACTIVE_CLASS: &str = "active";

#[component]
pub fn FlyerContent(details: ReadSignal<Option<EventDetails>>) -> impl IntoView {
    move || {
        details.get().map(|details| {
            let EventDetails {
                title,
                date,
                venue_name,
                venue_address,
                organizer_name,
                website,
            } = details;
            let has_venue = venue_name.is_some() || venue_address.is_some();
            view! {
              <h2 class="flyer-title">{title}</h2>
              <p class="flyer-date">{date}</p>
              {has_venue.then(|| view! {
                <div class="flyer-venue">
                  {venue_name.map(|name| view! { <p class="flyer-venue-name">{name}</p> })}
                  {venue_address.map(|address| view! { <p class="flyer-venue-address">{address}</p> })}
                </div>
              })}
              {organizer_name.map(|name| view! { <p class="flyer-organizer">"Veranstaltet von " {name}</p> })}
              {website.map(|url| view! {
                <a class="flyer-website" href=url.to_string() target="_blank" rel="noopener">"Website"</a>
              })}
            }
        })
    }
}

/// The detail panel that is part of the static page.
pub struct DomPanel {
    details: WriteSignal<Option<EventDetails>>,
    flyer: Element,
    close: HtmlElement,
    previous_focus: Option<HtmlElement>,
}

impl DomPanel {
    pub const fn new(
        details: WriteSignal<Option<EventDetails>>,
        flyer: Element,
        close: HtmlElement,
    ) -> Self {
        Self {
            details,
            flyer,
            close,
            previous_focus: None,
        }
    }
}

impl PanelView for DomPanel {
    fn render(&mut self, details: &EventDetails) {
        self.details.set(Some(details.clone()));
    }

    fn set_visible(&mut self, visible: bool) {
        let res = self
            .flyer
            .class_list()
            .toggle_with_force(ACTIVE_CLASS, visible)
            .and_then(|_| {
                self.flyer
                    .set_attribute("aria-hidden", if visible { "false" } else { "true" })
            });
        if let Err(err) = res {
            log::error!("Unable to change the visibility of the detail panel: {err:?}");
        }
    }

    fn remember_focus(&mut self) {
        self.previous_focus = document()
            .active_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    }

    fn focus_dismiss_control(&mut self) {
        if let Err(err) = self.close.focus() {
            log::warn!("Unable to focus the close button: {err:?}");
        }
    }

    fn restore_focus(&mut self) {
        if let Some(el) = self.previous_focus.take() {
            if let Err(err) = el.focus() {
                log::warn!("Unable to restore the focus: {err:?}");
            }
        }
    }
}

pub struct DomEventCount {
    readout: Element,
}

impl DomEventCount {
    pub const fn new(readout: Element) -> Self {
        Self { readout }
    }
}

impl EventCountView for DomEventCount {
    fn show_event_count(&mut self, count: usize) {
        self.readout
            .set_text_content(Some(&event_count_label(count)));
    }
}
