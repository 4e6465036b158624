use std::rc::Rc;

use crate::{entities::*, util::format_date_de, PanelView};

/// The plain-text content of the detail panel.
///
/// Optional fields are `None` if the event does not provide them
/// and must not be rendered at all.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub title          : String,
    pub date           : String,
    pub venue_name     : Option<String>,
    pub venue_address  : Option<String>,
    pub organizer_name : Option<String>,
    pub website        : Option<Url>,
}

fn non_empty(text: Option<&String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty()).cloned()
}

impl EventDetails {
    pub fn from_event(event: &Event) -> Self {
        let website = event
            .contact
            .website
            .as_ref()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .cloned();
        Self {
            title: event.title.clone(),
            date: format_date_de(event.date),
            venue_name: non_empty(event.venue.name.as_ref()),
            venue_address: non_empty(event.venue.address.as_ref()),
            organizer_name: non_empty(event.organizer.name.as_ref()),
            website,
        }
    }
}

/// Controls the visibility and content of the detail panel.
///
/// At most one event is selected at a time.
#[derive(Debug)]
pub struct DetailPanel<V> {
    view: V,
    selected: Option<Rc<Event>>,
}

impl<V> DetailPanel<V>
where
    V: PanelView,
{
    pub const fn new(view: V) -> Self {
        Self {
            view,
            selected: None,
        }
    }

    pub fn show(&mut self, event: Rc<Event>) {
        let details = EventDetails::from_event(&event);
        self.view.render(&details);
        if self.selected.is_none() {
            self.view.remember_focus();
            self.view.set_visible(true);
        }
        self.view.focus_dismiss_control();
        self.selected = Some(event);
    }

    /// Returns `false` if the panel was already hidden.
    pub fn dismiss(&mut self) -> bool {
        if self.selected.take().is_none() {
            return false;
        }
        self.view.set_visible(false);
        self.view.restore_focus();
        true
    }

    pub const fn is_visible(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<&Event> {
        self.selected.as_deref()
    }

    pub const fn view(&self) -> &V {
        &self.view
    }
}
