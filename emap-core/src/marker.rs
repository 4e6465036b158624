use std::rc::Rc;

use crate::entities::*;

const ICON_SIZE: (u32, u32) = (40, 40);
const ICON_ANCHOR: (i32, i32) = (20, 40);
const POPUP_ANCHOR: (i32, i32) = (0, -40);
pub const MARKER_CLASS_NAME: &str = "event-marker";

/// Identifies a marker within the currently displayed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(usize);

impl MarkerId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn to_index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerGlyph {
    /// Image reference of the organizer
    Avatar(String),
    /// The default glyph of the map library
    Default,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerIcon {
    pub glyph        : MarkerGlyph,
    pub size         : (u32, u32),
    pub anchor       : (i32, i32),
    pub popup_anchor : (i32, i32),
    pub class_name   : &'static str,
}

impl MarkerIcon {
    fn for_event(event: &Event) -> Self {
        let glyph = event
            .organizer
            .avatar
            .as_ref()
            .filter(|avatar| !avatar.trim().is_empty())
            .map_or(MarkerGlyph::Default, |avatar| {
                MarkerGlyph::Avatar(avatar.clone())
            });
        Self {
            glyph,
            size: ICON_SIZE,
            anchor: ICON_ANCHOR,
            popup_anchor: POPUP_ANCHOR,
            class_name: MARKER_CLASS_NAME,
        }
    }
}

/// A placeable annotation bound to a single event.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id    : MarkerId,
    pub pos   : MapPoint,
    pub icon  : MarkerIcon,
    pub title : String,
    /// Description for non-visual access
    pub alt   : String,
    pub event : Rc<Event>,
}

/// Keys that are relevant for the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other,
}

impl Key {
    /// Map the `key` property of a DOM keyboard event.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }

    /// Keyboard equivalent of a primary button click.
    pub const fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// Handling of a key pressed on a focused marker by a surface
/// that already reports Enter as a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKeyAction {
    Ignore,
    Forward { prevent_default: bool },
}

pub const fn marker_key_action(key: Key) -> MarkerKeyAction {
    match key {
        // Arrives as a click
        Key::Enter => MarkerKeyAction::Ignore,
        // Would scroll the page
        Key::Space => MarkerKeyAction::Forward {
            prevent_default: true,
        },
        Key::Escape | Key::Other => MarkerKeyAction::Forward {
            prevent_default: false,
        },
    }
}

pub fn alt_text(event: &Event) -> String {
    match event.organizer_name().filter(|name| !name.is_empty()) {
        Some(name) => format!("Event: {} by {}", event.title, name),
        None => format!("Event: {}", event.title),
    }
}

/// Create a marker for every event with both coordinates.
///
/// Events without coordinates are skipped.
pub fn build_markers<'a, I>(events: I) -> Vec<Marker>
where
    I: IntoIterator<Item = &'a Rc<Event>>,
{
    let mut markers = vec![];
    for event in events {
        let Some(pos) = event.pos() else {
            log::warn!("Event missing coordinates: {}", event.title);
            continue;
        };
        markers.push(Marker {
            id: MarkerId::new(markers.len()),
            pos,
            icon: MarkerIcon::for_event(event),
            title: event.title.clone(),
            alt: alt_text(event),
            event: Rc::clone(event),
        });
    }
    markers
}
