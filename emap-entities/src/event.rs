use crate::{category::*, geo::*, time::*, url::*};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Venue {
    pub name    : Option<String>,
    pub address : Option<String>,
}

impl Venue {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.address.is_none()
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Organizer {
    /// The display name of a person or collective
    pub name   : Option<String>,
    /// Reference to an avatar image, used as marker glyph
    pub avatar : Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contact {
    pub website: Option<Url>,
}

impl Contact {
    pub fn is_empty(&self) -> bool {
        self.website.is_none()
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub title     : String,
    pub category  : Category,
    pub date      : Timestamp,
    // Both coordinates are needed to place the event on the map.
    pub lat       : Option<f64>,
    pub lng       : Option<f64>,
    pub venue     : Venue,
    pub organizer : Organizer,
    pub contact   : Contact,
}

impl Event {
    /// The position of the event if both coordinates are available.
    pub fn pos(&self) -> Option<MapPoint> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(MapPoint::from_lat_lng_deg(lat, lng)),
            _ => None,
        }
    }

    pub fn is_placeable(&self) -> bool {
        self.pos().is_some()
    }

    pub fn organizer_name(&self) -> Option<&str> {
        self.organizer.name.as_deref()
    }
}
