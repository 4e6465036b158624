//! Random test records for trying out the map.

use clap::ValueEnum;
use emap_boundary as json;
use emap_core::entities::{MapPoint, Timestamp};
use rand::{seq::SliceRandom, Rng};
use serde::Serialize;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Maximum offset from the map center in degrees.
const MAX_POSITION_OFFSET: f64 = 0.02;

const BANDS: &[&str] = &[
    "Die Kellerasseln",
    "Saalekrach",
    "Frankenfunk",
    "Lärmschutzwand",
    "Rost & Rauch",
    "Die Notausgänge",
];

const CONCERT_MOTTOS: &[&str] = &[
    "Live im Hof",
    "Lauter als der Winter",
    "Kein Schlaf bis Hof",
    "Akustisch und direkt",
    "Die lange Nacht",
];

const EXHIBITION_TITLES: &[&str] = &[
    "Farbe im Beton",
    "Zwischenräume",
    "Papier und Licht",
    "Spuren der Stadt",
    "Neue Fränkische Grafik",
];

const ARTISTS: &[&str] = &[
    "Anna Gruber",
    "Jonas Weiß",
    "Lea Hoffmann",
    "Mika Schubert",
    "Tom Brandl",
    "Ida Seidel",
];

#[rustfmt::skip]
const VENUES: &[(&str, &str)] = &[
    ("Galeriehaus"     , "Ludwigstraße 20, Hof"),
    ("Alter Bahnhof"   , "Bahnhofstraße 1, Rehau"),
    ("Kulturzentrum"   , "Porzellanplatz 3, Selb"),
    ("Stadtpark-Bühne" , "Parkweg 5, Münchberg"),
];

const ORGANIZERS: &[&str] = &[
    "Punk im Hof e.V.",
    "Kunstverein Hof",
    "Kollektiv Saale",
    "Jugendkulturbüro",
];

const GENRES: &[&str] = &["Rock", "Pop", "Jazz", "Electronic", "Hip-Hop"];

const DESCRIPTIONS: &[&str] = &[
    "Lorem ipsum dolor sit amet, consetetur sadipscing elitr.",
    "Sed diam nonumy eirmod tempor invidunt ut labore et dolore.",
    "At vero eos et accusam et justo duo dolores et ea rebum.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    Concert,
    Exhibition,
}

impl RecordKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Concert => "concert",
            Self::Exhibition => "exhibition",
        }
    }

    pub const fn category(self) -> &'static str {
        match self {
            Self::Concert => "music",
            Self::Exhibition => "art",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedRecord {
    pub id: String,
    pub title: String,
    pub category: String,
    pub date: String,
    pub lat: f64,
    pub lng: f64,
    pub venue: json::Venue,
    pub organizer: json::Organizer,
    pub contact: json::Contact,
    pub description: String,
    #[serde(flatten)]
    pub details: KindDetails,
    pub status: String,
    pub created: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum KindDetails {
    Concert {
        price: String,
        genre: String,
    },
    Exhibition {
        end_date: String,
        artists: Vec<String>,
        free_entry: bool,
    },
}

/// `test-<kind>-<NNN>.json` for the `index`-th record (starting at 0).
pub fn file_name(kind: RecordKind, index: usize) -> String {
    format!("test-{}-{:03}.json", kind.as_str(), index + 1)
}

fn pick<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn days_after(ts: Timestamp, days: i64) -> Timestamp {
    Timestamp::from_seconds(ts.into_seconds() + days * SECONDS_PER_DAY).unwrap_or(ts)
}

pub fn generate_record<R: Rng>(
    rng: &mut R,
    kind: RecordKind,
    center: MapPoint,
    now: Timestamp,
) -> GeneratedRecord {
    let id = uuid::Builder::from_random_bytes(rng.gen())
        .into_uuid()
        .to_string();
    let date = days_after(now, rng.gen_range(1..=90));
    let (venue_name, venue_address) = VENUES.choose(rng).copied().unwrap_or_default();
    let (title, details) = match kind {
        RecordKind::Concert => {
            let title = format!("{} - {}", pick(rng, BANDS), pick(rng, CONCERT_MOTTOS));
            let details = KindDetails::Concert {
                price: format!("{}€", rng.gen_range(5..=50)),
                genre: pick(rng, GENRES).to_string(),
            };
            (title, details)
        }
        RecordKind::Exhibition => {
            let title = pick(rng, EXHIBITION_TITLES).to_string();
            let count = rng.gen_range(1..=3);
            let artists = ARTISTS
                .choose_multiple(rng, count)
                .map(ToString::to_string)
                .collect();
            let details = KindDetails::Exhibition {
                end_date: days_after(date, rng.gen_range(7..=30)).to_string(),
                artists,
                free_entry: rng.gen_bool(0.5),
            };
            (title, details)
        }
    };
    GeneratedRecord {
        title,
        category: kind.category().to_string(),
        date: date.to_string(),
        lat: center.lat() + rng.gen_range(-MAX_POSITION_OFFSET..MAX_POSITION_OFFSET),
        lng: center.lng() + rng.gen_range(-MAX_POSITION_OFFSET..MAX_POSITION_OFFSET),
        venue: json::Venue {
            name: Some(venue_name.to_string()),
            address: Some(venue_address.to_string()),
        },
        organizer: json::Organizer {
            name: Some(pick(rng, ORGANIZERS).to_string()),
            avatar: None,
        },
        contact: json::Contact {
            website: Some(format!("https://example.org/events/{id}")),
        },
        description: pick(rng, DESCRIPTIONS).to_string(),
        details,
        status: "draft".to_string(),
        created: now.to_string(),
        id,
    }
}
