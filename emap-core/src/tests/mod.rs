use emap_entities::builders::*;
use time::macros::datetime;

use crate::{
    app::*,
    entities::*,
    marker::{Key, Marker, MarkerId},
    panel::EventDetails,
    util::event_count_label,
    Clock, EventCountView, MapSurface, PanelView,
};


use self::fakes::*;

fn now() -> Timestamp {
    datetime!(2026-10-19 12:00 UTC).into()
}

fn in_days(days: i64) -> Timestamp {
    now().checked_add(Duration::days(days)).unwrap()
}

fn hof() -> MapPoint {
    MapPoint::from_lat_lng_deg(50.3167, 11.9167)
}

fn rehau() -> MapPoint {
    MapPoint::from_lat_lng_deg(50.2489, 12.0331)
}

fn config() -> MapConfig {
    MapConfig::build()
        .center(hof())
        .zoom(13.0)
        .category("music", "Musik")
        .category("art", "Kunst")
        .time_window("24 hours", TimeSpan::Hours(24))
        .time_window("7 days", TimeSpan::Days(7))
        .time_window("tillFullMoon", TimeSpan::Dynamic)
        .distance("1000m", Some(1_000.0))
        .distance("5km", Some(5_000.0))
        .location("hof", hof())
        .location("rehau", rehau())
        .finish()
}

type TestMap = EventMap<FakeSurface, FakePanel, FakeCounter, FixedClock>;

fn event_map(events: Vec<Event>) -> TestMap {
    EventMap::init(
        config(),
        events,
        FakeSurface::default(),
        FakePanel::default(),
        FakeCounter::default(),
        FixedClock(now()),
    )
}
