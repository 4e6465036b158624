//! Decide which events match the current filter selection.
//!
//! Unknown bucket identifiers never exclude an event (fail open).

use std::borrow::Borrow;

use crate::entities::*;

/// Everything besides the selection that is needed to evaluate the filters.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub config: &'a MapConfig,
    /// Distances are measured from here
    pub reference: MapPoint,
    pub now: Timestamp,
}

pub fn matches_category(event: &Event, selected: &str) -> bool {
    selected == CATEGORY_ALL || event.category.as_str() == selected
}

pub fn matches_time_window(event: &Event, selected: &str, ctx: &FilterContext) -> bool {
    if selected == TIME_WITHOUT_LIMIT {
        return true;
    }
    let Some(window) = ctx.config.time_window(selected) else {
        return true;
    };
    let Some(duration) = window.span.duration() else {
        // Dynamic windows like "till full moon" are not computed yet.
        return true;
    };
    match ctx.now.checked_add(duration) {
        Some(cutoff) => event.date <= cutoff,
        None => true,
    }
}

pub fn matches_distance(event: &Event, selected: &str, ctx: &FilterContext) -> bool {
    if selected == DISTANCE_WITHOUT_LIMIT {
        return true;
    }
    let Some(radius) = ctx.config.distance(selected).and_then(|d| d.radius) else {
        return true;
    };
    let Some(pos) = event.pos() else {
        return false;
    };
    MapPoint::distance(ctx.reference, pos) <= radius
}

pub fn matches(event: &Event, selection: &FilterSelection, ctx: &FilterContext) -> bool {
    matches_category(event, &selection.category)
        && matches_time_window(event, &selection.time, ctx)
        && matches_distance(event, &selection.distance, ctx)
}

/// Select all matching events in their original order.
pub fn filter_events<'a, E>(
    events: &'a [E],
    selection: &FilterSelection,
    ctx: &FilterContext,
) -> Vec<&'a E>
where
    E: Borrow<Event>,
{
    events
        .iter()
        .filter(|e| matches((*e).borrow(), selection, ctx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use emap_entities::builders::*;
    use time::macros::datetime;

    fn now() -> Timestamp {
        datetime!(2026-10-19 12:00 UTC).into()
    }

    fn hof() -> MapPoint {
        MapPoint::from_lat_lng_deg(50.3167, 11.9167)
    }

    fn config() -> MapConfig {
        MapConfig::build()
            .center(hof())
            .time_window("24h", TimeSpan::Hours(24))
            .time_window("7d", TimeSpan::Days(7))
            .time_window("tillFullMoon", TimeSpan::Dynamic)
            .distance("1km", Some(1_000.0))
            .distance("everywhere", None)
            .finish()
    }

    fn ctx(config: &MapConfig) -> FilterContext<'_> {
        FilterContext {
            config,
            reference: hof(),
            now: now(),
        }
    }

    fn dated(ts: Timestamp) -> Event {
        Event::build().title("x").category("music").date(ts).finish()
    }

    #[test]
    fn category_all_matches_everything() {
        let e = Event::build().category("Music").finish();
        assert!(matches_category(&e, CATEGORY_ALL));
        let e = Event::build().category("").finish();
        assert!(matches_category(&e, CATEGORY_ALL));
    }

    #[test]
    fn category_is_compared_exactly() {
        let e = Event::build().category("music").finish();
        assert!(matches_category(&e, "music"));
        assert!(!matches_category(&e, "Music"));
        assert!(!matches_category(&e, "art"));
        assert!(!matches_category(&e, "musi"));
    }

    #[test]
    fn time_window_cutoff() {
        let config = config();
        let ctx = ctx(&config);
        let almost = now().checked_add(Duration::minutes(24 * 60 - 1)).unwrap();
        let exactly = now().checked_add(Duration::hours(24)).unwrap();
        let beyond = now().checked_add(Duration::minutes(24 * 60 + 1)).unwrap();
        assert!(matches_time_window(&dated(almost), "24h", &ctx));
        assert!(matches_time_window(&dated(exactly), "24h", &ctx));
        assert!(!matches_time_window(&dated(beyond), "24h", &ctx));
        assert!(matches_time_window(&dated(beyond), "7d", &ctx));
    }

    #[test]
    fn past_events_are_within_every_time_window() {
        let config = config();
        let ctx = ctx(&config);
        let yesterday = now().checked_add(Duration::days(-1)).unwrap();
        assert!(matches_time_window(&dated(yesterday), "24h", &ctx));
    }

    #[test]
    fn time_window_fails_open() {
        let config = config();
        let ctx = ctx(&config);
        let far_away = now().checked_add(Duration::days(365)).unwrap();
        let e = dated(far_away);
        assert!(matches_time_window(&e, TIME_WITHOUT_LIMIT, &ctx));
        assert!(matches_time_window(&e, "unknown", &ctx));
        assert!(matches_time_window(&e, "tillFullMoon", &ctx));
        assert!(matches_time_window(&e, "", &ctx));
    }

    #[test]
    fn distance_boundary_is_inclusive() {
        let config = config();
        let ctx = ctx(&config);
        // ~ 1000 m north of the reference point
        let pos = MapPoint::from_lat_lng_deg(hof().lat() + 0.008_993_2, hof().lng());
        let d = MapPoint::distance(hof(), pos).to_meters();
        let e = Event::build().pos(pos).finish();

        let exact = MapConfig::build().distance("r", Some(d)).finish();
        assert!(matches_distance(&e, "r", &FilterContext { config: &exact, ..ctx }));

        let shorter = MapConfig::build().distance("r", Some(d - 0.01)).finish();
        assert!(!matches_distance(&e, "r", &FilterContext { config: &shorter, ..ctx }));
    }

    #[test]
    fn distance_within_and_beyond_radius() {
        let config = config();
        let ctx = ctx(&config);
        let near = Event::build()
            .pos(MapPoint::from_lat_lng_deg(50.3190, 11.9190))
            .finish();
        let far = Event::build()
            .pos(MapPoint::from_lat_lng_deg(50.3400, 11.9167))
            .finish();
        assert!(matches_distance(&near, "1km", &ctx));
        assert!(!matches_distance(&far, "1km", &ctx));
    }

    #[test]
    fn distance_fails_open() {
        let config = config();
        let ctx = ctx(&config);
        let far = Event::build()
            .pos(MapPoint::from_lat_lng_deg(-33.0, 151.0))
            .finish();
        assert!(matches_distance(&far, DISTANCE_WITHOUT_LIMIT, &ctx));
        assert!(matches_distance(&far, "everywhere", &ctx));
        assert!(matches_distance(&far, "unknown", &ctx));
    }

    #[test]
    fn distance_without_coordinates() {
        let config = config();
        let ctx = ctx(&config);
        let e = Event::build().lat(Some(50.3167)).lng(None).finish();
        assert!(!matches_distance(&e, "1km", &ctx));
        assert!(matches_distance(&e, "everywhere", &ctx));
        assert!(matches_distance(&e, DISTANCE_WITHOUT_LIMIT, &ctx));
    }

    #[test]
    fn match_requires_all_predicates() {
        let config = config();
        let ctx = ctx(&config);
        let tomorrow = now().checked_add(Duration::days(1)).unwrap();
        let e = Event::build()
            .category("music")
            .date(tomorrow)
            .pos(hof())
            .finish();
        let selection = |category: &str, time: &str, distance: &str| FilterSelection {
            category: category.into(),
            time: time.into(),
            distance: distance.into(),
            location: String::new(),
        };
        assert!(matches(&e, &selection("music", "7d", "1km"), &ctx));
        assert!(!matches(&e, &selection("art", "7d", "1km"), &ctx));
        assert!(matches(&e, &selection("music", "24h", "1km"), &ctx));
        let later = Event {
            date: tomorrow.checked_add(Duration::minutes(1)).unwrap(),
            ..e.clone()
        };
        assert!(!matches(&later, &selection("music", "24h", "1km"), &ctx));
        let far = Event {
            lat: Some(51.0),
            ..e.clone()
        };
        assert!(!matches(&far, &selection("music", "7d", "1km"), &ctx));
        assert!(matches(&far, &selection(CATEGORY_ALL, TIME_WITHOUT_LIMIT, "everywhere"), &ctx));
    }

    #[test]
    fn filter_keeps_the_original_order() {
        let config = config();
        let ctx = ctx(&config);
        let events = vec![
            Event::build().title("c").category("music").finish(),
            Event::build().title("a").category("art").finish(),
            Event::build().title("b").category("music").finish(),
            Event::build().title("d").category("music").finish(),
        ];
        let selection = FilterSelection {
            category: "music".into(),
            ..Default::default()
        };
        let titles: Vec<_> = filter_events(&events, &selection, &ctx)
            .into_iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["c", "b", "d"]);
    }

    #[test]
    fn filter_keeps_events_without_coordinates() {
        let config = config();
        let ctx = ctx(&config);
        let events = vec![
            Event::build().title("placeable").pos(hof()).finish(),
            Event::build().title("unplaceable").finish(),
        ];
        let filtered = filter_events(&events, &FilterSelection::default(), &ctx);
        assert_eq!(filtered.len(), 2);
    }
}
