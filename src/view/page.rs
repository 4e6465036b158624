use emap_boundary as json;
use emap_core::{entities::*, util::event_count_label};
use maud::{html, Markup, DOCTYPE};

use super::json_script;

const LEAFLET_CSS_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const MAIN_CSS_URL: &str = "assets/css/map.css";
const APP_JS_URL: &str = "assets/js/eventmap.js";

pub const MAP_CONFIG_ID: &str = "map-config";
pub const EVENTS_DATA_ID: &str = "events-data";

/// The static map page with filters, count readout and the
/// hidden detail panel.
///
/// `count` is the number of events that match the default filters.
pub fn map_page(
    title: &str,
    config: &MapConfig,
    events: &[Event],
    count: usize,
) -> serde_json::Result<Markup> {
    let map_config = json::MapConfig::from(config.clone());
    let events_data: Vec<_> = events.iter().cloned().map(json::Event::from).collect();
    let map_config = json_script(MAP_CONFIG_ID, &map_config)?;
    let events_data = json_script(EVENTS_DATA_ID, &events_data)?;
    Ok(html! {
        (DOCTYPE)
        html lang="de" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href=(LEAFLET_CSS_URL);
                link rel="stylesheet" href=(MAIN_CSS_URL);
            }
            body {
                header {
                    h1 { (title) }
                    (filters(config))
                    p id="event-count" aria-live="polite" { (event_count_label(count)) }
                }
                main {
                    div id="map" {}
                    (flyer())
                }
                (map_config)
                (events_data)
                script src=(LEAFLET_JS_URL) {}
                script type="module" src=(APP_JS_URL) {}
            }
        }
    })
}

fn filters(config: &MapConfig) -> Markup {
    let defaults = &config.defaults;
    html! {
        form class="filters" {
            label for="category-filter" { "Kategorie" }
            select id="category-filter" {
                option value=(CATEGORY_ALL) selected[defaults.category == CATEGORY_ALL] {
                    "Alle Kategorien"
                }
                @for c in &config.categories {
                    option value=(c.tag.as_str()) selected[defaults.category == c.tag.as_str()] {
                        (c.label)
                    }
                }
            }
            label for="time-filter" { "Zeitraum" }
            select id="time-filter" {
                option value=(TIME_WITHOUT_LIMIT) selected[defaults.time == TIME_WITHOUT_LIMIT] {
                    "Ohne Limit"
                }
                @for w in &config.time_windows {
                    option value=(w.id) selected[defaults.time == w.id] { (w.label) }
                }
            }
            label for="distance-filter" { "Entfernung" }
            select id="distance-filter" {
                option value=(DISTANCE_WITHOUT_LIMIT)
                    selected[defaults.distance == DISTANCE_WITHOUT_LIMIT] {
                    "Ohne Limit"
                }
                @for d in &config.distances {
                    option value=(d.id) selected[defaults.distance == d.id] { (d.label) }
                }
            }
            label for="location-filter" { "Ort" }
            select id="location-filter" {
                option value="" selected[defaults.location.is_empty()] { "Kartenmitte" }
                @for l in &config.locations {
                    option
                        value=(l.id)
                        data-lat=(l.pos.lat())
                        data-lng=(l.pos.lng())
                        selected[defaults.location == l.id] {
                        (l.label)
                    }
                }
            }
        }
    }
}

fn flyer() -> Markup {
    html! {
        aside id="event-flyer" class="flyer" role="dialog" aria-label="Veranstaltung" aria-hidden="true" {
            button id="flyer-close" type="button" aria-label="Schließen" { "×" }
            div id="flyer-content" {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emap_entities::builders::*;

    fn config() -> MapConfig {
        let mut config = MapConfig::build()
            .category("music", "Musik")
            .time_window("week", TimeSpan::Days(7))
            .distance("5km", Some(5_000.0))
            .location("rehau", MapPoint::from_lat_lng_deg(50.2489, 12.0331))
            .finish();
        config.defaults.time = "week".into();
        config
    }

    fn render(events: &[Event]) -> String {
        map_page("Events in Hof", &config(), events, events.len())
            .unwrap()
            .into_string()
    }

    #[test]
    fn render_page_skeleton() {
        let html = render(&[]);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<div id="map"></div>"#));
        assert!(html.contains(r#"<p id="event-count" aria-live="polite">0 events</p>"#));
        assert!(html.contains(r#"id="event-flyer""#));
        assert!(html.contains(r#"aria-hidden="true""#));
        assert!(html.contains(r#"<button id="flyer-close""#));
        assert!(html.contains(r#"<script id="map-config" type="application/json">"#));
        assert!(html.contains(r#"<script id="events-data" type="application/json">[]</script>"#));
    }

    #[test]
    fn preselect_defaults() {
        let html = render(&[]);
        assert!(html.contains(r#"<option value="all" selected>Alle Kategorien</option>"#));
        assert!(html.contains(r#"<option value="music">Musik</option>"#));
        assert!(html.contains(r#"<option value="week" selected>week</option>"#));
        assert!(html.contains(r#"<option value="withoutLimit">Ohne Limit</option>"#));
        assert!(html.contains(r#"data-lat="50.2489""#));
    }

    #[test]
    fn embed_events_safely() {
        let event = Event::build()
            .title("</script><script>alert(1)</script>")
            .date("2026-10-20T19:30:00Z".parse().unwrap())
            .finish();
        let html = render(&[event]);
        assert!(!html.contains("</script><script>alert(1)"));
        assert!(html.contains(r#""title":"<\/script><script>alert(1)<\/script>""#));
        assert!(html.contains(r#""date":"2026-10-20T19:30:00Z""#));
        assert!(html.contains(r#"<p id="event-count" aria-live="polite">1 events</p>"#));
    }
}
