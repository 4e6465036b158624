use emap_core::panel::EventDetails;
use maud::{html, Markup};

/// The content of the detail panel.
pub fn event_details(details: &EventDetails) -> Markup {
    let EventDetails {
        title,
        date,
        venue_name,
        venue_address,
        organizer_name,
        website,
    } = details;
    html! {
        h2 class="flyer-title" { (title) }
        p class="flyer-date" { (date) }
        @if venue_name.is_some() || venue_address.is_some() {
            div class="flyer-venue" {
                @if let Some(name) = venue_name {
                    p class="flyer-venue-name" { (name) }
                }
                @if let Some(address) = venue_address {
                    p class="flyer-venue-address" { (address) }
                }
            }
        }
        @if let Some(name) = organizer_name {
            p class="flyer-organizer" { "Veranstaltet von " (name) }
        }
        @if let Some(url) = website {
            a class="flyer-website" href=(url.as_str()) target="_blank" rel="noopener" {
                "Website"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emap_core::entities::*;
    use emap_entities::builders::*;
    use time::macros::datetime;

    #[test]
    fn render_complete_details() {
        let event = Event::build()
            .title("Punk im Hof")
            .date(datetime!(2026-10-20 19:30 +02:00).into())
            .venue(Some("Galeriehaus"), Some("Ludwigstraße 7, Hof"))
            .organizer(Some("Kollektiv"), None)
            .website(Some("https://example.org/punk"))
            .finish();
        let html = event_details(&EventDetails::from_event(&event)).into_string();
        assert!(html.contains(r#"<h2 class="flyer-title">Punk im Hof</h2>"#));
        assert!(html.contains("Dienstag, 20. Oktober 2026 um 19:30"));
        assert!(html.contains("Galeriehaus"));
        assert!(html.contains("Ludwigstraße 7, Hof"));
        assert!(html.contains("Veranstaltet von Kollektiv"));
        assert!(html.contains(r#"href="https://example.org/punk""#));
        assert!(html.contains(r#"rel="noopener""#));
    }

    #[test]
    fn omit_absent_fields() {
        let event = Event::build().title("Nur ein Titel").finish();
        let html = event_details(&EventDetails::from_event(&event)).into_string();
        assert!(html.contains("Nur ein Titel"));
        assert!(!html.contains("flyer-venue"));
        assert!(!html.contains("flyer-organizer"));
        assert!(!html.contains("href"));
    }

    #[test]
    fn escape_markup_in_text() {
        let event = Event::build()
            .title("<script>alert('x')</script>")
            .venue(Some("<b>Keller</b>"), None)
            .organizer(Some("Tom & Jerry"), None)
            .finish();
        let html = event_details(&EventDetails::from_event(&event)).into_string();
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Tom &amp; Jerry"));
    }
}
