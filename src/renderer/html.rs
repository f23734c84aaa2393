//! HTML launcher page: one table row per place with an Apple Maps deep link.

use super::links::{
    NoteFields, apple_maps_url, google_maps_url, linkable_source_url, notes_text,
};
use super::{Renderer, escape_markup};
use crate::config::LauncherConfig;
use crate::error::Result;
use crate::models::Place;

const STYLE: &[&str] = &[
    "body { font-family: -apple-system, BlinkMacSystemFont, sans-serif; }",
    "table { border-collapse: collapse; width: 100%; }",
    "th, td { border: 1px solid #ccc; padding: 4px 8px; }",
    "th { background: #f0f0f0; }",
    "a { text-decoration: none; }",
];

const TABLE_HEADER: &str = "<tr><th>#</th><th>Name</th><th>Open in Apple Maps</th>\
<th>Google Maps</th><th>Date</th><th>Notes</th></tr>";

const INSTRUCTIONS: &str = "Click a link in the \u{201c}Open in Apple Maps\u{201d} column, \
then use \u{201c}Add to Favorites\u{201d} or \u{201c}Add to Guide\u{201d} in Apple Maps.";

#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    title: String,
    precision: usize,
}

impl HtmlRenderer {
    pub fn new(config: &LauncherConfig) -> Self {
        Self {
            title: config.title.clone(),
            precision: config.precision,
        }
    }

    /// Render the complete page
    pub fn render_document(&self, places: &[Place]) -> String {
        let mut lines = self.header();
        lines.extend(
            places
                .iter()
                .enumerate()
                .map(|(i, place)| self.row(i + 1, place)),
        );
        lines.extend(footer());
        lines.join("\n")
    }

    /// One table row; depends only on the place and its display position
    pub fn row(&self, position: usize, place: &Place) -> String {
        let name = escape_markup(&place.name);
        let deep_link = apple_maps_url(place, self.precision);
        let secondary_link = google_maps_url(place, self.precision);
        let link_label = if linkable_source_url(place).is_some() {
            "Google link"
        } else {
            "Google Maps"
        };
        let date = place.date.as_deref().unwrap_or_default();
        let notes = notes_text(place, NoteFields::WITHOUT_DATE);

        [
            "<tr>".to_string(),
            format!("<td>{}</td>", position),
            format!("<td>{}</td>", name),
            format!(
                "<td><a href='{}' target='_blank'>Open in Apple Maps</a></td>",
                escape_markup(&deep_link)
            ),
            format!(
                "<td><a href='{}' target='_blank'>{}</a></td>",
                escape_markup(&secondary_link),
                link_label
            ),
            format!("<td>{}</td>", escape_markup(date)),
            format!("<td>{}</td>", escape_markup(&notes)),
            "</tr>".to_string(),
        ]
        .join("\n")
    }

    fn header(&self) -> Vec<String> {
        let title = escape_markup(&self.title);
        let mut lines = vec![
            "<!DOCTYPE html>".to_string(),
            "<html>".to_string(),
            "<head>".to_string(),
            "<meta charset='utf-8'>".to_string(),
            format!("<title>{}</title>", title),
            "<style>".to_string(),
        ];
        lines.extend(STYLE.iter().map(|rule| rule.to_string()));
        lines.extend([
            "</style>".to_string(),
            "</head>".to_string(),
            "<body>".to_string(),
            format!("<h1>{}</h1>", title),
            "<table>".to_string(),
            TABLE_HEADER.to_string(),
        ]);
        lines
    }
}

fn footer() -> Vec<String> {
    vec![
        "</table>".to_string(),
        format!("<p>{}</p>", INSTRUCTIONS),
        "</body>".to_string(),
        "</html>".to_string(),
    ]
}

impl Renderer for HtmlRenderer {
    fn render(&self, places: &[Place]) -> Result<String> {
        Ok(self.render_document(places))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str) -> Place {
        Place {
            name: name.to_string(),
            latitude: 50.82253,
            longitude: -0.1315,
            date: Some("2023-04-01".to_string()),
            note: Some("Great view".to_string()),
            address: Some("Madeira Dr".to_string()),
            source_url: Some("http://maps.google.com/?q=Pier&cid=1".to_string()),
        }
    }

    fn renderer() -> HtmlRenderer {
        HtmlRenderer::new(&LauncherConfig::default())
    }

    #[test]
    fn test_empty_document_is_well_formed() {
        let html = renderer().render_document(&[]);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(TABLE_HEADER));
        assert!(html.ends_with("</html>"));
        assert_eq!(html.matches("<tr>\n").count(), 0);
    }

    #[test]
    fn test_row_contents() {
        let row = renderer().row(1, &place("Brighton Pier"));

        assert!(row.contains("<td>1</td>"));
        assert!(row.contains("<td>Brighton Pier</td>"));
        assert!(row.contains(
            "href='https://maps.apple.com/?ll=50.82253000,-0.13150000&amp;q=Brighton%20Pier'"
        ));
        assert!(row.contains("href='http://maps.google.com/?q=Pier&amp;cid=1'"));
        assert!(row.contains(">Google link</a>"));
        assert!(row.contains("<td>2023-04-01</td>"));
        assert!(row.contains("<td>Address: Madeira Dr | Great view</td>"));
    }

    #[test]
    fn test_name_is_escaped() {
        let row = renderer().row(1, &place("<script>alert('x')</script>"));
        assert!(!row.contains("<script>"));
        assert!(row.contains("&lt;script&gt;alert(&apos;x&apos;)&lt;/script&gt;"));
    }

    #[test]
    fn test_reconstructed_secondary_link() {
        let mut p = place("X");
        p.source_url = None;
        let row = renderer().row(1, &p);
        assert!(row.contains("href='https://maps.google.com/?q=50.82253000,-0.13150000'"));
        assert!(row.contains(">Google Maps</a>"));
    }

    #[test]
    fn test_unusable_source_url_gets_rebuilt_link_and_label() {
        for url in ["   ", "javascript:alert('x')"] {
            let mut p = place("X");
            p.source_url = Some(url.to_string());
            let row = renderer().row(1, &p);
            assert!(row.contains("href='https://maps.google.com/?q=50.82253000,-0.13150000'"));
            assert!(row.contains(">Google Maps</a>"));
            assert!(!row.contains("javascript:"));
        }
    }

    #[test]
    fn test_rows_in_input_order() {
        let html = renderer().render_document(&[place("First"), place("Second"), place("Third")]);
        let first = html.find("First").unwrap();
        let second = html.find("Second").unwrap();
        let third = html.find("Third").unwrap();
        assert!(first < second && second < third);
        assert_eq!(html.matches("<tr>\n").count(), 3);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let places = vec![place("A"), place("B")];
        assert_eq!(
            renderer().render_document(&places),
            renderer().render_document(&places)
        );
    }

    #[test]
    fn test_custom_title() {
        let config = LauncherConfig::default().with_title("Trips & Eats");
        let html = HtmlRenderer::new(&config).render_document(&[]);
        assert!(html.contains("<title>Trips &amp; Eats</title>"));
        assert!(html.contains("<h1>Trips &amp; Eats</h1>"));
    }
}
