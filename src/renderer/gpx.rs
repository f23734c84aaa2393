//! GPX 1.1 waypoint document, written with `quick_xml::Writer`.

use super::Renderer;
use super::links::{NoteFields, format_coordinate, notes_text};
use crate::config::LauncherConfig;
use crate::constants::GPX_CREATOR;
use crate::error::Result;
use crate::models::Place;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io;

const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";
const GPX_SCHEMA_LOCATION: &str =
    "http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

#[derive(Debug, Clone)]
pub struct GpxRenderer {
    precision: usize,
}

impl GpxRenderer {
    pub fn new(config: &LauncherConfig) -> Self {
        Self {
            precision: config.precision,
        }
    }

    pub fn render_document(&self, places: &[Place]) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("gpx").with_attributes([
            ("version", "1.1"),
            ("creator", GPX_CREATOR),
            ("xmlns", GPX_NAMESPACE),
            ("xmlns:xsi", XSI_NAMESPACE),
            ("xsi:schemaLocation", GPX_SCHEMA_LOCATION),
        ])))?;
        for place in places {
            self.write_waypoint(&mut writer, place)?;
        }
        writer.write_event(Event::End(BytesEnd::new("gpx")))?;

        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }

    fn write_waypoint(&self, writer: &mut Writer<Vec<u8>>, place: &Place) -> io::Result<()> {
        let latitude = format_coordinate(place.latitude, self.precision);
        let longitude = format_coordinate(place.longitude, self.precision);

        writer.write_event(Event::Start(BytesStart::new("wpt").with_attributes([
            ("lat", latitude.as_str()),
            ("lon", longitude.as_str()),
        ])))?;
        write_text_element(writer, "name", &place.name)?;

        let desc = notes_text(place, NoteFields::FULL);
        if !desc.is_empty() {
            write_text_element(writer, "desc", &desc)?;
        }
        writer.write_event(Event::End(BytesEnd::new("wpt")))
    }
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))
}

impl Renderer for GpxRenderer {
    fn render(&self, places: &[Place]) -> Result<String> {
        self.render_document(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> GpxRenderer {
        GpxRenderer::new(&LauncherConfig::default())
    }

    #[test]
    fn test_empty_document() {
        let gpx = renderer().render_document(&[]).unwrap();
        assert!(gpx.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(gpx.contains(r#"creator="places-launcher""#));
        assert!(gpx.contains(r#"xmlns="http://www.topografix.com/GPX/1/1""#));
        assert!(gpx.ends_with("</gpx>"));
        assert!(!gpx.contains("<wpt"));
    }

    #[test]
    fn test_waypoint() {
        let place = Place {
            name: "Tom & Jerry's".to_string(),
            latitude: -33.8568,
            longitude: 151.2153,
            date: None,
            note: Some("Opera <House>".to_string()),
            address: None,
            source_url: None,
        };

        let gpx = renderer().render_document(&[place]).unwrap();
        assert!(gpx.contains(r#"<wpt lat="-33.85680000" lon="151.21530000">"#));
        assert!(gpx.contains("<name>Tom &amp; Jerry&apos;s</name>"));
        assert!(gpx.contains("<desc>Opera &lt;House&gt;</desc>"));
    }

    #[test]
    fn test_waypoints_nest_inside_gpx_element() {
        let place = Place {
            name: "Pier".to_string(),
            latitude: 50.82253,
            longitude: -0.1315,
            date: Some("2023-04-01".to_string()),
            note: None,
            address: None,
            source_url: Some("http://maps.google.com/?q=Pier&cid=1".to_string()),
        };

        let gpx = renderer().render_document(&[place]).unwrap();
        let lines: Vec<&str> = gpx.lines().collect();
        assert_eq!(lines[2], r#"  <wpt lat="50.82253000" lon="-0.13150000">"#);
        assert_eq!(lines[3], "    <name>Pier</name>");
        assert_eq!(
            lines[4],
            "    <desc>Saved: 2023-04-01 | Google Maps: http://maps.google.com/?q=Pier&amp;cid=1</desc>"
        );
        assert_eq!(lines[5], "  </wpt>");
        assert_eq!(lines[6], "</gpx>");
    }

    #[test]
    fn test_waypoint_without_notes_has_no_desc() {
        let place = Place {
            name: "Bare".to_string(),
            latitude: 1.0,
            longitude: 2.0,
            date: None,
            note: None,
            address: None,
            source_url: None,
        };
        let gpx = renderer().render_document(&[place]).unwrap();
        assert!(gpx.contains("<name>Bare</name>"));
        assert!(!gpx.contains("<desc>"));
    }
}
