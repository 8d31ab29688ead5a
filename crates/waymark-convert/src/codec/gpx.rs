//! GPX reader and writer.
//!
//! Handles the track subset of GPX 1.1: `<trkseg>` runs of `<trkpt>` with
//! `lat`/`lon` attributes and an optional `<ele>` child. Waypoints, routes
//! and metadata are ignored on read and never produced on write.

use std::fmt::Write as _;

use crate::error::{ConversionError, ConversionResult};
use crate::format::TrackFormat;
use crate::track::{TrackPoint, TrackSegment};

fn malformed(reason: impl Into<String>) -> ConversionError {
    ConversionError::Parse {
        format: TrackFormat::Gpx,
        reason: reason.into(),
    }
}

/// Parses GPX text into ordered track segments.
pub fn parse(text: &str) -> ConversionResult<Vec<TrackSegment>> {
    if !text.contains("<gpx") {
        return Err(malformed("no <gpx> root element"));
    }

    let mut segments = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find("<trkseg") {
        let after_open = &rest[open..];
        let body_start = after_open
            .find('>')
            .ok_or_else(|| malformed("unterminated <trkseg> tag"))?
            + 1;
        let body_and_rest = &after_open[body_start..];
        let close = body_and_rest
            .find("</trkseg>")
            .ok_or_else(|| malformed("missing </trkseg>"))?;
        segments.push(parse_segment(&body_and_rest[..close])?);
        rest = &body_and_rest[close + "</trkseg>".len()..];
    }
    Ok(segments)
}

fn parse_segment(body: &str) -> ConversionResult<TrackSegment> {
    let mut points = Vec::new();
    let mut rest = body;
    while let Some(open) = rest.find("<trkpt") {
        let after_open = &rest[open + "<trkpt".len()..];
        let tag_end = after_open
            .find('>')
            .ok_or_else(|| malformed("unterminated <trkpt> tag"))?;
        let attrs = &after_open[..tag_end];
        let lat = parse_coord(attrs, "lat")?;
        let lon = parse_coord(attrs, "lon")?;

        let mut elevation = None;
        let mut next = &after_open[tag_end + 1..];
        if !attrs.trim_end().ends_with('/') {
            let close = next
                .find("</trkpt>")
                .ok_or_else(|| malformed("missing </trkpt>"))?;
            let inner = &next[..close];
            if let Some(raw) = element_text(inner, "ele") {
                elevation = Some(
                    raw.trim()
                        .parse::<f64>()
                        .map_err(|_| malformed(format!("bad elevation {raw:?}")))?,
                );
            }
            next = &next[close + "</trkpt>".len()..];
        }

        points.push(TrackPoint {
            lat,
            lon,
            elevation,
        });
        rest = next;
    }
    Ok(TrackSegment::new(points))
}

fn parse_coord(attrs: &str, name: &str) -> ConversionResult<f64> {
    let raw = attr_value(attrs, name)
        .ok_or_else(|| malformed(format!("<trkpt> missing {name} attribute")))?;
    raw.parse::<f64>()
        .map_err(|_| malformed(format!("bad {name} value {raw:?}")))
}

/// Extracts a double-quoted attribute value from a tag's attribute list.
fn attr_value<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{name}=\"");
    let start = attrs.find(&needle)? + needle.len();
    let rest = &attrs[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

/// Returns the text content of the first `<name>…</name>` element.
fn element_text<'a>(body: &'a str, name: &str) -> Option<&'a str> {
    let open = format!("<{name}>");
    let close = format!("</{name}>");
    let start = body.find(&open)? + open.len();
    let rest = &body[start..];
    let end = rest.find(&close)?;
    Some(&rest[..end])
}

/// Serializes segments as a GPX 1.1 document with a single `<trk>`.
pub fn render(segments: &[TrackSegment]) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(
        "<gpx version=\"1.1\" creator=\"waymark\" xmlns=\"http://www.topografix.com/GPX/1/1\">\n",
    );
    out.push_str("  <trk>\n");
    for segment in segments {
        out.push_str("    <trkseg>\n");
        for point in &segment.points {
            match point.elevation {
                Some(ele) => {
                    let _ = writeln!(
                        out,
                        "      <trkpt lat=\"{}\" lon=\"{}\"><ele>{}</ele></trkpt>",
                        point.lat, point.lon, ele
                    );
                }
                None => {
                    let _ = writeln!(
                        out,
                        "      <trkpt lat=\"{}\" lon=\"{}\"/>",
                        point.lat, point.lon
                    );
                }
            }
        }
        out.push_str("    </trkseg>\n");
    }
    out.push_str("  </trk>\n</gpx>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<gpx version="1.1" creator="test">
  <trk><name>morning ride</name>
    <trkseg>
      <trkpt lat="55.751244" lon="37.618423"><ele>144.0</ele></trkpt>
      <trkpt lat="55.752000" lon="37.619000"/>
    </trkseg>
    <trkseg>
      <trkpt lat="55.760000" lon="37.620000"><ele>150.5</ele></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    #[test]
    fn parses_segments_points_and_elevation() {
        let segments = parse(SAMPLE).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].points.len(), 2);
        assert_eq!(segments[1].points.len(), 1);

        let first = segments[0].points[0];
        assert_eq!(first.lat, 55.751244);
        assert_eq!(first.lon, 37.618423);
        assert_eq!(first.elevation, Some(144.0));
        assert_eq!(segments[0].points[1].elevation, None);
    }

    #[test]
    fn render_then_parse_is_lossless_for_the_track_subset() {
        let segments = parse(SAMPLE).unwrap();
        let again = parse(&render(&segments)).unwrap();
        assert_eq!(again, segments);
    }

    #[test]
    fn rejects_non_gpx_content() {
        assert!(matches!(
            parse("just some text"),
            Err(ConversionError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_trkpt_without_coordinates() {
        let bad = r#"<gpx><trk><trkseg><trkpt lat="1.0"/></trkseg></trk></gpx>"#;
        assert!(matches!(parse(bad), Err(ConversionError::Parse { .. })));
    }
}
