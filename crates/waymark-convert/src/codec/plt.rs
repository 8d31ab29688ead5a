//! OziExplorer PLT track reader and writer.
//!
//! The PLT layout is six header lines followed by one comma-separated point
//! per line: `lat,lon,break_flag,altitude,…`. A break flag of `1` starts a
//! new segment; altitude `-777` means "not recorded". Altitude values are
//! carried through verbatim, the same way the original converter library
//! treated them.

use std::fmt::Write as _;

use crate::error::{ConversionError, ConversionResult};
use crate::format::TrackFormat;
use crate::track::{TrackPoint, TrackSegment};

const HEADER_LINES: usize = 6;
const NO_ALTITUDE: f64 = -777.0;

fn malformed(reason: impl Into<String>) -> ConversionError {
    ConversionError::Parse {
        format: TrackFormat::Ozi,
        reason: reason.into(),
    }
}

/// Parses PLT text into ordered track segments.
pub fn parse(text: &str) -> ConversionResult<Vec<TrackSegment>> {
    let mut lines = text.lines();
    match lines.next() {
        Some(first) if first.starts_with("OziExplorer Track Point File") => {}
        _ => return Err(malformed("missing OziExplorer header")),
    }

    let mut segments: Vec<TrackSegment> = Vec::new();
    for line in lines.skip(HEADER_LINES - 1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 2 {
            return Err(malformed(format!("bad point line {line:?}")));
        }
        let lat = fields[0]
            .parse::<f64>()
            .map_err(|_| malformed(format!("bad latitude {:?}", fields[0])))?;
        let lon = fields[1]
            .parse::<f64>()
            .map_err(|_| malformed(format!("bad longitude {:?}", fields[1])))?;
        let starts_segment = fields.get(2).is_some_and(|f| *f == "1");
        let elevation = fields
            .get(3)
            .and_then(|f| f.parse::<f64>().ok())
            .filter(|v| *v != NO_ALTITUDE);

        if starts_segment || segments.is_empty() {
            segments.push(TrackSegment::default());
        }
        if let Some(segment) = segments.last_mut() {
            segment.points.push(TrackPoint {
                lat,
                lon,
                elevation,
            });
        }
    }
    Ok(segments)
}

/// Serializes segments as a PLT track file.
pub fn render(segments: &[TrackSegment]) -> String {
    let total: usize = segments.iter().map(|s| s.points.len()).sum();

    let mut out = String::new();
    out.push_str("OziExplorer Track Point File Version 2.1\n");
    out.push_str("WGS 84\n");
    out.push_str("Altitude is in Feet\n");
    out.push_str("Reserved 3\n");
    out.push_str("0,2,255,Waymark export,0,0,2,8421376\n");
    let _ = writeln!(out, "{total}");

    for segment in segments {
        for (index, point) in segment.points.iter().enumerate() {
            let flag = if index == 0 { 1 } else { 0 };
            let altitude = point.elevation.unwrap_or(NO_ALTITUDE);
            let _ = writeln!(out, "{:.6},{:.6},{flag},{:.1}", point.lat, point.lon, altitude);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn break_flags_split_segments() {
        let text = "\
OziExplorer Track Point File Version 2.1
WGS 84
Altitude is in Feet
Reserved 3
0,2,255,test,0,0,2,8421376
4
55.751244,37.618423,1,144.0
55.752000,37.619000,0,-777.0
55.760000,37.620000,1,150.5
55.761000,37.621000,0,151.0
";
        let segments = parse(text).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].points.len(), 2);
        assert_eq!(segments[1].points.len(), 2);
        assert_eq!(segments[0].points[0].elevation, Some(144.0));
        assert_eq!(segments[0].points[1].elevation, None);
    }

    #[test]
    fn render_then_parse_preserves_structure() {
        let segments = vec![
            TrackSegment::new(vec![
                TrackPoint {
                    lat: 1.5,
                    lon: 2.5,
                    elevation: Some(10.0),
                },
                TrackPoint {
                    lat: 1.6,
                    lon: 2.6,
                    elevation: None,
                },
            ]),
            TrackSegment::new(vec![TrackPoint {
                lat: 3.0,
                lon: 4.0,
                elevation: None,
            }]),
        ];
        let again = parse(&render(&segments)).unwrap();
        assert_eq!(again, segments);
    }

    #[test]
    fn rejects_files_without_the_ozi_header() {
        assert!(matches!(
            parse("lat,lon\n1,2\n"),
            Err(ConversionError::Parse { .. })
        ));
    }
}
