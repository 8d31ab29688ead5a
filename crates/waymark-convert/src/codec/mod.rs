//! Built-in track codecs.
//!
//! The in-process strategy reads a source file into an ordered sequence of
//! [`TrackSegment`]s and re-encodes that sequence in the destination format.
//! Only GPX and OziExplorer PLT have built-in readers/writers; KML and KMZ
//! conversions go through the external converter binary.

pub mod gpx;
pub mod plt;

use std::path::Path;

use crate::error::{ConversionError, ConversionResult};
use crate::format::TrackFormat;
use crate::track::TrackSegment;

/// Reads and parses `path` as `format`.
pub fn read(path: &Path, format: TrackFormat) -> ConversionResult<Vec<TrackSegment>> {
    let text = std::fs::read_to_string(path)?;
    parse(&text, format)
}

/// Parses already-loaded text as `format`.
pub fn parse(text: &str, format: TrackFormat) -> ConversionResult<Vec<TrackSegment>> {
    match format {
        TrackFormat::Gpx => gpx::parse(text),
        TrackFormat::Ozi => plt::parse(text),
        other => Err(ConversionError::UnsupportedByCodec(other)),
    }
}

/// Serializes segments as `format`.
pub fn render(segments: &[TrackSegment], format: TrackFormat) -> ConversionResult<String> {
    match format {
        TrackFormat::Gpx => Ok(gpx::render(segments)),
        TrackFormat::Ozi => Ok(plt::render(segments)),
        other => Err(ConversionError::UnsupportedByCodec(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::TrackPoint;

    fn sample() -> Vec<TrackSegment> {
        vec![
            TrackSegment::new(vec![
                TrackPoint {
                    lat: 55.751244,
                    lon: 37.618423,
                    elevation: Some(144.0),
                },
                TrackPoint {
                    lat: 55.752,
                    lon: 37.619,
                    elevation: None,
                },
            ]),
            TrackSegment::new(vec![TrackPoint {
                lat: 55.76,
                lon: 37.62,
                elevation: Some(150.5),
            }]),
        ]
    }

    #[test]
    fn round_trip_preserves_segment_and_point_counts() {
        let original = sample();
        for (a, b) in [
            (TrackFormat::Gpx, TrackFormat::Ozi),
            (TrackFormat::Ozi, TrackFormat::Gpx),
        ] {
            let there = render(&original, a).unwrap();
            let mid = parse(&there, a).unwrap();
            let back = render(&mid, b).unwrap();
            let again = parse(&back, b).unwrap();

            assert_eq!(again.len(), original.len(), "{a} -> {b} segment count");
            for (got, want) in again.iter().zip(&original) {
                assert_eq!(got.points.len(), want.points.len(), "{a} -> {b} point count");
            }
        }
    }

    #[test]
    fn kml_is_not_supported_by_the_codec() {
        assert!(matches!(
            render(&sample(), TrackFormat::Kml),
            Err(ConversionError::UnsupportedByCodec(TrackFormat::Kml))
        ));
        assert!(matches!(
            parse("", TrackFormat::Kmz),
            Err(ConversionError::UnsupportedByCodec(TrackFormat::Kmz))
        ));
    }
}
