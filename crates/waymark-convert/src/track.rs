//! Track segment model shared by the codecs.

/// One recorded track point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Elevation, if the source format recorded one.
    pub elevation: Option<f64>,
}

/// An ordered run of track points.
///
/// Conversion preserves the segment sequence and the per-segment point
/// sequence; formats differ only in how the same sequence is serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackSegment {
    /// Points in recording order.
    pub points: Vec<TrackPoint>,
}

impl TrackSegment {
    /// Creates a segment from points.
    pub fn new(points: Vec<TrackPoint>) -> Self {
        Self { points }
    }
}
