//! Track format table.
//!
//! A fixed bidirectional mapping between file extensions and converter
//! format codes. The same table drives read-side detection (which uploads
//! get an offer) and write-side selection (which buttons are shown and what
//! `-i`/`-o` codes the external converter receives).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A known track file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackFormat {
    /// Google Earth KML (`.kml`).
    Kml,
    /// Zipped KML (`.kmz`).
    Kmz,
    /// OziExplorer track (`.plt`, converter code `ozi`).
    Ozi,
    /// GPS Exchange Format (`.gpx`).
    Gpx,
}

impl TrackFormat {
    /// Every known format, in offer order.
    pub const ALL: [TrackFormat; 4] = [
        TrackFormat::Kml,
        TrackFormat::Kmz,
        TrackFormat::Ozi,
        TrackFormat::Gpx,
    ];

    /// Detects a format from a file extension (with leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            ".kml" => Some(Self::Kml),
            ".kmz" => Some(Self::Kmz),
            ".plt" => Some(Self::Ozi),
            ".gpx" => Some(Self::Gpx),
            _ => None,
        }
    }

    /// Detects a format from a file name.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let dot = name.rfind('.')?;
        Self::from_extension(&name[dot..])
    }

    /// Looks a format up by its converter code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "kml" => Some(Self::Kml),
            "kmz" => Some(Self::Kmz),
            "ozi" => Some(Self::Ozi),
            "gpx" => Some(Self::Gpx),
            _ => None,
        }
    }

    /// The converter format code (`-i` / `-o` argument value).
    pub fn code(self) -> &'static str {
        match self {
            Self::Kml => "kml",
            Self::Kmz => "kmz",
            Self::Ozi => "ozi",
            Self::Gpx => "gpx",
        }
    }

    /// The file extension, leading dot included.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Kml => ".kml",
            Self::Kmz => ".kmz",
            Self::Ozi => ".plt",
            Self::Gpx => ".gpx",
        }
    }
}

impl fmt::Display for TrackFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_and_code_tables_are_consistent() {
        let expected = [
            (TrackFormat::Kml, ".kml", "kml"),
            (TrackFormat::Kmz, ".kmz", "kmz"),
            (TrackFormat::Ozi, ".plt", "ozi"),
            (TrackFormat::Gpx, ".gpx", "gpx"),
        ];
        for (format, ext, code) in expected {
            assert_eq!(format.extension(), ext);
            assert_eq!(format.code(), code);
            assert_eq!(TrackFormat::from_extension(ext), Some(format));
            assert_eq!(TrackFormat::from_code(code), Some(format));
        }
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        assert_eq!(TrackFormat::from_extension(".pdf"), None);
        assert_eq!(TrackFormat::from_file_name("notes.txt"), None);
        assert_eq!(TrackFormat::from_file_name("no-extension"), None);
    }

    #[test]
    fn detection_is_case_insensitive() {
        assert_eq!(
            TrackFormat::from_file_name("Trip.GPX"),
            Some(TrackFormat::Gpx)
        );
    }
}
