//! # Waymark Convert
//!
//! GPS track conversion pipeline.
//!
//! The [`TrackConverter`] component offers format-choice keyboards for
//! uploaded track files and handles the resulting callbacks: it stages the
//! file locally, runs a [`ConversionStrategy`] (an external converter binary
//! or the built-in codec), uploads the result and cleans up the staging
//! files on every exit path.

pub mod codec;
pub mod converter;
pub mod error;
pub mod format;
pub mod strategy;
pub mod track;

pub use converter::{ConverterConfig, TrackConverter};
pub use error::{ConversionError, ConversionResult};
pub use format::TrackFormat;
pub use strategy::{CodecStrategy, ConversionStrategy, ExternalProcess, StrategyKind};
pub use track::{TrackPoint, TrackSegment};
