//! Conversion strategies.
//!
//! Both strategies sit behind one contract: `convert(source, targetFormat)`
//! returns the destination path on success. The destination is always the
//! source path with the target format's extension, so staging cleanup can
//! derive both names.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec;
use crate::error::{ConversionError, ConversionResult};
use crate::format::TrackFormat;

/// Which strategy a converter component runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Delegate to an external converter binary (the default).
    #[default]
    External,
    /// Use the built-in GPX/PLT codec.
    Library,
}

/// A track conversion implementation.
#[async_trait]
pub trait ConversionStrategy: Send + Sync {
    /// Converts `source` into `target` format, returning the destination
    /// path.
    async fn convert(&self, source: &Path, target: TrackFormat) -> ConversionResult<PathBuf>;
}

/// Detects the source format and derives the destination path.
fn conversion_paths(
    source: &Path,
    target: TrackFormat,
) -> ConversionResult<(TrackFormat, PathBuf)> {
    let name = source
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let source_format = TrackFormat::from_file_name(name)
        .ok_or_else(|| ConversionError::UnknownFormat(name.to_string()))?;
    let dest = source.with_extension(target.extension().trim_start_matches('.'));
    Ok((source_format, dest))
}

/// Strategy invoking an external converter executable.
///
/// Invocation contract: `<binary> -i <srcCode> -f <src> -o <dstCode> -F <dst>`,
/// exit code 0 on success. The call blocks only the conversion task that
/// awaits it, never the dispatch loop.
pub struct ExternalProcess {
    binary: PathBuf,
}

impl ExternalProcess {
    /// Creates a strategy around the resolved binary path.
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }
}

#[async_trait]
impl ConversionStrategy for ExternalProcess {
    async fn convert(&self, source: &Path, target: TrackFormat) -> ConversionResult<PathBuf> {
        let (source_format, dest) = conversion_paths(source, target)?;

        let output = tokio::process::Command::new(&self.binary)
            .arg("-i")
            .arg(source_format.code())
            .arg("-f")
            .arg(source)
            .arg("-o")
            .arg(target.code())
            .arg("-F")
            .arg(&dest)
            .output()
            .await?;

        if !output.status.success() {
            return Err(ConversionError::ToolFailed {
                status: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        debug!(
            source = %source.display(),
            dest = %dest.display(),
            "external conversion finished"
        );
        Ok(dest)
    }
}

/// Strategy using the built-in codec, no external tool required.
///
/// File I/O and parsing run on the blocking pool.
#[derive(Debug, Default)]
pub struct CodecStrategy;

#[async_trait]
impl ConversionStrategy for CodecStrategy {
    async fn convert(&self, source: &Path, target: TrackFormat) -> ConversionResult<PathBuf> {
        let (source_format, dest) = conversion_paths(source, target)?;
        let source = source.to_path_buf();
        let dest_clone = dest.clone();

        tokio::task::spawn_blocking(move || -> ConversionResult<()> {
            let segments = codec::read(&source, source_format)?;
            let rendered = codec::render(&segments, target)?;
            std::fs::write(&dest_clone, rendered)?;
            Ok(())
        })
        .await
        .map_err(|join| {
            ConversionError::Io(std::io::Error::other(format!(
                "codec task failed: {join}"
            )))
        })??;

        Ok(dest)
    }
}
