//! Track converter component.
//!
//! On a document upload with a known track extension, offers one inline
//! button per other known format. On the resulting callback, stages the
//! file, runs the configured strategy and replies with the converted
//! document. Staging files are removed on every exit path, success or not.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use waymark_core::{
    callback_payload, BoxedTransport, CallbackQuery, Component, ComponentId, ConfigSnapshot,
    Document, DocumentUpload, IdCell, InlineButton, KeyboardMessage, Message, Outbound, Outbox,
    RoutingError,
};

use crate::error::{ConversionError, ConversionResult};
use crate::format::TrackFormat;
use crate::strategy::{CodecStrategy, ConversionStrategy, ExternalProcess, StrategyKind};

/// Converter configuration, persisted across restarts by the config store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Directory where staged and converted files live.
    pub runtime_dir: PathBuf,
    /// External converter binary: a bare name looked up on `PATH` and in
    /// `runtime_dir`, or an explicit path.
    pub binary_name: String,
    /// Which strategy to run.
    pub strategy: StrategyKind,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            runtime_dir: PathBuf::from("runtime"),
            binary_name: "gpsbabel".to_string(),
            strategy: StrategyKind::default(),
        }
    }
}

/// The track conversion component.
pub struct TrackConverter {
    id: IdCell,
    outbox: Outbox,
    transport: BoxedTransport,
    config: ConverterConfig,
}

impl TrackConverter {
    /// Stable key for configuration persistence.
    pub const CONFIG_KEY: &'static str = "track_converter";

    /// Creates the component.
    pub fn new(outbox: Outbox, transport: BoxedTransport, config: ConverterConfig) -> Self {
        Self {
            id: IdCell::new(),
            outbox,
            transport,
            config,
        }
    }

    /// Resolves the configured converter binary, preferring the runtime
    /// directory, then `PATH`.
    fn binary_path(&self) -> Option<PathBuf> {
        let local = self.config.runtime_dir.join(&self.config.binary_name);
        if local.is_file() {
            return Some(local);
        }
        which::which(&self.config.binary_name).ok()
    }

    fn strategy(&self) -> ConversionResult<Box<dyn ConversionStrategy>> {
        match self.config.strategy {
            StrategyKind::External => {
                let binary = self
                    .binary_path()
                    .ok_or_else(|| ConversionError::ToolMissing {
                        binary: self.config.binary_name.clone(),
                    })?;
                Ok(Box::new(ExternalProcess::new(binary)))
            }
            StrategyKind::Library => Ok(Box::new(CodecStrategy)),
        }
    }

    /// Sends the format-choice keyboard for an uploaded track file.
    fn offer_conversion(&self, message: &Message, document: &Document, source: TrackFormat) {
        let buttons: Vec<InlineButton> = TrackFormat::ALL
            .into_iter()
            .filter(|format| *format != source)
            .map(|format| InlineButton {
                label: format!("Convert to {format}"),
                payload: callback_payload(self.id.get(), &[&document.file_id, format.code()]),
            })
            .collect();

        self.outbox.send(Outbound::Keyboard(KeyboardMessage {
            chat_id: message.chat.id,
            text: "I can convert this track into one of these formats:".to_string(),
            reply_to: Some(message.message_id),
            buttons,
        }));
    }

    /// Runs one conversion end to end: stage, convert, upload, clean up.
    async fn run_conversion(&self, query: &CallbackQuery, file_id: &str, target: TrackFormat) {
        // The keyboard message replies to the original document message;
        // its file name is the staging name.
        let Some(original) = query.message.reply_to.as_deref() else {
            warn!("conversion callback without an original message");
            return;
        };
        let Some(document) = original.document.as_ref() else {
            warn!("conversion callback whose original message has no document");
            return;
        };

        let staging = self.config.runtime_dir.join(&document.file_name);
        if let Err(err) = self.stage(file_id, &staging).await {
            error!(error = %err, file_id, "failed to stage track file");
            return;
        }

        let outcome = match self.strategy() {
            Ok(strategy) => strategy.convert(&staging, target).await,
            Err(err) => Err(err),
        };

        match outcome {
            Ok(dest) => {
                info!(dest = %dest.display(), "track converted, uploading");
                let upload = Outbound::Document(DocumentUpload {
                    chat_id: original.chat.id,
                    path: dest.clone(),
                    reply_to: Some(original.message_id),
                });
                // Awaited directly so cleanup runs after the upload outcome
                // is known; regular messages go through the outbox instead.
                if let Err(err) = self.transport.send(upload).await {
                    error!(error = %err, "failed to upload converted track");
                }
                remove_staged(&staging).await;
                remove_staged(&dest).await;
            }
            Err(err) => {
                error!(error = %err, target = %target, "track conversion failed");
                self.outbox.send(Outbound::reply(
                    query.message.chat.id,
                    query.message.message_id,
                    "Sorry, I could not convert that file.",
                ));
                remove_staged(&staging).await;
            }
        }
    }

    async fn stage(&self, file_id: &str, staging: &Path) -> waymark_core::TransportResult<()> {
        let location = self.transport.resolve_file(file_id).await?;
        let bytes = self.transport.download(&location, staging).await?;
        info!(bytes, staging = %staging.display(), "track file staged");
        Ok(())
    }
}

/// Removes a staging file, logging instead of failing: cleanup problems
/// must not mask the conversion outcome.
async fn remove_staged(path: &Path) {
    if let Err(err) = tokio::fs::remove_file(path).await {
        warn!(path = %path.display(), error = %err, "failed to remove staging file");
    }
}

#[async_trait]
impl Component for TrackConverter {
    fn name(&self) -> &'static str {
        "track converter"
    }

    fn bind(&self, id: ComponentId) {
        self.id.bind(id);
    }

    async fn handle_message(&self, message: &Message) {
        let Some(document) = message.document.as_ref() else {
            return;
        };
        // Unknown extensions are skipped silently: no buttons, no reply.
        let Some(source) = TrackFormat::from_file_name(&document.file_name) else {
            debug!(file = %document.file_name, "ignoring non-track document");
            return;
        };
        if self.config.strategy == StrategyKind::External && self.binary_path().is_none() {
            warn!(
                binary = %self.config.binary_name,
                "converter binary not found, skipping conversion offer"
            );
            return;
        }
        self.offer_conversion(message, document, source);
    }

    async fn handle_callback(&self, query: &CallbackQuery, tail: &str) {
        // Tail format: "<fileId>|<targetCode>".
        let Some((file_id, target_code)) = tail.split_once('|') else {
            warn!(
                error = %RoutingError::MalformedPayload {
                    expected: 2,
                    payload: tail.to_string(),
                },
                "dropping conversion callback"
            );
            return;
        };
        let Some(target) = TrackFormat::from_code(target_code) else {
            warn!(target_code, "conversion callback with unknown target format");
            return;
        };
        self.run_conversion(query, file_id, target).await;
    }

    fn config_snapshot(&self) -> Option<ConfigSnapshot> {
        match serde_json::to_value(&self.config) {
            Ok(value) => Some(ConfigSnapshot {
                key: Self::CONFIG_KEY,
                value,
            }),
            Err(err) => {
                warn!(error = %err, "failed to serialize converter config");
                None
            }
        }
    }
}
