//! Main runtime orchestration.
//!
//! The runtime wires the standard components into a [`Router`], runs the
//! single outbound sender task, and fans inbound updates out one task per
//! update. On shutdown (ctrl-c or a closed update stream) it persists every
//! component's configuration and drains the outbound queue.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};

use waymark_convert::{ConverterConfig, TrackConverter};
use waymark_core::{outbound_channel, BoxedTransport, Component, Outbound, Outbox, Router, Update};
use waymark_dialog::InteractiveMenu;

use crate::config::WaymarkConfig;
use crate::error::{RuntimeError, RuntimeResult};
use crate::logging;
use crate::store::ConfigStore;

/// The Waymark runtime.
///
/// ```rust,ignore
/// let config = ConfigLoader::new().load()?;
/// let runtime = Runtime::new(config, transport)?;
/// runtime.run(updates).await?;
/// ```
pub struct Runtime {
    router: Router,
    outbox: Outbox,
    outbound_rx: mpsc::UnboundedReceiver<Outbound>,
    store: ConfigStore,
    transport: BoxedTransport,
}

impl Runtime {
    /// Creates a runtime: initializes logging, bootstraps the working
    /// directories and registers the standard components.
    ///
    /// Registration order is fixed (menu, then converter), so component ids
    /// are reproducible across process runs.
    pub fn new(config: WaymarkConfig, transport: BoxedTransport) -> RuntimeResult<Self> {
        logging::init(&config.logging);
        ensure_directories(&config)?;

        let (outbox, outbound_rx) = outbound_channel();
        let store = ConfigStore::new(config.config_dir());

        let mut router = Router::new();
        router.register(Arc::new(InteractiveMenu::new(outbox.clone())));

        let mut converter_config: ConverterConfig =
            store.load_or(TrackConverter::CONFIG_KEY, config.converter.clone());
        converter_config.runtime_dir = config.runtime_dir();
        router.register(Arc::new(TrackConverter::new(
            outbox.clone(),
            Arc::clone(&transport),
            converter_config,
        )));

        info!(components = router.component_count(), "runtime ready");
        Ok(Self {
            router,
            outbox,
            outbound_rx,
            store,
            transport,
        })
    }

    /// Registers an additional component.
    ///
    /// Must happen before [`run`](Self::run); the registry is immutable
    /// once dispatch starts.
    pub fn register_component(&mut self, component: Arc<dyn Component>) {
        self.router.register(component);
    }

    /// Handle for building components that enqueue outbound messages.
    pub fn outbox(&self) -> Outbox {
        self.outbox.clone()
    }

    /// Runs until the update stream closes or a shutdown signal arrives,
    /// then persists component configuration and drains outbound traffic.
    pub async fn run(self, mut updates: mpsc::UnboundedReceiver<Update>) -> RuntimeResult<()> {
        let Self {
            router,
            outbox,
            mut outbound_rx,
            store,
            transport,
        } = self;
        // Components hold their own outbox clones; dropping this one lets
        // the sender task observe queue closure at shutdown.
        drop(outbox);

        let sender = tokio::spawn(async move {
            while let Some(message) = outbound_rx.recv().await {
                if let Err(err) = transport.send(message).await {
                    error!(error = %err, "failed to send outbound message");
                }
            }
        });

        let router = Arc::new(router);
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                maybe = updates.recv() => match maybe {
                    Some(update) => {
                        let router = Arc::clone(&router);
                        tokio::spawn(async move {
                            router.dispatch(update).await;
                        });
                    }
                    None => {
                        info!("update stream closed");
                        break;
                    }
                },
                _ = &mut ctrl_c => {
                    info!("shutdown signal received");
                    break;
                }
            }
        }

        store.save_all(&router.halt());
        // In-flight dispatch tasks keep router clones alive; once they
        // finish, the last outbox drops, the queue closes and the sender
        // task drains out.
        drop(router);
        let _ = sender.await;
        info!("runtime stopped");
        Ok(())
    }
}

fn ensure_directories(config: &WaymarkConfig) -> RuntimeResult<()> {
    for dir in [config.runtime_dir(), config.config_dir()] {
        std::fs::create_dir_all(&dir).map_err(|source| RuntimeError::Bootstrap {
            path: dir.clone(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::Mutex;
    use waymark_core::{Chat, ChatKind, Message, Transport, TransportResult, User};

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<Outbound>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, message: Outbound) -> TransportResult<()> {
            self.sent.lock().unwrap().push(message);
            Ok(())
        }

        async fn resolve_file(&self, file_id: &str) -> TransportResult<String> {
            Ok(file_id.to_string())
        }

        async fn download(&self, _location: &str, _dest: &Path) -> TransportResult<u64> {
            Ok(0)
        }
    }

    fn private_message(text: &str) -> Message {
        Message {
            message_id: 1,
            chat: Chat {
                id: 3,
                kind: ChatKind::Private,
            },
            from: User {
                id: 3,
                username: None,
            },
            text: text.to_string(),
            document: None,
            reply_to: None,
        }
    }

    #[tokio::test]
    async fn run_dispatches_updates_and_persists_configs_on_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let config = WaymarkConfig {
            work_dir: dir.path().to_path_buf(),
            ..WaymarkConfig::default()
        };
        let transport = Arc::new(RecordingTransport::default());

        let runtime =
            Runtime::new(config.clone(), Arc::clone(&transport) as BoxedTransport).unwrap();

        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(Update::Message(private_message("Alice"))).unwrap();
        drop(tx);
        runtime.run(rx).await.unwrap();

        // The dialog replied through the sender task.
        let sent = transport.sent.lock().unwrap();
        assert!(!sent.is_empty());

        // Converter config was persisted under its stable key.
        assert!(config.config_dir().join("track_converter.json").exists());
    }

    #[tokio::test]
    async fn directories_are_created_at_startup() {
        let dir = tempfile::tempdir().unwrap();
        let config = WaymarkConfig {
            work_dir: dir.path().join("nested"),
            ..WaymarkConfig::default()
        };
        let transport = Arc::new(RecordingTransport::default());

        Runtime::new(config.clone(), transport as BoxedTransport).unwrap();

        assert!(config.runtime_dir().is_dir());
        assert!(config.config_dir().is_dir());
    }
}
