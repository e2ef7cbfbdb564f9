//! Configuration file watcher for hot reload.
//!
//! The parent directory is watched rather than the file itself so editors
//! that save by replacing the file keep triggering reloads.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::ServerConfig;

/// Watches a configuration file and sends every distinct reloaded config.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<ServerConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and a receiver for reloaded configurations.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ServerConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. Updates stop when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self { path, update_tx } = self;
        let file_name = path.file_name().map(|name| name.to_os_string());
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let reload_path = path.clone();
        let last = Mutex::new(None::<ServerConfig>);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let event = match res {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::error!("Watch error: {:?}", e);
                        return;
                    }
                };

                let touches_file = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                if !touches_file || !(event.kind.is_modify() || event.kind.is_create()) {
                    return;
                }

                let new_config = match load_config(&reload_path) {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::error!(
                            "Failed to reload config: {}. Keeping current configuration.",
                            e
                        );
                        return;
                    }
                };

                let mut last = match last.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                if last.as_ref() == Some(&new_config) {
                    tracing::debug!("Config file touched without changes");
                    return;
                }

                tracing::info!(bridges = new_config.bridges.len(), "Config reloaded");
                *last = Some(new_config.clone());
                let _ = update_tx.send(new_config);
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Config watcher started");
        Ok(watcher)
    }
}
