//! Runtime-reloadable settings shared with the authentication gate.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use block_access::{AccessSettings, SettingsSource};
use tracing::{info, warn};

use crate::ConfigLoader;

/// Holds the current [`AccessSettings`] snapshot.
///
/// Replacing the snapshot swaps one `Arc`, so a connection attempt in flight
/// keeps evaluating against the snapshot it already took.
#[derive(Debug, Default)]
pub struct SettingsHandle {
    current: RwLock<Arc<AccessSettings>>,
    generation: AtomicU64,
}

impl SettingsHandle {
    pub fn new(settings: AccessSettings) -> Self {
        Self {
            current: RwLock::new(Arc::new(settings)),
            generation: AtomicU64::new(0),
        }
    }

    pub fn current(&self) -> Arc<AccessSettings> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Number of accepted replacements since construction.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Installs `settings`, returning `false` when nothing changed.
    ///
    /// Invalid settings are still installed: the gate rejects every
    /// connection until they are fixed, same as a bad value set by an
    /// administrator at runtime.
    pub fn replace(&self, settings: AccessSettings) -> bool {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if **current == settings {
            return false;
        }

        if let Err(err) = settings.parse() {
            warn!(error = %err, "installing block_access settings that do not parse");
        }

        *current = Arc::new(settings);
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        info!(generation, "block_access settings replaced");
        true
    }

    /// Loads a fresh configuration and installs it.
    pub fn reload(&self, loader: ConfigLoader) -> anyhow::Result<bool> {
        let config = loader.load()?;
        Ok(self.replace(config.block_access))
    }
}

impl SettingsSource for SettingsHandle {
    fn snapshot(&self) -> Arc<AccessSettings> {
        self.current()
    }
}
