use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::{Preferences, PreferencesPatch};

/// Process-wide UI preferences backed by a JSON file.
///
/// The file is read once when the store is created and rewritten in full on
/// every update.
pub struct PreferencesStore {
    path: PathBuf,
    current: RwLock<Preferences>,
}

impl PreferencesStore {
    /// Load preferences from `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(
                    "Invalid preferences file {}: {}, using defaults",
                    path.display(),
                    e
                );
                Preferences::default()
            }),
            Err(_) => {
                tracing::info!("No preferences file at {}, using defaults", path.display());
                Preferences::default()
            }
        };

        Self {
            path,
            current: RwLock::new(current),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> AppResult<Preferences> {
        self.current
            .read()
            .map(|prefs| prefs.clone())
            .map_err(|_| AppError::Internal("Preferences lock poisoned".into()))
    }

    /// Apply `patch`, persist the result and return it.
    ///
    /// The in-memory value is only replaced once the file was written.
    pub fn update(&self, patch: PreferencesPatch) -> AppResult<Preferences> {
        let mut guard = self
            .current
            .write()
            .map_err(|_| AppError::Internal("Preferences lock poisoned".into()))?;

        let mut next = guard.clone();
        next.apply(patch);
        self.persist(&next)?;
        *guard = next.clone();

        tracing::debug!(path = %self.path.display(), "Saved preferences");
        Ok(next)
    }

    fn persist(&self, prefs: &Preferences) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(prefs)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
