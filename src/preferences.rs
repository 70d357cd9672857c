//! Theme preference: the single persisted key-value setting.
//!
//! Read once at startup, written on every toggle, and handed to the view
//! layer explicitly rather than read from ambient globals.

use std::{
    fs,
    io::ErrorKind as IoErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use serde::{Deserialize, Serialize};

use crate::error::AppResult;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "🌙 Dark",
            Theme::Light => "🔆 Light",
        }
    }

    /// Saved value wins; otherwise follow the platform's dark-mode hint
    pub fn resolve(saved: Option<Theme>, prefers_dark: bool) -> Self {
        saved.unwrap_or(if prefers_dark { Theme::Dark } else { Theme::Light })
    }
}

/// Backing storage for preferences
pub trait PreferenceStore: Send + Sync {
    fn load_theme(&self) -> AppResult<Option<Theme>>;
    fn save_theme(&self, theme: Theme) -> AppResult<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreferences {
    #[serde(default)]
    theme: Option<Theme>,
}

/// JSON file store, e.g. `{"theme":"dark"}`
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load_theme(&self) -> AppResult<Option<Theme>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredPreferences = serde_json::from_str(&raw)?;
        Ok(stored.theme)
    }

    fn save_theme(&self, theme: Theme) -> AppResult<()> {
        let stored = StoredPreferences { theme: Some(theme) };
        fs::write(&self.path, serde_json::to_string(&stored)?)?;
        Ok(())
    }
}

/// Process-local store for tests and embedders without a filesystem
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    theme: Mutex<Option<Theme>>,
}

impl MemoryPreferenceStore {
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme: Mutex::new(Some(theme)),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load_theme(&self) -> AppResult<Option<Theme>> {
        Ok(*self.theme.lock().unwrap_or_else(|e| e.into_inner()))
    }

    fn save_theme(&self, theme: Theme) -> AppResult<()> {
        *self.theme.lock().unwrap_or_else(|e| e.into_inner()) = Some(theme);
        Ok(())
    }
}

/// Current theme plus the store it is persisted to
#[derive(Clone)]
pub struct ThemePreference {
    current: Theme,
    store: Arc<dyn PreferenceStore>,
}

impl ThemePreference {
    /// Reads the saved theme; unreadable or invalid values fall back to the hint
    pub fn load(store: Arc<dyn PreferenceStore>, prefers_dark: bool) -> Self {
        let saved = match store.load_theme() {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable theme preference");
                None
            }
        };

        Self {
            current: Theme::resolve(saved, prefers_dark),
            store,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn set(&mut self, theme: Theme) -> AppResult<()> {
        self.store.save_theme(theme)?;
        self.current = theme;
        tracing::debug!(theme = ?theme, "Theme preference saved");
        Ok(())
    }

    pub fn toggle(&mut self) -> AppResult<Theme> {
        let next = self.current.toggled();
        self.set(next)?;
        Ok(next)
    }
}
