//! Visitor preferences kept in a small TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::Result;

/// Colour scheme of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Contents of the preference file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
}

/// Preferences bound to the file they were read from.
///
/// The file is read once, at [`PreferenceStore::load`]; every change is
/// written back immediately.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    prefs: Preferences,
}

impl PreferenceStore {
    /// Reads `path`. A missing file yields the defaults.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let prefs = match fs::read_to_string(&path) {
            Ok(raw) => toml::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no preference file at {}, using defaults", path.display());
                Preferences::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, prefs })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn theme(&self) -> Theme {
        self.prefs.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.prefs.theme = theme;
        self.save()
    }

    /// Flips light/dark and persists the result.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let next = self.prefs.theme.toggled();
        self.set_theme(next)?;
        log::info!("theme switched to {}", next);
        Ok(next)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, toml::to_string(&self.prefs)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_defaults_to_dark() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::load(dir.path().join("prefs.toml")).unwrap();
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn test_toggle_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.toml");
        let mut store = PreferenceStore::load(&path).unwrap();
        assert_eq!(store.toggle_theme().unwrap(), Theme::Light);

        let reread = PreferenceStore::load(&path).unwrap();
        assert_eq!(reread.theme(), Theme::Light);
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "theme = \"light\"");
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "theme = 42").unwrap();
        assert!(PreferenceStore::load(&path).is_err());
    }
}
