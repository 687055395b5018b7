//! Appearance Store
//!
//! Dark-mode flag and background palette. The flag is stored raw under
//! [`THEME_KEY`] (`"dark"` / `"light"`); the palette lives inside the
//! [`ProfileSettings`] blob under [`PROFILE_SETTINGS_KEY`] together with the
//! other profile preferences.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::storage::{KeyValueStore, StorageResult, PROFILE_SETTINGS_KEY, THEME_KEY};

/// Named background palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Rose,
    Blue,
    Purple,
    Green,
}

impl Palette {
    /// Get all palettes for iteration
    pub fn all() -> &'static [Palette] {
        &[Palette::Rose, Palette::Blue, Palette::Purple, Palette::Green]
    }

    /// Storage name
    pub fn name(&self) -> &'static str {
        match self {
            Palette::Rose => "rose",
            Palette::Blue => "blue",
            Palette::Purple => "purple",
            Palette::Green => "green",
        }
    }

    /// Human-readable label for the picker
    pub fn label(&self) -> &'static str {
        match self {
            Palette::Rose => "Rose Pink",
            Palette::Blue => "Sky Blue",
            Palette::Purple => "Purple Haze",
            Palette::Green => "Mint Green",
        }
    }

    /// Tailwind gradient stops for the picker swatch
    pub fn swatch_gradient(&self) -> &'static str {
        match self {
            Palette::Rose => "from-rose-50 to-pink-50",
            Palette::Blue => "from-blue-50 to-cyan-50",
            Palette::Purple => "from-purple-50 to-violet-50",
            Palette::Green => "from-green-50 to-emerald-50",
        }
    }

    /// Tailwind gradient stops for the page background, dark variant included
    pub fn page_gradient(&self) -> String {
        format!(
            "{} dark:from-slate-950 dark:to-slate-900",
            self.swatch_gradient()
        )
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for palette names that are not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown palette: {0}")]
pub struct UnknownPalette(pub String);

impl FromStr for Palette {
    type Err = UnknownPalette;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rose" => Ok(Palette::Rose),
            "blue" => Ok(Palette::Blue),
            "purple" => Ok(Palette::Purple),
            "green" => Ok(Palette::Green),
            other => Err(UnknownPalette(other.to_string())),
        }
    }
}

// Unknown names degrade to the default palette instead of failing the whole blob
impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(name.parse().unwrap_or_else(|e: UnknownPalette| {
            tracing::warn!(error = %e, "Falling back to default palette");
            Palette::default()
        }))
    }
}

/// Profile preferences persisted as one JSON blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettings {
    #[serde(default)]
    pub background: Palette,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_notifications")]
    pub notifications: bool,
    #[serde(default)]
    pub display_name: String,
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_notifications() -> bool {
    true
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            background: Palette::default(),
            theme: default_theme(),
            notifications: default_notifications(),
            display_name: String::new(),
        }
    }
}

impl ProfileSettings {
    /// Fill an empty display name with the user's name
    pub fn with_display_name_fallback(mut self, name: &str) -> Self {
        if self.display_name.is_empty() {
            self.display_name = name.to_string();
        }
        self
    }
}

/// Value written under [`THEME_KEY`] for a dark flag
pub fn theme_value(is_dark: bool) -> &'static str {
    if is_dark {
        "dark"
    } else {
        "light"
    }
}

/// Merge a palette into a stored settings blob
///
/// Other fields are preserved; an absent or unparseable blob yields defaults.
pub fn merge_background(stored: Option<&str>, background: Palette) -> ProfileSettings {
    let mut settings = stored
        .and_then(|raw| match serde_json::from_str::<ProfileSettings>(raw) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unparseable profile settings");
                None
            }
        })
        .unwrap_or_default();
    settings.background = background;
    settings
}

/// Dark mode and palette over a [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct AppearanceStore<S> {
    storage: S,
    is_dark: bool,
    background: Palette,
}

impl<S: KeyValueStore> AppearanceStore<S> {
    /// Load appearance, using `prefers_dark` when no theme has been saved
    pub fn load(storage: S, prefers_dark: bool) -> Self {
        let saved_theme = storage.get(THEME_KEY).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read theme");
            None
        });
        let is_dark = match saved_theme {
            Some(theme) => theme == "dark",
            None => prefers_dark,
        };

        let background = storage
            .get_json_or(PROFILE_SETTINGS_KEY, ProfileSettings::default)
            .background;

        Self {
            storage,
            is_dark,
            background,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn background(&self) -> Palette {
        self.background
    }

    /// Class to put on the document root, if any
    pub fn root_class(&self) -> Option<&'static str> {
        self.is_dark.then_some("dark")
    }

    /// Flip dark mode and persist it; returns the new flag
    pub fn toggle_dark(&mut self) -> StorageResult<bool> {
        let next = !self.is_dark;
        self.storage.set(THEME_KEY, theme_value(next))?;
        self.is_dark = next;
        tracing::debug!(dark = next, "Toggled theme");
        Ok(next)
    }

    /// Switch palette, merging it into the stored settings blob
    pub fn set_background(&mut self, background: Palette) -> StorageResult<()> {
        let stored = self.storage.get(PROFILE_SETTINGS_KEY)?;
        let settings = merge_background(stored.as_deref(), background);
        self.storage.set_json(PROFILE_SETTINGS_KEY, &settings)?;
        self.background = background;
        tracing::debug!(background = %background, "Changed background");
        Ok(())
    }

    /// Stored profile settings (defaults when absent or unreadable)
    pub fn profile_settings(&self) -> ProfileSettings {
        self.storage
            .get_json_or(PROFILE_SETTINGS_KEY, ProfileSettings::default)
    }

    /// Save the whole settings blob and apply its palette
    pub fn save_profile(&mut self, settings: &ProfileSettings) -> StorageResult<()> {
        self.storage.set_json(PROFILE_SETTINGS_KEY, settings)?;
        self.background = settings.background;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::FlakyStore;
    use crate::storage::MemoryStore;

    #[test]
    fn test_load_defaults() {
        let appearance = AppearanceStore::load(MemoryStore::new(), false);
        assert!(!appearance.is_dark());
        assert_eq!(appearance.background(), Palette::Rose);
        assert_eq!(appearance.root_class(), None);
    }

    #[test]
    fn test_saved_theme_wins_over_preference() {
        let storage = MemoryStore::new();
        storage.set(THEME_KEY, "light").unwrap();
        assert!(!AppearanceStore::load(storage.clone(), true).is_dark());

        storage.remove(THEME_KEY).unwrap();
        assert!(AppearanceStore::load(storage, true).is_dark());
    }

    #[test]
    fn test_toggle_dark_persists_raw_value() {
        let storage = MemoryStore::new();
        let mut appearance = AppearanceStore::load(storage.clone(), false);

        assert!(appearance.toggle_dark().unwrap());
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(appearance.root_class(), Some("dark"));

        assert!(!appearance.toggle_dark().unwrap());
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_set_background_preserves_other_fields() {
        let storage = MemoryStore::new();
        storage
            .set(
                PROFILE_SETTINGS_KEY,
                r#"{"background":"rose","theme":"dark","notifications":false,"displayName":"Mo"}"#,
            )
            .unwrap();

        let mut appearance = AppearanceStore::load(storage.clone(), false);
        appearance.set_background(Palette::Green).unwrap();

        let settings = appearance.profile_settings();
        assert_eq!(settings.background, Palette::Green);
        assert_eq!(settings.theme, "dark");
        assert!(!settings.notifications);
        assert_eq!(settings.display_name, "Mo");
    }

    #[test]
    fn test_set_background_over_garbage_uses_defaults() {
        let storage = MemoryStore::new();
        storage.set(PROFILE_SETTINGS_KEY, "oops").unwrap();

        let mut appearance = AppearanceStore::load(storage, false);
        assert_eq!(appearance.background(), Palette::Rose);

        appearance.set_background(Palette::Blue).unwrap();
        let settings = appearance.profile_settings();
        assert_eq!(
            settings,
            ProfileSettings {
                background: Palette::Blue,
                ..ProfileSettings::default()
            }
        );
    }

    #[test]
    fn test_missing_fields_default_individually() {
        let settings: ProfileSettings = serde_json::from_str(r#"{"background":"purple"}"#).unwrap();
        assert_eq!(settings.background, Palette::Purple);
        assert_eq!(settings.theme, "light");
        assert!(settings.notifications);
        assert_eq!(settings.display_name, "");
    }

    #[test]
    fn test_unknown_palette_falls_back() {
        let settings: ProfileSettings =
            serde_json::from_str(r#"{"background":"tangerine","displayName":"Lu"}"#).unwrap();
        assert_eq!(settings.background, Palette::Rose);
        assert_eq!(settings.display_name, "Lu");
    }

    #[test]
    fn test_settings_serialize_camel_case() {
        let json = serde_json::to_value(ProfileSettings::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "background": "rose",
                "theme": "light",
                "notifications": true,
                "displayName": ""
            })
        );
    }

    #[test]
    fn test_save_profile_applies_background() {
        let storage = MemoryStore::new();
        let mut appearance = AppearanceStore::load(storage.clone(), false);

        let settings = appearance
            .profile_settings()
            .with_display_name_fallback("Ana");
        assert_eq!(settings.display_name, "Ana");

        let settings = ProfileSettings {
            background: Palette::Purple,
            ..settings
        };
        appearance.save_profile(&settings).unwrap();

        assert_eq!(appearance.background(), Palette::Purple);
        let reloaded = AppearanceStore::load(storage, false);
        assert_eq!(reloaded.background(), Palette::Purple);
        assert_eq!(reloaded.profile_settings().display_name, "Ana");
    }

    #[test]
    fn test_failed_save_keeps_applied_background() {
        let storage = FlakyStore::new();
        let mut appearance = AppearanceStore::load(storage.clone(), false);
        appearance
            .save_profile(&ProfileSettings {
                background: Palette::Blue,
                ..ProfileSettings::default()
            })
            .unwrap();

        storage.reject_writes(true);
        let pending = ProfileSettings {
            background: Palette::Green,
            ..appearance.profile_settings()
        };
        assert!(appearance.save_profile(&pending).is_err());
        assert!(appearance.set_background(Palette::Purple).is_err());

        assert_eq!(appearance.background(), Palette::Blue);
        assert_eq!(appearance.profile_settings().background, Palette::Blue);
    }

    #[test]
    fn test_palette_parse_and_gradients() {
        assert_eq!("Blue".parse::<Palette>().unwrap(), Palette::Blue);
        assert!("teal".parse::<Palette>().is_err());
        assert_eq!(
            Palette::Green.page_gradient(),
            "from-green-50 to-emerald-50 dark:from-slate-950 dark:to-slate-900"
        );
        assert_eq!(Palette::all().len(), 4);
    }
}
