//! Display Preferences
//!
//! Boolean toggles, font size and engagement sets with a defined
//! load/save boundary over a [`PreferenceStore`].

use crate::{EngagementSet, EngagementSets, PreferenceStore, PrefsError};

/// Storage keys
pub mod keys {
    pub const DARK_MODE: &str = "darkMode";
    pub const FONT_SIZE: &str = "fontSize";
    pub const HIGH_CONTRAST: &str = "highContrast";
    pub const REDUCED_MOTION: &str = "reducedMotion";
    pub const SPEECH_ENABLED: &str = "speechEnabled";
    pub const SAVED_ARTICLES: &str = "savedArticles";
    pub const LIKED_ARTICLES: &str = "likedArticles";
    pub const READ_ARTICLES: &str = "readArticles";
}

/// Font size preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }
}

/// User preferences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub dark_mode: bool,
    pub high_contrast: bool,
    pub reduced_motion: bool,
    pub font_size: FontSize,
    /// Read articles aloud when reading mode opens
    pub speech_enabled: bool,
    pub engagement: EngagementSets,
}

impl Preferences {
    /// Load from `store`; never fails
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let font_size = match store.get(keys::FONT_SIZE) {
            Some(raw) => FontSize::parse(&raw).unwrap_or_else(|| {
                tracing::warn!("Unknown font size {:?}, using default", raw);
                FontSize::default()
            }),
            None => FontSize::default(),
        };

        Self {
            dark_mode: load_flag(store, keys::DARK_MODE),
            high_contrast: load_flag(store, keys::HIGH_CONTRAST),
            reduced_motion: load_flag(store, keys::REDUCED_MOTION),
            speech_enabled: load_flag(store, keys::SPEECH_ENABLED),
            font_size,
            engagement: EngagementSets {
                saved: load_set(store, keys::SAVED_ARTICLES),
                liked: load_set(store, keys::LIKED_ARTICLES),
                read: load_set(store, keys::READ_ARTICLES),
            },
        }
    }

    /// Write every key to `store` in one batch
    pub fn save(&self, store: &mut dyn PreferenceStore) -> Result<(), PrefsError> {
        let saved = self.engagement.saved.to_json()?;
        let liked = self.engagement.liked.to_json()?;
        let read = self.engagement.read.to_json()?;
        store.set_many(&[
            (keys::DARK_MODE, bool_str(self.dark_mode)),
            (keys::FONT_SIZE, self.font_size.as_str()),
            (keys::HIGH_CONTRAST, bool_str(self.high_contrast)),
            (keys::REDUCED_MOTION, bool_str(self.reduced_motion)),
            (keys::SPEECH_ENABLED, bool_str(self.speech_enabled)),
            (keys::SAVED_ARTICLES, saved.as_str()),
            (keys::LIKED_ARTICLES, liked.as_str()),
            (keys::READ_ARTICLES, read.as_str()),
        ])
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Only the exact string "true" enables a flag
fn load_flag(store: &dyn PreferenceStore, key: &str) -> bool {
    store.get(key).is_some_and(|v| v == "true")
}

fn load_set(store: &dyn PreferenceStore, key: &str) -> EngagementSet {
    EngagementSet::from_json_lossy(store.get(key).as_deref(), key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_defaults_from_empty_store() {
        let prefs = Preferences::load(&MemoryStore::new());
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.font_size, FontSize::Medium);
    }

    #[test]
    fn test_unknown_font_size_falls_back() {
        let mut store = MemoryStore::new();
        store.set(keys::FONT_SIZE, "huge").unwrap();
        assert_eq!(Preferences::load(&store).font_size, FontSize::Medium);
    }

    /// Counts writes that reach the backing map
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: usize,
    }

    impl PreferenceStore for CountingStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
            self.writes += 1;
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), PrefsError> {
            self.writes += 1;
            self.inner.remove(key)
        }

        fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), PrefsError> {
            self.writes += 1;
            for (key, value) in entries {
                self.inner.set(key, value)?;
            }
            Ok(())
        }
    }

    #[test]
    fn test_save_is_one_write() {
        let mut store = CountingStore::default();
        let prefs = Preferences { dark_mode: true, ..Default::default() };
        prefs.save(&mut store).unwrap();

        assert_eq!(store.writes, 1);
        assert_eq!(store.inner.len(), 8);
        assert_eq!(Preferences::load(&store), prefs);
    }

    #[test]
    fn test_flag_parsing() {
        let mut store = MemoryStore::new();
        store.set(keys::DARK_MODE, "true").unwrap();
        store.set(keys::HIGH_CONTRAST, "yes").unwrap();
        let prefs = Preferences::load(&store);
        assert!(prefs.dark_mode);
        assert!(!prefs.high_contrast);
    }
}
