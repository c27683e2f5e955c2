//! Provider / consumer handles
//!
//! `ThemeContext` is what the application shell provides to its children; it
//! carries the two mutators. `ThemeReader` is the read-only view handed to
//! presentational consumers.

use std::sync::Arc;

use crate::mood::{DisplayMode, MoodIcon, MoodScore, MoodState};
use crate::theme::ThemeBundle;

use super::engine::{ThemeState, ThemeStore};
use super::error::ThemeResult;
use super::preferences::PreferenceStore;

/// Shared handle to the session's theme store
#[derive(Clone)]
pub struct ThemeContext {
    store: Arc<ThemeStore>,
}

impl ThemeContext {
    /// Provide a fresh store for the session
    pub fn provide(preferences: Arc<dyn PreferenceStore>) -> Self {
        Self::from_store(Arc::new(ThemeStore::new(preferences)))
    }

    pub fn from_store(store: Arc<ThemeStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<ThemeStore> {
        &self.store
    }

    pub fn state(&self) -> ThemeState {
        self.store.state()
    }

    pub fn set_display_mode(&self, mode: DisplayMode) {
        self.store.set_display_mode(mode)
    }

    pub fn set_display_mode_str(&self, mode: &str) -> ThemeResult<()> {
        self.store.set_display_mode_str(mode)
    }

    pub fn set_mood_score(&self, score: MoodScore) {
        self.store.set_mood_score(score)
    }

    /// Read-only view for consumers
    pub fn reader(&self) -> ThemeReader {
        ThemeReader {
            store: Arc::clone(&self.store),
        }
    }
}

/// Read-only view of the theme store
#[derive(Clone)]
pub struct ThemeReader {
    store: Arc<ThemeStore>,
}

impl ThemeReader {
    pub fn state(&self) -> ThemeState {
        self.store.state()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.store.display_mode()
    }

    pub fn mood_state(&self) -> MoodState {
        self.store.mood_state()
    }

    pub fn mood_score(&self) -> Option<MoodScore> {
        self.store.mood_score()
    }

    pub fn bundle(&self) -> ThemeBundle {
        self.store.bundle()
    }

    pub fn icon(&self) -> MoodIcon {
        self.store.bundle().icon
    }

    pub fn label(&self) -> &'static str {
        self.store.bundle().label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::preferences::MemoryPreferences;

    #[test]
    fn test_reader_observes_context_writes() {
        let context = ThemeContext::provide(Arc::new(MemoryPreferences::new()));
        let reader = context.reader();

        context.set_mood_score(MoodScore::new(-25.0));
        context.set_display_mode(DisplayMode::Light);

        assert_eq!(reader.mood_state(), MoodState::Bearish);
        assert_eq!(reader.display_mode(), DisplayMode::Light);
        assert_eq!(reader.label(), "Bearish");
        assert_eq!(reader.icon(), MoodIcon::TrendingDown);
    }

    #[test]
    fn test_clones_share_one_store() {
        let context = ThemeContext::provide(Arc::new(MemoryPreferences::new()));
        let other = context.clone();

        other.set_display_mode(DisplayMode::Dark);
        assert_eq!(context.state().display_mode, DisplayMode::Dark);
        assert!(Arc::ptr_eq(context.store(), other.store()));
    }
}
