//! # MoodMeter
//!
//! Mood-driven theme engine for a market-sentiment dashboard. Sentiment
//! scores pushed by data producers are classified into a mood, the mood and
//! the user's display mode resolve a bundle of style tokens, and the result is
//! mirrored onto the root document.
//!
//! ## Modules
//!
//! - [`mood`]: Score/mood/display-mode types, classifier, icons
//! - [`theme`]: Theme resolution table and mood palette
//! - [`store`]: Session theme store, listeners, preference storage
//! - [`document`]: Root element model and side-effect synchronizer
//! - [`feed`]: Mock sentiment feed
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use moodmeter::document::{DocumentSynchronizer, RootElement, StyleRoot, ACCENT_PROPERTY};
//! use moodmeter::mood::{MoodScore, MoodState};
//! use moodmeter::store::{MemoryPreferences, ThemeStore};
//!
//! let store = ThemeStore::new(Arc::new(MemoryPreferences::new()));
//! let document = DocumentSynchronizer::new(StyleRoot::new()).attach(&store);
//!
//! store.set_mood_score(MoodScore::new(-35.0));
//!
//! assert_eq!(store.mood_state(), MoodState::Bearish);
//! assert!(document.with_root(|root| root.property(ACCENT_PROPERTY).is_some()));
//! ```

pub mod config;
pub mod document;
pub mod feed;
pub mod mood;
pub mod store;
pub mod theme;

// Re-export top-level types for convenience
pub use mood::{classify, resolve_icon, Appearance, DisplayMode, MoodIcon, MoodScore, MoodState};

pub use theme::{CellSource, ThemeBundle, ThemeTable, ThemeTokens};

pub use store::{
    FilePreferences, MemoryPreferences, PreferenceStore, ThemeContext, ThemeError, ThemeReader,
    ThemeResult, ThemeState, ThemeStore,
};

pub use document::{DocumentSynchronizer, RootElement, StyleRoot};

pub use feed::MockFeed;

pub use config::{Config, ConfigError, FeedConfig, LoggingConfig, PreferencesConfig};
