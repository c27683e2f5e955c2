//! MoodMeter Theme Store
//!
//! This module provides the session-lifetime theme state:
//!
//! - **engine**: ThemeStore and ThemeState snapshots
//! - **context**: provider/consumer handles
//! - **listeners**: observer registry and broadcast channel
//! - **preferences**: key-value storage for the display mode
//! - **error**: Error types
//!
//! # Architecture
//!
//! ```text
//! Producer → set_mood_score ─┐
//!                            ├→ classify → resolve bundle → listeners
//! User → set_display_mode ───┘        └→ persist mode
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use moodmeter::mood::{DisplayMode, MoodScore, MoodState};
//! use moodmeter::store::{MemoryPreferences, ThemeStore};
//!
//! let store = ThemeStore::new(Arc::new(MemoryPreferences::new()));
//! store.set_display_mode(DisplayMode::Light);
//! store.set_mood_score(MoodScore::new(30.0));
//!
//! assert_eq!(store.mood_state(), MoodState::Bullish);
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod listeners;
pub mod preferences;

pub use context::{ThemeContext, ThemeReader};
pub use engine::{load_display_mode, ThemeState, ThemeStore};
pub use error::{ThemeError, ThemeResult};
pub use listeners::{ListenerId, ListenerRegistry, StateListener};
pub use preferences::{FilePreferences, MemoryPreferences, PreferenceStore, DISPLAY_MODE_KEY};
