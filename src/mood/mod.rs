//! Mood model
//!
//! - **types**: MoodScore, MoodState, DisplayMode, Appearance
//! - **classifier**: score → mood state
//! - **icons**: mood state → icon and label

pub mod classifier;
pub mod icons;
pub mod types;

pub use classifier::{classify, EXTREME_THRESHOLD, TREND_THRESHOLD};
pub use icons::{resolve_icon, MoodIcon, MoodIndicator};
pub use types::{Appearance, DisplayMode, MoodScore, MoodState};
