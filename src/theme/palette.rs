//! Mood palette
//!
//! Raw colors written to the root document as custom properties while the
//! display mode is dynamic.

use serde::Serialize;

use crate::mood::MoodState;

/// Colors for one mood
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MoodPalette {
    pub gradient_start: &'static str,
    pub gradient_end: &'static str,
    pub accent: &'static str,
    pub glow: &'static str,
}

const NEUTRAL: MoodPalette = MoodPalette {
    gradient_start: "#1e293b",
    gradient_end: "#0f172a",
    accent: "#94a3b8",
    glow: "rgba(148, 163, 184, 0.25)",
};

const BEARISH: MoodPalette = MoodPalette {
    gradient_start: "#450a0a",
    gradient_end: "#1c1917",
    accent: "#f87171",
    glow: "rgba(248, 113, 113, 0.35)",
};

const BULLISH: MoodPalette = MoodPalette {
    gradient_start: "#064e3b",
    gradient_end: "#022c22",
    accent: "#34d399",
    glow: "rgba(52, 211, 153, 0.35)",
};

const EXTREME: MoodPalette = MoodPalette {
    gradient_start: "#4a044e",
    gradient_end: "#1e1b4b",
    accent: "#e879f9",
    glow: "rgba(232, 121, 249, 0.5)",
};

/// Palette for a mood state
pub fn mood_palette(mood: MoodState) -> MoodPalette {
    match mood {
        MoodState::Neutral => NEUTRAL,
        MoodState::Bearish => BEARISH,
        MoodState::Bullish => BULLISH,
        MoodState::Extreme => EXTREME,
    }
}
