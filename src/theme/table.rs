//! Theme Resolution Table
//!
//! Lookup keyed by (appearance × mood). The built-in table fills all eight
//! cells. Custom tables may leave cells out; lookups for a missing cell fall
//! back in a fixed, logged order:
//!
//! ```text
//!   (appearance, mood) → (light, mood) → default entry
//! ```
//!
//! The resolved `CellSource` tells callers which step answered.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::mood::{Appearance, MoodState};

use super::tokens::{InteractiveTokens, ThemeTokens};

/// Which table entry answered a lookup
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CellSource {
    /// The requested cell
    Exact,
    /// Same mood, light appearance
    LightFallback,
    /// The table's named default entry
    Default,
}

/// Result of a table lookup
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub tokens: &'a ThemeTokens,
    pub source: CellSource,
}

/// Theme lookup table
#[derive(Debug, Clone)]
pub struct ThemeTable {
    cells: HashMap<(Appearance, MoodState), ThemeTokens>,
    default: ThemeTokens,
}

impl Default for ThemeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ThemeTable {
    /// Create a table with no cells, only a default entry
    pub fn empty(default: ThemeTokens) -> Self {
        Self {
            cells: HashMap::new(),
            default,
        }
    }

    /// The complete built-in design
    pub fn builtin() -> Self {
        Self::empty(light_neutral())
            .with(Appearance::Light, MoodState::Neutral, light_neutral())
            .with(Appearance::Light, MoodState::Bearish, light_bearish())
            .with(Appearance::Light, MoodState::Bullish, light_bullish())
            .with(Appearance::Light, MoodState::Extreme, light_extreme())
            .with(Appearance::Dark, MoodState::Neutral, dark_neutral())
            .with(Appearance::Dark, MoodState::Bearish, dark_bearish())
            .with(Appearance::Dark, MoodState::Bullish, dark_bullish())
            .with(Appearance::Dark, MoodState::Extreme, dark_extreme())
    }

    /// Builder method: set a cell
    pub fn with(mut self, appearance: Appearance, mood: MoodState, tokens: ThemeTokens) -> Self {
        self.insert(appearance, mood, tokens);
        self
    }

    /// Set a cell, replacing any previous entry
    pub fn insert(&mut self, appearance: Appearance, mood: MoodState, tokens: ThemeTokens) {
        self.cells.insert((appearance, mood), tokens);
    }

    /// Exact lookup without fallback
    pub fn get(&self, appearance: Appearance, mood: MoodState) -> Option<&ThemeTokens> {
        self.cells.get(&(appearance, mood))
    }

    /// The named default entry
    pub fn default_entry(&self) -> &ThemeTokens {
        &self.default
    }

    /// Resolve a cell, falling back to the light cell and then the default
    pub fn resolve(&self, appearance: Appearance, mood: MoodState) -> Resolution<'_> {
        if let Some(tokens) = self.get(appearance, mood) {
            return Resolution {
                tokens,
                source: CellSource::Exact,
            };
        }

        if appearance == Appearance::Dark {
            if let Some(tokens) = self.get(Appearance::Light, mood) {
                tracing::warn!(
                    appearance = %appearance,
                    mood = %mood,
                    "Theme cell missing, using light cell"
                );
                return Resolution {
                    tokens,
                    source: CellSource::LightFallback,
                };
            }
        }

        tracing::warn!(
            appearance = %appearance,
            mood = %mood,
            "Theme cell missing, using default entry"
        );
        Resolution {
            tokens: &self.default,
            source: CellSource::Default,
        }
    }

    /// Combinations without their own cell
    pub fn missing_cells(&self) -> Vec<(Appearance, MoodState)> {
        Appearance::all()
            .iter()
            .flat_map(|a| MoodState::all().iter().map(move |m| (*a, *m)))
            .filter(|key| !self.cells.contains_key(key))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_cells().is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn cell(
    background: &str,
    accent: &str,
    glow: &str,
    text_primary: &str,
    text_secondary: &str,
    card: &str,
    border: &str,
    interactive: Option<InteractiveTokens>,
) -> ThemeTokens {
    ThemeTokens {
        background: background.to_string(),
        accent: accent.to_string(),
        glow: glow.to_string(),
        text_primary: text_primary.to_string(),
        text_secondary: text_secondary.to_string(),
        card: card.to_string(),
        border: border.to_string(),
        interactive,
    }
}

// ============ Light ============

fn light_neutral() -> ThemeTokens {
    cell(
        "bg-gradient-to-br from-slate-50 via-white to-slate-100",
        "text-slate-600",
        "shadow-lg shadow-slate-300/40",
        "text-slate-900",
        "text-slate-500",
        "bg-white/80 backdrop-blur-md",
        "border border-slate-200",
        Some(InteractiveTokens::new(
            "hover:bg-slate-100",
            "bg-slate-800 hover:bg-slate-700 text-white",
        )),
    )
}

fn light_bearish() -> ThemeTokens {
    cell(
        "bg-gradient-to-br from-rose-50 via-white to-red-100",
        "text-red-600",
        "shadow-lg shadow-red-300/40",
        "text-red-950",
        "text-red-700/70",
        "bg-white/80 backdrop-blur-md",
        "border border-red-200",
        Some(InteractiveTokens::new(
            "hover:bg-red-50",
            "bg-red-600 hover:bg-red-500 text-white",
        )),
    )
}

fn light_bullish() -> ThemeTokens {
    cell(
        "bg-gradient-to-br from-emerald-50 via-white to-green-100",
        "text-emerald-600",
        "shadow-lg shadow-emerald-300/40",
        "text-emerald-950",
        "text-emerald-700/70",
        "bg-white/80 backdrop-blur-md",
        "border border-emerald-200",
        Some(InteractiveTokens::new(
            "hover:bg-emerald-50",
            "bg-emerald-600 hover:bg-emerald-500 text-white",
        )),
    )
}

fn light_extreme() -> ThemeTokens {
    cell(
        "bg-gradient-to-br from-fuchsia-50 via-white to-amber-100",
        "text-fuchsia-600",
        "shadow-xl shadow-fuchsia-400/50",
        "text-fuchsia-950",
        "text-fuchsia-700/70",
        "bg-white/90 backdrop-blur-md",
        "border-2 border-fuchsia-300",
        Some(InteractiveTokens::new(
            "hover:bg-fuchsia-50",
            "bg-fuchsia-600 hover:bg-fuchsia-500 text-white",
        )),
    )
}

// ============ Dark ============

fn dark_neutral() -> ThemeTokens {
    cell(
        "bg-gradient-to-br from-slate-900 via-slate-800 to-slate-900",
        "text-slate-300",
        "shadow-lg shadow-slate-500/20",
        "text-slate-100",
        "text-slate-400",
        "bg-slate-800/60 backdrop-blur-md",
        "border border-slate-700/50",
        None,
    )
}

fn dark_bearish() -> ThemeTokens {
    cell(
        "bg-gradient-to-br from-slate-950 via-red-950 to-slate-900",
        "text-red-400",
        "shadow-lg shadow-red-500/30",
        "text-red-50",
        "text-red-200/70",
        "bg-red-950/40 backdrop-blur-md",
        "border border-red-800/40",
        None,
    )
}

fn dark_bullish() -> ThemeTokens {
    cell(
        "bg-gradient-to-br from-slate-950 via-emerald-950 to-slate-900",
        "text-emerald-400",
        "shadow-lg shadow-emerald-500/30",
        "text-emerald-50",
        "text-emerald-200/70",
        "bg-emerald-950/40 backdrop-blur-md",
        "border border-emerald-800/40",
        None,
    )
}

fn dark_extreme() -> ThemeTokens {
    cell(
        "bg-gradient-to-br from-purple-950 via-fuchsia-900 to-slate-950",
        "text-fuchsia-400",
        "shadow-2xl shadow-fuchsia-500/50",
        "text-fuchsia-50",
        "text-fuchsia-200/70",
        "bg-fuchsia-950/40 backdrop-blur-md",
        "border-2 border-fuchsia-600/50",
        None,
    )
}
