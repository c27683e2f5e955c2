//! Core data types for the MoodMeter theme engine
//!
//! This module defines the fundamental types shared by every layer:
//! - `MoodScore`: A sentiment snapshot pushed by data producers
//! - `MoodState`: Discrete classification of the overall score
//! - `DisplayMode`: The user's appearance preference
//! - `Appearance`: The effective light/dark rendering

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::store::error::ThemeError;

/// A composite sentiment snapshot
///
/// Scores are nominally in [-100, 100] but are never clamped or validated.
/// A snapshot is never mutated once handed to the store; a newer one
/// replaces it wholesale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MoodScore {
    /// Composite score driving classification
    pub overall: f64,
    /// Stock market sentiment
    pub stocks: f64,
    /// News sentiment
    pub news: f64,
    /// Social media sentiment
    pub social: f64,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
}

impl MoodScore {
    /// Create a score where every source agrees with `overall`, stamped now
    pub fn new(overall: f64) -> Self {
        Self {
            overall,
            stocks: overall,
            news: overall,
            social: overall,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Create a score from its per-source components with a specific timestamp
    pub fn with_components(
        overall: f64,
        stocks: f64,
        news: f64,
        social: f64,
        timestamp: i64,
    ) -> Self {
        Self {
            overall,
            stocks,
            news,
            social,
            timestamp,
        }
    }

    /// Builder method: set timestamp
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Bitwise comparison, so a NaN snapshot matches its own copy
    pub fn same_as(&self, other: &MoodScore) -> bool {
        self.overall.to_bits() == other.overall.to_bits()
            && self.stocks.to_bits() == other.stocks.to_bits()
            && self.news.to_bits() == other.news.to_bits()
            && self.social.to_bits() == other.social.to_bits()
            && self.timestamp == other.timestamp
    }

    /// Classify this snapshot
    pub fn mood(&self) -> MoodState {
        super::classifier::classify(self.overall)
    }
}

/// Discrete mood classification derived from `MoodScore::overall`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MoodState {
    /// -10..=10
    #[default]
    Neutral,
    /// -50..=-11
    Bearish,
    /// 11..=50
    Bullish,
    /// <= -51 or >= 51
    Extreme,
}

impl MoodState {
    /// Get all mood states for iteration
    pub fn all() -> &'static [MoodState] {
        &[
            MoodState::Neutral,
            MoodState::Bearish,
            MoodState::Bullish,
            MoodState::Extreme,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodState::Neutral => "neutral",
            MoodState::Bearish => "bearish",
            MoodState::Bullish => "bullish",
            MoodState::Extreme => "extreme",
        }
    }
}

impl std::fmt::Display for MoodState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User-selected appearance preference
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Light,
    Dark,
    /// Dark appearance with accents tracking the live mood
    #[default]
    Dynamic,
}

impl DisplayMode {
    /// Get all display modes for iteration
    pub fn all() -> &'static [DisplayMode] {
        &[DisplayMode::Light, DisplayMode::Dark, DisplayMode::Dynamic]
    }

    /// The string written to preference storage
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Light => "light",
            DisplayMode::Dark => "dark",
            DisplayMode::Dynamic => "dynamic",
        }
    }

    /// Resolve the appearance actually rendered for this mode
    pub fn appearance(&self) -> Appearance {
        match self {
            DisplayMode::Light => Appearance::Light,
            DisplayMode::Dark | DisplayMode::Dynamic => Appearance::Dark,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, DisplayMode::Dynamic)
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = ThemeError;

    /// Parses exactly the three stored spellings. Anything else, including
    /// different casing, is rejected so a tampered value is treated as absent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(DisplayMode::Light),
            "dark" => Ok(DisplayMode::Dark),
            "dynamic" => Ok(DisplayMode::Dynamic),
            other => Err(ThemeError::InvalidDisplayMode(other.to_string())),
        }
    }
}

/// Effective light/dark rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Light,
    Dark,
}

impl Appearance {
    pub fn all() -> &'static [Appearance] {
        &[Appearance::Light, Appearance::Dark]
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Appearance::Dark)
    }
}

impl std::fmt::Display for Appearance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Appearance::Light => write!(f, "light"),
            Appearance::Dark => write!(f, "dark"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mode_parse() {
        assert_eq!("light".parse::<DisplayMode>().unwrap(), DisplayMode::Light);
        assert_eq!("dark".parse::<DisplayMode>().unwrap(), DisplayMode::Dark);
        assert_eq!(
            "dynamic".parse::<DisplayMode>().unwrap(),
            DisplayMode::Dynamic
        );
    }

    #[test]
    fn test_display_mode_parse_rejects_unknown() {
        for bad in ["", "Dark", "sepia", " light"] {
            let err = bad.parse::<DisplayMode>().unwrap_err();
            assert!(matches!(err, ThemeError::InvalidDisplayMode(_)));
        }
    }

    #[test]
    fn test_display_mode_round_trips_through_as_str() {
        for mode in DisplayMode::all() {
            assert_eq!(mode.as_str().parse::<DisplayMode>().unwrap(), *mode);
        }
    }

    #[test]
    fn test_effective_appearance() {
        assert_eq!(DisplayMode::Light.appearance(), Appearance::Light);
        assert_eq!(DisplayMode::Dark.appearance(), Appearance::Dark);
        assert_eq!(DisplayMode::Dynamic.appearance(), Appearance::Dark);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DisplayMode::default(), DisplayMode::Dynamic);
        assert_eq!(MoodState::default(), MoodState::Neutral);
    }

    #[test]
    fn test_mood_state_serializes_lowercase() {
        let json = serde_json::to_string(&MoodState::Bullish).unwrap();
        assert_eq!(json, "\"bullish\"");
    }

    #[test]
    fn test_mood_score_builder() {
        let score = MoodScore::new(42.0).timestamp(1000);
        assert_eq!(score.timestamp, 1000);
        assert_eq!(score.stocks, 42.0);
        assert_eq!(score.mood(), MoodState::Bullish);
    }

    #[test]
    fn test_same_as_compares_bits() {
        let nan = MoodScore::new(f64::NAN).timestamp(5);
        assert!(nan.same_as(&nan));
        assert_ne!(nan, nan);

        let score = MoodScore::new(20.0).timestamp(5);
        assert!(score.same_as(&MoodScore::new(20.0).timestamp(5)));
        assert!(!score.same_as(&score.timestamp(6)));
        assert!(!MoodScore::new(0.0).timestamp(1).same_as(&MoodScore::new(-0.0).timestamp(1)));
    }
}
