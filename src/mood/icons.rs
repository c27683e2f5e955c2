//! Icon and label lookup for mood indicators
//!
//! Compact widgets only need an icon and a label, so this is kept apart from
//! full theme resolution.

use serde::{Deserialize, Serialize};

use super::types::MoodState;

/// Symbolic icon identifier understood by the icon set
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum MoodIcon {
    Minus,
    TrendingDown,
    TrendingUp,
    Zap,
}

impl MoodIcon {
    pub fn name(&self) -> &'static str {
        match self {
            MoodIcon::Minus => "minus",
            MoodIcon::TrendingDown => "trending-down",
            MoodIcon::TrendingUp => "trending-up",
            MoodIcon::Zap => "zap",
        }
    }
}

impl std::fmt::Display for MoodIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Icon plus display label for one mood
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MoodIndicator {
    pub icon: MoodIcon,
    pub label: &'static str,
}

/// Resolve the indicator for a mood state
pub fn resolve_icon(mood: MoodState) -> MoodIndicator {
    match mood {
        MoodState::Neutral => MoodIndicator {
            icon: MoodIcon::Minus,
            label: "Neutral",
        },
        MoodState::Bearish => MoodIndicator {
            icon: MoodIcon::TrendingDown,
            label: "Bearish",
        },
        MoodState::Bullish => MoodIndicator {
            icon: MoodIcon::TrendingUp,
            label: "Bullish",
        },
        MoodState::Extreme => MoodIndicator {
            icon: MoodIcon::Zap,
            label: "Extreme",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_labels() {
        assert_eq!(resolve_icon(MoodState::Neutral).label, "Neutral");
        assert_eq!(resolve_icon(MoodState::Bearish).label, "Bearish");
        assert_eq!(resolve_icon(MoodState::Bullish).label, "Bullish");
        assert_eq!(resolve_icon(MoodState::Extreme).label, "Extreme");
    }

    #[test]
    fn test_icons_are_one_to_one() {
        let icons: HashSet<MoodIcon> = MoodState::all()
            .iter()
            .map(|m| resolve_icon(*m).icon)
            .collect();
        assert_eq!(icons.len(), MoodState::all().len());
    }

    #[test]
    fn test_icon_names() {
        assert_eq!(resolve_icon(MoodState::Bullish).icon.name(), "trending-up");
        assert_eq!(
            serde_json::to_string(&MoodIcon::TrendingDown).unwrap(),
            "\"trending-down\""
        );
    }
}
