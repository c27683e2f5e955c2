//! Style token types
//!
//! Tokens are plain utility-class strings. They carry no rendering logic so
//! any front-end can consume them.

use serde::{Deserialize, Serialize};

use crate::mood::{resolve_icon, Appearance, MoodIcon, MoodState};

use super::table::{CellSource, ThemeTable};

/// Hover and button styles, only defined for light appearance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InteractiveTokens {
    pub hover: String,
    pub button: String,
}

impl InteractiveTokens {
    pub fn new(hover: impl Into<String>, button: impl Into<String>) -> Self {
        Self {
            hover: hover.into(),
            button: button.into(),
        }
    }
}

/// One cell of the theme table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThemeTokens {
    /// Page background gradient
    pub background: String,
    /// Accent text color
    pub accent: String,
    /// Glow / elevation shadow
    pub glow: String,
    pub text_primary: String,
    pub text_secondary: String,
    /// Card surface
    pub card: String,
    pub border: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactive: Option<InteractiveTokens>,
}

impl ThemeTokens {
    /// True when every descriptor carries a value
    pub fn is_populated(&self) -> bool {
        [
            &self.background,
            &self.accent,
            &self.glow,
            &self.text_primary,
            &self.text_secondary,
            &self.card,
            &self.border,
        ]
        .iter()
        .all(|token| !token.trim().is_empty())
    }
}

/// Fully resolved theme for an (appearance, mood) pair
///
/// Always a pure projection of its inputs; never stored on its own.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ThemeBundle {
    pub appearance: Appearance,
    pub mood: MoodState,
    pub tokens: ThemeTokens,
    pub icon: MoodIcon,
    pub label: &'static str,
    /// Which table entry produced `tokens`
    pub source: CellSource,
}

impl ThemeBundle {
    /// Resolve the bundle for an appearance and mood from a table
    pub fn resolve(table: &ThemeTable, appearance: Appearance, mood: MoodState) -> Self {
        let resolution = table.resolve(appearance, mood);
        let indicator = resolve_icon(mood);

        Self {
            appearance,
            mood,
            tokens: resolution.tokens.clone(),
            icon: indicator.icon,
            label: indicator.label,
            source: resolution.source,
        }
    }

    /// Space-separated classes for the page shell
    pub fn shell_classes(&self) -> String {
        format!(
            "{} {}",
            self.tokens.background, self.tokens.text_primary
        )
    }

    /// Space-separated classes for a card
    pub fn card_classes(&self) -> String {
        let mut classes = format!(
            "{} {} {}",
            self.tokens.card, self.tokens.border, self.tokens.glow
        );
        if let Some(interactive) = &self.tokens.interactive {
            classes.push(' ');
            classes.push_str(&interactive.hover);
        }
        classes
    }
}
