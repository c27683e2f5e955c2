//! Theme resolution
//!
//! - **tokens**: style token types and the resolved ThemeBundle
//! - **table**: (appearance × mood) lookup with explicit fallback
//! - **palette**: raw mood colors for document custom properties
//!
//! # Example
//!
//! ```rust
//! use moodmeter::mood::{Appearance, MoodState};
//! use moodmeter::theme::{ThemeBundle, ThemeTable};
//!
//! let table = ThemeTable::builtin();
//! let bundle = ThemeBundle::resolve(&table, Appearance::Dark, MoodState::Bullish);
//! assert_eq!(bundle.label, "Bullish");
//! ```

pub mod palette;
pub mod table;
pub mod tokens;

pub use palette::{mood_palette, MoodPalette};
pub use table::{CellSource, Resolution, ThemeTable};
pub use tokens::{InteractiveTokens, ThemeBundle, ThemeTokens};
