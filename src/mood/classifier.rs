//! Mood classification
//!
//! Maps an overall sentiment score to one of four mood states. Bands are
//! checked in a fixed order so boundary values never classify twice:
//!
//! ```text
//!   score >= 51 or score <= -51   → extreme
//!   score >= 11                   → bullish   (11..=50)
//!   score <= -11                  → bearish   (-50..=-11)
//!   otherwise                     → neutral   (-10..=10)
//! ```
//!
//! Non-finite input: `NaN` fails every comparison and lands on neutral,
//! infinities land on extreme.

use super::types::MoodState;

/// Lowest score (by magnitude) classified as extreme
pub const EXTREME_THRESHOLD: f64 = 51.0;

/// Lowest score (by magnitude) classified as bullish or bearish
pub const TREND_THRESHOLD: f64 = 11.0;

/// Classify an overall sentiment score
pub fn classify(score: f64) -> MoodState {
    if score >= EXTREME_THRESHOLD || score <= -EXTREME_THRESHOLD {
        MoodState::Extreme
    } else if score >= TREND_THRESHOLD {
        MoodState::Bullish
    } else if score <= -TREND_THRESHOLD {
        MoodState::Bearish
    } else {
        MoodState::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(10.0), MoodState::Neutral);
        assert_eq!(classify(11.0), MoodState::Bullish);
        assert_eq!(classify(50.0), MoodState::Bullish);
        assert_eq!(classify(51.0), MoodState::Extreme);
        assert_eq!(classify(-10.0), MoodState::Neutral);
        assert_eq!(classify(-11.0), MoodState::Bearish);
        assert_eq!(classify(-50.0), MoodState::Bearish);
        assert_eq!(classify(-51.0), MoodState::Extreme);
    }

    #[test]
    fn test_zero_is_neutral() {
        assert_eq!(classify(0.0), MoodState::Neutral);
        assert_eq!(classify(-0.0), MoodState::Neutral);
    }

    #[test]
    fn test_fractional_gaps() {
        assert_eq!(classify(10.5), MoodState::Neutral);
        assert_eq!(classify(-10.5), MoodState::Neutral);
        assert_eq!(classify(50.5), MoodState::Bullish);
        assert_eq!(classify(-50.5), MoodState::Bearish);
    }

    #[test]
    fn test_out_of_nominal_range() {
        assert_eq!(classify(250.0), MoodState::Extreme);
        assert_eq!(classify(-1e9), MoodState::Extreme);
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(classify(f64::NAN), MoodState::Neutral);
        assert_eq!(classify(f64::INFINITY), MoodState::Extreme);
        assert_eq!(classify(f64::NEG_INFINITY), MoodState::Extreme);
    }

    #[test]
    fn test_bands_are_contiguous() {
        // Sweep in tenths across the nominal range; each step must land in the
        // band its sign and magnitude dictate.
        for i in -1200..=1200 {
            let score = i as f64 / 10.0;
            let expected = if score.abs() >= 51.0 {
                MoodState::Extreme
            } else if score >= 11.0 {
                MoodState::Bullish
            } else if score <= -11.0 {
                MoodState::Bearish
            } else {
                MoodState::Neutral
            };
            assert_eq!(classify(score), expected, "score {}", score);
        }
    }
}
