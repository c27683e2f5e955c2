//! Mock sentiment feed
//!
//! Stands in for the dashboard's simulated data sources. Each source does a
//! bounded random walk in [-100, 100]; the overall score is their weighted
//! mean. Pushed into the store on a tokio interval.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;

use crate::config::FeedConfig;
use crate::mood::MoodScore;
use crate::store::ThemeStore;

const STOCKS_WEIGHT: f64 = 0.4;
const NEWS_WEIGHT: f64 = 0.3;
const SOCIAL_WEIGHT: f64 = 0.3;

/// Largest accepted per-tick move; scores live in [-100, 100]
pub const MAX_VOLATILITY: f64 = 200.0;

/// Random-walk score generator
pub struct MockFeed {
    rng: StdRng,
    volatility: f64,
    stocks: f64,
    news: f64,
    social: f64,
}

impl MockFeed {
    pub fn new(config: &FeedConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            rng,
            volatility: checked_volatility(config.volatility),
            stocks: 0.0,
            news: 0.0,
            social: 0.0,
        }
    }

    /// Deterministic feed for reproducible runs
    pub fn with_seed(seed: u64, volatility: f64) -> Self {
        Self::new(&FeedConfig {
            seed: Some(seed),
            volatility,
            ..FeedConfig::default()
        })
    }

    /// Builder method: start the walk from a given level
    pub fn starting_at(mut self, level: f64) -> Self {
        let level = level.clamp(-100.0, 100.0);
        self.stocks = level;
        self.news = level;
        self.social = level;
        self
    }

    /// Advance every source one step and produce a snapshot
    pub fn next_score(&mut self) -> MoodScore {
        self.stocks = self.step(self.stocks);
        self.news = self.step(self.news);
        self.social = self.step(self.social);

        let overall =
            self.stocks * STOCKS_WEIGHT + self.news * NEWS_WEIGHT + self.social * SOCIAL_WEIGHT;

        MoodScore::with_components(
            round1(overall),
            round1(self.stocks),
            round1(self.news),
            round1(self.social),
            Utc::now().timestamp_millis(),
        )
    }

    fn step(&mut self, value: f64) -> f64 {
        let delta = self.rng.gen_range(-self.volatility..=self.volatility);
        (value + delta).clamp(-100.0, 100.0)
    }

    /// Push a score into the store every `interval`
    ///
    /// Runs until aborted, or for `ticks` scores when given.
    pub fn spawn(
        mut self,
        store: Arc<ThemeStore>,
        interval: Duration,
        ticks: Option<u64>,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            let mut produced = 0u64;

            loop {
                timer.tick().await;

                if ticks.is_some_and(|limit| produced >= limit) {
                    break;
                }

                let score = self.next_score();
                tracing::trace!(overall = score.overall, "Mock feed tick");
                store.set_mood_score(score);
                produced += 1;
            }

            tracing::debug!(produced, "Mock feed stopped");
        })
    }
}

fn checked_volatility(volatility: f64) -> f64 {
    if !volatility.is_finite() {
        let fallback = FeedConfig::default().volatility;
        tracing::warn!(volatility, fallback, "Non-finite feed volatility, using default");
        return fallback;
    }

    let volatility = volatility.abs();
    if volatility > MAX_VOLATILITY {
        tracing::warn!(volatility, max = MAX_VOLATILITY, "Feed volatility too large, capping");
        return MAX_VOLATILITY;
    }
    volatility
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
