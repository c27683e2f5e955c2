//! MoodMeter demo
//!
//! Runs the mock sentiment feed against a theme store backed by the
//! configured preferences file, logging every mood transition and the final
//! document state.

use moodmeter::document::{DocumentSynchronizer, StyleRoot};
use moodmeter::{Config, FilePreferences, MockFeed, MoodState, ThemeStore};
use std::sync::Arc;
use std::time::Duration;

const DEMO_TICKS: u64 = 20;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    config.logging.init();

    tracing::info!("MoodMeter theme engine v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Preferences file: {:?}", config.preferences.path());

    let preferences = Arc::new(FilePreferences::new(config.preferences.path()));
    let store = Arc::new(ThemeStore::new(preferences));
    let document = DocumentSynchronizer::new(StyleRoot::new()).attach(&store);

    tracing::info!("Display mode: {}", store.display_mode());

    // Log mood changes as they arrive
    let mut updates = store.watch();
    let watcher = tokio::spawn(async move {
        let mut last_mood: Option<MoodState> = None;
        loop {
            match updates.recv().await {
                Ok(state) => {
                    if last_mood != Some(state.mood_state) {
                        tracing::info!(
                            overall = state.mood_score.map(|s| s.overall),
                            "Mood is now {} ({})",
                            state.label(),
                            state.icon()
                        );
                        last_mood = Some(state.mood_state);
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Watcher lagged behind");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let interval = Duration::from_millis(config.feed.interval_ms.max(1));
    let feed = MockFeed::new(&config.feed).spawn(Arc::clone(&store), interval, Some(DEMO_TICKS));

    tokio::select! {
        result = feed => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Interrupted"),
    }
    watcher.abort();

    let state = store.state();
    tracing::info!(
        applications = document.applications(),
        "Final theme: {} / {}",
        state.display_mode,
        state.label()
    );
    println!("{}", serde_json::to_string_pretty(&state.bundle)?);
    println!("{}", document.with_root(|root| root.to_css()));

    Ok(())
}
