//! MoodMeter CLI
//!
//! Command-line interface for the theme engine:
//! - Read or change the persisted display mode
//! - Classify scores
//! - Resolve theme bundles and document CSS
//! - Watch the mock feed drive the theme

use clap::{Parser, Subcommand};
use moodmeter::document::{DocumentSynchronizer, StyleRoot};
use moodmeter::mood::{classify, resolve_icon};
use moodmeter::store::load_display_mode;
use moodmeter::{
    Config, DisplayMode, FilePreferences, MemoryPreferences, MockFeed, MoodScore, ThemeState,
    ThemeStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "moodmeter")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mood-driven theme engine for the MoodMeter dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Preferences file (default: from config)
    #[arg(long, global = true)]
    pub preferences: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show or change the persisted display mode
    Mode {
        /// New mode: light, dark or dynamic. Omit to print the current mode.
        mode: Option<String>,
    },

    /// Classify an overall sentiment score
    Classify {
        #[arg(allow_hyphen_values = true)]
        score: f64,
    },

    /// Resolve the theme bundle for a mode and score
    Theme {
        /// Display mode (default: persisted preference)
        #[arg(short, long)]
        mode: Option<String>,
        /// Overall score
        #[arg(short, long, allow_hyphen_values = true)]
        score: Option<f64>,
    },

    /// Print the root document CSS for a mode and score
    Css {
        #[arg(short, long)]
        mode: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        score: Option<f64>,
    },

    /// Run the mock feed and print each transition
    Watch {
        /// Number of scores to produce
        #[arg(short, long, default_value = "10")]
        ticks: u64,
        /// Milliseconds between scores (default: from config)
        #[arg(short, long)]
        interval_ms: Option<u64>,
        /// Fixed feed seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load_default();
    config.logging.init();

    if let Some(path) = &cli.preferences {
        config.preferences.path = path.to_string_lossy().to_string();
    }
    let preferences = Arc::new(FilePreferences::new(config.preferences.path()));

    match cli.command {
        Commands::Mode { mode } => {
            let store = ThemeStore::new(preferences);
            if let Some(mode) = mode {
                store.set_display_mode_str(&mode)?;
            }
            let mode = store.display_mode();
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::json!({ "display_mode": mode })),
                _ => println!("{}", mode),
            }
        }

        Commands::Classify { score } => {
            let mood = classify(score);
            let indicator = resolve_icon(mood);
            match cli.format.as_str() {
                "json" => println!(
                    "{}",
                    serde_json::json!({
                        "score": score,
                        "mood": mood,
                        "icon": indicator.icon,
                        "label": indicator.label,
                    })
                ),
                _ => println!("{:>8.1}  {:<8} {}", score, indicator.label, indicator.icon),
            }
        }

        Commands::Theme { mode, score } => {
            let state = preview_state(&preferences, mode.as_deref(), score)?;
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&state.bundle)?),
                _ => print_bundle(&state),
            }
        }

        Commands::Css { mode, score } => {
            let state = preview_state(&preferences, mode.as_deref(), score)?;
            let mut sync = DocumentSynchronizer::new(StyleRoot::new());
            sync.apply(&state);
            print!("{}", sync.root().to_css());
        }

        Commands::Watch {
            ticks,
            interval_ms,
            seed,
        } => {
            let mut feed_config = config.feed.clone();
            if seed.is_some() {
                feed_config.seed = seed;
            }
            let interval = Duration::from_millis(interval_ms.unwrap_or(feed_config.interval_ms).max(1));

            let store = Arc::new(ThemeStore::new(preferences));
            let document = DocumentSynchronizer::new(StyleRoot::new()).attach(&store);

            let json = cli.format == "json";
            store.subscribe(move |state: &ThemeState| {
                if state.revision == 0 {
                    return;
                }
                if json {
                    if let Ok(line) = serde_json::to_string(state) {
                        println!("{}", line);
                    }
                } else if let Some(score) = state.mood_score {
                    println!(
                        "#{:<4} {:>7.1}  {:<8} {}",
                        state.revision,
                        score.overall,
                        state.label(),
                        state.icon()
                    );
                }
            });

            MockFeed::new(&feed_config)
                .spawn(Arc::clone(&store), interval, Some(ticks))
                .await?;

            if !json {
                println!();
                print!("{}", document.with_root(|root| root.to_css()));
            }
        }

        Commands::Config { output } => {
            let content = moodmeter::config::generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Wrote config to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Build a throwaway store so previews never touch the persisted preference
fn preview_state(
    preferences: &FilePreferences,
    mode: Option<&str>,
    score: Option<f64>,
) -> anyhow::Result<ThemeState> {
    let mode = match mode {
        Some(mode) => mode.parse::<DisplayMode>()?,
        None => load_display_mode(preferences),
    };

    let store = ThemeStore::new(Arc::new(MemoryPreferences::new()));
    store.set_display_mode(mode);
    if let Some(score) = score {
        store.set_mood_score(MoodScore::new(score));
    }
    Ok(store.state())
}

fn print_bundle(state: &ThemeState) {
    let bundle = &state.bundle;
    let tokens = &bundle.tokens;

    println!("Mode:        {} ({})", state.display_mode, bundle.appearance);
    println!("Mood:        {} [{}]", bundle.label, bundle.icon);
    println!("Background:  {}", tokens.background);
    println!("Accent:      {}", tokens.accent);
    println!("Glow:        {}", tokens.glow);
    println!("Text:        {} / {}", tokens.text_primary, tokens.text_secondary);
    println!("Card:        {}", tokens.card);
    println!("Border:      {}", tokens.border);
    if let Some(interactive) = &tokens.interactive {
        println!("Hover:       {}", interactive.hover);
        println!("Button:      {}", interactive.button);
    }
}
