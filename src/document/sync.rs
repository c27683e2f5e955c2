//! Document Side-Effect Synchronizer
//!
//! Mirrors the active theme onto the root element:
//! - class `dark` on whenever the effective appearance is dark
//! - in dynamic mode with a score present, the mood palette as custom
//!   properties; otherwise those properties are removed
//!
//! Application is keyed on (display mode, mood state, score) and skipped when
//! the key is unchanged.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::mood::{DisplayMode, MoodScore, MoodState};
use crate::store::{ListenerId, StateListener, ThemeState, ThemeStore};
use crate::theme::mood_palette;

use super::root::RootElement;

pub const DARK_CLASS: &str = "dark";
pub const GRADIENT_START_PROPERTY: &str = "--mood-gradient-start";
pub const GRADIENT_END_PROPERTY: &str = "--mood-gradient-end";
pub const ACCENT_PROPERTY: &str = "--mood-accent";
pub const GLOW_PROPERTY: &str = "--mood-glow";

const MOOD_PROPERTIES: [&str; 4] = [
    GRADIENT_START_PROPERTY,
    GRADIENT_END_PROPERTY,
    ACCENT_PROPERTY,
    GLOW_PROPERTY,
];

#[derive(Debug, Clone, Copy)]
struct SyncKey {
    display_mode: DisplayMode,
    mood_state: MoodState,
    mood_score: Option<MoodScore>,
}

impl SyncKey {
    fn of(state: &ThemeState) -> Self {
        Self {
            display_mode: state.display_mode,
            mood_state: state.mood_state,
            mood_score: state.mood_score,
        }
    }
}

impl PartialEq for SyncKey {
    fn eq(&self, other: &Self) -> bool {
        let same_score = match (&self.mood_score, &other.mood_score) {
            (Some(a), Some(b)) => a.same_as(b),
            (None, None) => true,
            _ => false,
        };
        self.display_mode == other.display_mode && self.mood_state == other.mood_state && same_score
    }
}

/// Applies theme state to a root element
#[derive(Debug)]
pub struct DocumentSynchronizer<R: RootElement> {
    root: R,
    last_key: Option<SyncKey>,
    applications: u64,
}

impl<R: RootElement> DocumentSynchronizer<R> {
    pub fn new(root: R) -> Self {
        Self {
            root,
            last_key: None,
            applications: 0,
        }
    }

    pub fn root(&self) -> &R {
        &self.root
    }

    /// Times state was actually applied to the root
    pub fn applications(&self) -> u64 {
        self.applications
    }

    pub fn into_root(self) -> R {
        self.root
    }

    /// Apply a snapshot. Returns false when nothing relevant changed.
    pub fn apply(&mut self, state: &ThemeState) -> bool {
        let key = SyncKey::of(state);
        if self.last_key == Some(key) {
            return false;
        }

        self.root.set_class(DARK_CLASS, state.appearance.is_dark());

        match state.mood_score {
            Some(_) if state.display_mode.is_dynamic() => {
                let palette = mood_palette(state.mood_state);
                self.root
                    .set_property(GRADIENT_START_PROPERTY, palette.gradient_start);
                self.root.set_property(GRADIENT_END_PROPERTY, palette.gradient_end);
                self.root.set_property(ACCENT_PROPERTY, palette.accent);
                self.root.set_property(GLOW_PROPERTY, palette.glow);
            }
            _ => {
                for property in MOOD_PROPERTIES {
                    self.root.remove_property(property);
                }
            }
        }

        self.last_key = Some(key);
        self.applications += 1;

        tracing::debug!(
            display_mode = %state.display_mode,
            mood = %state.mood_state,
            applications = self.applications,
            "Document synchronized"
        );
        true
    }
}

impl<R: RootElement + 'static> DocumentSynchronizer<R> {
    /// Register on a store; the current state is applied immediately
    pub fn attach(self, store: &ThemeStore) -> SyncHandle<R> {
        let shared = Arc::new(Mutex::new(self));
        let listener = Arc::clone(&shared);

        let id = store.subscribe(move |state: &ThemeState| {
            lock(&listener).apply(state);
        });

        SyncHandle { id, shared }
    }
}

impl<R: RootElement> StateListener for DocumentSynchronizer<R> {
    fn on_state(&mut self, state: &ThemeState) {
        self.apply(state);
    }
}

/// A synchronizer registered on a store
pub struct SyncHandle<R: RootElement> {
    id: ListenerId,
    shared: Arc<Mutex<DocumentSynchronizer<R>>>,
}

impl<R: RootElement> SyncHandle<R> {
    pub fn listener_id(&self) -> &str {
        &self.id
    }

    /// Inspect the root element
    pub fn with_root<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(lock(&self.shared).root())
    }

    pub fn applications(&self) -> u64 {
        lock(&self.shared).applications()
    }

    /// Unregister from the store; the root keeps its last state
    pub fn detach(self, store: &ThemeStore) -> bool {
        store.unsubscribe(&self.id)
    }
}

fn lock<R: RootElement>(
    shared: &Mutex<DocumentSynchronizer<R>>,
) -> MutexGuard<'_, DocumentSynchronizer<R>> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
