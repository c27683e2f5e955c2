//! MoodMeter Theme Store
//!
//! The store orchestrates all theme components:
//! - Mode path: set_display_mode → persist → re-derive bundle → listeners
//! - Score path: set_mood_score → classify → re-derive bundle → listeners
//!
//! Every transition runs under one lock, so the bundle in any snapshot always
//! matches that snapshot's mode and score, and listeners see transitions in
//! the order they were applied.

use serde::Serialize;
use std::cell::RefCell;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;

use crate::mood::{Appearance, DisplayMode, MoodIcon, MoodScore, MoodState};
use crate::theme::{ThemeBundle, ThemeTable};

use super::error::{ThemeError, ThemeResult};
use super::listeners::{ListenerId, ListenerRegistry, StateListener, DEFAULT_BROADCAST_CAPACITY};
use super::preferences::{PreferenceStore, DISPLAY_MODE_KEY};

/// Snapshot of the store
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ThemeState {
    pub display_mode: DisplayMode,
    /// Effective appearance after resolving dynamic mode
    pub appearance: Appearance,
    /// Latest score, if any producer has pushed one
    pub mood_score: Option<MoodScore>,
    pub mood_state: MoodState,
    pub bundle: ThemeBundle,
    /// Incremented on every applied transition
    pub revision: u64,
}

impl ThemeState {
    /// State before any score has arrived
    pub fn initial(display_mode: DisplayMode, table: &ThemeTable) -> Self {
        let appearance = display_mode.appearance();
        let mood_state = MoodState::default();

        Self {
            display_mode,
            appearance,
            mood_score: None,
            mood_state,
            bundle: ThemeBundle::resolve(table, appearance, mood_state),
            revision: 0,
        }
    }

    pub fn icon(&self) -> MoodIcon {
        self.bundle.icon
    }

    pub fn label(&self) -> &'static str {
        self.bundle.label
    }

    /// Recompute everything derived from mode and score
    fn rederive(&mut self, table: &ThemeTable) {
        self.appearance = self.display_mode.appearance();
        self.mood_state = self
            .mood_score
            .map(|score| score.mood())
            .unwrap_or_default();
        self.bundle = ThemeBundle::resolve(table, self.appearance, self.mood_state);
    }
}

thread_local! {
    // Stores whose listeners are running on this thread
    static NOTIFYING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks a store as notifying on the current thread until dropped
struct NotifyGuard(usize);

impl NotifyGuard {
    fn enter(store: &ThemeStore) -> Self {
        let key = store.key();
        NOTIFYING.with(|active| active.borrow_mut().push(key));
        Self(key)
    }
}

impl Drop for NotifyGuard {
    fn drop(&mut self) {
        NOTIFYING.with(|active| {
            let mut active = active.borrow_mut();
            if let Some(pos) = active.iter().rposition(|key| *key == self.0) {
                active.remove(pos);
            }
        });
    }
}

/// Session-lifetime theme store
///
/// Construct one per session and share it via `Arc`. Tests construct fresh
/// isolated instances.
pub struct ThemeStore {
    state: Mutex<ThemeState>,
    listeners: Mutex<ListenerRegistry>,
    updates: broadcast::Sender<ThemeState>,
    preferences: Arc<dyn PreferenceStore>,
    table: ThemeTable,
}

impl ThemeStore {
    /// Create a store with the built-in theme table
    pub fn new(preferences: Arc<dyn PreferenceStore>) -> Self {
        Self::with_table(preferences, ThemeTable::builtin())
    }

    /// Create a store with a custom theme table
    pub fn with_table(preferences: Arc<dyn PreferenceStore>, table: ThemeTable) -> Self {
        let display_mode = load_display_mode(preferences.as_ref());
        let state = ThemeState::initial(display_mode, &table);

        tracing::debug!(display_mode = %display_mode, "Theme store initialized");

        let listeners = ListenerRegistry::new(DEFAULT_BROADCAST_CAPACITY);
        let updates = listeners.sender();

        Self {
            state: Mutex::new(state),
            listeners: Mutex::new(listeners),
            updates,
            preferences,
            table,
        }
    }

    /// Synchronous snapshot of the current state
    pub fn state(&self) -> ThemeState {
        self.lock_state().clone()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.lock_state().display_mode
    }

    pub fn mood_state(&self) -> MoodState {
        self.lock_state().mood_state
    }

    pub fn mood_score(&self) -> Option<MoodScore> {
        self.lock_state().mood_score
    }

    pub fn bundle(&self) -> ThemeBundle {
        self.lock_state().bundle.clone()
    }

    pub fn table(&self) -> &ThemeTable {
        &self.table
    }

    /// Switch display mode and persist it. Setting the current mode is a no-op.
    pub fn set_display_mode(&self, mode: DisplayMode) {
        self.transition(|state| {
            if state.display_mode == mode {
                return false;
            }
            state.display_mode = mode;
            true
        });
    }

    /// Parse and apply a display mode string
    ///
    /// Unrecognized strings are reported and leave the store untouched.
    pub fn set_display_mode_str(&self, mode: &str) -> ThemeResult<()> {
        match mode.parse::<DisplayMode>() {
            Ok(mode) => {
                self.set_display_mode(mode);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(mode = %mode, "Ignoring invalid display mode");
                Err(e)
            }
        }
    }

    /// Replace the current score and reclassify
    pub fn set_mood_score(&self, score: MoodScore) {
        if !score.overall.is_finite() {
            tracing::warn!(
                overall = score.overall,
                "Non-finite mood score, classifying as {}",
                score.mood()
            );
        }

        self.transition(|state| {
            if state.mood_score.is_some_and(|current| current.same_as(&score)) {
                return false;
            }
            state.mood_score = Some(score);
            true
        });
    }

    /// Register a listener
    ///
    /// The listener is called once immediately with the current state, then
    /// after every transition. A listener registered from inside another
    /// listener of the same store is dropped with a warning.
    pub fn subscribe(&self, listener: impl StateListener + 'static) -> ListenerId {
        let mut listener: Box<dyn StateListener> = Box::new(listener);

        if self.is_notifying("subscribe") {
            return ListenerId::new();
        }

        let state = self.lock_state();
        let snapshot = state.clone();
        let mut listeners = self.lock_listeners();
        drop(state);

        {
            let _guard = NotifyGuard::enter(self);
            listener.on_state(&snapshot);
        }
        listeners.register(listener)
    }

    /// Remove a listener; returns false if the ID was unknown
    pub fn unsubscribe(&self, id: &str) -> bool {
        if self.is_notifying("unsubscribe") {
            return false;
        }
        self.lock_listeners().unregister(id)
    }

    /// Receiver for async consumers. Lagging receivers skip to newer states.
    pub fn watch(&self) -> broadcast::Receiver<ThemeState> {
        self.updates.subscribe()
    }

    /// Number of registered listeners; 0 when asked from inside a listener
    pub fn listener_count(&self) -> usize {
        if self.is_notifying("listener_count") {
            return 0;
        }
        self.lock_listeners().len()
    }

    /// Apply one transition. `update` returns false when nothing changed.
    fn transition(&self, update: impl FnOnce(&mut ThemeState) -> bool) {
        if self.is_notifying("transition") {
            return;
        }

        let mut state = self.lock_state();
        let previous_mode = state.display_mode;

        if !update(&mut state) {
            return;
        }

        state.rederive(&self.table);
        state.revision += 1;

        if state.display_mode != previous_mode {
            self.persist(state.display_mode);
        }

        tracing::debug!(
            revision = state.revision,
            display_mode = %state.display_mode,
            mood = %state.mood_state,
            "Theme transition"
        );

        // Take the listener lock before releasing state so deliveries keep
        // transition order.
        let snapshot = state.clone();
        let mut listeners = self.lock_listeners();
        drop(state);

        let _guard = NotifyGuard::enter(self);
        listeners.notify(&snapshot);
    }

    fn key(&self) -> usize {
        self as *const Self as usize
    }

    /// True when this thread is inside one of this store's listeners. The
    /// listener lock is held there, so the call is refused.
    fn is_notifying(&self, operation: &'static str) -> bool {
        let key = self.key();
        let reentrant = NOTIFYING.with(|active| active.borrow().contains(&key));
        if reentrant {
            tracing::warn!(operation, "Theme listener called back into its store, ignoring");
        }
        reentrant
    }

    fn persist(&self, mode: DisplayMode) {
        if let Err(e) = self.preferences.set(DISPLAY_MODE_KEY, mode.as_str()) {
            tracing::warn!(error = %e, "Failed to persist display mode, keeping it in memory");
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ThemeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_listeners(&self) -> MutexGuard<'_, ListenerRegistry> {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Read the persisted display mode, defaulting on any problem
pub fn load_display_mode(preferences: &dyn PreferenceStore) -> DisplayMode {
    match preferences.get(DISPLAY_MODE_KEY) {
        Ok(Some(value)) => match value.parse::<DisplayMode>() {
            Ok(mode) => mode,
            Err(ThemeError::InvalidDisplayMode(value)) => {
                tracing::warn!(value = %value, "Unrecognized persisted display mode, using default");
                DisplayMode::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse persisted display mode");
                DisplayMode::default()
            }
        },
        Ok(None) => DisplayMode::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Preference storage unavailable, using default display mode");
            DisplayMode::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::preferences::{FilePreferences, MemoryPreferences};
    use crate::theme::CellSource;
    use tempfile::tempdir;

    /// Storage that fails every operation
    struct BrokenPreferences;

    impl PreferenceStore for BrokenPreferences {
        fn get(&self, _key: &str) -> ThemeResult<Option<String>> {
            Err(ThemeError::Storage("storage disabled".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> ThemeResult<()> {
            Err(ThemeError::Storage("storage disabled".to_string()))
        }

        fn remove(&self, _key: &str) -> ThemeResult<()> {
            Err(ThemeError::Storage("storage disabled".to_string()))
        }
    }

    fn memory_store() -> (ThemeStore, Arc<MemoryPreferences>) {
        let prefs = Arc::new(MemoryPreferences::new());
        let store = ThemeStore::new(prefs.clone());
        (store, prefs)
    }

    fn score(overall: f64) -> MoodScore {
        MoodScore::with_components(overall, overall, overall, overall, 1_700_000_000_000)
    }

    #[test]
    fn test_defaults_without_persisted_mode() {
        let (store, _) = memory_store();
        let state = store.state();

        assert_eq!(state.display_mode, DisplayMode::Dynamic);
        assert_eq!(state.appearance, Appearance::Dark);
        assert_eq!(state.mood_state, MoodState::Neutral);
        assert_eq!(state.mood_score, None);
        assert_eq!(state.label(), "Neutral");
        assert_eq!(state.revision, 0);
    }

    #[test]
    fn test_reads_persisted_mode() {
        let prefs = Arc::new(MemoryPreferences::new().with(DISPLAY_MODE_KEY, "light"));
        let store = ThemeStore::new(prefs);
        assert_eq!(store.display_mode(), DisplayMode::Light);
        assert_eq!(store.bundle().appearance, Appearance::Light);
    }

    #[test]
    fn test_corrupted_persisted_mode_falls_back() {
        for bad in ["sepia", "", "DARK", "{\"mode\":\"dark\"}"] {
            let prefs = Arc::new(MemoryPreferences::new().with(DISPLAY_MODE_KEY, bad));
            let store = ThemeStore::new(prefs);
            assert_eq!(store.display_mode(), DisplayMode::Dynamic, "value {:?}", bad);
        }
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let store = ThemeStore::new(Arc::new(BrokenPreferences));
        assert_eq!(store.display_mode(), DisplayMode::Dynamic);

        store.set_display_mode(DisplayMode::Light);
        assert_eq!(store.display_mode(), DisplayMode::Light);
        assert_eq!(store.bundle().appearance, Appearance::Light);
    }

    #[test]
    fn test_set_display_mode_persists() {
        let (store, prefs) = memory_store();
        store.set_display_mode(DisplayMode::Dark);

        assert_eq!(
            prefs.get(DISPLAY_MODE_KEY).unwrap().as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn test_set_display_mode_idempotent() {
        let (once, _) = memory_store();
        once.set_display_mode(DisplayMode::Dark);

        let (twice, _) = memory_store();
        twice.set_display_mode(DisplayMode::Dark);
        twice.set_display_mode(DisplayMode::Dark);

        assert_eq!(once.state(), twice.state());
        assert_eq!(twice.state().revision, 1);
    }

    #[test]
    fn test_persistence_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        for mode in DisplayMode::all() {
            let store = ThemeStore::new(Arc::new(FilePreferences::new(&path)));
            store.set_display_mode(*mode);
            drop(store);

            let reloaded = ThemeStore::new(Arc::new(FilePreferences::new(&path)));
            assert_eq!(reloaded.display_mode(), *mode);
        }
    }

    #[test]
    fn test_invalid_mode_string_is_rejected() {
        let (store, prefs) = memory_store();
        store.set_display_mode(DisplayMode::Light);
        let before = store.state();

        let result = store.set_display_mode_str("sepia");
        assert!(matches!(result, Err(ThemeError::InvalidDisplayMode(_))));
        assert_eq!(store.state(), before);
        assert_eq!(
            prefs.get(DISPLAY_MODE_KEY).unwrap().as_deref(),
            Some("light")
        );

        store.set_display_mode_str("dark").unwrap();
        assert_eq!(store.display_mode(), DisplayMode::Dark);
    }

    #[test]
    fn test_set_mood_score_reclassifies() {
        let (store, _) = memory_store();

        store.set_mood_score(score(35.0));
        assert_eq!(store.mood_state(), MoodState::Bullish);
        assert_eq!(store.state().label(), "Bullish");
        assert_eq!(store.state().icon(), MoodIcon::TrendingUp);

        store.set_mood_score(score(-72.0));
        assert_eq!(store.mood_state(), MoodState::Extreme);
        assert_eq!(store.mood_score().unwrap().overall, -72.0);
    }

    #[test]
    fn test_non_finite_score_is_handled() {
        let (store, _) = memory_store();

        store.set_mood_score(score(f64::NAN));
        assert_eq!(store.mood_state(), MoodState::Neutral);

        store.set_mood_score(score(f64::INFINITY));
        assert_eq!(store.mood_state(), MoodState::Extreme);
    }

    #[test]
    fn test_order_independence() {
        let (a, _) = memory_store();
        a.set_display_mode(DisplayMode::Light);
        a.set_mood_score(score(-30.0));

        let (b, _) = memory_store();
        b.set_mood_score(score(-30.0));
        b.set_display_mode(DisplayMode::Light);

        assert_eq!(a.bundle(), b.bundle());
        assert_eq!(a.bundle().mood, MoodState::Bearish);
        assert_eq!(a.bundle().appearance, Appearance::Light);
    }

    #[test]
    fn test_bundle_consistent_for_every_pair() {
        let (store, _) = memory_store();
        for mode in DisplayMode::all() {
            for overall in [0.0, -30.0, 30.0, 80.0] {
                store.set_display_mode(*mode);
                store.set_mood_score(score(overall));

                let state = store.state();
                let expected =
                    ThemeBundle::resolve(store.table(), mode.appearance(), state.mood_state);
                assert_eq!(state.bundle, expected);
                assert_eq!(state.bundle.source, CellSource::Exact);
            }
        }
    }

    #[test]
    fn test_listener_sees_every_transition() {
        let (store, _) = memory_store();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        store.subscribe(move |state: &ThemeState| {
            sink.lock().unwrap().push((state.display_mode, state.mood_state));
        });

        store.set_mood_score(score(20.0));
        store.set_display_mode(DisplayMode::Light);
        store.set_display_mode(DisplayMode::Light);
        store.set_mood_score(score(-20.0));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (DisplayMode::Dynamic, MoodState::Neutral),
                (DisplayMode::Dynamic, MoodState::Bullish),
                (DisplayMode::Light, MoodState::Bullish),
                (DisplayMode::Light, MoodState::Bearish),
            ]
        );
    }

    #[test]
    fn test_identical_score_is_noop() {
        let (store, _) = memory_store();
        store.set_mood_score(score(5.0));
        store.set_mood_score(score(5.0));
        assert_eq!(store.state().revision, 1);
    }

    #[test]
    fn test_identical_nan_score_is_noop() {
        let (store, _) = memory_store();
        let nan = score(f64::NAN);
        store.set_mood_score(nan);
        store.set_mood_score(nan);
        assert_eq!(store.state().revision, 1);
        assert_eq!(store.mood_state(), MoodState::Neutral);
    }

    #[test]
    fn test_listener_callback_into_store_is_refused() {
        let store = Arc::new(ThemeStore::new(Arc::new(MemoryPreferences::new())));

        let inner = Arc::clone(&store);
        let counts = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&counts);
        store.subscribe(move |state: &ThemeState| {
            inner.set_mood_score(score(90.0));
            inner.set_display_mode(DisplayMode::Light);
            assert!(!inner.unsubscribe("missing"));
            inner.subscribe(|_: &ThemeState| {});
            sink.lock().unwrap().push(inner.listener_count());
            // Reads only touch the state lock
            assert_eq!(inner.state().revision, state.revision);
        });

        store.set_mood_score(score(-20.0));

        let state = store.state();
        assert_eq!(state.revision, 1);
        assert_eq!(state.mood_state, MoodState::Bearish);
        assert_eq!(state.display_mode, DisplayMode::Dynamic);
        assert_eq!(store.listener_count(), 1);
        assert_eq!(*counts.lock().unwrap(), vec![0, 0]);

        // Outside a listener the store accepts changes again
        store.set_mood_score(score(90.0));
        assert_eq!(store.mood_state(), MoodState::Extreme);
    }

    #[test]
    fn test_listener_may_drive_another_store() {
        let upstream = ThemeStore::new(Arc::new(MemoryPreferences::new()));
        let downstream = Arc::new(ThemeStore::new(Arc::new(MemoryPreferences::new())));

        let mirror = Arc::clone(&downstream);
        upstream.subscribe(move |state: &ThemeState| {
            if let Some(score) = state.mood_score {
                mirror.set_mood_score(score);
            }
        });

        upstream.set_mood_score(score(-60.0));
        assert_eq!(downstream.mood_state(), MoodState::Extreme);
        assert_eq!(downstream.state().revision, 1);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let (store, _) = memory_store();
        let count = Arc::new(Mutex::new(0));

        let counter = Arc::clone(&count);
        let id = store.subscribe(move |_: &ThemeState| {
            *counter.lock().unwrap() += 1;
        });
        assert_eq!(store.listener_count(), 1);

        assert!(store.unsubscribe(&id));
        store.set_mood_score(score(40.0));

        // Only the immediate call on subscribe
        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_watch_delivers_latest() {
        let (store, _) = memory_store();
        let mut rx = store.watch();

        store.set_mood_score(score(12.0));
        store.set_display_mode(DisplayMode::Light);

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.mood_state, MoodState::Bullish);
        assert_eq!(second.display_mode, DisplayMode::Light);
        assert_eq!(second.revision, 2);
    }
}
