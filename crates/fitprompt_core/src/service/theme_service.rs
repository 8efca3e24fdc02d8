//! Dark-mode preference service.
//!
//! # Responsibility
//! - Own the single dark/light display flag for the application.
//! - Persist every change to the key-value store before it becomes visible.
//! - Notify subscribers synchronously after each mutation.
//!
//! # Invariants
//! - After a successful `set_dark_mode`/`toggle`, the in-memory flag and the
//!   stored `"true"`/`"false"` string agree.
//! - A failed store write leaves the flag untouched and notifies nobody.
//! - Every mutation notifies, including a set to the current value.
//! - Each registration is invoked at most once per notification pass.
//!
//! # Re-entrancy
//! Listeners may call back into the service. A nested `set_dark_mode` or
//! `toggle` runs its own complete notification pass before the outer pass
//! resumes. The outer pass keeps walking the registrations that existed when
//! it started, skipping any removed in the meantime. Listeners added during a
//! pass, including a handle removed and subscribed again, first run on the
//! next pass.

use crate::store::{KeyValueStore, StoreError};
use log::{debug, warn};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::{Rc, Weak};

/// Store key holding the persisted preference.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Flag value used when nothing has been persisted yet.
pub const DEFAULT_DARK_MODE: bool = true;

/// Zero-argument change callback. Listeners read the new value themselves.
pub type Listener = Rc<dyn Fn()>;

pub type ThemeResult<T> = Result<T, ThemeError>;

/// Error returned by mutating theme operations.
#[derive(Debug)]
pub enum ThemeError {
    Store(StoreError),
}

impl Display for ThemeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "failed to persist theme preference: {err}"),
        }
    }
}

impl Error for ThemeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ThemeError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Opaque identity of one listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
struct ListenerRegistry {
    next_id: u64,
    entries: BTreeMap<ListenerId, Listener>,
}

impl ListenerRegistry {
    /// Registers `listener`, reusing the existing id when the same handle is
    /// already present.
    fn insert(&mut self, listener: Listener) -> ListenerId {
        if let Some(id) = self
            .entries
            .iter()
            .find_map(|(id, existing)| Rc::ptr_eq(existing, &listener).then_some(*id))
        {
            return id;
        }

        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, listener);
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        self.entries.remove(&id).is_some()
    }

    fn contains(&self, id: ListenerId) -> bool {
        self.entries.contains_key(&id)
    }

    fn snapshot(&self) -> Vec<(ListenerId, Listener)> {
        self.entries
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect()
    }
}

/// Handle returned by [`ThemeService::subscribe`].
///
/// Dropping the handle does not unsubscribe. Call [`Subscription::unsubscribe`]
/// explicitly; it is idempotent and stays safe after the service is gone.
#[derive(Clone)]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<RefCell<ListenerRegistry>>,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Removes this registration. Extra calls are no-ops.
    pub fn unsubscribe(&self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let removed = registry.borrow_mut().remove(self.id);
        if removed {
            debug!(
                "event=theme_unsubscribe module=theme status=ok listener_id={}",
                self.id.0
            );
        }
    }

    /// Returns whether the registration is still live.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().contains(self.id))
    }
}

/// Single source of truth for dark/light display mode.
///
/// Single-threaded by construction (`!Send`); pass a reference to the
/// consumers that need it.
pub struct ThemeService<S: KeyValueStore> {
    store: S,
    dark_mode: Cell<bool>,
    listeners: Rc<RefCell<ListenerRegistry>>,
}

impl<S: KeyValueStore> ThemeService<S> {
    /// Loads the persisted preference from `store`.
    ///
    /// Missing value means dark mode. Only the exact string `"true"` enables
    /// it otherwise. A failing read is logged and treated as missing.
    pub fn new(store: S) -> Self {
        let stored = match store.get(DARK_MODE_KEY) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=theme_load module=theme status=degraded error_code=store_read_failed error={}",
                    err
                );
                None
            }
        };
        let dark_mode = parse_stored_flag(stored.as_deref());
        debug!(
            "event=theme_load module=theme status=ok stored={} dark_mode={}",
            stored.is_some(),
            dark_mode
        );

        Self {
            store,
            dark_mode: Cell::new(dark_mode),
            listeners: Rc::new(RefCell::new(ListenerRegistry::default())),
        }
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode.get()
    }

    /// Persists `enabled`, updates the flag, then runs every listener.
    ///
    /// # Errors
    /// - `ThemeError::Store` when the write fails; no state changes.
    pub fn set_dark_mode(&self, enabled: bool) -> ThemeResult<()> {
        if let Err(err) = self.store.set(DARK_MODE_KEY, encode_flag(enabled)) {
            warn!(
                "event=theme_set module=theme status=error dark_mode={} error_code=store_write_failed error={}",
                enabled, err
            );
            return Err(err.into());
        }
        self.dark_mode.set(enabled);

        let notified = self.notify();
        debug!(
            "event=theme_set module=theme status=ok dark_mode={} notified={}",
            enabled, notified
        );
        Ok(())
    }

    /// Flips the flag; same contract as [`Self::set_dark_mode`].
    pub fn toggle(&self) -> ThemeResult<()> {
        self.set_dark_mode(!self.is_dark_mode())
    }

    /// Registers `listener` with set semantics on handle identity.
    ///
    /// Subscribing a clone of an already registered `Rc` returns a handle to
    /// the existing registration instead of adding a second one.
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        let id = self.listeners.borrow_mut().insert(listener);
        debug!(
            "event=theme_subscribe module=theme status=ok listener_id={}",
            id.0
        );
        Subscription {
            id,
            registry: Rc::downgrade(&self.listeners),
        }
    }

    /// Registers a fresh closure. Each call creates a distinct registration.
    pub fn subscribe_fn(&self, listener: impl Fn() + 'static) -> Subscription {
        self.subscribe(Rc::new(listener))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn notify(&self) -> usize {
        // No borrow is held while a listener runs, so listeners may
        // subscribe, unsubscribe or mutate the flag.
        let snapshot = self.listeners.borrow().snapshot();
        let mut notified = 0;
        for (id, listener) in snapshot {
            if !self.listeners.borrow().contains(id) {
                continue;
            }
            listener();
            notified += 1;
        }
        notified
    }
}

fn parse_stored_flag(value: Option<&str>) -> bool {
    match value {
        None => DEFAULT_DARK_MODE,
        Some(value) => value == "true",
    }
}

fn encode_flag(enabled: bool) -> &'static str {
    if enabled {
        "true"
    } else {
        "false"
    }
}
