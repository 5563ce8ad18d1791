//! Shortcut registry and dispatcher
//!
//! This module implements the stateful half of the engine: a registry of
//! handlers keyed by canonical [`Combo`], the single event-source
//! subscription tied to registry emptiness, and the dispatch protocol that
//! resolves an incoming event to its bound handlers under per-handler
//! policy.
//!
//! # Indexing
//! Two coupled mappings form a bidirectional index:
//! - id → entry (the owner; removal here is definitional deletion)
//! - combo → ordered id set (derived; an id appears in a combo's set iff
//!   that combo is in the entry's list, and empty sets are dropped)
//!
//! Lookup per event is O(1) average case on the combo hash; dispatch cost
//! is proportional to the handlers bound to that one combo.
//!
//! # Re-entrancy
//! Handlers may register and unregister shortcuts — including ones bound to
//! the combo currently dispatching — because dispatch iterates a snapshot
//! of the bound id set and holds no registry borrow while a handler runs.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::{Rc, Weak};

use serde::Serialize;

use crate::core::error::RegistryError;
use crate::core::listener::{EventSource, HeadlessSource, ManualSource};
use crate::core::parser::{event_to_combo, normalize_combo};
use crate::core::types::{
    Combo, KeyEvent, KeySpec, Platform, RegistrationId, ShortcutOptions,
};

/// Callback invoked when a registered combo fires.
///
/// Shared (`Rc`) so the same value can be registered and later used as an
/// [`UnregisterBy::Handler`] selector; selector matching compares pointer
/// identity, the analogue of comparing function references.
pub type Handler = Rc<dyn Fn(&KeyEvent) -> anyhow::Result<()>>;

/// Receives handler faults caught at the dispatch boundary.
///
/// A fault never propagates: sibling handlers bound to the same combo still
/// run and registry state stays consistent. Swap the sink per registry to
/// capture faults in tests or route them into an application's reporting.
pub trait DiagnosticSink {
    /// Called once per failing handler invocation.
    fn handler_error(&self, id: RegistrationId, combo: &Combo, error: anyhow::Error);
}

/// Default sink: routes handler faults through the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn handler_error(&self, id: RegistrationId, combo: &Combo, error: anyhow::Error) {
        log::error!("shortcut handler {} for '{}' failed: {:#}", id, combo, error);
    }
}

/// Selector for [`ShortcutRegistry::unregister`]
///
/// The three removal shapes, made explicit rather than inferred from the
/// argument's runtime type.
pub enum UnregisterBy {
    /// Remove exactly the registration with this identity.
    Id(RegistrationId),
    /// Remove every registration whose handler is pointer-identical to
    /// this one. Duplicate registrations of one handler are all removed.
    Handler(Handler),
    /// Canonicalise each string and remove every registration indexed under
    /// any of them — **in full**. A registration bound to two combos loses
    /// both when either is named: registrations are atomic units, matching
    /// the removal the registration's own guard performs.
    Combos(KeySpec),
}

impl From<RegistrationId> for UnregisterBy {
    fn from(id: RegistrationId) -> Self {
        UnregisterBy::Id(id)
    }
}

impl From<Handler> for UnregisterBy {
    fn from(handler: Handler) -> Self {
        UnregisterBy::Handler(handler)
    }
}

impl From<&Handler> for UnregisterBy {
    fn from(handler: &Handler) -> Self {
        UnregisterBy::Handler(Rc::clone(handler))
    }
}

impl From<KeySpec> for UnregisterBy {
    fn from(spec: KeySpec) -> Self {
        UnregisterBy::Combos(spec)
    }
}

impl From<&str> for UnregisterBy {
    fn from(key: &str) -> Self {
        UnregisterBy::Combos(key.into())
    }
}

impl From<String> for UnregisterBy {
    fn from(key: String) -> Self {
        UnregisterBy::Combos(key.into())
    }
}

impl From<Vec<String>> for UnregisterBy {
    fn from(keys: Vec<String>) -> Self {
        UnregisterBy::Combos(keys.into())
    }
}

impl From<Vec<&str>> for UnregisterBy {
    fn from(keys: Vec<&str>) -> Self {
        UnregisterBy::Combos(keys.into())
    }
}

impl<const N: usize> From<[&str; N]> for UnregisterBy {
    fn from(keys: [&str; N]) -> Self {
        UnregisterBy::Combos(keys.into())
    }
}

/// One registered (combo list, handler, options) unit.
struct Entry {
    combos: Vec<Combo>,
    handler: Handler,
    options: ShortcutOptions,
}

struct RegistryState {
    next_id: u64,
    entries: HashMap<RegistrationId, Entry>,
    combo_index: HashMap<Combo, BTreeSet<RegistrationId>>,
    attached: bool,
    enabled: bool,
    platform: Platform,
    source: Box<dyn EventSource>,
    sink: Rc<dyn DiagnosticSink>,
}

impl RegistryState {
    fn attach(&mut self) {
        if self.attached {
            return;
        }
        if !self.source.is_available() {
            return;
        }
        self.source.attach();
        self.attached = true;
    }

    fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.source.detach();
        self.attached = false;
    }

    /// Remove one entry and unindex all its combos. Unknown ids are no-ops.
    fn remove_entry(&mut self, id: RegistrationId) {
        let Some(entry) = self.entries.remove(&id) else {
            return;
        };

        for combo in &entry.combos {
            if let Some(bound) = self.combo_index.get_mut(combo) {
                bound.remove(&id);
                // No tombstones: a combo with nothing bound leaves the index
                if bound.is_empty() {
                    self.combo_index.remove(combo);
                }
            }
        }
    }

    fn detach_if_empty(&mut self) {
        if self.entries.is_empty() {
            self.detach();
        }
    }
}

/// Keyboard shortcut registry and dispatcher.
///
/// The handle is cheap to clone (shared state inside) and single-threaded
/// by design; handlers run synchronously on the thread delivering events.
///
/// # Example
/// ```
/// use std::rc::Rc;
/// use shortcut_engine::core::{KeyEvent, ShortcutOptions, ShortcutRegistry};
///
/// let registry = ShortcutRegistry::new();
/// let save = registry.register(
///     "ctrl+s",
///     Rc::new(|_event| {
///         // persist the document
///         Ok(())
///     }),
///     ShortcutOptions { prevent_default: true, ..Default::default() },
/// )?;
///
/// let mut event = KeyEvent::new("s");
/// event.ctrl = true;
/// registry.dispatch(&event);
/// assert!(event.default_prevented());
///
/// save.unregister();
/// # Ok::<(), shortcut_engine::core::RegistryError>(())
/// ```
#[derive(Clone)]
pub struct ShortcutRegistry {
    state: Rc<RefCell<RegistryState>>,
}

impl ShortcutRegistry {
    /// Create a registry with caller-driven event delivery.
    pub fn new() -> Self {
        Self::with_source(Box::new(ManualSource))
    }

    /// Create a registry for an environment with no keyboard stream.
    ///
    /// Registrations are accepted and queryable but the listener never
    /// attaches and dispatch never fires.
    pub fn headless() -> Self {
        Self::with_source(Box::new(HeadlessSource))
    }

    /// Create a registry over a custom event source.
    pub fn with_source(source: Box<dyn EventSource>) -> Self {
        Self {
            state: Rc::new(RefCell::new(RegistryState {
                next_id: 1,
                entries: HashMap::new(),
                combo_index: HashMap::new(),
                attached: false,
                enabled: true,
                platform: Platform::current(),
                source,
                sink: Rc::new(LogSink),
            })),
        }
    }

    /// Override the platform used to resolve the `mod` token.
    pub fn set_platform(&self, platform: Platform) {
        self.state.borrow_mut().platform = platform;
    }

    /// Replace the sink receiving handler faults.
    pub fn set_diagnostic_sink(&self, sink: Rc<dyn DiagnosticSink>) {
        self.state.borrow_mut().sink = sink;
    }

    /// Register a handler for one or more combos.
    ///
    /// Every supplied key is canonicalised, so any spelling of a combo
    /// matches any event producing the same canonical form. All combos of
    /// one registration share the handler and the options record. The
    /// event source is attached on the first registration.
    ///
    /// Returns an [`Unregistration`] guard that removes exactly this
    /// registration when invoked.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NoKeys`] when the key specification is empty.
    pub fn register(
        &self,
        keys: impl Into<KeySpec>,
        handler: Handler,
        options: ShortcutOptions,
    ) -> Result<Unregistration, RegistryError> {
        let keys: KeySpec = keys.into();
        if keys.is_empty() {
            return Err(RegistryError::NoKeys);
        }

        let mut state = self.state.borrow_mut();

        let id = RegistrationId(state.next_id);
        state.next_id += 1;

        let platform = state.platform;
        let combos: Vec<Combo> = keys.iter().map(|k| normalize_combo(k, platform)).collect();

        for combo in &combos {
            state.combo_index.entry(combo.clone()).or_default().insert(id);
        }
        state.entries.insert(
            id,
            Entry {
                combos,
                handler,
                options,
            },
        );

        state.attach();

        Ok(Unregistration {
            state: Rc::downgrade(&self.state),
            id,
        })
    }

    /// Remove registrations matching the selector.
    ///
    /// Unknown ids, handlers and combos are silent no-ops so teardown paths
    /// can unregister unconditionally. When the last registration goes, the
    /// event source is detached.
    pub fn unregister(&self, selector: impl Into<UnregisterBy>) {
        let mut state = self.state.borrow_mut();

        match selector.into() {
            UnregisterBy::Id(id) => state.remove_entry(id),

            UnregisterBy::Handler(handler) => {
                let target = Rc::as_ptr(&handler) as *const ();
                let matched: Vec<RegistrationId> = state
                    .entries
                    .iter()
                    .filter(|(_, entry)| Rc::as_ptr(&entry.handler) as *const () == target)
                    .map(|(id, _)| *id)
                    .collect();

                for id in matched {
                    state.remove_entry(id);
                }
            }

            UnregisterBy::Combos(spec) => {
                for raw in spec.iter() {
                    let combo = normalize_combo(raw, state.platform);
                    let bound: Vec<RegistrationId> = state
                        .combo_index
                        .get(&combo)
                        .map(|ids| ids.iter().copied().collect())
                        .unwrap_or_default();

                    // Whole-registration removal: each matched entry goes
                    // away together with its other combos
                    for id in bound {
                        state.remove_entry(id);
                    }
                }
            }
        }

        state.detach_if_empty();
    }

    /// Empty the registry unconditionally and detach the event source.
    ///
    /// Full-state reset for app teardown and test isolation.
    pub fn clear_all(&self) {
        let mut state = self.state.borrow_mut();
        state.entries.clear();
        state.combo_index.clear();
        state.detach();
    }

    /// Toggle the global dispatch gate.
    ///
    /// Disabling does not alter registry contents and keeps the listener
    /// attached; dispatch simply returns immediately.
    pub fn set_enabled(&self, enabled: bool) {
        self.state.borrow_mut().enabled = enabled;
    }

    /// Convenience form of `set_enabled(true)`.
    pub fn enable(&self) {
        self.set_enabled(true);
    }

    /// Convenience form of `set_enabled(false)`.
    pub fn disable(&self) {
        self.set_enabled(false);
    }

    /// Whether the global dispatch gate is open.
    pub fn is_enabled(&self) -> bool {
        self.state.borrow().enabled
    }

    /// Resolve an incoming event and fire every bound handler that passes
    /// its policy filter.
    ///
    /// Runs once per keydown notification from the event source. Events
    /// that are part of an IME composition, map to no recognised combo, or
    /// match no registration are discarded silently.
    ///
    /// Iteration walks a snapshot of the bound id set taken at dispatch
    /// start; each id is then re-resolved live, so an entry removed by an
    /// earlier handler in the same dispatch no longer fires, and entries
    /// added mid-dispatch wait for the next event.
    pub fn dispatch(&self, event: &KeyEvent) {
        {
            let state = self.state.borrow();
            if !state.enabled || !state.attached {
                return;
            }
        }

        if event.composing {
            return;
        }

        let combo = event_to_combo(event);
        if combo.is_empty() {
            return;
        }

        let (snapshot, sink) = {
            let state = self.state.borrow();
            let Some(bound) = state.combo_index.get(&combo) else {
                return;
            };
            (
                bound.iter().copied().collect::<Vec<RegistrationId>>(),
                Rc::clone(&state.sink),
            )
        };

        let in_input = event.target.accepts_text();

        for id in snapshot {
            let resolved = {
                let state = self.state.borrow();
                state
                    .entries
                    .get(&id)
                    .map(|entry| (Rc::clone(&entry.handler), entry.options))
            };
            let Some((handler, options)) = resolved else {
                continue;
            };

            if in_input && !options.allow_in_inputs {
                continue;
            }
            if event.repeat && !options.allow_repeat {
                continue;
            }

            if options.prevent_default {
                event.prevent_default();
            }
            if options.stop_propagation {
                event.stop_propagation();
            }

            // No registry borrow is held here: the handler may re-enter
            if let Err(error) = handler(event) {
                sink.handler_error(id, &combo, error);
            }
        }
    }

    /// Read-only snapshot of registry state.
    ///
    /// Diagnostics and testing aid; not a stability-guaranteed contract.
    pub fn diagnostics(&self) -> Diagnostics {
        let state = self.state.borrow();

        let mut ids: Vec<RegistrationId> = state.entries.keys().copied().collect();
        ids.sort();

        let mut combos: Vec<String> = state.combo_index.keys().map(Combo::canonical).collect();
        combos.sort();

        Diagnostics {
            enabled: state.enabled,
            listener_attached: state.attached,
            ids,
            combos,
        }
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard returned by [`ShortcutRegistry::register`].
///
/// Invoking [`unregister`](Unregistration::unregister) removes exactly the
/// registration it was issued for; calling it again, or after the registry
/// has gone away, is a no-op. Dropping the guard deliberately does
/// **not** unregister — removal is always an explicit act.
#[derive(Debug)]
pub struct Unregistration {
    state: Weak<RefCell<RegistryState>>,
    id: RegistrationId,
}

impl Unregistration {
    /// The identity of the registration this guard controls.
    pub fn id(&self) -> RegistrationId {
        self.id
    }

    /// Remove the registration. Idempotent.
    pub fn unregister(&self) {
        if let Some(state) = self.state.upgrade() {
            let mut state = state.borrow_mut();
            state.remove_entry(self.id);
            state.detach_if_empty();
        }
    }
}

/// Snapshot returned by [`ShortcutRegistry::diagnostics`].
#[derive(Clone, Debug, Serialize)]
pub struct Diagnostics {
    /// Global dispatch gate
    pub enabled: bool,
    /// Whether the event-source subscription is currently attached
    pub listener_attached: bool,
    /// Live registration ids, ascending
    pub ids: Vec<RegistrationId>,
    /// Currently indexed canonical combos, sorted
    pub combos: Vec<String>,
}
