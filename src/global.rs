//! Process-wide default registry
//!
//! Convenience layer over one [`ShortcutRegistry`] per thread, mirroring
//! the engine API as free functions. Applications that want a single
//! ambient registry use this module; anything that needs isolation (tests,
//! embedded tools) constructs its own registry instead.
//!
//! The default instance is thread-local because the engine is
//! single-threaded by design — registry handles are `Rc`-based and
//! handlers run on the thread delivering events.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use shortcut_engine::global;
//! use shortcut_engine::{KeyEvent, ShortcutOptions};
//!
//! let save = global::register(
//!     "ctrl+s",
//!     Rc::new(|_event| Ok(())),
//!     ShortcutOptions::default(),
//! )?;
//!
//! let mut event = KeyEvent::new("s");
//! event.ctrl = true;
//! global::dispatch(&event);
//!
//! save.unregister();
//! # shortcut_engine::global::clear_all();
//! # Ok::<(), shortcut_engine::RegistryError>(())
//! ```

use crate::core::{
    Diagnostics, Handler, KeyEvent, KeySpec, RegistryError, ShortcutOptions, ShortcutRegistry,
    UnregisterBy, Unregistration,
};

thread_local! {
    static DEFAULT: ShortcutRegistry = ShortcutRegistry::new();
}

/// Run `f` against the calling thread's default registry.
pub fn with_default<R>(f: impl FnOnce(&ShortcutRegistry) -> R) -> R {
    DEFAULT.with(|registry| f(registry))
}

/// Register a handler on the default registry.
///
/// See [`ShortcutRegistry::register`].
pub fn register(
    keys: impl Into<KeySpec>,
    handler: Handler,
    options: ShortcutOptions,
) -> Result<Unregistration, RegistryError> {
    with_default(|registry| registry.register(keys, handler, options))
}

/// Alias for [`register`].
pub use self::register as on;

/// Remove registrations from the default registry.
///
/// See [`ShortcutRegistry::unregister`].
pub fn unregister(selector: impl Into<UnregisterBy>) {
    with_default(|registry| registry.unregister(selector));
}

/// Empty the default registry and detach its event source.
pub fn clear_all() {
    with_default(|registry| registry.clear_all());
}

/// Toggle the default registry's dispatch gate.
pub fn set_enabled(enabled: bool) {
    with_default(|registry| registry.set_enabled(enabled));
}

/// Open the default registry's dispatch gate.
pub fn enable() {
    set_enabled(true);
}

/// Close the default registry's dispatch gate.
pub fn disable() {
    set_enabled(false);
}

/// Whether the default registry's dispatch gate is open.
pub fn is_enabled() -> bool {
    with_default(|registry| registry.is_enabled())
}

/// Dispatch an event against the default registry.
pub fn dispatch(event: &KeyEvent) {
    with_default(|registry| registry.dispatch(event));
}

/// Read-only snapshot of the default registry's state.
pub fn diagnostics() -> Diagnostics {
    with_default(|registry| registry.diagnostics())
}
