// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shortcut Engine
//!
//! A keyboard shortcut engine: normalises platform keyboard events into
//! canonical key-combination identifiers and dispatches registered
//! callbacks when those combinations occur, with per-handler policy
//! controls.
//!
//! # Features
//!
//! - **Canonical combos:** Any spelling of a chord ("Shift+Ctrl+K",
//!   "ctrl+shift+k", a live keydown event) resolves to one canonical form
//! - **Combo index:** O(1) average-case lookup from event to handlers
//! - **Dispatch policy:** Per-registration control over input-field
//!   suppression, key-repeat suppression and event interception
//! - **Lazy subscription:** The single event-source subscription attaches
//!   with the first registration and detaches with the last
//! - **Re-entrant dispatch:** Handlers may register and unregister
//!   shortcuts mid-dispatch without corrupting iteration
//! - **Headless-safe:** Without a keyboard stream the registry still
//!   accepts and answers queries, it simply never fires
//!
//! # Architecture
//!
//! - **`core`:** Engine logic (types, normalisation, registry, dispatch)
//! - **`global`:** Process-wide default instance with a free-function API
//!
//! The engine is single-threaded by design: handlers run synchronously on
//! the thread delivering events, and registry handles are `Rc`-based.
//!
//! # Examples
//!
//! ## Registering and dispatching
//!
//! ```
//! use std::rc::Rc;
//! use shortcut_engine::{KeyEvent, ShortcutOptions, ShortcutRegistry};
//!
//! let registry = ShortcutRegistry::new();
//!
//! let open = registry.register(
//!     ["ctrl+o", "meta+o"],
//!     Rc::new(|_event| {
//!         // open the file picker
//!         Ok(())
//!     }),
//!     ShortcutOptions::default(),
//! )?;
//!
//! let mut event = KeyEvent::new("o");
//! event.ctrl = true;
//! registry.dispatch(&event);
//!
//! open.unregister();
//! # Ok::<(), shortcut_engine::RegistryError>(())
//! ```
//!
//! ## Inspecting canonical forms
//!
//! ```
//! use shortcut_engine::core::parser::normalize_combo;
//! use shortcut_engine::Platform;
//!
//! let combo = normalize_combo("CMD+Shift+P", Platform::Other);
//! assert_eq!(combo.canonical(), "shift+meta+p");
//! ```

pub mod core;
pub mod global;

// Re-export commonly used types for convenience
pub use core::{
    Combo, DiagnosticSink, Diagnostics, EventSource, FocusTarget, Handler, HeadlessSource,
    KeyEvent, KeySpec, LogSink, ManualSource, Modifier, Platform, RegistrationId, RegistryError,
    ShortcutOptions, ShortcutRegistry, UnregisterBy, Unregistration,
};
