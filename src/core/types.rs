//! src/core/types.rs
//!
//! Core type definitions for shortcut handling
//!
//! This module defines the fundamental types used throughout the crate:
//! - `Modifier`: Keyboard modifier keys (CTRL, ALT, SHIFT, META)
//! - `Combo`: A canonical key combination (ordered modifiers + optional key)
//! - `KeyEvent`: A keyboard event as delivered by the embedding event loop
//! - `FocusTarget`: Classification of the element holding focus
//! - `ShortcutOptions`: Per-registration dispatch policy
//! - `RegistrationId` / `KeySpec`: Registration identity and key input
//!
//! All value types implement serialization and are normalised on
//! construction so equality and hashing agree with their canonical
//! string form.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;

/// Keyboard modifier keys
///
/// Represents the four standard modifier keys used in combos. Variants are
/// declared in canonical order so the derived `Ord` yields the fixed
/// modifier sequence {ctrl, alt, shift, meta}.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Modifier {
    /// Control key
    Ctrl,
    /// Alt/Option key
    Alt,
    /// Shift key
    Shift,
    /// Meta/Command/Windows key
    Meta,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Ctrl => write!(f, "ctrl"),
            Modifier::Alt => write!(f, "alt"),
            Modifier::Shift => write!(f, "shift"),
            Modifier::Meta => write!(f, "meta"),
        }
    }
}

/// Host platform family, as far as modifier conventions are concerned
///
/// Drives resolution of the `mod` token: Apple-family platforms use the
/// command (meta) key as the primary modifier, everything else uses ctrl.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Platform {
    /// macOS, iOS and friends
    AppleLike,
    /// Everything else (also the fallback when the platform is unknown)
    Other,
}

impl Platform {
    /// Resolve the platform from the compile target.
    pub fn current() -> Self {
        if cfg!(any(target_os = "macos", target_os = "ios")) {
            Platform::AppleLike
        } else {
            Platform::Other
        }
    }

    /// The modifier the `mod` token resolves to on this platform.
    pub fn primary_modifier(self) -> Modifier {
        match self {
            Platform::AppleLike => Modifier::Meta,
            Platform::Other => Modifier::Ctrl,
        }
    }
}

/// A canonical key combination
///
/// Represents a combo like ctrl+shift+k. Implements Hash and Eq for use as
/// the registry index key.
///
/// # Hash Implementation
/// The hash is based on the **sorted, deduplicated** modifier list plus the
/// lowercased key. This ensures that different spellings of the same combo
/// produce the same hash (e.g., Shift+Ctrl+K and ctrl+shift+k are
/// identical), which is the invariant the dispatcher's lookup relies on.
///
/// A combo may be modifiers-only (a bare modifier press such as
/// ctrl+shift), key-only, or empty.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Combo {
    /// Modifier keys, stored in canonical order
    pub modifiers: Vec<Modifier>,

    /// Main key name, if any (e.g., "k", "enter", "left")
    /// Always stored in lowercase for consistent hashing
    pub key: Option<String>,
}

impl Combo {
    /// Create a new Combo with normalised data
    ///
    /// Normalisation includes:
    /// - Sorting modifiers into canonical order
    /// - Removing duplicate modifiers
    /// - Lowercasing the key; an empty key name counts as no key
    pub fn new(mut modifiers: Vec<Modifier>, key: Option<String>) -> Self {
        modifiers.sort();
        modifiers.dedup();

        let key = key.map(|k| k.to_lowercase()).filter(|k| !k.is_empty());

        Self { modifiers, key }
    }

    /// The empty combo. Never matches anything; the dispatcher discards it.
    pub fn empty() -> Self {
        Self {
            modifiers: Vec::new(),
            key: None,
        }
    }

    /// True when the combo carries neither modifiers nor a key.
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty() && self.key.is_none()
    }

    /// The canonical string form, e.g. "ctrl+shift+k".
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mods = self
            .modifiers
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join("+");

        match (mods.is_empty(), &self.key) {
            (true, Some(key)) => write!(f, "{}", key),
            (false, Some(key)) => write!(f, "{}+{}", mods, key),
            (_, None) => write!(f, "{}", mods),
        }
    }
}

/// Classification of the element holding focus when an event fired
///
/// The dispatcher suppresses shortcuts while an input-capable element has
/// focus unless a registration opts in via `allow_in_inputs`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum FocusTarget {
    /// Anything that does not accept text (the default)
    #[default]
    Other,
    /// A text input field
    TextInput,
    /// A multi-line text area
    TextArea,
    /// An element flagged content-editable
    Editable,
}

impl FocusTarget {
    /// True for targets that accept typed text.
    pub fn accepts_text(self) -> bool {
        !matches!(self, FocusTarget::Other)
    }
}

/// A keyboard event as seen by the dispatcher
///
/// The embedding event loop builds one of these per keydown notification
/// and feeds it to the registry's dispatch operation. Handlers receive the
/// same event by reference; the two interception flags use interior
/// mutability so the dispatcher can set them while handlers hold a shared
/// borrow.
#[derive(Clone, Debug, Default)]
pub struct KeyEvent {
    /// Platform key name (e.g., "k", "Escape", "ArrowLeft", " ")
    pub key: String,

    /// Control key held
    pub ctrl: bool,
    /// Alt key held
    pub alt: bool,
    /// Shift key held
    pub shift: bool,
    /// Meta key held
    pub meta: bool,

    /// Generated by holding the key down, not by the initial press
    pub repeat: bool,

    /// Part of an in-progress IME composition
    pub composing: bool,

    /// What held focus when the event fired
    pub target: FocusTarget,

    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl KeyEvent {
    /// Create an event for the given key name with nothing held.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// The held modifiers, in canonical order.
    pub fn held_modifiers(&self) -> Vec<Modifier> {
        let mut mods = Vec::new();
        if self.ctrl {
            mods.push(Modifier::Ctrl);
        }
        if self.alt {
            mods.push(Modifier::Alt);
        }
        if self.shift {
            mods.push(Modifier::Shift);
        }
        if self.meta {
            mods.push(Modifier::Meta);
        }
        mods
    }

    /// Suppress the platform's default action for this event.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Whether the default action has been suppressed.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    /// Halt further propagation of this event.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    /// Whether propagation has been halted.
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

/// Per-registration dispatch policy
///
/// All fields default to false; a missing field in a serialised options
/// record falls back to the default.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ShortcutOptions {
    /// Fire even while an input-capable element has focus
    pub allow_in_inputs: bool,
    /// Suppress the event's default action before invoking the handler
    pub prevent_default: bool,
    /// Halt further propagation of the event before invoking the handler
    pub stop_propagation: bool,
    /// Fire on key-repeat notifications, not only the initial press
    pub allow_repeat: bool,
}

/// Opaque identity of one registration
///
/// Assigned monotonically by the registry; never reused within a registry's
/// lifetime.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct RegistrationId(pub(crate) u64);

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One or more raw combo strings supplied at registration time
///
/// Converts from a single string or any common sequence-of-strings shape.
/// An empty spec is the invalid-registration case.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeySpec(Vec<String>);

impl KeySpec {
    /// True when no combo strings were supplied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the raw combo strings.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for KeySpec {
    fn from(key: &str) -> Self {
        Self(vec![key.to_string()])
    }
}

impl From<String> for KeySpec {
    fn from(key: String) -> Self {
        Self(vec![key])
    }
}

impl From<Vec<String>> for KeySpec {
    fn from(keys: Vec<String>) -> Self {
        Self(keys)
    }
}

impl From<Vec<&str>> for KeySpec {
    fn from(keys: Vec<&str>) -> Self {
        Self(keys.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for KeySpec {
    fn from(keys: &[&str]) -> Self {
        Self(keys.iter().map(|k| k.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for KeySpec {
    fn from(keys: [&str; N]) -> Self {
        Self(keys.iter().map(|k| k.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_display() {
        assert_eq!(format!("{}", Modifier::Ctrl), "ctrl");
        assert_eq!(format!("{}", Modifier::Meta), "meta");
    }

    #[test]
    fn test_modifier_canonical_order() {
        let mut mods = vec![Modifier::Meta, Modifier::Shift, Modifier::Ctrl];
        mods.sort();
        assert_eq!(mods, vec![Modifier::Ctrl, Modifier::Shift, Modifier::Meta]);
    }

    #[test]
    fn test_combo_normalization() {
        // Order and case don't matter
        let combo1 = Combo::new(vec![Modifier::Shift, Modifier::Ctrl], Some("K".to_string()));
        let combo2 = Combo::new(vec![Modifier::Ctrl, Modifier::Shift], Some("k".to_string()));

        assert_eq!(combo1, combo2);
        assert_eq!(combo1.canonical(), "ctrl+shift+k");
    }

    #[test]
    fn test_combo_dedups_modifiers() {
        let combo = Combo::new(vec![Modifier::Ctrl, Modifier::Ctrl], Some("s".to_string()));
        assert_eq!(combo.modifiers.len(), 1);
    }

    #[test]
    fn test_combo_display_shapes() {
        let both = Combo::new(vec![Modifier::Ctrl], Some("s".to_string()));
        assert_eq!(both.to_string(), "ctrl+s");

        let mods_only = Combo::new(vec![Modifier::Shift, Modifier::Ctrl], None);
        assert_eq!(mods_only.to_string(), "ctrl+shift");

        let key_only = Combo::new(vec![], Some("enter".to_string()));
        assert_eq!(key_only.to_string(), "enter");

        assert_eq!(Combo::empty().to_string(), "");
        assert!(Combo::empty().is_empty());
    }

    #[test]
    fn test_combo_empty_key_name_counts_as_no_key() {
        let combo = Combo::new(vec![Modifier::Ctrl], Some(String::new()));
        assert_eq!(combo.to_string(), "ctrl");
    }

    #[test]
    fn test_options_default_to_false() {
        let options = ShortcutOptions::default();
        assert!(!options.allow_in_inputs);
        assert!(!options.prevent_default);
        assert!(!options.stop_propagation);
        assert!(!options.allow_repeat);
    }

    #[test]
    fn test_focus_target_classification() {
        assert!(!FocusTarget::Other.accepts_text());
        assert!(FocusTarget::TextInput.accepts_text());
        assert!(FocusTarget::TextArea.accepts_text());
        assert!(FocusTarget::Editable.accepts_text());
    }

    #[test]
    fn test_key_event_held_modifiers() {
        let mut event = KeyEvent::new("s");
        event.meta = true;
        event.ctrl = true;

        assert_eq!(event.held_modifiers(), vec![Modifier::Ctrl, Modifier::Meta]);
    }

    #[test]
    fn test_key_event_interception_flags() {
        let event = KeyEvent::new("p");
        assert!(!event.default_prevented());
        assert!(!event.propagation_stopped());

        event.prevent_default();
        event.stop_propagation();
        assert!(event.default_prevented());
        assert!(event.propagation_stopped());
    }

    #[test]
    fn test_key_spec_conversions() {
        assert_eq!(KeySpec::from("ctrl+s").iter().count(), 1);
        assert_eq!(KeySpec::from(["ctrl+s", "meta+s"]).iter().count(), 2);
        assert_eq!(KeySpec::from(vec!["a", "b", "c"]).iter().count(), 3);
        assert!(KeySpec::from(Vec::<String>::new()).is_empty());
    }
}
