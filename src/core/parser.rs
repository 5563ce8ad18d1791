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

//! src/core/parser.rs
//!
//! Combo normalisation
//!
//! This module converts both representations of a key combination into the
//! same canonical [`Combo`]:
//! - [`normalize_combo`]: a human-authored string like "Ctrl+Shift+K"
//! - [`event_to_combo`]: a live [`KeyEvent`] from the platform
//!
//! Both paths must produce byte-identical canonical strings for a spelling
//! and an event that describe the same chord; the registry compares them by
//! equality and nothing else.
//!
//! # Architecture
//! The combo grammar is `token ('+' token)*`. Tokenising uses nom
//! combinators; alias resolution and modifier classification are plain
//! match tables. Aliases are case-insensitive and applied per token after
//! trimming.
//!
//! Normalisation never fails: unrecognised input degrades to the empty
//! combo, which the dispatcher discards.

use nom::{
    bytes::complete::take_while,
    character::complete::char,
};
use nom::{multi::separated_list0, IResult, Parser};

use crate::core::types::{Combo, KeyEvent, Modifier, Platform};

/// Split a combo string into raw tokens
///
/// Tokens are runs of non-`+` characters and may be empty ("ctrl++" yields
/// an empty trailing token). Callers trim, lowercase and drop empties.
pub fn combo_tokens(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list0(char('+'), take_while(|c: char| c != '+')).parse(input)
}

/// Normalise a single combo-string token
///
/// Trims, lowercases, and resolves aliases:
/// - cmd, command → meta
/// - control → ctrl
/// - option → alt
/// - escape → esc
/// - del → delete
/// - plus → literal "+"
/// - spacebar → space
/// - return → enter
/// - mod → the platform's primary modifier (meta on Apple-family
///   platforms, ctrl everywhere else)
pub fn normalize_token(token: &str, platform: Platform) -> String {
    let token = token.trim().to_lowercase();

    match token.as_str() {
        "cmd" | "command" => "meta".to_string(),
        "control" => "ctrl".to_string(),
        "option" => "alt".to_string(),
        "escape" => "esc".to_string(),
        "del" => "delete".to_string(),
        "plus" => "+".to_string(),
        "spacebar" => "space".to_string(),
        "return" => "enter".to_string(),
        "mod" => platform.primary_modifier().to_string(),
        _ => token,
    }
}

/// Classify a normalised token as one of the four modifiers
pub fn modifier_from_token(token: &str) -> Option<Modifier> {
    match token {
        "ctrl" => Some(Modifier::Ctrl),
        "alt" => Some(Modifier::Alt),
        "shift" => Some(Modifier::Shift),
        "meta" => Some(Modifier::Meta),
        _ => None,
    }
}

/// Normalise a combo string like "Ctrl+Shift+K" into its canonical [`Combo`]
///
/// Tokens are aliased then classified as modifiers or the main key; when
/// several non-modifier tokens are supplied the last one wins. Modifier-only
/// spellings ("ctrl+shift") are valid. Empty input yields the empty combo.
///
/// # Example
/// ```
/// use shortcut_engine::core::{parser::normalize_combo, Platform};
///
/// let combo = normalize_combo("Shift+Ctrl+K", Platform::Other);
/// assert_eq!(combo.canonical(), "ctrl+shift+k");
/// ```
pub fn normalize_combo(input: &str, platform: Platform) -> Combo {
    let tokens = combo_tokens(input).map(|(_, t)| t).unwrap_or_default();

    let mut modifiers = Vec::new();
    let mut key = None;

    for raw in tokens {
        let token = normalize_token(raw, platform);
        if token.is_empty() {
            continue;
        }

        match modifier_from_token(&token) {
            Some(modifier) => modifiers.push(modifier),
            // Last non-modifier token wins as the main key
            None => key = Some(token),
        }
    }

    Combo::new(modifiers, key)
}

/// Normalise a platform key name from a live event
///
/// Lowercases and resolves the runtime aliases: space variants → space,
/// arrow keys → left/right/up/down, del → delete, control → ctrl,
/// escape → esc. No trimming — the space key's name IS whitespace.
pub fn normalize_event_key(key: &str) -> String {
    let key = key.to_lowercase();

    match key.as_str() {
        " " | "spacebar" => "space".to_string(),
        "arrowleft" => "left".to_string(),
        "arrowright" => "right".to_string(),
        "arrowup" => "up".to_string(),
        "arrowdown" => "down".to_string(),
        "del" => "delete".to_string(),
        "control" => "ctrl".to_string(),
        "escape" => "esc".to_string(),
        _ => key,
    }
}

/// Convert a live [`KeyEvent`] into its canonical [`Combo`]
///
/// The modifier set is read from the event's held flags, never from the key
/// name. Events that are part of an IME composition yield the empty combo —
/// shortcuts must not fire on partially-composed text.
///
/// When the key itself is one of the four modifiers, the event is a bare
/// modifier press and the combo carries only the held-modifier set. An
/// empty key name likewise contributes no main key.
pub fn event_to_combo(event: &KeyEvent) -> Combo {
    if event.composing {
        return Combo::empty();
    }

    let modifiers = event.held_modifiers();
    let key = normalize_event_key(&event.key);

    if key.is_empty() || modifier_from_token(&key).is_some() {
        // Bare modifier press: the held set alone identifies the combo
        return Combo::new(modifiers, None);
    }

    Combo::new(modifiers, Some(key))
}
