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

//! Combo normalisation tests
//!
//! Tests for both normalisation paths:
//! - Combo-string tokenising and aliasing
//! - Event-to-combo conversion (flags, bare modifiers, runtime aliases)
//! - Agreement between the two paths for matching pairs

use crate::core::{
    parser::*,
    types::{FocusTarget, KeyEvent, Modifier, Platform},
};

fn event(key: &str) -> KeyEvent {
    KeyEvent::new(key)
}

#[test]
fn test_combo_tokens() {
    let (_, tokens) = combo_tokens("ctrl+shift+k").unwrap();
    assert_eq!(tokens, vec!["ctrl", "shift", "k"]);

    // Empty tokens survive tokenising; normalisation drops them
    let (_, tokens) = combo_tokens("ctrl++k").unwrap();
    assert_eq!(tokens, vec!["ctrl", "", "k"]);

    let (_, tokens) = combo_tokens("").unwrap();
    assert_eq!(tokens, vec![""]);
}

#[test]
fn test_normalize_token_aliases() {
    let p = Platform::Other;
    assert_eq!(normalize_token("cmd", p), "meta");
    assert_eq!(normalize_token("Command", p), "meta");
    assert_eq!(normalize_token("CONTROL", p), "ctrl");
    assert_eq!(normalize_token("option", p), "alt");
    assert_eq!(normalize_token("escape", p), "esc");
    assert_eq!(normalize_token("del", p), "delete");
    assert_eq!(normalize_token("plus", p), "+");
    assert_eq!(normalize_token("spacebar", p), "space");
    assert_eq!(normalize_token("return", p), "enter");
}

#[test]
fn test_mod_token_resolves_per_platform() {
    assert_eq!(normalize_token("mod", Platform::AppleLike), "meta");
    assert_eq!(normalize_token("mod", Platform::Other), "ctrl");

    let apple = normalize_combo("mod+s", Platform::AppleLike);
    assert_eq!(apple.canonical(), "meta+s");

    let other = normalize_combo("mod+s", Platform::Other);
    assert_eq!(other.canonical(), "ctrl+s");
}

#[test]
fn test_normalize_combo_order_and_case_insensitive() {
    let spellings = ["Shift+Ctrl+K", "ctrl+shift+k", "SHIFT+CTRL+K", "shift+ctrl+K"];

    for spelling in spellings {
        let combo = normalize_combo(spelling, Platform::Other);
        assert_eq!(combo.canonical(), "ctrl+shift+k", "spelling: {}", spelling);
    }
}

#[test]
fn test_normalize_combo_trims_tokens() {
    let combo = normalize_combo(" ctrl + s ", Platform::Other);
    assert_eq!(combo.canonical(), "ctrl+s");
}

#[test]
fn test_normalize_combo_modifier_only() {
    let combo = normalize_combo("shift+ctrl", Platform::Other);
    assert_eq!(combo.canonical(), "ctrl+shift");
    assert!(combo.key.is_none());
}

#[test]
fn test_normalize_combo_key_only() {
    let combo = normalize_combo("Enter", Platform::Other);
    assert_eq!(combo.canonical(), "enter");
    assert!(combo.modifiers.is_empty());
}

#[test]
fn test_normalize_combo_last_main_key_wins() {
    let combo = normalize_combo("ctrl+a+b", Platform::Other);
    assert_eq!(combo.canonical(), "ctrl+b");
}

#[test]
fn test_normalize_combo_empty_input() {
    assert!(normalize_combo("", Platform::Other).is_empty());
    assert!(normalize_combo("+", Platform::Other).is_empty());
    assert!(normalize_combo("  ", Platform::Other).is_empty());
}

#[test]
fn test_normalize_combo_plus_is_a_key() {
    let combo = normalize_combo("ctrl+plus", Platform::Other);
    assert_eq!(combo.canonical(), "ctrl++");
    assert_eq!(combo.key.as_deref(), Some("+"));
}

#[test]
fn test_normalize_combo_dedups_aliased_modifiers() {
    // cmd and meta name the same modifier
    let combo = normalize_combo("cmd+meta+s", Platform::Other);
    assert_eq!(combo.canonical(), "meta+s");
}

#[test]
fn test_event_to_combo_reads_flags_not_key_tokens() {
    let mut ev = event("k");
    ev.ctrl = true;
    ev.shift = true;

    assert_eq!(event_to_combo(&ev).canonical(), "ctrl+shift+k");
}

#[test]
fn test_event_to_combo_lowercases_key() {
    let mut ev = event("K");
    ev.ctrl = true;

    assert_eq!(event_to_combo(&ev).canonical(), "ctrl+k");
}

#[test]
fn test_event_to_combo_space_variants() {
    assert_eq!(event_to_combo(&event(" ")).canonical(), "space");
    assert_eq!(event_to_combo(&event("Spacebar")).canonical(), "space");
}

#[test]
fn test_event_to_combo_arrow_keys() {
    assert_eq!(event_to_combo(&event("ArrowLeft")).canonical(), "left");
    assert_eq!(event_to_combo(&event("ArrowRight")).canonical(), "right");
    assert_eq!(event_to_combo(&event("ArrowUp")).canonical(), "up");
    assert_eq!(event_to_combo(&event("ArrowDown")).canonical(), "down");
}

#[test]
fn test_event_to_combo_delete_and_escape() {
    assert_eq!(event_to_combo(&event("Del")).canonical(), "delete");
    assert_eq!(event_to_combo(&event("Delete")).canonical(), "delete");
    assert_eq!(event_to_combo(&event("Escape")).canonical(), "esc");
}

#[test]
fn test_event_to_combo_bare_modifier_press() {
    // Pressing Control alone: the key names a modifier, so the combo is
    // the held set only
    let mut ev = event("Control");
    ev.ctrl = true;
    assert_eq!(event_to_combo(&ev).canonical(), "ctrl");

    // Pressing Shift while Control is held
    let mut ev = event("Shift");
    ev.ctrl = true;
    ev.shift = true;
    assert_eq!(event_to_combo(&ev).canonical(), "ctrl+shift");

    let mut ev = event("Meta");
    ev.meta = true;
    assert_eq!(event_to_combo(&ev).canonical(), "meta");
}

#[test]
fn test_event_to_combo_empty_key_name() {
    let mut ev = event("");
    ev.ctrl = true;
    assert_eq!(event_to_combo(&ev).canonical(), "ctrl");
}

#[test]
fn test_event_to_combo_composition_yields_empty() {
    let mut ev = event("k");
    ev.ctrl = true;
    ev.composing = true;

    assert!(event_to_combo(&ev).is_empty());
}

#[test]
fn test_event_to_combo_ignores_target() {
    let mut ev = event("u");
    ev.ctrl = true;
    ev.target = FocusTarget::TextInput;

    // Target classification is dispatch policy, not combo identity
    assert_eq!(event_to_combo(&ev).canonical(), "ctrl+u");
}

#[test]
fn test_paths_agree_for_matching_pairs() {
    // (spelling, event) pairs that describe the same chord
    let cases: Vec<(&str, KeyEvent)> = vec![
        ("Ctrl+S", {
            let mut ev = event("s");
            ev.ctrl = true;
            ev
        }),
        ("cmd+k", {
            let mut ev = event("k");
            ev.meta = true;
            ev
        }),
        ("option+Left", {
            let mut ev = event("ArrowLeft");
            ev.alt = true;
            ev
        }),
        ("return", event("Enter")),
        ("ctrl+spacebar", {
            let mut ev = event(" ");
            ev.ctrl = true;
            ev
        }),
        ("escape", event("Escape")),
        ("shift+del", {
            let mut ev = event("Delete");
            ev.shift = true;
            ev
        }),
        ("Shift+Ctrl", {
            let mut ev = event("Shift");
            ev.ctrl = true;
            ev.shift = true;
            ev
        }),
    ];

    for (spelling, ev) in cases {
        let from_string = normalize_combo(spelling, Platform::Other);
        let from_event = event_to_combo(&ev);
        assert_eq!(
            from_string.canonical(),
            from_event.canonical(),
            "spelling '{}' and its event disagree",
            spelling
        );
    }
}

#[test]
fn test_modifier_from_token() {
    assert_eq!(modifier_from_token("ctrl"), Some(Modifier::Ctrl));
    assert_eq!(modifier_from_token("alt"), Some(Modifier::Alt));
    assert_eq!(modifier_from_token("shift"), Some(Modifier::Shift));
    assert_eq!(modifier_from_token("meta"), Some(Modifier::Meta));
    assert_eq!(modifier_from_token("k"), None);
}
