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

//! src/core/mod.rs
//!
//! Core engine module
//!
//! This module contains the fundamental data structures and algorithms of
//! the shortcut engine:
//! - Type definitions for combos, events and registration policy
//! - Combo normalisation (string path and event path)
//! - The registry and dispatcher with its bidirectional combo index
//! - The event-source seam towards the platform
//!
//! All engine logic is isolated from any concrete windowing or terminal
//! layer to enable comprehensive unit testing without a display server.

pub mod error;
pub mod listener;
pub mod parser;
pub mod registry;
pub mod types;

pub use error::RegistryError;
pub use listener::{EventSource, HeadlessSource, ManualSource};
pub use registry::{
    DiagnosticSink, Diagnostics, Handler, LogSink, ShortcutRegistry, UnregisterBy, Unregistration,
};
pub use types::*;

#[cfg(test)]
mod tests;
