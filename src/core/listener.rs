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

//! Event-source seam between the registry and the platform
//!
//! The registry owns exactly one subscription to the platform's keyboard
//! stream. It never talks to an event loop directly; the embedding layer
//! (window system, TUI event pump, global hotkey hook) implements
//! [`EventSource`] and feeds events to the registry's dispatch operation.
//!
//! The registry calls [`attach`](EventSource::attach) when its first
//! registration arrives and [`detach`](EventSource::detach) when its last
//! one is removed. In an environment with no keyboard stream at all the
//! source reports itself unavailable and the registry never attaches —
//! registrations are still accepted and queryable, they simply never fire.

/// Connection to the platform's keyboard event stream.
pub trait EventSource {
    /// Whether a keyboard event stream exists in this environment.
    fn is_available(&self) -> bool {
        true
    }

    /// Start delivering events. Called once, on the first registration.
    fn attach(&mut self);

    /// Stop delivering events. Called once, when the registry empties.
    fn detach(&mut self);
}

/// Caller-driven event delivery.
///
/// The embedder holds a registry handle and calls dispatch itself, so
/// attach and detach are pure bookkeeping. This is the default source.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualSource;

impl EventSource for ManualSource {
    fn attach(&mut self) {}

    fn detach(&mut self) {}
}

/// No keyboard stream exists in this environment.
///
/// The headless analogue of running without a window: attach and detach
/// are permanent no-ops, the registry's attached flag stays false and
/// dispatch never fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadlessSource;

impl EventSource for HeadlessSource {
    fn is_available(&self) -> bool {
        false
    }

    fn attach(&mut self) {}

    fn detach(&mut self) {}
}
