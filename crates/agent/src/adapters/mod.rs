// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Device-side adapters: the app registry and the app notifier.

pub mod notify;
pub mod registry;

#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotifier;
pub use notify::{AppNotifier, NotifyError, SpoolNotifier};
#[cfg(any(test, feature = "test-support"))]
pub use registry::FakeRegistry;
pub use registry::{AppRegistry, ManifestRegistry};
