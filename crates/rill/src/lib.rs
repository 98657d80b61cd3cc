//! # Rill
//!
//! Push-based event streams with explicit cancellation.
//!
//! ## Overview
//!
//! A stream delivers values followed by at most one terminal event, and every
//! subscription hands back a handle that releases upstream resources exactly
//! once. `materialize` and `dematerialize` turn termination into data and back,
//! so failures can be inspected, stored or serialized like any other value.
//!
//! ```text
//! Observable<T, E> ──materialize──▶ Observable<Event<T, E>, E> ──dematerialize──▶ Observable<T, E>
//! ```
//!
//! - **Core**: event algebra, disposables, sinks and operators (`rill-core`)
//! - **Runtime**: configuration and logging setup (`rill-runtime`)
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use parking_lot::Mutex;
//! use rill::prelude::*;
//!
//! let events = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&events);
//!
//! from_iter::<_, String>(vec![1, 2])
//!     .materialize()
//!     .subscribe_fn(move |event| sink.lock().push(event));
//!
//! assert_eq!(
//!     *events.lock(),
//!     vec![
//!         Event::Next(Event::Next(1)),
//!         Event::Next(Event::Next(2)),
//!         Event::Next(Event::Completed),
//!         Event::Completed,
//!     ]
//! );
//! ```
//!
//! ## Features
//!
//! - `toml-config`: TOML configuration files (default)
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log output

pub use rill_core as core;
pub use rill_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use rill::prelude::*;
/// ```
pub mod prelude {
    // Stream protocol
    pub use rill_core::prelude::*;

    // Cancellation handles
    pub use rill_core::{CompositeDisposable, SingleAssignmentDisposable};

    // Async bridge
    pub use rill_core::EventStream;

    // Application setup
    pub use rill_runtime::{RillConfig, init};
}
