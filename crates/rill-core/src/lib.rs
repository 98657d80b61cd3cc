//! # Rill Core
//!
//! A small push-based event stream protocol with explicit cancellation.
//!
//! A stream delivers any number of `next` values, then at most one terminal
//! event (`error` or `completed`). Subscribing returns a [`Disposable`] that
//! stops delivery and releases upstream resources exactly once.
//!
//! ## Architecture Layers
//!
//! ### Foundation Layer
//!
//! The protocol itself:
//! - **Events**: the three-case algebra ([`Event`], [`EventKind`])
//! - **Disposables**: idempotent cancellation handles ([`Disposable`], [`disposables`])
//! - **Contracts**: [`Observer`] and [`Observable`]
//!
//! ### Framework Layer
//!
//! Operator machinery:
//! - **Sink**: terminal-once, auto-disposing forwarding state ([`Sink`])
//! - **Producer**: one sink per subscription ([`Producer`])
//! - **Operators**: [`Materialize`] and [`Dematerialize`]
//!
//! ### Integration Layer
//!
//! - **Sources**: [`create`], [`from_iter`], [`just`], [`empty`], [`fail`], [`never`]
//! - **Async bridge**: [`EventStream`]
//!
//! ## Subscription Lifecycle
//!
//! ```text
//! ┌──────────┐  subscribe   ┌──────────────────┐  on(event)  ┌──────────┐
//! │  Source  │─────────────▶│ Sink (operator)  │────────────▶│ Observer │
//! └──────────┘              └──────────────────┘             └──────────┘
//!       ▲                       │ terminal or dispose()
//!       └───────────────────────┘ release upstream, exactly once
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rill_core::prelude::*;
//!
//! let seen = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
//! let log = seen.clone();
//!
//! fail::<i32, _>("boom")
//!     .materialize()
//!     .subscribe_fn(move |event| log.lock().push(event));
//!
//! assert_eq!(
//!     *seen.lock(),
//!     vec![Event::Next(Event::Error("boom")), Event::Completed]
//! );
//! ```

pub mod error;
pub mod foundation;
pub mod framework;
pub mod integration;

mod ext;

#[cfg(test)]
mod testing;

pub use error::{DisposeError, DisposeResult};
pub use ext::ObservableExt;

// Re-export foundation types
pub use foundation::{
    AnonymousDisposable, AnonymousObserver, BooleanDisposable, BoxedDisposable, BoxedObserver,
    CancellationDisposable, CompositeDisposable, Disposable, Event, EventKind, Observable,
    Observer, SingleAssignmentDisposable, disposables,
};

// Re-export framework types
pub use framework::{Dematerialize, Materialize, Producer, Run, Sink};

// Re-export integration types
pub use integration::{EventStream, create, empty, fail, from_iter, just, never};

/// Commonly used types and traits.
pub mod prelude {
    pub use crate::{
        BoxedDisposable, BoxedObserver, Disposable, Event, EventKind, Observable, ObservableExt,
        Observer, create, disposables, empty, fail, from_iter, just, never,
    };
}
