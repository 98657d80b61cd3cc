//! Foundation layer - the protocol itself.
//!
//! This module contains the building blocks every other layer is written
//! against:
//! - The three-case event algebra
//! - Idempotent cancellation handles
//! - The observer and observable contracts

pub mod disposable;
pub mod event;
pub mod observable;
pub mod observer;

pub use disposable::{
    AnonymousDisposable, BooleanDisposable, BoxedDisposable, CancellationDisposable,
    CompositeDisposable, Disposable, SingleAssignmentDisposable, disposables,
};
pub use event::{Event, EventKind};
pub use observable::Observable;
pub use observer::{AnonymousObserver, BoxedObserver, Observer};
