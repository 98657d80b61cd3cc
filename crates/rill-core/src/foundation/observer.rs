//! The consumer side of the protocol.
//!
//! An [`Observer`] accepts one [`Event`] per call. The producer is responsible
//! for never calling [`Observer::on`] again after a terminal event; plain
//! observers do not enforce this. [`AnonymousObserver`] does: it ignores
//! everything after the first terminal event it sees.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::event::Event;

/// A consumer of events.
pub trait Observer: Send + Sync {
    /// The value type carried by `Next` events.
    type Item;
    /// The failure type carried by `Error` events.
    type Error;

    /// Delivers one event.
    fn on(&self, event: Event<Self::Item, Self::Error>);

    /// Delivers a `Next` event.
    fn on_next(&self, value: Self::Item) {
        self.on(Event::Next(value));
    }

    /// Delivers an `Error` event.
    fn on_error(&self, error: Self::Error) {
        self.on(Event::Error(error));
    }

    /// Delivers a `Completed` event.
    fn on_completed(&self) {
        self.on(Event::Completed);
    }
}

/// Shared, type-erased observer.
pub type BoxedObserver<T, E> = Arc<dyn Observer<Item = T, Error = E>>;

impl<O: Observer + ?Sized> Observer for Arc<O> {
    type Item = O::Item;
    type Error = O::Error;

    fn on(&self, event: Event<Self::Item, Self::Error>) {
        (**self).on(event);
    }
}

// =============================================================================
// Anonymous Observer
// =============================================================================

/// A closure-backed observer that stops after the first terminal event.
///
/// # Example
///
/// ```rust
/// use rill_core::{AnonymousObserver, Event, Observer};
///
/// let observer = AnonymousObserver::new(|event: Event<i32, String>| {
///     println!("{event:?}");
/// });
/// observer.on_next(1);
/// observer.on_completed();
/// observer.on_next(2); // ignored
/// assert!(observer.is_stopped());
/// ```
pub struct AnonymousObserver<T, E, F> {
    handler: F,
    stopped: AtomicBool,
    _marker: PhantomData<fn(T, E)>,
}

impl<T, E, F> AnonymousObserver<T, E, F>
where
    F: Fn(Event<T, E>) + Send + Sync,
{
    /// Creates an observer that hands every accepted event to `handler`.
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            stopped: AtomicBool::new(false),
            _marker: PhantomData,
        }
    }

    /// Returns `true` once a terminal event has been accepted.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

impl<T, E, F> Observer for AnonymousObserver<T, E, F>
where
    F: Fn(Event<T, E>) + Send + Sync,
{
    type Item = T;
    type Error = E;

    fn on(&self, event: Event<T, E>) {
        if event.is_terminal() {
            if self.stopped.swap(true, Ordering::AcqRel) {
                return;
            }
        } else if self.is_stopped() {
            return;
        }
        (self.handler)(event);
    }
}

impl<T, E, F> fmt::Debug for AnonymousObserver<T, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnonymousObserver")
            .field("stopped", &self.stopped.load(Ordering::Acquire))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_anonymous_observer_ignores_after_terminal() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let observer = AnonymousObserver::new(move |event: Event<i32, &'static str>| {
            sink.lock().push(event);
        });

        observer.on_next(1);
        observer.on_error("E");
        observer.on_completed();
        observer.on_next(2);

        assert!(observer.is_stopped());
        assert_eq!(*seen.lock(), vec![Event::Next(1), Event::Error("E")]);
    }

    #[test]
    fn test_boxed_observer_delegates() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let boxed: BoxedObserver<i32, ()> =
            Arc::new(AnonymousObserver::new(move |event: Event<i32, ()>| {
                sink.lock().push(event);
            }));

        let shared = Arc::new(boxed);
        shared.on_next(4);
        shared.on_completed();

        assert_eq!(*seen.lock(), vec![Event::Next(4), Event::Completed]);
    }
}
