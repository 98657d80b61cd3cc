//! Per-subscription forwarding state shared by every operator.
//!
//! A [`Sink`] sits between an upstream subscription and the downstream
//! observer. It owns the downstream observer and the handle that cancels the
//! upstream subscription, and it moves through exactly two states:
//!
//! ```text
//! active ──(terminal forwarded | dispose())──▶ disposed
//! ```
//!
//! Whichever path flips the state first performs the release and lets go of
//! the downstream observer; the other becomes a no-op. An upstream that keeps
//! a reference to the sink therefore no longer keeps the downstream alive. Events arriving while disposed are dropped and logged at
//! `debug` level: they mean the upstream broke the protocol, which is not an
//! error of the downstream subscription.
//!
//! # Concurrent disposal
//!
//! [`Sink::dispose`] never waits for an in-flight [`Sink::forward_on`]. An
//! event that passed the state check before disposal may still reach the
//! downstream observer; nothing is delivered after a call that observed the
//! disposed state, and the cancel handle is released exactly once.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::foundation::disposable::{BoxedDisposable, Disposable};
use crate::foundation::event::Event;
use crate::foundation::observer::Observer;

/// Forwarding state for one subscription.
pub struct Sink<O> {
    observer: Mutex<Option<Arc<O>>>,
    cancel: BoxedDisposable,
    disposed: AtomicBool,
}

impl<O: Observer> Sink<O> {
    /// Creates an active sink.
    ///
    /// `cancel` releases the upstream subscription. It is usually an empty
    /// slot at this point, filled in by the producer once the upstream
    /// subscription exists.
    pub fn new(observer: O, cancel: BoxedDisposable) -> Self {
        Self {
            observer: Mutex::new(Some(Arc::new(observer))),
            cancel,
            disposed: AtomicBool::new(false),
        }
    }

    /// Forwards a non-terminating event downstream while the sink is active.
    pub fn forward_on(&self, event: Event<O::Item, O::Error>) {
        if self.is_disposed() {
            debug!(kind = %event.kind(), "Dropping event delivered to disposed sink");
            return;
        }
        // Delivered outside the lock so the observer may dispose this sink.
        let observer = self.observer.lock().clone();
        if let Some(observer) = observer {
            observer.on(event);
        }
    }

    /// Forwards the final group of events downstream, then releases upstream.
    ///
    /// The group is delivered in order, only once per sink. Later calls, or a
    /// call after [`dispose`](Disposable::dispose), drop their events.
    pub fn forward_terminal<I>(&self, events: I)
    where
        I: IntoIterator<Item = Event<O::Item, O::Error>>,
    {
        if self.disposed.swap(true, Ordering::AcqRel) {
            debug!("Dropping terminal events delivered to disposed sink");
            return;
        }

        let observer = self.observer.lock().take();
        if let Some(observer) = observer {
            for event in events {
                observer.on(event);
            }
        }

        trace!("Sink terminated, releasing upstream subscription");
        self.cancel.dispose();
    }

    /// Returns `true` once the sink has terminated or been disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

impl<O: Observer> Disposable for Sink<O> {
    fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        let observer = self.observer.lock().take();
        drop(observer);
        trace!("Sink disposed, releasing upstream subscription");
        self.cancel.dispose();
    }

    fn is_disposed(&self) -> bool {
        Sink::is_disposed(self)
    }
}

impl<O> fmt::Debug for Sink<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("disposed", &self.disposed.load(Ordering::Acquire))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::observer::AnonymousObserver;
    use crate::testing::{Recorder, counting_disposable};
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_forwards_while_active() {
        let recorder = Recorder::<i32, &str>::new();
        let (released, cancel) = counting_disposable();
        let sink = Sink::new(recorder.clone(), cancel);

        sink.forward_on(Event::Next(1));
        sink.forward_on(Event::Next(2));

        assert!(!sink.is_disposed());
        assert_eq!(released.load(Ordering::SeqCst), 0);
        assert_eq!(recorder.events(), vec![Event::Next(1), Event::Next(2)]);
    }

    #[test]
    fn test_terminal_group_then_silence() {
        let recorder = Recorder::<i32, &str>::new();
        let (released, cancel) = counting_disposable();
        let sink = Sink::new(recorder.clone(), cancel);

        sink.forward_terminal([Event::Error("E"), Event::Completed]);
        sink.forward_on(Event::Next(3));
        sink.forward_terminal([Event::Completed]);

        assert!(sink.is_disposed());
        assert_eq!(released.load(Ordering::SeqCst), 1);
        assert_eq!(recorder.events(), vec![Event::Error("E"), Event::Completed]);
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let recorder = Recorder::<i32, &str>::new();
        let (released, cancel) = counting_disposable();
        let sink = Sink::new(recorder.clone(), cancel);

        sink.dispose();
        sink.dispose();
        sink.forward_terminal([Event::Completed]);
        sink.dispose();

        assert_eq!(released.load(Ordering::SeqCst), 1);
        assert!(recorder.events().is_empty());
    }

    fn tracked_observer() -> (Arc<()>, impl Observer<Item = i32, Error = ()> + 'static) {
        let marker = Arc::new(());
        let held = Arc::clone(&marker);
        let observer = AnonymousObserver::new(move |_event: Event<i32, ()>| {
            let _held = &held;
        });
        (marker, observer)
    }

    #[test]
    fn test_dispose_releases_observer() {
        let (marker, observer) = tracked_observer();
        let (_, cancel) = counting_disposable();
        let sink = Sink::new(observer, cancel);
        assert_eq!(Arc::strong_count(&marker), 2);

        sink.dispose();
        assert_eq!(Arc::strong_count(&marker), 1);
    }

    #[test]
    fn test_terminal_releases_observer() {
        let (marker, observer) = tracked_observer();
        let (_, cancel) = counting_disposable();
        let sink = Sink::new(observer, cancel);

        sink.forward_on(Event::Next(1));
        assert_eq!(Arc::strong_count(&marker), 2);

        sink.forward_terminal([Event::Completed]);
        assert_eq!(Arc::strong_count(&marker), 1);
    }

    #[test]
    fn test_concurrent_dispose_releases_once() {
        let recorder = Recorder::<usize, ()>::new();
        let released = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&released);
        let cancel = crate::foundation::disposable::disposables::create(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let sink = Arc::new(Sink::new(recorder.clone(), cancel));

        std::thread::scope(|scope| {
            let producer = Arc::clone(&sink);
            scope.spawn(move || {
                for i in 0..1_000 {
                    producer.forward_on(Event::Next(i));
                }
                producer.forward_terminal([Event::Completed]);
            });
            for _ in 0..4 {
                let canceller = Arc::clone(&sink);
                scope.spawn(move || canceller.dispose());
            }
        });

        assert!(sink.is_disposed());
        assert_eq!(released.load(Ordering::SeqCst), 1);

        // Whatever was delivered is an in-order prefix with at most one terminal.
        let events = recorder.events();
        let terminals = events.iter().filter(|e| e.is_terminal()).count();
        assert!(terminals <= 1);
        for (index, event) in events.iter().filter(|e| e.is_next()).enumerate() {
            assert_eq!(event, &Event::Next(index));
        }
    }
}
