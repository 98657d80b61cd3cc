//! Minimal event sources.
//!
//! These exist so streams can be built without an operator library:
//! [`create`] adapts a closure, the rest replay fixed sequences.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::foundation::disposable::{BoxedDisposable, Disposable, disposables};
use crate::foundation::event::Event;
use crate::foundation::observable::Observable;
use crate::foundation::observer::{BoxedObserver, Observer};
use crate::framework::producer::{Producer, Run};
use crate::framework::sink::Sink;

// =============================================================================
// Create
// =============================================================================

/// Builds an observable from a subscribe closure.
///
/// The closure receives a [`BoxedObserver`] that forwards at most one
/// terminal event and drops everything after it. The disposable the closure
/// returns is released when the stream terminates or the subscription is
/// disposed, whichever happens first.
///
/// # Example
///
/// ```rust
/// use rill_core::integration::source::create;
/// use rill_core::{BoxedObserver, Event, ObservableExt, Observer, disposables};
///
/// let source = create(|observer: BoxedObserver<i32, ()>| {
///     observer.on_next(1);
///     observer.on_completed();
///     observer.on_next(2); // dropped
///     disposables::empty()
/// });
///
/// source.subscribe_fn(|event: Event<i32, ()>| println!("{event:?}"));
/// ```
pub fn create<T, E, F>(subscribe: F) -> Create<F, T, E>
where
    F: Fn(BoxedObserver<T, E>) -> BoxedDisposable + Send + Sync,
{
    Create {
        subscribe,
        _marker: PhantomData,
    }
}

/// Observable returned by [`create`].
pub struct Create<F, T, E> {
    subscribe: F,
    _marker: PhantomData<fn() -> (T, E)>,
}

impl<F, T, E> Producer for Create<F, T, E>
where
    F: Fn(BoxedObserver<T, E>) -> BoxedDisposable + Send + Sync,
    T: Send + 'static,
    E: Send + 'static,
{
    type Item = T;
    type Error = E;

    fn run<O>(&self, observer: O, cancel: BoxedDisposable) -> Run
    where
        O: Observer<Item = T, Error = E> + 'static,
    {
        let sink = Arc::new(CreateSink {
            sink: Sink::new(observer, cancel),
        });
        let observer: BoxedObserver<T, E> = sink.clone();
        let subscription = (self.subscribe)(observer);
        Run { sink, subscription }
    }
}

impl<F, T, E> fmt::Debug for Create<F, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Create").finish_non_exhaustive()
    }
}

struct CreateSink<O> {
    sink: Sink<O>,
}

impl<O: Observer> Observer for CreateSink<O> {
    type Item = O::Item;
    type Error = O::Error;

    fn on(&self, event: Event<Self::Item, Self::Error>) {
        if event.is_terminal() {
            self.sink.forward_terminal([event]);
        } else {
            self.sink.forward_on(event);
        }
    }
}

impl<O: Observer> Disposable for CreateSink<O> {
    fn dispose(&self) {
        self.sink.dispose();
    }

    fn is_disposed(&self) -> bool {
        self.sink.is_disposed()
    }
}

// =============================================================================
// Sequences
// =============================================================================

/// Emits every element of `iter`, then completes.
///
/// Each subscription iterates its own clone of `iter` synchronously and
/// stops early once the subscription is disposed.
pub fn from_iter<I, E>(iter: I) -> FromIter<I, E>
where
    I: IntoIterator + Clone + Send + Sync,
{
    FromIter {
        iter,
        _marker: PhantomData,
    }
}

/// Emits `value`, then completes.
pub fn just<T: Clone + Send + Sync, E>(value: T) -> FromIter<std::iter::Once<T>, E> {
    from_iter(std::iter::once(value))
}

/// Completes immediately.
pub fn empty<T, E>() -> FromIter<std::iter::Empty<T>, E> {
    from_iter(std::iter::empty())
}

/// Observable returned by [`from_iter`], [`just`] and [`empty`].
pub struct FromIter<I, E> {
    iter: I,
    _marker: PhantomData<fn() -> E>,
}

impl<I: Clone, E> Clone for FromIter<I, E> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
            _marker: PhantomData,
        }
    }
}

impl<I, E> Producer for FromIter<I, E>
where
    I: IntoIterator + Clone + Send + Sync,
    I::Item: Send + 'static,
    E: Send + 'static,
{
    type Item = I::Item;
    type Error = E;

    fn run<O>(&self, observer: O, cancel: BoxedDisposable) -> Run
    where
        O: Observer<Item = I::Item, Error = E> + 'static,
    {
        let sink = Arc::new(Sink::new(observer, cancel));
        for value in self.iter.clone() {
            if sink.is_disposed() {
                break;
            }
            sink.forward_on(Event::Next(value));
        }
        sink.forward_terminal([Event::Completed]);

        Run {
            sink,
            subscription: disposables::empty(),
        }
    }
}

impl<I: fmt::Debug, E> fmt::Debug for FromIter<I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromIter").field("iter", &self.iter).finish()
    }
}

// =============================================================================
// Fail / Never
// =============================================================================

/// Fails immediately with `error`.
pub fn fail<T, E: Clone + Send + Sync>(error: E) -> Fail<T, E> {
    Fail {
        error,
        _marker: PhantomData,
    }
}

/// Observable returned by [`fail`].
#[derive(Debug, Clone)]
pub struct Fail<T, E> {
    error: E,
    _marker: PhantomData<fn() -> T>,
}

impl<T, E> Producer for Fail<T, E>
where
    T: Send + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Item = T;
    type Error = E;

    fn run<O>(&self, observer: O, cancel: BoxedDisposable) -> Run
    where
        O: Observer<Item = T, Error = E> + 'static,
    {
        let sink = Arc::new(Sink::new(observer, cancel));
        sink.forward_terminal([Event::Error(self.error.clone())]);
        Run {
            sink,
            subscription: disposables::empty(),
        }
    }
}

/// Never emits anything.
///
/// The observer stays alive until the subscription is disposed, so a bridged
/// consumer keeps waiting instead of seeing the stream end.
pub fn never<T, E>() -> Never<T, E> {
    Never {
        _marker: PhantomData,
    }
}

/// Observable returned by [`never`].
#[derive(Debug, Clone, Copy)]
pub struct Never<T, E> {
    _marker: PhantomData<fn() -> (T, E)>,
}

impl<T: Send + 'static, E: Send + 'static> Observable for Never<T, E> {
    type Item = T;
    type Error = E;

    fn subscribe<O>(&self, observer: O) -> BoxedDisposable
    where
        O: Observer<Item = T, Error = E> + 'static,
    {
        disposables::create(move || drop(observer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::observer::AnonymousObserver;
    use crate::testing::{Recorder, counting_disposable};
    use parking_lot::Mutex;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_from_iter_emits_then_completes() {
        let recorder = Recorder::<_, ()>::new();
        from_iter(vec!['a', 'b']).subscribe(recorder.clone());

        assert_eq!(
            recorder.events(),
            vec![Event::Next('a'), Event::Next('b'), Event::Completed]
        );
    }

    #[test]
    fn test_from_iter_resubscribes_from_start() {
        let source = from_iter::<_, ()>(1..=2);
        let first = Recorder::new();
        let second = Recorder::new();
        source.subscribe(first.clone());
        source.subscribe(second.clone());

        assert_eq!(first.events(), second.events());
    }

    #[test]
    fn test_just_empty_fail() {
        let recorder = Recorder::<i32, &str>::new();
        just(7).subscribe(recorder.clone());
        empty().subscribe(recorder.clone());
        fail("E").subscribe(recorder.clone());

        assert_eq!(
            recorder.events(),
            vec![
                Event::Next(7),
                Event::Completed,
                Event::Completed,
                Event::Error("E"),
            ]
        );
    }

    #[test]
    fn test_never_stays_silent() {
        let recorder = Recorder::<i32, ()>::new();
        let subscription = never().subscribe(recorder.clone());
        subscription.dispose();

        assert!(subscription.is_disposed());
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_create_guards_terminal_and_releases_once() {
        let (released, resource) = counting_disposable();
        let resource = Mutex::new(Some(resource));
        let source = create(move |observer: BoxedObserver<i32, &'static str>| {
            observer.on_next(1);
            observer.on_error("E");
            observer.on_next(2);
            observer.on_completed();
            resource.lock().take().unwrap_or_else(disposables::empty)
        });

        let recorder = Recorder::new();
        let subscription = source.subscribe(recorder.clone());

        assert_eq!(recorder.events(), vec![Event::Next(1), Event::Error("E")]);
        assert_eq!(released.load(Ordering::SeqCst), 1);
        subscription.dispose();
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_never_holds_observer_until_disposed() {
        let marker = Arc::new(());
        let held = Arc::clone(&marker);
        let observer = AnonymousObserver::new(move |_event: Event<i32, ()>| {
            let _held = &held;
        });
        let subscription = never::<i32, ()>().subscribe(observer);
        assert_eq!(Arc::strong_count(&marker), 2);

        subscription.dispose();
        assert_eq!(Arc::strong_count(&marker), 1);
    }

    #[test]
    fn test_dispose_releases_downstream_held_by_source() {
        let slot: Arc<Mutex<Option<BoxedObserver<i32, ()>>>> = Arc::new(Mutex::new(None));
        let captured = Arc::clone(&slot);
        let source = create(move |observer| {
            *captured.lock() = Some(observer);
            disposables::empty()
        });

        let marker = Arc::new(());
        let held = Arc::clone(&marker);
        let observer = AnonymousObserver::new(move |_event: Event<i32, ()>| {
            let _held = &held;
        });
        let subscription = source.subscribe(observer);
        assert_eq!(Arc::strong_count(&marker), 2);

        subscription.dispose();
        assert!(slot.lock().is_some());
        assert_eq!(Arc::strong_count(&marker), 1);
    }
}
