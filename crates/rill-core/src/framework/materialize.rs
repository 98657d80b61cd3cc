//! Reifies termination as data.
//!
//! `materialize` turns an `Observable<T, E>` into an
//! `Observable<Event<T, E>, E>`:
//!
//! | source | emitted downstream | sink after |
//! |---|---|---|
//! | `next(v)` | `next(Event::Next(v))` | active |
//! | `error(e)` | `next(Event::Error(e))`, `completed` | disposed |
//! | `completed` | `next(Event::Completed)`, `completed` | disposed |
//!
//! The output never terminates with a raw `error`.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::foundation::disposable::{BoxedDisposable, Disposable};
use crate::foundation::event::Event;
use crate::foundation::observable::Observable;
use crate::foundation::observer::Observer;
use crate::framework::producer::{Producer, Run};
use crate::framework::sink::Sink;

/// Observable produced by [`ObservableExt::materialize`](crate::ObservableExt::materialize).
#[derive(Debug, Clone)]
pub struct Materialize<S> {
    source: S,
}

impl<S> Materialize<S> {
    /// Wraps `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns the upstream observable.
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: Observable> Producer for Materialize<S> {
    type Item = Event<S::Item, S::Error>;
    type Error = S::Error;

    fn run<O>(&self, observer: O, cancel: BoxedDisposable) -> Run
    where
        O: Observer<Item = Self::Item, Error = Self::Error> + 'static,
    {
        let sink = Arc::new(MaterializeSink::<O, S::Item>::new(observer, cancel));
        let subscription = self.source.subscribe(Arc::clone(&sink));
        Run { sink, subscription }
    }
}

struct MaterializeSink<O, T> {
    sink: Sink<O>,
    _item: PhantomData<fn(T)>,
}

impl<O: Observer, T> MaterializeSink<O, T> {
    fn new(observer: O, cancel: BoxedDisposable) -> Self {
        Self {
            sink: Sink::new(observer, cancel),
            _item: PhantomData,
        }
    }
}

impl<O, T, E> Observer for MaterializeSink<O, T>
where
    O: Observer<Item = Event<T, E>, Error = E>,
{
    type Item = T;
    type Error = E;

    fn on(&self, event: Event<T, E>) {
        match event {
            Event::Next(value) => self.sink.forward_on(Event::Next(Event::Next(value))),
            Event::Error(error) => self
                .sink
                .forward_terminal([Event::Next(Event::Error(error)), Event::Completed]),
            Event::Completed => self
                .sink
                .forward_terminal([Event::Next(Event::Completed), Event::Completed]),
        }
    }
}

impl<O: Observer, T> Disposable for MaterializeSink<O, T> {
    fn dispose(&self) {
        self.sink.dispose();
    }

    fn is_disposed(&self) -> bool {
        self.sink.is_disposed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ext::ObservableExt;
    use crate::foundation::disposable::disposables;
    use crate::foundation::observer::BoxedObserver;
    use crate::integration::source::{create, from_iter};
    use crate::testing::{Recorder, Scripted, counting_disposable};
    use parking_lot::Mutex;
    use proptest::prelude::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_values_then_completed() {
        let recorder = Recorder::new();
        from_iter::<_, &str>(vec![1, 2])
            .materialize()
            .subscribe(recorder.clone());

        assert_eq!(
            recorder.events(),
            vec![
                Event::Next(Event::Next(1)),
                Event::Next(Event::Next(2)),
                Event::Next(Event::Completed),
                Event::Completed,
            ]
        );
    }

    #[test]
    fn test_error_becomes_value() {
        let recorder = Recorder::new();
        Scripted::new(vec![Event::Next(1), Event::Error("E")])
            .materialize()
            .subscribe(recorder.clone());

        assert_eq!(
            recorder.events(),
            vec![
                Event::Next(Event::Next(1)),
                Event::Next(Event::Error("E")),
                Event::Completed,
            ]
        );
    }

    #[test]
    fn test_drops_events_after_terminal() {
        let source = Scripted::new(vec![
            Event::Completed,
            Event::Next(9),
            Event::Error("late"),
            Event::Completed,
        ]);
        let recorder = Recorder::new();
        source.materialize().subscribe(recorder.clone());

        assert_eq!(
            recorder.events(),
            vec![Event::Next(Event::Completed), Event::Completed]
        );
    }

    #[test]
    fn test_terminal_releases_upstream_once() {
        let source = Arc::new(Scripted::new(vec![Event::<i32, &str>::Completed]));
        let subscription = Arc::clone(&source)
            .materialize()
            .subscribe(Recorder::new());

        assert_eq!(source.released(), 1);
        subscription.dispose();
        subscription.dispose();
        assert_eq!(source.released(), 1);
    }

    #[test]
    fn test_dispose_releases_upstream_and_stops_delivery() {
        let (released, upstream) = counting_disposable();
        let upstream = Mutex::new(Some(upstream));
        let slot: Arc<Mutex<Option<BoxedObserver<i32, ()>>>> = Arc::new(Mutex::new(None));
        let captured = Arc::clone(&slot);

        let source = create(move |observer| {
            *captured.lock() = Some(observer);
            upstream.lock().take().unwrap_or_else(disposables::empty)
        });

        let recorder = Recorder::new();
        let subscription = source.materialize().subscribe(recorder.clone());
        let observer = slot.lock().clone().unwrap();

        observer.on_next(1);
        subscription.dispose();
        subscription.dispose();
        observer.on_next(2);
        observer.on_completed();

        assert_eq!(released.load(Ordering::SeqCst), 1);
        assert_eq!(recorder.events(), vec![Event::Next(Event::Next(1))]);
    }

    proptest! {
        #[test]
        fn never_emits_raw_error(
            values in proptest::collection::vec(any::<i32>(), 0..32),
            fail in any::<bool>(),
        ) {
            let mut script: Vec<Event<i32, String>> =
                values.iter().copied().map(Event::Next).collect();
            script.push(if fail { Event::Error("E".into()) } else { Event::Completed });

            let recorder = Recorder::new();
            Scripted::new(script).materialize().subscribe(recorder.clone());
            let events = recorder.events();

            prop_assert_eq!(events.len(), values.len() + 2);
            prop_assert!(events.iter().all(|e| e.error().is_none()));
            prop_assert_eq!(events.last(), Some(&Event::Completed));
            prop_assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
        }
    }
}
