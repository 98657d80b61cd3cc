//! Unwraps reified termination back into real termination.
//!
//! `dematerialize` turns an `Observable<Event<T, E>, E>` back into an
//! `Observable<T, E>`. It also handles the wrapping stream terminating on its
//! own, by forwarding that termination directly:
//!
//! | source | emitted downstream | sink after |
//! |---|---|---|
//! | `next(Event::Next(v))` | `next(v)` | active |
//! | `next(Event::Error(e))` | `error(e)`, `completed` | disposed |
//! | `next(Event::Completed)` | `completed` | disposed |
//! | `error(e)` | `error(e)`, `completed` | disposed |
//! | `completed` | `completed` | disposed |
//!
//! A failure is followed by a separate `completed` call. Observers that
//! stop at the first terminal event, such as
//! [`AnonymousObserver`](crate::AnonymousObserver), only see the `error`.

use std::sync::Arc;

use crate::foundation::disposable::{BoxedDisposable, Disposable};
use crate::foundation::event::Event;
use crate::foundation::observable::Observable;
use crate::foundation::observer::Observer;
use crate::framework::producer::{Producer, Run};
use crate::framework::sink::Sink;

/// Observable produced by [`ObservableExt::dematerialize`](crate::ObservableExt::dematerialize).
#[derive(Debug, Clone)]
pub struct Dematerialize<S> {
    source: S,
}

impl<S> Dematerialize<S> {
    /// Wraps `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns the upstream observable.
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S, T, E> Producer for Dematerialize<S>
where
    S: Observable<Item = Event<T, E>, Error = E>,
    T: Send + 'static,
    E: Send + 'static,
{
    type Item = T;
    type Error = E;

    fn run<O>(&self, observer: O, cancel: BoxedDisposable) -> Run
    where
        O: Observer<Item = T, Error = E> + 'static,
    {
        let sink = Arc::new(DematerializeSink::new(observer, cancel));
        let subscription = self.source.subscribe(Arc::clone(&sink));
        Run { sink, subscription }
    }
}

struct DematerializeSink<O> {
    sink: Sink<O>,
}

impl<O: Observer> DematerializeSink<O> {
    fn new(observer: O, cancel: BoxedDisposable) -> Self {
        Self {
            sink: Sink::new(observer, cancel),
        }
    }
}

impl<O: Observer> Observer for DematerializeSink<O> {
    type Item = Event<O::Item, O::Error>;
    type Error = O::Error;

    fn on(&self, event: Event<Self::Item, Self::Error>) {
        match event {
            Event::Next(Event::Next(value)) => self.sink.forward_on(Event::Next(value)),
            Event::Next(Event::Error(error)) | Event::Error(error) => self
                .sink
                .forward_terminal([Event::Error(error), Event::Completed]),
            Event::Next(Event::Completed) | Event::Completed => {
                self.sink.forward_terminal([Event::Completed])
            }
        }
    }
}

impl<O: Observer> Disposable for DematerializeSink<O> {
    fn dispose(&self) {
        self.sink.dispose();
    }

    fn is_disposed(&self) -> bool {
        self.sink.is_disposed()
    }
}
