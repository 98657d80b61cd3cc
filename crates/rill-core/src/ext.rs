//! Chaining methods available on every [`Observable`].

use crate::foundation::disposable::BoxedDisposable;
use crate::foundation::event::Event;
use crate::foundation::observable::Observable;
use crate::foundation::observer::AnonymousObserver;
use crate::framework::dematerialize::Dematerialize;
use crate::framework::materialize::Materialize;
use crate::integration::stream::EventStream;

/// Operator methods for observables.
pub trait ObservableExt: Observable + Sized {
    /// Reifies termination as a final `next` value, followed by `completed`.
    fn materialize(self) -> Materialize<Self> {
        Materialize::new(self)
    }

    /// Turns reified termination back into real termination.
    fn dematerialize<T, E>(self) -> Dematerialize<Self>
    where
        Self: Observable<Item = Event<T, E>, Error = E>,
        T: Send + 'static,
        E: Send + 'static,
    {
        Dematerialize::new(self)
    }

    /// Subscribes a closure. Events after the first terminal one are ignored.
    fn subscribe_fn<F>(&self, handler: F) -> BoxedDisposable
    where
        F: Fn(Event<Self::Item, Self::Error>) + Send + Sync + 'static,
    {
        self.subscribe(AnonymousObserver::new(handler))
    }

    /// Subscribes and returns the events as a `futures::Stream`.
    fn into_stream(self) -> EventStream<Self::Item, Self::Error> {
        EventStream::new(&self)
    }
}

impl<S: Observable> ObservableExt for S {}
