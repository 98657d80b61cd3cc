//! Shared fixtures for unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::foundation::disposable::{BoxedDisposable, disposables};
use crate::foundation::event::Event;
use crate::foundation::observable::Observable;
use crate::foundation::observer::{AnonymousObserver, Observer};

/// Records every event it receives, without any terminal guard.
pub(crate) struct Recorder<T, E> {
    events: Arc<Mutex<Vec<Event<T, E>>>>,
}

impl<T, E> Clone for Recorder<T, E> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

impl<T: Send + 'static, E: Send + 'static> Recorder<T, E> {
    pub(crate) fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// An observer feeding the same log, but ignoring events after a terminal.
    pub(crate) fn guarded(&self) -> impl Observer<Item = T, Error = E> + 'static {
        let events = Arc::clone(&self.events);
        AnonymousObserver::new(move |event| events.lock().push(event))
    }

    pub(crate) fn events(&self) -> Vec<Event<T, E>>
    where
        T: Clone,
        E: Clone,
    {
        self.events.lock().clone()
    }
}

impl<T: Send, E: Send> Observer for Recorder<T, E> {
    type Item = T;
    type Error = E;

    fn on(&self, event: Event<T, E>) {
        self.events.lock().push(event);
    }
}

/// A disposable that counts how many times its release action ran.
pub(crate) fn counting_disposable() -> (Arc<AtomicUsize>, BoxedDisposable) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let disposable = disposables::create(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (count, disposable)
}

/// A source that replays a fixed script verbatim, protocol violations included.
pub(crate) struct Scripted<T, E> {
    script: Vec<Event<T, E>>,
    released: Arc<AtomicUsize>,
}

impl<T, E> Scripted<T, E> {
    pub(crate) fn new(script: Vec<Event<T, E>>) -> Self {
        Self {
            script,
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times the subscription handed out by this source was released.
    pub(crate) fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl<T, E> Observable for Scripted<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Item = T;
    type Error = E;

    fn subscribe<O>(&self, observer: O) -> BoxedDisposable
    where
        O: Observer<Item = T, Error = E> + 'static,
    {
        for event in &self.script {
            observer.on(event.clone());
        }
        let counter = Arc::clone(&self.released);
        disposables::create(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }
}
