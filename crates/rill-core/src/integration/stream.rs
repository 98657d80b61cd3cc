//! Bridge from observables to `futures::Stream`.
//!
//! [`EventStream`] subscribes once and buffers every delivered event in an
//! unbounded channel, so producers never block on a slow consumer. The
//! stream yields the terminal event and then ends. Dropping it disposes the
//! subscription.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::mpsc;
use futures::future;
use futures::stream::{Stream, StreamExt};
use tracing::trace;

use crate::foundation::disposable::{BoxedDisposable, Disposable};
use crate::foundation::event::Event;
use crate::foundation::observable::Observable;
use crate::foundation::observer::AnonymousObserver;

/// A subscription consumed as a [`Stream`] of events.
pub struct EventStream<T, E> {
    receiver: mpsc::UnboundedReceiver<Event<T, E>>,
    subscription: BoxedDisposable,
}

impl<T: Send + 'static, E: Send + 'static> EventStream<T, E> {
    /// Subscribes to `source`.
    pub fn new<S>(source: &S) -> Self
    where
        S: Observable<Item = T, Error = E>,
    {
        let (sender, receiver) = mpsc::unbounded();
        let observer = AnonymousObserver::new(move |event: Event<T, E>| {
            let terminal = event.is_terminal();
            if sender.unbounded_send(event).is_err() {
                trace!("Event stream receiver dropped");
            }
            if terminal {
                sender.close_channel();
            }
        });

        Self {
            receiver,
            subscription: source.subscribe(observer),
        }
    }

    /// Stops the subscription. Events already buffered are still yielded,
    /// then the stream ends.
    pub fn dispose(&self) {
        self.subscription.dispose();
    }

    /// Converts the stream into `Result`s, ending at completion.
    pub fn into_results(self) -> impl Stream<Item = Result<T, E>> {
        self.filter_map(|event| future::ready(event.into_result()))
    }
}

impl<T, E> Stream for EventStream<T, E> {
    type Item = Event<T, E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_next_unpin(cx)
    }
}

impl<T, E> Drop for EventStream<T, E> {
    fn drop(&mut self) {
        self.subscription.dispose();
    }
}
