//! The producer side of the protocol.

use std::sync::Arc;

use super::disposable::BoxedDisposable;
use super::observer::Observer;

/// A producer of events.
///
/// Subscribing begins delivery to `observer`, synchronously or
/// asynchronously, and returns a handle that stops delivery when disposed.
/// Disposing has no effect on events already delivered or mid-delivery.
pub trait Observable: Send + Sync {
    /// The value type carried by `Next` events.
    type Item: Send + 'static;
    /// The failure type carried by `Error` events.
    type Error: Send + 'static;

    /// Attaches `observer` and returns its subscription.
    fn subscribe<O>(&self, observer: O) -> BoxedDisposable
    where
        O: Observer<Item = Self::Item, Error = Self::Error> + 'static;
}

impl<S: Observable + ?Sized> Observable for Arc<S> {
    type Item = S::Item;
    type Error = S::Error;

    fn subscribe<O>(&self, observer: O) -> BoxedDisposable
    where
        O: Observer<Item = Self::Item, Error = Self::Error> + 'static,
    {
        (**self).subscribe(observer)
    }
}
