//! Base for observables that run one [`Sink`](super::sink::Sink) per
//! subscription.
//!
//! Implement [`Producer::run`] instead of [`Observable::subscribe`]: `run`
//! receives the downstream observer together with a `cancel` handle for the
//! sink, builds the sink, subscribes it upstream, and reports both halves in a
//! [`Run`]. The blanket [`Observable`] impl wires them together:
//!
//! ```text
//! subscribe(observer)
//!   ├─ slot  = SingleAssignmentDisposable      (upstream, not known yet)
//!   ├─ run   = producer.run(observer, slot)     sink owns `slot` as cancel
//!   ├─ slot.set(run.subscription)               disposed at once if the
//!   │                                           sink already terminated
//!   └─ return binary(run.sink, slot)
//! ```

use std::sync::Arc;

use tracing::{trace_span, warn};

use crate::foundation::disposable::{BoxedDisposable, SingleAssignmentDisposable, disposables};
use crate::foundation::observable::Observable;
use crate::foundation::observer::Observer;

/// The two halves of a running subscription.
pub struct Run {
    /// The sink created for this subscription.
    pub sink: BoxedDisposable,
    /// The upstream subscription the sink is attached to.
    pub subscription: BoxedDisposable,
}

/// An observable built from a per-subscription sink.
pub trait Producer: Send + Sync {
    /// The value type carried by `Next` events.
    type Item: Send + 'static;
    /// The failure type carried by `Error` events.
    type Error: Send + 'static;

    /// Creates the sink for `observer` and attaches it upstream.
    ///
    /// `cancel` must be handed to the sink; disposing it releases the
    /// upstream subscription returned in [`Run::subscription`].
    fn run<O>(&self, observer: O, cancel: BoxedDisposable) -> Run
    where
        O: Observer<Item = Self::Item, Error = Self::Error> + 'static;
}

impl<P: Producer> Observable for P {
    type Item = P::Item;
    type Error = P::Error;

    fn subscribe<O>(&self, observer: O) -> BoxedDisposable
    where
        O: Observer<Item = Self::Item, Error = Self::Error> + 'static,
    {
        let span = trace_span!("subscribe", producer = std::any::type_name::<P>());
        let _enter = span.enter();

        let upstream = Arc::new(SingleAssignmentDisposable::new());
        let run = self.run(observer, upstream.clone());

        if let Err(error) = upstream.set(run.subscription) {
            warn!(%error, "Upstream subscription slot was already filled");
        }

        disposables::binary(run.sink, upstream)
    }
}
