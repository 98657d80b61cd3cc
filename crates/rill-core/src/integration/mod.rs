//! Integration layer - getting events into and out of the protocol.
//!
//! - [`source`]: closure-backed and fixed-sequence observables
//! - [`stream`]: consuming an observable as a `futures::Stream`

pub mod source;
pub mod stream;

pub use source::{Create, Fail, FromIter, Never, create, empty, fail, from_iter, just, never};
pub use stream::EventStream;
