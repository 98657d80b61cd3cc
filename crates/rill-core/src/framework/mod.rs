//! Framework layer - operators and the machinery they share.
//!
//! This module contains:
//! - [`Sink`], the per-subscription terminal-once/auto-dispose state
//! - [`Producer`], the base every sink-backed observable is built on
//! - The two termination-reifying operators, [`Materialize`] and [`Dematerialize`]

pub mod dematerialize;
pub mod materialize;
pub mod producer;
pub mod sink;

pub use dematerialize::Dematerialize;
pub use materialize::Materialize;
pub use producer::{Producer, Run};
pub use sink::Sink;
