//! Adapter implementations of the port traits.
//!
//! `live` talks to the real world, `recording` wraps `live` and writes
//! cassettes, `replaying` serves cassettes back for tests.

pub mod live;
pub mod recording;
pub mod replaying;
