//! Adapter implementations for port traits.
//!
//! - `live/`: Runs the real renderer program
//! - `recording/`: Record interactions to cassettes
//! - `replaying/`: Replay interactions from cassettes

pub mod live;
pub mod recording;
pub mod replaying;
