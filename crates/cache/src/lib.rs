#![warn(clippy::unwrap_used)]

pub mod clock;
pub mod local;

pub use clock::{Clock, ManualClock, SystemClock};
pub use local::LoadCache;
