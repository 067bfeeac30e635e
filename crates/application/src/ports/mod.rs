//! Application ports
//!
//! Traits at the boundary between the scan pipeline and the outside world.

mod classifier;
mod progress;

pub use classifier::ClassifierPort;
pub use progress::{NoopProgress, ProgressSink};
