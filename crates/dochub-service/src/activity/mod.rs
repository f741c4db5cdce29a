//! Activity log recording and feed.

pub mod recorder;

pub use recorder::ActivityRecorder;
