//! Activity log entities.

pub mod model;
pub mod status;

pub use model::{Activity, ActivityEntry, NewActivity};
pub use status::ActivityStatus;
