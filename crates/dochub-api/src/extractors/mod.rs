//! Custom Axum extractors.

pub mod actor;
pub mod json;
pub mod multipart;
pub mod path;

pub use actor::Actor;
pub use json::ValidJson;
pub use multipart::FormFields;
