pub mod json;
pub mod lines;
mod repository;

pub use json::Snapshot;
pub use lines::LineFormatError;
pub use repository::*;
