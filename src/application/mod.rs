// Application layer - the tracker service and what it hands back to callers

pub mod error;
pub mod notifier;
pub mod reporting;
pub mod service;

pub use error::*;
pub use notifier::*;
pub use reporting::*;
pub use service::*;
