/*
[INPUT]:  Public API exports for batteryabn-dashboard crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod blob;
pub mod config;
pub mod error;
pub mod request;
pub mod route;
pub mod scope;
pub mod views;

// Re-export main types for convenience
pub use blob::{BlobKind, BlobStore, ObjectUrl};
pub use config::{ConfigError, ConfigOverrides, DashboardConfig};
pub use error::{ErrorCategory, FetchError, Notice, Outcome, ViewError};
pub use request::{EnqueueTarget, Executor, Request, Response, drive};
pub use route::{Route, RouteStack};
pub use scope::{MountId, MountScope, Mounted};
pub use views::{Entry, Screen, View};
