/*
[INPUT]:  HTTP client configuration and backend endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod cells;
pub mod client;
pub mod error;
pub mod projects;
pub mod tasks;
pub mod trs;

pub use error::{ClientError, Result};

pub use client::{BatteryClient, ClientConfig, DEFAULT_BASE_URL};
