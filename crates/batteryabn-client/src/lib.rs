/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public batteryabn client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod types;

// Re-export commonly used types from http
pub use http::{BatteryClient, ClientConfig, ClientError, Result, DEFAULT_BASE_URL};

// Re-export all types
pub use types::*;
