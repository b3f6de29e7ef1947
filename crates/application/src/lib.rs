//! Application layer - Use cases and orchestration
//!
//! Contains the route planning flow, the result renderer and the port
//! definitions the infrastructure layer implements.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
