//! Domain layer for RouteSafe
//!
//! Contains the route query, the canonical route result and the geometry
//! primitives shared by the client and the renderer. This layer has no
//! I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::{FormField, ValidationError};
pub use value_objects::*;
