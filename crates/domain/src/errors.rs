//! Domain-level errors

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Form fields that can fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    /// Start location
    Start,
    /// End location
    End,
    /// Vehicle height in metres
    VehicleHeight,
}

impl FormField {
    /// Machine-readable field name, matching the wire request keys
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::VehicleHeight => "vehicle_height_m",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Start => "Start location",
            Self::End => "End location",
            Self::VehicleHeight => "Vehicle height",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Errors raised while turning form input into a [`RouteQuery`](crate::RouteQuery)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty or blank
    #[error("{field} is required")]
    MissingField {
        /// The offending field
        field: FormField,
    },

    /// The vehicle height was not a finite number greater than zero
    #[error("Vehicle height must be a number greater than 0 (got \"{value}\")")]
    InvalidHeight {
        /// The height as it was entered
        value: String,
    },
}

impl ValidationError {
    /// The field this error should be shown next to
    #[must_use]
    pub const fn field(&self) -> FormField {
        match self {
            Self::MissingField { field } => *field,
            Self::InvalidHeight { .. } => FormField::VehicleHeight,
        }
    }
}
