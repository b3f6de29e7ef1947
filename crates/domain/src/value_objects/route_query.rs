//! Route form input and the validated route query built from it

use serde::{Deserialize, Serialize};

use crate::errors::{FormField, ValidationError};

/// Route form input exactly as the user typed it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteForm {
    /// Start location (free text)
    pub start: String,
    /// End location (free text)
    pub end: String,
    /// Vehicle height in metres, still unparsed
    pub vehicle_height: String,
    /// Ask the backend to route around low bridges
    #[serde(default)]
    pub avoid_low_bridges: bool,
}

impl RouteForm {
    /// Create a form from raw input values
    #[must_use]
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        vehicle_height: impl Into<String>,
        avoid_low_bridges: bool,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            vehicle_height: vehicle_height.into(),
            avoid_low_bridges,
        }
    }

    /// Validate the form and build an immutable [`RouteQuery`]
    ///
    /// Blank fields are reported before the height is parsed, so an empty
    /// height is a missing field rather than an invalid one.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for a blank start, end or
    /// height and [`ValidationError::InvalidHeight`] when the height is not a
    /// finite number greater than zero.
    pub fn validate(&self) -> Result<RouteQuery, ValidationError> {
        let start = required(FormField::Start, &self.start)?;
        let end = required(FormField::End, &self.end)?;
        let height = required(FormField::VehicleHeight, &self.vehicle_height)?;

        let vehicle_height_m = height
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidHeight {
                value: height.to_string(),
            })?;

        RouteQuery::new(start, end, vehicle_height_m, self.avoid_low_bridges)
    }
}

fn required(field: FormField, value: &str) -> Result<&str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(trimmed)
}

/// A validated route request, ready to be sent to the routing backend
///
/// Start and end are trimmed and non-empty; the height is finite and
/// strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteQuery {
    start: String,
    end: String,
    vehicle_height_m: f64,
    avoid_low_bridges: bool,
}

impl RouteQuery {
    /// Create a query, enforcing the same invariants as [`RouteForm::validate`]
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if a location is blank or the height is
    /// not a finite positive number.
    pub fn new(
        start: impl AsRef<str>,
        end: impl AsRef<str>,
        vehicle_height_m: f64,
        avoid_low_bridges: bool,
    ) -> Result<Self, ValidationError> {
        let start = required(FormField::Start, start.as_ref())?;
        let end = required(FormField::End, end.as_ref())?;

        if !vehicle_height_m.is_finite() || vehicle_height_m <= 0.0 {
            return Err(ValidationError::InvalidHeight {
                value: vehicle_height_m.to_string(),
            });
        }

        Ok(Self {
            start: start.to_string(),
            end: end.to_string(),
            vehicle_height_m,
            avoid_low_bridges,
        })
    }

    /// Trimmed start location
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Trimmed end location
    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Vehicle height in metres
    #[must_use]
    pub const fn vehicle_height_m(&self) -> f64 {
        self.vehicle_height_m
    }

    /// Whether low bridges should be avoided
    #[must_use]
    pub const fn avoid_low_bridges(&self) -> bool {
        self.avoid_low_bridges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_form_is_trimmed() {
        let query = RouteForm::new("  Leeds ", "\tYork\n", " 4.2 ", true)
            .validate()
            .unwrap();
        assert_eq!(query.start(), "Leeds");
        assert_eq!(query.end(), "York");
        assert!((query.vehicle_height_m() - 4.2).abs() < f64::EPSILON);
        assert!(query.avoid_low_bridges());
    }

    #[test]
    fn blank_start_is_missing() {
        let err = RouteForm::new("   ", "York", "4.2", false)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                field: FormField::Start
            }
        );
    }

    #[test]
    fn blank_end_is_missing() {
        let err = RouteForm::new("Leeds", "", "4.2", false)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), FormField::End);
    }

    #[test]
    fn blank_height_is_missing_not_invalid() {
        let err = RouteForm::new("Leeds", "York", "  ", false)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                field: FormField::VehicleHeight
            }
        );
    }

    #[test]
    fn non_numeric_height_is_invalid() {
        let err = RouteForm::new("Leeds", "York", "four", false)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidHeight {
                value: "four".to_string()
            }
        );
    }

    #[test]
    fn zero_and_negative_heights_are_invalid() {
        for height in ["0", "0.0", "-1", "-0.5"] {
            let err = RouteForm::new("Leeds", "York", height, false)
                .validate()
                .unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidHeight { .. }),
                "height {height} should be rejected"
            );
        }
    }

    #[test]
    fn non_finite_heights_are_invalid() {
        for height in ["inf", "NaN", "infinity"] {
            let result = RouteForm::new("Leeds", "York", height, false).validate();
            assert!(
                matches!(result, Err(ValidationError::InvalidHeight { .. })),
                "height {height} should be rejected"
            );
        }
    }

    #[test]
    fn query_new_enforces_invariants() {
        assert!(RouteQuery::new("A", "B", 3.0, false).is_ok());
        assert!(RouteQuery::new("A", " ", 3.0, false).is_err());
        assert!(RouteQuery::new("A", "B", f64::NAN, false).is_err());
        assert!(RouteQuery::new("A", "B", 0.0, false).is_err());
    }

    #[test]
    fn form_deserializes_without_avoid_flag() {
        let form: RouteForm =
            serde_json::from_str(r#"{"start":"A","end":"B","vehicle_height":"3.5"}"#).unwrap();
        assert!(!form.avoid_low_bridges);
    }
}
