//! Bridge risk classification

use std::fmt;

use serde::{Deserialize, Serialize};

/// Low-bridge risk for a route or a single bridge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Comfortable clearance
    Low,
    /// Close to the height limit
    Medium,
    /// Vehicle does not fit
    High,
    /// No data
    #[default]
    Unknown,
}

impl RiskLevel {
    /// Parse the risk vocabularies seen from routing backends
    ///
    /// Accepts `low|medium|high` as well as `Near limit` and `Conflict`,
    /// case-insensitively. Anything unrecognized is [`RiskLevel::Unknown`].
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "low" | "ok" | "safe" => Self::Low,
            "medium" | "near limit" | "warn" | "warning" => Self::Medium,
            "high" | "conflict" | "danger" => Self::High,
            _ => Self::Unknown,
        }
    }

    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the level carries any information
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
