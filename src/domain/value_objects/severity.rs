use serde::{Deserialize, Serialize};

/// Severity of an anomaly event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

impl Severity {
    #[must_use]
    pub const fn emoji(&self) -> &str {
        match self {
            Self::Warning => "\u{26a0}\u{fe0f}",
            Self::Critical => "\u{1f534}",
        }
    }

    /// Fixed outlook text attached to every anomaly of this severity.
    #[must_use]
    pub const fn prediction(&self) -> &'static str {
        match self {
            Self::Warning => "Monitor closely \u{2014} trend may worsen",
            Self::Critical => "Immediate intervention may be required",
        }
    }
}
