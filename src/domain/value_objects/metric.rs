use serde::{Deserialize, Serialize};

/// A device metric tracked by the anomaly detector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Cpu,
    Memory,
    Latency,
    Bandwidth,
}

impl Metric {
    /// Every tracked metric, in evaluation order.
    pub const ALL: [Self; 4] = [Self::Cpu, Self::Memory, Self::Latency, Self::Bandwidth];

    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Cpu | Self::Memory => "%",
            Self::Latency => "ms",
            Self::Bandwidth => "Mbps",
        }
    }

    /// Capitalized name used in human-readable messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cpu => "Cpu",
            Self::Memory => "Memory",
            Self::Latency => "Latency",
            Self::Bandwidth => "Bandwidth",
        }
    }

    /// Position of this metric in [`Metric::ALL`].
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Cpu => 0,
            Self::Memory => 1,
            Self::Latency => 2,
            Self::Bandwidth => 3,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Memory => write!(f, "memory"),
            Self::Latency => write!(f, "latency"),
            Self::Bandwidth => write!(f, "bandwidth"),
        }
    }
}
