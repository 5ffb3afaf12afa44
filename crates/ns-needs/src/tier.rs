//! The need/tier classifier.

use serde::{Deserialize, Serialize};

/// Ordinal urgency of a stat.  Comparison follows declaration order, so
/// `Tier::Crisis > Tier::Severe > … > Tier::None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    #[default]
    None,
    Mild,
    Moderate,
    Severe,
    Crisis,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::None     => "none",
            Tier::Mild     => "mild",
            Tier::Moderate => "moderate",
            Tier::Severe   => "severe",
            Tier::Crisis   => "crisis",
        }
    }

    /// `true` for Severe and Crisis.
    #[inline]
    pub fn is_severe(self) -> bool {
        self >= Tier::Severe
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Four boundaries plus a direction flag.
///
/// For a non-inverted table the boundaries increase
/// (`mild < moderate < severe < crisis`); for an inverted table they
/// decrease.  A value exactly on a boundary belongs to that boundary's tier.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub mild:     f32,
    pub moderate: f32,
    pub severe:   f32,
    pub crisis:   f32,
    #[serde(default)]
    pub inverted: bool,
}

impl ThresholdTable {
    pub const fn rising(mild: f32, moderate: f32, severe: f32, crisis: f32) -> Self {
        Self { mild, moderate, severe, crisis, inverted: false }
    }

    pub const fn falling(mild: f32, moderate: f32, severe: f32, crisis: f32) -> Self {
        Self { mild, moderate, severe, crisis, inverted: true }
    }

    /// Boundaries from most to least urgent, paired with their tier.
    #[inline]
    fn boundaries(&self) -> [(f32, Tier); 4] {
        [
            (self.crisis,   Tier::Crisis),
            (self.severe,   Tier::Severe),
            (self.moderate, Tier::Moderate),
            (self.mild,     Tier::Mild),
        ]
    }

    /// `true` if boundaries are strictly monotonic in the table's direction.
    pub fn is_ordered(&self) -> bool {
        let b = [self.mild, self.moderate, self.severe, self.crisis];
        b.windows(2).all(|w| if self.inverted { w[0] > w[1] } else { w[0] < w[1] })
    }
}

/// Classify `value` against `table`.  Total over [0, 100]; values outside
/// that range classify like the nearest end.
pub fn tier(value: f32, table: &ThresholdTable) -> Tier {
    for (bound, tier) in table.boundaries() {
        let reached = if table.inverted { value <= bound } else { value >= bound };
        if reached {
            return tier;
        }
    }
    Tier::None
}
