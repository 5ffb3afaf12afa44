//! The five physiological stats an agent tracks.

/// Which stat a value, threshold table, or intent refers to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatKind {
    Hunger,
    Thirst,
    Energy,
    Health,
    Mood,
}

impl StatKind {
    pub const ALL: [StatKind; 5] = [
        StatKind::Hunger,
        StatKind::Thirst,
        StatKind::Energy,
        StatKind::Health,
        StatKind::Mood,
    ];

    /// The stats that drive survival intents, in tie-break precedence order.
    pub const SURVIVAL: [StatKind; 3] = [StatKind::Thirst, StatKind::Hunger, StatKind::Energy];

    /// Position in [`SURVIVAL`](Self::SURVIVAL); lower wins ties.
    /// Non-survival stats sort last.
    pub fn precedence(self) -> u8 {
        match self {
            StatKind::Thirst => 0,
            StatKind::Hunger => 1,
            StatKind::Energy => 2,
            StatKind::Health => 3,
            StatKind::Mood   => 4,
        }
    }

    /// `true` for stats where a lower value is worse.
    pub fn is_inverted(self) -> bool {
        matches!(self, StatKind::Energy | StatKind::Health | StatKind::Mood)
    }

    /// The value a stat is driven toward when satisfied.
    pub fn optimum(self) -> f32 {
        if self.is_inverted() { 100.0 } else { 0.0 }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatKind::Hunger => "hunger",
            StatKind::Thirst => "thirst",
            StatKind::Energy => "energy",
            StatKind::Health => "health",
            StatKind::Mood   => "mood",
        }
    }
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
