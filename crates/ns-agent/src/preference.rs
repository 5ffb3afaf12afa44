//! Food preferences and the net-preference scoring contract.
//!
//! How preferences are learned is not this crate's concern; the scheduler
//! only compares scores.

use ns_core::{Color, ItemKind, Variety};

/// A like or dislike of one or both attributes of a variety.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Preference {
    pub kind:    Option<ItemKind>,
    pub color:   Option<Color>,
    /// Positive for likes, negative for dislikes.
    pub valence: i32,
}

impl Preference {
    pub fn likes(kind: Option<ItemKind>, color: Option<Color>) -> Self {
        Self { kind, color, valence: 1 }
    }

    pub fn dislikes(kind: Option<ItemKind>, color: Option<Color>) -> Self {
        Self { kind, color, valence: -1 }
    }

    /// Every attribute this preference names matches `variety`.
    pub fn matches(&self, variety: Variety) -> bool {
        (self.kind.is_some() || self.color.is_some())
            && self.kind.is_none_or(|k| k == variety.kind)
            && self.color.is_none_or(|c| c == variety.color)
    }

    /// Names both kind and color.
    #[inline]
    pub fn is_combo(&self) -> bool {
        self.kind.is_some() && self.color.is_some()
    }
}

/// One agent's preference list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Preferences(pub Vec<Preference>);

/// How well a food variety suits an agent's tastes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Affinity {
    /// Net score ≤ 0: edible, but nothing to like.
    Any,
    /// Liked through a single attribute.
    Partial,
    /// Liked through a preference naming both kind and color.
    Perfect,
}

/// Scoring contract: a signed score used only for ranking.
pub trait NetPreference: Send + Sync {
    fn net_preference(&self, prefs: &Preferences, variety: Variety) -> i32;
}

/// Sums the valence of every matching preference.
#[derive(Copy, Clone, Debug, Default)]
pub struct SummedPreference;

impl NetPreference for SummedPreference {
    fn net_preference(&self, prefs: &Preferences, variety: Variety) -> i32 {
        prefs.0.iter().filter(|p| p.matches(variety)).map(|p| p.valence).sum()
    }
}

impl Preferences {
    /// Grade `variety` for food selection.
    pub fn affinity(&self, variety: Variety, scorer: &dyn NetPreference) -> Affinity {
        if scorer.net_preference(self, variety) <= 0 {
            return Affinity::Any;
        }
        let perfect = self.0.iter().any(|p| p.valence > 0 && p.is_combo() && p.matches(variety));
        if perfect { Affinity::Perfect } else { Affinity::Partial }
    }
}
