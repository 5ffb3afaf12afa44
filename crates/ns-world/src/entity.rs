//! Things that exist on the grid besides agents.

use ns_core::{FeatureId, ItemId, Pos, Variety};

/// A loose item.  Items do not block movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id:        ItemId,
    pub pos:       Pos,
    pub variety:   Variety,
    pub poisonous: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    /// A spring an agent drinks from while standing on it.
    Water,
    Bed,
}

/// A fixed site.  An agent standing on a feature claims it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Feature {
    pub id:   FeatureId,
    pub pos:  Pos,
    pub kind: FeatureKind,
}
