//! The `SpatialStore` trait.
//!
//! Intent formation only ever sees `&dyn SpatialStore`; the mutating methods
//! are called from the serial execution phase.

use ns_core::{AgentId, FeatureId, ItemId, Pos, Variety};

use crate::{Feature, Item, WorldResult};

/// World storage as consumed by the scheduler.
///
/// "Unclaimed" means no *other* agent stands on the cell.  Occupancy is the
/// only claim mechanism: a later agent in the same pass simply finds the
/// cell taken.
pub trait SpatialStore: Send + Sync {
    // ── Cells ─────────────────────────────────────────────────────────────

    /// In bounds and not blocked.
    fn is_cell_valid(&self, pos: Pos) -> bool;

    fn occupant(&self, pos: Pos) -> Option<AgentId>;

    fn is_cell_occupied(&self, pos: Pos) -> bool {
        self.occupant(pos).is_some()
    }

    /// Occupied by someone other than `asker`.
    fn is_claimed_by_other(&self, pos: Pos, asker: AgentId) -> bool {
        self.occupant(pos).is_some_and(|a| a != asker)
    }

    fn is_tilled(&self, pos: Pos) -> bool;

    // ── Features ──────────────────────────────────────────────────────────

    fn feature(&self, id: FeatureId) -> Option<&Feature>;

    /// Nearest valid water source not claimed by another agent.
    fn nearest_unclaimed_drink_source(&self, from: Pos, asker: AgentId) -> Option<&Feature>;

    /// Nearest valid bed not claimed by another agent.
    fn nearest_unclaimed_bed(&self, from: Pos, asker: AgentId) -> Option<&Feature>;

    /// Feature standing on `pos`, if any.
    fn feature_at(&self, pos: Pos) -> Option<&Feature>;

    // ── Items ─────────────────────────────────────────────────────────────

    /// Look up a live item.  `None` once it has been removed.
    fn item(&self, id: ItemId) -> Option<&Item>;

    /// Lowest-id item lying on `pos`.
    fn item_at(&self, pos: Pos) -> Option<&Item>;

    /// Every live item in id order.
    fn items(&self) -> Box<dyn Iterator<Item = &Item> + '_>;

    // ── Mutation (execution phase only) ───────────────────────────────────

    /// Put `agent` on `pos` (initial placement).
    fn place_agent(&mut self, agent: AgentId, pos: Pos) -> WorldResult<()>;

    /// Move `agent` from `from` to `to`, checking validity and occupancy.
    fn move_agent_to(&mut self, agent: AgentId, from: Pos, to: Pos) -> WorldResult<()>;

    /// Clear `pos` if `agent` occupies it.
    fn vacate(&mut self, agent: AgentId, pos: Pos);

    fn remove_item(&mut self, id: ItemId) -> Option<Item>;

    /// Drop a fresh item on `pos` and return its new id.
    fn drop_item(&mut self, variety: Variety, pos: Pos, poisonous: bool) -> ItemId;

    /// Mark `pos` tilled.  Returns `false` if it was already tilled or invalid.
    fn till(&mut self, pos: Pos) -> bool;
}
