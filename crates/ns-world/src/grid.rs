//! `GridWorld` — the concrete `SpatialStore`.
//!
//! # Layout
//!
//! - `blocked` / `tilled`: dense per-cell flags, row-major.
//! - `occupancy`: sparse cell → agent map.  At most one agent per cell.
//! - `items`: `Vec<Option<Item>>` indexed by `ItemId`; removal leaves `None`
//!   so ids are never reused.
//! - `water` / `beds`: one R-tree per feature kind for nearest-site search.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ns_core::{AgentId, FeatureId, ItemId, Pos, Variety};

use crate::{Feature, FeatureKind, Item, SpatialStore, WorldError, WorldResult};

#[cfg(feature = "fx-hash")]
type CellMap<V> = rustc_hash::FxHashMap<Pos, V>;
#[cfg(not(feature = "fx-hash"))]
type CellMap<V> = std::collections::HashMap<Pos, V>;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct FeatureEntry {
    point: [i64; 2],
    id:    FeatureId,
}

impl RTreeObject for FeatureEntry {
    type Envelope = AABB<[i64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for FeatureEntry {
    fn distance_2(&self, point: &[i64; 2]) -> i64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

fn point(pos: Pos) -> [i64; 2] {
    [pos.x as i64, pos.y as i64]
}

// ── GridWorld ─────────────────────────────────────────────────────────────────

pub struct GridWorld {
    width:  i32,
    height: i32,

    blocked: Vec<bool>,
    tilled:  Vec<bool>,

    occupancy: CellMap<AgentId>,

    items:       Vec<Option<Item>>,
    items_by_cell: CellMap<Vec<ItemId>>,

    features:    Vec<Feature>,
    feature_at:  CellMap<FeatureId>,
    water:       RTree<FeatureEntry>,
    beds:        RTree<FeatureEntry>,
}

impl GridWorld {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    #[inline]
    fn cell_index(&self, pos: Pos) -> usize {
        (pos.y as usize) * (self.width as usize) + pos.x as usize
    }

    /// A rock sits on `pos`.  Off-grid cells are not blocked, just invalid.
    pub fn is_blocked(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.blocked[self.cell_index(pos)]
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Number of live items.
    pub fn item_count(&self) -> usize {
        self.items.iter().flatten().count()
    }

    /// Nearest site in `tree` that passes the validity and claim checks.
    ///
    /// The R-tree orders by Euclidean distance; the result is the minimum by
    /// Chebyshev distance, ties broken by id.  Since Chebyshev ≥ Euclid/√2,
    /// the scan can stop once Euclid² exceeds twice the best Chebyshev².
    fn nearest_site(&self, tree: &RTree<FeatureEntry>, from: Pos, asker: AgentId) -> Option<&Feature> {
        let mut best: Option<(u32, FeatureId)> = None;
        for (entry, d2) in tree.nearest_neighbor_iter_with_distance_2(&point(from)) {
            if let Some((cheb, _)) = best {
                let bound = (cheb as i64) * (cheb as i64) * 2;
                if d2 > bound {
                    break;
                }
            }
            let feature = &self.features[entry.id.index()];
            if !self.is_cell_valid(feature.pos) || self.is_claimed_by_other(feature.pos, asker) {
                continue;
            }
            let key = (from.chebyshev(feature.pos), feature.id);
            if best.is_none_or(|b| key < b) {
                best = Some(key);
            }
        }
        best.map(|(_, id)| &self.features[id.index()])
    }
}

impl SpatialStore for GridWorld {
    fn is_cell_valid(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && !self.is_blocked(pos)
    }

    fn occupant(&self, pos: Pos) -> Option<AgentId> {
        self.occupancy.get(&pos).copied()
    }

    fn is_tilled(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.tilled[self.cell_index(pos)]
    }

    fn feature(&self, id: FeatureId) -> Option<&Feature> {
        self.features.get(id.index())
    }

    fn nearest_unclaimed_drink_source(&self, from: Pos, asker: AgentId) -> Option<&Feature> {
        self.nearest_site(&self.water, from, asker)
    }

    fn nearest_unclaimed_bed(&self, from: Pos, asker: AgentId) -> Option<&Feature> {
        self.nearest_site(&self.beds, from, asker)
    }

    fn feature_at(&self, pos: Pos) -> Option<&Feature> {
        self.feature_at.get(&pos).map(|id| &self.features[id.index()])
    }

    fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.index()).and_then(Option::as_ref)
    }

    fn item_at(&self, pos: Pos) -> Option<&Item> {
        self.items_by_cell
            .get(&pos)
            .and_then(|ids| ids.iter().min())
            .and_then(|&id| self.item(id))
    }

    fn items(&self) -> Box<dyn Iterator<Item = &Item> + '_> {
        Box::new(self.items.iter().flatten())
    }

    fn place_agent(&mut self, agent: AgentId, pos: Pos) -> WorldResult<()> {
        if !self.in_bounds(pos) {
            return Err(WorldError::OutOfBounds(pos));
        }
        if self.is_blocked(pos) {
            return Err(WorldError::Blocked(pos));
        }
        if let Some(by) = self.occupant(pos) {
            return Err(WorldError::Occupied { pos, by });
        }
        self.occupancy.insert(pos, agent);
        Ok(())
    }

    fn move_agent_to(&mut self, agent: AgentId, from: Pos, to: Pos) -> WorldResult<()> {
        if self.occupant(from) != Some(agent) {
            return Err(WorldError::NotAt { agent, pos: from });
        }
        self.place_agent(agent, to)?;
        self.occupancy.remove(&from);
        Ok(())
    }

    fn vacate(&mut self, agent: AgentId, pos: Pos) {
        if self.occupant(pos) == Some(agent) {
            self.occupancy.remove(&pos);
        }
    }

    fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let item = self.items.get_mut(id.index())?.take()?;
        if let Some(ids) = self.items_by_cell.get_mut(&item.pos) {
            ids.retain(|&i| i != id);
            if ids.is_empty() {
                self.items_by_cell.remove(&item.pos);
            }
        }
        Some(item)
    }

    fn drop_item(&mut self, variety: Variety, pos: Pos, poisonous: bool) -> ItemId {
        let id = ItemId(self.items.len() as u32);
        self.items.push(Some(Item { id, pos, variety, poisonous }));
        self.items_by_cell.entry(pos).or_default().push(id);
        id
    }

    fn till(&mut self, pos: Pos) -> bool {
        if !self.is_cell_valid(pos) {
            return false;
        }
        let idx = self.cell_index(pos);
        !std::mem::replace(&mut self.tilled[idx], true)
    }
}

// ── GridWorldBuilder ──────────────────────────────────────────────────────────

/// Construct a [`GridWorld`], then call [`build`](Self::build).
///
/// ```
/// use ns_core::{Color, ItemKind, Pos, Variety};
/// use ns_world::{GridWorldBuilder, SpatialStore};
///
/// let mut b = GridWorldBuilder::new(10, 10);
/// b.water(Pos::new(2, 2)).bed(Pos::new(8, 8));
/// b.item(Variety::new(ItemKind::Berry, Color::Red), Pos::new(4, 4));
/// let world = b.build().unwrap();
/// assert!(world.item_at(Pos::new(4, 4)).is_some());
/// ```
pub struct GridWorldBuilder {
    width:    i32,
    height:   i32,
    rocks:    Vec<Pos>,
    features: Vec<(Pos, FeatureKind)>,
    items:    Vec<(Variety, Pos, bool)>,
}

impl GridWorldBuilder {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width:    width.max(0),
            height:   height.max(0),
            rocks:    Vec::new(),
            features: Vec::new(),
            items:    Vec::new(),
        }
    }

    pub fn water(&mut self, pos: Pos) -> &mut Self {
        self.features.push((pos, FeatureKind::Water));
        self
    }

    pub fn bed(&mut self, pos: Pos) -> &mut Self {
        self.features.push((pos, FeatureKind::Bed));
        self
    }

    /// Block a cell.
    pub fn rock(&mut self, pos: Pos) -> &mut Self {
        self.rocks.push(pos);
        self
    }

    pub fn item(&mut self, variety: Variety, pos: Pos) -> &mut Self {
        self.items.push((variety, pos, false));
        self
    }

    pub fn poisonous_item(&mut self, variety: Variety, pos: Pos) -> &mut Self {
        self.items.push((variety, pos, true));
        self
    }

    /// Validate every position and produce the world.  Items and features
    /// get ids in insertion order.
    pub fn build(&self) -> WorldResult<GridWorld> {
        let cells = (self.width as usize) * (self.height as usize);
        let mut world = GridWorld {
            width:         self.width,
            height:        self.height,
            blocked:       vec![false; cells],
            tilled:        vec![false; cells],
            occupancy:     CellMap::default(),
            items:         Vec::with_capacity(self.items.len()),
            items_by_cell: CellMap::default(),
            features:      Vec::with_capacity(self.features.len()),
            feature_at:    CellMap::default(),
            water:         RTree::new(),
            beds:          RTree::new(),
        };

        for &rock in &self.rocks {
            if !world.in_bounds(rock) {
                return Err(WorldError::OutOfBounds(rock));
            }
            let idx = world.cell_index(rock);
            world.blocked[idx] = true;
        }

        let mut water = Vec::new();
        let mut beds = Vec::new();
        for &(pos, kind) in &self.features {
            if !world.is_cell_valid(pos) {
                return Err(blocked_or_oob(&world, pos));
            }
            let id = FeatureId(world.features.len() as u32);
            world.features.push(Feature { id, pos, kind });
            world.feature_at.insert(pos, id);
            let entry = FeatureEntry { point: point(pos), id };
            match kind {
                FeatureKind::Water => water.push(entry),
                FeatureKind::Bed => beds.push(entry),
            }
        }
        world.water = RTree::bulk_load(water);
        world.beds = RTree::bulk_load(beds);

        for &(variety, pos, poisonous) in &self.items {
            if !world.is_cell_valid(pos) {
                return Err(blocked_or_oob(&world, pos));
            }
            world.drop_item(variety, pos, poisonous);
        }

        Ok(world)
    }
}

fn blocked_or_oob(world: &GridWorld, pos: Pos) -> WorldError {
    if world.in_bounds(pos) { WorldError::Blocked(pos) } else { WorldError::OutOfBounds(pos) }
}
