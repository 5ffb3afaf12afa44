//! Items an agent is carrying.

use ns_core::{ItemKind, Variety};

/// One carried item.  `water` is only meaningful for vessels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Carried {
    pub variety:   Variety,
    pub water:     bool,
    pub poisonous: bool,
}

impl Carried {
    pub fn new(variety: Variety) -> Self {
        Self { variety, water: false, poisonous: false }
    }

    pub fn poisoned(variety: Variety) -> Self {
        Self { variety, water: false, poisonous: true }
    }

    #[inline]
    pub fn is_edible(&self) -> bool {
        self.variety.kind.is_edible()
    }

    #[inline]
    pub fn is_full_vessel(&self) -> bool {
        self.variety.kind == ItemKind::Vessel && self.water
    }

    #[inline]
    pub fn is_empty_vessel(&self) -> bool {
        self.variety.kind == ItemKind::Vessel && !self.water
    }
}

/// A small bounded bag.  Slot indices are stable until an item is taken.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    items:    Vec<Carried>,
    capacity: usize,
}

impl Inventory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: Vec::with_capacity(capacity), capacity }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `item`; returns `false` (and drops nothing) when full.
    pub fn push(&mut self, item: Carried) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    #[inline]
    pub fn get(&self, slot: usize) -> Option<&Carried> {
        self.items.get(slot)
    }

    #[inline]
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Carried> {
        self.items.get_mut(slot)
    }

    pub fn take(&mut self, slot: usize) -> Option<Carried> {
        (slot < self.items.len()).then(|| self.items.remove(slot))
    }

    /// First slot whose item satisfies `pred`.
    pub fn find(&self, pred: impl Fn(&Carried) -> bool) -> Option<usize> {
        self.items.iter().position(pred)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Carried)> {
        self.items.iter().enumerate()
    }
}
