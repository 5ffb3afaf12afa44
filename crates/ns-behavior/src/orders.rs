//! Work orders: a third intent tier below survival needs and above idling.
//!
//! Orders sit on a shared `OrderBoard`.  The decide phase only *requests*
//! changes through [`OrderAction`]; ns-sim applies them serially, so the
//! first agent in processing order wins a contested order.

use ns_core::{AgentId, ItemKind, OrderId, Pos};
use tracing::debug;

use crate::{ActionKind, BehaviorError, BehaviorResult, Intent, SimContext, Target};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OrderKind {
    TillSoil(Pos),
    /// Fetch an empty vessel, carry it to water, fill it.
    FillVessel,
    /// Turn a carried gourd into a vessel.
    CraftVessel,
}

impl OrderKind {
    /// Where the work happens, when that is fixed.
    pub fn site(&self) -> Option<Pos> {
        match *self {
            OrderKind::TillSoil(pos) => Some(pos),
            OrderKind::FillVessel | OrderKind::CraftVessel => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    Open,
    Assigned(AgentId),
    Paused(AgentId),
    Done,
}

impl OrderStatus {
    pub fn holder(self) -> Option<AgentId> {
        match self {
            OrderStatus::Assigned(a) | OrderStatus::Paused(a) => Some(a),
            OrderStatus::Open | OrderStatus::Done => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub id:     OrderId,
    pub kind:   OrderKind,
    pub status: OrderStatus,
}

/// Order-board change requested by a decision.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OrderAction {
    /// Claim an open order, or resume one already held.
    Take(OrderId),
    /// A survival intent replaced the order's intent.
    Pause(OrderId),
    /// The order's builder could not produce an intent.
    Abandon(OrderId),
}

#[derive(Clone, Debug, Default)]
pub struct OrderBoard {
    orders: Vec<Order>,
}

impl OrderBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, kind: OrderKind) -> OrderId {
        let id = OrderId(self.orders.len() as u32);
        self.orders.push(Order { id, kind, status: OrderStatus::Open });
        id
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn open_count(&self) -> usize {
        self.orders.iter().filter(|o| o.status == OrderStatus::Open).count()
    }

    fn get_mut(&mut self, id: OrderId) -> BehaviorResult<&mut Order> {
        self.orders.get_mut(id.index()).ok_or(BehaviorError::OrderNotFound(id))
    }

    /// Assign `id` to `agent`.  Fails if another agent holds it or it is done.
    pub fn take(&mut self, id: OrderId, agent: AgentId) -> BehaviorResult<()> {
        let order = self.get_mut(id)?;
        match order.status {
            OrderStatus::Done => Err(BehaviorError::OrderDone(id)),
            OrderStatus::Assigned(by) | OrderStatus::Paused(by) if by != agent => {
                Err(BehaviorError::OrderHeld { order: id, by })
            }
            _ => {
                order.status = OrderStatus::Assigned(agent);
                Ok(())
            }
        }
    }

    /// Set `id` aside while `agent` deals with a need.  No-op unless held by `agent`.
    pub fn pause(&mut self, id: OrderId, agent: AgentId) -> BehaviorResult<()> {
        let order = self.get_mut(id)?;
        if order.status.holder() == Some(agent) {
            order.status = OrderStatus::Paused(agent);
        }
        Ok(())
    }

    /// Give `id` back to the board.  No-op unless held by `agent`.
    pub fn abandon(&mut self, id: OrderId, agent: AgentId) -> BehaviorResult<()> {
        let order = self.get_mut(id)?;
        if order.status.holder() == Some(agent) {
            order.status = OrderStatus::Open;
        }
        Ok(())
    }

    pub fn complete(&mut self, id: OrderId) -> BehaviorResult<()> {
        self.get_mut(id)?.status = OrderStatus::Done;
        Ok(())
    }

    /// Apply a decision's request.  Returns `false` when a `Take` lost the race.
    pub fn apply(&mut self, agent: AgentId, action: OrderAction) -> BehaviorResult<bool> {
        match action {
            OrderAction::Take(id) => match self.take(id, agent) {
                Ok(()) => {
                    debug!(%agent, order = %id, "order taken");
                    Ok(true)
                }
                Err(BehaviorError::OrderHeld { .. } | BehaviorError::OrderDone(_)) => Ok(false),
                Err(e) => Err(e),
            },
            OrderAction::Pause(id) => {
                debug!(%agent, order = %id, "order paused");
                self.pause(id, agent).map(|()| true)
            }
            OrderAction::Abandon(id) => {
                debug!(%agent, order = %id, "order abandoned");
                self.abandon(id, agent).map(|()| true)
            }
        }
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// Pick the order `agent` should work on and build its current phase.
///
/// An order the agent already holds comes first; otherwise the nearest open
/// order whose builder succeeds.  Returns the intent (if any) plus the board
/// request to send.
pub fn next_for(agent: AgentId, ctx: &SimContext<'_>) -> (Option<Intent>, Option<OrderAction>) {
    let held = ctx
        .orders
        .iter()
        .find(|o| o.status.holder() == Some(agent));
    if let Some(order) = held {
        return match build(order, agent, ctx) {
            Some(intent) => (Some(intent), Some(OrderAction::Take(order.id))),
            None => (None, Some(OrderAction::Abandon(order.id))),
        };
    }

    let pos = ctx.pos(agent);
    let mut open: Vec<&Order> = ctx
        .orders
        .iter()
        .filter(|o| o.status == OrderStatus::Open)
        .collect();
    open.sort_by_key(|o| (o.kind.site().map_or(0, |s| pos.chebyshev(s)), o.id));
    open.into_iter()
        .find_map(|order| build(order, agent, ctx).map(|i| (i, order.id)))
        .map_or((None, None), |(intent, id)| (Some(intent), Some(OrderAction::Take(id))))
}

/// Build the current phase of `order` from what the agent is carrying.
pub fn build(order: &Order, agent: AgentId, ctx: &SimContext<'_>) -> Option<Intent> {
    let pos = ctx.pos(agent);
    let inventory = &ctx.agents.inventory[agent.index()];

    let intent = match order.kind {
        OrderKind::TillSoil(site) => {
            if ctx.world.is_tilled(site)
                || !ctx.world.is_cell_valid(site)
                || ctx.world.is_claimed_by_other(site, agent)
            {
                return None;
            }
            Intent::toward(ActionKind::TillSoil, pos, site, None)
        }
        OrderKind::FillVessel => {
            if inventory.find(|c| c.is_empty_vessel()).is_some() {
                let water = ctx.world.nearest_unclaimed_drink_source(pos, agent)?;
                Intent::toward(ActionKind::FillVessel, pos, water.pos, Some(Target::Feature(water.id)))
            } else {
                fetch(ItemKind::Vessel, agent, ctx)?
            }
        }
        OrderKind::CraftVessel => match inventory.find(|c| c.variety.kind == ItemKind::Gourd) {
            Some(slot) => Intent::in_place(ActionKind::Craft, pos, Some(Target::Carried(slot))),
            None => fetch(ItemKind::Gourd, agent, ctx)?,
        },
    };
    Some(intent.for_order(order.id))
}

/// Go pick up the nearest loose item of `kind`.
fn fetch(kind: ItemKind, agent: AgentId, ctx: &SimContext<'_>) -> Option<Intent> {
    if ctx.agents.inventory[agent.index()].is_full() {
        return None;
    }
    let pos = ctx.pos(agent);
    let item = ctx
        .world
        .items()
        .filter(|i| {
            i.variety.kind == kind
                && ctx.world.is_cell_valid(i.pos)
                && !ctx.world.is_claimed_by_other(i.pos, agent)
        })
        .min_by_key(|i| (pos.chebyshev(i.pos), i.id))?;
    Some(Intent::toward(ActionKind::PickUp, pos, item.pos, Some(Target::Item(item.id))))
}
