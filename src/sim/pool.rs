//! Recycling container for one entity kind
//!
//! A pool owns two disjoint sets: `active` entities are simulated and drawn,
//! `idle` entities are retired and wait to be reset and reused. Acquiring
//! prefers the most recently retired idle entity over constructing a new one.
//! The idle set is bounded; entities released past the bound are dropped.

use super::arena::Arena;
use super::draw::DrawCommand;
use super::entity::{EntityId, Pooled, SpawnContext};

/// Allocation counters, for tuning the idle capacity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Entities constructed from scratch
    pub created: u64,
    /// Acquisitions served from the idle set
    pub recycled: u64,
    /// Releases dropped because the idle set was full
    pub discarded: u64,
}

/// Object pool for pooled entities
#[derive(Debug, Clone)]
pub struct Pool<T> {
    label: &'static str,
    active: Vec<T>,
    idle: Vec<T>,
    capacity: usize,
    next_id: EntityId,
    stats: PoolStats,
}

impl<T: Pooled> Pool<T> {
    /// Create an empty pool retaining at most `capacity` idle entities
    pub fn new(label: &'static str, capacity: usize) -> Self {
        Self {
            label,
            active: Vec::new(),
            idle: Vec::with_capacity(capacity),
            capacity,
            next_id: 1,
            stats: PoolStats::default(),
        }
    }

    /// Activate an entity at fresh spawn state and return it.
    ///
    /// Pops the last idle entity and resets it in place, or constructs a new
    /// one when the idle set is empty.
    pub fn acquire(&mut self, ctx: &mut SpawnContext<'_>) -> &mut T {
        let item = match self.idle.pop() {
            Some(mut item) => {
                item.reset(ctx);
                self.stats.recycled += 1;
                log::trace!("{}: recycled entity {}", self.label, item.id());
                item
            }
            None => {
                let id = self.next_id;
                self.next_id += 1;
                self.stats.created += 1;
                log::trace!("{}: created entity {}", self.label, id);
                T::spawn(id, ctx)
            }
        };
        self.active.push(item);
        let last = self.active.len() - 1;
        &mut self.active[last]
    }

    /// Retire the active entity with `id`.
    ///
    /// Returns false (and leaves the pool untouched) when no active entity
    /// has that id. Active order is not preserved: the last active entity
    /// moves into the vacated slot.
    pub fn release(&mut self, id: EntityId) -> bool {
        match self.active.iter().position(|item| item.id() == id) {
            Some(index) => {
                self.retire(index);
                true
            }
            None => {
                log::warn!("{}: release of inactive entity {}", self.label, id);
                false
            }
        }
    }

    /// Advance every active entity one frame, retiring those that flag
    /// themselves for removal. Returns the number retired.
    pub fn update_all(&mut self, arena: &Arena) -> usize {
        let mut retired = 0;
        // Reverse so swap-removal only moves entities already updated
        for index in (0..self.active.len()).rev() {
            let item = &mut self.active[index];
            item.update(arena);
            if item.is_marked_for_removal() {
                self.retire(index);
                retired += 1;
            }
        }
        retired
    }

    /// Emit draw commands for active entities in active order
    pub fn draw_all(&self, out: &mut Vec<DrawCommand>) {
        out.extend(self.active.iter().map(|item| item.draw()));
    }

    /// Retire every active entity (used when a new session starts)
    pub fn reset_pool(&mut self) {
        let retiring = std::mem::take(&mut self.active);
        for item in retiring {
            self.stash(item);
        }
    }

    pub fn active(&self) -> &[T] {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut [T] {
        &mut self.active
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.active.iter().find(|item| item.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.active.iter_mut().find(|item| item.id() == id)
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn idle_len(&self) -> usize {
        self.idle.len()
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    fn retire(&mut self, index: usize) {
        let item = self.active.swap_remove(index);
        self.stash(item);
    }

    fn stash(&mut self, item: T) {
        if self.idle.len() < self.capacity {
            self.idle.push(item);
        } else {
            self.stats.discarded += 1;
            log::debug!("{}: idle set full, dropping entity {}", self.label, item.id());
        }
    }
}
