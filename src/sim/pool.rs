//! Fixed-capacity entity pools
//!
//! Every pool owns exactly `N` slots for the lifetime of the session; slots are
//! switched on and off instead of being created and destroyed. Liveness is kept
//! by the pool rather than the entity, and every activation bumps the slot's
//! generation so a `SlotId` taken before the slot was recycled stops resolving.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;

/// Typed handle to a pool slot
///
/// Only valid for the activation it was created from.
pub struct SlotId<T> {
    index: usize,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SlotId<T> {
    fn new(index: usize, generation: u32) -> Self {
        Self {
            index,
            generation,
            _marker: PhantomData,
        }
    }

    /// Slot index inside the pool (index order is the tie-break order)
    pub fn index(&self) -> usize {
        self.index
    }
}

// Manual impls: derives would demand the same traits from `T`.
impl<T> Clone for SlotId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SlotId<T> {}

impl<T> PartialEq for SlotId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for SlotId<T> {}

impl<T> fmt::Debug for SlotId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotId({}#{})", self.index, self.generation)
    }
}

/// A single pool slot
#[derive(Debug, Clone, Serialize)]
pub struct Slot<T> {
    pub value: T,
    pub active: bool,
    pub generation: u32,
}

/// Arena of `N` reusable slots
#[derive(Debug, Clone, Serialize)]
pub struct Pool<T, const N: usize> {
    slots: Vec<Slot<T>>,
}

impl<T, const N: usize> Pool<T, N> {
    /// Build a pool with every slot inactive, values from `init(index)`
    pub fn new(mut init: impl FnMut(usize) -> T) -> Self {
        let mut slots = Vec::with_capacity(N);
        for i in 0..N {
            slots.push(Slot {
                value: init(i),
                active: false,
                generation: 0,
            });
        }
        Self { slots }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline]
    pub fn is_active(&self, index: usize) -> bool {
        debug_assert!(index < N, "pool index {index} out of range {N}");
        self.slots[index].active
    }

    /// Number of live slots
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    /// Raw slot value regardless of liveness
    #[inline]
    pub fn value(&self, index: usize) -> &T {
        debug_assert!(index < N, "pool index {index} out of range {N}");
        &self.slots[index].value
    }

    #[inline]
    pub fn value_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < N, "pool index {index} out of range {N}");
        &mut self.slots[index].value
    }

    /// Overwrite a slot and mark it live, invalidating older handles
    pub fn activate(&mut self, index: usize, value: T) -> SlotId<T> {
        debug_assert!(index < N, "pool index {index} out of range {N}");
        let slot = &mut self.slots[index];
        slot.value = value;
        slot.active = true;
        slot.generation = slot.generation.wrapping_add(1);
        SlotId::new(index, slot.generation)
    }

    /// Activate the lowest-index free slot, or `None` when the pool is full
    pub fn acquire(&mut self, value: T) -> Option<SlotId<T>> {
        let index = self.slots.iter().position(|s| !s.active)?;
        Some(self.activate(index, value))
    }

    #[inline]
    pub fn deactivate(&mut self, index: usize) {
        debug_assert!(index < N, "pool index {index} out of range {N}");
        self.slots[index].active = false;
    }

    /// Return a slot to the pool. False if the handle was already stale.
    pub fn release(&mut self, id: SlotId<T>) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.slots[id.index].active = false;
        true
    }

    /// Deactivate every slot
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
    }

    pub fn get(&self, id: SlotId<T>) -> Option<&T> {
        let slot = self.slots.get(id.index)?;
        (slot.active && slot.generation == id.generation).then_some(&slot.value)
    }

    /// Live slots in index order
    pub fn iter_active(&self) -> impl Iterator<Item = (SlotId<T>, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, s)| (SlotId::new(i, s.generation), &s.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pool_is_empty() {
        let pool: Pool<u32, 4> = Pool::new(|i| i as u32);
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(*pool.value(3), 3);
    }

    #[test]
    fn test_acquire_lowest_free_slot() {
        let mut pool: Pool<u32, 3> = Pool::new(|_| 0);
        let a = pool.acquire(10).unwrap();
        let b = pool.acquire(20).unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);

        pool.release(a);
        let c = pool.acquire(30).unwrap();
        assert_eq!(c.index(), 0, "freed slot 0 is reused before slot 2");
    }

    #[test]
    fn test_acquire_full_pool() {
        let mut pool: Pool<u32, 2> = Pool::new(|_| 0);
        assert!(pool.acquire(1).is_some());
        assert!(pool.acquire(2).is_some());
        assert!(pool.acquire(3).is_none());
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn test_stale_handle_does_not_resolve() {
        let mut pool: Pool<u32, 1> = Pool::new(|_| 0);
        let old = pool.acquire(1).unwrap();
        pool.release(old);
        let new = pool.acquire(2).unwrap();

        assert_eq!(old.index(), new.index());
        assert_ne!(old, new);
        assert!(pool.get(old).is_none());
        assert_eq!(pool.get(new), Some(&2));
        assert!(!pool.release(old), "stale release must not free the new occupant");
        assert!(pool.is_active(0));
    }

    #[test]
    fn test_iter_active_in_index_order() {
        let mut pool: Pool<u32, 4> = Pool::new(|_| 0);
        pool.activate(2, 20);
        pool.activate(0, 0);
        let indices: Vec<usize> = pool.iter_active().map(|(id, _)| id.index()).collect();
        assert_eq!(indices, vec![0, 2]);

        pool.clear();
        assert_eq!(pool.iter_active().count(), 0);
    }
}
