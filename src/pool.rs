//! Fixed-capacity entity pools.
//!
//! Every simulated entity kind lives in a [`Pool`]: a contiguous backing
//! store allocated once at session creation and never resized. Slots are
//! reused via the entity's active flag; there is no compaction and no
//! dynamic growth. A failed acquire is expected backpressure under heavy
//! simultaneous destruction/creation, not an error.
//!
//! Iteration order is index order — stable but not load-balanced, which
//! affects firing-rate fairness across pool scans. That is a reproducible
//! engine characteristic, not a defect.

/// Implemented by every poolable entity; gives the pool access to the slot's
/// active flag.
pub trait Active {
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

/// Fixed-capacity arena of entity slots.
#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<T>,
}

impl<T: Active + Default> Pool<T> {
    /// Allocate a pool of `capacity` inactive slots. This is the only
    /// allocation the pool ever performs.
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, T::default);
        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Claim the lowest-index inactive slot, mark it active, and return it
    /// for initialization. Returns `None` when the pool is exhausted; the
    /// caller drops the spawn request silently.
    pub fn acquire(&mut self) -> Option<(usize, &mut T)> {
        let idx = self.slots.iter().position(|s| !s.is_active())?;
        let slot = &mut self.slots[idx];
        slot.set_active(true);
        Some((idx, slot))
    }

    /// Deactivate a slot. The slot's contents are garbage until reacquired.
    /// Out-of-range indices are ignored rather than panicking.
    pub fn release(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.set_active(false);
        }
    }

    /// Deactivate every slot.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.set_active(false);
        }
    }

    /// Number of active slots.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    /// Iterate active slots in index order.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_active())
    }

    /// Mutably iterate active slots in index order.
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.is_active())
    }

    /// Borrow a slot regardless of its active flag.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    /// Mutably borrow a slot regardless of its active flag.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default, Debug, Clone)]
    struct Marker {
        active: bool,
        tag: u32,
    }

    impl Active for Marker {
        fn is_active(&self) -> bool {
            self.active
        }
        fn set_active(&mut self, active: bool) {
            self.active = active;
        }
    }

    #[test]
    fn acquire_returns_lowest_free_index() {
        let mut pool: Pool<Marker> = Pool::new(4);
        let (i0, _) = pool.acquire().unwrap();
        let (i1, _) = pool.acquire().unwrap();
        assert_eq!((i0, i1), (0, 1));

        pool.release(0);
        let (again, _) = pool.acquire().unwrap();
        assert_eq!(again, 0, "released slot must be reused first");
    }

    #[test]
    fn acquire_beyond_capacity_returns_none() {
        let mut pool: Pool<Marker> = Pool::new(3);
        for _ in 0..3 {
            assert!(pool.acquire().is_some());
        }
        assert!(pool.acquire().is_none());
        assert_eq!(pool.active_count(), 3);
        assert_eq!(pool.capacity(), 3, "capacity must never grow");
    }

    #[test]
    fn exhausted_acquire_does_not_corrupt_other_slots() {
        let mut pool: Pool<Marker> = Pool::new(2);
        for tag in 0..2 {
            let (_, slot) = pool.acquire().unwrap();
            slot.tag = tag;
        }
        assert!(pool.acquire().is_none());
        assert_eq!(pool.get(0).unwrap().tag, 0);
        assert_eq!(pool.get(1).unwrap().tag, 1);
    }

    #[test]
    fn release_is_tolerant_of_out_of_range() {
        let mut pool: Pool<Marker> = Pool::new(2);
        pool.release(99); // must not panic
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn iter_active_skips_released_slots() {
        let mut pool: Pool<Marker> = Pool::new(4);
        for tag in 0..4 {
            let (_, slot) = pool.acquire().unwrap();
            slot.tag = tag;
        }
        pool.release(1);
        pool.release(3);
        let tags: Vec<u32> = pool.iter_active().map(|(_, s)| s.tag).collect();
        assert_eq!(tags, vec![0, 2]);
    }

    #[test]
    fn clear_deactivates_everything() {
        let mut pool: Pool<Marker> = Pool::new(4);
        for _ in 0..4 {
            pool.acquire().unwrap();
        }
        pool.clear();
        assert_eq!(pool.active_count(), 0);
    }
}
