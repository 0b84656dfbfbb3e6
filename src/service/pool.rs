//! Fixed pool of interchangeable attendants
//!
//! There is no waiting slot: a request either gets an idle attendant at that
//! instant or nothing.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Handle to one attendant held by a passenger in service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerSlot(pub usize);

impl fmt::Display for ServerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ATT_{}", self.0)
    }
}

/// Fixed-capacity set of attendants, each idle or busy
#[derive(Debug, Clone)]
pub struct ServerPool {
    busy: Vec<bool>,
    busy_count: usize,
}

impl ServerPool {
    /// Create a pool of `capacity` idle attendants
    pub fn new(capacity: usize) -> Self {
        Self { busy: vec![false; capacity], busy_count: 0 }
    }

    /// Number of attendants
    pub fn capacity(&self) -> usize {
        self.busy.len()
    }

    /// Number of attendants currently serving
    pub fn busy(&self) -> usize {
        self.busy_count
    }

    /// Number of attendants currently free
    pub fn idle(&self) -> usize {
        self.capacity() - self.busy_count
    }

    /// Take an idle attendant right now, if there is one
    pub fn try_acquire(&mut self) -> Option<ServerSlot> {
        if self.busy_count == self.capacity() {
            return None;
        }
        let index = self.busy.iter().position(|busy| !busy)?;
        self.busy[index] = true;
        self.busy_count += 1;
        Some(ServerSlot(index))
    }

    /// Return an attendant to the pool; `false` if it was not held
    pub fn release(&mut self, slot: ServerSlot) -> bool {
        match self.busy.get_mut(slot.0) {
            Some(busy) if *busy => {
                *busy = false;
                self.busy_count -= 1;
                true
            }
            _ => {
                warn!(%slot, "release of an attendant that was not held");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_never_admits() {
        let mut pool = ServerPool::new(0);
        assert_eq!(pool.capacity(), 0);
        assert!(pool.try_acquire().is_none());
    }

    #[test]
    fn test_acquire_until_full() {
        let mut pool = ServerPool::new(2);
        let first = pool.try_acquire().unwrap();
        let second = pool.try_acquire().unwrap();
        assert_ne!(first, second);
        assert_eq!(pool.busy(), 2);
        assert_eq!(pool.idle(), 0);
        assert!(pool.try_acquire().is_none());

        assert!(pool.release(first));
        assert_eq!(pool.idle(), 1);
        assert_eq!(pool.try_acquire(), Some(first));
    }

    #[test]
    fn test_double_release_is_refused() {
        let mut pool = ServerPool::new(1);
        let slot = pool.try_acquire().unwrap();
        assert!(pool.release(slot));
        assert!(!pool.release(slot));
        assert!(!pool.release(ServerSlot(9)));
        assert_eq!(pool.busy(), 0);
    }
}
