//! Lock striping for export keys
//!
//! Maps the unbounded space of export keys onto a fixed number of async
//! locks via hashing. Memory stays bounded no matter how many distinct keys
//! are seen; two unrelated keys that hash to the same stripe occasionally
//! contend, which is harmless because the lock only ever serializes work,
//! it never distinguishes keys.
//!
//! The stripe pool is an owned, constructed resource with an injectable
//! stripe count, not ambient static state.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tokio::sync::Mutex;

/// A fixed-size pool of stripe locks addressed by key hash
#[derive(Debug)]
pub struct LockStripes {
    stripes: Vec<Mutex<()>>,
}

impl LockStripes {
    /// Creates a pool with `count` stripes
    ///
    /// `count` of zero is rounded up to one so `stripe_for` is total.
    pub fn new(count: usize) -> Self {
        let count = count.max(1);
        let mut stripes = Vec::with_capacity(count);
        for _ in 0..count {
            stripes.push(Mutex::new(()));
        }
        Self { stripes }
    }

    /// Number of stripes in the pool
    pub fn len(&self) -> usize {
        self.stripes.len()
    }

    /// Returns `true` if the pool has no stripes (never, by construction)
    pub fn is_empty(&self) -> bool {
        self.stripes.is_empty()
    }

    /// The stripe lock for `key`
    ///
    /// Equal keys always map to the same stripe. The guard must be held
    /// across the whole await of the work being serialized.
    pub fn stripe_for<K: Hash>(&self, key: &K) -> &Mutex<()> {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let index = (hasher.finish() as usize) % self.stripes.len();
        &self.stripes[index]
    }
}
