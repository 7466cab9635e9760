use crate::config::CacheConfig;

use super::{get_set_number_from_addr, AccessResult, Set};

/// a set associative cache with fifo replacement
///
/// only tags are tracked, there is no data and no dirty state.
pub struct Cache {
    pub cache_config: CacheConfig,
    sets: Vec<Set>,
}

impl Cache {
    /// `cache_config` should already be validated
    pub fn new(cache_config: &CacheConfig) -> Self {
        let sets = vec![Set::new(cache_config.associativity); cache_config.num_sets()];
        Cache {
            cache_config: *cache_config,
            sets,
        }
    }

    /// split an address into the set index and the tag
    pub fn locate(&self, addr: u64) -> (usize, u64) {
        let (set_number, tag) = get_set_number_from_addr(
            addr,
            self.cache_config.set_index_bits,
            self.cache_config.block_offset_bits,
        );
        (set_number as usize, tag)
    }

    /// probe `addr`, on a miss install its line and evict the oldest one if needed
    pub fn access(&mut self, addr: u64) -> AccessResult {
        let (set_number, tag) = self.locate(addr);
        let set = &mut self.sets[set_number];
        if set.contains(tag) {
            return AccessResult::Hit(tag);
        }
        // not in the set
        let victim = set.evict_if_full();
        set.insert(tag);
        let result = match victim {
            Some(victim) => AccessResult::Eviction(tag, victim),
            None => AccessResult::Miss(tag),
        };
        tracing::debug!(addr, set_number, ?result, "cache miss");
        result
    }

    pub fn set(&self, index: usize) -> &Set {
        &self.sets[index]
    }

    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }
}
