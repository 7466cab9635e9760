use std::collections::VecDeque;

/// one set of the cache, lines are kept in insertion order
///
/// the front is the line that was installed first and is the next one to go.
/// a hit never moves a line, so this is fifo and not lru.
#[derive(Debug, Clone)]
pub struct Set {
    lines: VecDeque<u64>,
    associativity: usize,
}

impl Set {
    pub fn new(associativity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            associativity,
        }
    }

    pub fn contains(&self, tag: u64) -> bool {
        self.lines.iter().any(|&line| line == tag)
    }

    /// the caller must make room with `evict_if_full` first
    pub fn insert(&mut self, tag: u64) {
        debug_assert!(self.lines.len() < self.associativity);
        self.lines.push_back(tag);
    }

    /// drop the oldest line if the set is full, return the evicted tag
    pub fn evict_if_full(&mut self) -> Option<u64> {
        if self.lines.len() == self.associativity {
            self.lines.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lines.len() == self.associativity
    }

    pub fn associativity(&self) -> usize {
        self.associativity
    }

    /// resident tags, oldest first
    pub fn lines(&self) -> impl Iterator<Item = &u64> + '_ {
        self.lines.iter()
    }
}
