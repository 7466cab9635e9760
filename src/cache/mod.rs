use enum_as_inner::EnumAsInner;

/// low `bits` bits set, saturating at the full address width
fn low_mask(bits: u32) -> u64 {
    1u64.checked_shl(bits).map_or(u64::MAX, |bit| bit - 1)
}

/// return the index of the set and the tag
///
/// the set index is the contiguous `set_bit_len` bit field right above the block offset,
/// the tag is everything above the set index.
pub fn get_set_number_from_addr(addr: u64, set_bit_len: u32, block_bit_len: u32) -> (u64, u64) {
    let set_number = addr.checked_shr(block_bit_len).unwrap_or(0) & low_mask(set_bit_len);
    let tag = addr.checked_shr(block_bit_len + set_bit_len).unwrap_or(0);
    (set_number, tag)
}

mod set;
mod set_associative;

/// what a single access did to its set
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumAsInner)]
pub enum AccessResult {
    /// the tag was resident
    Hit(u64),
    /// the tag was installed into a free line
    Miss(u64),
    /// the tag (first) was installed after evicting the oldest line (second)
    Eviction(u64, u64),
}

impl AccessResult {
    pub fn tag(&self) -> u64 {
        match *self {
            AccessResult::Hit(tag) | AccessResult::Miss(tag) | AccessResult::Eviction(tag, _) => {
                tag
            }
        }
    }
}

pub use set::Set;
pub use set_associative::Cache;
