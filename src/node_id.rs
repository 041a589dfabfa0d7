//! A Module with some utilities for working with NodeIds

use crate::NodeId;

/// A specialized [`HashMap`](hashbrown::HashMap) for NodeIds with a faster Hasher
pub type NodeIdMap<V> = hashbrown::HashMap<NodeId, V, BuildNodeIdHasher>;
/// A specialized [`HashSet`](hashbrown::HashSet) for NodeIds with a faster Hasher
pub type NodeIdSet = hashbrown::HashSet<NodeId, BuildNodeIdHasher>;

/// A [`BuildHasher`](std::hash::BuildHasher) specialized on NodeIds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildNodeIdHasher;

/// A [`Hasher`](std::hash::Hasher) specialized on NodeIds
///
/// Node ids are unique integers, so a single multiplication is all the hashing they need.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeIdHasher(u64);

impl std::hash::BuildHasher for BuildNodeIdHasher {
    type Hasher = NodeIdHasher;
    fn build_hasher(&self) -> NodeIdHasher {
        NodeIdHasher(0)
    }
}
impl std::hash::Hasher for NodeIdHasher {
    /// panics, since only NodeIds are supposed to be used
    fn write(&mut self, _: &[u8]) {
        unreachable!("This Hasher only works with NodeIds")
    }
    /// Writes a single NodeId into this hasher.
    fn write_i64(&mut self, id: NodeId) {
        // hashbrown takes the top 7 bits as the control byte, spread the id over them
        self.0 = (id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
    fn finish(&self) -> u64 {
        self.0
    }
}

/// create a new [`NodeIdMap`]
pub fn node_id_map<V>() -> NodeIdMap<V> {
    NodeIdMap::with_hasher(BuildNodeIdHasher)
}
/// create a new [`NodeIdSet`]
pub fn node_id_set() -> NodeIdSet {
    NodeIdSet::with_hasher(BuildNodeIdHasher)
}

/// create a new [`NodeIdMap`] with room for `capacity` entries
pub fn node_id_map_with_cap<V>(capacity: usize) -> NodeIdMap<V> {
    NodeIdMap::with_capacity_and_hasher(capacity, BuildNodeIdHasher)
}
/// create a new [`NodeIdSet`] with room for `capacity` entries
pub fn node_id_set_with_cap(capacity: usize) -> NodeIdSet {
    NodeIdSet::with_capacity_and_hasher(capacity, BuildNodeIdHasher)
}
