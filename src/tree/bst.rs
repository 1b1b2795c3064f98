use std::fmt::Debug;

use crate::errors::InvariantViolation;
use super::node::{self, Link, Node};
use super::OrderedIndex;


/// Unbalanced binary search tree
/// Insert, search and remove are O(depth) - O(n) on sorted input.
/// Insert, remove and drop recurse once per level, so a degenerate tree of
/// ~10^5 keys can exhaust the stack. Use `BalancedOrderedMap` for large inputs.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K: Ord, V> OrderedMap<K, V> {

    pub fn new() -> Self {
        Self::default()
    }

    /// Check key ordering and stored heights
    pub fn validate(&self) -> Result<(), InvariantViolation>
    where
        K: Debug,
    {
        node::validate(self.root(), None, None, false).map(|_| ())
    }
}

impl<K: Ord, V> OrderedIndex<K, V> for OrderedMap<K, V> {

    fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (root, replaced) = node::insert(self.root.take(), key, value, node::refresh);
        self.root = Some(root);
        if replaced.is_none() {
            self.len += 1;
        }
        replaced
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let (root, removed) = node::remove(self.root.take(), key, node::refresh);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        node::search_mut(&mut self.root, key)
    }

    fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TraversalOrder;

    // Helper - builds
    //         50
    //       /    \
    //     30      70
    //    /  \    /  \
    //   20  40  60  80
    fn create_test_map() -> OrderedMap<i32, String> {
        let mut map = OrderedMap::new();
        for key in [50, 30, 70, 20, 40, 60, 80] {
            map.insert(key, format!("v{key}"));
        }
        map
    }

    fn keys(pairs: Vec<(&i32, &String)>) -> Vec<i32> {
        pairs.into_iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_traversal_orders() {
        let map = create_test_map();

        assert_eq!(keys(map.in_order()), vec![20, 30, 40, 50, 60, 70, 80]);
        assert_eq!(keys(map.pre_order()), vec![50, 30, 20, 40, 70, 60, 80]);
        assert_eq!(keys(map.post_order()), vec![20, 40, 30, 60, 80, 70, 50]);
        assert_eq!(keys(map.traverse(TraversalOrder::InOrder)), keys(map.in_order()));
    }

    #[test]
    fn test_insert_existing_key_replaces_value() {
        let mut map = create_test_map();

        let previous = map.insert(40, "forty".to_string());

        assert_eq!(previous.as_deref(), Some("v40"));
        assert_eq!(map.len(), 7);
        assert_eq!(map.get(&40).map(String::as_str), Some("forty"));
        // structure untouched
        assert_eq!(keys(map.pre_order()), vec![50, 30, 20, 40, 70, 60, 80]);
    }

    #[test]
    fn test_search() {
        let map = create_test_map();

        let node = map.search(&60).unwrap();
        assert_eq!(node.key(), &60);
        assert_eq!(node.value(), "v60");
        assert!(map.search(&65).is_none());
        assert!(map.contains_key(&20));
        assert_eq!(map.min().map(|(k, _)| *k), Some(20));
        assert_eq!(map.max().map(|(k, _)| *k), Some(80));
    }

    // Lookups through the shared trait, for any index implementation
    fn lookup<M: OrderedIndex<i32, String>>(map: &M, key: i32) -> Option<&str> {
        map.get(&key).map(String::as_str)
    }

    #[test]
    fn test_get_through_trait() {
        let map = create_test_map();
        let mut balanced = crate::tree::BalancedOrderedMap::new();
        for (key, value) in map.in_order() {
            balanced.insert(*key, value.clone());
        }

        for key in [20, 50, 80] {
            assert_eq!(lookup(&map, key), Some(format!("v{key}").as_str()));
            assert_eq!(lookup(&balanced, key), lookup(&map, key));
        }
        assert_eq!(lookup(&map, 55), None);
        assert_eq!(lookup(&balanced, 55), None);
    }

    #[test]
    fn test_remove_leaf_and_single_child() {
        let mut map = create_test_map();

        assert_eq!(map.remove(&20).as_deref(), Some("v20"));
        // 30 now has one child (40) and is replaced by it
        assert_eq!(map.remove(&30).as_deref(), Some("v30"));

        assert_eq!(keys(map.pre_order()), vec![50, 40, 70, 60, 80]);
        assert_eq!(map.len(), 5);
        map.validate().unwrap();
    }

    #[test]
    fn test_remove_two_children_uses_successor() {
        let mut map = create_test_map();

        assert_eq!(map.remove(&50).as_deref(), Some("v50"));

        // 60 is the in-order successor and takes over the root
        assert_eq!(map.root().map(|n| *n.key()), Some(60));
        assert_eq!(map.get(&60).map(String::as_str), Some("v60"));
        assert_eq!(keys(map.in_order()), vec![20, 30, 40, 60, 70, 80]);
        map.validate().unwrap();
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let mut map = create_test_map();

        assert!(map.remove(&99).is_none());
        assert_eq!(map.len(), 7);
    }

    #[test]
    fn test_sorted_insert_degenerates() {
        let mut map = OrderedMap::new();
        for key in 0..32 {
            map.insert(key, ());
        }

        // no rebalancing - a sorted run becomes a linked list
        assert_eq!(map.height(), 32);
        map.validate().unwrap();
    }

    #[test]
    fn test_get_mut_and_clear() {
        let mut map = create_test_map();

        map.get_mut(&70).unwrap().push('!');
        assert_eq!(map.get(&70).map(String::as_str), Some("v70!"));

        map.clear();
        assert!(map.is_empty());
        assert!(map.in_order().is_empty());
        assert_eq!(map.height(), 0);
    }
}
