use std::fmt::Debug;

use crate::errors::InvariantViolation;
use super::node::{self, Link, Node};
use super::OrderedIndex;


/// AVL tree - a binary search tree that rebalances after every insert and remove
/// https://en.wikipedia.org/wiki/AVL_tree
/// Every node keeps |height(left) - height(right)| <= 1, so the tree height
/// stays O(log n) and insert, search and remove are O(log n) worst case.
#[derive(Debug, Clone)]
pub struct BalancedOrderedMap<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for BalancedOrderedMap<K, V> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K: Ord, V> BalancedOrderedMap<K, V> {

    pub fn new() -> Self {
        Self::default()
    }

    /// Check key ordering, stored heights and every balance factor
    pub fn validate(&self) -> Result<(), InvariantViolation>
    where
        K: Debug,
    {
        node::validate(self.root(), None, None, true).map(|_| ())
    }
}

impl<K: Ord, V> OrderedIndex<K, V> for BalancedOrderedMap<K, V> {

    fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (root, replaced) = node::insert(self.root.take(), key, value, rebalance);
        self.root = Some(root);
        if replaced.is_none() {
            self.len += 1;
        }
        replaced
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let (root, removed) = node::remove(self.root.take(), key, rebalance);
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


/// Refresh the height of `node` and rotate when its balance factor left [-1, 1].
/// Children are already balanced - this runs bottom-up on the return path.
fn rebalance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    node.update_height();
    let factor = node.balance_factor();

    if factor > 1 {
        // left-right case: straighten the left child first
        if node.left.as_ref().is_some_and(|left| left.balance_factor() < 0) {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if factor < -1 {
        // right-left case: straighten the right child first
        if node.right.as_ref().is_some_and(|right| right.balance_factor() > 0) {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

/// Lift the left child above `node`
///
/// ```text
///       node          pivot
///      /    \        /     \
///   pivot    c  ->  a      node
///   /   \                 /    \
///  a     b               b      c
/// ```
fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

/// Lift the right child above `node` - mirror of rotate_right
fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}
