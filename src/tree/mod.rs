pub mod bst;
pub mod avl;
mod node;

pub use avl::BalancedOrderedMap;
pub use bst::OrderedMap;
pub use node::Node;


/// Order in which a traversal visits the nodes of a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    PreOrder,  // self, left, right
    InOrder,   // left, self, right - ascending keys
    PostOrder, // left, right, self
}


/// Ordered key -> value index backed by a binary search tree.
///
/// Implementors only provide the structural operations; lookup and the
/// traversals are shared since both maps use the same node layout.
pub trait OrderedIndex<K: Ord, V> {

    /// Root node, `None` when the index is empty
    fn root(&self) -> Option<&Node<K, V>>;

    /// Number of stored keys
    fn len(&self) -> usize;

    /// Insert a key, returning the previous value when the key already existed.
    /// An existing key keeps its node - only the value is replaced.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Remove a key, returning its value. Absent keys are a no-op.
    fn remove(&mut self, key: &K) -> Option<V>;

    fn get_mut(&mut self, key: &K) -> Option<&mut V>;

    /// Remove every key
    fn clear(&mut self);

    /// Node holding exactly `key`
    fn search(&self, key: &K) -> Option<&Node<K, V>> {
        node::search(self.root(), key)
    }

    fn get<'a>(&'a self, key: &K) -> Option<&'a V>
    where
        K: 'a,
    {
        self.search(key).map(Node::value)
    }

    fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Height of the tree, 0 when empty
    fn height(&self) -> usize {
        self.root().map_or(0, Node::height)
    }

    /// Smallest key and its value
    fn min(&self) -> Option<(&K, &V)> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some((node.key(), node.value()))
    }

    /// Largest key and its value
    fn max(&self) -> Option<(&K, &V)> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some((node.key(), node.value()))
    }

    /// Materialize every (key, value) pair in the given order
    fn traverse(&self, order: TraversalOrder) -> Vec<(&K, &V)> {
        let mut out = Vec::with_capacity(self.len());
        node::collect(self.root(), order, &mut out);
        out
    }

    fn in_order(&self) -> Vec<(&K, &V)> {
        self.traverse(TraversalOrder::InOrder)
    }

    fn pre_order(&self) -> Vec<(&K, &V)> {
        self.traverse(TraversalOrder::PreOrder)
    }

    fn post_order(&self) -> Vec<(&K, &V)> {
        self.traverse(TraversalOrder::PostOrder)
    }
}
