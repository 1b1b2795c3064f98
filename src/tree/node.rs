use std::cmp::Ordering;
use std::fmt::Debug;

use crate::errors::InvariantViolation;
use super::TraversalOrder;


/// Owned link to a subtree - each node exclusively owns both children
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// Applied to every node on the return path of a structural change.
/// The plain map only refreshes heights, the balanced map also rotates.
pub(crate) type Fixup<K, V> = fn(Box<Node<K, V>>) -> Box<Node<K, V>>;


/// Tree node shared by the plain and the balanced map
#[derive(Debug, Clone)]
pub struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    pub(crate) height: usize, // leaf = 1, absent child = 0
}

impl<K, V> Node<K, V> {

    pub(crate) fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn left(&self) -> Option<&Node<K, V>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<K, V>> {
        self.right.as_deref()
    }

    /// Height of the subtree rooted here
    pub fn height(&self) -> usize {
        self.height
    }

    /// height(left) - height(right)
    pub fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }
}


pub(crate) fn height<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Fixup for the unbalanced map - keeps the stored height exact, never rotates
pub(crate) fn refresh<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    node.update_height();
    node
}


/// Descend by comparison until the exact key is found
pub(crate) fn search<'a, K: Ord, V>(mut current: Option<&'a Node<K, V>>, key: &K) -> Option<&'a Node<K, V>> {
    while let Some(node) = current {
        current = match key.cmp(&node.key) {
            Ordering::Less => node.left.as_deref(),
            Ordering::Greater => node.right.as_deref(),
            Ordering::Equal => return Some(node),
        };
    }
    None
}

pub(crate) fn search_mut<'a, K: Ord, V>(link: &'a mut Link<K, V>, key: &K) -> Option<&'a mut V> {
    let node = link.as_deref_mut()?;
    match key.cmp(&node.key) {
        Ordering::Less => search_mut(&mut node.left, key),
        Ordering::Greater => search_mut(&mut node.right, key),
        Ordering::Equal => Some(&mut node.value),
    }
}


/// Insert below `link`, returning the new subtree root and the replaced value.
/// An existing key only has its value swapped - no fixup runs since the
/// structure is untouched.
pub(crate) fn insert<K: Ord, V>(link: Link<K, V>, key: K, value: V, fixup: Fixup<K, V>) -> (Box<Node<K, V>>, Option<V>) {
    let Some(mut node) = link else {
        return (Node::leaf(key, value), None);
    };

    let replaced = match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, replaced) = insert(node.left.take(), key, value, fixup);
            node.left = Some(left);
            replaced
        }
        Ordering::Greater => {
            let (right, replaced) = insert(node.right.take(), key, value, fixup);
            node.right = Some(right);
            replaced
        }
        Ordering::Equal => Some(std::mem::replace(&mut node.value, value)),
    };

    if replaced.is_some() {
        return (node, replaced);
    }
    (fixup(node), None)
}


/// Remove `key` below `link`, returning the new subtree root and the removed value.
/// A node with two children takes over the key/value of its in-order
/// successor, which is unlinked from the right subtree instead.
pub(crate) fn remove<K: Ord, V>(link: Link<K, V>, key: &K, fixup: Fixup<K, V>) -> (Link<K, V>, Option<V>) {
    let Some(mut node) = link else {
        return (None, None);
    };

    let removed = match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, removed) = remove(node.left.take(), key, fixup);
            node.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = remove(node.right.take(), key, fixup);
            node.right = right;
            removed
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, child) | (child, None) => return (child, Some(node.value)),
            (Some(left), Some(right)) => {
                let (rest, successor) = take_min(right, fixup);
                let successor = *successor;
                node.left = Some(left);
                node.right = rest;
                node.key = successor.key;
                Some(std::mem::replace(&mut node.value, successor.value))
            }
        },
    };

    if removed.is_none() {
        return (Some(node), None);
    }
    (Some(fixup(node)), removed)
}

/// Unlink the minimum node of a subtree, fixing up the path above it
fn take_min<K, V>(mut node: Box<Node<K, V>>, fixup: Fixup<K, V>) -> (Link<K, V>, Box<Node<K, V>>) {
    match node.left.take() {
        None => {
            let right = node.right.take();
            (right, node)
        }
        Some(left) => {
            let (rest, min) = take_min(left, fixup);
            node.left = rest;
            (Some(fixup(node)), min)
        }
    }
}


/// Walk the tree in the requested order, collecting (key, value) pairs
pub(crate) fn collect<'a, K, V>(current: Option<&'a Node<K, V>>, order: TraversalOrder, out: &mut Vec<(&'a K, &'a V)>) {
    let Some(node) = current else {
        return;
    };

    match order {
        TraversalOrder::PreOrder => {
            out.push((&node.key, &node.value));
            collect(node.left(), order, out);
            collect(node.right(), order, out);
        }
        TraversalOrder::InOrder => {
            collect(node.left(), order, out);
            out.push((&node.key, &node.value));
            collect(node.right(), order, out);
        }
        TraversalOrder::PostOrder => {
            collect(node.left(), order, out);
            collect(node.right(), order, out);
            out.push((&node.key, &node.value));
        }
    }
}


/// Check ordering and stored heights, plus the balance factor when `balanced`.
/// Returns the recomputed height of the subtree.
pub(crate) fn validate<K: Ord + Debug, V>(
    current: Option<&Node<K, V>>,
    lower: Option<&K>,
    upper: Option<&K>,
    balanced: bool,
) -> Result<usize, InvariantViolation> {
    let Some(node) = current else {
        return Ok(0);
    };

    if let Some(lower) = lower {
        if lower >= &node.key {
            return Err(InvariantViolation::Unordered {
                left: format!("{lower:?}"),
                right: format!("{:?}", node.key),
            });
        }
    }
    if let Some(upper) = upper {
        if &node.key >= upper {
            return Err(InvariantViolation::Unordered {
                left: format!("{:?}", node.key),
                right: format!("{upper:?}"),
            });
        }
    }

    let left = validate(node.left(), lower, Some(&node.key), balanced)?;
    let right = validate(node.right(), Some(&node.key), upper, balanced)?;

    let expected = 1 + left.max(right);
    if node.height != expected {
        return Err(InvariantViolation::StaleHeight {
            key: format!("{:?}", node.key),
            stored: node.height,
            expected,
        });
    }

    let factor = left as isize - right as isize;
    if balanced && !(-1..=1).contains(&factor) {
        return Err(InvariantViolation::Unbalanced {
            key: format!("{:?}", node.key),
            factor,
        });
    }

    Ok(expected)
}
