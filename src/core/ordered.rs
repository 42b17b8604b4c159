//! Ordered title index (AVL tree)
//!
//! A height-balanced binary search tree keyed by string. Every node owns its
//! children outright, and rotations consume a subtree and return the new
//! subtree root, so no node is ever aliased.
//!
//! # Balance
//!
//! After each structural change the node height is recomputed as
//! `1 + max(h(left), h(right))` and the balance factor `h(left) - h(right)`
//! is restored to `[-1, 1]`:
//!
//! | Case        | Insert decided by      | Delete decided by        | Fix                          |
//! |-------------|------------------------|--------------------------|------------------------------|
//! | left-left   | key < left.key         | balance(left) >= 0       | rotate right                 |
//! | left-right  | key > left.key         | balance(left) < 0        | rotate left child, then right|
//! | right-right | key > right.key        | balance(right) <= 0      | rotate left                  |
//! | right-left  | key < right.key        | balance(right) > 0       | rotate right child, then left|
//!
//! Height of the tree stays within `1.44 log2(n)`, so search, insert and
//! remove are `O(log n)` worst case.

use std::cmp::Ordering;

type Link<V> = Option<Box<Node<V>>>;

#[derive(Debug, Clone)]
struct Node<V> {
    key: String,
    value: V,
    left: Link<V>,
    right: Link<V>,
    height: i32,
}

impl<V> Node<V> {
    fn leaf(key: String, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        }
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }
}

fn height<V>(link: &Link<V>) -> i32 {
    link.as_ref().map_or(0, |node| node.height)
}

fn rotate_right<V>(mut y: Box<Node<V>>) -> Box<Node<V>> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

fn rotate_left<V>(mut x: Box<Node<V>>) -> Box<Node<V>> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// Restore balance after inserting `key` below `node`.
fn rebalance_insert<V>(mut node: Box<Node<V>>, key: &str) -> Box<Node<V>> {
    node.update_height();
    let balance = node.balance();

    if balance > 1 {
        let left_key = node.left.as_ref().map(|l| key.cmp(l.key.as_str()));
        match left_key {
            Some(Ordering::Less) => return rotate_right(node),
            Some(Ordering::Greater) => {
                node.left = node.left.take().map(rotate_left);
                return rotate_right(node);
            }
            _ => {}
        }
    } else if balance < -1 {
        let right_key = node.right.as_ref().map(|r| key.cmp(r.key.as_str()));
        match right_key {
            Some(Ordering::Greater) => return rotate_left(node),
            Some(Ordering::Less) => {
                node.right = node.right.take().map(rotate_right);
                return rotate_left(node);
            }
            _ => {}
        }
    }
    node
}

/// Restore balance after a removal below `node`; no single key drives the
/// decision, so the child's balance factor picks the case.
fn rebalance_remove<V>(mut node: Box<Node<V>>) -> Box<Node<V>> {
    node.update_height();
    let balance = node.balance();

    if balance > 1 {
        if node.left.as_ref().map_or(0, |l| l.balance()) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if balance < -1 {
        if node.right.as_ref().map_or(0, |r| r.balance()) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }
    node
}

fn insert_node<V>(link: Link<V>, key: &str, value: V, inserted: &mut bool) -> Box<Node<V>> {
    let Some(mut node) = link else {
        *inserted = true;
        return Box::new(Node::leaf(key.to_owned(), value));
    };

    match key.cmp(node.key.as_str()) {
        Ordering::Less => node.left = Some(insert_node(node.left.take(), key, value, inserted)),
        Ordering::Greater => {
            node.right = Some(insert_node(node.right.take(), key, value, inserted))
        }
        // First record for a key wins.
        Ordering::Equal => return node,
    }

    rebalance_insert(node, key)
}

/// Detach the minimum node of a subtree, returning it and the rebalanced rest.
fn take_min<V>(mut node: Box<Node<V>>) -> (Box<Node<V>>, Link<V>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            (node, rest)
        }
        Some(left) => {
            let (min, rest) = take_min(left);
            node.left = rest;
            (min, Some(rebalance_remove(node)))
        }
    }
}

fn remove_node<V>(link: Link<V>, key: &str, removed: &mut Option<V>) -> Link<V> {
    let mut node = link?;

    match key.cmp(node.key.as_str()) {
        Ordering::Less => node.left = remove_node(node.left.take(), key, removed),
        Ordering::Greater => node.right = remove_node(node.right.take(), key, removed),
        Ordering::Equal => {
            let left = node.left.take();
            let right = node.right.take();
            let Node { value, .. } = *node;
            *removed = Some(value);

            match (left, right) {
                (None, None) => return None,
                (Some(child), None) | (None, Some(child)) => return Some(child),
                (Some(left), Some(right)) => {
                    // Replace with the in-order successor.
                    let (mut successor, rest) = take_min(right);
                    successor.left = Some(left);
                    successor.right = rest;
                    node = successor;
                }
            }
        }
    }

    Some(rebalance_remove(node))
}

fn check_subtree<V>(link: &Link<V>, lower: Option<&str>, upper: Option<&str>) -> Option<i32> {
    let Some(node) = link else {
        return Some(0);
    };
    let key = node.key.as_str();
    if lower.is_some_and(|lo| key <= lo) || upper.is_some_and(|hi| key >= hi) {
        return None;
    }
    let left = check_subtree(&node.left, lower, Some(key))?;
    let right = check_subtree(&node.right, Some(key), upper)?;
    let height = 1 + left.max(right);
    if (left - right).abs() > 1 || height != node.height {
        return None;
    }
    Some(height)
}

/// Height-balanced search tree mapping unique string keys to values.
#[derive(Debug, Clone)]
pub struct OrderedIndex<V> {
    root: Link<V>,
    len: usize,
}

impl<V> Default for OrderedIndex<V> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<V> OrderedIndex<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `key`.
    ///
    /// Returns `false` and leaves the tree untouched when the key is
    /// already present.
    pub fn insert(&mut self, key: &str, value: V) -> bool {
        let mut inserted = false;
        self.root = Some(insert_node(self.root.take(), key, value, &mut inserted));
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Exact lookup by key.
    pub fn search(&self, key: &str) -> Option<&V> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.key.as_str()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            };
        }
        None
    }

    /// Remove `key`, returning its value. Absent keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let mut removed = None;
        self.root = remove_node(self.root.take(), key, &mut removed);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree; 0 when empty.
    pub fn height(&self) -> usize {
        height(&self.root) as usize
    }

    pub fn root_key(&self) -> Option<&str> {
        self.root.as_ref().map(|node| node.key.as_str())
    }

    /// In-order iterator over `(key, value)` pairs, ascending by key.
    pub fn iter(&self) -> Iter<'_, V> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(key, _)| key)
    }

    /// Verify ordering, cached heights and the balance bound at every node.
    pub fn is_balanced(&self) -> bool {
        check_subtree(&self.root, None, None).is_some()
    }
}

/// In-order iterator over an [`OrderedIndex`].
pub struct Iter<'a, V> {
    stack: Vec<&'a Node<V>>,
}

impl<'a, V> Iter<'a, V> {
    fn push_left(&mut self, mut node: Option<&'a Node<V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some((node.key.as_str(), &node.value))
    }
}
