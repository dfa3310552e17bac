//! LRU List Module
//!
//! Intrusive doubly-linked list keyed by string, used as the entry store.
//!
//! Nodes live in a generational arena and link to each other by arena index;
//! a `HashMap` maps each key to its node. Lookup, insert, remove, move-to-back
//! and pop-front are all O(1).
//!
//! Ordering:
//! - Front (head) = Least recently used
//! - Back (tail) = Most recently used

use std::collections::HashMap;

use generational_arena::{Arena, Index};

#[derive(Debug)]
struct Node<T> {
    key: String,
    value: T,
    prev: Option<Index>,
    next: Option<Index>,
}

// == LRU List ==
/// Key-addressable list ordered by recency of use.
#[derive(Debug)]
pub struct LruList<T> {
    nodes: Arena<Node<T>>,
    lookup: HashMap<String, Index>,
    head: Option<Index>,
    tail: Option<Index>,
}

impl<T> LruList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            lookup: HashMap::new(),
            head: None,
            tail: None,
        }
    }

    // Detaches a node from its neighbours. Arena and map are left untouched.
    fn unlink(&mut self, index: Index) {
        let (prev, next) = {
            let node = &self.nodes[index];
            (node.prev, node.next)
        };

        match prev {
            Some(prev_idx) => self.nodes[prev_idx].next = next,
            None => self.head = next,
        }

        match next {
            Some(next_idx) => self.nodes[next_idx].prev = prev,
            None => self.tail = prev,
        }
    }

    // Links an already-allocated node at the MRU end.
    fn link_back(&mut self, index: Index) {
        let old_tail = self.tail;
        {
            let node = &mut self.nodes[index];
            node.prev = old_tail;
            node.next = None;
        }

        match old_tail {
            Some(tail_idx) => self.nodes[tail_idx].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
    }

    // == Push Back ==
    /// Inserts or replaces `key`, leaving it at the most recently used end.
    ///
    /// Returns the previous value when the key was already present.
    pub fn push_back(&mut self, key: String, value: T) -> Option<T> {
        if let Some(&index) = self.lookup.get(&key) {
            let old = std::mem::replace(&mut self.nodes[index].value, value);
            self.move_to_back(index);
            return Some(old);
        }

        let index = self.nodes.insert(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.lookup.insert(key, index);
        self.link_back(index);
        None
    }

    fn move_to_back(&mut self, index: Index) {
        if self.tail != Some(index) {
            self.unlink(index);
            self.link_back(index);
        }
    }

    // == Touch ==
    /// Marks a key as most recently used.
    ///
    /// Returns false if the key is not present.
    pub fn touch(&mut self, key: &str) -> bool {
        match self.lookup.get(key) {
            Some(&index) => {
                self.move_to_back(index);
                true
            }
            None => false,
        }
    }

    // == Get ==
    /// Returns the value for `key` without changing its position.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.lookup.get(key).map(|&index| &self.nodes[index].value)
    }

    // == Remove ==
    /// Removes a key, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        let index = self.lookup.remove(key)?;
        self.unlink(index);
        self.nodes.remove(index).map(|node| node.value)
    }

    // == Pop Front ==
    /// Removes and returns the least recently used entry.
    pub fn pop_front(&mut self) -> Option<(String, T)> {
        let index = self.head?;
        self.unlink(index);
        let node = self.nodes.remove(index)?;
        self.lookup.remove(&node.key);
        Some((node.key, node.value))
    }

    // == Peek Front ==
    /// Returns the least recently used entry without removing it.
    pub fn peek_front(&self) -> Option<(&str, &T)> {
        self.head.map(|index| {
            let node = &self.nodes[index];
            (node.key.as_str(), &node.value)
        })
    }

    // == Remove Where ==
    /// Removes every entry matching `predicate` in one front-to-back walk.
    ///
    /// Returns the removed entries in LRU order.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Vec<(String, T)>
    where
        F: FnMut(&str, &T) -> bool,
    {
        let mut removed = Vec::new();
        let mut cursor = self.head;

        while let Some(index) = cursor {
            let (next, matched) = {
                let node = &self.nodes[index];
                (node.next, predicate(&node.key, &node.value))
            };
            cursor = next;

            if matched {
                self.unlink(index);
                if let Some(node) = self.nodes.remove(index) {
                    self.lookup.remove(&node.key);
                    removed.push((node.key, node.value));
                }
            }
        }

        removed
    }

    // == Iter ==
    /// Iterates entries from least to most recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.lookup.clear();
        self.head = None;
        self.tail = None;
    }

    // == Length ==
    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup.contains_key(key)
    }
}

impl<T> Default for LruList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back iterator over an [`LruList`].
pub struct Iter<'a, T> {
    list: &'a LruList<T>,
    cursor: Option<Index>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a str, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let node = &self.list.nodes[index];
        self.cursor = node.next;
        Some((node.key.as_str(), &node.value))
    }
}
