//! Insertion-ordered collection with fast membership lookup
//!
//! Children of a group are kept here. Order is draw order: the head is drawn
//! first, the tail last (on top).

use std::collections::HashSet;
use std::hash::Hash;

/// Where to insert a new item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddPosition<K> {
    First,
    Last,
    After(K),
}

/// Reordering of a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveActionType {
    /// One step toward the tail
    Up,
    /// One step toward the head
    Down,
    /// To the tail
    Top,
    /// To the head
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickList<K: Copy + Eq + Hash> {
    items: Vec<K>,
    members: HashSet<K>,
}

impl<K: Copy + Eq + Hash> QuickList<K> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            members: HashSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.members.contains(key)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[K] {
        &self.items
    }

    pub fn first(&self) -> Option<&K> {
        self.items.first()
    }

    pub fn position(&self, key: &K) -> Option<usize> {
        if !self.contains(key) {
            return None;
        }
        self.items.iter().position(|k| k == key)
    }

    /// Returns false if the key is already present or the `After` anchor is missing
    pub fn add(&mut self, key: K, position: AddPosition<K>) -> bool {
        if self.contains(&key) {
            return false;
        }
        let index = match position {
            AddPosition::First => 0,
            AddPosition::Last => self.items.len(),
            AddPosition::After(anchor) => match self.position(&anchor) {
                Some(i) => i + 1,
                None => return false,
            },
        };
        self.items.insert(index, key);
        self.members.insert(key);
        true
    }

    /// Add each key after the previous one, starting at `position`
    pub fn add_all(&mut self, keys: impl IntoIterator<Item = K>, position: AddPosition<K>) {
        let mut previous = position;
        for key in keys {
            self.add(key, previous);
            previous = AddPosition::After(key);
        }
    }

    pub fn remove(&mut self, key: &K) -> bool {
        if !self.members.remove(key) {
            return false;
        }
        self.items.retain(|k| k != key);
        true
    }

    pub fn remove_all(&mut self) -> Vec<K> {
        self.members.clear();
        std::mem::take(&mut self.items)
    }

    /// Returns false when the list has fewer than two items, the key is
    /// missing, or the item is already at the end it would move toward.
    pub fn move_item(&mut self, key: &K, action: MoveActionType) -> bool {
        if self.items.len() < 2 {
            return false;
        }
        let Some(index) = self.position(key) else {
            return false;
        };
        let last = self.items.len() - 1;
        let target = match action {
            MoveActionType::Up if index < last => index + 1,
            MoveActionType::Top if index < last => last,
            MoveActionType::Down if index > 0 => index - 1,
            MoveActionType::Bottom if index > 0 => 0,
            _ => return false,
        };
        let item = self.items.remove(index);
        self.items.insert(target, item);
        true
    }
}

impl<K: Copy + Eq + Hash> Default for QuickList<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K: Copy + Eq + Hash> IntoIterator for &'a QuickList<K> {
    type Item = &'a K;
    type IntoIter = std::slice::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
