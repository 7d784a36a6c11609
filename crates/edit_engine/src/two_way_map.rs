//! A map queryable from both sides
//!
//! Each key maps to one value; a value may be shared by many keys. Keys of a
//! value are kept in insertion order.

use std::collections::HashMap;
use std::hash::Hash;

/// Something with a stable identity independent of its other fields
pub trait Identifier {
    type Id: Eq + Hash + Clone;

    fn identifier(&self) -> Self::Id;
}

impl Identifier for shape_model::ShapeId {
    type Id = shape_model::ShapeId;

    fn identifier(&self) -> Self::Id {
        *self
    }
}

#[derive(Debug, Clone)]
pub struct TwoWayQuickMap<K: Identifier, V: Identifier> {
    key_to_value: HashMap<K::Id, (K, V)>,
    value_to_keys: HashMap<V::Id, Vec<K::Id>>,
}

impl<K: Identifier, V: Identifier> TwoWayQuickMap<K, V> {
    pub fn new() -> Self {
        Self {
            key_to_value: HashMap::new(),
            value_to_keys: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.key_to_value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_to_value.is_empty()
    }

    /// Insert or replace the entry for `key`
    pub fn insert(&mut self, key: K, value: V) {
        let key_id = key.identifier();
        self.remove_key(&key_id);
        self.value_to_keys
            .entry(value.identifier())
            .or_default()
            .push(key_id.clone());
        self.key_to_value.insert(key_id, (key, value));
    }

    pub fn get(&self, key_id: &K::Id) -> Option<&V> {
        self.key_to_value.get(key_id).map(|(_, v)| v)
    }

    pub fn get_key(&self, key_id: &K::Id) -> Option<&K> {
        self.key_to_value.get(key_id).map(|(k, _)| k)
    }

    /// Keys associated with a value, oldest first
    pub fn get_keys(&self, value_id: &V::Id) -> Vec<&K> {
        self.value_to_keys
            .get(value_id)
            .into_iter()
            .flatten()
            .filter_map(|key_id| self.get_key(key_id))
            .collect()
    }

    pub fn remove_key(&mut self, key_id: &K::Id) -> Option<(K, V)> {
        let (key, value) = self.key_to_value.remove(key_id)?;
        let value_id = value.identifier();
        if let Some(keys) = self.value_to_keys.get_mut(&value_id) {
            keys.retain(|k| k != key_id);
            if keys.is_empty() {
                self.value_to_keys.remove(&value_id);
            }
        }
        Some((key, value))
    }

    /// Remove a value together with every key pointing at it
    pub fn remove_value(&mut self, value_id: &V::Id) -> Vec<K> {
        let Some(key_ids) = self.value_to_keys.remove(value_id) else {
            return Vec::new();
        };
        key_ids
            .iter()
            .filter_map(|key_id| self.key_to_value.remove(key_id))
            .map(|(key, _)| key)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.key_to_value.values().map(|(k, v)| (k, v))
    }
}

impl<K: Identifier, V: Identifier> Default for TwoWayQuickMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
