use crate::core::{TypeTag, Value};
use indexmap::IndexMap;

/// A dynamic attribute's current value and its type tag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DynamicSlot {
    pub tag: TypeTag,
    pub value: Value,
}

impl DynamicSlot {
    pub fn new(tag: TypeTag, value: Value) -> Self {
        Self { tag, value }
    }
}

/// Insertion-ordered map of attribute name to slot, owned by one record.
#[derive(Debug, Clone, Default)]
pub struct DynamicAttributeMap {
    slots: IndexMap<String, DynamicSlot>,
}

impl DynamicAttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&DynamicSlot> {
        self.slots.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.slots.get(name).map(|slot| &slot.value)
    }

    /// Inserts a new entry. An existing entry is left untouched and `false` returned.
    pub fn insert(&mut self, name: &str, slot: DynamicSlot) -> bool {
        if self.slots.contains_key(name) {
            return false;
        }
        self.slots.insert(name.to_string(), slot);
        true
    }

    /// Replaces the value of an existing entry, keeping its tag.
    pub fn set_value(&mut self, name: &str, value: Value) -> bool {
        match self.slots.get_mut(name) {
            Some(slot) => {
                slot.value = value;
                true
            }
            None => false,
        }
    }

    /// Removes an entry, keeping the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<DynamicSlot> {
        self.slots.shift_remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DynamicSlot)> {
        self.slots.iter().map(|(name, slot)| (name.as_str(), slot))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
