//! Key assignment table

use detent_protocol::{key_name, KeyConfig, KeyName, KEY_COUNT};

/// One key slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySlot {
    name: KeyName,
    assigned: bool,
}

impl KeySlot {
    const EMPTY: Self = Self {
        name: KeyName::new(),
        assigned: false,
    };

    /// Name sent by the host, empty when unassigned
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned
    }
}

/// Names and assignment flags for all keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTable {
    slots: [KeySlot; KEY_COUNT],
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyTable {
    pub const fn new() -> Self {
        Self {
            slots: [KeySlot::EMPTY; KEY_COUNT],
        }
    }

    /// Clear every slot
    pub fn reset(&mut self) {
        self.slots = [KeySlot::EMPTY; KEY_COUNT];
    }

    /// Assign a name to a slot
    ///
    /// Returns false if `index` is out of range.
    pub fn assign(&mut self, index: usize, name: &str) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                slot.name = key_name(name);
                slot.assigned = true;
                true
            }
            None => false,
        }
    }

    /// Apply every valid entry of a `KEY_CONFIG` payload
    ///
    /// Returns the number of slots written.
    pub fn apply(&mut self, config: &KeyConfig<'_>) -> usize {
        config
            .entries()
            .filter(|entry| self.assign(entry.index, entry.name))
            .count()
    }

    /// Out-of-range indices are never assigned
    pub fn is_assigned(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(KeySlot::is_assigned)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(KeySlot::name)
    }

    pub fn assigned_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.assigned).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeySlot> {
        self.slots.iter()
    }
}
