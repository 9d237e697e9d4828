//! Per-iteration input bundle

use detent_protocol::KEY_COUNT;

use crate::encoder::Direction;

/// Set of key indices, iterated in ascending (scan) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeySet(u16);

impl KeySet {
    pub const EMPTY: Self = Self(0);

    /// Add a key; indices at or above `KEY_COUNT` are ignored
    pub fn insert(&mut self, index: usize) {
        if index < KEY_COUNT {
            self.0 |= 1 << index;
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        index < KEY_COUNT && self.0 & (1 << index) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> {
        let bits = self.0;
        (0..KEY_COUNT).filter(move |&i| bits & (1 << i) != 0)
    }
}

impl FromIterator<usize> for KeySet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = KeySet::EMPTY;
        for index in iter {
            set.insert(index);
        }
        set
    }
}

/// Everything the control loop collected in one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Inputs<'a> {
    /// At most one complete host line
    pub host_line: Option<&'a str>,
    /// Debounced encoder button press edge
    pub button_pressed: bool,
    /// Keys that went from released to pressed
    pub keys: KeySet,
    /// At most one encoder detent
    pub rotation: Option<Direction>,
}
