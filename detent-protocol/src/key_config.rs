//! `KEY_CONFIG` payload decoding.
//!
//! The payload is a `|`-separated list of `index,name` entries:
//!
//! ```text
//! 0,Copy|3,Paste|11,Mic Mute
//! ```
//!
//! Entries with a missing comma, a non-numeric index or an index outside
//! `0..KEY_COUNT` are skipped and decoding continues with the next entry.

use heapless::String;

/// Number of keys on the keypad
pub const KEY_COUNT: usize = 12;

/// Maximum stored key name length in bytes
pub const MAX_KEY_NAME_LEN: usize = 16;

/// Entry separator
pub const ENTRY_SEPARATOR: char = '|';

/// Separator between index and name inside one entry
pub const FIELD_SEPARATOR: char = ',';

/// A stored key name
pub type KeyName = String<MAX_KEY_NAME_LEN>;

/// Borrowed `KEY_CONFIG` payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyConfig<'a> {
    payload: &'a str,
}

/// One valid `index,name` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEntry<'a> {
    /// Key slot, always below `KEY_COUNT`
    pub index: usize,
    /// Name as sent by the host, untruncated
    pub name: &'a str,
}

impl<'a> KeyConfig<'a> {
    pub const fn new(payload: &'a str) -> Self {
        Self { payload }
    }

    /// Raw payload text
    pub fn payload(&self) -> &'a str {
        self.payload
    }

    /// Iterate the valid entries in payload order
    pub fn entries(&self) -> Entries<'a> {
        Entries {
            segments: self.payload.split(ENTRY_SEPARATOR),
        }
    }
}

/// Iterator over the valid entries of a [`KeyConfig`]
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    segments: core::str::Split<'a, char>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = KeyEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let segment = self.segments.next()?;
            if let Some(entry) = parse_entry(segment) {
                return Some(entry);
            }
        }
    }
}

fn parse_entry(segment: &str) -> Option<KeyEntry<'_>> {
    let (index, name) = segment.split_once(FIELD_SEPARATOR)?;
    let index: usize = index.trim().parse().ok()?;
    (index < KEY_COUNT).then_some(KeyEntry { index, name })
}

/// Copy a name into fixed storage, truncating on a character boundary
pub fn key_name(name: &str) -> KeyName {
    let mut end = name.len().min(MAX_KEY_NAME_LEN);
    while !name.is_char_boundary(end) {
        end -= 1;
    }

    let mut stored = KeyName::new();
    // end <= capacity
    let _ = stored.push_str(&name[..end]);
    stored
}
