//! Browser-history abstraction.

use super::location::Location;

/// The address bar and its session history.
pub trait History: Send {
    /// Location currently shown.
    fn current(&self) -> Location;

    /// Add a new entry after the current one, dropping any forward entries.
    fn push(&mut self, location: Location);

    /// Step back one entry. Returns false at the start of history.
    fn back(&mut self) -> bool;

    /// Step forward one entry. Returns false at the end of history.
    fn forward(&mut self) -> bool;
}

/// In-process session history: an entry list with a cursor.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Location>,
    cursor: usize,
}

impl MemoryHistory {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// History starting at a raw URL, as after opening a deep link.
    pub fn starting_at(raw: &str) -> Self {
        Self::new(Location::parse(raw))
    }

    pub fn entries(&self) -> &[Location] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(Location::root())
    }
}

impl History for MemoryHistory {
    fn current(&self) -> Location {
        self.entries[self.cursor].clone()
    }

    fn push(&mut self, location: Location) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(location);
        self.cursor = self.entries.len() - 1;
    }

    fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}
