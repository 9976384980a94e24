use crate::error::{EngineError, EngineResult};
use std::collections::BTreeSet;

/// Session-local marked offsets, kept sorted and de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkSet {
    offsets: BTreeSet<usize>,
}

impl BookmarkSet {
    /// Adds `offset` if absent, removes it otherwise. Returns whether it is
    /// now bookmarked.
    pub fn toggle(&mut self, offset: usize) -> bool {
        if self.offsets.remove(&offset) {
            false
        } else {
            self.offsets.insert(offset);
            true
        }
    }

    pub fn next_after(&self, offset: usize) -> EngineResult<usize> {
        self.offsets
            .range(offset.saturating_add(1)..)
            .next()
            .filter(|next| **next > offset)
            .or_else(|| self.offsets.first())
            .copied()
            .ok_or(EngineError::Empty)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.offsets.iter().copied()
    }
}
