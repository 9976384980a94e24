use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// The first candidate offset next to `cursor`, if there is one.
    pub fn step_from(self, cursor: usize) -> Option<usize> {
        match self {
            Direction::Forward => cursor.checked_add(1),
            Direction::Backward => cursor.checked_sub(1),
        }
    }
}

/// Linear scan for `pattern` starting at `start` (inclusive) and moving toward
/// the end of `haystack` in `direction`. Returns the first exact match and
/// never wraps.
pub fn find(
    haystack: &[u8],
    pattern: &[u8],
    start: usize,
    direction: Direction,
) -> EngineResult<usize> {
    if pattern.is_empty() || pattern.len() > haystack.len() {
        return Err(EngineError::NotFound);
    }
    let last = haystack.len() - pattern.len();
    let matches_at = |offset: usize| &haystack[offset..offset + pattern.len()] == pattern;

    let found = match direction {
        Direction::Forward => {
            if start > last {
                None
            } else {
                (start..=last).find(|&offset| matches_at(offset))
            }
        }
        Direction::Backward => (0..=start.min(last)).rev().find(|&offset| matches_at(offset)),
    };
    found.ok_or(EngineError::NotFound)
}

/// Every match of `pattern` that overlaps `window`, as half-open ranges.
pub fn matches_in(
    haystack: &[u8],
    pattern: &[u8],
    window: std::ops::Range<usize>,
) -> Vec<std::ops::Range<usize>> {
    if pattern.is_empty() || pattern.len() > haystack.len() || window.start >= window.end {
        return Vec::new();
    }
    let first = window.start.saturating_sub(pattern.len() - 1);
    let last = (haystack.len() - pattern.len()).min(window.end.saturating_sub(1));
    if first > last {
        return Vec::new();
    }
    (first..=last)
        .filter(|&offset| &haystack[offset..offset + pattern.len()] == pattern)
        .map(|offset| offset..offset + pattern.len())
        .collect()
}
