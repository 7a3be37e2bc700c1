//! Doubleword Buffer Implementation.
//!
//! Backing storage for the data memory, kept in units of 64-bit words. Each
//! word carries an "accessed" flag set whenever a block fetch covers it, so
//! the end-of-run report can list only the words the program touched.

/// Word-addressed storage with per-word access tracking.
#[derive(Debug, Clone)]
pub struct WordBuffer {
    words: Vec<i64>,
    accessed: Vec<bool>,
}

impl WordBuffer {
    /// Creates a zeroed buffer of `len` words.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len],
            accessed: vec![false; len],
        }
    }

    /// Returns the number of words.
    pub const fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the buffer holds no words.
    pub const fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Reads word `idx`, or `None` if out of range.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<i64> {
        self.words.get(idx).copied()
    }

    /// Writes word `idx`. Out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, idx: usize, value: i64) {
        if let Some(w) = self.words.get_mut(idx) {
            *w = value;
        }
    }

    /// Returns a copy of `count` words starting at `start`.
    pub fn read_slice(&self, start: usize, count: usize) -> Option<Vec<i64>> {
        self.words.get(start..start + count).map(<[i64]>::to_vec)
    }

    /// Overwrites words starting at `start` with `data`.
    pub fn write_slice(&mut self, start: usize, data: &[i64]) {
        if let Some(dst) = self.words.get_mut(start..start + data.len()) {
            dst.copy_from_slice(data);
        }
    }

    /// Flags `count` words starting at `start` as accessed.
    pub fn mark_accessed(&mut self, start: usize, count: usize) {
        if let Some(flags) = self.accessed.get_mut(start..start + count) {
            flags.fill(true);
        }
    }

    /// Iterates over `(index, value)` of every accessed word, in index order.
    pub fn accessed(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.words
            .iter()
            .zip(&self.accessed)
            .enumerate()
            .filter(|(_, (_, touched))| **touched)
            .map(|(i, (w, _))| (i, *w))
    }
}
