//! Branch Target Buffer (BTB).
//!
//! The BTB is a direct-mapped, tagged table holding the last observed taken
//! target of each conditional branch. It lets fetch redirect to a predicted
//! target before the branch executes.

#[derive(Debug, Clone, Copy, Default)]
struct BtbEntry {
    /// Full PC of the owning branch.
    tag: u64,
    target: u64,
    valid: bool,
}

/// Direct-mapped target table indexed by word PC.
#[derive(Debug, Clone)]
pub struct Btb {
    table: Vec<BtbEntry>,
}

impl Btb {
    /// Creates an empty table of `size` entries; a size of zero is treated
    /// as one.
    pub fn new(size: usize) -> Self {
        Self {
            table: vec![BtbEntry::default(); size.max(1)],
        }
    }

    /// Word PC modulo the table size.
    fn index(&self, pc: u64) -> usize {
        ((pc >> 2) % self.table.len() as u64) as usize
    }

    /// Returns the recorded target of the branch at `pc`, or `None` if its
    /// slot is empty or owned by another branch.
    pub fn get_target(&self, pc: u64) -> Option<u64> {
        let e = self.table[self.index(pc)];
        (e.valid && e.tag == pc).then_some(e.target)
    }

    /// Records the taken target of the branch at `pc`, replacing whatever
    /// entry occupied its slot.
    pub fn update(&mut self, pc: u64, target: u64) {
        let idx = self.index(pc);
        self.table[idx] = BtbEntry {
            tag: pc,
            target,
            valid: true,
        };
    }
}
