use anchor_lang::prelude::*;

use crate::constants::{MAX_GATES_PER_MERCHANT, MAX_GATE_NAME_LEN};

/// Per-merchant index of owned gates. Bounded at 128 entries; an
/// insertion beyond the cap is a silent no-op rather than an error.
/// Removal is swap-with-last, so ordering after a delete is not
/// preserved.
#[account]
pub struct MerchantIndex {
    /// Merchant this index belongs to
    pub owner: Pubkey,

    /// Owned gates, in insertion order until the first removal
    pub gates: Vec<GateEntry>,

    /// PDA bump seed
    pub bump: u8,
}

/// One indexed gate. The name is mirrored here so that per-merchant
/// name uniqueness can be checked without loading every gate account.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Debug)]
pub struct GateEntry {
    pub id: u64,
    pub name: String,
}

impl GateEntry {
    pub const SIZE: usize = 8           // id
        + 4 + MAX_GATE_NAME_LEN;        // name
}

impl MerchantIndex {
    pub const SIZE: usize = 32                                  // owner
        + 4 + (GateEntry::SIZE * MAX_GATES_PER_MERCHANT)        // gates
        + 1;                                                    // bump

    pub fn is_full(&self) -> bool {
        self.gates.len() >= MAX_GATES_PER_MERCHANT
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.gates.iter().any(|g| g.name == name)
    }

    /// Append an entry unless the index is at capacity.
    /// Returns whether the entry was recorded.
    pub fn try_append(&mut self, id: u64, name: String) -> bool {
        if self.is_full() {
            return false;
        }
        self.gates.push(GateEntry { id, name });
        true
    }

    pub fn rename(&mut self, id: u64, name: String) {
        if let Some(entry) = self.gates.iter_mut().find(|g| g.id == id) {
            entry.name = name;
        }
    }

    /// Remove a gate id via swap-with-last-and-pop
    pub fn remove(&mut self, id: u64) {
        if let Some(position) = self.gates.iter().position(|g| g.id == id) {
            self.gates.swap_remove(position);
        }
    }

    pub fn gate_ids(&self) -> Vec<u64> {
        self.gates.iter().map(|g| g.id).collect()
    }
}
