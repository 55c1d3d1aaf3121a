use anchor_lang::prelude::*;

use crate::constants::{MAX_ACTIVE_USERS_PER_GATE, MAX_GATE_NAME_LEN};
use crate::errors::GateError;

/// A named, rate-priced access point owned by a merchant.
/// A deleted gate keeps its account but is zeroed out, so a lookup
/// of the id observably returns an empty owner.
#[account]
pub struct Gate {
    /// Globally unique gate id, assigned from the registry counter
    pub id: u64,

    /// Display name, unique among gates of the same merchant
    pub name: String,

    /// Payment rate in token units per unit time, always positive
    pub flow_rate: u64,

    /// Token mint payments are denominated in
    pub token: Pubkey,

    /// Merchant that owns this gate, immutable after creation
    pub owner: Pubkey,

    /// Payers currently checked in at this gate
    pub active_users: Vec<Pubkey>,

    /// PDA bump seed
    pub bump: u8,
}

impl Gate {
    pub const SIZE: usize = 8                           // id
        + 4 + MAX_GATE_NAME_LEN                         // name
        + 8                                             // flow_rate
        + 32                                            // token
        + 32                                            // owner
        + 4 + (32 * MAX_ACTIVE_USERS_PER_GATE)          // active_users
        + 1;                                            // bump

    /// A zeroed owner marks a deleted or never-registered gate
    pub fn exists(&self) -> bool {
        self.owner != Pubkey::default()
    }

    pub fn is_active_user(&self, payer: &Pubkey) -> bool {
        self.active_users.contains(payer)
    }

    pub fn add_active_user(&mut self, payer: Pubkey) -> Result<()> {
        require!(!self.active_users.contains(&payer), GateError::AlreadyCheckedIn);
        require!(
            self.active_users.len() < MAX_ACTIVE_USERS_PER_GATE,
            GateError::GateFull
        );
        self.active_users.push(payer);
        Ok(())
    }

    pub fn remove_active_user(&mut self, payer: &Pubkey) {
        if let Some(position) = self.active_users.iter().position(|u| u == payer) {
            self.active_users.swap_remove(position);
        }
    }

    /// Reset all fields to their empty state, marking the gate deleted
    pub fn clear(&mut self) {
        self.id = 0;
        self.name = String::new();
        self.flow_rate = 0;
        self.token = Pubkey::default();
        self.owner = Pubkey::default();
        self.active_users.clear();
    }
}
