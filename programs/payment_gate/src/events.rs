use anchor_lang::prelude::*;

/// Event emitted when a merchant registers a new gate
#[event]
pub struct GateAdded {
    pub gate_id: u64,
    pub merchant: Pubkey,
    pub name: String,
    pub flow_rate: u64,
    pub token: Pubkey,
}

/// Event emitted when a gate is renamed
#[event]
pub struct GateRenamed {
    pub gate_id: u64,
    pub name: String,
}

/// Event emitted when a gate is deleted
#[event]
pub struct GateDeleted {
    pub gate_id: u64,
    pub merchant: Pubkey,
}

/// Event emitted when a payer becomes checked in at a gate
#[event]
pub struct CheckedIn {
    pub payer: Pubkey,
    pub gate_id: u64,
    pub flow_rate: u64,
    pub token: Pubkey,
}

/// Event emitted when a payer is no longer checked in at a gate
#[event]
pub struct CheckedOut {
    pub payer: Pubkey,
    pub gate_id: u64,
}
