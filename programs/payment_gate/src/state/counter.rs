use anchor_lang::prelude::*;

/// Singleton counter PDA assigning globally unique gate ids
#[account]
pub struct GateCounter {
    /// Next gate id to be assigned (monotonically increasing, starts at 1)
    pub next_gate_id: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl GateCounter {
    pub const SIZE: usize = 8   // next_gate_id
        + 1;                    // bump
}
