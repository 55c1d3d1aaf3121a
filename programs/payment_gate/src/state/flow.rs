use anchor_lang::prelude::*;

/// A rate-based payment flow between two parties for a given token.
/// Keyed by (token, sender, receiver) via PDA seeds. A rate of zero
/// means the flow is deleted; the record reads back as empty.
#[account]
pub struct Flow {
    /// Token mint this flow is denominated in
    pub token: Pubkey,

    /// Paying party
    pub sender: Pubkey,

    /// Receiving party
    pub receiver: Pubkey,

    /// Current flow rate in token units per unit time
    pub rate: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl Flow {
    pub const SIZE: usize = 32  // token
        + 32                    // sender
        + 32                    // receiver
        + 8                     // rate
        + 1;                    // bump

    /// A flow at rate zero is indistinguishable from no flow at all
    pub fn is_open(&self) -> bool {
        self.rate > 0
    }
}
