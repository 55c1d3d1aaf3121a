use anchor_lang::prelude::*;

use crate::constants::MAX_ACTIVE_USERS_PER_GATE;
use crate::errors::GateError;

/// Per-gate flow router. The router PDA is the gate's effective
/// receiving address: payers stream to the router, and the router
/// maintains a single outbound flow to the merchant whose rate is the
/// sum of all currently recognized inbound flows. Only the settlement
/// routine may mutate the outbound flow.
#[account]
pub struct FlowRouter {
    /// Gate this router belongs to
    pub gate_id: u64,

    /// Merchant receiving the aggregate outbound flow
    pub owner: Pubkey,

    /// Token mint of all flows routed through this gate
    pub token: Pubkey,

    /// Inbound flows currently recognized as valid check-ins
    pub inbound: Vec<InboundFlow>,

    /// Current aggregate outbound rate to the merchant
    pub out_rate: u64,

    /// PDA bump seed
    pub bump: u8,
}

/// One recognized inbound flow
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Debug)]
pub struct InboundFlow {
    pub payer: Pubkey,
    pub rate: u64,
}

impl InboundFlow {
    pub const SIZE: usize = 32  // payer
        + 8;                    // rate
}

impl FlowRouter {
    pub const SIZE: usize = 8                                   // gate_id
        + 32                                                    // owner
        + 32                                                    // token
        + 4 + (InboundFlow::SIZE * MAX_ACTIVE_USERS_PER_GATE)   // inbound
        + 8                                                     // out_rate
        + 1;                                                    // bump

    pub fn is_checked_in(&self, payer: &Pubkey) -> bool {
        self.inbound.iter().any(|f| f.payer == *payer)
    }

    pub fn record_inbound(&mut self, payer: Pubkey, rate: u64) -> Result<()> {
        require!(!self.is_checked_in(&payer), GateError::AlreadyCheckedIn);
        require!(
            self.inbound.len() < MAX_ACTIVE_USERS_PER_GATE,
            GateError::GateFull
        );
        self.inbound.push(InboundFlow { payer, rate });
        Ok(())
    }

    pub fn clear_inbound(&mut self, payer: &Pubkey) {
        if let Some(position) = self.inbound.iter().position(|f| f.payer == *payer) {
            self.inbound.swap_remove(position);
        }
    }

    /// Sum of all recognized inbound rates, with overflow protection
    pub fn aggregate_rate(&self) -> Result<u64> {
        self.inbound
            .iter()
            .try_fold(0u64, |acc, f| acc.checked_add(f.rate))
            .ok_or_else(|| error!(GateError::RateOverflow))
    }

    /// Reset to the empty state when the gate is deleted
    pub fn clear(&mut self) {
        self.inbound.clear();
        self.out_rate = 0;
    }
}
