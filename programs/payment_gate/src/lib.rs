use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;

declare_id!("Gptq1CK86DvrPcgRgDG3UpCKBeDYYxKkPpq7dr2ZW37R");

/// Payment Gate Registry Program
///
/// Metered, streaming-payment-gated access control: merchants register
/// rate-priced gates, payers check in and out, and a per-gate router
/// multiplexes inbound payment flows into one aggregate outbound flow
/// to the merchant
#[program]
pub mod payment_gate {
    use super::*;

    /// Create the registry's gate id counter
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }

    /// Register a new gate for the calling merchant
    pub fn add_gate(
        ctx: Context<AddGate>,
        gate_id: u64,
        name: String,
        flow_rate: u64,
        token: Pubkey,
    ) -> Result<()> {
        instructions::add_gate::handler(ctx, gate_id, name, flow_rate, token)
    }

    /// Rename a gate (owner only)
    pub fn rename_gate(ctx: Context<RenameGate>, gate_id: u64, new_name: String) -> Result<()> {
        instructions::rename_gate::handler(ctx, gate_id, new_name)
    }

    /// Delete a gate, force-closing all open flows to it (owner only)
    pub fn delete_gate<'info>(
        ctx: Context<'_, '_, 'info, 'info, DeleteGate<'info>>,
        gate_id: u64,
    ) -> Result<()> {
        instructions::delete_gate::handler(ctx, gate_id)
    }

    /// Check in at a gate, starting a payment flow at the gate's rate
    pub fn check_in(ctx: Context<CheckIn>, gate_id: u64) -> Result<()> {
        instructions::check_in::handler(ctx, gate_id)
    }

    /// Check out of a gate, stopping the payment flow
    pub fn check_out(ctx: Context<CheckOut>, gate_id: u64) -> Result<()> {
        instructions::check_out::handler(ctx, gate_id)
    }

    /// Open a flow to a gate's router directly, bypassing check-in.
    /// At exactly the gate rate this registers as an implicit check-in
    pub fn open_flow(ctx: Context<OpenFlow>, gate_id: u64, flow_rate: u64) -> Result<()> {
        instructions::flow_host::open_flow(ctx, gate_id, flow_rate)
    }

    /// Change the rate of an existing flow directly
    pub fn update_flow(ctx: Context<MutateFlow>, gate_id: u64, new_flow_rate: u64) -> Result<()> {
        instructions::flow_host::update_flow(ctx, gate_id, new_flow_rate)
    }

    /// Delete an existing flow directly
    pub fn close_flow(ctx: Context<MutateFlow>, gate_id: u64) -> Result<()> {
        instructions::flow_host::close_flow(ctx, gate_id)
    }
}
