use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::GateError;
use crate::state::{Flow, FlowRouter, Gate};
use crate::utils::{settle, FlowTransition};

pub fn handler(ctx: Context<CheckIn>, _gate_id: u64) -> Result<()> {
    let gate = &mut ctx.accounts.gate;

    let payer = ctx.accounts.payer.key();
    if ctx.accounts.router.is_checked_in(&payer) {
        msg!("already checked in at: {}", gate.name);
        return err!(GateError::AlreadyCheckedIn);
    }

    let router_key = ctx.accounts.router.key();
    let flow = &mut ctx.accounts.inbound_flow;
    if !flow.is_open() && flow.sender == Pubkey::default() {
        flow.token = gate.token;
        flow.sender = payer;
        flow.receiver = router_key;
        flow.bump = ctx.bumps.inbound_flow;
    }

    // Raise the payer's flow by the gate rate, creating it if absent
    let new_rate = flow
        .rate
        .checked_add(gate.flow_rate)
        .ok_or(GateError::RateOverflow)?;

    let transition = settle(
        gate,
        &mut ctx.accounts.router,
        flow,
        &mut ctx.accounts.outbound_flow,
        payer,
        new_rate,
    )?;

    // A pre-existing flow at some other rate cannot be turned into a
    // check-in; abort so neither the ledger nor the registry moves
    require!(
        transition == FlowTransition::CheckedIn,
        GateError::ConflictingFlow
    );

    Ok(())
}

#[derive(Accounts)]
#[instruction(gate_id: u64)]
pub struct CheckIn<'info> {
    #[account(
        mut,
        seeds = [GATE_SEED, &gate_id.to_le_bytes()],
        bump = gate.bump,
        constraint = gate.exists() @ GateError::NonexistentGate
    )]
    pub gate: Account<'info, Gate>,

    #[account(
        mut,
        seeds = [ROUTER_SEED, &gate_id.to_le_bytes()],
        bump = router.bump
    )]
    pub router: Account<'info, FlowRouter>,

    /// The payer's inbound flow to the gate's router
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Flow::SIZE,
        seeds = [FLOW_SEED, gate.token.as_ref(), payer.key().as_ref(), router.key().as_ref()],
        bump
    )]
    pub inbound_flow: Account<'info, Flow>,

    #[account(
        mut,
        seeds = [FLOW_SEED, gate.token.as_ref(), router.key().as_ref(), gate.owner.as_ref()],
        bump = outbound_flow.bump
    )]
    pub outbound_flow: Account<'info, Flow>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}
