use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::GateError;
use crate::state::{Flow, FlowRouter, Gate};
use crate::utils::settle;

pub fn handler(ctx: Context<CheckOut>, _gate_id: u64) -> Result<()> {
    let gate = &mut ctx.accounts.gate;

    let payer = ctx.accounts.payer.key();
    require!(
        ctx.accounts.router.is_checked_in(&payer),
        GateError::NotCheckedIn
    );

    // Lower the flow by the gate rate; for a recognized check-in the flow
    // sits at exactly the gate rate, so this deletes it
    let flow = &mut ctx.accounts.inbound_flow;
    let new_rate = flow.rate.saturating_sub(gate.flow_rate);

    settle(
        gate,
        &mut ctx.accounts.router,
        flow,
        &mut ctx.accounts.outbound_flow,
        payer,
        new_rate,
    )?;

    Ok(())
}

#[derive(Accounts)]
#[instruction(gate_id: u64)]
pub struct CheckOut<'info> {
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

    #[account(
        mut,
        seeds = [FLOW_SEED, gate.token.as_ref(), payer.key().as_ref(), router.key().as_ref()],
        bump = inbound_flow.bump
    )]
    pub inbound_flow: Account<'info, Flow>,

    #[account(
        mut,
        seeds = [FLOW_SEED, gate.token.as_ref(), router.key().as_ref(), gate.owner.as_ref()],
        bump = outbound_flow.bump
    )]
    pub outbound_flow: Account<'info, Flow>,

    pub payer: Signer<'info>,
}
