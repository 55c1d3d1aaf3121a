//! Direct flow mutations against the ledger, bypassing check-in and
//! check-out. Each instruction lands the flow change first and then runs
//! the same settlement as the check-in paths, so the registry bookkeeping
//! is reconciled to the flow state rather than the other way around.
//! These paths never abort because the bookkeeping disagreed.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::GateError;
use crate::state::{Flow, FlowRouter, Gate};
use crate::utils::settle;

pub fn open_flow(ctx: Context<OpenFlow>, _gate_id: u64, flow_rate: u64) -> Result<()> {
    let gate = &mut ctx.accounts.gate;
    require!(flow_rate > 0, GateError::ZeroFlowRate);

    let sender = ctx.accounts.sender.key();
    let router_key = ctx.accounts.router.key();

    let flow = &mut ctx.accounts.flow;
    require!(!flow.is_open(), GateError::FlowAlreadyExists);

    if flow.sender == Pubkey::default() {
        flow.token = gate.token;
        flow.sender = sender;
        flow.receiver = router_key;
        flow.bump = ctx.bumps.flow;
    }

    settle(
        gate,
        &mut ctx.accounts.router,
        flow,
        &mut ctx.accounts.outbound_flow,
        sender,
        flow_rate,
    )?;

    msg!("Flow opened from {} to gate {} at rate {}", sender, gate.id, flow_rate);
    Ok(())
}

pub fn update_flow(ctx: Context<MutateFlow>, _gate_id: u64, new_flow_rate: u64) -> Result<()> {
    let gate = &mut ctx.accounts.gate;
    require!(new_flow_rate > 0, GateError::ZeroFlowRate);

    let sender = ctx.accounts.sender.key();
    let flow = &mut ctx.accounts.flow;
    require!(flow.is_open(), GateError::FlowNotFound);

    let old_rate = flow.rate;
    settle(
        gate,
        &mut ctx.accounts.router,
        flow,
        &mut ctx.accounts.outbound_flow,
        sender,
        new_flow_rate,
    )?;

    msg!(
        "Flow from {} to gate {} updated from rate {} to {}",
        sender,
        gate.id,
        old_rate,
        new_flow_rate
    );
    Ok(())
}

pub fn close_flow(ctx: Context<MutateFlow>, _gate_id: u64) -> Result<()> {
    let gate = &mut ctx.accounts.gate;

    let sender = ctx.accounts.sender.key();
    let flow = &mut ctx.accounts.flow;
    require!(flow.is_open(), GateError::FlowNotFound);

    settle(
        gate,
        &mut ctx.accounts.router,
        flow,
        &mut ctx.accounts.outbound_flow,
        sender,
        0,
    )?;

    msg!("Flow from {} to gate {} closed", sender, gate.id);
    Ok(())
}

#[derive(Accounts)]
#[instruction(gate_id: u64)]
pub struct OpenFlow<'info> {
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
        init_if_needed,
        payer = sender,
        space = 8 + Flow::SIZE,
        seeds = [FLOW_SEED, gate.token.as_ref(), sender.key().as_ref(), router.key().as_ref()],
        bump
    )]
    pub flow: Account<'info, Flow>,

    #[account(
        mut,
        seeds = [FLOW_SEED, gate.token.as_ref(), router.key().as_ref(), gate.owner.as_ref()],
        bump = outbound_flow.bump
    )]
    pub outbound_flow: Account<'info, Flow>,

    #[account(mut)]
    pub sender: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(gate_id: u64)]
pub struct MutateFlow<'info> {
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
        seeds = [FLOW_SEED, gate.token.as_ref(), sender.key().as_ref(), router.key().as_ref()],
        bump = flow.bump
    )]
    pub flow: Account<'info, Flow>,

    #[account(
        mut,
        seeds = [FLOW_SEED, gate.token.as_ref(), router.key().as_ref(), gate.owner.as_ref()],
        bump = outbound_flow.bump
    )]
    pub outbound_flow: Account<'info, Flow>,

    pub sender: Signer<'info>,
}
