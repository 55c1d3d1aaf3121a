use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::GateError;
use crate::events::GateAdded;
use crate::state::{Flow, FlowRouter, Gate, GateCounter, MerchantIndex};

pub fn handler(
    ctx: Context<AddGate>,
    gate_id: u64,
    name: String,
    flow_rate: u64,
    token: Pubkey,
) -> Result<()> {
    require!(flow_rate > 0, GateError::ZeroFlowRate);
    require!(!name.is_empty(), GateError::EmptyGateName);
    require!(name.len() <= MAX_GATE_NAME_LEN, GateError::GateNameTooLong);

    let counter = &mut ctx.accounts.counter;
    require!(gate_id == counter.next_gate_id, GateError::StaleGateId);
    counter.next_gate_id += 1;

    let merchant = ctx.accounts.merchant.key();
    let router_key = ctx.accounts.router.key();

    let index = &mut ctx.accounts.merchant_index;
    if index.owner == Pubkey::default() {
        index.owner = merchant;
        index.bump = ctx.bumps.merchant_index;
    }

    require!(!index.has_name(&name), GateError::DuplicateGateName);

    if !index.try_append(gate_id, name.clone()) {
        // Bounded index: beyond the cap the insertion is dropped without
        // error and the gate stays unregistered
        msg!("merchant {} is at the gate limit, dropping add", merchant);
        return Ok(());
    }

    let gate = &mut ctx.accounts.gate;
    gate.id = gate_id;
    gate.name = name.clone();
    gate.flow_rate = flow_rate;
    gate.token = token;
    gate.owner = merchant;
    gate.active_users = Vec::new();
    gate.bump = ctx.bumps.gate;

    let router = &mut ctx.accounts.router;
    router.gate_id = gate_id;
    router.owner = merchant;
    router.token = token;
    router.inbound = Vec::new();
    router.out_rate = 0;
    router.bump = ctx.bumps.router;

    let outbound = &mut ctx.accounts.outbound_flow;
    outbound.token = token;
    outbound.sender = router_key;
    outbound.receiver = merchant;
    outbound.rate = 0;
    outbound.bump = ctx.bumps.outbound_flow;

    emit!(GateAdded {
        gate_id,
        merchant,
        name: name.clone(),
        flow_rate,
        token,
    });

    msg!(
        "Added gate {} (\"{}\") at rate {} for merchant {}",
        gate_id,
        name,
        flow_rate,
        merchant
    );
    Ok(())
}

#[derive(Accounts)]
#[instruction(gate_id: u64, name: String, flow_rate: u64, token: Pubkey)]
pub struct AddGate<'info> {
    #[account(
        mut,
        seeds = [COUNTER_SEED],
        bump = counter.bump
    )]
    pub counter: Account<'info, GateCounter>,

    #[account(
        init,
        payer = merchant,
        space = 8 + Gate::SIZE,
        seeds = [GATE_SEED, &gate_id.to_le_bytes()],
        bump
    )]
    pub gate: Account<'info, Gate>,

    #[account(
        init,
        payer = merchant,
        space = 8 + FlowRouter::SIZE,
        seeds = [ROUTER_SEED, &gate_id.to_le_bytes()],
        bump
    )]
    pub router: Account<'info, FlowRouter>,

    /// The router's aggregate outbound flow to the merchant, created
    /// closed (rate zero)
    #[account(
        init,
        payer = merchant,
        space = 8 + Flow::SIZE,
        seeds = [FLOW_SEED, token.as_ref(), router.key().as_ref(), merchant.key().as_ref()],
        bump
    )]
    pub outbound_flow: Account<'info, Flow>,

    #[account(
        init_if_needed,
        payer = merchant,
        space = 8 + MerchantIndex::SIZE,
        seeds = [MERCHANT_SEED, merchant.key().as_ref()],
        bump
    )]
    pub merchant_index: Account<'info, MerchantIndex>,

    #[account(mut)]
    pub merchant: Signer<'info>,

    pub system_program: Program<'info, System>,
}
