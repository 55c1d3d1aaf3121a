use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::GateError;
use crate::events::GateDeleted;
use crate::state::{Flow, FlowRouter, Gate, MerchantIndex};

pub fn handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, DeleteGate<'info>>,
    _gate_id: u64,
) -> Result<()> {
    let gate = &mut ctx.accounts.gate;

    require!(
        gate.owner == ctx.accounts.merchant.key(),
        GateError::DeleteForeignGate
    );

    let router_key = ctx.accounts.router.key();

    // Force-terminate every active user's inbound flow before the gate id
    // becomes invalid; the flow accounts are supplied as remaining accounts
    // and verified against their PDAs.
    for payer in gate.active_users.clone() {
        let (expected, _) = Pubkey::find_program_address(
            &[
                FLOW_SEED,
                gate.token.as_ref(),
                payer.as_ref(),
                router_key.as_ref(),
            ],
            ctx.program_id,
        );
        let info = ctx
            .remaining_accounts
            .iter()
            .find(|a| a.key() == expected)
            .ok_or(GateError::MissingFlowAccount)?;

        let mut flow = Account::<Flow>::try_from(info)?;
        flow.rate = 0;
        flow.exit(ctx.program_id)?;

        msg!("Force closed flow from {} to gate {}", payer, gate.id);
    }

    ctx.accounts.outbound_flow.rate = 0;
    ctx.accounts.router.clear();
    ctx.accounts.merchant_index.remove(gate.id);

    emit!(GateDeleted {
        gate_id: gate.id,
        merchant: gate.owner,
    });

    msg!("Deleted gate {} (\"{}\")", gate.id, gate.name);
    gate.clear();
    Ok(())
}

#[derive(Accounts)]
#[instruction(gate_id: u64)]
pub struct DeleteGate<'info> {
    /// The existence check lives here, before the accounts below derive
    /// their seeds from gate fields a zeroed gate no longer carries
    #[account(
        mut,
        seeds = [GATE_SEED, &gate_id.to_le_bytes()],
        bump = gate.bump,
        constraint = gate.exists() @ GateError::DeleteNonexistentGate
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
        seeds = [FLOW_SEED, gate.token.as_ref(), router.key().as_ref(), gate.owner.as_ref()],
        bump = outbound_flow.bump
    )]
    pub outbound_flow: Account<'info, Flow>,

    #[account(
        mut,
        seeds = [MERCHANT_SEED, gate.owner.as_ref()],
        bump = merchant_index.bump
    )]
    pub merchant_index: Account<'info, MerchantIndex>,

    pub merchant: Signer<'info>,
    // remaining accounts: one inbound Flow account per active user
}
