use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::GateError;
use crate::events::GateRenamed;
use crate::state::{Gate, MerchantIndex};

pub fn handler(ctx: Context<RenameGate>, _gate_id: u64, new_name: String) -> Result<()> {
    let gate = &mut ctx.accounts.gate;

    require!(
        gate.owner == ctx.accounts.merchant.key(),
        GateError::RenameForeignGate
    );
    require!(!new_name.is_empty(), GateError::EmptyGateName);
    require!(new_name.len() <= MAX_GATE_NAME_LEN, GateError::GateNameTooLong);

    let index = &mut ctx.accounts.merchant_index;
    require!(!index.has_name(&new_name), GateError::DuplicateGateName);

    index.rename(gate.id, new_name.clone());

    msg!("Renamed gate {} from \"{}\" to \"{}\"", gate.id, gate.name, new_name);
    gate.name = new_name.clone();

    emit!(GateRenamed {
        gate_id: gate.id,
        name: new_name,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(gate_id: u64)]
pub struct RenameGate<'info> {
    /// Existence is checked here so a zeroed gate fails with the domain
    /// error before the index seeds below derive from its cleared owner
    #[account(
        mut,
        seeds = [GATE_SEED, &gate_id.to_le_bytes()],
        bump = gate.bump,
        constraint = gate.exists() @ GateError::NonexistentGate
    )]
    pub gate: Account<'info, Gate>,

    /// Index of the gate's owner, not the caller, so that a foreign
    /// caller still reaches the ownership check below
    #[account(
        mut,
        seeds = [MERCHANT_SEED, gate.owner.as_ref()],
        bump = merchant_index.bump
    )]
    pub merchant_index: Account<'info, MerchantIndex>,

    pub merchant: Signer<'info>,
}
