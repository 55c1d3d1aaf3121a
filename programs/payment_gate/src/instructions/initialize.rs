use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::GateCounter;

pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    let counter = &mut ctx.accounts.counter;

    // Gate ids start at 1 so that id 0 never refers to a gate
    counter.next_gate_id = 1;
    counter.bump = ctx.bumps.counter;

    msg!("Gate registry initialized");
    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + GateCounter::SIZE,
        seeds = [COUNTER_SEED],
        bump
    )]
    pub counter: Account<'info, GateCounter>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}
