use anchor_lang::prelude::*;

use crate::events::FactoryUpdated;
use crate::pda::FACTORY_SEED;
use crate::payout::FeeSchedule;
use crate::state::*;

#[derive(Accounts)]
pub struct InitializeFactory<'info> {
    /// Deployer — becomes the factory authority and pays for allocation.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Factory PDA — one per deployment.
    #[account(
        init,
        payer = authority,
        space = Factory::SIZE,
        seeds = [FACTORY_SEED],
        bump,
    )]
    pub factory: Account<'info, Factory>,

    /// Wallet that receives platform fees.
    /// CHECK: Only ever credited with lamports.
    pub platform: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeFactory>, fee_schedule: FeeSchedule) -> Result<()> {
    fee_schedule.validate()?;

    let factory = &mut ctx.accounts.factory;
    factory.authority = ctx.accounts.authority.key();
    factory.platform = ctx.accounts.platform.key();
    factory.fee_schedule = fee_schedule;
    factory.market_count = 0;
    factory.total_volume = 0;
    factory.bump = ctx.bumps.factory;

    emit!(FactoryUpdated {
        factory: factory.key(),
        authority: factory.authority,
        platform: factory.platform,
        platform_fee_bps: fee_schedule.platform_fee_bps,
        creator_fee_bps: fee_schedule.creator_fee_bps,
    });

    msg!(
        "Factory initialized: authority={} platform={} fees={}+{}bps",
        factory.authority,
        factory.platform,
        fee_schedule.platform_fee_bps,
        fee_schedule.creator_fee_bps,
    );

    Ok(())
}
