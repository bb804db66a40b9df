use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::events::FactoryUpdated;
use crate::pda::FACTORY_SEED;
use crate::payout::FeeSchedule;
use crate::state::*;

/// Fields left as `None` keep their current value.
#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct UpdateFactoryParams {
    pub authority: Option<Pubkey>,
    pub platform: Option<Pubkey>,
    /// Applies to markets created after the update only.
    pub fee_schedule: Option<FeeSchedule>,
}

#[derive(Accounts)]
pub struct UpdateFactory<'info> {
    #[account(
        constraint = authority.key() == factory.authority @ MarketError::UnauthorizedAuthority,
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [FACTORY_SEED],
        bump = factory.bump,
    )]
    pub factory: Account<'info, Factory>,
}

pub fn handler(ctx: Context<UpdateFactory>, params: UpdateFactoryParams) -> Result<()> {
    if let Some(schedule) = &params.fee_schedule {
        schedule.validate()?;
    }

    let factory = &mut ctx.accounts.factory;
    if let Some(authority) = params.authority {
        factory.authority = authority;
    }
    if let Some(platform) = params.platform {
        factory.platform = platform;
    }
    if let Some(schedule) = params.fee_schedule {
        factory.fee_schedule = schedule;
    }

    emit!(FactoryUpdated {
        factory: factory.key(),
        authority: factory.authority,
        platform: factory.platform,
        platform_fee_bps: factory.fee_schedule.platform_fee_bps,
        creator_fee_bps: factory.fee_schedule.creator_fee_bps,
    });

    msg!(
        "Factory updated by {}: authority={} platform={} fees={}+{}bps",
        ctx.accounts.authority.key(),
        factory.authority,
        factory.platform,
        factory.fee_schedule.platform_fee_bps,
        factory.fee_schedule.creator_fee_bps,
    );

    Ok(())
}
