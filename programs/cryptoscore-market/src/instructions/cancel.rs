use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::events::MarketCancelled;
use crate::pda::FACTORY_SEED;
use crate::state::*;

#[derive(Accounts)]
pub struct CancelMarket<'info> {
    /// Market creator or factory authority.
    #[account(
        constraint = authority.key() == market.creator || authority.key() == factory.authority
            @ MarketError::UnauthorizedAuthority,
    )]
    pub authority: Signer<'info>,

    /// The market to cancel.
    #[account(
        mut,
        has_one = factory @ MarketError::MarketMismatch,
    )]
    pub market: Account<'info, Market>,

    #[account(
        seeds = [FACTORY_SEED],
        bump = factory.bump,
    )]
    pub factory: Account<'info, Factory>,
}

pub fn handler(ctx: Context<CancelMarket>) -> Result<()> {
    let market = &mut ctx.accounts.market;
    market.check_cancellable()?;
    market.status = MarketStatus::Cancelled;

    emit!(MarketCancelled {
        market: market.key(),
        cancelled_by: ctx.accounts.authority.key(),
        participant_count: market.participant_count,
    });

    msg!(
        "Market {} ({}) cancelled by {} | {} stakes refundable",
        market.key(),
        market.match_id,
        ctx.accounts.authority.key(),
        market.participant_count,
    );

    Ok(())
}
