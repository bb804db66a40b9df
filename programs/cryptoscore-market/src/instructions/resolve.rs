use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::events::MarketResolved;
use crate::pda::{FACTORY_SEED, MARKET_SEED};
use crate::state::*;
use crate::utils::pay_out;

#[derive(Accounts)]
pub struct ResolveMarket<'info> {
    /// Must be the market creator; receives the creator fee.
    #[account(mut)]
    pub resolver: Signer<'info>,

    /// The market to resolve.
    #[account(
        mut,
        seeds = [
            MARKET_SEED,
            market.factory.as_ref(),
            market.match_id.as_bytes(),
        ],
        bump = market.bump,
        has_one = factory @ MarketError::MarketMismatch,
    )]
    pub market: Account<'info, Market>,

    /// Factory — credited with the market's volume.
    #[account(
        mut,
        seeds = [FACTORY_SEED],
        bump = factory.bump,
    )]
    pub factory: Account<'info, Factory>,

    /// Platform fee recipient.
    /// CHECK: Validated against factory configuration.
    #[account(
        mut,
        address = factory.platform @ MarketError::InvalidPlatformAccount,
    )]
    pub platform: UncheckedAccount<'info>,
}

pub fn handler(ctx: Context<ResolveMarket>, outcome: u8) -> Result<()> {
    ctx.accounts
        .market
        .check_resolver(&ctx.accounts.resolver.key())?;
    let outcome = MatchOutcome::from_choice(outcome).ok_or(MarketError::InvalidOutcome)?;

    let clock = Clock::get()?;
    ctx.accounts.market.check_resolvable(clock.unix_timestamp)?;

    // Fees and reward are fixed now; rewards are pulled later, one
    // withdraw per claimant.
    let settlement = ctx.accounts.market.settlement(outcome)?;

    let market_info = ctx.accounts.market.to_account_info();
    pay_out(
        &market_info,
        &ctx.accounts.platform.to_account_info(),
        settlement.fees.platform_fee,
    )?;
    pay_out(
        &market_info,
        &ctx.accounts.resolver.to_account_info(),
        settlement.fees.creator_fee,
    )?;

    let market = &mut ctx.accounts.market;
    market.apply_resolution(outcome, &settlement);
    ctx.accounts.factory.credit_volume(market.total_pool)?;

    let winner_count = market.count_for(outcome);
    emit!(MarketResolved {
        market: market.key(),
        outcome,
        winner_count,
        total_pool: market.total_pool,
        platform_fee: settlement.fees.platform_fee,
        creator_fee: settlement.fees.creator_fee,
        reward_per_claimant: settlement.reward_per_claimant,
        refund_all: settlement.refund_all,
    });

    msg!(
        "Market {} resolved: outcome={:?} winners={} pool={} fees={}+{} reward={} dust={}",
        market.key(),
        outcome,
        winner_count,
        market.total_pool,
        settlement.fees.platform_fee,
        settlement.fees.creator_fee,
        settlement.reward_per_claimant,
        settlement.dust,
    );

    Ok(())
}
