use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::events::MarketCreated;
use crate::pda::{validate_match_id, FACTORY_SEED, MARKET_SEED};
use crate::state::*;

/// Parameters for creating a new match market.
///
/// Borsh layout: match_id (u32 len + bytes), entry_fee, kickoff_time,
/// end_time (8 bytes LE each), is_public (1 byte).
#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct CreateMarketParams {
    /// Match identifier, 1–32 bytes. Part of the market address, so a
    /// longer id aborts address derivation before any check here runs;
    /// clients should check with `pda::market_address` first, which
    /// reports `MatchIdTooLong`.
    pub match_id: String,

    /// Stake per participant in lamports.
    pub entry_fee: u64,

    /// Unix timestamp; joining closes and resolution opens here.
    pub kickoff_time: i64,

    /// Unix timestamp of the scheduled final whistle.
    pub end_time: i64,

    pub is_public: bool,
}

impl CreateMarketParams {
    /// Input checks at time `now`: id shape, non-zero fee, and
    /// now < kickoff < end.
    pub fn validate(&self, now: i64) -> Result<()> {
        validate_match_id(&self.match_id)?;
        require!(self.entry_fee > 0, MarketError::InvalidEntryFee);
        require!(
            self.kickoff_time > now && self.end_time > self.kickoff_time,
            MarketError::InvalidTimeRange
        );
        Ok(())
    }
}

#[derive(Accounts)]
#[instruction(params: CreateMarketParams)]
pub struct CreateMarket<'info> {
    /// Market creator — pays for allocation and later resolves.
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Factory — provides fee schedule and counts markets.
    #[account(
        mut,
        seeds = [FACTORY_SEED],
        bump = factory.bump,
    )]
    pub factory: Account<'info, Factory>,

    /// Market PDA — an existing account here means the match is taken.
    #[account(
        init_if_needed,
        payer = creator,
        space = Market::SIZE,
        seeds = [
            MARKET_SEED,
            factory.key().as_ref(),
            params.match_id.as_bytes(),
        ],
        bump,
    )]
    pub market: Account<'info, Market>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateMarket>, params: CreateMarketParams) -> Result<()> {
    ctx.accounts.market.check_unclaimed()?;

    let clock = Clock::get()?;
    params.validate(clock.unix_timestamp)?;

    let factory = &mut ctx.accounts.factory;
    let market = &mut ctx.accounts.market;

    market.factory = factory.key();
    market.creator = ctx.accounts.creator.key();
    market.match_id = params.match_id;
    market.entry_fee = params.entry_fee;
    market.kickoff_time = params.kickoff_time;
    market.end_time = params.end_time;
    market.created_at = clock.unix_timestamp;
    market.is_public = params.is_public;
    market.status = MarketStatus::Open;
    market.outcome = MatchOutcome::None;
    market.total_pool = 0;
    market.participant_count = 0;
    market.home_count = 0;
    market.draw_count = 0;
    market.away_count = 0;
    market.fee_schedule = factory.fee_schedule;
    market.fees_collected = 0;
    market.claimants = 0;
    market.reward_per_claimant = 0;
    market.paid_out = 0;
    market.withdrawal_count = 0;
    market.bump = ctx.bumps.market;

    factory.register_market()?;

    emit!(MarketCreated {
        market: market.key(),
        factory: market.factory,
        creator: market.creator,
        match_id: market.match_id.clone(),
        entry_fee: market.entry_fee,
        kickoff_time: market.kickoff_time,
        end_time: market.end_time,
        is_public: market.is_public,
    });

    msg!(
        "Market {} created for match {} | entry fee: {} | kickoff: {} | #{}",
        market.key(),
        market.match_id,
        market.entry_fee,
        market.kickoff_time,
        factory.market_count,
    );

    Ok(())
}
