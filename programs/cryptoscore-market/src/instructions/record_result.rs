use anchor_lang::prelude::*;

use crate::events::UserStatsUpdated;
use crate::pda::{MARKET_SEED, PARTICIPANT_SEED, USER_STATS_SEED};
use crate::state::*;

/// Permissionless: anyone may pay to fold a resolved result into a user's
/// stats. Each participant counts once.
#[derive(Accounts)]
pub struct RecordResult<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        seeds = [
            MARKET_SEED,
            market.factory.as_ref(),
            market.match_id.as_bytes(),
        ],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    #[account(
        mut,
        seeds = [PARTICIPANT_SEED, market.key().as_ref(), participant.user.as_ref()],
        bump = participant.bump,
    )]
    pub participant: Account<'info, Participant>,

    /// UserStats PDA — created on the user's first recorded result.
    #[account(
        init_if_needed,
        payer = payer,
        space = UserStats::SIZE,
        seeds = [USER_STATS_SEED, participant.user.as_ref()],
        bump,
    )]
    pub user_stats: Account<'info, UserStats>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<RecordResult>) -> Result<()> {
    let (won, earned) = ctx
        .accounts
        .market
        .result_for(&ctx.accounts.participant)?;

    let clock = Clock::get()?;
    let participant = &mut ctx.accounts.participant;
    let stats = &mut ctx.accounts.user_stats;

    if stats.user == Pubkey::default() {
        stats.user = participant.user;
        stats.bump = ctx.bumps.user_stats;
    }
    stats.record(won, participant.stake, earned, clock.unix_timestamp)?;
    participant.stats_recorded = true;

    emit!(UserStatsUpdated {
        user: stats.user,
        market: ctx.accounts.market.key(),
        won,
        current_streak: stats.current_streak,
        total_earnings: stats.total_earnings,
    });

    msg!(
        "Stats for {}: {} wins / {} markets, streak {}",
        stats.user,
        stats.total_wins,
        stats.total_markets,
        stats.current_streak,
    );

    Ok(())
}
