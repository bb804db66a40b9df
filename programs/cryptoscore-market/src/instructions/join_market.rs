use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::errors::MarketError;
use crate::events::PredictionMade;
use crate::pda::{MARKET_SEED, PARTICIPANT_SEED};
use crate::state::*;

#[derive(Accounts)]
pub struct JoinMarket<'info> {
    /// The user staking the entry fee.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The market being joined — receives the stake.
    #[account(
        mut,
        seeds = [
            MARKET_SEED,
            market.factory.as_ref(),
            market.match_id.as_bytes(),
        ],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    /// Participant PDA — an existing account here means the user already
    /// joined.
    #[account(
        init_if_needed,
        payer = user,
        space = Participant::SIZE,
        seeds = [PARTICIPANT_SEED, market.key().as_ref(), user.key().as_ref()],
        bump,
    )]
    pub participant: Account<'info, Participant>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<JoinMarket>, prediction: u8) -> Result<()> {
    let prediction =
        MatchOutcome::from_choice(prediction).ok_or(MarketError::InvalidPrediction)?;
    let clock = Clock::get()?;
    ctx.accounts.market.check_new_participant(
        ctx.accounts.participant.is_initialized(),
        clock.unix_timestamp,
        ctx.accounts.user.lamports(),
    )?;
    let entry_fee = ctx.accounts.market.entry_fee;

    // Escrow the stake in the market account
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.user.to_account_info(),
                to: ctx.accounts.market.to_account_info(),
            },
        ),
        entry_fee,
    )?;

    let market = &mut ctx.accounts.market;
    market.record_join(prediction)?;

    let participant = &mut ctx.accounts.participant;
    participant.market = market.key();
    participant.user = ctx.accounts.user.key();
    participant.prediction = prediction;
    participant.stake = entry_fee;
    participant.joined_at = clock.unix_timestamp;
    participant.has_withdrawn = false;
    participant.payout = 0;
    participant.stats_recorded = false;
    participant.bump = ctx.bumps.participant;

    emit!(PredictionMade {
        market: market.key(),
        user: participant.user,
        prediction,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "User {} joined market {} with {:?} | pool: {} | participants: {}",
        participant.user,
        market.key(),
        prediction,
        market.total_pool,
        market.participant_count,
    );

    Ok(())
}
