use anchor_lang::prelude::*;

use crate::events::RewardClaimed;
use crate::pda::{MARKET_SEED, PARTICIPANT_SEED};
use crate::state::*;
use crate::utils::pay_out;

#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// The participant claiming their reward.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The resolved market — source of the reward.
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

    /// Participant PDA of `user` in `market`.
    #[account(
        mut,
        seeds = [PARTICIPANT_SEED, market.key().as_ref(), user.key().as_ref()],
        bump = participant.bump,
    )]
    pub participant: Account<'info, Participant>,
}

pub fn handler(ctx: Context<Withdraw>) -> Result<()> {
    let reward = ctx
        .accounts
        .market
        .reward_for(&ctx.accounts.participant)?;

    pay_out(
        &ctx.accounts.market.to_account_info(),
        &ctx.accounts.user.to_account_info(),
        reward,
    )?;

    let market = &mut ctx.accounts.market;
    let participant = &mut ctx.accounts.participant;
    market.record_payout(participant, reward)?;

    emit!(RewardClaimed {
        market: market.key(),
        user: participant.user,
        amount: reward,
    });

    msg!(
        "User {} withdrew {} lamports from market {} ({}/{} claimed)",
        participant.user,
        reward,
        market.key(),
        market.withdrawal_count,
        market.claimants,
    );

    Ok(())
}
