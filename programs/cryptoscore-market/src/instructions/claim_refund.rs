use anchor_lang::prelude::*;

use crate::events::RefundClaimed;
use crate::pda::{MARKET_SEED, PARTICIPANT_SEED};
use crate::state::*;
use crate::utils::pay_out;

#[derive(Accounts)]
pub struct ClaimRefund<'info> {
    /// The participant reclaiming their stake.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The cancelled market.
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

pub fn handler(ctx: Context<ClaimRefund>) -> Result<()> {
    let refund = ctx
        .accounts
        .market
        .refund_for(&ctx.accounts.participant)?;

    pay_out(
        &ctx.accounts.market.to_account_info(),
        &ctx.accounts.user.to_account_info(),
        refund,
    )?;

    let market = &mut ctx.accounts.market;
    let participant = &mut ctx.accounts.participant;
    market.record_payout(participant, refund)?;

    emit!(RefundClaimed {
        market: market.key(),
        user: participant.user,
        amount: refund,
    });

    msg!(
        "Refund: {} lamports returned to {} for market {}",
        refund,
        participant.user,
        market.key(),
    );

    Ok(())
}
