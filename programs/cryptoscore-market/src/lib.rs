use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod payout;
pub mod pda;
pub mod state;
pub mod utils;

use instructions::*;
use payout::FeeSchedule;

declare_id!("94CjfuYYswDbcjasA1PTUmHhsqFsBQC4JnsiKB8nKJhQ");

#[program]
pub mod cryptoscore_market {
    use super::*;

    /// Create the factory singleton with its fee schedule and platform
    /// wallet.
    pub fn initialize_factory(
        ctx: Context<InitializeFactory>,
        fee_schedule: FeeSchedule,
    ) -> Result<()> {
        instructions::initialize_factory::handler(ctx, fee_schedule)
    }

    /// Change the factory authority, platform wallet or fee schedule.
    ///
    /// Existing markets keep the fee schedule they were created with.
    pub fn update_factory(ctx: Context<UpdateFactory>, params: UpdateFactoryParams) -> Result<()> {
        instructions::update_factory::handler(ctx, params)
    }

    /// Create a market for one match.
    ///
    /// The market address is derived from the match id, so a second market
    /// for the same match fails with `DuplicateMarket`.
    pub fn create_market(ctx: Context<CreateMarket>, params: CreateMarketParams) -> Result<()> {
        instructions::create_market::handler(ctx, params)
    }

    /// Stake the entry fee on Home (1), Draw (2) or Away (3).
    ///
    /// Allowed once per user, before kickoff.
    pub fn join_market(ctx: Context<JoinMarket>, prediction: u8) -> Result<()> {
        instructions::join_market::handler(ctx, prediction)
    }

    /// Set the match outcome (creator only, after kickoff).
    ///
    /// Platform and creator fees are paid immediately; winner rewards are
    /// fixed here and pulled later through `withdraw`.
    pub fn resolve_market(ctx: Context<ResolveMarket>, outcome: u8) -> Result<()> {
        instructions::resolve::handler(ctx, outcome)
    }

    /// Pay a claimant their share of the post-fee pool, once.
    ///
    /// reward = (total_pool − fees) / claimants, where claimants are the
    /// winners, or every participant if nobody picked the outcome.
    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::withdraw::handler(ctx)
    }

    /// Cancel a market before resolution (creator or factory authority).
    ///
    /// Every participant can then reclaim their stake via `claim_refund`.
    pub fn cancel_market(ctx: Context<CancelMarket>) -> Result<()> {
        instructions::cancel::handler(ctx)
    }

    /// Return a participant's stake from a cancelled market.
    pub fn claim_refund(ctx: Context<ClaimRefund>) -> Result<()> {
        instructions::claim_refund::handler(ctx)
    }

    /// Record a participant's win or loss in their cross-market stats.
    pub fn record_result(ctx: Context<RecordResult>) -> Result<()> {
        instructions::record_result::handler(ctx)
    }
}
