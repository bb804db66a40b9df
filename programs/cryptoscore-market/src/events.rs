use anchor_lang::prelude::*;

use crate::state::MatchOutcome;

#[event]
pub struct FactoryUpdated {
    pub factory: Pubkey,
    pub authority: Pubkey,
    pub platform: Pubkey,
    pub platform_fee_bps: u16,
    pub creator_fee_bps: u16,
}

#[event]
pub struct MarketCreated {
    pub market: Pubkey,
    pub factory: Pubkey,
    pub creator: Pubkey,
    pub match_id: String,
    pub entry_fee: u64,
    pub kickoff_time: i64,
    pub end_time: i64,
    pub is_public: bool,
}

#[event]
pub struct PredictionMade {
    pub market: Pubkey,
    pub user: Pubkey,
    pub prediction: MatchOutcome,
    pub timestamp: i64,
}

#[event]
pub struct MarketResolved {
    pub market: Pubkey,
    pub outcome: MatchOutcome,
    pub winner_count: u64,
    pub total_pool: u64,
    pub platform_fee: u64,
    pub creator_fee: u64,
    pub reward_per_claimant: u64,
    /// No winners: every participant may withdraw.
    pub refund_all: bool,
}

#[event]
pub struct RewardClaimed {
    pub market: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
}

#[event]
pub struct MarketCancelled {
    pub market: Pubkey,
    pub cancelled_by: Pubkey,
    pub participant_count: u64,
}

#[event]
pub struct RefundClaimed {
    pub market: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
}

#[event]
pub struct UserStatsUpdated {
    pub user: Pubkey,
    pub market: Pubkey,
    pub won: bool,
    pub current_streak: i64,
    pub total_earnings: u64,
}
