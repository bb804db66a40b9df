use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::pda::MAX_MATCH_ID_LEN;
use crate::payout::{self, FeeSchedule, Settlement};

/// ─── Factory ──────────────────────────────────────────────────────
///
/// PDA: seeds = [b"factory"]
///
/// Deployment-wide registry and fee configuration.
#[account]
#[derive(Default)]
pub struct Factory {
    /// May update configuration and cancel any market.
    pub authority: Pubkey,

    /// Wallet receiving platform fees.
    pub platform: Pubkey,

    /// Fee split applied to markets created from now on.
    pub fee_schedule: FeeSchedule,

    /// Total markets created.
    pub market_count: u64,

    /// Sum of the pools of every resolved market (lamports).
    pub total_volume: u64,

    /// Bump seed.
    pub bump: u8,

    /// Reserved.
    pub _reserved: [u8; 32],
}

impl Factory {
    pub const SIZE: usize = 8  // discriminator
        + 32                    // authority
        + 32                    // platform
        + 4                     // fee_schedule
        + 8                     // market_count
        + 8                     // total_volume
        + 1                     // bump
        + 32;                   // reserved

    pub fn register_market(&mut self) -> Result<()> {
        self.market_count = self
            .market_count
            .checked_add(1)
            .ok_or(MarketError::Overflow)?;
        Ok(())
    }

    pub fn credit_volume(&mut self, amount: u64) -> Result<()> {
        self.total_volume = self
            .total_volume
            .checked_add(amount)
            .ok_or(MarketError::Overflow)?;
        Ok(())
    }
}

/// ─── Market Status ────────────────────────────────────────────────
///
/// `Live` is never stored. It is what `Market::phase` reports for an Open
/// market whose kickoff has passed.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum MarketStatus {
    /// Accepting predictions.
    #[default]
    Open,

    /// Kickoff passed, awaiting resolution.
    Live,

    /// Outcome set; winners may withdraw.
    Resolved,

    /// Cancelled before resolution; stakes refundable.
    Cancelled,
}

/// ─── Match Outcome ────────────────────────────────────────────────
///
/// Wire version 1: one numbering for instruction arguments and stored
/// state. `None` is only ever a stored value, never a valid choice.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum MatchOutcome {
    #[default]
    None,
    Home,
    Draw,
    Away,
}

impl MatchOutcome {
    /// Decode a prediction/outcome argument byte.
    pub fn from_choice(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Home),
            2 => Some(Self::Draw),
            3 => Some(Self::Away),
            _ => None,
        }
    }
}

/// ─── Market Account ───────────────────────────────────────────────
///
/// PDA: seeds = [b"market", factory.key, match_id]
///
/// Holds the escrowed pool as lamports on top of its own rent reserve.
/// Never closed: it stays on chain as the record of the match.
#[account]
#[derive(Default)]
pub struct Market {
    /// Factory this market was created under.
    pub factory: Pubkey,

    /// Creator, and the only account allowed to resolve.
    pub creator: Pubkey,

    /// Match identifier (max 32 bytes), unique within the factory.
    pub match_id: String,

    /// Stake every participant pays, in lamports.
    pub entry_fee: u64,

    pub kickoff_time: i64,

    pub end_time: i64,

    pub created_at: i64,

    pub is_public: bool,

    pub status: MarketStatus,

    /// `None` until resolved.
    pub outcome: MatchOutcome,

    // ─── Pool accounting ───
    /// participant_count × entry_fee; fees are tracked separately.
    pub total_pool: u64,

    pub participant_count: u64,

    pub home_count: u64,

    pub draw_count: u64,

    pub away_count: u64,

    /// Fee split fixed at creation.
    pub fee_schedule: FeeSchedule,

    // ─── Settlement state ───
    /// Platform + creator fees paid out at resolution.
    pub fees_collected: u64,

    /// Participants entitled to withdraw.
    pub claimants: u64,

    /// Lamports each claimant receives.
    pub reward_per_claimant: u64,

    /// Lamports already withdrawn or refunded.
    pub paid_out: u64,

    pub withdrawal_count: u64,

    /// Market PDA bump seed.
    pub bump: u8,

    /// Reserved space for future upgrades.
    pub _reserved: [u8; 32],
}

impl Market {
    pub const SIZE: usize = 8  // discriminator
        + 32                    // factory
        + 32                    // creator
        + (4 + MAX_MATCH_ID_LEN) // match_id
        + 8                     // entry_fee
        + 8                     // kickoff_time
        + 8                     // end_time
        + 8                     // created_at
        + 1                     // is_public
        + 1                     // status
        + 1                     // outcome
        + 8                     // total_pool
        + 8                     // participant_count
        + 8                     // home_count
        + 8                     // draw_count
        + 8                     // away_count
        + 4                     // fee_schedule
        + 8                     // fees_collected
        + 8                     // claimants
        + 8                     // reward_per_claimant
        + 8                     // paid_out
        + 8                     // withdrawal_count
        + 1                     // bump
        + 32;                   // reserved

    /// A freshly allocated account is all zeroes; an initialized market
    /// always has its factory set.
    pub fn is_initialized(&self) -> bool {
        self.factory != Pubkey::default()
    }

    /// A market address already holding a market means the match is taken.
    pub fn check_unclaimed(&self) -> Result<()> {
        require!(!self.is_initialized(), MarketError::DuplicateMarket);
        Ok(())
    }

    /// Status as observed at `now`, with `Live` derived from kickoff.
    pub fn phase(&self, now: i64) -> MarketStatus {
        match self.status {
            MarketStatus::Open | MarketStatus::Live if now >= self.kickoff_time => {
                MarketStatus::Live
            }
            MarketStatus::Live => MarketStatus::Open,
            status => status,
        }
    }

    pub fn count_for(&self, outcome: MatchOutcome) -> u64 {
        match outcome {
            MatchOutcome::Home => self.home_count,
            MatchOutcome::Draw => self.draw_count,
            MatchOutcome::Away => self.away_count,
            MatchOutcome::None => 0,
        }
    }

    /// total_pool == participant_count × entry_fee and the per-outcome
    /// tallies add up to participant_count.
    pub fn pool_is_consistent(&self) -> bool {
        let expected_pool = self.participant_count.checked_mul(self.entry_fee);
        let tallies = self
            .home_count
            .checked_add(self.draw_count)
            .and_then(|sum| sum.checked_add(self.away_count));
        expected_pool == Some(self.total_pool) && tallies == Some(self.participant_count)
    }

    // ─── Join ───

    pub fn check_joinable(&self, now: i64) -> Result<()> {
        match self.phase(now) {
            MarketStatus::Open => Ok(()),
            MarketStatus::Live => err!(MarketError::MarketAlreadyStarted),
            MarketStatus::Resolved => err!(MarketError::MarketAlreadyResolved),
            MarketStatus::Cancelled => err!(MarketError::MarketCancelled),
        }
    }

    /// Admission of one user: not yet joined, joinable at `now`, and able
    /// to cover the entry fee.
    pub fn check_new_participant(
        &self,
        already_joined: bool,
        now: i64,
        user_lamports: u64,
    ) -> Result<()> {
        require!(!already_joined, MarketError::AlreadyJoined);
        self.check_joinable(now)?;
        require!(
            user_lamports >= self.entry_fee,
            MarketError::InsufficientFunds
        );
        Ok(())
    }

    /// Book one stake of `entry_fee` on `prediction`.
    pub fn record_join(&mut self, prediction: MatchOutcome) -> Result<()> {
        let total_pool = self
            .total_pool
            .checked_add(self.entry_fee)
            .ok_or(MarketError::Overflow)?;
        let participant_count = self
            .participant_count
            .checked_add(1)
            .ok_or(MarketError::Overflow)?;
        let tally = match prediction {
            MatchOutcome::Home => &mut self.home_count,
            MatchOutcome::Draw => &mut self.draw_count,
            MatchOutcome::Away => &mut self.away_count,
            MatchOutcome::None => return err!(MarketError::InvalidPrediction),
        };
        *tally = tally.checked_add(1).ok_or(MarketError::Overflow)?;

        self.total_pool = total_pool;
        self.participant_count = participant_count;
        Ok(())
    }

    // ─── Resolve ───

    pub fn check_resolver(&self, resolver: &Pubkey) -> Result<()> {
        require_keys_eq!(*resolver, self.creator, MarketError::UnauthorizedResolver);
        Ok(())
    }

    pub fn check_resolvable(&self, now: i64) -> Result<()> {
        match self.phase(now) {
            MarketStatus::Live => Ok(()),
            MarketStatus::Open => err!(MarketError::MarketNotStarted),
            MarketStatus::Resolved => err!(MarketError::MarketAlreadyResolved),
            MarketStatus::Cancelled => err!(MarketError::MarketCancelled),
        }
    }

    /// Fees and per-claimant reward if the market resolved to `outcome`.
    pub fn settlement(&self, outcome: MatchOutcome) -> Result<Settlement> {
        require!(outcome != MatchOutcome::None, MarketError::InvalidOutcome);
        payout::settle(
            self.total_pool,
            &self.fee_schedule,
            self.count_for(outcome),
            self.participant_count,
        )
    }

    pub fn apply_resolution(&mut self, outcome: MatchOutcome, settlement: &Settlement) {
        self.status = MarketStatus::Resolved;
        self.outcome = outcome;
        self.fees_collected = settlement.fees.total_fees();
        self.claimants = settlement.claimants;
        self.reward_per_claimant = settlement.reward_per_claimant;
    }

    // ─── Withdraw ───

    /// Nobody picked the outcome, so everyone is refunded.
    pub fn refunds_everyone(&self) -> bool {
        self.status == MarketStatus::Resolved && self.count_for(self.outcome) == 0
    }

    pub fn is_claimant(&self, prediction: MatchOutcome) -> bool {
        self.status == MarketStatus::Resolved
            && (prediction == self.outcome || self.refunds_everyone())
    }

    /// Reward owed to `participant`, checking every withdrawal precondition.
    pub fn reward_for(&self, participant: &Participant) -> Result<u64> {
        require!(
            self.status == MarketStatus::Resolved,
            MarketError::MarketNotResolved
        );
        require!(
            self.is_claimant(participant.prediction),
            MarketError::NotAWinner
        );
        require!(!participant.has_withdrawn, MarketError::AlreadyWithdrawn);
        Ok(self.reward_per_claimant)
    }

    /// Mark `participant` as paid `amount`. Used for rewards and refunds.
    pub fn record_payout(&mut self, participant: &mut Participant, amount: u64) -> Result<()> {
        require!(!participant.has_withdrawn, MarketError::AlreadyWithdrawn);
        self.paid_out = self
            .paid_out
            .checked_add(amount)
            .ok_or(MarketError::Overflow)?;
        self.withdrawal_count = self
            .withdrawal_count
            .checked_add(1)
            .ok_or(MarketError::Overflow)?;
        participant.has_withdrawn = true;
        participant.payout = amount;
        Ok(())
    }

    // ─── Cancel ───

    pub fn check_cancellable(&self) -> Result<()> {
        match self.status {
            MarketStatus::Open | MarketStatus::Live => Ok(()),
            MarketStatus::Resolved => err!(MarketError::MarketAlreadyResolved),
            MarketStatus::Cancelled => err!(MarketError::MarketCancelled),
        }
    }

    pub fn refund_for(&self, participant: &Participant) -> Result<u64> {
        require!(
            self.status == MarketStatus::Cancelled,
            MarketError::MarketNotCancelled
        );
        require!(!participant.has_withdrawn, MarketError::AlreadyWithdrawn);
        Ok(participant.stake)
    }

    // ─── Stats ───

    /// Whether `participant` won, and what a win paid.
    pub fn result_for(&self, participant: &Participant) -> Result<(bool, u64)> {
        require!(
            self.status == MarketStatus::Resolved,
            MarketError::MarketNotResolved
        );
        require!(
            !participant.stats_recorded,
            MarketError::StatsAlreadyRecorded
        );
        let won = participant.prediction == self.outcome;
        let earned = if won { self.reward_per_claimant } else { 0 };
        Ok((won, earned))
    }
}

/// ─── Participant ──────────────────────────────────────────────────
///
/// PDA: seeds = [b"participant", market.key, user.key]
///
/// One per (market, user). Its existence is the joined flag.
#[account]
#[derive(Default)]
pub struct Participant {
    pub market: Pubkey,

    pub user: Pubkey,

    /// Never `MatchOutcome::None`.
    pub prediction: MatchOutcome,

    /// Lamports staked (the market's entry fee at join time).
    pub stake: u64,

    pub joined_at: i64,

    /// Set exactly once, by withdraw or refund.
    pub has_withdrawn: bool,

    /// Lamports received on withdraw or refund.
    pub payout: u64,

    /// Whether this result has been folded into the user's stats.
    pub stats_recorded: bool,

    /// Bump seed.
    pub bump: u8,

    /// Reserved.
    pub _reserved: [u8; 16],
}

impl Participant {
    pub const SIZE: usize = 8  // discriminator
        + 32                    // market
        + 32                    // user
        + 1                     // prediction
        + 8                     // stake
        + 8                     // joined_at
        + 1                     // has_withdrawn
        + 8                     // payout
        + 1                     // stats_recorded
        + 1                     // bump
        + 16;                   // reserved

    pub fn is_initialized(&self) -> bool {
        self.market != Pubkey::default()
    }
}

/// ─── User Stats ───────────────────────────────────────────────────
///
/// PDA: seeds = [b"user_stats", user.key]
///
/// Cross-market record, one entry per resolved market joined.
#[account]
#[derive(Default)]
pub struct UserStats {
    pub user: Pubkey,

    pub total_markets: u64,

    pub total_wins: u64,

    pub total_losses: u64,

    /// Lamports staked across recorded markets.
    pub total_wagered: u64,

    /// Lamports won across recorded markets.
    pub total_earnings: u64,

    /// Positive = consecutive wins, negative = consecutive losses.
    pub current_streak: i64,

    pub best_streak: u64,

    pub last_updated: i64,

    /// Bump seed.
    pub bump: u8,
}

impl UserStats {
    pub const SIZE: usize = 8  // discriminator
        + 32                    // user
        + 8                     // total_markets
        + 8                     // total_wins
        + 8                     // total_losses
        + 8                     // total_wagered
        + 8                     // total_earnings
        + 8                     // current_streak
        + 8                     // best_streak
        + 8                     // last_updated
        + 1;                    // bump

    pub fn record(&mut self, won: bool, wagered: u64, earned: u64, now: i64) -> Result<()> {
        self.total_markets = self
            .total_markets
            .checked_add(1)
            .ok_or(MarketError::Overflow)?;
        self.total_wagered = self
            .total_wagered
            .checked_add(wagered)
            .ok_or(MarketError::Overflow)?;

        if won {
            self.total_wins = self.total_wins.checked_add(1).ok_or(MarketError::Overflow)?;
            self.total_earnings = self
                .total_earnings
                .checked_add(earned)
                .ok_or(MarketError::Overflow)?;
            self.current_streak = if self.current_streak > 0 {
                self.current_streak
                    .checked_add(1)
                    .ok_or(MarketError::Overflow)?
            } else {
                1
            };
            self.best_streak = self.best_streak.max(self.current_streak.unsigned_abs());
        } else {
            self.total_losses = self
                .total_losses
                .checked_add(1)
                .ok_or(MarketError::Overflow)?;
            self.current_streak = if self.current_streak < 0 {
                self.current_streak
                    .checked_sub(1)
                    .ok_or(MarketError::Underflow)?
            } else {
                -1
            };
        }

        self.last_updated = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOL: u64 = 1_000_000_000;
    const KICKOFF: i64 = 1_700_000_000;
    const BEFORE: i64 = KICKOFF - 3_600;
    const AFTER: i64 = KICKOFF + 7_200;

    fn assert_error<T: std::fmt::Debug>(result: Result<T>, expected: MarketError) {
        assert_eq!(result.unwrap_err(), anchor_lang::error::Error::from(expected));
    }

    fn market(entry_fee: u64, fee_schedule: FeeSchedule) -> Market {
        Market {
            factory: Pubkey::new_unique(),
            creator: Pubkey::new_unique(),
            match_id: "EPL-2024-123".to_string(),
            entry_fee,
            kickoff_time: KICKOFF,
            end_time: KICKOFF + 6_300,
            created_at: KICKOFF - 86_400,
            is_public: true,
            fee_schedule,
            ..Default::default()
        }
    }

    fn join(market: &mut Market, prediction: MatchOutcome) -> Participant {
        market.check_joinable(BEFORE).unwrap();
        market.record_join(prediction).unwrap();
        Participant {
            market: Pubkey::new_unique(),
            user: Pubkey::new_unique(),
            prediction,
            stake: market.entry_fee,
            joined_at: BEFORE,
            ..Default::default()
        }
    }

    fn resolve(market: &mut Market, outcome: MatchOutcome) {
        market.check_resolvable(AFTER).unwrap();
        let settlement = market.settlement(outcome).unwrap();
        market.apply_resolution(outcome, &settlement);
    }

    fn withdraw(market: &mut Market, participant: &mut Participant) -> Result<u64> {
        let reward = market.reward_for(participant)?;
        market.record_payout(participant, reward)?;
        Ok(reward)
    }

    #[test]
    fn test_account_sizes_match_serialized_layout() {
        let mut data = Vec::new();
        let mut m = market(SOL, FeeSchedule::default());
        m.match_id = "x".repeat(MAX_MATCH_ID_LEN);
        m.try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), Market::SIZE);

        let decoded = Market::try_deserialize(&mut data.as_slice()).unwrap();
        assert_eq!(decoded.match_id, m.match_id);
        assert_eq!(decoded.creator, m.creator);

        data.clear();
        Participant::default().try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), Participant::SIZE);

        data.clear();
        Factory::default().try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), Factory::SIZE);

        data.clear();
        UserStats::default().try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), UserStats::SIZE);
    }

    #[test]
    fn test_choice_encoding() {
        assert_eq!(MatchOutcome::from_choice(0), None);
        assert_eq!(MatchOutcome::from_choice(1), Some(MatchOutcome::Home));
        assert_eq!(MatchOutcome::from_choice(2), Some(MatchOutcome::Draw));
        assert_eq!(MatchOutcome::from_choice(3), Some(MatchOutcome::Away));
        assert_eq!(MatchOutcome::from_choice(4), None);
        // Stored byte matches the argument byte.
        assert_eq!(MatchOutcome::Away as u8, 3);
    }

    #[test]
    fn test_phase_is_derived_from_kickoff() {
        let mut m = market(SOL, FeeSchedule::default());
        assert_eq!(m.phase(BEFORE), MarketStatus::Open);
        assert_eq!(m.phase(KICKOFF), MarketStatus::Live);
        assert_eq!(m.status, MarketStatus::Open);

        m.status = MarketStatus::Cancelled;
        assert_eq!(m.phase(AFTER), MarketStatus::Cancelled);
    }

    #[test]
    fn test_pool_accounting_holds_across_joins() {
        let mut m = market(SOL / 10, FeeSchedule::default());
        let picks = [
            MatchOutcome::Home,
            MatchOutcome::Away,
            MatchOutcome::Draw,
            MatchOutcome::Home,
            MatchOutcome::Home,
        ];
        for pick in picks {
            join(&mut m, pick);
            assert!(m.pool_is_consistent());
        }
        assert_eq!(m.participant_count, 5);
        assert_eq!(m.total_pool, SOL / 2);
        assert_eq!(m.home_count, 3);
        assert_eq!(m.draw_count, 1);
        assert_eq!(m.away_count, 1);
    }

    #[test]
    fn test_join_after_kickoff_is_rejected() {
        let m = market(SOL, FeeSchedule::default());
        assert_error(m.check_joinable(KICKOFF), MarketError::MarketAlreadyStarted);
        assert_error(m.check_joinable(AFTER), MarketError::MarketAlreadyStarted);
    }

    #[test]
    fn test_second_join_by_same_user_is_rejected() {
        let mut m = market(SOL, FeeSchedule::default());
        m.check_new_participant(false, BEFORE, SOL).unwrap();
        join(&mut m, MatchOutcome::Home);

        // The participant account now exists at the user's address.
        assert_error(
            m.check_new_participant(true, BEFORE, 10 * SOL),
            MarketError::AlreadyJoined,
        );
        assert_eq!(m.participant_count, 1);
        assert_eq!(m.total_pool, SOL);
    }

    #[test]
    fn test_new_participant_must_cover_entry_fee() {
        let m = market(SOL, FeeSchedule::default());
        assert!(m.check_new_participant(false, BEFORE, SOL).is_ok());
        assert_error(
            m.check_new_participant(false, BEFORE, SOL - 1),
            MarketError::InsufficientFunds,
        );
        assert_error(
            m.check_new_participant(false, KICKOFF, SOL),
            MarketError::MarketAlreadyStarted,
        );
    }

    #[test]
    fn test_join_with_no_choice_changes_nothing() {
        let mut m = market(SOL, FeeSchedule::default());
        assert_error(
            m.record_join(MatchOutcome::None),
            MarketError::InvalidPrediction,
        );
        assert_eq!(m.total_pool, 0);
        assert_eq!(m.participant_count, 0);
    }

    #[test]
    fn test_join_overflow_leaves_market_untouched() {
        let mut m = market(u64::MAX, FeeSchedule::default());
        join(&mut m, MatchOutcome::Home);
        assert_error(m.record_join(MatchOutcome::Draw), MarketError::Overflow);
        assert_eq!(m.participant_count, 1);
        assert_eq!(m.draw_count, 0);
    }

    #[test]
    fn test_only_creator_may_resolve() {
        let m = market(SOL, FeeSchedule::default());
        assert!(m.check_resolver(&m.creator).is_ok());
        assert_error(
            m.check_resolver(&Pubkey::new_unique()),
            MarketError::UnauthorizedResolver,
        );
        assert_eq!(m.status, MarketStatus::Open);
        assert_eq!(m.outcome, MatchOutcome::None);
    }

    #[test]
    fn test_resolve_before_kickoff_is_rejected() {
        let m = market(SOL, FeeSchedule::default());
        assert_error(m.check_resolvable(BEFORE), MarketError::MarketNotStarted);
    }

    #[test]
    fn test_resolve_twice_keeps_first_outcome() {
        let mut m = market(SOL, FeeSchedule::default());
        join(&mut m, MatchOutcome::Home);
        resolve(&mut m, MatchOutcome::Home);

        assert_error(m.check_resolvable(AFTER), MarketError::MarketAlreadyResolved);
        assert_eq!(m.outcome, MatchOutcome::Home);
        assert_eq!(m.status, MarketStatus::Resolved);
    }

    #[test]
    fn test_six_joiners_two_percent_fee() {
        let mut m = market(SOL, FeeSchedule::new(100, 100).unwrap());
        let mut people: Vec<Participant> = [
            MatchOutcome::Home,
            MatchOutcome::Home,
            MatchOutcome::Draw,
            MatchOutcome::Draw,
            MatchOutcome::Away,
            MatchOutcome::Away,
        ]
        .into_iter()
        .map(|pick| join(&mut m, pick))
        .collect();
        assert_eq!(m.total_pool, 6 * SOL);

        resolve(&mut m, MatchOutcome::Home);
        assert_eq!(m.fees_collected, 120_000_000);

        for p in people.iter_mut().take(2) {
            assert_eq!(withdraw(&mut m, p).unwrap(), 2_940_000_000);
            assert!(p.has_withdrawn);
        }
        for p in people.iter_mut().skip(2) {
            assert_error(withdraw(&mut m, p), MarketError::NotAWinner);
            assert_eq!(p.payout, 0);
        }
        assert_eq!(m.paid_out, 5_880_000_000);
        assert_eq!(m.withdrawal_count, 2);
    }

    #[test]
    fn test_default_fee_payout_conservation() {
        let mut m = market(SOL, FeeSchedule::default());
        let mut winners: Vec<Participant> = (0..3).map(|_| join(&mut m, MatchOutcome::Away)).collect();
        join(&mut m, MatchOutcome::Home);
        resolve(&mut m, MatchOutcome::Away);

        assert_eq!(m.fees_collected, 200_000_000);
        let mut paid = 0;
        for w in winners.iter_mut() {
            paid += withdraw(&mut m, w).unwrap();
        }
        assert!(paid <= m.total_pool - m.fees_collected);
        assert_eq!(paid, 3 * 1_266_666_666);
    }

    #[test]
    fn test_second_withdraw_is_rejected() {
        let mut m = market(SOL, FeeSchedule::default());
        let mut winner = join(&mut m, MatchOutcome::Draw);
        resolve(&mut m, MatchOutcome::Draw);

        let reward = withdraw(&mut m, &mut winner).unwrap();
        assert_error(withdraw(&mut m, &mut winner), MarketError::AlreadyWithdrawn);
        assert_eq!(winner.payout, reward);
        assert_eq!(m.paid_out, reward);
    }

    #[test]
    fn test_withdraw_before_resolution_is_rejected() {
        let mut m = market(SOL, FeeSchedule::default());
        let winner = join(&mut m, MatchOutcome::Draw);
        assert_error(m.reward_for(&winner), MarketError::MarketNotResolved);
    }

    #[test]
    fn test_no_winners_refunds_every_participant() {
        let mut m = market(SOL, FeeSchedule::default());
        let mut people: Vec<Participant> = (0..4).map(|_| join(&mut m, MatchOutcome::Home)).collect();
        resolve(&mut m, MatchOutcome::Away);

        assert!(m.refunds_everyone());
        assert_eq!(m.claimants, 4);
        for p in people.iter_mut() {
            assert_eq!(withdraw(&mut m, p).unwrap(), 950_000_000);
        }
    }

    #[test]
    fn test_cancelled_market_refunds_stake_once() {
        let mut m = market(SOL, FeeSchedule::default());
        let mut p = join(&mut m, MatchOutcome::Home);

        m.check_cancellable().unwrap();
        m.status = MarketStatus::Cancelled;

        assert_error(m.check_joinable(BEFORE), MarketError::MarketCancelled);
        assert_error(m.check_resolvable(AFTER), MarketError::MarketCancelled);
        assert_error(m.reward_for(&p), MarketError::MarketNotResolved);

        let refund = m.refund_for(&p).unwrap();
        assert_eq!(refund, SOL);
        m.record_payout(&mut p, refund).unwrap();
        assert_error(m.refund_for(&p), MarketError::AlreadyWithdrawn);
        assert_error(m.check_cancellable(), MarketError::MarketCancelled);
    }

    #[test]
    fn test_resolved_market_cannot_be_cancelled_or_refunded() {
        let mut m = market(SOL, FeeSchedule::default());
        let p = join(&mut m, MatchOutcome::Home);
        resolve(&mut m, MatchOutcome::Home);
        assert_error(m.check_cancellable(), MarketError::MarketAlreadyResolved);
        assert_error(m.refund_for(&p), MarketError::MarketNotCancelled);
    }

    #[test]
    fn test_result_for_resolved_participants() {
        let mut m = market(SOL, FeeSchedule::default());
        let mut winner = join(&mut m, MatchOutcome::Home);
        let loser = join(&mut m, MatchOutcome::Away);
        assert_error(m.result_for(&winner), MarketError::MarketNotResolved);

        resolve(&mut m, MatchOutcome::Home);
        assert_eq!(m.result_for(&winner).unwrap(), (true, 1_900_000_000));
        assert_eq!(m.result_for(&loser).unwrap(), (false, 0));

        winner.stats_recorded = true;
        assert_error(m.result_for(&winner), MarketError::StatsAlreadyRecorded);
    }

    #[test]
    fn test_user_stats_streaks() {
        let mut stats = UserStats::default();
        stats.record(true, SOL, 2 * SOL, 1).unwrap();
        stats.record(true, SOL, 3 * SOL, 2).unwrap();
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.best_streak, 2);

        stats.record(false, SOL, 0, 3).unwrap();
        assert_eq!(stats.current_streak, -1);
        stats.record(false, SOL, 0, 4).unwrap();
        assert_eq!(stats.current_streak, -2);

        stats.record(true, SOL, SOL, 5).unwrap();
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.best_streak, 2);

        assert_eq!(stats.total_markets, 5);
        assert_eq!(stats.total_wins, 3);
        assert_eq!(stats.total_losses, 2);
        assert_eq!(stats.total_wagered, 5 * SOL);
        assert_eq!(stats.total_earnings, 6 * SOL);
        assert_eq!(stats.last_updated, 5);
    }

    #[test]
    fn test_factory_counters() {
        let mut factory = Factory::default();
        factory.register_market().unwrap();
        factory.credit_volume(6 * SOL).unwrap();
        assert_eq!(factory.market_count, 1);
        assert_eq!(factory.total_volume, 6 * SOL);

        factory.total_volume = u64::MAX;
        assert_error(factory.credit_volume(1), MarketError::Overflow);
    }
}
