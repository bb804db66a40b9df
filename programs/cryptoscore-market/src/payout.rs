use anchor_lang::prelude::*;

use crate::errors::MarketError;

pub const BPS_DENOMINATOR: u64 = 10_000;

/// Platform + creator fee may never exceed 10%.
pub const MAX_TOTAL_FEE_BPS: u16 = 1_000;

pub const DEFAULT_PLATFORM_FEE_BPS: u16 = 300;
pub const DEFAULT_CREATOR_FEE_BPS: u16 = 200;

/// ─── Fee Schedule ─────────────────────────────────────────────────
///
/// Configured on the factory, snapshotted onto each market at creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSchedule {
    pub platform_fee_bps: u16,
    pub creator_fee_bps: u16,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            platform_fee_bps: DEFAULT_PLATFORM_FEE_BPS,
            creator_fee_bps: DEFAULT_CREATOR_FEE_BPS,
        }
    }
}

impl FeeSchedule {
    pub fn new(platform_fee_bps: u16, creator_fee_bps: u16) -> Result<Self> {
        let schedule = Self {
            platform_fee_bps,
            creator_fee_bps,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn validate(&self) -> Result<()> {
        require!(
            self.total_bps() <= MAX_TOTAL_FEE_BPS,
            MarketError::InvalidFeeConfig
        );
        Ok(())
    }

    /// Saturates, so any real sum above the cap still compares above it.
    pub fn total_bps(&self) -> u16 {
        self.platform_fee_bps.saturating_add(self.creator_fee_bps)
    }

    /// Deduct both fees from `total_pool`. Each fee rounds down, so the
    /// rounding remainder stays in the prize pool.
    pub fn split(&self, total_pool: u64) -> Result<FeeSplit> {
        let platform_fee = bps_of(total_pool, self.platform_fee_bps)?;
        let creator_fee = bps_of(total_pool, self.creator_fee_bps)?;
        let prize_pool = total_pool
            .checked_sub(platform_fee)
            .and_then(|rest| rest.checked_sub(creator_fee))
            .ok_or(MarketError::Underflow)?;

        Ok(FeeSplit {
            platform_fee,
            creator_fee,
            prize_pool,
        })
    }
}

fn bps_of(amount: u64, bps: u16) -> Result<u64> {
    let scaled = (amount as u128)
        .checked_mul(bps as u128)
        .ok_or(MarketError::Overflow)?
        / BPS_DENOMINATOR as u128;
    u64::try_from(scaled).map_err(|_| error!(MarketError::Overflow))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    pub platform_fee: u64,
    pub creator_fee: u64,
    /// What remains for claimants after both fees.
    pub prize_pool: u64,
}

impl FeeSplit {
    pub fn total_fees(&self) -> u64 {
        self.platform_fee.saturating_add(self.creator_fee)
    }
}

/// ─── Settlement ───────────────────────────────────────────────────
///
/// Everything resolution needs to know, computed before any lamports move.
/// Rewards themselves are paid lazily, one `withdraw` per claimant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub fees: FeeSplit,
    /// Number of participants entitled to withdraw.
    pub claimants: u64,
    pub reward_per_claimant: u64,
    /// Integer-division remainder left in the market account.
    pub dust: u64,
    /// Nobody picked the winning outcome; every participant is refunded.
    pub refund_all: bool,
}

/// Compute the settlement of a pool.
///
/// Claimants are the winners; if there are none, every participant is a
/// claimant and the prize pool is returned to them evenly.
pub fn settle(
    total_pool: u64,
    schedule: &FeeSchedule,
    winner_count: u64,
    participant_count: u64,
) -> Result<Settlement> {
    require!(
        winner_count <= participant_count,
        MarketError::InsufficientMarketBalance
    );

    let fees = schedule.split(total_pool)?;
    let refund_all = winner_count == 0;
    let claimants = if refund_all {
        participant_count
    } else {
        winner_count
    };

    let reward_per_claimant = fees.prize_pool.checked_div(claimants).unwrap_or(0);
    let distributed = reward_per_claimant
        .checked_mul(claimants)
        .ok_or(MarketError::Overflow)?;
    let dust = fees
        .prize_pool
        .checked_sub(distributed)
        .ok_or(MarketError::Underflow)?;

    Ok(Settlement {
        fees,
        claimants,
        reward_per_claimant,
        dust,
        refund_all,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOL: u64 = 1_000_000_000;

    #[test]
    fn test_default_split_is_five_percent() {
        let split = FeeSchedule::default().split(6 * SOL).unwrap();
        assert_eq!(split.platform_fee, 180_000_000);
        assert_eq!(split.creator_fee, 120_000_000);
        assert_eq!(split.total_fees(), 300_000_000);
        assert_eq!(split.prize_pool, 5_700_000_000);
    }

    #[test]
    fn test_two_percent_variant_six_joiners() {
        // 6 joiners at 1 SOL, 2 picked the winning side.
        let schedule = FeeSchedule::new(100, 100).unwrap();
        let s = settle(6 * SOL, &schedule, 2, 6).unwrap();
        assert_eq!(s.reward_per_claimant, 2_940_000_000);
        assert_eq!(s.dust, 0);
        assert!(!s.refund_all);
    }

    #[test]
    fn test_two_percent_variant_four_sol_pool() {
        let schedule = FeeSchedule::new(100, 100).unwrap();
        let s = settle(4 * SOL, &schedule, 2, 4).unwrap();
        assert_eq!(s.reward_per_claimant, 1_960_000_000);
    }

    #[test]
    fn test_zero_winners_refunds_everyone() {
        let s = settle(3 * SOL, &FeeSchedule::default(), 0, 3).unwrap();
        assert!(s.refund_all);
        assert_eq!(s.claimants, 3);
        assert_eq!(s.reward_per_claimant, 950_000_000);
    }

    #[test]
    fn test_empty_market_settles_to_nothing() {
        let s = settle(0, &FeeSchedule::default(), 0, 0).unwrap();
        assert_eq!(s.claimants, 0);
        assert_eq!(s.reward_per_claimant, 0);
        assert_eq!(s.fees.total_fees(), 0);
        assert_eq!(s.dust, 0);
    }

    #[test]
    fn test_payouts_never_exceed_prize_pool() {
        let schedule = FeeSchedule::default();
        for participants in 1..=40u64 {
            let entry_fee = 1_234_567u64;
            let pool = entry_fee * participants;
            for winners in 0..=participants {
                let s = settle(pool, &schedule, winners, participants).unwrap();
                let paid = s.reward_per_claimant * s.claimants;
                assert_eq!(paid + s.dust, s.fees.prize_pool);
                assert!(s.dust < s.claimants.max(1));
                assert_eq!(s.fees.prize_pool + s.fees.total_fees(), pool);
            }
        }
    }

    #[test]
    fn test_fee_schedule_rejects_more_than_ten_percent() {
        assert!(FeeSchedule::new(600, 400).is_ok());
        assert!(FeeSchedule::new(600, 401).is_err());
        assert!(FeeSchedule::new(u16::MAX, u16::MAX).is_err());
        assert!(FeeSchedule::new(u16::MAX, 0).is_err());
        assert_eq!(FeeSchedule::default().total_bps(), 500);
    }

    #[test]
    fn test_winners_cannot_exceed_participants() {
        assert!(settle(SOL, &FeeSchedule::default(), 3, 2).is_err());
    }

    #[test]
    fn test_large_pool_does_not_overflow() {
        let s = settle(u64::MAX, &FeeSchedule::default(), 1, 1).unwrap();
        assert_eq!(s.fees.prize_pool + s.fees.total_fees(), u64::MAX);
    }
}
