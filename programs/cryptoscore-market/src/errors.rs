use anchor_lang::prelude::*;

/// Custom error codes for the CryptoScore market program.
///
/// Error codes are offset from 6000 (Anchor convention). Clients branch on
/// the code, so variants are only ever appended.
#[error_code]
pub enum MarketError {
    // ─── Time window ───
    /// Joining is closed once kickoff has passed.
    #[msg("Market has already started")]
    MarketAlreadyStarted,

    /// Resolution is only possible once kickoff has passed.
    #[msg("Market has not started yet")]
    MarketNotStarted,

    // ─── Market state ───
    #[msg("Market is already resolved")]
    MarketAlreadyResolved,

    #[msg("Market is not resolved yet")]
    MarketNotResolved,

    #[msg("Market has been cancelled")]
    MarketCancelled,

    #[msg("Market is not cancelled")]
    MarketNotCancelled,

    // ─── Authorization ───
    /// Only the market creator can resolve.
    #[msg("Only the market creator can resolve")]
    UnauthorizedResolver,

    #[msg("Unauthorized: not the factory authority or market creator")]
    UnauthorizedAuthority,

    // ─── Duplication ───
    #[msg("User has already joined this market")]
    AlreadyJoined,

    #[msg("A market for this match already exists")]
    DuplicateMarket,

    // ─── Eligibility ───
    #[msg("User is not a winner")]
    NotAWinner,

    #[msg("Rewards already withdrawn")]
    AlreadyWithdrawn,

    #[msg("Result already recorded for this participant")]
    StatsAlreadyRecorded,

    // ─── Input ───
    #[msg("Prediction must be 1 (home), 2 (draw) or 3 (away)")]
    InvalidPrediction,

    #[msg("Outcome must be 1 (home), 2 (draw) or 3 (away)")]
    InvalidOutcome,

    #[msg("Kickoff must be in the future and before end time")]
    InvalidTimeRange,

    #[msg("Entry fee must be greater than zero")]
    InvalidEntryFee,

    #[msg("Match ID cannot be empty")]
    InvalidMatchId,

    #[msg("Match ID is too long (max 32 bytes)")]
    MatchIdTooLong,

    #[msg("Platform plus creator fee cannot exceed 10% (1000 bps)")]
    InvalidFeeConfig,

    #[msg("Platform account does not match factory configuration")]
    InvalidPlatformAccount,

    #[msg("Account does not belong to this market or factory")]
    MarketMismatch,

    // ─── Resources ───
    #[msg("Insufficient funds to pay the entry fee")]
    InsufficientFunds,

    /// Market balance below what the books say it owes. Only reachable if an
    /// accounting invariant is broken.
    #[msg("Market balance insufficient: accounting invariant violated")]
    InsufficientMarketBalance,

    // ─── Arithmetic ───
    #[msg("Arithmetic overflow")]
    Overflow,

    #[msg("Arithmetic underflow")]
    Underflow,

    // ─── Address derivation ───
    #[msg("No valid bump found for program address")]
    AddressDerivationFailed,
}
