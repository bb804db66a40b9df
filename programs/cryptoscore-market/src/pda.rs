use anchor_lang::prelude::*;

use crate::errors::MarketError;

/// ─── Seeds ────────────────────────────────────────────────────────
///
/// Factory:     [b"factory"]
/// Market:      [b"market", factory, match_id]
/// Participant: [b"participant", market, user]
/// UserStats:   [b"user_stats", user]
pub const FACTORY_SEED: &[u8] = b"factory";
pub const MARKET_SEED: &[u8] = b"market";
pub const PARTICIPANT_SEED: &[u8] = b"participant";
pub const USER_STATS_SEED: &[u8] = b"user_stats";

/// A match id is used verbatim as a seed, so it is bound by the runtime's
/// per-seed limit.
pub const MAX_MATCH_ID_LEN: usize = 32;

pub fn validate_match_id(match_id: &str) -> Result<()> {
    require!(!match_id.is_empty(), MarketError::InvalidMatchId);
    require!(
        match_id.len() <= MAX_MATCH_ID_LEN,
        MarketError::MatchIdTooLong
    );
    Ok(())
}

/// Search bumps from 255 downward for the first off-curve address.
///
/// Same search the runtime performs for `seeds::bump` constraints, so an
/// address computed here always matches the one the program checks.
pub fn derive_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(seeds, program_id)
        .ok_or_else(|| error!(MarketError::AddressDerivationFailed))
}

pub fn factory_address(program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    derive_address(&[FACTORY_SEED], program_id)
}

pub fn market_address(
    program_id: &Pubkey,
    factory: &Pubkey,
    match_id: &str,
) -> Result<(Pubkey, u8)> {
    validate_match_id(match_id)?;
    derive_address(
        &[MARKET_SEED, factory.as_ref(), match_id.as_bytes()],
        program_id,
    )
}

pub fn participant_address(
    program_id: &Pubkey,
    market: &Pubkey,
    user: &Pubkey,
) -> Result<(Pubkey, u8)> {
    derive_address(
        &[PARTICIPANT_SEED, market.as_ref(), user.as_ref()],
        program_id,
    )
}

pub fn user_stats_address(program_id: &Pubkey, user: &Pubkey) -> Result<(Pubkey, u8)> {
    derive_address(&[USER_STATS_SEED, user.as_ref()], program_id)
}
